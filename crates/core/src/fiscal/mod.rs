//! Exercise and period management.

pub mod period;

pub use period::{DateRange, Exercise, MonthPeriod, monthly_periods, period_index};

//! Common types used across the application.

pub mod amount;
pub mod date;
pub mod id;

pub use amount::{AmountParseError, format_amount, format_amount_or_blank, parse_amount, to_cents};
pub use date::{CompactDateError, format_compact_date, parse_compact_date};
pub use id::*;

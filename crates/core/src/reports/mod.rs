//! Financial report generation.
//!
//! The aggregators are pure functions over a slice of entry lines:
//! - Trial balance and third-party balances
//! - Balance sheet / income statement split with the net result
//! - Progressive (cumulative monthly) balance
//! - General ledger with running balances
//!
//! [`ReportQueryService`] reads a snapshot from an entry line source and
//! caches the results.

pub mod balance;
pub mod cache;
pub mod classifier;
pub mod error;
pub mod general_ledger;
pub mod progressive;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use balance::{BalanceAggregator, PAYABLE_PREFIXES, RECEIVABLE_PREFIXES};
pub use cache::ReportCache;
pub use classifier::ResultClassifier;
pub use error::ReportError;
pub use general_ledger::LedgerBuilder;
pub use progressive::ProgressiveBalanceAggregator;
pub use service::ReportQueryService;
pub use types::*;

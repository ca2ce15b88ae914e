//! Canonical ledger model.
//!
//! This module holds everything the reports consume:
//! - Entry lines, accounts and account classes
//! - The read-only chart of accounts
//! - The line filter shared by every report
//! - Voucher grouping and balance checks
//! - The normalization adapter for stored records

pub mod catalog;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod types;
pub mod voucher;
pub mod warning;

pub use catalog::AccountCatalog;
pub use error::LineError;
pub use filter::{AccountRange, LineFilter};
pub use normalize::{
    Normalized, RawAccount, RawEntryLine, RawExercise, normalize_all, normalize_lines,
};
pub use types::{Account, AccountClass, EntryLine, StatementSide};
pub use voucher::{
    DEFAULT_VOUCHER_TOLERANCE, VoucherKey, check_vouchers, is_monthly_statement_reference,
};
pub use warning::DataIntegrityWarning;

//! Advisory data-integrity findings.
//!
//! Warnings never block a computation; they travel next to its result.

use std::fmt;

use chrono::NaiveDate;
use compta_shared::types::EntryLineId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Something in the source data looks wrong, but the result was still computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    /// A voucher whose debits and credits differ by more than the tolerance.
    UnbalancedVoucher {
        /// Journal code.
        journal_code: String,
        /// Piece reference.
        piece_reference: String,
        /// Voucher date; `None` for monthly bank statements.
        date: Option<NaiveDate>,
        /// Total debit.
        debit: Decimal,
        /// Total credit.
        credit: Decimal,
    },

    /// A line dated outside the reporting span was ignored.
    MovementOutsideSpan {
        /// The ignored line.
        line_id: EntryLineId,
        /// Its account.
        account_number: String,
        /// Its date.
        date: NaiveDate,
        /// First day of the span.
        span_start: NaiveDate,
        /// Last day of the span.
        span_end: NaiveDate,
    },
}

impl DataIntegrityWarning {
    /// Returns the warning code for reporting.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnbalancedVoucher { .. } => "UNBALANCED_VOUCHER",
            Self::MovementOutsideSpan { .. } => "MOVEMENT_OUTSIDE_SPAN",
        }
    }
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedVoucher {
                journal_code,
                piece_reference,
                date,
                debit,
                credit,
            } => {
                write!(f, "Voucher {journal_code}/{piece_reference}")?;
                if let Some(date) = date {
                    write!(f, " of {date}")?;
                }
                write!(f, " is not balanced. Debit: {debit}, Credit: {credit}")
            }
            Self::MovementOutsideSpan {
                account_number,
                date,
                span_start,
                span_end,
                ..
            } => write!(
                f,
                "Movement on {account_number} dated {date} is outside {span_start}..{span_end}"
            ),
        }
    }
}

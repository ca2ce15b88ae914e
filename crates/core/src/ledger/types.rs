//! Canonical ledger domain types.
//!
//! Everything downstream of the normalization adapter consumes only these
//! types. Amounts are `Decimal`, never floats.

use chrono::NaiveDate;
use compta_shared::types::{EntryLineId, ExerciseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account class, given by the first digit of the account number
/// (French *plan comptable général*).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClass {
    /// Class 1: equity, provisions and long-term debt.
    Capital,
    /// Class 2: fixed assets.
    FixedAsset,
    /// Class 3: inventory and work in progress.
    Inventory,
    /// Class 4: third parties (customers, suppliers, tax, social).
    ThirdParty,
    /// Class 5: financial accounts (bank, cash).
    Financial,
    /// Class 6: expenses.
    Expense,
    /// Class 7: revenue.
    Revenue,
    /// Class 8: special accounts.
    Special,
    /// Anything that does not start with a digit from 1 to 8.
    Other,
}

/// Which financial statement an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementSide {
    /// Classes 1 to 5.
    BalanceSheet,
    /// Classes 6 and 7.
    IncomeStatement,
    /// Class 8.
    Special,
    /// Unclassified accounts.
    Other,
}

impl AccountClass {
    /// Infers the class from the first character of an account number.
    #[must_use]
    pub fn from_account_number(number: &str) -> Self {
        match number.trim_start().chars().next() {
            Some('1') => Self::Capital,
            Some('2') => Self::FixedAsset,
            Some('3') => Self::Inventory,
            Some('4') => Self::ThirdParty,
            Some('5') => Self::Financial,
            Some('6') => Self::Expense,
            Some('7') => Self::Revenue,
            Some('8') => Self::Special,
            _ => Self::Other,
        }
    }

    /// Returns the class digit, or `None` for [`AccountClass::Other`].
    #[must_use]
    pub const fn digit(self) -> Option<u8> {
        match self {
            Self::Capital => Some(1),
            Self::FixedAsset => Some(2),
            Self::Inventory => Some(3),
            Self::ThirdParty => Some(4),
            Self::Financial => Some(5),
            Self::Expense => Some(6),
            Self::Revenue => Some(7),
            Self::Special => Some(8),
            Self::Other => None,
        }
    }

    /// Returns the statement this class reports on.
    #[must_use]
    pub const fn side(self) -> StatementSide {
        match self {
            Self::Capital | Self::FixedAsset | Self::Inventory | Self::ThirdParty | Self::Financial => {
                StatementSide::BalanceSheet
            }
            Self::Expense | Self::Revenue => StatementSide::IncomeStatement,
            Self::Special => StatementSide::Special,
            Self::Other => StatementSide::Other,
        }
    }

    /// Returns true for classes 1 to 5.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self.side(), StatementSide::BalanceSheet)
    }

    /// Returns true for classes 6 and 7.
    #[must_use]
    pub const fn is_income_statement(self) -> bool {
        matches!(self.side(), StatementSide::IncomeStatement)
    }
}

/// A chart-of-accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    /// Account number (e.g. `"411000"`).
    pub number: String,
    /// Account label.
    pub label: String,
    /// Class derived from the first digit of `number`.
    pub class: AccountClass,
}

impl Account {
    /// Creates an account, inferring its class from the number.
    #[must_use]
    pub fn new(number: impl Into<String>, label: impl Into<String>) -> Self {
        let number = number.into();
        let class = AccountClass::from_account_number(&number);
        Self {
            number,
            label: label.into(),
            class,
        }
    }
}

/// One debit-or-credit line of a voucher (*écriture*).
///
/// At most one of `debit`/`credit` is nonzero and both are non-negative; the
/// normalization adapter and the FEC decoder enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryLine {
    /// Unique identifier.
    pub id: EntryLineId,
    /// Exercise the line was booked in.
    pub exercise_id: ExerciseId,
    /// Booking date.
    pub date: NaiveDate,
    /// Journal code (e.g. `"VE"`, `"BQ"`).
    pub journal_code: String,
    /// Piece reference shared by the lines of one voucher.
    pub piece_reference: String,
    /// Account number the line is posted to.
    pub account_number: String,
    /// Free-text label.
    pub label: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

impl EntryLine {
    /// Returns the signed movement (debit minus credit).
    #[must_use]
    pub fn movement(&self) -> Decimal {
        self.debit.saturating_sub(self.credit)
    }

    /// Returns the class of the account the line is posted to.
    #[must_use]
    pub fn account_class(&self) -> AccountClass {
        AccountClass::from_account_number(&self.account_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("101300", AccountClass::Capital, Some(1))]
    #[case("218300", AccountClass::FixedAsset, Some(2))]
    #[case("370000", AccountClass::Inventory, Some(3))]
    #[case("411000", AccountClass::ThirdParty, Some(4))]
    #[case("512000", AccountClass::Financial, Some(5))]
    #[case("606100", AccountClass::Expense, Some(6))]
    #[case("707000", AccountClass::Revenue, Some(7))]
    #[case("801000", AccountClass::Special, Some(8))]
    #[case("901000", AccountClass::Other, None)]
    #[case("", AccountClass::Other, None)]
    #[case("CLIENT", AccountClass::Other, None)]
    fn test_class_from_account_number(
        #[case] number: &str,
        #[case] class: AccountClass,
        #[case] digit: Option<u8>,
    ) {
        assert_eq!(AccountClass::from_account_number(number), class);
        assert_eq!(class.digit(), digit);
    }

    #[test]
    fn test_statement_sides() {
        assert!(AccountClass::Financial.is_balance_sheet());
        assert!(!AccountClass::Financial.is_income_statement());
        assert!(AccountClass::Expense.is_income_statement());
        assert!(AccountClass::Revenue.is_income_statement());
        assert_eq!(AccountClass::Special.side(), StatementSide::Special);
        assert_eq!(AccountClass::Other.side(), StatementSide::Other);
    }

    #[test]
    fn test_account_new_infers_class() {
        let account = Account::new("445710", "TVA collectée");
        assert_eq!(account.class, AccountClass::ThirdParty);
    }

    #[test]
    fn test_entry_line_movement() {
        let line = EntryLine {
            id: EntryLineId::new(),
            exercise_id: ExerciseId::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            journal_code: "VE".to_string(),
            piece_reference: "F-001".to_string(),
            account_number: "707000".to_string(),
            label: "Facture".to_string(),
            debit: Decimal::ZERO,
            credit: dec!(100.00),
        };
        assert_eq!(line.movement(), dec!(-100.00));
        assert_eq!(line.account_class(), AccountClass::Revenue);
    }
}

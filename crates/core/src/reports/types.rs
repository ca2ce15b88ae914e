//! Report data types.

use chrono::NaiveDate;
use compta_shared::types::{EntryLineId, ExerciseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::MonthPeriod;
use crate::ledger::{AccountClass, DataIntegrityWarning};

/// One account of a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceLine {
    /// Account number.
    pub account_number: String,
    /// Account label (catalog label, else the number).
    pub label: String,
    /// Account class.
    pub class: AccountClass,
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Debit excess, zero when the account is creditor.
    pub debtor_balance: Decimal,
    /// Credit excess, zero when the account is debtor.
    pub creditor_balance: Decimal,
}

impl TrialBalanceLine {
    /// Creates a line from its totals, splitting the net balance into
    /// debtor or creditor side.
    #[must_use]
    pub fn from_totals(
        account_number: String,
        label: String,
        total_debit: Decimal,
        total_credit: Decimal,
    ) -> Self {
        let net = total_debit.saturating_sub(total_credit);
        let class = AccountClass::from_account_number(&account_number);
        Self {
            account_number,
            label,
            class,
            total_debit,
            total_credit,
            debtor_balance: net.max(Decimal::ZERO),
            creditor_balance: (-net).max(Decimal::ZERO),
        }
    }

    /// Net balance (debit minus credit).
    #[must_use]
    pub fn net_balance(&self) -> Decimal {
        self.debtor_balance.saturating_sub(self.creditor_balance)
    }
}

/// Totals over a set of trial balance lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceTotals {
    /// Sum of total debits.
    pub total_debit: Decimal,
    /// Sum of total credits.
    pub total_credit: Decimal,
    /// Sum of debtor balances.
    pub debtor_balance: Decimal,
    /// Sum of creditor balances.
    pub creditor_balance: Decimal,
}

impl BalanceTotals {
    /// Adds one line to the totals.
    pub fn add(&mut self, line: &TrialBalanceLine) {
        self.total_debit = self.total_debit.saturating_add(line.total_debit);
        self.total_credit = self.total_credit.saturating_add(line.total_credit);
        self.debtor_balance = self.debtor_balance.saturating_add(line.debtor_balance);
        self.creditor_balance = self.creditor_balance.saturating_add(line.creditor_balance);
    }

    /// Whether total debits equal total credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

impl<'a> FromIterator<&'a TrialBalanceLine> for BalanceTotals {
    fn from_iter<I: IntoIterator<Item = &'a TrialBalanceLine>>(iter: I) -> Self {
        let mut totals = Self::default();
        for line in iter {
            totals.add(line);
        }
        totals
    }
}

/// Trial balance (*balance générale*).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Lines sorted by account number.
    pub lines: Vec<TrialBalanceLine>,
    /// Grand totals.
    pub totals: BalanceTotals,
    /// Totals of classes 1 to 5.
    pub balance_sheet: BalanceTotals,
    /// Totals of classes 6 and 7.
    pub income_statement: BalanceTotals,
    /// Data integrity findings.
    pub warnings: Vec<DataIntegrityWarning>,
}

impl TrialBalance {
    /// Whether grand total debits equal grand total credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.totals.is_balanced()
    }

    /// Looks up the line of an account.
    #[must_use]
    pub fn line(&self, account_number: &str) -> Option<&TrialBalanceLine> {
        self.lines
            .binary_search_by(|line| line.account_number.as_str().cmp(account_number))
            .ok()
            .map(|index| &self.lines[index])
    }
}

/// Sign of the net result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetResult {
    /// Revenue exceeds expenses.
    Profit,
    /// Expenses exceed revenue.
    Loss,
    /// Revenue equals expenses.
    Breakeven,
}

impl NetResult {
    /// Outcome of a signed net result.
    #[must_use]
    pub fn of(net_result: Decimal) -> Self {
        if net_result > Decimal::ZERO {
            Self::Profit
        } else if net_result < Decimal::ZERO {
            Self::Loss
        } else {
            Self::Breakeven
        }
    }
}

/// Trial balance split by financial statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedBalance {
    /// Lines of classes 1 to 5.
    pub balance_sheet_lines: Vec<TrialBalanceLine>,
    /// Lines of classes 6 and 7.
    pub income_statement_lines: Vec<TrialBalanceLine>,
    /// Class 8 and unclassified lines.
    pub special_lines: Vec<TrialBalanceLine>,
    /// Balance sheet totals.
    pub balance_sheet: BalanceTotals,
    /// Income statement totals.
    pub income_statement: BalanceTotals,
    /// Income statement creditor total minus debtor total.
    pub net_result: Decimal,
    /// Sign of `net_result`.
    pub outcome: NetResult,
}

/// One account of a progressive balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveBalanceLine {
    /// Account number.
    pub account_number: String,
    /// Account label.
    pub label: String,
    /// Cumulative net balance at the end of each period.
    pub cumulative_balances: Vec<Decimal>,
    /// Balance at the end of the last period.
    pub final_balance: Decimal,
}

/// Month-by-month cumulative balance (*balance progressive*).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveBalance {
    /// Column periods, in order.
    pub periods: Vec<MonthPeriod>,
    /// Lines sorted by account number.
    pub lines: Vec<ProgressiveBalanceLine>,
    /// Column totals.
    pub period_totals: Vec<Decimal>,
    /// Sum of final balances.
    pub final_total: Decimal,
    /// Data integrity findings.
    pub warnings: Vec<DataIntegrityWarning>,
}

impl ProgressiveBalance {
    /// Looks up the line of an account.
    #[must_use]
    pub fn line(&self, account_number: &str) -> Option<&ProgressiveBalanceLine> {
        self.lines
            .iter()
            .find(|line| line.account_number == account_number)
    }
}

/// One posting in a general ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Source entry line.
    pub line_id: EntryLineId,
    /// Exercise of the source line.
    pub exercise_id: ExerciseId,
    /// Booking date.
    pub date: NaiveDate,
    /// Journal code.
    pub journal_code: String,
    /// Piece reference.
    pub piece_reference: String,
    /// Line label.
    pub label: String,
    /// Debit.
    pub debit: Decimal,
    /// Credit.
    pub credit: Decimal,
    /// Balance after this row.
    pub running_balance: Decimal,
}

/// One account of the general ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Account number.
    pub account_number: String,
    /// Account label.
    pub label: String,
    /// Rows in chronological order.
    pub rows: Vec<LedgerRow>,
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Running balance of the last row, zero without rows.
    pub final_balance: Decimal,
}

/// General ledger (*grand livre*).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralLedger {
    /// Accounts sorted by number.
    pub accounts: Vec<LedgerAccount>,
    /// Total debit across accounts.
    pub total_debit: Decimal,
    /// Total credit across accounts.
    pub total_credit: Decimal,
}

impl GeneralLedger {
    /// Looks up an account.
    #[must_use]
    pub fn account(&self, account_number: &str) -> Option<&LedgerAccount> {
        self.accounts
            .iter()
            .find(|account| account.account_number == account_number)
    }
}

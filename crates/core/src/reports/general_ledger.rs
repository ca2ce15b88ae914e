//! General ledger with running balances and voucher detail lookup.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::types::{GeneralLedger, LedgerAccount, LedgerRow};
use crate::ledger::{AccountCatalog, EntryLine, LineFilter, VoucherKey};

/// Builds the general ledger.
pub struct LedgerBuilder;

impl LedgerBuilder {
    /// Lists the lines matching `filter` per account, in date order, with a
    /// running balance.
    ///
    /// Lines of the same date keep their input order.
    #[must_use]
    pub fn build(lines: &[EntryLine], catalog: &AccountCatalog, filter: &LineFilter) -> GeneralLedger {
        let mut groups: BTreeMap<&str, Vec<&EntryLine>> = BTreeMap::new();
        if filter.include_zero_movement_accounts {
            for account in catalog
                .iter()
                .filter(|account| filter.matches_account(&account.number))
            {
                groups.entry(account.number.as_str()).or_default();
            }
        }

        for line in lines.iter().filter(|line| filter.matches(line)) {
            groups
                .entry(line.account_number.as_str())
                .or_default()
                .push(line);
        }

        let accounts: Vec<LedgerAccount> = groups
            .into_iter()
            .map(|(number, mut group)| {
                group.sort_by_key(|line| line.date);
                Self::account(number, catalog.label_for(number), &group)
            })
            .collect();

        let total_debit = accounts
            .iter()
            .map(|account| account.total_debit)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let total_credit = accounts
            .iter()
            .map(|account| account.total_credit)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        debug!(accounts = accounts.len(), "General ledger built");

        GeneralLedger {
            accounts,
            total_debit,
            total_credit,
        }
    }

    fn account(number: &str, label: &str, group: &[&EntryLine]) -> LedgerAccount {
        let mut running_balance = Decimal::ZERO;
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        let rows: Vec<LedgerRow> = group
            .iter()
            .map(|line| {
                running_balance = running_balance.saturating_add(line.movement());
                total_debit = total_debit.saturating_add(line.debit);
                total_credit = total_credit.saturating_add(line.credit);
                LedgerRow {
                    line_id: line.id,
                    exercise_id: line.exercise_id,
                    date: line.date,
                    journal_code: line.journal_code.clone(),
                    piece_reference: line.piece_reference.clone(),
                    label: line.label.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    running_balance,
                }
            })
            .collect();

        LedgerAccount {
            account_number: number.to_string(),
            label: label.to_string(),
            rows,
            total_debit,
            total_credit,
            final_balance: running_balance,
        }
    }

    /// Every line of the voucher `row` belongs to, across all accounts, in
    /// date order.
    ///
    /// Lines match on exercise, journal code and piece reference, plus the
    /// date unless the reference is a monthly bank statement.
    #[must_use]
    pub fn voucher_detail(lines: &[EntryLine], row: &LedgerRow) -> Vec<EntryLine> {
        let voucher = VoucherKey::new(&row.journal_code, &row.piece_reference, row.date);
        let mut detail: Vec<EntryLine> = lines
            .iter()
            .filter(|line| line.exercise_id == row.exercise_id && voucher.contains(line))
            .cloned()
            .collect();
        detail.sort_by_key(|line| line.date);
        detail
    }
}

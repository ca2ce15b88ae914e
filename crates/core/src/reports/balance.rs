//! Trial balance aggregation.

use std::collections::BTreeMap;

use compta_shared::types::ExerciseId;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{BalanceTotals, TrialBalance, TrialBalanceLine};
use crate::ledger::{
    AccountCatalog, DEFAULT_VOUCHER_TOLERANCE, EntryLine, LineFilter, check_vouchers,
};

/// Account prefixes of customer receivables.
pub const RECEIVABLE_PREFIXES: [&str; 2] = ["411", "412"];

/// Account prefixes of supplier payables.
pub const PAYABLE_PREFIXES: [&str; 2] = ["401", "402"];

/// Builds trial balances from entry lines.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Computes the trial balance of the lines matching `filter`.
    ///
    /// Voucher checks use the default one-cent tolerance.
    #[must_use]
    pub fn aggregate(
        lines: &[EntryLine],
        catalog: &AccountCatalog,
        filter: &LineFilter,
    ) -> TrialBalance {
        Self::aggregate_with_tolerance(lines, catalog, filter, DEFAULT_VOUCHER_TOLERANCE)
    }

    /// Computes the trial balance with an explicit voucher tolerance.
    ///
    /// Vouchers are checked over the lines of the selected period before any
    /// account filtering, so restricting accounts never splits a voucher.
    #[must_use]
    pub fn aggregate_with_tolerance(
        lines: &[EntryLine],
        catalog: &AccountCatalog,
        filter: &LineFilter,
        tolerance: Decimal,
    ) -> TrialBalance {
        let period_lines: Vec<&EntryLine> = lines
            .iter()
            .filter(|line| filter.matches_period(line))
            .collect();
        let warnings = check_vouchers(period_lines.iter().copied(), tolerance);

        let mut totals: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
        if filter.include_zero_movement_accounts {
            for account in catalog
                .iter()
                .filter(|account| filter.matches_account(&account.number))
            {
                totals.entry(account.number.as_str()).or_default();
            }
        }

        for line in period_lines
            .iter()
            .filter(|line| filter.matches_account(&line.account_number))
        {
            let entry = totals.entry(line.account_number.as_str()).or_default();
            entry.0 = entry.0.saturating_add(line.debit);
            entry.1 = entry.1.saturating_add(line.credit);
        }

        let lines: Vec<TrialBalanceLine> = totals
            .into_iter()
            .filter(|(_, (debit, credit))| {
                filter.include_zero_movement_accounts || !debit.is_zero() || !credit.is_zero()
            })
            .map(|(number, (debit, credit))| {
                TrialBalanceLine::from_totals(
                    number.to_string(),
                    catalog.label_for(number).to_string(),
                    debit,
                    credit,
                )
            })
            .collect();

        let totals: BalanceTotals = lines.iter().collect();
        let balance_sheet: BalanceTotals = lines
            .iter()
            .filter(|line| line.class.is_balance_sheet())
            .collect();
        let income_statement: BalanceTotals = lines
            .iter()
            .filter(|line| line.class.is_income_statement())
            .collect();

        debug!(
            accounts = lines.len(),
            warnings = warnings.len(),
            balanced = totals.is_balanced(),
            "Trial balance computed"
        );

        TrialBalance {
            lines,
            totals,
            balance_sheet,
            income_statement,
            warnings,
        }
    }

    /// Per-account balances of third parties whose number starts with one of
    /// `prefixes` (see [`RECEIVABLE_PREFIXES`] and [`PAYABLE_PREFIXES`]).
    #[must_use]
    pub fn third_party_balances(
        lines: &[EntryLine],
        catalog: &AccountCatalog,
        exercise_id: Option<ExerciseId>,
        prefixes: &[&str],
    ) -> TrialBalance {
        let mut filter = LineFilter::new().prefixes(prefixes.iter().copied());
        if let Some(exercise_id) = exercise_id {
            filter = filter.exercise(exercise_id);
        }
        Self::aggregate(lines, catalog, &filter)
    }
}

//! Property-based tests for the report aggregators.

use chrono::NaiveDate;
use compta_shared::types::{EntryLineId, ExerciseId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{BalanceAggregator, LedgerBuilder, ProgressiveBalanceAggregator, ResultClassifier};
use crate::ledger::{Account, AccountCatalog, AccountClass, EntryLine, LineFilter};

const ACCOUNTS: [&str; 7] = ["101300", "401000", "411000", "445710", "512000", "607000", "707000"];

fn exercise_ids() -> Vec<ExerciseId> {
    vec![
        ExerciseId::from_uuid(uuid::Uuid::nil()),
        ExerciseId::from_uuid(uuid::Uuid::from_u128(1)),
    ]
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

/// Chart with labels for some used accounts and one account never booked.
fn catalog() -> AccountCatalog {
    [
        Account::new("411000", "Clients"),
        Account::new("512000", "Banque"),
        Account::new("530000", "Caisse"),
        Account::new("707000", "Ventes de marchandises"),
    ]
    .into_iter()
    .collect()
}

prop_compose! {
    fn arb_line()(
        account in prop::sample::select(ACCOUNTS.to_vec()),
        month in 1u32..=12,
        day in 1u32..=28,
        cents in 1i64..10_000_000,
        is_debit in any::<bool>(),
        exercise_id in prop::sample::select(exercise_ids()),
    ) -> EntryLine {
        let amount = Decimal::new(cents, 2);
        EntryLine {
            id: EntryLineId::new(),
            exercise_id,
            date: date(month, day),
            journal_code: "OD".to_string(),
            piece_reference: format!("OD-{month:02}{day:02}"),
            account_number: account.to_string(),
            label: "Ecriture".to_string(),
            debit: if is_debit { amount } else { Decimal::ZERO },
            credit: if is_debit { Decimal::ZERO } else { amount },
        }
    }
}

prop_compose! {
    fn arb_filter()(
        exercise_id in prop::option::of(prop::sample::select(exercise_ids())),
        dates in prop::option::of((1u32..=12, 1u32..=28, 1u32..=12, 1u32..=28)),
        classes in prop::sample::subsequence(
            vec![
                AccountClass::Capital,
                AccountClass::ThirdParty,
                AccountClass::Financial,
                AccountClass::Expense,
                AccountClass::Revenue,
            ],
            0..=3,
        ),
        range in prop::option::of((
            prop::sample::select(ACCOUNTS.to_vec()),
            prop::sample::select(ACCOUNTS.to_vec()),
        )),
        prefixes in prop::sample::subsequence(vec!["4", "41", "5", "6", "70"], 0..=2),
        include in any::<bool>(),
    ) -> LineFilter {
        let mut filter = LineFilter::new()
            .classes(classes)
            .prefixes(prefixes)
            .include_zero_movement(include);
        if let Some(exercise_id) = exercise_id {
            filter = filter.exercise(exercise_id);
        }
        // Inverted ranges are kept: they match no line.
        if let Some((start_month, start_day, end_month, end_day)) = dates {
            filter = filter.between(date(start_month, start_day), date(end_month, end_day));
        }
        if let Some((from, to)) = range {
            filter = filter.range(from, to);
        }
        filter
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// An account is either debtor or creditor, never both.
    #[test]
    fn prop_balance_sides_are_exclusive(lines in prop::collection::vec(arb_line(), 0..50)) {
        let balance = BalanceAggregator::aggregate(&lines, &AccountCatalog::new(), &LineFilter::new());

        for line in &balance.lines {
            prop_assert!(line.debtor_balance.is_zero() || line.creditor_balance.is_zero());
            prop_assert!(line.debtor_balance >= Decimal::ZERO);
            prop_assert!(line.creditor_balance >= Decimal::ZERO);
            prop_assert_eq!(line.net_balance(), line.total_debit - line.total_credit);
        }
    }

    /// Totals match the sums of the matching lines, and the two sub-totals
    /// add up to the grand total.
    #[test]
    fn prop_balance_totals(
        lines in prop::collection::vec(arb_line(), 0..50),
        filter in arb_filter(),
    ) {
        let balance = BalanceAggregator::aggregate(&lines, &catalog(), &filter);

        let matching: Vec<&EntryLine> = lines.iter().filter(|line| filter.matches(line)).collect();
        let debit: Decimal = matching.iter().map(|line| line.debit).sum();
        let credit: Decimal = matching.iter().map(|line| line.credit).sum();
        prop_assert_eq!(balance.totals.total_debit, debit);
        prop_assert_eq!(balance.totals.total_credit, credit);
        prop_assert_eq!(
            balance.balance_sheet.total_debit + balance.income_statement.total_debit,
            debit
        );
        for line in &balance.lines {
            prop_assert!(filter.matches_account(&line.account_number));
        }
    }

    /// Aggregating twice gives the same report.
    #[test]
    fn prop_balance_is_idempotent(lines in prop::collection::vec(arb_line(), 0..50)) {
        let catalog = AccountCatalog::new();
        let first = BalanceAggregator::aggregate(&lines, &catalog, &LineFilter::new());
        let second = BalanceAggregator::aggregate(&lines, &catalog, &LineFilter::new());
        prop_assert_eq!(first, second);
    }

    /// Each ledger account ends on the net balance of its trial balance line.
    #[test]
    fn prop_ledger_agrees_with_balance(
        lines in prop::collection::vec(arb_line(), 0..50),
        filter in arb_filter(),
    ) {
        let catalog = catalog();
        let balance = BalanceAggregator::aggregate(&lines, &catalog, &filter);
        let ledger = LedgerBuilder::build(&lines, &catalog, &filter);

        let ledger_net: Decimal = ledger.accounts.iter().map(|account| account.final_balance).sum();
        let balance_net: Decimal = balance.lines.iter().map(super::TrialBalanceLine::net_balance).sum();
        prop_assert_eq!(ledger_net, balance_net);

        for account in &ledger.accounts {
            let line = balance.line(&account.account_number);
            prop_assert!(line.is_some());
            prop_assert_eq!(account.final_balance, line.map_or(Decimal::ZERO, super::TrialBalanceLine::net_balance));
        }
    }

    /// The last cumulative balance equals the trial balance net.
    #[test]
    fn prop_progressive_ends_on_balance(
        lines in prop::collection::vec(arb_line(), 1..50),
        filter in arb_filter(),
    ) {
        let catalog = catalog();
        let balance = BalanceAggregator::aggregate(&lines, &catalog, &filter);
        let progressive = ProgressiveBalanceAggregator::aggregate(&lines, &catalog, &[], &filter);

        prop_assert!(progressive.warnings.is_empty());
        for line in &progressive.lines {
            prop_assert_eq!(line.cumulative_balances.last().copied(), Some(line.final_balance));
            let net = balance
                .line(&line.account_number)
                .map_or(Decimal::ZERO, super::TrialBalanceLine::net_balance);
            prop_assert_eq!(line.final_balance, net);
        }
    }

    /// Profit is income credit minus income debit.
    #[test]
    fn prop_net_result(lines in prop::collection::vec(arb_line(), 0..50)) {
        let balance = BalanceAggregator::aggregate(&lines, &AccountCatalog::new(), &LineFilter::new());
        let classified = ResultClassifier::classify(&balance);

        let income: Decimal = lines
            .iter()
            .filter(|line| line.account_number.starts_with('6') || line.account_number.starts_with('7'))
            .map(|line| line.credit - line.debit)
            .sum();
        prop_assert_eq!(classified.net_result, income);
    }
}

//! Month-by-month cumulative balance.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::types::{ProgressiveBalance, ProgressiveBalanceLine};
use crate::fiscal::{DateRange, Exercise, monthly_periods, period_index};
use crate::ledger::{AccountCatalog, DataIntegrityWarning, EntryLine, LineFilter};

/// Builds progressive (cumulative monthly) balances.
pub struct ProgressiveBalanceAggregator;

impl ProgressiveBalanceAggregator {
    /// Reporting span for `filter`: its date range, else the span of its
    /// exercise, else the dates of the matching lines.
    #[must_use]
    pub fn span(lines: &[EntryLine], exercises: &[Exercise], filter: &LineFilter) -> Option<DateRange> {
        if let Some(range) = filter.date_range {
            return Some(range);
        }

        let exercise_span = filter.exercise_id.and_then(|id| {
            exercises
                .iter()
                .find(|exercise| exercise.id == id)
                .map(Exercise::span)
        });

        exercise_span.or_else(|| {
            DateRange::covering(
                lines
                    .iter()
                    .filter(|line| filter.matches(line))
                    .map(|line| line.date),
            )
        })
    }

    /// Computes the cumulative balance of every account at the end of each
    /// month of the reporting span.
    ///
    /// Lines dated outside the span are left out and reported as warnings.
    #[must_use]
    pub fn aggregate(
        lines: &[EntryLine],
        catalog: &AccountCatalog,
        exercises: &[Exercise],
        filter: &LineFilter,
    ) -> ProgressiveBalance {
        let periods = Self::span(lines, exercises, filter)
            .map(monthly_periods)
            .unwrap_or_default();
        let mut warnings = Vec::new();

        if periods.is_empty() {
            return ProgressiveBalance {
                periods,
                lines: Vec::new(),
                period_totals: Vec::new(),
                final_total: Decimal::ZERO,
                warnings,
            };
        }

        let width = periods.len();
        let mut deltas: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
        if filter.include_zero_movement_accounts {
            for account in catalog
                .iter()
                .filter(|account| filter.matches_account(&account.number))
            {
                deltas
                    .entry(account.number.as_str())
                    .or_insert_with(|| vec![Decimal::ZERO; width]);
            }
        }

        for line in lines.iter().filter(|line| filter.matches(line)) {
            let Some(index) = period_index(&periods, line.date) else {
                let (span_start, span_end) = match (periods.first(), periods.last()) {
                    (Some(first), Some(last)) => (first.start, last.end),
                    _ => (line.date, line.date),
                };
                warn!(
                    account = %line.account_number,
                    date = %line.date,
                    "Movement outside reporting span"
                );
                warnings.push(DataIntegrityWarning::MovementOutsideSpan {
                    line_id: line.id,
                    account_number: line.account_number.clone(),
                    date: line.date,
                    span_start,
                    span_end,
                });
                continue;
            };

            let buckets = deltas
                .entry(line.account_number.as_str())
                .or_insert_with(|| vec![Decimal::ZERO; width]);
            buckets[index] = buckets[index].saturating_add(line.movement());
        }

        let balance_lines: Vec<ProgressiveBalanceLine> = deltas
            .into_iter()
            .map(|(number, buckets)| {
                let cumulative_balances: Vec<Decimal> = buckets
                    .into_iter()
                    .scan(Decimal::ZERO, |running, delta| {
                        *running = running.saturating_add(delta);
                        Some(*running)
                    })
                    .collect();
                let final_balance = cumulative_balances.last().copied().unwrap_or_default();

                ProgressiveBalanceLine {
                    account_number: number.to_string(),
                    label: catalog.label_for(number).to_string(),
                    cumulative_balances,
                    final_balance,
                }
            })
            .filter(|line| filter.include_zero_movement_accounts || !line.final_balance.is_zero())
            .collect();

        let mut period_totals = vec![Decimal::ZERO; width];
        for line in &balance_lines {
            for (total, balance) in period_totals.iter_mut().zip(&line.cumulative_balances) {
                *total = total.saturating_add(*balance);
            }
        }
        let final_total = balance_lines
            .iter()
            .map(|line| line.final_balance)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        debug!(
            periods = width,
            accounts = balance_lines.len(),
            warnings = warnings.len(),
            "Progressive balance computed"
        );

        ProgressiveBalance {
            periods,
            lines: balance_lines,
            period_totals,
            final_total,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Account;
    use chrono::NaiveDate;
    use compta_shared::types::{EntrepriseId, EntryLineId, ExerciseId};
    use rust_decimal_macros::dec;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn line(exercise_id: ExerciseId, date: NaiveDate, account: &str, movement: Decimal) -> EntryLine {
        EntryLine {
            id: EntryLineId::new(),
            exercise_id,
            date,
            journal_code: "BQ".to_string(),
            piece_reference: format!("P-{date}"),
            account_number: account.to_string(),
            label: String::new(),
            debit: movement.max(Decimal::ZERO),
            credit: (-movement).max(Decimal::ZERO),
        }
    }

    fn bank_movements(exercise: ExerciseId) -> Vec<EntryLine> {
        vec![
            line(exercise, date(1, 10), "512000", dec!(100)),
            line(exercise, date(1, 10), "706000", dec!(-100)),
            line(exercise, date(2, 5), "512000", dec!(-30)),
            line(exercise, date(2, 5), "606000", dec!(30)),
        ]
    }

    #[test]
    fn test_bank_carry_forward() {
        let exercise = ExerciseId::new();
        let filter = LineFilter::new().between(date(1, 1), date(3, 31));
        let result = ProgressiveBalanceAggregator::aggregate(
            &bank_movements(exercise),
            &AccountCatalog::new(),
            &[],
            &filter,
        );

        assert_eq!(result.periods.len(), 3);
        let bank = result.line("512000").unwrap();
        assert_eq!(bank.cumulative_balances, vec![dec!(100), dec!(70), dec!(70)]);
        assert_eq!(bank.final_balance, dec!(70));
        assert_eq!(result.period_totals, vec![Decimal::ZERO; 3]);
        assert_eq!(result.final_total, Decimal::ZERO);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_span_from_exercise_flags_outside_lines() {
        let exercise = Exercise {
            id: ExerciseId::new(),
            entreprise_id: EntrepriseId::new(),
            start_date: date(1, 1),
            end_date: date(6, 30),
            closed: false,
        };
        let mut lines = bank_movements(exercise.id);
        lines.push(line(exercise.id, date(7, 2), "512000", dec!(5)));

        let result = ProgressiveBalanceAggregator::aggregate(
            &lines,
            &AccountCatalog::new(),
            std::slice::from_ref(&exercise),
            &LineFilter::new().exercise(exercise.id),
        );

        assert_eq!(result.periods.len(), 6);
        assert_eq!(result.line("512000").unwrap().final_balance, dec!(70));
        assert!(matches!(
            result.warnings.as_slice(),
            [DataIntegrityWarning::MovementOutsideSpan { span_end, .. }] if *span_end == date(6, 30)
        ));
    }

    #[test]
    fn test_span_from_line_dates() {
        let result = ProgressiveBalanceAggregator::aggregate(
            &bank_movements(ExerciseId::new()),
            &AccountCatalog::new(),
            &[],
            &LineFilter::new(),
        );
        assert_eq!(result.periods.len(), 2);
        assert_eq!(result.periods[0].start, date(1, 10));
        assert_eq!(result.periods[1].end, date(2, 5));
    }

    #[test]
    fn test_no_lines_no_span() {
        let result = ProgressiveBalanceAggregator::aggregate(
            &[],
            &AccountCatalog::new(),
            &[],
            &LineFilter::new(),
        );
        assert!(result.periods.is_empty());
        assert!(result.lines.is_empty());
    }

    #[test]
    fn test_zero_accounts_shown_with_flag() {
        let catalog: AccountCatalog = [Account::new("530000", "Caisse")].into_iter().collect();
        let filter = LineFilter::new().between(date(1, 1), date(2, 29));

        let hidden = ProgressiveBalanceAggregator::aggregate(
            &bank_movements(ExerciseId::new()),
            &catalog,
            &[],
            &filter,
        );
        assert!(hidden.line("530000").is_none());

        let shown = ProgressiveBalanceAggregator::aggregate(
            &bank_movements(ExerciseId::new()),
            &catalog,
            &[],
            &filter.include_zero_movement(true),
        );
        let cash = shown.line("530000").unwrap();
        assert_eq!(cash.cumulative_balances, vec![Decimal::ZERO, Decimal::ZERO]);
        assert_eq!(cash.label, "Caisse");
    }

    #[test]
    fn test_account_back_to_zero_is_dropped() {
        let exercise = ExerciseId::new();
        let lines = vec![
            line(exercise, date(1, 3), "411000", dec!(50)),
            line(exercise, date(2, 3), "411000", dec!(-50)),
        ];
        let result = ProgressiveBalanceAggregator::aggregate(
            &lines,
            &AccountCatalog::new(),
            &[],
            &LineFilter::new(),
        );
        assert!(result.lines.is_empty());
        assert_eq!(result.periods.len(), 2);
    }
}

//! Voucher grouping and balance checks.
//!
//! A voucher is the set of lines sharing journal code, piece reference and
//! date. Monthly bank statements are the exception: one reference covers a
//! whole month of dates, so the date is left out of their key.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use super::types::EntryLine;
use super::warning::DataIntegrityWarning;

/// Debit/credit gap tolerated on a voucher (one cent).
pub const DEFAULT_VOUCHER_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const MONTHLY_STATEMENT_PREFIXES: [&str; 2] = ["relevé", "banque"];

/// Returns true for piece references of monthly bank statements
/// (case-insensitive prefix `Relevé` or `banque`).
#[must_use]
pub fn is_monthly_statement_reference(reference: &str) -> bool {
    let lowered = reference.trim_start().to_lowercase();
    MONTHLY_STATEMENT_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Grouping key of a voucher.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VoucherKey {
    /// Journal code.
    pub journal_code: String,
    /// Piece reference.
    pub piece_reference: String,
    /// Date, absent for monthly statements.
    pub date: Option<NaiveDate>,
}

impl VoucherKey {
    /// Key of the voucher booked in `journal_code` under `piece_reference`
    /// on `date`. The date is dropped for monthly statements.
    #[must_use]
    pub fn new(journal_code: &str, piece_reference: &str, date: NaiveDate) -> Self {
        let date = (!is_monthly_statement_reference(piece_reference)).then_some(date);
        Self {
            journal_code: journal_code.to_string(),
            piece_reference: piece_reference.to_string(),
            date,
        }
    }

    /// Computes the voucher key of a line.
    #[must_use]
    pub fn of(line: &EntryLine) -> Self {
        Self::new(&line.journal_code, &line.piece_reference, line.date)
    }

    /// Returns true if `line` belongs to this voucher.
    #[must_use]
    pub fn contains(&self, line: &EntryLine) -> bool {
        line.journal_code == self.journal_code
            && line.piece_reference == self.piece_reference
            && self.date.is_none_or(|date| line.date == date)
    }
}

/// Reports every voucher whose debits and credits differ by more than `tolerance`.
///
/// Warnings come out in voucher-key order.
pub fn check_vouchers<'a>(
    lines: impl IntoIterator<Item = &'a EntryLine>,
    tolerance: Decimal,
) -> Vec<DataIntegrityWarning> {
    let mut totals: BTreeMap<VoucherKey, (Decimal, Decimal)> = BTreeMap::new();
    for line in lines {
        let entry = totals.entry(VoucherKey::of(line)).or_default();
        entry.0 = entry.0.saturating_add(line.debit);
        entry.1 = entry.1.saturating_add(line.credit);
    }

    totals
        .into_iter()
        .filter(|(_, (debit, credit))| debit.saturating_sub(*credit).abs() > tolerance)
        .map(|(key, (debit, credit))| {
            warn!(
                journal = %key.journal_code,
                piece = %key.piece_reference,
                %debit,
                %credit,
                "Unbalanced voucher"
            );
            DataIntegrityWarning::UnbalancedVoucher {
                journal_code: key.journal_code,
                piece_reference: key.piece_reference,
                date: key.date,
                debit,
                credit,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compta_shared::types::{EntryLineId, ExerciseId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn line(piece: &str, day: u32, debit: Decimal, credit: Decimal) -> EntryLine {
        EntryLine {
            id: EntryLineId::new(),
            exercise_id: ExerciseId::from_uuid(uuid::Uuid::nil()),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            journal_code: "BQ".to_string(),
            piece_reference: piece.to_string(),
            account_number: "512000".to_string(),
            label: String::new(),
            debit,
            credit,
        }
    }

    #[rstest]
    #[case("Relevé 01/2024", true)]
    #[case("RELEVÉ janvier", true)]
    #[case("relevé", true)]
    #[case("Banque Populaire 01", true)]
    #[case("  banque", true)]
    #[case("F-001", false)]
    #[case("Mon relevé", false)]
    #[case("", false)]
    fn test_is_monthly_statement_reference(#[case] reference: &str, #[case] expected: bool) {
        assert_eq!(is_monthly_statement_reference(reference), expected);
    }

    #[test]
    fn test_default_tolerance_is_one_cent() {
        assert_eq!(DEFAULT_VOUCHER_TOLERANCE, dec!(0.01));
    }

    #[test]
    fn test_statement_voucher_ignores_date() {
        let a = line("Relevé 01/2024", 3, dec!(10), Decimal::ZERO);
        let b = line("Relevé 01/2024", 17, Decimal::ZERO, dec!(10));
        assert_eq!(VoucherKey::of(&a), VoucherKey::of(&b));
        assert!(VoucherKey::of(&a).contains(&b));
        assert!(check_vouchers([&a, &b], DEFAULT_VOUCHER_TOLERANCE).is_empty());
    }

    #[test]
    fn test_regular_voucher_includes_date() {
        let a = line("F-001", 3, dec!(10), Decimal::ZERO);
        let b = line("F-001", 4, Decimal::ZERO, dec!(10));
        assert!(!VoucherKey::of(&a).contains(&b));

        let warnings = check_vouchers([&a, &b], DEFAULT_VOUCHER_TOLERANCE);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_huge_voucher_totals_do_not_overflow() {
        let a = line("F-004", 3, Decimal::MAX, Decimal::ZERO);
        let b = line("F-004", 3, Decimal::MAX, Decimal::ZERO);
        let warnings = check_vouchers([&a, &b], DEFAULT_VOUCHER_TOLERANCE);

        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            DataIntegrityWarning::UnbalancedVoucher { debit, .. } if *debit == Decimal::MAX
        ));
    }

    #[test]
    fn test_tolerance_is_respected() {
        let a = line("F-002", 3, dec!(10.00), Decimal::ZERO);
        let b = line("F-002", 3, Decimal::ZERO, dec!(9.99));
        assert!(check_vouchers([&a, &b], DEFAULT_VOUCHER_TOLERANCE).is_empty());

        let c = line("F-003", 3, dec!(10.00), Decimal::ZERO);
        let d = line("F-003", 3, Decimal::ZERO, dec!(9.98));
        let warnings = check_vouchers([&c, &d], DEFAULT_VOUCHER_TOLERANCE);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            DataIntegrityWarning::UnbalancedVoucher { debit, credit, .. }
                if *debit == dec!(10.00) && *credit == dec!(9.98)
        ));
    }
}

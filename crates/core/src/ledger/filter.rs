//! Line selection shared by every report.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use compta_shared::types::ExerciseId;
use serde::{Deserialize, Serialize};

use super::types::{AccountClass, EntryLine};
use crate::fiscal::DateRange;

/// Inclusive, lexicographic account-number range.
///
/// A number that starts with the upper bound is inside the range, so
/// `401`..`409` covers `409100`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountRange {
    /// Lower bound.
    pub from: String,
    /// Upper bound.
    pub to: String,
}

impl AccountRange {
    /// Creates a new range.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns true if the account number is inside the range.
    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        number >= self.from.as_str() && (number <= self.to.as_str() || number.starts_with(&self.to))
    }
}

/// Filter applied to entry lines and catalog accounts before aggregation.
///
/// Empty class and prefix sets match every account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineFilter {
    /// Only lines of this exercise.
    pub exercise_id: Option<ExerciseId>,
    /// Only lines dated inside this range.
    pub date_range: Option<DateRange>,
    /// Only accounts of these classes.
    pub account_classes: BTreeSet<AccountClass>,
    /// Only accounts inside this range.
    pub account_range: Option<AccountRange>,
    /// Only accounts starting with one of these prefixes.
    pub account_prefixes: Vec<String>,
    /// Keep catalog accounts that have no movement.
    pub include_zero_movement_accounts: bool,
}

impl LineFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one exercise.
    #[must_use]
    pub const fn exercise(mut self, exercise_id: ExerciseId) -> Self {
        self.exercise_id = Some(exercise_id);
        self
    }

    /// Restricts to an inclusive date range.
    #[must_use]
    pub const fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    /// Restricts to the given account classes.
    #[must_use]
    pub fn classes(mut self, classes: impl IntoIterator<Item = AccountClass>) -> Self {
        self.account_classes.extend(classes);
        self
    }

    /// Restricts to an account-number range.
    #[must_use]
    pub fn range(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.account_range = Some(AccountRange::new(from, to));
        self
    }

    /// Restricts to accounts starting with one of the prefixes.
    #[must_use]
    pub fn prefixes<S: Into<String>>(mut self, prefixes: impl IntoIterator<Item = S>) -> Self {
        self.account_prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Sets whether catalog accounts without movement are reported.
    #[must_use]
    pub const fn include_zero_movement(mut self, include: bool) -> Self {
        self.include_zero_movement_accounts = include;
        self
    }

    /// Exercise and date-range part of the filter.
    #[must_use]
    pub fn matches_period(&self, line: &EntryLine) -> bool {
        self.exercise_id.is_none_or(|id| line.exercise_id == id)
            && self.date_range.is_none_or(|range| range.contains(line.date))
    }

    /// Class, range and prefix part of the filter.
    #[must_use]
    pub fn matches_account(&self, number: &str) -> bool {
        let class_ok = self.account_classes.is_empty()
            || self
                .account_classes
                .contains(&AccountClass::from_account_number(number));
        let range_ok = self
            .account_range
            .as_ref()
            .is_none_or(|range| range.contains(number));
        let prefix_ok = self.account_prefixes.is_empty()
            || self
                .account_prefixes
                .iter()
                .any(|prefix| number.starts_with(prefix.as_str()));

        class_ok && range_ok && prefix_ok
    }

    /// Full filter.
    #[must_use]
    pub fn matches(&self, line: &EntryLine) -> bool {
        self.matches_period(line) && self.matches_account(&line.account_number)
    }
}

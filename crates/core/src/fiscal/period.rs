//! Exercises, date ranges and monthly periods.

use chrono::{Datelike, Months, NaiveDate};
use compta_shared::types::{EntrepriseId, ExerciseId};
use serde::{Deserialize, Serialize};

const FRENCH_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];

/// Accounting exercise (fiscal year) of a company.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier.
    pub id: ExerciseId,
    /// Company the exercise belongs to.
    pub entreprise_id: EntrepriseId,
    /// First day of the exercise.
    pub start_date: NaiveDate,
    /// Last day of the exercise (inclusive).
    pub end_date: NaiveDate,
    /// Whether the exercise has been closed.
    pub closed: bool,
}

impl Exercise {
    /// Returns true if the given date falls within this exercise.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the exercise span as a date range.
    #[must_use]
    pub const fn span(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

/// Inclusive date range. A range whose start is after its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true if the date is inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if no date can be inside the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Smallest range covering every date, or `None` when there are none.
    pub fn covering(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().fold(None, |range, date| {
            Some(match range {
                None => Self::new(date, date),
                Some(Self { start, end }) => Self::new(start.min(date), end.max(date)),
            })
        })
    }
}

/// One calendar month of a reporting span, clipped to the span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// First day of the period (the span start for the first period).
    pub start: NaiveDate,
    /// Last day of the period (the span end for the last period).
    pub end: NaiveDate,
}

impl MonthPeriod {
    /// Short French label, e.g. `"janv. 2024"`.
    #[must_use]
    pub fn label(&self) -> String {
        let name = usize::try_from(self.month.saturating_sub(1))
            .ok()
            .and_then(|index| FRENCH_MONTHS.get(index))
            .copied()
            .unwrap_or("?");
        format!("{name} {}", self.year)
    }

    /// Returns true if the date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Builds the ordered monthly periods covering `span`.
///
/// An empty span yields no period.
#[must_use]
pub fn monthly_periods(span: DateRange) -> Vec<MonthPeriod> {
    let mut periods = Vec::new();
    if span.is_empty() {
        return periods;
    }

    let mut month_start = span.start.with_day(1).unwrap_or(span.start);
    while month_start <= span.end {
        let next_month = month_start.checked_add_months(Months::new(1));
        let month_end = next_month
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);

        periods.push(MonthPeriod {
            year: month_start.year(),
            month: month_start.month(),
            start: month_start.max(span.start),
            end: month_end.min(span.end),
        });

        match next_month {
            Some(next) => month_start = next,
            None => break,
        }
    }

    periods
}

/// Index of the period containing `date`, for periods built by [`monthly_periods`].
#[must_use]
pub fn period_index(periods: &[MonthPeriod], date: NaiveDate) -> Option<usize> {
    let first = periods.first()?;
    let last = periods.last()?;
    if date < first.start || date > last.end {
        return None;
    }

    let offset = (date.year() - first.year) * 12 + date.month0().cast_signed() - first.month.cast_signed() + 1;
    usize::try_from(offset).ok().filter(|index| *index < periods.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_year_has_twelve_periods() {
        let periods = monthly_periods(DateRange::new(date(2024, 1, 1), date(2024, 12, 31)));
        assert_eq!(periods.len(), 12);
        assert_eq!(periods[1].start, date(2024, 2, 1));
        assert_eq!(periods[1].end, date(2024, 2, 29));
        assert_eq!(periods[11].label(), "déc. 2024");
    }

    #[test]
    fn test_periods_are_clipped_to_span() {
        let periods = monthly_periods(DateRange::new(date(2023, 7, 15), date(2024, 6, 10)));
        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0].start, date(2023, 7, 15));
        assert_eq!(periods[0].end, date(2023, 7, 31));
        assert_eq!(periods[11].start, date(2024, 6, 1));
        assert_eq!(periods[11].end, date(2024, 6, 10));
        assert_eq!(periods[0].label(), "juil. 2023");
    }

    #[test]
    fn test_empty_span_has_no_period() {
        assert!(monthly_periods(DateRange::new(date(2024, 3, 1), date(2024, 2, 1))).is_empty());
    }

    #[rstest]
    #[case(date(2023, 7, 15), Some(0))]
    #[case(date(2023, 12, 31), Some(5))]
    #[case(date(2024, 1, 1), Some(6))]
    #[case(date(2024, 6, 10), Some(11))]
    #[case(date(2024, 6, 11), None)]
    #[case(date(2023, 7, 14), None)]
    fn test_period_index(#[case] day: NaiveDate, #[case] expected: Option<usize>) {
        let periods = monthly_periods(DateRange::new(date(2023, 7, 15), date(2024, 6, 10)));
        assert_eq!(period_index(&periods, day), expected);
        if let Some(index) = expected {
            assert!(periods[index].contains_date(day));
        }
    }

    #[test]
    fn test_covering_range() {
        let range = DateRange::covering([date(2024, 3, 5), date(2024, 1, 9), date(2024, 2, 1)]);
        assert_eq!(range, Some(DateRange::new(date(2024, 1, 9), date(2024, 3, 5))));
        assert_eq!(DateRange::covering(Vec::new()), None);
    }

    #[test]
    fn test_exercise_contains_date() {
        let exercise = Exercise {
            id: ExerciseId::new(),
            entreprise_id: EntrepriseId::new(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            closed: false,
        };
        assert!(exercise.contains_date(date(2024, 6, 30)));
        assert!(!exercise.contains_date(date(2025, 1, 1)));
        assert!(exercise.span().contains(date(2024, 1, 1)));
    }
}

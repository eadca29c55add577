use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use semestra_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AcademicYearLabel;

/// Unique identifier for a term record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermId(Uuid);

impl TermId {
    /// Creates a new random term identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a term identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TermId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TermId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A bounded sub-period of an academic year used for grading and reporting.
///
/// Terms belong to exactly one `(institution, academic year)` pair and are
/// listed in ascending start-date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    term_id: TermId,
    year: AcademicYearLabel,
    name: NonEmptyString,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Term {
    /// Creates a validated term.
    pub fn new(
        term_id: TermId,
        year: AcademicYearLabel,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Self> {
        if start_date > end_date {
            return Err(AppError::Validation(format!(
                "term start date {start_date} is after end date {end_date}"
            )));
        }

        Ok(Self {
            term_id,
            year,
            name: NonEmptyString::new(name)?,
            start_date,
            end_date,
        })
    }

    /// Returns the term identifier.
    #[must_use]
    pub fn term_id(&self) -> TermId {
        self.term_id
    }

    /// Returns the owning academic year label.
    #[must_use]
    pub fn year(&self) -> &AcademicYearLabel {
        &self.year
    }

    /// Returns the term display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the first day of the term.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of the term.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns whether the given date falls inside the term, bounds included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::AcademicYearLabel;

    use super::{Term, TermId};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| unreachable!())
    }

    fn year_label() -> AcademicYearLabel {
        AcademicYearLabel::parse("2024-2025").unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn rejects_inverted_date_range() {
        let term = Term::new(
            TermId::new(),
            year_label(),
            "First Term",
            date(2024, 5, 1),
            date(2024, 1, 31),
        );
        assert!(term.is_err());
    }

    #[test]
    fn contains_is_inclusive_on_both_bounds() {
        let term = Term::new(
            TermId::new(),
            year_label(),
            "First Term",
            date(2024, 1, 1),
            date(2024, 4, 30),
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(term.contains(date(2024, 1, 1)));
        assert!(term.contains(date(2024, 4, 30)));
        assert!(term.contains(date(2024, 3, 15)));
        assert!(!term.contains(date(2024, 5, 1)));
        assert!(!term.contains(date(2023, 12, 31)));
    }

    #[test]
    fn single_day_term_is_valid() {
        let term = Term::new(
            TermId::new(),
            year_label(),
            "Exam Day",
            date(2024, 6, 1),
            date(2024, 6, 1),
        );
        assert!(term.is_ok());
    }
}

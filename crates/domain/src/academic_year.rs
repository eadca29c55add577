use std::fmt::{Display, Formatter};

use semestra_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Validated academic year label of the canonical form `YYYY-YYYY`.
///
/// The two years must be consecutive, e.g. `2024-2025`. Labels sort
/// chronologically through their string ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AcademicYearLabel(String);

impl AcademicYearLabel {
    /// Parses and validates an academic year label.
    pub fn parse(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        let Some((start, end)) = trimmed.split_once('-') else {
            return Err(AppError::Validation(format!(
                "academic year label '{trimmed}' must match the YYYY-YYYY pattern"
            )));
        };

        let start_year = parse_year(start, trimmed)?;
        let end_year = parse_year(end, trimmed)?;

        if end_year != start_year + 1 {
            return Err(AppError::Validation(format!(
                "academic year label '{trimmed}' must span two consecutive years"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the first calendar year covered by the label.
    #[must_use]
    pub fn start_year(&self) -> i32 {
        // Validated at construction; a malformed label cannot exist here.
        self.0
            .split_once('-')
            .and_then(|(start, _)| start.parse().ok())
            .unwrap_or_default()
    }

    /// Returns the underlying label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for AcademicYearLabel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<AcademicYearLabel> for String {
    fn from(value: AcademicYearLabel) -> Self {
        value.0
    }
}

fn parse_year(part: &str, label: &str) -> AppResult<i32> {
    if part.len() != 4 || !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AppError::Validation(format!(
            "academic year label '{label}' must match the YYYY-YYYY pattern"
        )));
    }

    part.parse::<i32>().map_err(|error| {
        AppError::Validation(format!("academic year label '{label}' is not numeric: {error}"))
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::AcademicYearLabel;

    #[test]
    fn accepts_consecutive_years() {
        let label = AcademicYearLabel::parse("2024-2025").unwrap_or_else(|_| unreachable!());
        assert_eq!(label.as_str(), "2024-2025");
        assert_eq!(label.start_year(), 2024);
    }

    #[test]
    fn rejects_non_consecutive_years() {
        assert!(AcademicYearLabel::parse("2024-2026").is_err());
        assert!(AcademicYearLabel::parse("2025-2024").is_err());
        assert!(AcademicYearLabel::parse("2024-2024").is_err());
    }

    #[test]
    fn rejects_malformed_patterns() {
        for candidate in ["", "2024", "2024/2025", "24-25", "2024-202", "abcd-efgh"] {
            assert!(
                AcademicYearLabel::parse(candidate).is_err(),
                "expected '{candidate}' to be rejected"
            );
        }
    }

    #[test]
    fn labels_sort_chronologically() {
        let earlier = AcademicYearLabel::parse("2023-2024").unwrap_or_else(|_| unreachable!());
        let later = AcademicYearLabel::parse("2024-2025").unwrap_or_else(|_| unreachable!());
        assert!(earlier < later);
    }

    proptest! {
        #[test]
        fn accepts_every_consecutive_pair(start in 1000i32..9998) {
            let candidate = format!("{start}-{}", start + 1);
            let label = AcademicYearLabel::parse(candidate.as_str());
            prop_assert!(label.is_ok());
        }

        #[test]
        fn rejects_every_non_consecutive_pair(start in 1000i32..9998, offset in 2i32..50) {
            let candidate = format!("{start}-{}", start + offset);
            prop_assert!(AcademicYearLabel::parse(candidate).is_err());
        }
    }
}

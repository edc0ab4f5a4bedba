use std::{fmt::Display, str::FromStr, sync::Arc};

use chrono::NaiveDate;

use crate::error::ActivityError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks that `s` looks like `YYYY-MM-DD`. Only the shape is checked, `2024-13-99` is accepted.
pub fn is_valid_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// The standard way of converting a date to a string in daily-activity.
pub fn date_to_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A date string that passed [is_valid_date]. Providers receive this instead of a raw string so
/// nothing reaches a backend without being checked first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityDate(Arc<str>);

impl ActivityDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Following calendar day. Fails for strings that have the right shape but don't name a
    /// real day.
    pub fn next_day(&self) -> Result<ActivityDate, ActivityError> {
        NaiveDate::parse_from_str(&self.0, DATE_FORMAT)
            .ok()
            .and_then(|date| date.succ_opt())
            .map(ActivityDate::from)
            .ok_or_else(|| ActivityError::Validation {
                context: "date".into(),
                message: format!("{} is not a calendar day", self.0),
            })
    }
}

impl FromStr for ActivityDate {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_date(s) {
            Ok(ActivityDate(s.into()))
        } else {
            Err(ActivityError::InvalidDate(s.into()))
        }
    }
}

impl From<NaiveDate> for ActivityDate {
    fn from(value: NaiveDate) -> Self {
        ActivityDate(date_to_string(value).into())
    }
}

impl Display for ActivityDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{is_valid_date, ActivityDate};
    use crate::error::ActivityError;

    #[test]
    fn accepts_date_shaped_strings() {
        for s in ["2025-06-01", "1999-12-31", "0000-00-00", "2024-13-99"] {
            assert!(is_valid_date(s), "{s} should be valid");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for s in [
            "",
            "2024-1-01",
            "20240101",
            "2024-01-1",
            "2024/01/01",
            "2024-01-01 ",
            " 2024-01-01",
            "2024-01-011",
            "abcd-ef-gh",
            "２０２４-01-01",
        ] {
            assert!(!is_valid_date(s), "{s:?} should be invalid");
        }
    }

    #[test]
    fn parse_reports_offending_input() {
        let err = "2024-1-01".parse::<ActivityDate>().unwrap_err();
        assert!(matches!(err, ActivityError::InvalidDate(ref s) if s == "2024-1-01"));
        assert_eq!(
            err.to_string(),
            "Invalid date format \"2024-1-01\". Use YYYY-MM-DD"
        );
    }

    #[test]
    fn next_day_crosses_month_and_year() {
        let date: ActivityDate = "2024-02-29".parse().unwrap();
        assert_eq!(date.next_day().unwrap().as_str(), "2024-03-01");

        let date: ActivityDate = "2024-12-31".parse().unwrap();
        assert_eq!(date.next_day().unwrap().as_str(), "2025-01-01");
    }

    #[test]
    fn next_day_rejects_impossible_dates() {
        let date: ActivityDate = "2024-13-99".parse().unwrap();
        assert!(matches!(
            date.next_day(),
            Err(ActivityError::Validation { .. })
        ));
    }

    #[test]
    fn from_naive_date_is_zero_padded() {
        let date = ActivityDate::from(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(date.to_string(), "2025-06-01");
    }
}

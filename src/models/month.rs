//! Calendar month buckets.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// A calendar month in the `YYYY-MM` form used for bucketing and scoping.
///
/// Ordering is chronological, which coincides with lexicographic ordering
/// of the string form. Serialization uses the string form, so a month
/// embeds into JSON exactly as the UI and the persisted slot spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    /// Calendar year.
    year: i32,
    /// Calendar month, `1..=12`.
    month: u32,
}

impl Month {
    /// Creates a month from its components.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidMonth`] if `month` is outside
    /// `1..=12`.
    #[inline]
    pub fn new(year: i32, month: u32) -> Result<Self, TrackerError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(TrackerError::InvalidMonth(format!("{year:04}-{month:02}")))
        }
    }

    /// Returns the month bucket a timestamp falls into.
    #[inline]
    #[must_use]
    pub fn of(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the current calendar month.
    #[inline]
    #[must_use]
    pub fn current() -> Self {
        Self::of(&Utc::now())
    }

    /// Returns `true` if the timestamp falls inside this month.
    #[inline]
    #[must_use]
    pub fn contains(self, date: &DateTime<Utc>) -> bool {
        Self::of(date) == self
    }

    /// The calendar year.
    #[inline]
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The calendar month, `1..=12`.
    #[inline]
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The month immediately before this one.
    #[inline]
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month immediately after this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl core::fmt::Display for Month {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl core::str::FromStr for Month {
    type Err = TrackerError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_month(s).ok_or_else(|| TrackerError::InvalidMonth(s.to_owned()))
    }
}

/// Parses the fixed-width `YYYY-MM` form.
fn parse_month(s: &str) -> Option<Month> {
    let (year_part, month_part) = s.split_once('-')?;
    if year_part.len() != 4 || month_part.len() != 2 {
        return None;
    }
    let year = year_part.parse::<i32>().ok()?;
    let month = month_part.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some(Month { year, month })
}

impl TryFrom<String> for Month {
    type Error = TrackerError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    #[inline]
    fn from(value: Month) -> Self {
        value.to_string()
    }
}

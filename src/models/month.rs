//! Budgeting month key
//!
//! A budgeting period is one calendar month, identified by its canonical
//! text form `"<year>-<zero-based-month>"` (so `2024-0` is January 2024).
//! Keys order by their numeric parts; adjacent-key arithmetic is calendar
//! arithmetic, never string manipulation.

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month used as a budgeting period
///
/// Field order gives the derived `Ord` chronological meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    /// Zero-based month index (0 = January)
    month0: u32,
}

impl MonthKey {
    /// Create a month key from a year and a zero-based month index
    ///
    /// `month0` values above 11 wrap into later years so callers doing
    /// arithmetic on raw indices stay on the calendar.
    pub fn new(year: i32, month0: u32) -> Self {
        Self {
            year: year + (month0 / 12) as i32,
            month0: month0 % 12,
        }
    }

    /// The month key containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// The current calendar month
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index (0 = January)
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// The previous calendar month
    pub fn prev(&self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 - 1,
            }
        }
    }

    /// The next calendar month
    pub fn next(&self) -> Self {
        if self.month0 == 11 {
            Self {
                year: self.year + 1,
                month0: 0,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 + 1,
            }
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // month0 is clamped to 0..=11 by every constructor
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or_default()
    }

    /// Check whether a date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// Parse a canonical `"<year>-<zero-based-month>"` key
    pub fn parse(s: &str) -> Result<Self, MonthKeyParseError> {
        let (year, month) = s
            .trim()
            .rsplit_once('-')
            .ok_or_else(|| MonthKeyParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| MonthKeyParseError::InvalidFormat(s.to_string()))?;
        let month0: u32 = month
            .parse()
            .map_err(|_| MonthKeyParseError::InvalidFormat(s.to_string()))?;
        if month0 > 11 {
            return Err(MonthKeyParseError::InvalidMonth(month0));
        }
        Ok(Self { year, month0 })
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month0)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Month keys are JSON object keys in the persisted budgeted map, so they
// serialize as their canonical strings rather than as structs.
impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = MonthKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a month key like \"2024-0\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MonthKey, E> {
                MonthKey::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthKeyParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthKeyParseError::InvalidFormat(s) => write!(f, "Invalid month key: {}", s),
            MonthKeyParseError::InvalidMonth(m) => write!(f, "Invalid month index: {}", m),
        }
    }
}

impl std::error::Error for MonthKeyParseError {}

//! Calendar utilities for fitness-continuity.
//!
//! Dates travel as `DD/MM/YYYY` text and reporting months as `MM/YYYY`
//! text. Internally both are structured: [`chrono::NaiveDate`] and
//! [`CalendarMonth`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FitnessError, Result};

/// External date format (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// ISO date format, accepted on input only.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `DD/MM/YYYY` (or ISO `YYYY-MM-DD`) date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, ISO_DATE_FORMAT))
        .map_err(|_| FitnessError::InvalidDate(s.to_string()))
}

/// Render a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Calendar month
// ---------------------------------------------------------------------------

/// A calendar month, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Build a month, rejecting `month` outside `1..=12` and years chrono
    /// cannot represent.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(FitnessError::InvalidMonth(format!("{month:02}/{year:04}")));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month (December rolls into January).
    pub fn succ(&self) -> Self {
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

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("CalendarMonth is validated on construction")
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for CalendarMonth {
    type Err = FitnessError;

    /// Accepts `MM/YYYY` (single-digit months allowed) or ISO `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || FitnessError::InvalidMonth(s.to_string());

        let (month, year) = if let Some((m, y)) = s.split_once('/') {
            (m, y)
        } else if let Some((y, m)) = s.split_once('-') {
            (m, y)
        } else {
            return Err(invalid());
        };

        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for CalendarMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Age
// ---------------------------------------------------------------------------

/// Whole years between `date_of_birth` and `reference`.
///
/// One year is subtracted when the birthday has not yet come round in the
/// reference year. Missing dates, and references before the birth date,
/// yield 0.
pub fn age_as_of(date_of_birth: Option<NaiveDate>, reference: Option<NaiveDate>) -> u32 {
    let (Some(dob), Some(reference)) = (date_of_birth, reference) else {
        return 0;
    };

    let mut years = reference.year() - dob.year();
    if (reference.month(), reference.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }

    u32::try_from(years).unwrap_or(0)
}

/// Text form of [`age_as_of`]; malformed dates yield 0.
pub fn age_as_of_text(date_of_birth: &str, reference: &str) -> u32 {
    age_as_of(parse_date(date_of_birth).ok(), parse_date(reference).ok())
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Serialize a [`NaiveDate`] as `DD/MM/YYYY`.
pub mod dmy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(d)?;
        super::parse_date(&s).map_err(serde::de::Error::custom)
    }
}

/// Serialize an optional [`NaiveDate`] as `DD/MM/YYYY` or `null`.
///
/// Unreadable stored values deserialize to `None` rather than failing the
/// whole record.
pub mod dmy_option {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.collect_str(&super::format_date(*d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let s: Option<String> = Option::deserialize(d)?;
        Ok(s.and_then(|s| super::parse_date(&s).ok()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

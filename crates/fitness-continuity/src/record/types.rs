//! Identifiers and small value types shared by records and the classifier.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{FitnessError, Result};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Stable identifier of a person.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a measurement record (`rec_<base58>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    /// Derive a fresh id for a record of `subject` observed on `date`.
    pub fn generate(subject: &SubjectId, date: NaiveDate) -> Self {
        let nonce: u64 = rand::random();
        let id_input = format!("rec:{}:{}:{}", subject.0, date, nonce);
        let id_hash = Sha256::digest(id_input.as_bytes());
        let id_encoded = bs58::encode(&id_hash[..16]).into_string();
        Self(format!("rec_{id_encoded}"))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

/// Drives the sex-specific waist thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M", alias = "MASCULINO")]
    Male,
    #[serde(rename = "F", alias = "FEMENINO")]
    Female,
}

impl Sex {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Sex {
    type Err = FitnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" | "masculino" => Ok(Self::Male),
            "f" | "female" | "femenino" => Ok(Self::Female),
            other => Err(FitnessError::InvalidInput(format!(
                "unknown sex '{other}' (expected M or F)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Blood pressure
// ---------------------------------------------------------------------------

/// A `systolic/diastolic` reading in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: u16,
    /// `None` when the diastolic half could not be read.
    pub diastolic: Option<u16>,
}

impl BloodPressure {
    pub fn new(systolic: u16, diastolic: u16) -> Self {
        Self {
            systolic,
            diastolic: Some(diastolic),
        }
    }

    /// Lenient parse of `"S/D"` text.
    ///
    /// Each half is read as its leading digits (`"120 mmHg"` reads as 120);
    /// values past `u16::MAX` saturate.
    /// No `/`, or a systolic half without digits, yields `None`, as do
    /// empty text and `"N/A"`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case(crate::classify::NOT_AVAILABLE) {
            return None;
        }
        let (systolic, diastolic) = text.split_once('/')?;
        Some(Self {
            systolic: leading_int(systolic)?,
            diastolic: leading_int(diastolic),
        })
    }
}

fn leading_int(s: &str) -> Option<u16> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let digits = &s[..end];
    if digits.is_empty() {
        return None;
    }
    // All digits, so the only parse failure left is overflow
    Some(digits.parse().unwrap_or(u16::MAX))
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.diastolic {
            Some(d) => write!(f, "{}/{}", self.systolic, d),
            None => write!(f, "{}/", self.systolic),
        }
    }
}

/// Serialize an optional reading as `"S/D"` text, `"N/A"` when absent.
pub mod bp_text {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::BloodPressure;
    use crate::classify::NOT_AVAILABLE;

    pub fn serialize<S: Serializer>(bp: &Option<BloodPressure>, s: S) -> Result<S::Ok, S::Error> {
        match bp {
            Some(bp) => s.collect_str(bp),
            None => s.serialize_str(NOT_AVAILABLE),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<BloodPressure>, D::Error> {
        let s: Option<String> = Option::deserialize(d)?;
        Ok(s.as_deref().and_then(BloodPressure::parse))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The measurement record — one fitness observation for one subject.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::{self, Classification, NO_SHOW};
use crate::time::{self, CalendarMonth};

use super::types::{bp_text, BloodPressure, RecordId, Sex, SubjectId};

/// Demographic fields carried from record to record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub subject_id: SubjectId,
    pub sex: Sex,
    #[serde(default, with = "time::dmy_option")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub name: String,
}

impl SubjectProfile {
    pub fn new(subject_id: SubjectId, sex: Sex) -> Self {
        Self {
            subject_id,
            sex,
            date_of_birth: None,
            unit: String::new(),
            rank: String::new(),
            name: String::new(),
        }
    }
}

/// One observation, real or synthesized.
///
/// Records are append-only: nothing in this crate mutates a stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub profile: SubjectProfile,
    /// Observation date; the 1st of the month for synthesized records.
    #[serde(with = "time::dmy")]
    pub observed_on: NaiveDate,
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
    pub waist: f64,
    #[serde(default, with = "bp_text")]
    pub blood_pressure: Option<BloodPressure>,
    pub age: u32,
    /// Absence flag or verdict reason; empty when there is none.
    #[serde(default)]
    pub motive: String,
    pub recorded_by: String,
    /// Set by intake; synthesized records leave it empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
}

impl MeasurementRecord {
    pub fn subject_id(&self) -> &SubjectId {
        &self.profile.subject_id
    }

    /// Reporting month of this record.
    pub fn month(&self) -> CalendarMonth {
        CalendarMonth::of(self.observed_on)
    }

    /// Whether this record marks a missed appointment.
    pub fn is_absence(&self) -> bool {
        self.motive == NO_SHOW || classify::engine::is_no_show(self.bmi)
    }

    /// Stored classification, or one computed from the stored values.
    pub fn classification(&self) -> Classification {
        self.classification.unwrap_or_else(|| {
            classify::classify(
                self.bmi,
                self.profile.sex,
                self.waist,
                self.blood_pressure.as_ref(),
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

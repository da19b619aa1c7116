//! Intake pipeline — reconcile, classify, and store a real observation.

use chrono::NaiveDate;

use crate::classify::ClassificationPolicy;
use crate::classify::Measurements;
use crate::continuity::ContinuityEngine;
use crate::error::{FitnessError, Result};
use crate::record::{BloodPressure, MeasurementRecord, RecordId, SubjectProfile};
use crate::storage::RecordStore;
use crate::time::{age_as_of, CalendarMonth};

/// A measurement taken at an appointment.
#[derive(Debug, Clone)]
pub struct Observation {
    pub profile: SubjectProfile,
    pub observed_on: NaiveDate,
    pub weight: f64,
    pub height: f64,
    pub waist: f64,
    pub blood_pressure: Option<BloodPressure>,
    pub recorded_by: String,
}

/// What [`record_observation`] stored.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub record: MeasurementRecord,
    /// Absence records created for the months before this one.
    pub absences_created: u32,
}

/// Negative and non-finite readings count as unmeasured.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Store a real observation for its month.
///
/// Missed months since the subject's latest record are backfilled first.
/// The observation is then assessed (BMI, cap, classification) and
/// appended with its verdict.
///
/// # Errors
///
/// - `FitnessError::AlreadyRecorded` if the month already has a record.
/// - `FitnessError::InvalidInput` if the subject already has a record for a
///   later month.
/// - Any store error from reconciliation or the final append.
pub fn record_observation<S: RecordStore>(
    engine: &ContinuityEngine<S>,
    observation: Observation,
    policy: &ClassificationPolicy,
) -> Result<IntakeOutcome> {
    let subject = observation.profile.subject_id.clone();
    let month = CalendarMonth::of(observation.observed_on);

    let reconciled = engine.reconcile(&subject, month)?;
    if reconciled.already_recorded {
        return Err(FitnessError::AlreadyRecorded {
            subject: subject.to_string(),
            month: month.to_string(),
        });
    }
    if let Some(latest) = reconciled.latest_month.filter(|latest| *latest > month) {
        return Err(FitnessError::InvalidInput(format!(
            "observation for {month} precedes latest recorded month {latest} of subject {subject}"
        )));
    }

    let measurements = Measurements {
        sex: observation.profile.sex,
        weight: sanitize(observation.weight),
        height: sanitize(observation.height),
        waist: sanitize(observation.waist),
        blood_pressure: observation.blood_pressure,
    };
    let assessment = policy.assess(&measurements);

    let record = MeasurementRecord {
        id: RecordId::generate(&subject, observation.observed_on),
        age: age_as_of(
            observation.profile.date_of_birth,
            Some(observation.observed_on),
        ),
        profile: observation.profile,
        observed_on: observation.observed_on,
        weight: measurements.weight,
        height: measurements.height,
        bmi: assessment.bmi,
        waist: measurements.waist,
        blood_pressure: measurements.blood_pressure,
        motive: assessment
            .classification
            .reason()
            .unwrap_or_default()
            .to_string(),
        recorded_by: observation.recorded_by,
        classification: Some(assessment.classification),
    };

    engine.store().append(&record)?;
    log::info!(
        "recorded {} for {subject} {month}: bmi={} verdict={}",
        record.id,
        record.bmi,
        assessment.classification.aptitude
    );

    Ok(IntakeOutcome {
        record,
        absences_created: reconciled.created,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

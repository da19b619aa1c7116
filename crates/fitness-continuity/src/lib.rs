//! fitness-continuity — Fitness classification and monthly continuity.
//!
//! Classifies periodic body-mass index, waist circumference and blood
//! pressure measurements against fitness-for-duty rules, and keeps each
//! subject's monthly series free of gaps by backfilling missed months with
//! absence records.

pub mod classify;
pub mod continuity;
pub mod error;
pub mod intake;
pub mod record;
pub mod storage;
pub mod time;

// Re-export primary types
pub use error::{FitnessError, Result};
pub use record::{BloodPressure, MeasurementRecord, RecordId, Sex, SubjectId, SubjectProfile};
pub use time::{age_as_of, CalendarMonth};

// Re-export classification types
pub use classify::{
    assess, classify, compute_bmi, Aptitude, Assessment, BloodPressureClass, Classification,
    ClassificationPolicy, FitException, Measurements, UnfitReason, WaistRisk, WeightClass,
};

// Re-export continuity types
pub use continuity::{ContinuityConfig, ContinuityEngine, ReconcileOutcome};

pub use intake::{record_observation, IntakeOutcome, Observation};
pub use storage::{JsonRecordStore, MemoryRecordStore, RecordStore};

//! Fitness classification — BMI bands, blood pressure, waist risk, aptitude.
//!
//! The classify module provides:
//! - BMI computation and the waist-based BMI cap
//! - Weight, blood-pressure and waist-risk sub-classifications
//! - The fit-for-duty decision with its military exception
//! - Overridable thresholds via [`ClassificationPolicy`]

pub mod engine;
pub mod policy;
pub mod types;

pub use types::{
    Aptitude, Assessment, BloodPressureClass, Classification, FitException, Measurements,
    UnfitReason, WaistRisk, WeightClass, NOT_AVAILABLE, NO_SHOW,
};

pub use policy::{BloodPressureThresholds, ClassificationPolicy, WaistThresholds, WeightBands};

pub use engine::{assess, classify, compute_bmi};

//! Classification thresholds.
//!
//! The defaults are the organization's fitness rules. A policy file may
//! override any subset of them; missing keys fall back to the defaults.
//!
//! ```json
//! {
//!     "obesity_unfit_from": 30.0,
//!     "female": { "high_risk_from": 80.0, "very_high_risk_from": 88.0, "bmi_cap_waist_below": 84.0 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FitnessError, Result};
use crate::record::Sex;

/// Upper (exclusive) bounds of each BMI band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightBands {
    pub underweight_below: f64,
    pub normal_below: f64,
    pub overweight_below: f64,
    pub obesity_i_below: f64,
    pub obesity_ii_below: f64,
}

impl Default for WeightBands {
    fn default() -> Self {
        Self {
            underweight_below: 18.5,
            normal_below: 25.0,
            overweight_below: 30.0,
            obesity_i_below: 35.0,
            obesity_ii_below: 40.0,
        }
    }
}

/// Sex-specific waist lines, in centimetres.
///
/// `bmi_cap_waist_below` is deliberately separate from `high_risk_from`:
/// for women the cap applies below 84 while the risk line sits at 80.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaistThresholds {
    pub high_risk_from: f64,
    pub very_high_risk_from: f64,
    pub bmi_cap_waist_below: f64,
}

impl WaistThresholds {
    pub fn male() -> Self {
        Self {
            high_risk_from: 94.0,
            very_high_risk_from: 102.0,
            bmi_cap_waist_below: 94.0,
        }
    }

    pub fn female() -> Self {
        Self {
            high_risk_from: 80.0,
            very_high_risk_from: 88.0,
            bmi_cap_waist_below: 84.0,
        }
    }
}

/// Blood-pressure lines, in mmHg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodPressureThresholds {
    pub stage2_systolic: u16,
    pub stage2_diastolic: u16,
    pub stage1_systolic: u16,
    pub stage1_diastolic: u16,
    pub elevated_systolic: u16,
}

impl Default for BloodPressureThresholds {
    fn default() -> Self {
        Self {
            stage2_systolic: 140,
            stage2_diastolic: 90,
            stage1_systolic: 130,
            stage1_diastolic: 80,
            elevated_systolic: 120,
        }
    }
}

/// Every threshold the classifier consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationPolicy {
    pub weight: WeightBands,
    /// BMI at or above which a subject is provisionally unfit.
    pub obesity_unfit_from: f64,
    /// Raw BMI strictly above which the waist cap may apply.
    pub bmi_cap_above: f64,
    /// Value the capped BMI is replaced with.
    pub bmi_cap_value: f64,
    pub male: WaistThresholds,
    pub female: WaistThresholds,
    pub blood_pressure: BloodPressureThresholds,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            weight: WeightBands::default(),
            obesity_unfit_from: 30.0,
            bmi_cap_above: 29.9,
            bmi_cap_value: 29.9,
            male: WaistThresholds::male(),
            female: WaistThresholds::female(),
            blood_pressure: BloodPressureThresholds::default(),
        }
    }
}

impl ClassificationPolicy {
    /// Waist lines for `sex`.
    pub fn waist(&self, sex: Sex) -> &WaistThresholds {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    /// Load a policy from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `FitnessError::Io` if the file cannot be read, or
    /// `FitnessError::InvalidFileFormat` if it is not a valid policy.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            FitnessError::InvalidFileFormat(format!(
                "failed to parse policy file {}: {e}",
                path.display()
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Data structures for fitness classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{BloodPressure, Sex};

/// Motive and weight label of a missed appointment ("did not attend").
pub const NO_SHOW: &str = "NO ASISTIÓ";

/// Label for a sub-classification that could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Sub-classifications
// ---------------------------------------------------------------------------

/// Body-mass index band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightClass {
    #[serde(rename = "NO ASISTIÓ")]
    NoShow,
    #[serde(rename = "DELGADEZ")]
    Underweight,
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "SOBREPESO")]
    Overweight,
    #[serde(rename = "OBESIDAD I")]
    ObesityI,
    #[serde(rename = "OBESIDAD II")]
    ObesityII,
    #[serde(rename = "OBESIDAD III")]
    ObesityIII,
}

impl WeightClass {
    /// Stable report label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::NoShow => NO_SHOW,
            Self::Underweight => "DELGADEZ",
            Self::Normal => "NORMAL",
            Self::Overweight => "SOBREPESO",
            Self::ObesityI => "OBESIDAD I",
            Self::ObesityII => "OBESIDAD II",
            Self::ObesityIII => "OBESIDAD III",
        }
    }
}

/// Blood-pressure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodPressureClass {
    #[serde(rename = "N/A")]
    NotAvailable,
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "ELEVADA")]
    Elevated,
    #[serde(rename = "HIPERTENSION (ESTADIO 1)")]
    HypertensionStage1,
    #[serde(rename = "HIPERTENSION (ESTADIO 2)")]
    HypertensionStage2,
}

impl BloodPressureClass {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::NotAvailable => NOT_AVAILABLE,
            Self::Normal => "NORMAL",
            Self::Elevated => "ELEVADA",
            Self::HypertensionStage1 => "HIPERTENSION (ESTADIO 1)",
            Self::HypertensionStage2 => "HIPERTENSION (ESTADIO 2)",
        }
    }
}

/// Cardiometabolic risk from waist circumference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaistRisk {
    #[serde(rename = "N/A")]
    NotAvailable,
    #[serde(rename = "RIESGO BAJO")]
    Low,
    #[serde(rename = "RIESGO ALTO")]
    High,
    #[serde(rename = "RIESGO MUY ALTO")]
    VeryHigh,
}

impl WaistRisk {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::NotAvailable => NOT_AVAILABLE,
            Self::Low => "RIESGO BAJO",
            Self::High => "RIESGO ALTO",
            Self::VeryHigh => "RIESGO MUY ALTO",
        }
    }
}

// ---------------------------------------------------------------------------
// Aptitude
// ---------------------------------------------------------------------------

/// Why a subject was found unfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnfitReason {
    /// Missed the monthly appointment.
    NoShow,
    /// BMI at or above the obesity line.
    Obesity,
    /// Waist at or above the sex-specific high-risk line.
    AbdominalRisk,
}

impl UnfitReason {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::NoShow => NO_SHOW,
            Self::Obesity => "IMC Obesidad",
            Self::AbdominalRisk => "Riesgo Abdominal",
        }
    }
}

/// Which override turned an unfit reading into a fit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitException {
    /// Obesity-only disqualification waived because the waist is below the
    /// high-risk line.
    Military,
    /// BMI capped at the overweight ceiling because the waist is below the
    /// lenient cap threshold.
    WaistCap,
}

/// Fit-for-duty outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Aptitude {
    Fit,
    FitByException(FitException),
    Unfit(UnfitReason),
}

impl Aptitude {
    pub fn is_fit(&self) -> bool {
        !matches!(self, Self::Unfit(_))
    }

    /// Free-text reason stored as the record motive, if any.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Fit | Self::FitByException(FitException::Military) => None,
            Self::FitByException(FitException::WaistCap) => Some("APTO (EXCEPCIÓN PAB)"),
            Self::Unfit(reason) => Some(reason.as_label()),
        }
    }
}

impl fmt::Display for Aptitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fit => write!(f, "APTO"),
            Self::FitByException(FitException::Military) => write!(f, "APTO (EXCEPCIÓN)"),
            Self::FitByException(FitException::WaistCap) => write!(f, "APTO (EXCEPCIÓN PAB)"),
            Self::Unfit(UnfitReason::NoShow) => write!(f, "INAPTO"),
            Self::Unfit(reason) => write!(f, "INAPTO ({})", reason.as_label()),
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Full verdict for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub aptitude: Aptitude,
    pub weight_class: WeightClass,
    pub blood_pressure_class: BloodPressureClass,
    pub waist_risk: WaistRisk,
}

impl Classification {
    /// The fixed verdict for a missed appointment.
    pub fn no_show() -> Self {
        Self {
            aptitude: Aptitude::Unfit(UnfitReason::NoShow),
            weight_class: WeightClass::NoShow,
            blood_pressure_class: BloodPressureClass::NotAvailable,
            waist_risk: WaistRisk::NotAvailable,
        }
    }

    /// Rendered verdict, e.g. `INAPTO (Riesgo Abdominal)`.
    pub fn verdict(&self) -> String {
        self.aptitude.to_string()
    }

    pub fn reason(&self) -> Option<&'static str> {
        self.aptitude.reason()
    }
}

// ---------------------------------------------------------------------------
// Assessment input / output
// ---------------------------------------------------------------------------

/// Raw inputs for a full assessment (BMI computed from weight and height).
#[derive(Debug, Clone, PartialEq)]
pub struct Measurements {
    pub sex: Sex,
    /// Kilograms.
    pub weight: f64,
    /// Metres.
    pub height: f64,
    /// Centimetres; 0 when unmeasured.
    pub waist: f64,
    pub blood_pressure: Option<BloodPressure>,
}

/// Outcome of [`assess`](super::assess).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// BMI as stored and reported (after the cap).
    pub bmi: f64,
    /// Whether the waist-based cap replaced the computed BMI.
    pub capped: bool,
    pub classification: Classification,
}

//! Classification engine — BMI, sub-classifications, aptitude, and the cap.

use crate::record::{BloodPressure, Sex};

use super::policy::ClassificationPolicy;
use super::types::*;

// ---------------------------------------------------------------------------
// BMI
// ---------------------------------------------------------------------------

/// `weight / height²` rounded to one decimal; 0 when height is not positive.
pub fn compute_bmi(weight: f64, height: f64) -> f64 {
    if !(height > 0.0) || !weight.is_finite() {
        return 0.0;
    }
    let bmi = round1(weight / (height * height));
    if bmi.is_finite() {
        bmi
    } else {
        0.0
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// A BMI below one reportable tenth, or not finite, means nobody was
/// measured.
pub(crate) fn is_no_show(bmi: f64) -> bool {
    !bmi.is_finite() || bmi < 0.1
}

fn waist_measured(waist: f64) -> bool {
    waist > 0.0
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify with the default policy.
pub fn classify(
    bmi: f64,
    sex: Sex,
    waist: f64,
    blood_pressure: Option<&BloodPressure>,
) -> Classification {
    ClassificationPolicy::default().classify(bmi, sex, waist, blood_pressure)
}

impl ClassificationPolicy {
    /// Classify one measurement. Never fails: unusable inputs come back as
    /// `N/A` sub-classifications.
    pub fn classify(
        &self,
        bmi: f64,
        sex: Sex,
        waist: f64,
        blood_pressure: Option<&BloodPressure>,
    ) -> Classification {
        if is_no_show(bmi) {
            return Classification::no_show();
        }

        Classification {
            aptitude: self.aptitude(bmi, sex, waist),
            weight_class: self.weight_class(bmi),
            blood_pressure_class: self.blood_pressure_class(blood_pressure),
            waist_risk: self.waist_risk(waist, sex),
        }
    }

    pub fn weight_class(&self, bmi: f64) -> WeightClass {
        let bands = &self.weight;
        if is_no_show(bmi) {
            WeightClass::NoShow
        } else if bmi < bands.underweight_below {
            WeightClass::Underweight
        } else if bmi < bands.normal_below {
            WeightClass::Normal
        } else if bmi < bands.overweight_below {
            WeightClass::Overweight
        } else if bmi < bands.obesity_i_below {
            WeightClass::ObesityI
        } else if bmi < bands.obesity_ii_below {
            WeightClass::ObesityII
        } else {
            WeightClass::ObesityIII
        }
    }

    /// First match wins: stage 2, stage 1, elevated, normal.
    pub fn blood_pressure_class(&self, reading: Option<&BloodPressure>) -> BloodPressureClass {
        let Some(bp) = reading else {
            return BloodPressureClass::NotAvailable;
        };
        let t = &self.blood_pressure;
        let s = bp.systolic;
        // An unreadable diastolic never satisfies a diastolic comparison.
        let d_at_least = |line: u16| bp.diastolic.is_some_and(|d| d >= line);
        let d_below = |line: u16| bp.diastolic.is_some_and(|d| d < line);

        if s >= t.stage2_systolic || d_at_least(t.stage2_diastolic) {
            BloodPressureClass::HypertensionStage2
        } else if s >= t.stage1_systolic || d_at_least(t.stage1_diastolic) {
            BloodPressureClass::HypertensionStage1
        } else if s >= t.elevated_systolic && d_below(t.stage1_diastolic) {
            BloodPressureClass::Elevated
        } else {
            BloodPressureClass::Normal
        }
    }

    pub fn waist_risk(&self, waist: f64, sex: Sex) -> WaistRisk {
        if !waist_measured(waist) {
            return WaistRisk::NotAvailable;
        }
        let t = self.waist(sex);
        if waist < t.high_risk_from {
            WaistRisk::Low
        } else if waist < t.very_high_risk_from {
            WaistRisk::High
        } else {
            WaistRisk::VeryHigh
        }
    }

    /// Fit-for-duty decision for a measured subject.
    ///
    /// Obesity alone is waived when a measured waist sits below the
    /// high-risk line. When both rules trigger the abdominal reason wins.
    pub fn aptitude(&self, bmi: f64, sex: Sex, waist: f64) -> Aptitude {
        if is_no_show(bmi) {
            return Aptitude::Unfit(UnfitReason::NoShow);
        }
        let high_risk = self.waist(sex).high_risk_from;

        let obese = bmi >= self.obesity_unfit_from;
        let abdominal = waist_measured(waist) && waist >= high_risk;

        if abdominal {
            Aptitude::Unfit(UnfitReason::AbdominalRisk)
        } else if obese && waist_measured(waist) {
            Aptitude::FitByException(FitException::Military)
        } else if obese {
            Aptitude::Unfit(UnfitReason::Obesity)
        } else {
            Aptitude::Fit
        }
    }

    /// Cap a raw BMI at the overweight ceiling when the waist is below the
    /// lenient cap threshold. Returns the BMI to store and whether it was
    /// capped.
    pub fn cap_bmi(&self, raw_bmi: f64, sex: Sex, waist: f64) -> (f64, bool) {
        let below_cap_line = waist_measured(waist) && waist < self.waist(sex).bmi_cap_waist_below;
        if raw_bmi > self.bmi_cap_above && below_cap_line {
            (self.bmi_cap_value, true)
        } else {
            (raw_bmi, false)
        }
    }

    /// Compute BMI, apply the cap, and classify.
    pub fn assess(&self, m: &Measurements) -> Assessment {
        let raw = compute_bmi(m.weight, m.height);
        let (bmi, capped) = self.cap_bmi(raw, m.sex, m.waist);

        let mut classification = self.classify(bmi, m.sex, m.waist, m.blood_pressure.as_ref());
        if capped {
            classification.aptitude = Aptitude::FitByException(FitException::WaistCap);
        }

        log::debug!(
            "assessed bmi raw={raw} stored={bmi} capped={capped} verdict={}",
            classification.aptitude
        );

        Assessment {
            bmi,
            capped,
            classification,
        }
    }
}

/// [`ClassificationPolicy::assess`] with the default policy.
pub fn assess(m: &Measurements) -> Assessment {
    ClassificationPolicy::default().assess(m)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

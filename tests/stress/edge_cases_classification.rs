//! Edge case tests: classification boundaries and degenerate inputs.

use fitness_continuity::{
    assess, classify, compute_bmi, Aptitude, BloodPressure, BloodPressureClass, Classification,
    ClassificationPolicy, FitException, Measurements, Sex, UnfitReason, WaistRisk, WeightClass,
};

fn bp(text: &str) -> Option<BloodPressure> {
    BloodPressure::parse(text)
}

// ── No-show inputs ────────────────────────────────────────────────────────────

#[test]
fn edge_degenerate_bmi_is_no_show() {
    for bmi in [0.0, 0.05, 0.099, -3.0, f64::NAN, f64::INFINITY] {
        for sex in [Sex::Male, Sex::Female] {
            let c = classify(bmi, sex, 120.0, bp("180/110").as_ref());
            assert_eq!(c, Classification::no_show(), "bmi {bmi} {sex}");
            assert_eq!(c.verdict(), "INAPTO");
            assert_eq!(c.reason(), Some("NO ASISTIÓ"));
        }
    }
}

#[test]
fn edge_smallest_reportable_bmi_is_measured() {
    let c = classify(0.1, Sex::Male, 0.0, None);
    assert_eq!(c.weight_class, WeightClass::Underweight);
    assert_eq!(c.aptitude, Aptitude::Fit);
}

#[test]
fn edge_compute_bmi_degenerate_height() {
    assert_eq!(compute_bmi(70.0, 0.0), 0.0);
    assert_eq!(compute_bmi(70.0, -1.7), 0.0);
    assert_eq!(compute_bmi(70.0, f64::NAN), 0.0);
    assert_eq!(compute_bmi(f64::INFINITY, 1.7), 0.0);
    assert_eq!(compute_bmi(0.0, 0.01), 0.0);
}

// ── Band boundaries ───────────────────────────────────────────────────────────

#[test]
fn edge_weight_band_lower_bounds_are_inclusive() {
    let cases = [
        (18.4, WeightClass::Underweight),
        (18.5, WeightClass::Normal),
        (24.9, WeightClass::Normal),
        (25.0, WeightClass::Overweight),
        (29.9, WeightClass::Overweight),
        (30.0, WeightClass::ObesityI),
        (35.0, WeightClass::ObesityII),
        (40.0, WeightClass::ObesityIII),
        (72.5, WeightClass::ObesityIII),
    ];
    for (bmi, expected) in cases {
        assert_eq!(classify(bmi, Sex::Female, 70.0, None).weight_class, expected, "bmi {bmi}");
    }
}

#[test]
fn edge_waist_thresholds_per_sex() {
    let cases = [
        (Sex::Male, 93.9, WaistRisk::Low),
        (Sex::Male, 94.0, WaistRisk::High),
        (Sex::Male, 102.0, WaistRisk::VeryHigh),
        (Sex::Female, 79.9, WaistRisk::Low),
        (Sex::Female, 80.0, WaistRisk::High),
        (Sex::Female, 88.0, WaistRisk::VeryHigh),
        (Sex::Female, 0.0, WaistRisk::NotAvailable),
    ];
    for (sex, waist, expected) in cases {
        assert_eq!(classify(22.0, sex, waist, None).waist_risk, expected, "{sex} {waist}");
    }
}

#[test]
fn edge_blood_pressure_first_match_wins() {
    let cases = [
        ("140/60", BloodPressureClass::HypertensionStage2),
        ("110/90", BloodPressureClass::HypertensionStage2),
        ("139/89", BloodPressureClass::HypertensionStage1),
        ("118/80", BloodPressureClass::HypertensionStage1),
        ("120/79", BloodPressureClass::Elevated),
        ("129/70", BloodPressureClass::Elevated),
        ("119/79", BloodPressureClass::Normal),
        ("N/A", BloodPressureClass::NotAvailable),
        ("", BloodPressureClass::NotAvailable),
        ("120", BloodPressureClass::NotAvailable),
        ("abc/80", BloodPressureClass::NotAvailable),
    ];
    for (text, expected) in cases {
        let c = classify(22.0, Sex::Male, 80.0, bp(text).as_ref());
        assert_eq!(c.blood_pressure_class, expected, "bp '{text}'");
    }
}

#[test]
fn edge_unreadable_diastolic() {
    // Systolic alone can still reach the hypertension stages
    assert_eq!(
        classify(22.0, Sex::Male, 80.0, bp("150/x").as_ref()).blood_pressure_class,
        BloodPressureClass::HypertensionStage2
    );
    assert_eq!(
        classify(22.0, Sex::Male, 80.0, bp("132/").as_ref()).blood_pressure_class,
        BloodPressureClass::HypertensionStage1
    );
    // Elevated needs a readable diastolic below the stage 1 line
    assert_eq!(
        classify(22.0, Sex::Male, 80.0, bp("125/--").as_ref()).blood_pressure_class,
        BloodPressureClass::Normal
    );
}

#[test]
fn edge_blood_pressure_text_with_units() {
    let reading = bp(" 135 mmHg / 85 mmHg ").unwrap();
    assert_eq!(reading, BloodPressure::new(135, 85));
}

// ── Aptitude ──────────────────────────────────────────────────────────────────

#[test]
fn edge_military_exception_needs_measured_waist() {
    let waived = classify(33.0, Sex::Male, 90.0, None);
    assert_eq!(waived.aptitude, Aptitude::FitByException(FitException::Military));
    assert_eq!(waived.verdict(), "APTO (EXCEPCIÓN)");
    assert_eq!(waived.reason(), None);

    let unmeasured = classify(33.0, Sex::Male, 0.0, None);
    assert_eq!(unmeasured.aptitude, Aptitude::Unfit(UnfitReason::Obesity));
    assert_eq!(unmeasured.verdict(), "INAPTO (IMC Obesidad)");
}

#[test]
fn edge_abdominal_reason_beats_obesity() {
    let c = classify(36.0, Sex::Female, 95.0, None);
    assert_eq!(c.aptitude, Aptitude::Unfit(UnfitReason::AbdominalRisk));
    assert_eq!(c.verdict(), "INAPTO (Riesgo Abdominal)");
}

#[test]
fn edge_abdominal_risk_at_normal_weight() {
    let c = classify(23.0, Sex::Male, 94.0, None);
    assert!(!c.aptitude.is_fit());
    assert_eq!(c.reason(), Some("Riesgo Abdominal"));
}

// ── BMI cap ───────────────────────────────────────────────────────────────────

fn measure(sex: Sex, weight: f64, height: f64, waist: f64) -> Measurements {
    Measurements {
        sex,
        weight,
        height,
        waist,
        blood_pressure: None,
    }
}

#[test]
fn edge_cap_just_above_ceiling() {
    // 92 / 1.75² = 30.04 -> 30.0
    let a = assess(&measure(Sex::Male, 92.0, 1.75, 93.9));
    assert!(a.capped);
    assert_eq!(a.bmi, 29.9);
    assert_eq!(a.classification.weight_class, WeightClass::Overweight);
    assert_eq!(
        a.classification.aptitude,
        Aptitude::FitByException(FitException::WaistCap)
    );
    assert_eq!(a.classification.reason(), Some("APTO (EXCEPCIÓN PAB)"));
}

#[test]
fn edge_no_cap_at_ceiling_or_wide_waist() {
    // 91.6 / 1.75² = 29.91 -> 29.9, not above the ceiling
    let at_ceiling = assess(&measure(Sex::Male, 91.6, 1.75, 80.0));
    assert!(!at_ceiling.capped);
    assert_eq!(at_ceiling.classification.aptitude, Aptitude::Fit);

    let wide = assess(&measure(Sex::Male, 92.0, 1.75, 94.0));
    assert!(!wide.capped);
    assert_eq!(wide.bmi, 30.0);
    assert_eq!(
        wide.classification.aptitude,
        Aptitude::Unfit(UnfitReason::AbdominalRisk)
    );

    let unmeasured = assess(&measure(Sex::Male, 92.0, 1.75, 0.0));
    assert!(!unmeasured.capped);
    assert_eq!(
        unmeasured.classification.aptitude,
        Aptitude::Unfit(UnfitReason::Obesity)
    );
}

#[test]
fn edge_female_cap_line_above_risk_line() {
    // 81.9 / 1.6² = 31.99 -> 32.0; waist 82 is high risk but below the cap line
    let a = assess(&measure(Sex::Female, 81.9, 1.6, 82.0));
    assert!(a.capped);
    assert_eq!(a.bmi, 29.9);
    assert_eq!(a.classification.waist_risk, WaistRisk::High);
    assert_eq!(
        a.classification.aptitude,
        Aptitude::FitByException(FitException::WaistCap)
    );

    let at_line = assess(&measure(Sex::Female, 81.9, 1.6, 84.0));
    assert!(!at_line.capped);
    assert_eq!(at_line.bmi, 32.0);
}

#[test]
fn edge_custom_policy_moves_lines() {
    let mut policy = ClassificationPolicy::default();
    policy.male.high_risk_from = 100.0;
    policy.male.very_high_risk_from = 110.0;

    let c = policy.classify(33.0, Sex::Male, 96.0, None);
    assert_eq!(c.waist_risk, WaistRisk::Low);
    assert_eq!(c.aptitude, Aptitude::FitByException(FitException::Military));

    // Default policy still flags the same reading
    assert_eq!(
        classify(33.0, Sex::Male, 96.0, None).aptitude,
        Aptitude::Unfit(UnfitReason::AbdominalRisk)
    );
}

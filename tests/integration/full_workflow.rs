//! Integration test: full end-to-end workflow.
//!
//! Tests the complete monthly lifecycle against a file-backed store:
//! 1. Record a first observation
//! 2. Skip two months, record again (absences backfilled)
//! 3. Re-reconcile the same month (idempotent)
//! 4. Reopen the store and read the series back
//! 5. Filter a reporting month across subjects

use chrono::NaiveDate;

use fitness_continuity::continuity::detect_gaps;
use fitness_continuity::time::{format_date, parse_date};
use fitness_continuity::{
    record_observation, Aptitude, BloodPressure, CalendarMonth, ClassificationPolicy,
    ContinuityEngine, FitException, FitnessError, JsonRecordStore, Observation, RecordStore, Sex,
    SubjectId, SubjectProfile, UnfitReason,
};

fn profile(subject: &str, sex: Sex) -> SubjectProfile {
    let mut profile = SubjectProfile::new(SubjectId::new(subject), sex);
    profile.date_of_birth = parse_date("20/05/1990").ok();
    profile.unit = "COMPAÑIA A".to_string();
    profile.rank = "TTE".to_string();
    profile.name = format!("SUBJECT {subject}");
    profile
}

fn observe(profile: &SubjectProfile, date: &str, weight: f64, height: f64, waist: f64) -> Observation {
    Observation {
        profile: profile.clone(),
        observed_on: parse_date(date).unwrap(),
        weight,
        height,
        waist,
        blood_pressure: BloodPressure::parse("135/70"),
        recorded_by: "enfermeria".to_string(),
    }
}

fn month(s: &str) -> CalendarMonth {
    s.parse().unwrap()
}

#[test]
fn full_workflow_monthly_series() {
    let tmp = tempfile::tempdir().unwrap();
    let policy = ClassificationPolicy::default();
    let subject = profile("30551", Sex::Male);

    // ── Step 1: First observation ───────────────────────────────────────
    {
        let engine = ContinuityEngine::new(JsonRecordStore::new(tmp.path()).unwrap());
        let first = record_observation(
            &engine,
            observe(&subject, "01/01/2025", 95.0, 1.75, 90.0),
            &policy,
        )
        .expect("first observation should be recorded");

        // 95 / 1.75² = 31.0, waist 90 < 94: capped at 29.9
        assert_eq!(first.absences_created, 0);
        assert_eq!(first.record.bmi, 29.9);
        assert_eq!(
            first.record.classification.unwrap().aptitude,
            Aptitude::FitByException(FitException::WaistCap)
        );
        assert_eq!(
            first.record.classification.unwrap().blood_pressure_class.as_label(),
            "HIPERTENSION (ESTADIO 1)"
        );
    }

    // ── Step 2: April observation backfills February and March ─────────
    {
        let engine = ContinuityEngine::new(JsonRecordStore::new(tmp.path()).unwrap());
        let april = record_observation(
            &engine,
            observe(&subject, "14/04/2025", 80.0, 1.75, 99.0),
            &policy,
        )
        .unwrap();

        assert_eq!(april.absences_created, 2);
        assert_eq!(
            april.record.classification.unwrap().aptitude,
            Aptitude::Unfit(UnfitReason::AbdominalRisk)
        );
        assert_eq!(april.record.motive, "Riesgo Abdominal");
    }

    // ── Step 3: Reconciling April again writes nothing ──────────────────
    let engine = ContinuityEngine::new(JsonRecordStore::new(tmp.path()).unwrap());
    let again = engine
        .reconcile(&subject.subject_id, month("04/2025"))
        .unwrap();
    assert!(again.already_recorded);
    assert_eq!(again.created, 0);

    let duplicate = record_observation(
        &engine,
        observe(&subject, "20/04/2025", 80.0, 1.75, 99.0),
        &policy,
    );
    assert!(matches!(duplicate, Err(FitnessError::AlreadyRecorded { .. })));

    // ── Step 4: Read the series back from disk ──────────────────────────
    let store = JsonRecordStore::new(tmp.path()).unwrap();
    let history = store.history(&subject.subject_id).unwrap();
    let dates: Vec<String> = history.iter().map(|r| format_date(r.observed_on)).collect();
    assert_eq!(
        dates,
        vec!["01/01/2025", "01/02/2025", "01/03/2025", "14/04/2025"]
    );
    assert!(detect_gaps(&history).is_empty());

    for absence in &history[1..3] {
        assert!(absence.is_absence());
        assert_eq!(absence.motive, "NO ASISTIÓ");
        assert_eq!(absence.recorded_by, "SISTEMA");
        assert_eq!(absence.profile, subject);
        assert!(absence.blood_pressure.is_none());
        assert_eq!(absence.classification().verdict(), "INAPTO");
        assert_eq!(absence.age, 34);
    }

    // ── Step 5: Month filter across subjects ────────────────────────────
    let other = profile("40112", Sex::Female);
    record_observation(
        &engine,
        observe(&other, "03/03/2025", 60.0, 1.62, 76.0),
        &policy,
    )
    .unwrap();

    let march = store.records_in_month(month("03/2025")).unwrap();
    assert_eq!(march.len(), 2);
    assert!(march.iter().any(|r| r.is_absence()));
    assert!(march.iter().any(|r| r.subject_id().as_str() == "40112"));
}

#[test]
fn full_workflow_year_rollover() {
    let tmp = tempfile::tempdir().unwrap();
    let policy = ClassificationPolicy::default();
    let subject = profile("777", Sex::Female);
    let engine = ContinuityEngine::new(JsonRecordStore::new(tmp.path()).unwrap());

    record_observation(&engine, observe(&subject, "10/11/2024", 60.0, 1.6, 75.0), &policy).unwrap();
    let outcome = record_observation(
        &engine,
        observe(&subject, "05/02/2025", 60.0, 1.6, 75.0),
        &policy,
    )
    .unwrap();
    assert_eq!(outcome.absences_created, 2);

    let history = engine.store().history(&subject.subject_id).unwrap();
    let synthesized: Vec<NaiveDate> = history
        .iter()
        .filter(|r| r.is_absence())
        .map(|r| r.observed_on)
        .collect();
    assert_eq!(
        synthesized,
        vec![
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ]
    );
}

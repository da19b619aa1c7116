//! Scale test: long backfills and many subjects.
//!
//! Validates that reconciliation stays gap-free and idempotent when a
//! subject has been away for years, and across a large roster.

use chrono::NaiveDate;

use fitness_continuity::continuity::detect_gaps;
use fitness_continuity::{
    CalendarMonth, ContinuityEngine, JsonRecordStore, MeasurementRecord, MemoryRecordStore,
    RecordId, RecordStore, Sex, SubjectId, SubjectProfile,
};

fn genesis(subject: &str, year: i32, month: u32) -> MeasurementRecord {
    let observed_on = NaiveDate::from_ymd_opt(year, month, 12).unwrap();
    let mut profile = SubjectProfile::new(SubjectId::new(subject), Sex::Male);
    profile.date_of_birth = NaiveDate::from_ymd_opt(1985, 7, 1);
    profile.unit = "REGIMIENTO 4".to_string();

    MeasurementRecord {
        id: RecordId::generate(&profile.subject_id, observed_on),
        profile,
        observed_on,
        weight: 74.0,
        height: 1.7,
        bmi: 25.6,
        waist: 88.0,
        blood_pressure: None,
        age: 0,
        motive: String::new(),
        recorded_by: "enfermeria".to_string(),
        classification: None,
    }
}

fn month(s: &str) -> CalendarMonth {
    s.parse().unwrap()
}

#[test]
fn stress_ten_year_backfill_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let store = JsonRecordStore::new(tmp.path()).unwrap();
    store.append(&genesis("1001", 2015, 1)).unwrap();
    let engine = ContinuityEngine::new(&store);
    let subject = SubjectId::new("1001");

    let outcome = engine.reconcile(&subject, month("01/2025")).unwrap();
    assert_eq!(outcome.created, 119);

    let history = store.history(&subject).unwrap();
    assert_eq!(history.len(), 120);
    assert!(detect_gaps(&history).is_empty());

    // Strictly increasing months, every absence on the 1st
    for pair in history.windows(2) {
        assert_eq!(pair[0].month().succ(), pair[1].month());
    }
    for absence in &history[1..] {
        assert!(absence.is_absence());
        assert_eq!(absence.observed_on.format("%d").to_string(), "01");
    }
    assert_eq!(history.last().unwrap().month(), month("12/2024"));

    // Record ids never collide
    let mut ids: Vec<&str> = history.iter().map(|r| r.id.0.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 120);
}

#[test]
fn stress_absence_age_tracks_birthdays() {
    let store = MemoryRecordStore::new();
    store.append(&genesis("1002", 2015, 1)).unwrap();
    let engine = ContinuityEngine::new(&store);
    let subject = SubjectId::new("1002");

    engine.reconcile(&subject, month("01/2025")).unwrap();
    let history = store.history(&subject).unwrap();

    // Born 1 July 1985: 29 until June 2015, 30 from 1 July 2015
    let june = history.iter().find(|r| r.month() == month("06/2015")).unwrap();
    let july = history.iter().find(|r| r.month() == month("07/2015")).unwrap();
    assert_eq!(june.age, 29);
    assert_eq!(july.age, 30);
    assert_eq!(history.last().unwrap().age, 39);
}

#[test]
fn stress_repeated_reconcile_is_idempotent() {
    let store = MemoryRecordStore::new();
    store.append(&genesis("1003", 2020, 3)).unwrap();
    let engine = ContinuityEngine::new(&store);
    let subject = SubjectId::new("1003");

    let first = engine.reconcile(&subject, month("03/2024")).unwrap();
    assert_eq!(first.created, 47);

    for _ in 0..100 {
        let again = engine.reconcile(&subject, month("03/2024")).unwrap();
        assert_eq!(again.created, 0);
        assert!(!again.already_recorded);
    }
    assert_eq!(store.len().unwrap(), 48);
}

#[test]
fn stress_roster_of_1000_subjects() {
    let store = MemoryRecordStore::new();
    for i in 0..1_000u32 {
        // Stagger the starting month across the year
        store
            .append(&genesis(&format!("S{i:04}"), 2024, i % 12 + 1))
            .unwrap();
    }
    let engine = ContinuityEngine::new(&store);

    let mut created = 0u32;
    for i in 0..1_000u32 {
        let outcome = engine
            .reconcile(&SubjectId::new(format!("S{i:04}")), month("01/2025"))
            .unwrap();
        created += outcome.created;
    }

    // Starting month m leaves 12 - m missing months before January
    let expected: u32 = (0..1_000u32).map(|i| 12 - (i % 12 + 1)).sum();
    assert_eq!(created, expected);
    assert_eq!(store.len().unwrap(), 1_000 + expected as usize);

    for i in [0u32, 11, 500, 999] {
        let history = store.history(&SubjectId::new(format!("S{i:04}"))).unwrap();
        assert!(detect_gaps(&history).is_empty());
        assert_eq!(history.last().unwrap().month(), month("12/2024"));
    }
}

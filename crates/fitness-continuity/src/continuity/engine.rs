//! Continuity engine — month arithmetic, absence synthesis, and backfill.

use std::collections::BTreeSet;

use crate::classify::NO_SHOW;
use crate::error::{FitnessError, Result};
use crate::record::{MeasurementRecord, RecordId, SubjectId};
use crate::storage::RecordStore;
use crate::time::{age_as_of, CalendarMonth};

use super::types::*;

// ---------------------------------------------------------------------------
// Month arithmetic
// ---------------------------------------------------------------------------

/// Months strictly between `last` and `target`, in order.
///
/// Empty when `target` is not later than `last`.
pub fn missing_months(last: CalendarMonth, target: CalendarMonth) -> Vec<CalendarMonth> {
    let mut months = Vec::new();
    let mut month = last.succ();
    while month < target {
        months.push(month);
        month = month.succ();
    }
    months
}

/// Months with no record between the first and last month of `records`.
pub fn detect_gaps(records: &[MeasurementRecord]) -> Vec<CalendarMonth> {
    let covered: BTreeSet<CalendarMonth> = records.iter().map(|r| r.month()).collect();

    let (Some(&first), Some(&last)) = (covered.first(), covered.last()) else {
        return Vec::new();
    };

    let mut gaps = missing_months(first, last);
    gaps.retain(|m| !covered.contains(m));
    gaps
}

// ---------------------------------------------------------------------------
// Absence synthesis
// ---------------------------------------------------------------------------

/// Build the absence record for `month`, cloning the demographics of
/// `template`.
///
/// Measurements are zeroed, blood pressure is absent and age is taken as of
/// the first day of `month`.
pub fn synthesize_absence(
    template: &MeasurementRecord,
    month: CalendarMonth,
    recorder: &str,
) -> MeasurementRecord {
    let observed_on = month.first_day();
    let profile = template.profile.clone();

    MeasurementRecord {
        id: RecordId::generate(&profile.subject_id, observed_on),
        age: age_as_of(profile.date_of_birth, Some(observed_on)),
        profile,
        observed_on,
        weight: 0.0,
        height: ABSENCE_HEIGHT_SENTINEL,
        bmi: 0.0,
        waist: 0.0,
        blood_pressure: None,
        motive: NO_SHOW.to_string(),
        recorded_by: recorder.to_string(),
        classification: None,
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Backfills missed months against a [`RecordStore`].
///
/// Holds no record cache: every call reads the latest record fresh.
/// Calls for the same subject must be serialized by the caller.
pub struct ContinuityEngine<S> {
    store: S,
    config: ContinuityConfig,
}

impl<S: RecordStore> ContinuityEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ContinuityConfig::default())
    }

    pub fn with_config(store: S, config: ContinuityConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ContinuityConfig {
        &self.config
    }

    /// Fill every month between the subject's latest record and `target`
    /// with an absence record.
    ///
    /// Reconciling a month that is already recorded performs no writes.
    /// A latest record later than `target` means there is nothing to fill.
    ///
    /// # Errors
    ///
    /// A failed fetch is returned as-is. A failed append stops the backfill
    /// and returns `FitnessError::BackfillInterrupted`; records appended
    /// before the failure stay in the store.
    pub fn reconcile(&self, subject: &SubjectId, target: CalendarMonth) -> Result<ReconcileOutcome> {
        let Some(latest) = self.store.fetch_latest(subject)? else {
            log::info!("reconcile {subject} {target}: no history, nothing to backfill");
            return Ok(ReconcileOutcome {
                already_recorded: false,
                created: 0,
                latest_month: None,
            });
        };

        let latest_month = latest.month();
        let mut outcome = ReconcileOutcome {
            already_recorded: latest_month == target,
            created: 0,
            latest_month: Some(latest_month),
        };

        if outcome.already_recorded {
            log::debug!("reconcile {subject} {target}: already recorded");
            return Ok(outcome);
        }
        if latest_month > target {
            log::warn!(
                "reconcile {subject} {target}: latest record is {latest_month}, nothing to fill"
            );
            return Ok(outcome);
        }

        for month in missing_months(latest_month, target) {
            let absence = synthesize_absence(&latest, month, &self.config.recorder);

            if let Err(e) = self.store.append(&absence) {
                log::warn!(
                    "reconcile {subject} {target}: append for {month} failed after {} record(s): {e}",
                    outcome.created
                );
                return Err(FitnessError::BackfillInterrupted {
                    created: outcome.created,
                    month: month.to_string(),
                    source: Box::new(e),
                });
            }

            log::debug!("reconcile {subject}: absence {} for {month}", absence.id);
            outcome.created += 1;
        }

        log::info!(
            "reconcile {subject} {target}: {} absence record(s) created",
            outcome.created
        );
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

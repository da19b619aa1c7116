//! Monthly continuity — gap detection and absence backfill.
//!
//! The continuity module provides:
//! - Calendar month iteration between a last known month and a target
//! - Absence record synthesis from the last known demographics
//! - Reconciliation against a [`RecordStore`](crate::storage::RecordStore)
//! - Gap detection over a stored history

pub mod engine;
pub mod types;

pub use types::{ContinuityConfig, ReconcileOutcome, ABSENCE_HEIGHT_SENTINEL, SYSTEM_RECORDER};

pub use engine::{detect_gaps, missing_months, synthesize_absence, ContinuityEngine};

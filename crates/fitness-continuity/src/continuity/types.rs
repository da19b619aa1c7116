//! Data structures for monthly continuity.

use serde::{Deserialize, Serialize};

use crate::time::CalendarMonth;

/// Recorder identity stamped on synthesized records by default.
pub const SYSTEM_RECORDER: &str = "SISTEMA";

/// Height given to synthesized records so BMI never divides by zero.
pub const ABSENCE_HEIGHT_SENTINEL: f64 = 0.01;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuityConfig {
    /// Written to `recorded_by` on every absence record.
    pub recorder: String,
}

impl Default for ContinuityConfig {
    fn default() -> Self {
        Self {
            recorder: SYSTEM_RECORDER.to_string(),
        }
    }
}

/// Result of reconciling one subject up to a target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// The latest record already falls in the target month.
    pub already_recorded: bool,
    /// Absence records appended by this call.
    pub created: u32,
    /// Month of the latest record before reconciling, if there was one.
    pub latest_month: Option<CalendarMonth>,
}

impl ReconcileOutcome {
    /// Whether the latest record is later than `target` (an out-of-order
    /// request).
    pub fn is_behind(&self, target: CalendarMonth) -> bool {
        self.latest_month.is_some_and(|latest| latest > target)
    }
}

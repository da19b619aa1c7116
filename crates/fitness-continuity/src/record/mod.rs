//! Measurement records, subject identity, and the value types they carry.

pub mod measurement;
pub mod types;

pub use measurement::{MeasurementRecord, SubjectProfile};
pub use types::{bp_text, BloodPressure, RecordId, Sex, SubjectId};

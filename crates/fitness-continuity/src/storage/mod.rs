//! Storage layer for measurement records.
//!
//! The continuity engine only needs two capabilities from its environment,
//! expressed by [`RecordStore`]: read the most recently appended record of a
//! subject and append a new one.
//!
//! # Directory layout
//!
//! [`JsonRecordStore`] keeps one file per subject:
//!
//! ```text
//! ~/.fitcon/records/
//! ├── {subject_id}.json
//! └── {subject_id}.json
//! ```
//!
//! # Modules
//!
//! - [`record_store`] — filesystem store, one JSON file per subject.
//! - [`memory_store`] — in-process store for tests and embedding.

pub mod memory_store;
pub mod record_store;

pub use memory_store::MemoryRecordStore;
pub use record_store::JsonRecordStore;

use crate::error::Result;
use crate::record::{MeasurementRecord, SubjectId};

/// Append-only record storage.
///
/// "Latest" means last appended, not latest observation date.
pub trait RecordStore {
    /// The most recently appended record of `subject`, if any.
    fn fetch_latest(&self, subject: &SubjectId) -> Result<Option<MeasurementRecord>>;

    /// Durably append `record` to its subject's series.
    fn append(&self, record: &MeasurementRecord) -> Result<()>;

    /// Every record of `subject` in append order.
    fn history(&self, subject: &SubjectId) -> Result<Vec<MeasurementRecord>>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn fetch_latest(&self, subject: &SubjectId) -> Result<Option<MeasurementRecord>> {
        (**self).fetch_latest(subject)
    }

    fn append(&self, record: &MeasurementRecord) -> Result<()> {
        (**self).append(record)
    }

    fn history(&self, subject: &SubjectId) -> Result<Vec<MeasurementRecord>> {
        (**self).history(subject)
    }
}

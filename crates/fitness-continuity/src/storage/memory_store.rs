//! In-process record store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{FitnessError, Result};
use crate::record::{MeasurementRecord, SubjectId};

use super::RecordStore;

/// `RecordStore` held in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    series: Mutex<HashMap<SubjectId, Vec<MeasurementRecord>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all subjects.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.values().map(Vec::len).sum())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SubjectId, Vec<MeasurementRecord>>>> {
        self.series
            .lock()
            .map_err(|_| FitnessError::StorageError("memory store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryRecordStore {
    fn fetch_latest(&self, subject: &SubjectId) -> Result<Option<MeasurementRecord>> {
        Ok(self
            .lock()?
            .get(subject)
            .and_then(|records| records.last().cloned()))
    }

    fn append(&self, record: &MeasurementRecord) -> Result<()> {
        self.lock()?
            .entry(record.subject_id().clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn history(&self, subject: &SubjectId) -> Result<Vec<MeasurementRecord>> {
        Ok(self.lock()?.get(subject).cloned().unwrap_or_default())
    }
}

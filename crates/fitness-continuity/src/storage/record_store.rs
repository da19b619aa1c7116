//! Record persistence — one JSON file per subject.
//!
//! Each subject's series is stored as `{subject_id}.json` inside the
//! configured base directory, records in append order.
//!
//! File format:
//! ```json
//! {
//!     "version": 1,
//!     "subject": "4471",
//!     "records": [ { ... MeasurementRecord ... } ]
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FitnessError, Result};
use crate::record::{MeasurementRecord, SubjectId};
use crate::time::CalendarMonth;

use super::RecordStore;

// ── File format constants ─────────────────────────────────────────────────────

const RECORD_FILE_VERSION: u32 = 1;

// ── On-disk structure ─────────────────────────────────────────────────────────

/// Wrapper written to disk for each subject.
#[derive(Debug, Serialize, Deserialize)]
struct SubjectFile {
    /// Format version number.
    version: u32,
    /// Owner of every record in the file.
    subject: SubjectId,
    /// Records in append order.
    records: Vec<MeasurementRecord>,
}

// ── JsonRecordStore ───────────────────────────────────────────────────────────

/// Filesystem-backed store for `MeasurementRecord` series.
///
/// The store is safe for single-process use; concurrent writes from
/// multiple processes are not coordinated.
pub struct JsonRecordStore {
    base_dir: PathBuf,
}

impl JsonRecordStore {
    /// Create a new `JsonRecordStore` rooted at `base_dir`.
    ///
    /// The directory and any missing parents are created if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `FitnessError::Io` if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// List the ids of every subject with at least one stored record,
    /// sorted.
    ///
    /// # Errors
    ///
    /// Returns `FitnessError::Io` if the directory cannot be read.
    pub fn subjects(&self) -> Result<Vec<SubjectId>> {
        let mut ids = Vec::new();

        for entry in std::fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(stem) = name_str.strip_suffix(".json") {
                ids.push(SubjectId(stem.to_string()));
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Every record observed in `month`, across all subjects.
    ///
    /// Unreadable subject files are skipped with a warning.
    pub fn records_in_month(&self, month: CalendarMonth) -> Result<Vec<MeasurementRecord>> {
        let mut records = Vec::new();

        for subject in self.subjects()? {
            match self.history(&subject) {
                Ok(history) => {
                    records.extend(history.into_iter().filter(|r| month.contains(r.observed_on)))
                }
                Err(e) => log::warn!("skipping subject {subject}: {e}"),
            }
        }

        Ok(records)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Build the filesystem path for a subject, rejecting ids that would
    /// escape the base directory.
    fn subject_path(&self, id: &SubjectId) -> Result<PathBuf> {
        let raw = id.as_str();
        let unsafe_id = raw.trim().is_empty()
            || raw.starts_with('.')
            || raw.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
            || raw.contains("..");
        if unsafe_id {
            return Err(FitnessError::InvalidSubject(raw.to_string()));
        }
        Ok(self.base_dir.join(format!("{raw}.json")))
    }

    fn load_file(&self, id: &SubjectId) -> Result<Option<SubjectFile>> {
        let path = self.subject_path(id)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        let file: SubjectFile = serde_json::from_slice(&bytes).map_err(|e| {
            FitnessError::InvalidFileFormat(format!(
                "failed to parse record file {}: {e}",
                path.display()
            ))
        })?;

        if file.version != RECORD_FILE_VERSION {
            return Err(FitnessError::InvalidFileFormat(format!(
                "unsupported record file version {} in {}",
                file.version,
                path.display()
            )));
        }

        Ok(Some(file))
    }
}

impl RecordStore for JsonRecordStore {
    fn fetch_latest(&self, subject: &SubjectId) -> Result<Option<MeasurementRecord>> {
        Ok(self
            .load_file(subject)?
            .and_then(|mut file| file.records.pop()))
    }

    /// Rewrites `{base_dir}/{subject_id}.json` with the record appended.
    ///
    /// # Errors
    ///
    /// Returns `FitnessError::SerializationError` if JSON serialization fails,
    /// `FitnessError::InvalidFileFormat` if the existing file is corrupt, or
    /// `FitnessError::Io` for filesystem errors.
    fn append(&self, record: &MeasurementRecord) -> Result<()> {
        let subject = record.subject_id();
        let mut file = self.load_file(subject)?.unwrap_or_else(|| SubjectFile {
            version: RECORD_FILE_VERSION,
            subject: subject.clone(),
            records: Vec::new(),
        });
        file.records.push(record.clone());

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| FitnessError::SerializationError(e.to_string()))?;

        let path = self.subject_path(subject)?;
        std::fs::write(&path, json.as_bytes())?;

        Ok(())
    }

    fn history(&self, subject: &SubjectId) -> Result<Vec<MeasurementRecord>> {
        Ok(self
            .load_file(subject)?
            .map(|file| file.records)
            .unwrap_or_default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

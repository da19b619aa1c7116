//! Error types for fitness-continuity.
//!
//! Classification never fails; every error here comes from parsing
//! external text or from the record store.

/// Error types covering parsing, storage, and reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum FitnessError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid subject id: {0}")]
    InvalidSubject(String),

    #[error("Month {month} already recorded for subject {subject}")]
    AlreadyRecorded { subject: String, month: String },

    #[error("Backfill stopped at {month} after {created} absence record(s): {source}")]
    BackfillInterrupted {
        created: u32,
        month: String,
        #[source]
        source: Box<FitnessError>,
    },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, FitnessError>;

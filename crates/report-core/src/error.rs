use thiserror::Error;

/// Failures of the draft persistence medium.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },
    #[error("Draft `{key}` is unreadable: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by the permanent-save collaborator.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SubmitError(pub String);

impl SubmitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Save failed: {0}")]
    SaveFailed(#[from] SubmitError),
    #[error("Report is open in read-only mode")]
    ReadOnly,
    #[error("Editing session is closed")]
    SessionClosed,
    #[error("Row id `{0}` is used more than once")]
    DuplicateRowId(String),
}

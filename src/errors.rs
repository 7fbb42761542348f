use report_config::ConfigError;
use report_core::{CoreError, EditRejection, StorageError};
use thiserror::Error;

/// Every failure the report tools can run into.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Edit rejected: {0}")]
    Rejected(#[from] EditRejection),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub mod repository;

pub use repository::{LocalConfigCache, RemoteConfigStore};

/// Failures from the storage collaborators. Callers above the persistence
/// adapter never see these; they are logged and recovered from.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
    #[error("Stored document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Local cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinervaError {
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Create failed: {0}")]
    CreateFailed(String),

    #[error("Task created, participants not attached: {0}")]
    ParticipantAttachFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

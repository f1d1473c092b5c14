/// Error types for the media ingest service
///
/// Every stage of the ingest workflow reports one of these kinds. The
/// workflow logs and re-raises them unchanged; the Lambda entry point turns
/// them into an invocation failure.
use s3_utils::S3Error;
use thiserror::Error;

/// Result type for media-ingest-service operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Source object does not exist
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Credentials or policy do not allow the call
    #[error("Access denied: {0}")]
    Access(String),

    /// Moderation service could not parse the asset
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Image library could not decode the asset
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Output store rejected the artifact
    #[error("Failed to write artifact: {0}")]
    Write(String),

    /// Notification channel rejected the alert
    #[error("Failed to publish alert: {0}")]
    Notify(String),

    /// Network or service fault
    #[error("Transient service error: {0}")]
    Transient(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IngestError {
    /// Stable label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            IngestError::NotFound { .. } => "not_found",
            IngestError::Access(_) => "access",
            IngestError::UnsupportedFormat(_) => "unsupported_format",
            IngestError::Decode(_) => "decode",
            IngestError::Write(_) => "write",
            IngestError::Notify(_) => "notify",
            IngestError::Transient(_) => "transient",
            IngestError::InvalidEvent(_) => "invalid_event",
            IngestError::Config(_) => "config",
            IngestError::Internal(_) => "internal",
        }
    }
}

/// Read-side mapping; write failures are mapped to [`IngestError::Write`]
/// at the call site.
impl From<S3Error> for IngestError {
    fn from(err: S3Error) -> Self {
        match err {
            S3Error::NotFound { bucket, key } => IngestError::NotFound { bucket, key },
            S3Error::AccessDenied { .. } => IngestError::Access(err.to_string()),
            S3Error::Body { .. } | S3Error::Transient { .. } => {
                IngestError::Transient(err.to_string())
            }
        }
    }
}

impl From<envy::Error> for IngestError {
    fn from(err: envy::Error) -> Self {
        IngestError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::InvalidEvent(err.to_string())
    }
}

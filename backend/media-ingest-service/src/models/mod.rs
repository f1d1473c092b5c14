//! Data model for the ingest workflow
//!
//! Trigger payloads, the per-record work item, and the values passed
//! between workflow stages.

pub mod event;
pub mod moderation;

pub use event::IngestEvent;
pub use moderation::{AlertMessage, ModerationLabel, ModerationVerdict};

use crate::error::{IngestError, Result};
use bytes::Bytes;
use serde::Serialize;

/// Content type of every stored artifact
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// One newly stored object to moderate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestRecord {
    pub bucket: String,
    pub key: String,
}

impl IngestRecord {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        let key = key.into();

        if bucket.trim().is_empty() {
            return Err(IngestError::InvalidEvent("record has an empty bucket name".into()));
        }
        if key.is_empty() {
            return Err(IngestError::InvalidEvent(format!(
                "record for bucket {bucket} has an empty object key"
            )));
        }

        Ok(Self { bucket, key })
    }
}

/// Raw bytes of a fetched object
#[derive(Debug, Clone)]
pub struct RawAsset {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl RawAsset {
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// JPEG copy of a safe image, bounded to the configured dimension
#[derive(Debug, Clone)]
pub struct ProcessedArtifact {
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
}

impl ProcessedArtifact {
    pub fn content_type(&self) -> &'static str {
        JPEG_CONTENT_TYPE
    }
}

/// What happened to a record that went through the workflow
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// Safe image stored under `destination_key` in the output bucket
    Published {
        destination_key: String,
        width: u32,
        height: u32,
        size: usize,
    },
    /// Unsafe image reported to the alert channel
    Alerted { labels: Vec<ModerationLabel> },
}

impl RecordOutcome {
    pub fn is_alert(&self) -> bool {
        matches!(self, RecordOutcome::Alerted { .. })
    }
}

/// Invocation response on full success
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub status_code: u16,
    pub body: String,
}

impl IngestResponse {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: "Success".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rejects_empty_fields() {
        assert!(IngestRecord::new("", "a.jpg").is_err());
        assert!(IngestRecord::new("in", "").is_err());
        assert!(IngestRecord::new("in", "a.jpg").is_ok());
    }

    #[test]
    fn test_success_response_shape() {
        let json = serde_json::to_value(IngestResponse::success()).unwrap();
        assert_eq!(json, serde_json::json!({"statusCode": 200, "body": "Success"}));
    }
}

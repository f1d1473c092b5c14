//! S3 object-created trigger payloads
use super::IngestRecord;
use crate::error::{IngestError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Invocation payload.
///
/// S3 notifications wrap records in a `Records` envelope; direct
/// invocations may pass the bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IngestEvent {
    Notification {
        #[serde(rename = "Records")]
        records: Vec<S3EventRecord>,
    },
    Records(Vec<S3EventRecord>),
}

#[derive(Debug, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3ObjectRef,
}

#[derive(Debug, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct S3ObjectRef {
    pub key: String,
}

impl IngestEvent {
    pub fn from_value(payload: Value) -> Result<Self> {
        serde_json::from_value(payload).map_err(|e| {
            IngestError::InvalidEvent(format!("payload is not an S3 notification: {e}"))
        })
    }

    /// Work items in delivery order
    pub fn into_records(self) -> Result<Vec<IngestRecord>> {
        let records = match self {
            IngestEvent::Notification { records } => records,
            IngestEvent::Records(records) => records,
        };

        records
            .into_iter()
            .map(|record| {
                let key = decode_object_key(&record.s3.object.key)?;
                IngestRecord::new(record.s3.bucket.name, key)
            })
            .collect()
    }
}

/// S3 notifications form-encode object keys: spaces arrive as `+`, other
/// reserved bytes as `%XX`.
pub fn decode_object_key(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|e| IngestError::InvalidEvent(format!("object key {raw:?} is not valid UTF-8: {e}")))
}

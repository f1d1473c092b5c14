//! Media Ingest Service - moderation gate for newly uploaded images
//!
//! Triggered by S3 object-created notifications. For every record it:
//! - downloads the object from S3
//! - scans it with Rekognition moderation labels
//! - stores a bounded JPEG copy in the output bucket when the image is safe
//! - publishes an SNS alert instead when any label crosses the confidence floor

pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod services;
pub mod workflow;

pub use config::Config;
pub use error::{IngestError, Result};
pub use handler::{handle_event, process_payload};
pub use models::{
    AlertMessage, IngestEvent, IngestRecord, IngestResponse, ModerationLabel, ModerationVerdict,
    ProcessedArtifact, RawAsset, RecordOutcome,
};
pub use workflow::{Collaborators, MediaIngestWorkflow, Stage};

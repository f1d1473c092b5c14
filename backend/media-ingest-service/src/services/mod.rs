//! Workflow collaborators
//!
//! Each stage sits behind a trait so the workflow can run against AWS in
//! production and against test doubles elsewhere:
//! - storage: S3 object fetch and artifact upload
//! - moderation: Rekognition moderation labels
//! - thumbnail: bounded JPEG re-encoding
//! - alert: SNS notifications
//! - publisher: artifact-or-alert routing

pub mod alert;
pub mod moderation;
pub mod publisher;
pub mod storage;
pub mod thumbnail;

pub use alert::{AlertNotifier, SnsNotifier};
pub use moderation::{ModerationScanner, RekognitionScanner};
pub use publisher::{destination_key, PublisherConfig, ResultPublisher};
pub use storage::{ArtifactStore, ObjectFetcher, S3ObjectStore};
pub use thumbnail::{calculate_dimensions, ThumbnailConfig, ThumbnailProcessor, ThumbnailTransformer};

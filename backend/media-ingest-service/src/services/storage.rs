//! Object storage collaborators backed by S3
use crate::error::{IngestError, Result};
use crate::models::{ProcessedArtifact, RawAsset};
use async_trait::async_trait;
use s3_utils::{S3Client, S3Operations};
use tracing::debug;

/// Reads source objects
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<RawAsset>;
}

/// Writes processed artifacts
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, bucket: &str, key: &str, artifact: &ProcessedArtifact) -> Result<()>;
}

/// S3-backed fetcher and artifact store
#[derive(Clone)]
pub struct S3ObjectStore {
    operations: S3Operations,
}

impl S3ObjectStore {
    pub fn new(client: &S3Client) -> Self {
        Self {
            operations: client.operations(),
        }
    }
}

#[async_trait]
impl ObjectFetcher for S3ObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<RawAsset> {
        let object = self.operations.get_object(bucket, key).await?;
        Ok(RawAsset::new(object.body, object.content_type))
    }
}

#[async_trait]
impl ArtifactStore for S3ObjectStore {
    async fn put(&self, bucket: &str, key: &str, artifact: &ProcessedArtifact) -> Result<()> {
        self.operations
            .put_object(bucket, key, artifact.bytes.clone(), artifact.content_type())
            .await
            .map_err(|e| IngestError::Write(e.to_string()))?;

        debug!(bucket = %bucket, key = %key, "Artifact stored");
        Ok(())
    }
}

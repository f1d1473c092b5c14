//! Publishes the result of a moderated record: a stored artifact for safe
//! images, an alert for unsafe ones. Never both for the same record.
use super::alert::AlertNotifier;
use super::storage::ArtifactStore;
use crate::error::Result;
use crate::models::{AlertMessage, IngestRecord, ModerationVerdict, ProcessedArtifact};
use std::sync::Arc;
use tracing::{info, warn};

/// Output locations for published results
#[derive(Clone, Debug)]
pub struct PublisherConfig {
    pub output_bucket: String,
    pub output_prefix: String,
    pub alert_topic: String,
}

pub struct ResultPublisher {
    store: Arc<dyn ArtifactStore>,
    notifier: Arc<dyn AlertNotifier>,
    config: PublisherConfig,
}

impl ResultPublisher {
    pub fn new(
        store: Arc<dyn ArtifactStore>,
        notifier: Arc<dyn AlertNotifier>,
        config: PublisherConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Store the artifact next to its source path under the output prefix.
    /// Returns the destination key.
    pub async fn publish_artifact(
        &self,
        artifact: &ProcessedArtifact,
        source_key: &str,
    ) -> Result<String> {
        let destination_key = destination_key(&self.config.output_prefix, source_key);

        self.store
            .put(&self.config.output_bucket, &destination_key, artifact)
            .await?;

        info!(
            output_bucket = %self.config.output_bucket,
            destination_key = %destination_key,
            size = artifact.bytes.len(),
            "Image resized and saved"
        );
        Ok(destination_key)
    }

    pub async fn publish_alert(
        &self,
        record: &IngestRecord,
        verdict: &ModerationVerdict,
    ) -> Result<AlertMessage> {
        let message = AlertMessage::for_record(record, verdict, &self.config.alert_topic);

        self.notifier.notify(&message).await?;

        warn!(
            topic_arn = %self.config.alert_topic,
            label_count = verdict.labels().len(),
            "Moderation alert sent"
        );
        Ok(message)
    }
}

/// Output key for a source key; path structure is preserved
pub fn destination_key(prefix: &str, source_key: &str) -> String {
    format!("{prefix}{source_key}")
}

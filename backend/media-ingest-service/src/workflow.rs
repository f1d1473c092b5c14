//! Media ingest workflow
//!
//! Runs each record through fetch → moderation scan → either
//! resize-and-store or alert. Records are processed strictly one after
//! another; the first failure is logged and returned, and the remaining
//! records of the batch are not touched.

use crate::config::Config;
use crate::error::{IngestError, Result};
use crate::models::{IngestRecord, ProcessedArtifact, RawAsset, RecordOutcome};
use crate::services::{
    AlertNotifier, ArtifactStore, ModerationScanner, ObjectFetcher, PublisherConfig,
    ResultPublisher, ThumbnailTransformer,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Collaborator handles, built once per process
#[derive(Clone)]
pub struct Collaborators {
    pub fetcher: Arc<dyn ObjectFetcher>,
    pub scanner: Arc<dyn ModerationScanner>,
    pub transformer: Arc<dyn ThumbnailTransformer>,
    pub store: Arc<dyn ArtifactStore>,
    pub notifier: Arc<dyn AlertNotifier>,
}

/// Where a record is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Scanning,
    Transforming,
    Alerting,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Scanning => "scanning",
            Stage::Transforming => "transforming",
            Stage::Alerting => "alerting",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub struct MediaIngestWorkflow {
    fetcher: Arc<dyn ObjectFetcher>,
    scanner: Arc<dyn ModerationScanner>,
    transformer: Arc<dyn ThumbnailTransformer>,
    publisher: ResultPublisher,
    min_confidence: f32,
    max_dimension: u32,
}

impl MediaIngestWorkflow {
    pub fn new(collaborators: Collaborators, config: &Config) -> Self {
        let publisher = ResultPublisher::new(
            collaborators.store,
            collaborators.notifier,
            PublisherConfig {
                output_bucket: config.output_bucket.clone(),
                output_prefix: config.output_prefix.clone(),
                alert_topic: config.sns_topic_arn.clone(),
            },
        );

        Self {
            fetcher: collaborators.fetcher,
            scanner: collaborators.scanner,
            transformer: collaborators.transformer,
            publisher,
            min_confidence: config.min_confidence,
            max_dimension: config.max_dimension,
        }
    }

    /// Process records in order, stopping at the first failure
    pub async fn process_batch(&self, records: &[IngestRecord]) -> Result<Vec<RecordOutcome>> {
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records {
            outcomes.push(self.process_record(record).await?);
        }

        let alerted = outcomes.iter().filter(|o| o.is_alert()).count();
        info!(
            records = outcomes.len(),
            published = outcomes.len() - alerted,
            alerted,
            "Batch processed"
        );

        Ok(outcomes)
    }

    /// Run a single record through the workflow
    pub async fn process_record(&self, record: &IngestRecord) -> Result<RecordOutcome> {
        let span = info_span!("ingest_record", bucket = %record.bucket, key = %record.key);

        async move {
            info!("Processing image");

            let mut stage = Stage::Fetching;
            match self.run_stages(record, &mut stage).await {
                Ok(outcome) => {
                    debug!(stage = %Stage::Done, "Record completed");
                    Ok(outcome)
                }
                Err(e) => {
                    error!(
                        stage = %Stage::Failed,
                        failed_during = %stage,
                        error_kind = e.kind(),
                        error = %e,
                        "Error processing image"
                    );
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_stages(&self, record: &IngestRecord, stage: &mut Stage) -> Result<RecordOutcome> {
        *stage = Stage::Fetching;
        let asset = self.fetcher.fetch(&record.bucket, &record.key).await?;
        info!(
            size = asset.len(),
            content_type = ?asset.content_type,
            "Image downloaded successfully"
        );

        *stage = Stage::Scanning;
        let verdict = self.scanner.scan(&asset, self.min_confidence).await?;
        info!(labels = %verdict.labels_json(), "Moderation labels received");

        if verdict.is_unsafe() {
            *stage = Stage::Alerting;
            warn!(
                label_count = verdict.labels().len(),
                "Unsafe content detected, skipping resize"
            );
            self.publisher.publish_alert(record, &verdict).await?;

            return Ok(RecordOutcome::Alerted {
                labels: verdict.into_labels(),
            });
        }

        *stage = Stage::Transforming;
        let artifact = self.transform(asset).await?;
        let destination_key = self.publisher.publish_artifact(&artifact, &record.key).await?;

        Ok(RecordOutcome::Published {
            destination_key,
            width: artifact.width,
            height: artifact.height,
            size: artifact.bytes.len(),
        })
    }

    /// Decoding and encoding are CPU-bound; run them on the blocking pool
    async fn transform(&self, asset: RawAsset) -> Result<ProcessedArtifact> {
        let transformer = Arc::clone(&self.transformer);
        let max_dimension = self.max_dimension;

        tokio::task::spawn_blocking(move || transformer.resize(&asset, max_dimension))
            .await
            .map_err(|e| IngestError::Internal(format!("Thumbnail task panicked: {e}")))?
    }
}

//! Media Ingest Worker - Lambda function for S3 object-created events
//!
//! Environment variables:
//! - OUTPUT_BUCKET: Bucket receiving resized copies (required)
//! - SNS_TOPIC_ARN: Topic receiving moderation alerts (required)
//! - TABLE_NAME: Processing-history table (optional, unused)
//! - MIN_CONFIDENCE: Moderation confidence floor 0-100 (default: 70)
//! - MAX_DIMENSION: Longest edge of stored copies (default: 1024)
//! - JPEG_QUALITY: JPEG quality 1-100 (default: 75)
//! - OUTPUT_PREFIX: Key prefix in the output bucket (default: "processed/")
//! - S3_ENDPOINT / S3_PATH_STYLE: S3 endpoint overrides for local stacks

use anyhow::Context;
use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use media_ingest_service::services::{
    RekognitionScanner, S3ObjectStore, SnsNotifier, ThumbnailConfig, ThumbnailProcessor,
};
use media_ingest_service::{handle_event, Collaborators, Config, MediaIngestWorkflow};
use s3_utils::{S3Client, S3Config};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("media_ingest_service=info,s3_utils=info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        service = %config.service_name,
        output_bucket = %config.output_bucket,
        sns_topic_arn = %config.sns_topic_arn,
        table_name = ?config.table_name,
        min_confidence = config.min_confidence,
        max_dimension = config.max_dimension,
        "Configuration loaded"
    );

    // Clients are shared across invocations of this execution environment
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_client = S3Client::from_sdk_config(&sdk_config, S3Config::from_env());
    let object_store = Arc::new(S3ObjectStore::new(&s3_client));

    let collaborators = Collaborators {
        fetcher: object_store.clone(),
        store: object_store,
        scanner: Arc::new(RekognitionScanner::new(aws_sdk_rekognition::Client::new(
            &sdk_config,
        ))),
        transformer: Arc::new(ThumbnailProcessor::new(ThumbnailConfig {
            quality: config.jpeg_quality,
        })),
        notifier: Arc::new(SnsNotifier::new(aws_sdk_sns::Client::new(&sdk_config))),
    };

    let workflow = MediaIngestWorkflow::new(collaborators, &config);
    info!("Media ingest worker ready");

    run(service_fn(|event: LambdaEvent<Value>| handle_event(&workflow, event))).await
}

//! Shared fixtures for media-ingest-service integration tests
//!
//! In-memory stand-ins for S3, Rekognition and SNS that record every call
//! so tests can assert which stages ran.
#![allow(dead_code)]

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use media_ingest_service::services::{
    AlertNotifier, ArtifactStore, ModerationScanner, ObjectFetcher, ThumbnailProcessor,
    ThumbnailTransformer,
};
use media_ingest_service::{
    AlertMessage, Collaborators, Config, IngestError, IngestRecord, MediaIngestWorkflow,
    ModerationLabel, ModerationVerdict, ProcessedArtifact, RawAsset, Result,
};
use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const OUTPUT_BUCKET: &str = "media-out";
pub const ALERT_TOPIC: &str = "arn:aws:sns:us-east-1:123456789012:moderation-alerts";

pub fn test_config() -> Config {
    Config::from_vars(vec![
        ("OUTPUT_BUCKET".to_string(), OUTPUT_BUCKET.to_string()),
        ("SNS_TOPIC_ARN".to_string(), ALERT_TOPIC.to_string()),
    ])
    .expect("valid test config")
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .expect("encode test jpeg");
    buf
}

pub fn record(bucket: &str, key: &str) -> IngestRecord {
    IngestRecord::new(bucket, key).expect("valid record")
}

// ============================================
// Storage
// ============================================

#[derive(Default)]
pub struct FakeStorage {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    fetched: Mutex<Vec<String>>,
    stored: Mutex<Vec<(String, String, ProcessedArtifact)>>,
    fail_writes: bool,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), bytes);
    }

    /// Keys passed to `fetch`, in call order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    /// `(bucket, key, artifact)` for every successful `put`
    pub fn stored(&self) -> Vec<(String, String, ProcessedArtifact)> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectFetcher for FakeStorage {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<RawAsset> {
        self.fetched.lock().unwrap().push(key.to_string());

        let objects = self.objects.lock().unwrap();
        match objects.get(&(bucket.to_string(), key.to_string())) {
            Some(bytes) => Ok(RawAsset::new(bytes.clone(), Some("image/jpeg".to_string()))),
            None => Err(IngestError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
        }
    }
}

#[async_trait]
impl ArtifactStore for FakeStorage {
    async fn put(&self, bucket: &str, key: &str, artifact: &ProcessedArtifact) -> Result<()> {
        if self.fail_writes {
            return Err(IngestError::Write(format!("s3://{bucket}/{key}: SlowDown")));
        }
        self.stored
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string(), artifact.clone()));
        Ok(())
    }
}

// ============================================
// Moderation
// ============================================

/// Returns scripted responses in order, then "no labels"
#[derive(Default)]
pub struct ScriptedScanner {
    responses: Mutex<VecDeque<Result<Vec<ModerationLabel>>>>,
    calls: AtomicUsize,
}

impl ScriptedScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_labels(self, labels: Vec<ModerationLabel>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(labels));
        self
    }

    pub fn then_error(self, err: IngestError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModerationScanner for ScriptedScanner {
    async fn scan(&self, _asset: &RawAsset, confidence_floor: f32) -> Result<ModerationVerdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        let labels = next.unwrap_or_else(|| Ok(Vec::new()))?;
        Ok(ModerationVerdict::from_labels(labels, confidence_floor))
    }
}

// ============================================
// Transformer
// ============================================

/// Real thumbnail processor that counts invocations
pub struct CountingTransformer {
    inner: ThumbnailProcessor,
    calls: AtomicUsize,
}

impl CountingTransformer {
    pub fn new() -> Self {
        Self {
            inner: ThumbnailProcessor::with_defaults(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ThumbnailTransformer for CountingTransformer {
    fn resize(&self, asset: &RawAsset, max_dimension: u32) -> Result<ProcessedArtifact> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resize(asset, max_dimension)
    }
}

// ============================================
// Alerts
// ============================================

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<AlertMessage>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<AlertMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertNotifier for RecordingNotifier {
    async fn notify(&self, message: &AlertMessage) -> Result<()> {
        if self.fail {
            return Err(IngestError::Notify("topic does not exist".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// ============================================
// Harness
// ============================================

pub struct Harness {
    pub storage: Arc<FakeStorage>,
    pub scanner: Arc<ScriptedScanner>,
    pub transformer: Arc<CountingTransformer>,
    pub notifier: Arc<RecordingNotifier>,
    pub workflow: MediaIngestWorkflow,
}

impl Harness {
    pub fn new(storage: FakeStorage, scanner: ScriptedScanner) -> Self {
        Self::with_notifier(storage, scanner, RecordingNotifier::new())
    }

    pub fn with_notifier(
        storage: FakeStorage,
        scanner: ScriptedScanner,
        notifier: RecordingNotifier,
    ) -> Self {
        let storage = Arc::new(storage);
        let scanner = Arc::new(scanner);
        let transformer = Arc::new(CountingTransformer::new());
        let notifier = Arc::new(notifier);

        let collaborators = Collaborators {
            fetcher: storage.clone(),
            store: storage.clone(),
            scanner: scanner.clone(),
            transformer: transformer.clone(),
            notifier: notifier.clone(),
        };

        Self {
            workflow: MediaIngestWorkflow::new(collaborators, &test_config()),
            storage,
            scanner,
            transformer,
            notifier,
        }
    }
}

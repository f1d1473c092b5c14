//! Configuration for the media ingest service
use crate::error::{IngestError, Result};
use serde::Deserialize;

/// Main configuration struct, loaded from environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bucket receiving resized copies of safe images
    pub output_bucket: String,

    /// SNS topic receiving moderation alerts
    pub sns_topic_arn: String,

    /// Processing-history table. Accepted for deployment parity, not used.
    #[serde(default)]
    pub table_name: Option<String>,

    /// Minimum moderation confidence (0-100) at which a label counts
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,

    /// Longest edge of the stored copy, in pixels
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// JPEG quality (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Prefix prepended to the source key in the output bucket
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_min_confidence() -> f32 {
    70.0
}

fn default_max_dimension() -> u32 {
    1024
}

fn default_jpeg_quality() -> u8 {
    75
}

fn default_output_prefix() -> String {
    "processed/".to_string()
}

fn default_service_name() -> String {
    "media-processor".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config: Config = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit `(NAME, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_bucket.trim().is_empty() {
            return Err(IngestError::Config("OUTPUT_BUCKET must not be empty".into()));
        }
        if self.sns_topic_arn.trim().is_empty() {
            return Err(IngestError::Config("SNS_TOPIC_ARN must not be empty".into()));
        }
        if !(0.0..=100.0).contains(&self.min_confidence) {
            return Err(IngestError::Config(format!(
                "MIN_CONFIDENCE must be within 0-100, got {}",
                self.min_confidence
            )));
        }
        if self.max_dimension == 0 {
            return Err(IngestError::Config("MAX_DIMENSION must be positive".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(IngestError::Config(format!(
                "JPEG_QUALITY must be within 1-100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

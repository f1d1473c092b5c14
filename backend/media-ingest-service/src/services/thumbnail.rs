//! Thumbnail processor - bounded-dimension JPEG copies of safe images
//!
//! Scales the longer edge down to the requested maximum while keeping the
//! aspect ratio. Images already within bounds keep their size; every
//! output is re-encoded as JPEG.

use crate::error::{IngestError, Result};
use crate::models::{ProcessedArtifact, RawAsset};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tracing::debug;

/// Decodes an image and produces a bounded re-encoded copy
pub trait ThumbnailTransformer: Send + Sync {
    fn resize(&self, asset: &RawAsset, max_dimension: u32) -> Result<ProcessedArtifact>;
}

/// Configuration for thumbnail generation
#[derive(Clone, Debug)]
pub struct ThumbnailConfig {
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self { quality: 75 }
    }
}

/// Thumbnail processor
pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
}

impl ThumbnailProcessor {
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ThumbnailConfig::default())
    }

    /// Generate a thumbnail from the given image data (blocking)
    pub fn generate(&self, original_data: &[u8], max_dimension: u32) -> Result<ProcessedArtifact> {
        let img = image::load_from_memory(original_data)
            .map_err(|e| IngestError::Decode(e.to_string()))?;

        let (orig_w, orig_h) = img.dimensions();
        let (new_w, new_h) = calculate_dimensions(orig_w, orig_h, max_dimension);

        debug!(
            original_width = orig_w,
            original_height = orig_h,
            width = new_w,
            height = new_h,
            "Processing image for thumbnail"
        );

        let img = if (new_w, new_h) == (orig_w, orig_h) {
            img
        } else {
            img.resize_exact(new_w, new_h, FilterType::CatmullRom)
        };

        let bytes = self.encode_jpeg(&img)?;

        debug!(size = bytes.len(), "Thumbnail generated");

        Ok(ProcessedArtifact {
            bytes,
            width: new_w,
            height: new_h,
        })
    }

    /// JPEG has no alpha channel, so everything is flattened to RGB first
    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Bytes> {
        let rgb = img.to_rgb8();
        let mut buf = Vec::new();

        JpegEncoder::new_with_quality(&mut buf, self.config.quality)
            .encode_image(&rgb)
            .map_err(|e| IngestError::Internal(format!("Failed to encode JPEG: {e}")))?;

        Ok(Bytes::from(buf))
    }
}

impl ThumbnailTransformer for ThumbnailProcessor {
    fn resize(&self, asset: &RawAsset, max_dimension: u32) -> Result<ProcessedArtifact> {
        self.generate(&asset.bytes, max_dimension)
    }
}

/// Target dimensions for a thumbnail: the longer edge becomes
/// `max_dimension` when it exceeds it, nothing is ever enlarged.
pub fn calculate_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    if width <= max_dimension && height <= max_dimension {
        return (width, height);
    }

    let scale = |edge: u32, longest: u32| -> u32 {
        let ratio = max_dimension as f64 / longest as f64;
        ((edge as f64 * ratio).round() as u32).max(1)
    };

    if width >= height {
        (max_dimension, scale(height, width))
    } else {
        (scale(width, height), max_dimension)
    }
}

//! Content moderation via Amazon Rekognition
use crate::error::{IngestError, Result};
use crate::models::{ModerationLabel, ModerationVerdict, RawAsset};
use async_trait::async_trait;
use aws_sdk_rekognition::config::http::HttpResponse;
use aws_sdk_rekognition::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_rekognition::operation::detect_moderation_labels::DetectModerationLabelsError;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::Image;
use aws_sdk_rekognition::Client;
use tracing::debug;

/// Classifies image bytes into flagged categories
#[async_trait]
pub trait ModerationScanner: Send + Sync {
    /// Labels with confidence >= `confidence_floor` (0-100)
    async fn scan(&self, asset: &RawAsset, confidence_floor: f32) -> Result<ModerationVerdict>;
}

pub struct RekognitionScanner {
    client: Client,
}

impl RekognitionScanner {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModerationScanner for RekognitionScanner {
    async fn scan(&self, asset: &RawAsset, confidence_floor: f32) -> Result<ModerationVerdict> {
        let image = Image::builder()
            .bytes(Blob::new(asset.bytes.to_vec()))
            .build();

        let response = self
            .client
            .detect_moderation_labels()
            .image(image)
            .min_confidence(confidence_floor)
            .send()
            .await
            .map_err(scan_error)?;

        let labels: Vec<ModerationLabel> = response
            .moderation_labels()
            .iter()
            .filter_map(|label| {
                let category = label.name().filter(|n| !n.is_empty())?;
                let mut parsed = ModerationLabel::new(category, label.confidence().unwrap_or(0.0));
                if let Some(parent) = label.parent_name().filter(|p| !p.is_empty()) {
                    parsed = parsed.with_parent(parent);
                }
                Some(parsed)
            })
            .collect();

        debug!(
            label_count = labels.len(),
            model_version = ?response.moderation_model_version(),
            "Rekognition moderation completed"
        );

        Ok(ModerationVerdict::from_labels(labels, confidence_floor))
    }
}

fn scan_error(err: SdkError<DetectModerationLabelsError, HttpResponse>) -> IngestError {
    let code = err
        .as_service_error()
        .and_then(|e| e.code())
        .map(|c| c.to_string());
    classify_scan_failure(code.as_deref(), DisplayErrorContext(&err).to_string())
}

fn classify_scan_failure(code: Option<&str>, message: String) -> IngestError {
    match code {
        Some("InvalidImageFormatException")
        | Some("ImageTooLargeException")
        | Some("InvalidParameterException") => IngestError::UnsupportedFormat(message),
        Some("AccessDeniedException") => IngestError::Access(message),
        _ => IngestError::Transient(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_image_codes() {
        for code in [
            "InvalidImageFormatException",
            "ImageTooLargeException",
            "InvalidParameterException",
        ] {
            let err = classify_scan_failure(Some(code), code.to_string());
            assert_eq!(err.kind(), "unsupported_format", "{code}");
        }
    }

    #[test]
    fn test_access_and_fallback_codes() {
        assert_eq!(
            classify_scan_failure(Some("AccessDeniedException"), String::new()).kind(),
            "access"
        );
        assert_eq!(
            classify_scan_failure(Some("ThrottlingException"), String::new()).kind(),
            "transient"
        );
        assert_eq!(classify_scan_failure(None, String::new()).kind(), "transient");
    }
}

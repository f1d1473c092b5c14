//! Moderation labels, verdicts and the alert raised for unsafe content
use super::IngestRecord;
use serde::Serialize;
use std::fmt;

pub const ALERT_SUBJECT: &str = "Content Moderation Alert";

/// A flagged content category with its confidence (0-100)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationLabel {
    pub category: String,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_category: Option<String>,
}

impl ModerationLabel {
    pub fn new(category: impl Into<String>, confidence: f32) -> Self {
        Self {
            category: category.into(),
            confidence,
            parent_category: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_category = Some(parent.into());
        self
    }
}

impl fmt::Display for ModerationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent_category {
            Some(parent) => write!(f, "{} / {} ({:.1})", parent, self.category, self.confidence),
            None => write!(f, "{} ({:.1})", self.category, self.confidence),
        }
    }
}

/// Labels at or above the confidence floor; any label makes the asset unsafe
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationVerdict {
    labels: Vec<ModerationLabel>,
    confidence_floor: f32,
}

impl ModerationVerdict {
    /// Build a verdict, dropping labels below `confidence_floor`
    pub fn from_labels(labels: Vec<ModerationLabel>, confidence_floor: f32) -> Self {
        let labels = labels
            .into_iter()
            .filter(|label| label.confidence >= confidence_floor)
            .collect();

        Self {
            labels,
            confidence_floor,
        }
    }

    pub fn safe(confidence_floor: f32) -> Self {
        Self::from_labels(Vec::new(), confidence_floor)
    }

    pub fn is_unsafe(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn labels(&self) -> &[ModerationLabel] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<ModerationLabel> {
        self.labels
    }

    pub fn confidence_floor(&self) -> f32 {
        self.confidence_floor
    }

    /// Labels as JSON for log lines
    pub fn labels_json(&self) -> String {
        serde_json::to_string(&self.labels).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Human-readable notification about an unsafe upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
    pub recipient_channel: String,
}

impl AlertMessage {
    pub fn for_record(
        record: &IngestRecord,
        verdict: &ModerationVerdict,
        recipient_channel: impl Into<String>,
    ) -> Self {
        let labels = verdict
            .labels()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            subject: ALERT_SUBJECT.to_string(),
            body: format!(
                "Warning: Unsafe content detected in s3://{}/{}. Labels: {}",
                record.bucket, record.key, labels
            ),
            recipient_channel: recipient_channel.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_is_inclusive() {
        let verdict = ModerationVerdict::from_labels(
            vec![
                ModerationLabel::new("Violence", 70.0),
                ModerationLabel::new("Suggestive", 69.9),
            ],
            70.0,
        );

        assert!(verdict.is_unsafe());
        assert_eq!(verdict.labels(), &[ModerationLabel::new("Violence", 70.0)]);
    }

    #[test]
    fn test_no_labels_is_safe() {
        assert!(!ModerationVerdict::safe(70.0).is_unsafe());

        let below = ModerationVerdict::from_labels(vec![ModerationLabel::new("Drugs", 12.5)], 70.0);
        assert!(!below.is_unsafe());
    }

    #[test]
    fn test_alert_lists_every_label() {
        let record = IngestRecord::new("in", "b.jpg").unwrap();
        let verdict = ModerationVerdict::from_labels(
            vec![
                ModerationLabel::new("Explicit", 91.2),
                ModerationLabel::new("Graphic Violence", 80.04).with_parent("Violence"),
            ],
            70.0,
        );

        let alert = AlertMessage::for_record(&record, &verdict, "arn:aws:sns:us-east-1:1:alerts");
        assert_eq!(alert.subject, "Content Moderation Alert");
        assert_eq!(alert.recipient_channel, "arn:aws:sns:us-east-1:1:alerts");
        assert_eq!(
            alert.body,
            "Warning: Unsafe content detected in s3://in/b.jpg. \
             Labels: Explicit (91.2), Violence / Graphic Violence (80.0)"
        );
    }

    #[test]
    fn test_labels_json() {
        let verdict =
            ModerationVerdict::from_labels(vec![ModerationLabel::new("Explicit", 91.5)], 70.0);
        assert_eq!(
            verdict.labels_json(),
            r#"[{"category":"Explicit","confidence":91.5}]"#
        );
    }
}

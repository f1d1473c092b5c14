//! Moderation alerts via Amazon SNS
use crate::error::{IngestError, Result};
use crate::models::AlertMessage;
use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;
use tracing::debug;

/// Delivers alert messages to their recipient channel
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, message: &AlertMessage) -> Result<()>;
}

pub struct SnsNotifier {
    client: Client,
}

impl SnsNotifier {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlertNotifier for SnsNotifier {
    async fn notify(&self, message: &AlertMessage) -> Result<()> {
        let response = self
            .client
            .publish()
            .topic_arn(&message.recipient_channel)
            .subject(&message.subject)
            .message(&message.body)
            .send()
            .await
            .map_err(|e| IngestError::Notify(DisplayErrorContext(&e).to_string()))?;

        debug!(
            topic_arn = %message.recipient_channel,
            message_id = ?response.message_id(),
            "Alert published"
        );
        Ok(())
    }
}

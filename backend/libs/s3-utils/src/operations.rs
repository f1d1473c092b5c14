/// S3 operations for media download and upload
use crate::error::S3Error;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// Object body with the metadata callers care about
#[derive(Debug, Clone)]
pub struct S3Object {
    pub body: Bytes,
    pub content_type: Option<String>,
}

#[derive(Clone)]
pub struct S3Operations {
    client: Arc<Client>,
}

impl S3Operations {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Download an object and buffer its body
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<S3Object, S3Error> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| S3Error::from_sdk(bucket, key, &e))?;

        let content_type = response.content_type().map(|s| s.to_string());

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| S3Error::Body {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?
            .into_bytes();

        debug!(
            bucket = %bucket,
            key = %key,
            size = body.len(),
            content_type = ?content_type,
            "Object downloaded"
        );

        Ok(S3Object { body, content_type })
    }

    /// Upload an object, replacing any existing one under the same key
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), S3Error> {
        let size = body.len();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| S3Error::from_sdk(bucket, key, &e))?;

        debug!(
            bucket = %bucket,
            key = %key,
            size,
            content_type = %content_type,
            "Object uploaded"
        );

        Ok(())
    }
}

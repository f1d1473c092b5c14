/// Shared S3 utilities for Nova media pipelines
///
/// Wraps the AWS S3 client with typed get/put operations and classifies
/// SDK failures into [`S3Error`] so callers can tell a missing object from
/// a permission problem or a transient fault.

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::Client;
use std::sync::Arc;
use tracing::info;

pub mod config;
pub mod error;
pub mod operations;

pub use config::S3Config;
pub use error::{ErrorClass, S3Error};
pub use operations::{S3Object, S3Operations};

/// Shared S3 client wrapper
#[derive(Clone)]
pub struct S3Client {
    client: Arc<Client>,
    config: S3Config,
}

impl S3Client {
    /// Create new S3 client with configuration from environment
    pub async fn new() -> Self {
        let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::from_sdk_config(&sdk_config, S3Config::from_env())
    }

    /// Create S3 client from an already loaded AWS configuration
    ///
    /// Lets a process share one credential chain between S3 and the other
    /// AWS clients it builds at cold start.
    pub fn from_sdk_config(sdk_config: &SdkConfig, config: S3Config) -> Self {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        builder = builder.force_path_style(config.path_style);

        info!(
            endpoint = ?config.endpoint,
            path_style = config.path_style,
            "S3 client initialized"
        );

        Self {
            client: Arc::new(Client::from_conf(builder.build())),
            config,
        }
    }

    /// Get reference to underlying AWS S3 client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get S3 configuration
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Typed object operations sharing this client
    pub fn operations(&self) -> S3Operations {
        S3Operations::new(self.client.clone())
    }
}

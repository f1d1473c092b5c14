/// S3 error types and SDK error classification
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Error codes S3 reports for a missing object or bucket
const NOT_FOUND_CODES: &[&str] = &["NoSuchKey", "NoSuchBucket", "NotFound"];

/// Error codes S3 reports for credential or policy failures
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "Forbidden",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
];

#[derive(Error, Debug)]
pub enum S3Error {
    #[error("Object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Access denied to s3://{bucket}/{key}: {message}")]
    AccessDenied {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Failed to read body of s3://{bucket}/{key}: {message}")]
    Body {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("S3 request failed for s3://{bucket}/{key}: {message}")]
    Transient {
        bucket: String,
        key: String,
        message: String,
    },
}

/// Coarse failure category of an AWS SDK call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    AccessDenied,
    Transient,
}

impl ErrorClass {
    /// Classify from the service error code and the raw HTTP status.
    ///
    /// The error code wins when present; HEAD requests carry no body, so the
    /// status is the only signal there.
    pub fn from_parts(code: Option<&str>, status: Option<u16>) -> Self {
        if let Some(code) = code {
            if NOT_FOUND_CODES.contains(&code) {
                return ErrorClass::NotFound;
            }
            if ACCESS_DENIED_CODES.contains(&code) {
                return ErrorClass::AccessDenied;
            }
        }

        match status {
            Some(404) => ErrorClass::NotFound,
            Some(401) | Some(403) => ErrorClass::AccessDenied,
            _ => ErrorClass::Transient,
        }
    }

    /// Classify any SDK error produced by an S3 operation
    pub fn of<E>(err: &SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata,
    {
        let code = err.as_service_error().and_then(|e| e.code());
        let status = err.raw_response().map(|r| r.status().as_u16());
        Self::from_parts(code, status)
    }
}

impl S3Error {
    /// Build an error for `s3://bucket/key` from an SDK failure
    pub fn from_sdk<E>(bucket: &str, key: &str, err: &SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
    {
        let bucket = bucket.to_string();
        let key = key.to_string();
        let message = DisplayErrorContext(err).to_string();

        match ErrorClass::of(err) {
            ErrorClass::NotFound => S3Error::NotFound { bucket, key },
            ErrorClass::AccessDenied => S3Error::AccessDenied {
                bucket,
                key,
                message,
            },
            ErrorClass::Transient => S3Error::Transient {
                bucket,
                key,
                message,
            },
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            S3Error::NotFound { .. } => ErrorClass::NotFound,
            S3Error::AccessDenied { .. } => ErrorClass::AccessDenied,
            S3Error::Body { .. } | S3Error::Transient { .. } => ErrorClass::Transient,
        }
    }
}

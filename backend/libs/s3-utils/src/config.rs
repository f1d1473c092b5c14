/// S3 connection overrides shared across services
///
/// Credentials and region come from the standard AWS provider chain; this
/// only carries what the chain cannot express (custom endpoints such as
/// LocalStack or MinIO).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Config {
    /// Custom endpoint URL, `None` for the regional AWS endpoint
    pub endpoint: Option<String>,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
}

impl S3Config {
    /// Load S3 overrides from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup("S3_ENDPOINT").filter(|v| !v.trim().is_empty()),
            path_style: lookup("S3_PATH_STYLE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

//! Endpoint configuration for the platform publishers.

use derive_getters::Getters;
use herald_error::{ConfigError, HeraldResult};
use std::time::Duration;

/// Graph API base URL shared by Meta and Instagram.
pub const GRAPH_API_BASE_URL: &str = "https://graph.facebook.com/v19.0";

/// LinkedIn REST API base URL.
pub const LINKEDIN_API_BASE_URL: &str = "https://api.linkedin.com/v2";

/// Where publishers send requests and how long they wait.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct PublisherConfig {
    /// Graph API base URL, without trailing slash
    #[builder(default = "GRAPH_API_BASE_URL.to_string()")]
    graph_base_url: String,
    /// LinkedIn API base URL, without trailing slash
    #[builder(default = "LINKEDIN_API_BASE_URL.to_string()")]
    linkedin_base_url: String,
    /// Per-request timeout
    #[builder(default = "Duration::from_secs(30)")]
    timeout: Duration,
}

impl PublisherConfig {
    /// Creates a builder for PublisherConfig.
    pub fn builder() -> PublisherConfigBuilder {
        PublisherConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads `HERALD_GRAPH_BASE_URL`, `HERALD_LINKEDIN_BASE_URL` and
    /// `HERALD_PUBLISH_TIMEOUT_SECS`; every variable is optional.
    pub fn from_env() -> HeraldResult<Self> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var("HERALD_GRAPH_BASE_URL") {
            builder.graph_base_url(url.trim_end_matches('/').to_string());
        }
        if let Ok(url) = std::env::var("HERALD_LINKEDIN_BASE_URL") {
            builder.linkedin_base_url(url.trim_end_matches('/').to_string());
        }
        if let Ok(secs) = std::env::var("HERALD_PUBLISH_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ConfigError::new(format!("HERALD_PUBLISH_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid publisher configuration: {}", e)))?)
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            graph_base_url: GRAPH_API_BASE_URL.to_string(),
            linkedin_base_url: LINKEDIN_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

//! Platform publishers for Herald.
//!
//! Each publisher takes a credential and the cycle's generated content and
//! always answers with a [`PlatformResult`]. Upstream failures, expired
//! tokens and unreachable endpoints become failed results, never errors, so
//! one platform can't take the rest of a cycle down with it.

mod config;
mod http;
mod instagram;
mod linkedin;
mod meta;

pub use config::{GRAPH_API_BASE_URL, LINKEDIN_API_BASE_URL, PublisherConfig, PublisherConfigBuilder};
pub use instagram::InstagramPublisher;
pub use linkedin::LinkedInPublisher;
pub use meta::MetaPublisher;

use async_trait::async_trait;
use herald_core::{Credential, GeneratedContent, Platform, PlatformResult};
use herald_error::{HeraldResult, HttpError};
use std::sync::Arc;

/// Publishes generated content to one platform.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Platform this publisher posts to.
    fn platform(&self) -> Platform;

    /// Publish `content` using `credential`.
    ///
    /// Never fails: every outcome, good or bad, is reported in the result.
    async fn publish(&self, credential: &Credential, content: &GeneratedContent) -> PlatformResult;
}

/// One publisher per platform.
#[derive(Clone)]
pub struct Publishers {
    meta: Arc<dyn Publisher>,
    instagram: Arc<dyn Publisher>,
    linkedin: Arc<dyn Publisher>,
}

impl Publishers {
    /// Assemble a set from individual publishers.
    pub fn new(
        meta: Arc<dyn Publisher>,
        instagram: Arc<dyn Publisher>,
        linkedin: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            meta,
            instagram,
            linkedin,
        }
    }

    /// HTTP publishers sharing one connection pool.
    pub fn http(config: &PublisherConfig) -> HeraldResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build publisher HTTP client: {}", e)))?;

        Ok(Self::new(
            Arc::new(MetaPublisher::new(client.clone(), config)),
            Arc::new(InstagramPublisher::new(client.clone(), config)),
            Arc::new(LinkedInPublisher::new(client, config)),
        ))
    }

    /// Publisher responsible for `platform`.
    pub fn for_platform(&self, platform: Platform) -> Arc<dyn Publisher> {
        match platform {
            Platform::Meta => Arc::clone(&self.meta),
            Platform::Instagram => Arc::clone(&self.instagram),
            Platform::LinkedIn => Arc::clone(&self.linkedin),
        }
    }
}

impl std::fmt::Debug for Publishers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publishers")
            .field("meta", &self.meta.platform())
            .field("instagram", &self.instagram.platform())
            .field("linkedin", &self.linkedin.platform())
            .finish()
    }
}

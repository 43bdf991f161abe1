//! Meta (Facebook page) publisher.

use crate::{Publisher, PublisherConfig, http};
use async_trait::async_trait;
use herald_core::{Credential, GeneratedContent, MetaCredential, Platform, PlatformResult};
use herald_error::{PublishError, PublishErrorKind, PublishResult};
use reqwest::Client;
use serde_json::json;
use tracing::{info, instrument, warn};

/// Posts the composed article text to a page feed in a single call.
#[derive(Debug, Clone)]
pub struct MetaPublisher {
    client: Client,
    base_url: String,
}

impl MetaPublisher {
    /// Creates a publisher sharing `client`.
    pub fn new(client: Client, config: &PublisherConfig) -> Self {
        Self {
            client,
            base_url: config.graph_base_url().clone(),
        }
    }

    #[instrument(skip_all, fields(page_id = %credential.page_id()))]
    async fn post_to_feed(
        &self,
        credential: &MetaCredential,
        content: &GeneratedContent,
    ) -> PublishResult<String> {
        let url = format!("{}/{}/feed", self.base_url, credential.page_id());
        let reply = http::send(self.client.post(url).json(&json!({
            "message": content.feed_message(),
            "access_token": credential.access_token(),
        })))
        .await?;

        reply
            .id()
            .ok_or_else(|| PublishError::new(PublishErrorKind::MissingIdentifier("post id".into())))
    }
}

#[async_trait]
impl Publisher for MetaPublisher {
    fn platform(&self) -> Platform {
        Platform::Meta
    }

    async fn publish(&self, credential: &Credential, content: &GeneratedContent) -> PlatformResult {
        let outcome = match credential {
            Credential::Meta(credential) => self.post_to_feed(credential, content).await,
            other => Err(PublishError::new(PublishErrorKind::CredentialMismatch(format!(
                "expected meta, got {}",
                other.platform()
            )))),
        };

        match outcome {
            Ok(post_id) => {
                info!(post_id = %post_id, "Published to Meta page feed");
                PlatformResult::succeeded(Platform::Meta, "Posted to page feed", post_id)
            }
            Err(e) => {
                warn!(error = %e, "Meta publish failed");
                PlatformResult::failed(Platform::Meta, format!("Meta publish failed: {}", e.kind))
            }
        }
    }
}

//! Instagram publisher.
//!
//! Instagram business accounts publish in two steps: create a media container
//! that references a public image, then publish that container. The second
//! call is never made when the first one fails.

use crate::{Publisher, PublisherConfig, http};
use async_trait::async_trait;
use herald_core::{Credential, GeneratedContent, InstagramCredential, Platform, PlatformResult};
use herald_error::{PublishError, PublishErrorKind, PublishResult};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

/// Which step of the two-step flow failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
enum Step {
    #[display("media container creation failed")]
    CreateContainer,
    #[display("publish failed")]
    PublishContainer,
}

/// Graph API publisher for Instagram business accounts.
#[derive(Debug, Clone)]
pub struct InstagramPublisher {
    client: Client,
    base_url: String,
}

impl InstagramPublisher {
    /// Creates a publisher sharing `client`.
    pub fn new(client: Client, config: &PublisherConfig) -> Self {
        Self {
            client,
            base_url: config.graph_base_url().clone(),
        }
    }

    async fn create_container(
        &self,
        credential: &InstagramCredential,
        caption: &str,
    ) -> PublishResult<String> {
        let url = format!("{}/{}/media", self.base_url, credential.business_account_id());
        let reply = http::send(self.client.post(url).json(&json!({
            "image_url": credential.media_url(),
            "caption": caption,
            "access_token": credential.access_token(),
        })))
        .await?;

        reply.id().ok_or_else(|| {
            PublishError::new(PublishErrorKind::MissingIdentifier("creation id".into()))
        })
    }

    async fn publish_container(
        &self,
        credential: &InstagramCredential,
        creation_id: &str,
    ) -> PublishResult<String> {
        let url = format!(
            "{}/{}/media_publish",
            self.base_url,
            credential.business_account_id()
        );
        let reply = http::send(self.client.post(url).json(&json!({
            "creation_id": creation_id,
            "access_token": credential.access_token(),
        })))
        .await?;

        reply
            .id()
            .ok_or_else(|| PublishError::new(PublishErrorKind::MissingIdentifier("media id".into())))
    }

    #[instrument(skip_all, fields(account = %credential.business_account_id()))]
    async fn run(
        &self,
        credential: &InstagramCredential,
        content: &GeneratedContent,
    ) -> Result<String, (Step, PublishError)> {
        let creation_id = self
            .create_container(credential, content.instagram_caption())
            .await
            .map_err(|e| (Step::CreateContainer, e))?;
        debug!(creation_id = %creation_id, "Media container created");

        self.publish_container(credential, &creation_id)
            .await
            .map_err(|e| (Step::PublishContainer, e))
    }
}

#[async_trait]
impl Publisher for InstagramPublisher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn publish(&self, credential: &Credential, content: &GeneratedContent) -> PlatformResult {
        let outcome = match credential {
            Credential::Instagram(credential) => self.run(credential, content).await,
            other => Err((
                Step::CreateContainer,
                PublishError::new(PublishErrorKind::CredentialMismatch(format!(
                    "expected instagram, got {}",
                    other.platform()
                ))),
            )),
        };

        match outcome {
            Ok(media_id) => {
                info!(media_id = %media_id, "Published to Instagram");
                PlatformResult::succeeded(Platform::Instagram, "Published media container", media_id)
            }
            Err((step, e)) => {
                warn!(step = %step, error = %e, "Instagram publish failed");
                PlatformResult::failed(
                    Platform::Instagram,
                    format!("Instagram {}: {}", step, e.kind),
                )
            }
        }
    }
}

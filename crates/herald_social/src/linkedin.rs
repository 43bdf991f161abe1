//! LinkedIn publisher using the UGC posts API.

use crate::{Publisher, PublisherConfig, http};
use async_trait::async_trait;
use herald_core::{Credential, GeneratedContent, LinkedInCredential, Platform, PlatformResult};
use herald_error::{PublishError, PublishErrorKind, PublishResult};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

/// Publishes a text share on behalf of a person or organization URN.
#[derive(Debug, Clone)]
pub struct LinkedInPublisher {
    client: Client,
    base_url: String,
}

/// Body of a public, text-only UGC post.
fn ugc_post(author_urn: &str, text: &str) -> Value {
    json!({
        "author": author_urn,
        "lifecycleState": "PUBLISHED",
        "specificContent": {
            "com.linkedin.ugc.ShareContent": {
                "shareCommentary": { "text": text },
                "shareMediaCategory": "NONE"
            }
        },
        "visibility": {
            "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
        }
    })
}

impl LinkedInPublisher {
    /// Creates a publisher sharing `client`.
    pub fn new(client: Client, config: &PublisherConfig) -> Self {
        Self {
            client,
            base_url: config.linkedin_base_url().clone(),
        }
    }

    #[instrument(skip_all, fields(author = %credential.author_urn()))]
    async fn share(
        &self,
        credential: &LinkedInCredential,
        content: &GeneratedContent,
    ) -> PublishResult<String> {
        let url = format!("{}/ugcPosts", self.base_url);
        let reply = http::send(
            self.client
                .post(url)
                .bearer_auth(credential.access_token())
                .header("X-Restli-Protocol-Version", "2.0.0")
                .json(&ugc_post(credential.author_urn(), content.linkedin_caption())),
        )
        .await?;

        // The post URN comes back in a header; some API versions echo it in the body too.
        reply
            .restli_id
            .clone()
            .or_else(|| reply.id())
            .ok_or_else(|| PublishError::new(PublishErrorKind::MissingIdentifier("post urn".into())))
    }
}

#[async_trait]
impl Publisher for LinkedInPublisher {
    fn platform(&self) -> Platform {
        Platform::LinkedIn
    }

    async fn publish(&self, credential: &Credential, content: &GeneratedContent) -> PlatformResult {
        let outcome = match credential {
            Credential::LinkedIn(credential) => self.share(credential, content).await,
            other => Err(PublishError::new(PublishErrorKind::CredentialMismatch(format!(
                "expected linkedin, got {}",
                other.platform()
            )))),
        };

        match outcome {
            Ok(urn) => {
                info!(post = %urn, "Published to LinkedIn");
                PlatformResult::succeeded(Platform::LinkedIn, "Shared post", urn)
            }
            Err(e) => {
                warn!(error = %e, "LinkedIn publish failed");
                PlatformResult::failed(
                    Platform::LinkedIn,
                    format!("LinkedIn publish failed: {}", e.kind),
                )
            }
        }
    }
}

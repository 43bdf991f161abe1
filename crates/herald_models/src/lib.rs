//! Content generation for Herald.
//!
//! The [`ContentGenerator`] trait is the seam the orchestrator depends on.
//! [`OpenAICompatibleGenerator`] is the production implementation.

mod config;
pub mod openai_compat;

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeneratorConfig, GeneratorConfigBuilder,
};
pub use openai_compat::OpenAICompatibleGenerator;

use async_trait::async_trait;
use herald_core::{ContentBrief, GeneratedContent};
use herald_error::GenerationError;

/// Produces structured copy from a content brief.
///
/// Implementations make no retries; a failure ends the cycle.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates title, summary, keywords, body and captions for `brief`.
    ///
    /// # Errors
    ///
    /// Fails when the upstream service errors, times out, or answers with
    /// content that does not have the required structure.
    async fn generate(&self, brief: &ContentBrief) -> Result<GeneratedContent, GenerationError>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "generator"
    }
}

//! Generated copy returned by the language model.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Copy produced fresh for each cycle. Never persisted.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into), default)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    /// Headline
    title: String,
    /// One or two sentence summary
    summary: String,
    /// Keywords chosen by the model, independent of the brief's keywords
    #[serde(default)]
    keywords: Vec<String>,
    /// Long-form article body
    body: String,
    /// Caption for the Instagram post
    instagram_caption: String,
    /// Caption for the LinkedIn post
    linkedin_caption: String,
}

impl GeneratedContent {
    /// Creates a builder for GeneratedContent.
    pub fn builder() -> GeneratedContentBuilder {
        GeneratedContentBuilder::default()
    }

    /// Text posted to a Meta page feed: title, summary and body separated by blank lines.
    pub fn feed_message(&self) -> String {
        [&self.title, &self.summary, &self.body]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_message_skips_empty_parts() {
        let content = GeneratedContent::builder()
            .title("Launch day")
            .summary("  ")
            .body("We shipped.\n")
            .build()
            .unwrap();
        assert_eq!(content.feed_message(), "Launch day\n\nWe shipped.");
    }
}

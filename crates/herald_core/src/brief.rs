//! Content brief submitted by the user.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What the generated copy should be about and who it is for.
///
/// Immutable input to a single automation cycle.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into), default)]
#[serde(rename_all = "camelCase")]
pub struct ContentBrief {
    /// Subject of the copy.
    topic: String,
    /// Target audience description.
    audience: String,
    /// Keywords to weave in, in the order given.
    keywords: Vec<String>,
    /// Voice of the copy (e.g. "friendly", "authoritative").
    tone: String,
    /// Call to action appended to captions.
    call_to_action: String,
}

impl ContentBrief {
    /// Creates a builder for ContentBrief.
    pub fn builder() -> ContentBriefBuilder {
        ContentBriefBuilder::default()
    }
}

//! Supported social platforms.

use serde::{Deserialize, Serialize};

/// A social platform Herald can publish to.
///
/// Declaration order is the order platform results appear in every response.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    /// Facebook page feed via the Graph API
    Meta,
    /// Instagram business account via the Graph API
    Instagram,
    /// LinkedIn user-generated-content posts
    LinkedIn,
}

impl Platform {
    /// All platforms in response order.
    pub const ALL: [Platform; 3] = [Platform::Meta, Platform::Instagram, Platform::LinkedIn];

    /// Human-facing platform name.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Meta => "Meta",
            Platform::Instagram => "Instagram",
            Platform::LinkedIn => "LinkedIn",
        }
    }
}

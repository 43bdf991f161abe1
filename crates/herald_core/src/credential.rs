//! Per-platform credentials.
//!
//! A platform is either [`PlatformSetting::Disabled`] or enabled with a
//! complete credential. There is no way to represent an enabled platform with
//! missing fields; the request validator rejects those before they get here.

use crate::Platform;
use derive_getters::Getters;
use serde::{Deserialize, Serialize, Serializer};

/// Facebook page credentials.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct MetaCredential {
    /// Page access token.
    access_token: String,
    /// Page identifier the post goes to.
    page_id: String,
}

/// Instagram business account credentials.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct InstagramCredential {
    /// Graph API access token.
    access_token: String,
    /// Instagram business account identifier.
    business_account_id: String,
    /// Publicly reachable image URL the container references.
    media_url: String,
}

/// LinkedIn member or organization credentials.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInCredential {
    /// OAuth bearer token.
    access_token: String,
    /// Author URN, e.g. `urn:li:person:abc123`.
    author_urn: String,
}

/// A credential for one specific platform.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum Credential {
    /// Meta page credential
    Meta(MetaCredential),
    /// Instagram account credential
    Instagram(InstagramCredential),
    /// LinkedIn author credential
    LinkedIn(LinkedInCredential),
}

impl Credential {
    /// Platform this credential belongs to.
    pub fn platform(&self) -> Platform {
        match self {
            Credential::Meta(_) => Platform::Meta,
            Credential::Instagram(_) => Platform::Instagram,
            Credential::LinkedIn(_) => Platform::LinkedIn,
        }
    }
}

/// Whether a platform takes part in a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlatformSetting<C> {
    /// Skipped; no credential required.
    #[default]
    Disabled,
    /// Published with the given credential.
    Enabled(C),
}

impl<C> PlatformSetting<C> {
    /// Whether the platform is enabled.
    pub fn is_enabled(&self) -> bool {
        matches!(self, PlatformSetting::Enabled(_))
    }

    /// The credential, when enabled.
    pub fn credential(&self) -> Option<&C> {
        match self {
            PlatformSetting::Enabled(c) => Some(c),
            PlatformSetting::Disabled => None,
        }
    }
}

// Wire shape is `{"enabled": bool, ...credential fields}`.
impl<C: Serialize> Serialize for PlatformSetting<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, C> {
            enabled: bool,
            #[serde(flatten)]
            credential: Option<&'a C>,
        }

        Tagged {
            enabled: self.is_enabled(),
            credential: self.credential(),
        }
        .serialize(serializer)
    }
}

/// Settings for every supported platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize)]
pub struct PlatformSettings {
    /// Meta page feed
    meta: PlatformSetting<MetaCredential>,
    /// Instagram business account
    instagram: PlatformSetting<InstagramCredential>,
    /// LinkedIn author
    linkedin: PlatformSetting<LinkedInCredential>,
}

impl PlatformSettings {
    /// Creates platform settings from one setting per platform.
    pub fn new(
        meta: PlatformSetting<MetaCredential>,
        instagram: PlatformSetting<InstagramCredential>,
        linkedin: PlatformSetting<LinkedInCredential>,
    ) -> Self {
        Self {
            meta,
            instagram,
            linkedin,
        }
    }

    /// The credential for `platform`, or `None` when it is disabled.
    pub fn credential_for(&self, platform: Platform) -> Option<Credential> {
        match platform {
            Platform::Meta => self.meta.credential().cloned().map(Credential::from),
            Platform::Instagram => self.instagram.credential().cloned().map(Credential::from),
            Platform::LinkedIn => self.linkedin.credential().cloned().map(Credential::from),
        }
    }

    /// Platforms that are enabled, in response order.
    pub fn enabled(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.credential_for(*p).is_some())
            .collect()
    }
}

//! Per-platform results and the combined cycle response.

use crate::{GeneratedContent, Platform};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Outcome of publishing to one platform in one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformResult {
    /// Which platform
    platform: Platform,
    /// Whether the post went out
    success: bool,
    /// Human-readable outcome
    message: String,
    /// Post identifier assigned by the platform, on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
}

impl PlatformResult {
    /// A successful publish.
    pub fn succeeded(
        platform: Platform,
        message: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            success: true,
            message: message.into(),
            external_id: Some(external_id.into()),
        }
    }

    /// A failed publish.
    pub fn failed(platform: Platform, message: impl Into<String>) -> Self {
        Self {
            platform,
            success: false,
            message: message.into(),
            external_id: None,
        }
    }

    /// A disabled platform; no call was made.
    pub fn skipped(platform: Platform) -> Self {
        Self::failed(platform, format!("{} skipped", platform))
    }

    /// Whether this result is a skip rather than an attempted publish.
    pub fn is_skipped(&self) -> bool {
        !self.success && self.message == format!("{} skipped", self.platform)
    }
}

impl std::fmt::Display for PlatformResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.success { "ok" } else { "failed" };
        match &self.external_id {
            Some(id) => write!(f, "{}: {} - {} ({})", self.platform.label(), status, self.message, id),
            None => write!(f, "{}: {} - {}", self.platform.label(), status, self.message),
        }
    }
}

/// Everything one cycle produced.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct AutomationResponse {
    /// The generated copy
    content: GeneratedContent,
    /// One result per platform, in [`Platform::ALL`] order
    platform_results: Vec<PlatformResult>,
    /// Normalized interval the caller should reschedule with
    interval_minutes: u32,
}

impl AutomationResponse {
    /// Number of platforms that published successfully.
    pub fn published_count(&self) -> usize {
        self.platform_results.iter().filter(|r| r.success).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_result() {
        let result = PlatformResult::skipped(Platform::Instagram);
        assert!(!result.success);
        assert_eq!(result.message, "instagram skipped");
        assert!(result.is_skipped());
        assert!(result.external_id.is_none());
    }

    #[test]
    fn test_result_wire_shape() {
        let result = PlatformResult::succeeded(Platform::Meta, "Posted to page feed", "42_7");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["platform"], "meta");
        assert_eq!(value["externalId"], "42_7");

        let failed = serde_json::to_value(PlatformResult::failed(Platform::LinkedIn, "HTTP 401")).unwrap();
        assert!(failed.get("externalId").is_none());
    }
}

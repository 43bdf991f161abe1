//! Schema validation for inbound automation requests.
//!
//! Requests arrive as untyped JSON from the automation loop or any other HTTP
//! client. Every rule is checked and every violation reported, so a caller
//! sees the full list of problems in one round trip.

use crate::{
    AutomationRequest, ContentBrief, InstagramCredential, LinkedInCredential, MetaCredential,
    Platform, PlatformSetting, PlatformSettings, Schedule, DEFAULT_INTERVAL_MINUTES,
};
use herald_error::ValidationError;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Prefix every LinkedIn author URN starts with.
const LINKEDIN_URN_PREFIX: &str = "urn:li:";

/// Accumulates one detail string per failed rule.
#[derive(Debug, Default)]
struct FieldErrors(Vec<String>);

impl FieldErrors {
    fn push(&mut self, path: &str, message: &str) {
        self.0.push(format!("{}: {}", path, message));
    }

    #[track_caller]
    fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.0))
        }
    }
}

fn join(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

fn required_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            errors.push(path, "Required");
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(path, "Must not be empty");
            None
        }
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => {
            errors.push(path, "Expected a string");
            None
        }
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => {
            errors.push(key, "Expected a string");
            String::new()
        }
    }
}

fn string_list(obj: &Map<String, Value>, key: &str, errors: &mut FieldErrors) -> Vec<String> {
    match obj.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| match item {
                Value::String(s) => Some(s.trim().to_string()),
                _ => {
                    errors.push(&format!("{}[{}]", key, i), "Expected a string");
                    None
                }
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(_) => {
            errors.push(key, "Expected an array of strings");
            Vec::new()
        }
    }
}

/// Validates and normalizes automation requests.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    default_media_url: Option<String>,
}

impl RequestValidator {
    /// Validator with no Instagram media fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator that fills a missing Instagram `mediaUrl` with `url`.
    pub fn with_default_media_url(url: Option<String>) -> Self {
        Self {
            default_media_url: url.filter(|u| !u.trim().is_empty()),
        }
    }

    /// Validates a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every failed rule.
    #[instrument(skip_all)]
    pub fn validate(&self, body: &Value) -> Result<AutomationRequest, ValidationError> {
        let Some(obj) = body.as_object() else {
            return Err(ValidationError::new(vec![
                "body: Expected a JSON object".to_string(),
            ]));
        };

        let mut errors = FieldErrors::default();

        let topic = required_string(obj, "topic", "topic", &mut errors);
        let audience = optional_string(obj, "audience", &mut errors);
        let keywords = string_list(obj, "keywords", &mut errors);
        let tone = optional_string(obj, "tone", &mut errors);
        let call_to_action = optional_string(obj, "callToAction", &mut errors);
        let platforms = self.platforms(obj.get("platforms"), &mut errors);
        let schedule = schedule(obj.get("schedule"), &mut errors);

        if !errors.0.is_empty() {
            debug!(failures = errors.0.len(), "Request rejected");
        }
        errors.finish()?;

        let brief = ContentBrief::builder()
            .topic(topic.unwrap_or_default())
            .audience(audience)
            .keywords(keywords)
            .tone(tone)
            .call_to_action(call_to_action)
            .build()
            .map_err(|e| ValidationError::new(vec![format!("body: {}", e)]))?;

        debug!(
            enabled = ?platforms.enabled(),
            interval_minutes = *schedule.interval_minutes(),
            "Request validated"
        );
        Ok(AutomationRequest::new(brief, platforms, schedule))
    }

    fn platforms(&self, value: Option<&Value>, errors: &mut FieldErrors) -> PlatformSettings {
        let obj = match value {
            None | Some(Value::Null) => return PlatformSettings::default(),
            Some(Value::Object(obj)) => obj,
            Some(_) => {
                errors.push("platforms", "Expected an object");
                return PlatformSettings::default();
            }
        };

        let mut meta = PlatformSetting::Disabled;
        let mut instagram = PlatformSetting::Disabled;
        let mut linkedin = PlatformSetting::Disabled;

        for (name, entry) in obj {
            let path = join("platforms", name);
            let Ok(platform) = Platform::from_str(name) else {
                errors.push(&path, "Unknown platform");
                continue;
            };
            let Some(fields) = enabled_fields(entry, &path, platform, errors) else {
                continue;
            };
            match platform {
                Platform::Meta => meta = self.meta(fields, &path, errors),
                Platform::Instagram => instagram = self.instagram(fields, &path, errors),
                Platform::LinkedIn => linkedin = self.linkedin(fields, &path, errors),
            }
        }

        PlatformSettings::new(meta, instagram, linkedin)
    }

    fn meta(
        &self,
        fields: &Map<String, Value>,
        path: &str,
        errors: &mut FieldErrors,
    ) -> PlatformSetting<MetaCredential> {
        let token = required_string(fields, "accessToken", &join(path, "accessToken"), errors);
        let page = required_string(fields, "pageId", &join(path, "pageId"), errors);
        match (token, page) {
            (Some(token), Some(page)) => PlatformSetting::Enabled(MetaCredential::new(token, page)),
            _ => PlatformSetting::Disabled,
        }
    }

    fn instagram(
        &self,
        fields: &Map<String, Value>,
        path: &str,
        errors: &mut FieldErrors,
    ) -> PlatformSetting<InstagramCredential> {
        let token = required_string(fields, "accessToken", &join(path, "accessToken"), errors);
        let account_path = join(path, "businessAccountId");
        let account = required_string(fields, "businessAccountId", &account_path, errors);
        let media_path = join(path, "mediaUrl");
        let supplied = fields
            .get("mediaUrl")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let media_url = match (supplied, fields.get("mediaUrl"), &self.default_media_url) {
            (Some(url), _, _) => Some(url.to_string()),
            (None, Some(v), _) if !v.is_null() && !v.is_string() => {
                errors.push(&media_path, "Expected a string");
                None
            }
            (None, _, Some(default)) => Some(default.clone()),
            (None, _, None) => {
                errors.push(
                    &media_path,
                    "Required when platform is enabled and no default media URL is configured",
                );
                None
            }
        };
        let media_url = media_url.filter(|url| match url::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => true,
            _ => {
                errors.push(&media_path, "Must be an absolute http(s) URL");
                false
            }
        });

        match (token, account, media_url) {
            (Some(token), Some(account), Some(media)) => {
                PlatformSetting::Enabled(InstagramCredential::new(token, account, media))
            }
            _ => PlatformSetting::Disabled,
        }
    }

    fn linkedin(
        &self,
        fields: &Map<String, Value>,
        path: &str,
        errors: &mut FieldErrors,
    ) -> PlatformSetting<LinkedInCredential> {
        let token = required_string(fields, "accessToken", &join(path, "accessToken"), errors);
        let urn_path = join(path, "authorUrn");
        let urn = required_string(fields, "authorUrn", &urn_path, errors).filter(|urn| {
            if urn.starts_with(LINKEDIN_URN_PREFIX) {
                true
            } else {
                errors.push(&urn_path, "Must start with urn:li:");
                false
            }
        });
        match (token, urn) {
            (Some(token), Some(urn)) => {
                PlatformSetting::Enabled(LinkedInCredential::new(token, urn))
            }
            _ => PlatformSetting::Disabled,
        }
    }
}

/// Credential fields each platform accepts besides `enabled`.
fn allowed_fields(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Meta => &["accessToken", "pageId"],
        Platform::Instagram => &["accessToken", "businessAccountId", "mediaUrl"],
        Platform::LinkedIn => &["accessToken", "authorUrn"],
    }
}

/// Returns the entry's fields when the platform is enabled, `None` otherwise.
///
/// Disabled entries are not inspected beyond the `enabled` flag.
fn enabled_fields<'a>(
    entry: &'a Value,
    path: &str,
    platform: Platform,
    errors: &mut FieldErrors,
) -> Option<&'a Map<String, Value>> {
    let fields = match entry {
        Value::Null => return None,
        Value::Object(fields) => fields,
        _ => {
            errors.push(path, "Expected an object");
            return None;
        }
    };

    match fields.get("enabled") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return None,
        Some(Value::Bool(true)) => {}
        Some(_) => {
            errors.push(&join(path, "enabled"), "Expected a boolean");
            return None;
        }
    }

    let allowed = allowed_fields(platform);
    for key in fields.keys() {
        if key != "enabled" && !allowed.contains(&key.as_str()) {
            errors.push(&join(path, key), "Unrecognized field");
        }
    }
    Some(fields)
}

fn schedule(value: Option<&Value>, errors: &mut FieldErrors) -> Schedule {
    let obj = match value {
        None | Some(Value::Null) => return Schedule::default(),
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            errors.push("schedule", "Expected an object");
            return Schedule::default();
        }
    };

    let minutes = match obj.get("intervalMinutes") {
        None | Some(Value::Null) => i64::from(DEFAULT_INTERVAL_MINUTES),
        Some(v) => match v.as_i64() {
            Some(n) => n,
            None => {
                errors.push("schedule.intervalMinutes", "Expected an integer");
                i64::from(DEFAULT_INTERVAL_MINUTES)
            }
        },
    };

    let run_now = match obj.get("runNow") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            errors.push("schedule.runNow", "Expected a boolean");
            true
        }
    };

    Schedule::new(minutes, run_now)
}

//! HTTP server configuration.

use derive_getters::Getters;
use herald_error::{ConfigError, HeraldResult};
use serde::Deserialize;
use std::path::Path;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Where the server listens and what it falls back to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`
    #[builder(default = "DEFAULT_BIND.to_string()")]
    bind: String,
    /// Image used for Instagram when a request omits `mediaUrl`
    #[builder(default)]
    default_media_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            default_media_url: None,
        }
    }
}

impl ServerConfig {
    /// Creates a builder for ServerConfig.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from a TOML file.
    ///
    /// ```toml
    /// bind = "0.0.0.0:8080"
    /// default_media_url = "https://cdn.example.com/default.jpg"
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> HeraldResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&raw).map_err(|e| {
            ConfigError::new(format!("Failed to parse {}: {}", path.display(), e))
        })?)
    }

    /// Apply `HERALD_BIND` and `HERALD_DEFAULT_MEDIA_URL` on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bind) = std::env::var("HERALD_BIND") {
            self.bind = bind;
        }
        if let Ok(url) = std::env::var("HERALD_DEFAULT_MEDIA_URL") {
            self.default_media_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        self
    }

    /// Copy of this config listening on `bind`.
    pub fn with_bind(self, bind: impl Into<String>) -> Self {
        Self {
            bind: bind.into(),
            ..self
        }
    }

    /// Defaults, overridden by the optional file, overridden by the environment.
    pub fn load(path: Option<&Path>) -> HeraldResult<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ServerConfig =
            toml::from_str(r#"default_media_url = "https://cdn.example.com/a.jpg""#).unwrap();
        assert_eq!(config.bind(), DEFAULT_BIND);
        assert_eq!(
            config.default_media_url().as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn test_builder_defaults() {
        let config = ServerConfig::builder().bind("0.0.0.0:8080").build().unwrap();
        assert_eq!(config.bind(), "0.0.0.0:8080");
        assert!(config.default_media_url().is_none());
    }
}

//! Local cache of the last submitted configuration.
//!
//! Convenience only: the file holds platform tokens in plain text and is
//! read back through the same validator the server uses.

use herald_core::{AutomationRequest, RequestValidator};
use herald_error::{ConfigError, HeraldResult, JsonError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// File name inside the cache directory.
const CACHE_FILE: &str = "last_request.json";

/// Reads and writes the last submitted [`AutomationRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCache {
    path: PathBuf,
}

impl ConfigCache {
    /// Cache stored at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache in the platform config directory, e.g. `~/.config/herald/last_request.json`.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("herald").join(CACHE_FILE)))
    }

    /// Where the cache lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached request.
    ///
    /// A missing file is `Ok(None)`; a file that no longer validates is
    /// logged and treated the same way.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> HeraldResult<Option<AutomationRequest>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cached configuration");
                return Ok(None);
            }
            Err(e) => {
                return Err(ConfigError::new(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                ))
                .into());
            }
        };

        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| JsonError::new(format!("Cached configuration is not JSON: {}", e)))?;
        match RequestValidator::new().validate(&value) {
            Ok(request) => {
                debug!("Loaded cached configuration");
                Ok(Some(request))
            }
            Err(e) => {
                warn!(details = ?e.details, "Ignoring cached configuration that no longer validates");
                Ok(None)
            }
        }
    }

    /// Saves `request`, creating the directory if needed.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, request: &AutomationRequest) -> HeraldResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::new(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let json = serde_json::to_string_pretty(request)
            .map_err(|e| JsonError::new(format!("Failed to encode configuration: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            ConfigError::new(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        debug!("Saved configuration");
        Ok(())
    }
}

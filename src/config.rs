//! Configuration file parser for ~/.config/newsdesk/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::pipeline::{SortKey, DEFAULT_PLACEHOLDER_IMAGE};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed location: an http(s) URL, a `file://` URL or a path.
    pub source: String,

    /// Theme variant used until the user toggles one ("dark" or "light").
    pub theme: String,

    /// Initial sort key. Unknown names fall back to "views".
    pub default_sort: String,

    /// Keep the other query fields when one of them changes, instead of
    /// resetting them to their defaults.
    pub sticky_filters: bool,

    /// Image reference substituted for articles without one.
    pub placeholder_image: String,

    /// Timeout for remote feed requests, in seconds.
    pub request_timeout_secs: u64,

    /// Key overrides, action name to key (`reload = "F5"`).
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "articles.json".to_string(),
            theme: "dark".to_string(),
            default_sort: "views".to_string(),
            sticky_filters: false,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            request_timeout_secs: 30,
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "source",
                "theme",
                "default_sort",
                "sticky_filters",
                "placeholder_image",
                "request_timeout_secs",
                "keybindings",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), source = %config.source, "Loaded configuration");
        Ok(config)
    }

    /// Initial sort key, with unknown names mapped to [`SortKey::Views`].
    pub fn sort_key(&self) -> SortKey {
        SortKey::parse_or_default(&self.default_sort)
    }
}

// ============================================================================
// Tests
// ============================================================================

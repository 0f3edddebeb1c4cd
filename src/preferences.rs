//! Persisted UI preferences in ~/.config/newsdesk/state.toml.
//!
//! Config values serve as defaults; saved preferences override them. Writes
//! only ever touch the state file, never config.toml.
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Failed to access preferences file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in preferences file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Preferences that survive restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Last theme the user toggled to.
    pub theme: Option<String>,
}

impl Preferences {
    /// Load saved preferences. A missing or empty file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No saved preferences");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(&content)?)
    }

    /// Write preferences atomically (temp file then rename).
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        let content = toml::to_string(self)?;
        atomic_write(path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), "Saved preferences");
        Ok(())
    }

    /// Theme name to start with: the saved one, else the configured one.
    pub fn theme_name<'a>(&'a self, config: &'a Config) -> &'a str {
        self.theme.as_deref().unwrap_or(&config.theme)
    }
}

/// Write `content` to `dst` without ever leaving a partial file behind.
fn atomic_write(dst: &Path, content: &[u8]) -> std::io::Result<()> {
    // Randomized temp name so a pre-placed symlink cannot be targeted.
    use std::time::{SystemTime, UNIX_EPOCH};
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    drop(temp_file);
    if let Err(e) = written {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    // On Windows, rename fails if destination exists, so remove it first
    #[cfg(windows)]
    if dst.exists() {
        if let Err(e) = std::fs::remove_file(dst) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }
    }

    std::fs::rename(&temp_path, dst).inspect_err(|_| {
        let _ = std::fs::remove_file(&temp_path);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let path = Path::new("/tmp/newsdesk_prefs_test_missing/state.toml");
        assert_eq!(Preferences::load(path).unwrap(), Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join("newsdesk_prefs_test_roundtrip");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.toml");

        let prefs = Preferences {
            theme: Some("light".into()),
        };
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(&path).unwrap(), prefs);

        // Overwrite an existing file
        let prefs = Preferences {
            theme: Some("dark".into()),
        };
        prefs.save(&path).unwrap();
        assert_eq!(Preferences::load(&path).unwrap().theme.as_deref(), Some("dark"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = std::env::temp_dir().join("newsdesk_prefs_test_tempfiles");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.toml");

        Preferences::default().save(&path).unwrap();
        let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = std::env::temp_dir().join("newsdesk_prefs_test_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.toml");
        std::fs::write(&path, "theme = [").unwrap();

        assert!(matches!(
            Preferences::load(&path),
            Err(PreferencesError::Parse(_))
        ));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_saved_theme_overrides_config() {
        let config = Config::default();
        assert_eq!(Preferences::default().theme_name(&config), "dark");

        let prefs = Preferences {
            theme: Some("light".into()),
        };
        assert_eq!(prefs.theme_name(&config), "light");
    }
}

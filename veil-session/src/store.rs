//! Local settings persistence.
//!
//! The full configuration is stored as a JSON blob, by default at
//! `~/.veil/settings.json`. Reading never fails: a missing or corrupt blob
//! simply means "no stored settings" and the caller falls back to defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use veil_core::{CeremonyConfig, PartialConfig};

use crate::error::{Result, SessionError};

/// Environment variable overriding the `~/.veil` directory.
pub const VEIL_HOME_ENV: &str = "VEIL_HOME";

const SETTINGS_FILE: &str = "settings.json";

/// The directory Veil keeps its state in.
pub fn veil_home() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(VEIL_HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    home::home_dir()
        .map(|h| h.join(".veil"))
        .ok_or_else(|| SessionError::Storage("Could not determine home directory".into()))
}

/// JSON-file settings store.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Store settings at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store settings in the Veil home directory.
    pub fn default_location() -> Result<Self> {
        Ok(Self::at(veil_home()?.join(SETTINGS_FILE)))
    }

    /// A store that remembers nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the stored blob. Missing, unreadable or malformed data yields `None`.
    pub fn load(&self) -> Option<PartialConfig> {
        let path = self.path.as_ref()?;
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<PartialConfig>(&content) {
            Ok(partial) => {
                debug!("Loaded settings from {}", path.display());
                Some(partial)
            }
            Err(e) => {
                warn!("Ignoring malformed settings {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write the full configuration.
    pub fn save(&self, config: &CeremonyConfig) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SessionError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| SessionError::Storage(format!("Failed to serialize settings: {}", e)))?;

        fs::write(path, content).map_err(|e| {
            SessionError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("nested").join("settings.json"));
        let config = CeremonyConfig {
            rate: 9,
            patterns: vec!["31".into()],
            log: vec![4, 5],
            ..Default::default()
        };

        store.save(&config).unwrap();
        let loaded = CeremonyConfig::default().merged(store.load().unwrap());
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SettingsStore::at(dir.path().join("nope.json")).load().is_none());
    }

    #[test]
    fn test_malformed_blob_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{\"rate\": \"fast\"").unwrap();
        assert!(SettingsStore::at(&path).load().is_none());
    }

    #[test]
    fn test_disabled_store() {
        let store = SettingsStore::disabled();
        assert!(store.path().is_none());
        assert!(store.save(&CeremonyConfig::default()).is_ok());
        assert!(store.load().is_none());
    }
}

use crate::engine::{EngineSettings, DEFAULT_STATUS_TIMEOUT_SECS};
use crate::input::DEFAULT_MAX_CHORD_LENGTH;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeConfig,
    pub ui: UiConfig,
    pub keys: KeysConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    /// "dark" or "light"; other names are kept but change nothing
    pub colorscheme: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            colorscheme: "dark".to_string(),
        }
    }
}

/// UI behavior configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Show dot files
    pub show_hidden: bool,
    /// Move removed entries to the trash instead of deleting them
    pub use_trash: bool,
    /// How long status messages stay up; 0 keeps them until replaced
    pub status_timeout_secs: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            use_trash: true,
            status_timeout_secs: DEFAULT_STATUS_TIMEOUT_SECS,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct KeysConfig {
    pub max_chord_length: usize,
    /// Operation name -> chord, e.g. `select_first = "gg"`
    pub bindings: BTreeMap<String, String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            max_chord_length: DEFAULT_MAX_CHORD_LENGTH,
            bindings: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "vifman")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is missing
    /// or broken
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("No config directory on this platform, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using default configuration", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(write_err)
    }

    /// Write a default config file unless one exists
    pub fn create_default() -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            Self::default().save_to(&path)?;
            info!("Wrote default config to {}", path.display());
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            max_chord_length: self.keys.max_chord_length,
            status_timeout_secs: self.ui.status_timeout_secs,
            bindings: self.keys.bindings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme.colorscheme, "dark");
        assert!(!config.ui.show_hidden);
        assert!(config.ui.use_trash);
        assert_eq!(config.ui.status_timeout_secs, 4);
        assert_eq!(config.keys.max_chord_length, 4);
        assert!(config.keys.bindings.is_empty());
        assert_eq!(config.engine_settings(), EngineSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ui]
            show_hidden = true

            [keys.bindings]
            exit = "ZZ"
            "#,
        )
        .unwrap();
        assert!(config.ui.show_hidden);
        assert!(config.ui.use_trash);
        assert_eq!(config.theme.colorscheme, "dark");
        assert_eq!(config.keys.bindings.get("exit").map(String::as_str), Some("ZZ"));
        assert_eq!(config.engine_settings().bindings.len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.theme.colorscheme = "light".to_string();
        config.keys.bindings.insert("yank".to_string(), "Y".to_string());
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load_from(&dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[ui\nshow_hidden = ").unwrap();
        assert!(matches!(
            Config::load_from(&bad),
            Err(ConfigError::Parse { .. })
        ));
    }
}

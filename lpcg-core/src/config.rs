//! LPCG configuration: end markers and default generation options.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LpcgError, Result};

const DEFAULT_END_OF_TEXT_MARKER: &str = "□";
const DEFAULT_END_OF_STANZA_MARKER: &str = "⊗";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LpcgConfig {
    /// Appended to the last line of the text
    #[serde(default = "default_end_of_text_marker")]
    pub end_of_text_marker: String,

    /// Appended to the last line of every stanza but the final one
    #[serde(default = "default_end_of_stanza_marker")]
    pub end_of_stanza_marker: String,

    /// Lines of context shown before the tested line
    #[serde(default = "default_lines_of_context")]
    pub default_lines_of_context: usize,

    /// Lines the learner is asked to recite
    #[serde(default = "default_lines_to_recite")]
    pub default_lines_to_recite: usize,

    /// Physical lines treated as one line
    #[serde(default = "default_lines_in_groups_of")]
    pub default_lines_in_groups_of: usize,
}

fn default_end_of_text_marker() -> String {
    DEFAULT_END_OF_TEXT_MARKER.to_string()
}

fn default_end_of_stanza_marker() -> String {
    DEFAULT_END_OF_STANZA_MARKER.to_string()
}

fn default_lines_of_context() -> usize {
    2
}

fn default_lines_to_recite() -> usize {
    1
}

fn default_lines_in_groups_of() -> usize {
    1
}

impl Default for LpcgConfig {
    fn default() -> Self {
        Self {
            end_of_text_marker: default_end_of_text_marker(),
            end_of_stanza_marker: default_end_of_stanza_marker(),
            default_lines_of_context: default_lines_of_context(),
            default_lines_to_recite: default_lines_to_recite(),
            default_lines_in_groups_of: default_lines_in_groups_of(),
        }
    }
}

impl LpcgConfig {
    /// Build a config with the given markers and default options.
    pub fn with_markers(end_of_text: &str, end_of_stanza: &str) -> Self {
        Self {
            end_of_text_marker: end_of_text.to_string(),
            end_of_stanza_marker: end_of_stanza.to_string(),
            ..Self::default()
        }
    }

    /// Get the config file path: ~/.config/cli-programs/lpcg.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| LpcgError::ConfigError("HOME not set".into()))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("lpcg.toml"))
    }

    /// Load config from the default location, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: LpcgConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }
}

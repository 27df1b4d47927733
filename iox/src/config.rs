//! Configuration for the `iox` CLI: output color and where the
//! interactive session keeps its line history.

use dirs::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

pub const CONFIG_FILE_NAME: &str = "iox.toml";

fn default_history_file() -> String {
    ".iox_history".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub no_color: bool,

    #[serde(default = "default_history_file")]
    pub history_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_color: false,
            history_file: default_history_file(),
        }
    }
}

impl Config {
    /// Load configuration from the first of: `IOX_CONFIG`, the user
    /// config directory, the current directory, or the built-in defaults.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("reading {}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| CliError::Config(format!("parsing {}: {e}", path.display())))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CliError::Config(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// The absolute path the interactive session's history should live
    /// at: `history_file` resolved against the user's home directory if
    /// it's a bare name, used as-is otherwise.
    pub fn history_path(&self) -> PathBuf {
        let configured = PathBuf::from(&self.history_file);
        if configured.is_absolute() {
            configured
        } else {
            home_dir().unwrap_or_default().join(configured)
        }
    }

    /// `IOX_CONFIG` wins outright if set, even if the path it names
    /// doesn't exist yet (the caller decides whether that's an error).
    fn check_env_override() -> Option<PathBuf> {
        std::env::var_os("IOX_CONFIG").map(PathBuf::from)
    }

    fn check_user_config_dir() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("iox").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_current_dir() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_env_override()
            .or_else(Self::check_user_config_dir)
            .or_else(Self::check_current_dir)
    }
}

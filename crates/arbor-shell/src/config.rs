//! Shell configuration, loaded from a RON file.
//!
//! Every field has a default, so a config file only needs the fields it
//! changes:
//!
//! ```ron
//! (
//!     base_folder: "home",
//!     history_limit: 200,
//!     grep: (case_insensitive: true),
//! )
//! ```

use std::path::{Path, PathBuf};

use arbor_kernel::{DEFAULT_BASE_NAME, GrepOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_LIMIT;

/// Error type for config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("RON serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Name of the base folder (first path component).
    pub base_folder: String,
    /// Printed after the current path in the REPL prompt.
    pub prompt_suffix: String,
    /// History entries kept before the oldest is evicted.
    pub history_limit: usize,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Print the command list when the REPL starts.
    pub banner: bool,
    pub grep: GrepDefaults,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            base_folder: DEFAULT_BASE_NAME.to_string(),
            prompt_suffix: ">  ".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_filter: "warn".to_string(),
            banner: true,
            grep: GrepDefaults::default(),
        }
    }
}

/// Grep settings applied before a command's own flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrepDefaults {
    pub case_insensitive: bool,
    pub show_line_numbers: bool,
    pub show_file_path: bool,
}

impl Default for GrepDefaults {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            show_line_numbers: true,
            show_file_path: true,
        }
    }
}

impl GrepDefaults {
    pub fn to_options(&self) -> GrepOptions {
        GrepOptions {
            case_insensitive: self.case_insensitive,
            show_line_numbers: self.show_line_numbers,
            show_file_path: self.show_file_path,
            ..GrepOptions::default()
        }
    }
}

impl ShellConfig {
    /// Set the base folder name.
    pub fn with_base_folder(mut self, name: impl Into<String>) -> Self {
        self.base_folder = name.into();
        self
    }

    /// Set the history limit.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Load and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Load `explicit` if given (it must exist), otherwise the default
    /// location if a file is there, otherwise defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `~/.config/arbor/config.ron` (or the platform equivalent).
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("arbor").join("config.ron"))
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    shellexpand::tilde(raw).as_ref().into()
}

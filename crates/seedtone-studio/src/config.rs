// SPDX-License-Identifier: MIT
//! User configuration, read from TOML.
//!
//! ```toml
//! # ~/.config/seedtone/config.toml
//! state_dir = "/home/me/.local/share/seedtone"
//! mode = "dark"            # first-run mode
//! mood = "Earthy"          # first-run mood
//! link_debounce_ms = 120
//! share_base = "https://example.com/seedtone"
//! ```
//!
//! Every field is optional. Unlike share links, names here are checked
//! strictly: a typo is an error, not a silent fallback.

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use seedtone_theme::{Mode, Mood};

use crate::link::DEFAULT_LINK_DEBOUNCE_MS;

const APP_DIR: &str = "seedtone";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
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
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where favorites, history and the last session are kept.
    pub state_dir: Option<PathBuf>,
    #[serde(deserialize_with = "parse_name")]
    pub mode: Mode,
    #[serde(deserialize_with = "parse_name")]
    pub mood: Mood,
    pub link_debounce_ms: u64,
    /// Prefix for exported share links; `?a=<token>` is appended.
    pub share_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            mode: Mode::default(),
            mood: Mood::default(),
            link_debounce_ms: DEFAULT_LINK_DEBOUNCE_MS,
            share_base: String::new(),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/seedtone/config.toml` or the platform equivalent.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text).map_err(|source| ConfigError::Parse { path, source }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Parse TOML text.
    ///
    /// # Errors
    ///
    /// The TOML error on malformed input, unknown keys or unknown names.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// The configured state directory, else `<data_local_dir>/seedtone`,
    /// else `./.seedtone`.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir().map_or_else(|| PathBuf::from(".seedtone"), |d| d.join(APP_DIR))
        })
    }

    /// `share_base?a=<token>`, or the bare query when no base is set.
    #[must_use]
    pub fn share_link(&self, token: &str) -> String {
        let sep = if self.share_base.contains('?') { '&' } else { '?' };
        format!("{}{sep}{}={token}", self.share_base, crate::link::SHARE_PARAM)
    }
}

fn parse_name<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

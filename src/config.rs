//! Render configuration.
//!
//! Options are read from a TOML file with a `[render]` table:
//!
//! ```toml
//! [render]
//! wrap_width = 67
//! sort_tags = false
//! align_columns = true
//! ```
//!
//! [`Config::discover`] looks for `.phpdoc-generator.toml` in the given
//! directory and its ancestors, then for
//! `<config dir>/phpdoc-generator/config.toml`, and falls back to the
//! defaults when neither exists.

use std::fs;
use std::path::{Path, PathBuf};

use etcetera::{BaseStrategy, choose_base_strategy};
use serde::Deserialize;
use tracing::debug;

use crate::error::{DocblockError, Result};

/// Default column at which descriptions are wrapped.
pub const DEFAULT_WRAP_WIDTH: usize = 67;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = ".phpdoc-generator.toml";

const APP_DIR: &str = "phpdoc-generator";
const USER_CONFIG_FILE: &str = "config.toml";

/// How a docblock is turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Column at which the description is wrapped.  Only whitespace is
    /// ever broken; longer words overflow.
    pub wrap_width: usize,
    /// Render tags in [`crate::sort_tags`] order instead of insertion order.
    pub sort_tags: bool,
    /// Pad tag columns so descriptions line up within a group.
    pub align_columns: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            sort_tags: false,
            align_columns: true,
        }
    }
}

/// Top-level config file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderOptions,
}

impl Config {
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| DocblockError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source).map_err(|source| DocblockError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Find and load the nearest config for `start_dir`.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        let user_dir = match choose_base_strategy() {
            Ok(strategy) => Some(strategy.config_dir().join(APP_DIR)),
            Err(err) => {
                debug!(%err, "no home directory, skipping user config");
                None
            }
        };
        Self::discover_in(start_dir, user_dir.as_deref())
    }

    /// [`Config::discover`] with an explicit user config directory.
    pub fn discover_in(start_dir: &Path, user_config_dir: Option<&Path>) -> Result<Self> {
        match find_config_file(start_dir, user_config_dir) {
            Some(path) => Self::load(&path),
            None => {
                debug!(dir = %start_dir.display(), "no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.render.wrap_width == 0 {
            return Err(DocblockError::InvalidConfig("render.wrap_width must be positive"));
        }
        Ok(())
    }
}

fn find_config_file(start_dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.is_file())
        .or_else(|| {
            user_config_dir
                .map(|dir| dir.join(USER_CONFIG_FILE))
                .filter(|candidate| candidate.is_file())
        })
}

//! Shared configuration for the plugin inventory tools.
//!
//! [`Config`] is layered by `ortho_config`: built-in defaults, then a
//! configuration file (`--config-path` or `PLUMB_CONFIG_PATH`), then
//! `PLUMB_*` environment variables, then command-line flags. Every field has
//! a default from [`defaults`], so an empty merge still yields a usable
//! configuration.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::defaults::{
    DEFAULT_CHECKSUM_MANIFEST, DEFAULT_LOG_FILTER, DEFAULT_PLUGINS_ROOT,
    default_checksum_manifest, default_log_filter, default_log_format, default_plugins_root,
};
pub use self::logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for locating the plugin tree and configuring
/// logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "PLUMB")]
pub struct Config {
    /// Directory holding the `ruby` and `java` plugin subtrees.
    #[ortho_config(default = default_plugins_root().to_path_buf())]
    pub plugins_root: Utf8PathBuf,
    /// YAML manifest of recorded checksums.
    #[ortho_config(default = default_checksum_manifest().to_path_buf())]
    pub checksum_manifest: Utf8PathBuf,
    /// Tracing filter expression, e.g. `info` or `plumb_inventory=debug`.
    #[ortho_config(default = String::from(default_log_filter()))]
    pub log_filter: String,
    /// Log line format written to standard error.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugins_root: default_plugins_root().to_path_buf(),
            checksum_manifest: default_checksum_manifest().to_path_buf(),
            log_filter: String::from(default_log_filter()),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Returns the configured plugins root.
    #[must_use]
    pub fn plugins_root(&self) -> &Utf8Path {
        &self.plugins_root
    }

    /// Returns the configured checksum manifest path.
    #[must_use]
    pub fn checksum_manifest(&self) -> &Utf8Path {
        &self.checksum_manifest
    }

    /// Returns the configured log filter.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Rejects blank values, which would otherwise resolve to the current
    /// directory or an empty filter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Blank`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("plugins_root", self.plugins_root.as_str()),
            ("checksum_manifest", self.checksum_manifest.as_str()),
            ("log_filter", self.log_filter.as_str()),
        ];
        match fields
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            Some((field, _)) => Err(ConfigError::Blank { field }),
            None => Ok(()),
        }
    }
}

/// Errors raised by [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field was set to an empty or whitespace-only value.
    #[error("configuration value '{field}' must not be blank")]
    Blank {
        /// Name of the offending field.
        field: &'static str,
    },
}

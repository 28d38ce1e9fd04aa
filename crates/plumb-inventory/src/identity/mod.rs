//! Plugin identity types recorded by the registry.
//!
//! A [`PluginIdentity`] ties the short key operators type (for example `foo`)
//! to the directory the plugin is installed under, its runtime
//! [`Language`], and the [`CoordinateTemplate`] used to derive per-version
//! coordinates.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coordinate::CoordinateTemplate;
use crate::error::InventoryError;

/// Runtime classification of a plugin; also the name of its subtree under
/// the plugins root.
///
/// # Example
///
/// ```
/// use plumb_inventory::Language;
///
/// let language: Language = "ruby".parse().expect("known language");
/// assert_eq!(language, Language::Ruby);
/// assert!("cobol".parse::<Language>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// Plugins run by the embedded Ruby runtime.
    Ruby,
    /// Plugins packaged as JVM bundles.
    Java,
}

impl Language {
    /// Every recognised language, in scan order.
    pub const ALL: [Self; 2] = [Self::Ruby, Self::Java];

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ruby => "ruby",
            Self::Java => "java",
        }
    }

    /// Returns the language subtree beneath `plugins_root`.
    #[must_use]
    pub fn subtree(self, plugins_root: &Path) -> PathBuf {
        plugins_root.join(self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InventoryError::InvalidLanguage {
                language: s.to_owned(),
            })
    }
}

/// Installation identity of a registered plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginIdentity {
    plugin_key: String,
    plugin_name: String,
    language: Language,
    #[serde(flatten)]
    template: CoordinateTemplate,
}

impl PluginIdentity {
    /// Creates a new identity.
    #[must_use]
    pub fn new(
        plugin_key: impl Into<String>,
        plugin_name: impl Into<String>,
        language: Language,
        template: CoordinateTemplate,
    ) -> Self {
        Self {
            plugin_key: plugin_key.into(),
            plugin_name: plugin_name.into(),
            language,
            template,
        }
    }

    /// Validates the identity, returning an error if it is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Registry`] if the key or name is blank, or if
    /// the name is not a single path component. Returns
    /// [`InventoryError::InvalidCoordinate`] if the coordinate template is
    /// malformed.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.plugin_key.trim().is_empty() {
            return Err(InventoryError::Registry {
                message: String::from("plugin key must not be empty"),
            });
        }
        if self.plugin_name.trim().is_empty() {
            return Err(InventoryError::Registry {
                message: String::from("plugin name must not be empty"),
            });
        }
        if self.plugin_name.contains(['/', '\\']) || self.plugin_name == ".." {
            return Err(InventoryError::Registry {
                message: format!(
                    "plugin name must be a single directory name, got '{}'",
                    self.plugin_name
                ),
            });
        }
        self.template.validate()
    }

    /// Returns the short lookup key.
    #[must_use]
    pub const fn plugin_key(&self) -> &str {
        self.plugin_key.as_str()
    }

    /// Returns the on-disk directory name.
    #[must_use]
    pub const fn plugin_name(&self) -> &str {
        self.plugin_name.as_str()
    }

    /// Returns the runtime classification.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Returns the coordinate template.
    #[must_use]
    pub const fn template(&self) -> &CoordinateTemplate {
        &self.template
    }

    /// Returns the plugin directory beneath `plugins_root`.
    #[must_use]
    pub fn plugin_dir(&self, plugins_root: &Path) -> PathBuf {
        self.language.subtree(plugins_root).join(&self.plugin_name)
    }
}

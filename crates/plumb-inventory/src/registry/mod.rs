//! Plugin registry for identity storage and lookup.
//!
//! The [`PluginRegistry`] maps short plugin keys to their installation
//! identity. Registering an existing key replaces its entry, so installers can
//! re-register on every install without checking first. The registry is an
//! ordinary value: callers construct one per invocation and pass it by
//! reference to whatever needs it.
//!
//! Registries persist to `plugin_identifiers.json` at the root of the plugins
//! tree, a JSON object keyed by plugin key.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::coordinate::CoordinateTemplate;
use crate::error::InventoryError;
use crate::identity::{Language, PluginIdentity};
use crate::persist::atomic_write;

/// File name of the persisted registry beneath the plugins root.
pub const IDENTIFIERS_FILE: &str = "plugin_identifiers.json";

/// Registry of known plugin identities.
///
/// # Example
///
/// ```
/// use plumb_inventory::{CoordinateTemplate, Language, PluginRegistry};
///
/// let mut registry = PluginRegistry::new();
/// registry
///     .register(
///         "foo",
///         "plugin_foo",
///         "ruby",
///         CoordinateTemplate::new("com.foo", "foo", "tar.gz"),
///     )
///     .expect("registration succeeds");
/// let identity = registry.get("foo").expect("registered");
/// assert_eq!(identity.language(), Language::Ruby);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRegistry {
    identities: BTreeMap<String, PluginIdentity>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registry file location for a plugins root.
    #[must_use]
    pub fn identifiers_path(plugins_root: &Path) -> PathBuf {
        plugins_root.join(IDENTIFIERS_FILE)
    }

    /// Registers or replaces the identity for `plugin_key`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidLanguage`] if `language` is not a
    /// recognised classification, [`InventoryError::Registry`] if the key
    /// or name is malformed, or [`InventoryError::InvalidCoordinate`] if the
    /// template is malformed. The registry is unchanged on error.
    pub fn register(
        &mut self,
        plugin_key: &str,
        plugin_name: &str,
        language: &str,
        template: CoordinateTemplate,
    ) -> Result<(), InventoryError> {
        let parsed: Language = language.parse()?;
        self.register_identity(PluginIdentity::new(
            plugin_key,
            plugin_name,
            parsed,
            template,
        ))
    }

    /// Registers or replaces an already-built identity.
    ///
    /// # Errors
    ///
    /// Returns the error from [`PluginIdentity::validate`] if validation fails.
    pub fn register_identity(&mut self, identity: PluginIdentity) -> Result<(), InventoryError> {
        identity.validate()?;
        let key = identity.plugin_key().to_owned();
        if let Some(previous) = self.identities.insert(key, identity) {
            debug!(plugin_key = previous.plugin_key(), "replaced plugin identity");
        }
        Ok(())
    }

    /// Looks up an identity by plugin key.
    #[must_use]
    pub fn get(&self, plugin_key: &str) -> Option<&PluginIdentity> {
        self.identities.get(plugin_key)
    }

    /// Removes the identity for `plugin_key`, returning it if present.
    pub fn remove(&mut self, plugin_key: &str) -> Option<PluginIdentity> {
        self.identities.remove(plugin_key)
    }

    /// Finds the identity installed under `plugin_name` for `language`.
    ///
    /// When several keys point at the same directory the first key in sort
    /// order wins.
    #[must_use]
    pub fn find_by_plugin_name(
        &self,
        plugin_name: &str,
        language: Language,
    ) -> Option<&PluginIdentity> {
        self.identities
            .values()
            .find(|identity| {
                identity.plugin_name() == plugin_name && identity.language() == language
            })
    }

    /// Iterates over identities in plugin key order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginIdentity> {
        self.identities.values()
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Returns `true` when no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Loads a registry from `path`; a missing file yields an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Io`] if the file cannot be read,
    /// [`InventoryError::Manifest`] if it is not valid JSON, or
    /// [`InventoryError::Registry`] if an entry is inconsistent.
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no plugin registry yet");
                return Ok(Self::new());
            }
            Err(error) => return Err(InventoryError::io(path, error)),
        };

        let document: BTreeMap<String, PluginIdentity> = serde_json::from_slice(&contents)
            .map_err(|error| InventoryError::Manifest {
                path: path.to_path_buf(),
                message: error.to_string(),
            })?;

        let mut registry = Self::new();
        for (key, identity) in document {
            if key != identity.plugin_key() {
                return Err(InventoryError::Registry {
                    message: format!(
                        "entry '{key}' declares plugin key '{}'",
                        identity.plugin_key()
                    ),
                });
            }
            registry.register_identity(identity)?;
        }
        debug!(path = %path.display(), plugins = registry.len(), "loaded plugin registry");
        Ok(registry)
    }

    /// Writes the registry to `path`, replacing any previous file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Manifest`] if encoding fails or
    /// [`InventoryError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), InventoryError> {
        let encoded = serde_json::to_vec_pretty(&self.identities).map_err(|error| {
            InventoryError::Manifest {
                path: path.to_path_buf(),
                message: error.to_string(),
            }
        })?;
        atomic_write(path, &encoded).map_err(|error| InventoryError::io(path, error))
    }
}

//! Inventory report produced by a scan.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::coordinate::CoordinateTemplate;
use crate::identity::Language;

/// State of one installed version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    /// Version directory name.
    pub version: String,
    /// The version is the target of the active pointer.
    pub is_default: bool,
    /// The version carries the disabled marker.
    pub is_disabled: bool,
    /// Checksum recorded in the manifest for this exact coordinate.
    pub sha1: Option<String>,
}

/// Everything discovered about one plugin directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInventory {
    /// Registered plugin key, or the directory name when unregistered.
    pub plugin_key: String,
    /// Directory name; also the report key.
    pub plugin_name: String,
    /// Language-qualified path to the plugin directory.
    pub plugin_path: PathBuf,
    /// Language subtree the plugin was found under.
    pub language: Language,
    /// Coordinate template from the registry, when registered.
    pub coordinate_template: Option<CoordinateTemplate>,
    /// Installed versions in ascending order.
    pub versions: Vec<VersionEntry>,
}

impl PluginInventory {
    /// Returns the version the active pointer references, if any.
    #[must_use]
    pub fn default_version(&self) -> Option<&VersionEntry> {
        self.versions.iter().find(|entry| entry.is_default)
    }

    /// Looks up an installed version by name.
    #[must_use]
    pub fn version(&self, version: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|entry| entry.version == version)
    }
}

/// An entry skipped during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    /// Path that could not be inspected.
    pub path: PathBuf,
    /// Why it was skipped.
    pub message: String,
}

/// Consolidated inventory keyed by plugin directory name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    plugins: BTreeMap<String, PluginInventory>,
    warnings: Vec<ScanWarning>,
}

impl InventoryReport {
    /// Looks up a plugin by directory name.
    #[must_use]
    pub fn get(&self, plugin_name: &str) -> Option<&PluginInventory> {
        self.plugins.get(plugin_name)
    }

    /// Iterates over plugins in directory name order.
    pub fn plugins(&self) -> impl Iterator<Item = &PluginInventory> {
        self.plugins.values()
    }

    /// Returns the entries skipped during the scan.
    #[must_use]
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Returns the number of plugins found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` when no plugin was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub(crate) fn contains(&self, plugin_name: &str) -> bool {
        self.plugins.contains_key(plugin_name)
    }

    pub(crate) fn insert(&mut self, plugin: PluginInventory) {
        self.plugins.insert(plugin.plugin_name.clone(), plugin);
    }

    pub(crate) fn warn(&mut self, path: PathBuf, message: String) {
        tracing::warn!(path = %path.display(), %message, "skipped entry during scan");
        self.warnings.push(ScanWarning { path, message });
    }
}

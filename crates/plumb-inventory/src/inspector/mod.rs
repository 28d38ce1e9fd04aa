//! Inventory scanner.
//!
//! The [`Inspector`] walks `<plugins_root>/<language>/<plugin_name>/<version>`
//! and merges three sources into one [`InventoryReport`]: the directory tree
//! (which versions exist), the [`VersionStateStore`] (which one is active and
//! which are disabled), and the [`ChecksumManifest`] (the recorded checksum of
//! each version's coordinate, resolved through the [`PluginRegistry`]).
//!
//! Scans are read-only and keep no state between calls. Entries that cannot
//! be read are skipped and reported as warnings instead of aborting the scan.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checksum::ChecksumManifest;
use crate::error::InventoryError;
use crate::identity::{Language, PluginIdentity};
use crate::registry::PluginRegistry;
use crate::report::{InventoryReport, PluginInventory, VersionEntry};
use crate::state::{FilesystemStateStore, VersionStateStore};
use crate::version::sort_versions;

/// Scans a plugins tree against a registry and checksum manifest.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use plumb_inventory::{ChecksumManifest, FilesystemStateStore, Inspector, PluginRegistry};
///
/// let root = Path::new("/var/tmp/bundles/plugins");
/// let registry = PluginRegistry::load(&PluginRegistry::identifiers_path(root))?;
/// let checksums = ChecksumManifest::load(Path::new("/var/tmp/bundles/sha1.yml"))?;
/// let report = Inspector::new(&registry, &checksums, FilesystemStateStore).inspect(root)?;
/// for plugin in report.plugins() {
///     println!("{} ({} versions)", plugin.plugin_name, plugin.versions.len());
/// }
/// # Ok::<(), plumb_inventory::InventoryError>(())
/// ```
#[derive(Debug)]
pub struct Inspector<'a, S = FilesystemStateStore> {
    registry: &'a PluginRegistry,
    checksums: &'a ChecksumManifest,
    store: S,
}

impl<'a, S: VersionStateStore> Inspector<'a, S> {
    /// Creates an inspector over the given collaborators.
    #[must_use]
    pub const fn new(registry: &'a PluginRegistry, checksums: &'a ChecksumManifest, store: S) -> Self {
        Self {
            registry,
            checksums,
            store,
        }
    }

    /// Produces a fresh inventory of `plugins_root`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::RootNotFound`] if `plugins_root` is not an
    /// existing directory. Failures below the root become warnings on the
    /// returned report.
    pub fn inspect(&self, plugins_root: &Path) -> Result<InventoryReport, InventoryError> {
        if !plugins_root.is_dir() {
            return Err(InventoryError::RootNotFound {
                path: plugins_root.to_path_buf(),
            });
        }

        let mut report = InventoryReport::default();
        for language in Language::ALL {
            self.scan_language(plugins_root, language, &mut report);
        }
        debug!(
            root = %plugins_root.display(),
            plugins = report.len(),
            warnings = report.warnings().len(),
            "inventory scan complete"
        );
        Ok(report)
    }

    fn scan_language(&self, plugins_root: &Path, language: Language, report: &mut InventoryReport) {
        let subtree = language.subtree(plugins_root);
        if !subtree.is_dir() {
            debug!(path = %subtree.display(), "no plugins installed for language");
            return;
        }

        let Some(plugin_dirs) = list_dirs(&subtree, report, |name| name.starts_with('.')) else {
            return;
        };

        for (plugin_name, plugin_dir) in plugin_dirs {
            if report.contains(&plugin_name) {
                report.warn(
                    plugin_dir,
                    format!("plugin '{plugin_name}' is already installed under another language"),
                );
                continue;
            }
            if let Some(plugin) = self.scan_plugin(language, plugin_name, plugin_dir, report) {
                report.insert(plugin);
            }
        }
    }

    fn scan_plugin(
        &self,
        language: Language,
        plugin_name: String,
        plugin_dir: PathBuf,
        report: &mut InventoryReport,
    ) -> Option<PluginInventory> {
        let entries = list_dirs(&plugin_dir, report, |name| self.store.is_structural(name))?;
        let mut names: Vec<String> = entries.into_iter().map(|(name, _)| name).collect();
        sort_versions(&mut names);

        let identity = self.registry.find_by_plugin_name(&plugin_name, language);
        if identity.is_none() {
            debug!(plugin_name, %language, "plugin is not registered; checksums unavailable");
        }

        let mut versions = Vec::with_capacity(names.len());
        for version in names {
            let flags = match self.store.inspect(&plugin_dir, &version) {
                Ok(flags) => flags,
                Err(error) => {
                    report.warn(plugin_dir.join(&version), error.to_string());
                    continue;
                }
            };
            let sha1 = identity.and_then(|registered| {
                self.recorded_checksum(registered, &plugin_dir, &version, report)
            });
            versions.push(VersionEntry {
                version,
                is_default: flags.is_default,
                is_disabled: flags.is_disabled,
                sha1,
            });
        }

        Some(PluginInventory {
            plugin_key: identity.map_or_else(|| plugin_name.clone(), |i| i.plugin_key().to_owned()),
            plugin_name,
            plugin_path: plugin_dir,
            language,
            coordinate_template: identity.map(|i| i.template().clone()),
            versions,
        })
    }

    fn recorded_checksum(
        &self,
        identity: &PluginIdentity,
        plugin_dir: &Path,
        version: &str,
        report: &mut InventoryReport,
    ) -> Option<String> {
        match identity.template().with_version(version) {
            Ok(coordinate) => self
                .checksums
                .lookup_coordinate(&coordinate)
                .map(str::to_owned),
            Err(error) => {
                report.warn(plugin_dir.join(version), error.to_string());
                None
            }
        }
    }
}

/// Lists subdirectories of `dir` by UTF-8 name, skipping entries `exclude`
/// accepts. Unreadable entries become warnings; an unreadable `dir` yields
/// `None`.
fn list_dirs<F>(
    dir: &Path,
    report: &mut InventoryReport,
    exclude: F,
) -> Option<Vec<(String, PathBuf)>>
where
    F: Fn(&str) -> bool,
{
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            report.warn(dir.to_path_buf(), format!("cannot list directory: {error}"));
            return None;
        }
    };

    let mut dirs = Vec::new();
    for item in entries {
        let entry = match item {
            Ok(entry) => entry,
            Err(error) => {
                report.warn(dir.to_path_buf(), format!("cannot read entry: {error}"));
                continue;
            }
        };
        let path = entry.path();
        let Ok(name) = entry.file_name().into_string() else {
            report.warn(path, String::from("entry name is not valid UTF-8"));
            continue;
        };
        if exclude(&name) {
            continue;
        }
        if !path.is_dir() {
            debug!(path = %path.display(), "ignoring non-directory entry");
            continue;
        }
        dirs.push((name, path));
    }
    Some(dirs)
}

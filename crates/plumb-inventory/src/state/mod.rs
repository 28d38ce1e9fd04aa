//! Active and disabled version state.
//!
//! Which version of a plugin is active, and which versions are disabled, is
//! recorded on disk rather than in memory. [`VersionStateStore`] is the
//! capability the rest of the crate uses to read and change that state, so
//! the inventory scanner never touches the pointer or marker paths itself.
//! [`FilesystemStateStore`] implements it over the plugin directory tree:
//!
//! - the active version is the target of the `SET_DEFAULT` symbolic link in
//!   the plugin directory;
//! - a version is disabled when `<version>/tmp/disabled.txt` exists.
//!
//! The two bits are independent. Disabling the active version leaves the
//! pointer in place and both flags are reported.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::InventoryError;
use crate::persist::atomic_write;

/// Name of the active-version pointer inside a plugin directory.
pub const SET_DEFAULT: &str = "SET_DEFAULT";

/// Directory, relative to a version directory, holding the disabled marker.
pub const DISABLED_MARKER_DIR: &str = "tmp";

/// File name of the disabled marker.
pub const DISABLED_MARKER_FILE: &str = "disabled.txt";

/// Default and disabled bits for one installed version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionFlags {
    /// The version is the target of the active pointer.
    pub is_default: bool,
    /// The version carries the disabled marker.
    pub is_disabled: bool,
}

/// Reads and mutates per-version state for a plugin directory.
pub trait VersionStateStore {
    /// Returns the version the active pointer references, if any.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Io`] if the pointer cannot be read.
    fn active_version(&self, plugin_dir: &Path) -> Result<Option<String>, InventoryError>;

    /// Returns `true` when `version` carries the disabled marker.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Io`] if the marker cannot be checked.
    fn is_disabled(&self, plugin_dir: &Path, version: &str) -> Result<bool, InventoryError>;

    /// Points the active pointer at `version`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::VersionNotInstalled`] when no directory
    /// exists for `version`, or [`InventoryError::Io`] if the pointer cannot
    /// be replaced. The previous pointer survives any failure.
    fn set_active(&self, plugin_dir: &Path, version: &str) -> Result<(), InventoryError>;

    /// Marks `version` as disabled without deleting it.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::VersionNotInstalled`] when no directory
    /// exists for `version`, or [`InventoryError::Io`] if the marker cannot
    /// be written.
    fn disable(&self, plugin_dir: &Path, version: &str) -> Result<(), InventoryError>;

    /// Clears the disabled marker from `version`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::VersionNotInstalled`] when no directory
    /// exists for `version`, or [`InventoryError::Io`] if the marker cannot
    /// be removed.
    fn enable(&self, plugin_dir: &Path, version: &str) -> Result<(), InventoryError>;

    /// Returns `true` when `version` is the target of the active pointer.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`VersionStateStore::active_version`].
    fn is_active(&self, plugin_dir: &Path, version: &str) -> Result<bool, InventoryError> {
        Ok(self.active_version(plugin_dir)?.as_deref() == Some(version))
    }

    /// Returns both flags for `version`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the individual checks.
    fn inspect(&self, plugin_dir: &Path, version: &str) -> Result<VersionFlags, InventoryError> {
        Ok(VersionFlags {
            is_default: self.is_active(plugin_dir, version)?,
            is_disabled: self.is_disabled(plugin_dir, version)?,
        })
    }

    /// Returns `true` for directory entries that record state rather than
    /// name an installed version.
    fn is_structural(&self, entry_name: &str) -> bool {
        entry_name == SET_DEFAULT
    }
}

/// [`VersionStateStore`] backed by the plugin directory tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemStateStore;

impl FilesystemStateStore {
    /// Returns the disabled marker path for `version`.
    #[must_use]
    pub fn disabled_marker(plugin_dir: &Path, version: &str) -> PathBuf {
        plugin_dir
            .join(version)
            .join(DISABLED_MARKER_DIR)
            .join(DISABLED_MARKER_FILE)
    }
}

impl VersionStateStore for FilesystemStateStore {
    fn active_version(&self, plugin_dir: &Path) -> Result<Option<String>, InventoryError> {
        let pointer = plugin_dir.join(SET_DEFAULT);
        let target = match fs::read_link(&pointer) {
            Ok(target) => target,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) if error.kind() == io::ErrorKind::InvalidInput => {
                debug!(path = %pointer.display(), "active pointer is not a link; ignoring");
                return Ok(None);
            }
            Err(error) => return Err(InventoryError::io(&pointer, error)),
        };

        let Some(version) = target.file_name().and_then(|name| name.to_str()) else {
            debug!(path = %pointer.display(), "active pointer has no usable target");
            return Ok(None);
        };
        if !targets_plugin_dir(plugin_dir, &target) {
            debug!(
                path = %pointer.display(),
                target = %target.display(),
                "active pointer leaves the plugin directory"
            );
            return Ok(None);
        }
        if !plugin_dir.join(version).is_dir() {
            debug!(
                path = %pointer.display(),
                version,
                "active pointer references a missing version"
            );
            return Ok(None);
        }
        Ok(Some(version.to_owned()))
    }

    fn is_disabled(&self, plugin_dir: &Path, version: &str) -> Result<bool, InventoryError> {
        let marker = Self::disabled_marker(plugin_dir, version);
        marker
            .try_exists()
            .map_err(|error| InventoryError::io(&marker, error))
    }

    fn set_active(&self, plugin_dir: &Path, version: &str) -> Result<(), InventoryError> {
        installed_version_dir(plugin_dir, version)?;

        let pointer = plugin_dir.join(SET_DEFAULT);
        let staging = plugin_dir.join(format!(".{SET_DEFAULT}.{}", std::process::id()));
        remove_if_present(&staging)?;
        link_version(version, &staging).map_err(|error| InventoryError::io(&staging, error))?;
        if let Err(error) = fs::rename(&staging, &pointer) {
            // The previous pointer is still in place; only the staged link goes.
            if let Err(cleanup) = fs::remove_file(&staging) {
                debug!(path = %staging.display(), error = %cleanup, "failed to drop staged pointer");
            }
            return Err(InventoryError::io(&pointer, error));
        }

        info!(plugin_dir = %plugin_dir.display(), version, "set active version");
        Ok(())
    }

    fn disable(&self, plugin_dir: &Path, version: &str) -> Result<(), InventoryError> {
        installed_version_dir(plugin_dir, version)?;

        let marker = Self::disabled_marker(plugin_dir, version);
        if marker
            .try_exists()
            .map_err(|error| InventoryError::io(&marker, error))?
        {
            debug!(plugin_dir = %plugin_dir.display(), version, "version already disabled");
            return Ok(());
        }
        atomic_write(&marker, b"").map_err(|error| InventoryError::io(&marker, error))?;

        info!(plugin_dir = %plugin_dir.display(), version, "disabled version");
        Ok(())
    }

    fn enable(&self, plugin_dir: &Path, version: &str) -> Result<(), InventoryError> {
        installed_version_dir(plugin_dir, version)?;

        let marker = Self::disabled_marker(plugin_dir, version);
        remove_if_present(&marker)?;

        info!(plugin_dir = %plugin_dir.display(), version, "enabled version");
        Ok(())
    }

    fn is_structural(&self, entry_name: &str) -> bool {
        entry_name == SET_DEFAULT || entry_name.starts_with('.')
    }
}

/// Resolves the directory for `version`, rejecting names that are not a
/// single normal path component.
fn installed_version_dir(plugin_dir: &Path, version: &str) -> Result<PathBuf, InventoryError> {
    let not_installed = || InventoryError::VersionNotInstalled {
        plugin_dir: plugin_dir.to_path_buf(),
        version: version.to_owned(),
    };

    let mut components = Path::new(version).components();
    let single_component = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_component || version == SET_DEFAULT {
        return Err(not_installed());
    }

    let dir = plugin_dir.join(version);
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(not_installed())
    }
}

/// Returns `true` when the pointer `target` names an entry directly inside
/// `plugin_dir`, either as a bare name or through a path whose parent
/// resolves to `plugin_dir`.
fn targets_plugin_dir(plugin_dir: &Path, target: &Path) -> bool {
    let Some(parent) = target.parent() else {
        return true;
    };
    if parent.as_os_str().is_empty() {
        return true;
    }
    let resolved = plugin_dir.join(parent);
    match (resolved.canonicalize(), plugin_dir.canonicalize()) {
        (Ok(resolved_parent), Ok(own_dir)) => resolved_parent == own_dir,
        _ => false,
    }
}

fn remove_if_present(path: &Path) -> Result<(), InventoryError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(InventoryError::io(path, error)),
    }
}

#[cfg(unix)]
fn link_version(version: &str, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(version, link)
}

#[cfg(windows)]
fn link_version(version: &str, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(version, link)
}

//! Persisted mapping from coordinate keys to artefact checksums.
//!
//! The [`ChecksumManifest`] mirrors the `sha1.yml` file kept next to the
//! installed bundles. It never computes digests itself: installers record the
//! checksum of each artefact they materialise through [`ChecksumManifest::upsert`],
//! and the inventory scanner reports whatever value the manifest holds.
//!
//! The file is a YAML document whose `sha1` mapping holds the checksums. Any
//! other top-level sections are preserved across a load and save:
//!
//! ```yaml
//! sha1:
//!   com.foo:foo:tar.gz:1.2.3: '12345'
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::error::InventoryError;
use crate::persist::atomic_write;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ManifestDocument {
    #[serde(default)]
    sha1: BTreeMap<String, String>,
    /// Sections owned by other tools; carried through a save untouched.
    #[serde(flatten)]
    other: BTreeMap<String, serde_json::Value>,
}

/// In-memory view of the checksum manifest.
///
/// # Example
///
/// ```
/// use plumb_inventory::ChecksumManifest;
///
/// let mut manifest = ChecksumManifest::new();
/// manifest.upsert("com.bar:bar:jar:1.0.0", "98765");
/// assert_eq!(manifest.lookup("com.bar:bar:jar:1.0.0"), Some("98765"));
/// assert_eq!(manifest.lookup("com.bar:bar:jar:2.0.0"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecksumManifest {
    entries: BTreeMap<String, String>,
    other: BTreeMap<String, serde_json::Value>,
}

impl ChecksumManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the manifest stored at `path`.
    ///
    /// A missing file is a fresh environment and yields an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Io`] if the file exists but cannot be read,
    /// or [`InventoryError::Manifest`] if its content is not a valid manifest.
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no checksum manifest yet");
                return Ok(Self::new());
            }
            Err(error) => return Err(InventoryError::io(path, error)),
        };

        if contents.trim().is_empty() {
            return Ok(Self::new());
        }

        let document: ManifestDocument =
            serde_saphyr::from_str(&contents).map_err(|error| InventoryError::Manifest {
                path: path.to_path_buf(),
                message: error.to_string(),
            })?;
        debug!(
            path = %path.display(),
            entries = document.sha1.len(),
            "loaded checksum manifest"
        );
        Ok(Self {
            entries: document.sha1,
            other: document.other,
        })
    }

    /// Writes the manifest to `path`, replacing any previous file atomically.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Manifest`] if encoding fails or
    /// [`InventoryError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), InventoryError> {
        let document = ManifestDocument {
            sha1: self.entries.clone(),
            other: self.other.clone(),
        };
        let encoded =
            serde_saphyr::to_string(&document).map_err(|error| InventoryError::Manifest {
                path: path.to_path_buf(),
                message: error.to_string(),
            })?;
        atomic_write(path, encoded.as_bytes()).map_err(|error| InventoryError::io(path, error))?;
        debug!(path = %path.display(), entries = self.entries.len(), "saved checksum manifest");
        Ok(())
    }

    /// Inserts or replaces the checksum recorded for `key`.
    pub fn upsert(&mut self, key: impl Into<String>, checksum: impl Into<String>) {
        self.entries.insert(key.into(), checksum.into());
    }

    /// Records the checksum for a coordinate.
    pub fn upsert_coordinate(&mut self, coordinate: &Coordinate, checksum: impl Into<String>) {
        self.upsert(coordinate.key(), checksum);
    }

    /// Returns the checksum recorded for `key`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the checksum recorded for a coordinate.
    #[must_use]
    pub fn lookup_coordinate(&self, coordinate: &Coordinate) -> Option<&str> {
        self.lookup(&coordinate.key())
    }

    /// Drops the entry for `key`, returning its checksum if one existed.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Iterates over `(key, checksum)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, checksum)| (key.as_str(), checksum.as_str()))
    }

    /// Returns the number of recorded checksums.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no checksum is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;

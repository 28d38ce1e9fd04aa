//! Installed plugin inventory for a bundles directory.
//!
//! Plugins are installed beneath a plugins root as
//! `<root>/<language>/<plugin_name>/<version>/`. This crate answers the
//! question "what is installed, which version is active, which versions are
//! disabled, and what checksum did the installer record for each?" by
//! combining four pieces:
//!
//! - [`PluginRegistry`] maps a short plugin key to its on-disk name, its
//!   [`Language`] and its [`CoordinateTemplate`];
//! - [`ChecksumManifest`] maps full [`Coordinate`] keys to recorded checksums;
//! - [`VersionStateStore`] reads and changes the active and disabled state of
//!   individual versions ([`FilesystemStateStore`] is the on-disk form);
//! - [`Inspector`] walks the tree and merges the above into an
//!   [`InventoryReport`].
//!
//! Version directories are ordered with [`version::compare_versions`], so
//! `1.10` sorts after `1.9`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use plumb_inventory::{
//!     ChecksumManifest, CoordinateTemplate, FilesystemStateStore, Inspector, PluginRegistry,
//!     VersionStateStore,
//! };
//!
//! let root = Path::new("/var/tmp/bundles/plugins");
//! let mut registry = PluginRegistry::new();
//! registry.register(
//!     "foo",
//!     "plugin_foo",
//!     "ruby",
//!     CoordinateTemplate::new("com.foo", "foo", "tar.gz"),
//! )?;
//!
//! let plugin_dir = root.join("ruby").join("plugin_foo");
//! FilesystemStateStore.set_active(&plugin_dir, "2.0.1")?;
//!
//! let checksums = ChecksumManifest::load(Path::new("/var/tmp/bundles/sha1.yml"))?;
//! let report = Inspector::new(&registry, &checksums, FilesystemStateStore).inspect(root)?;
//! if let Some(foo) = report.get("plugin_foo") {
//!     assert_eq!(foo.default_version().map(|v| v.version.as_str()), Some("2.0.1"));
//! }
//! # Ok::<(), plumb_inventory::InventoryError>(())
//! ```

pub mod checksum;
pub mod coordinate;
pub mod error;
pub mod identity;
pub mod inspector;
mod persist;
pub mod registry;
pub mod report;
pub mod state;
pub mod version;

#[cfg(test)]
mod tests;

pub use self::checksum::ChecksumManifest;
pub use self::coordinate::{Coordinate, CoordinateTemplate};
pub use self::error::InventoryError;
pub use self::identity::{Language, PluginIdentity};
pub use self::inspector::Inspector;
pub use self::registry::PluginRegistry;
pub use self::report::{InventoryReport, PluginInventory, ScanWarning, VersionEntry};
pub use self::state::{FilesystemStateStore, VersionFlags, VersionStateStore};

//! Crate-level integration and BDD tests, plus the shared install fixture.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::checksum::ChecksumManifest;
use crate::coordinate::CoordinateTemplate;
use crate::identity::Language;
use crate::inspector::Inspector;
use crate::registry::PluginRegistry;
use crate::report::InventoryReport;
use crate::state::{FilesystemStateStore, VersionStateStore};


/// Scratch bundles directory populated the way an installer would.
pub(crate) struct Bundles {
    dir: TempDir,
    pub(crate) registry: PluginRegistry,
    pub(crate) checksums: ChecksumManifest,
}

/// Description of one plugin to lay down in [`Bundles`].
pub(crate) struct PluginFixture<'a> {
    pub(crate) key: &'a str,
    pub(crate) name: &'a str,
    pub(crate) language: &'a str,
    pub(crate) template: CoordinateTemplate,
    pub(crate) versions: &'a [(&'a str, &'a str)],
    pub(crate) active: Option<&'a str>,
    pub(crate) disabled: &'a [&'a str],
}

impl Bundles {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().expect("create bundles dir");
        fs::create_dir_all(dir.path().join("plugins").join("ruby")).expect("ruby subtree");
        fs::create_dir_all(dir.path().join("plugins").join("java")).expect("java subtree");
        Self {
            dir,
            registry: PluginRegistry::new(),
            checksums: ChecksumManifest::new(),
        }
    }

    pub(crate) fn plugins_root(&self) -> PathBuf {
        self.dir.path().join("plugins")
    }

    pub(crate) fn manifest_path(&self) -> PathBuf {
        self.dir.path().join("sha1.yml")
    }

    pub(crate) fn plugin_dir(&self, language: &str, name: &str) -> PathBuf {
        self.plugins_root().join(language).join(name)
    }

    /// Creates version directories with a payload, registers the plugin,
    /// records checksums, then applies the active and disabled state.
    pub(crate) fn add_plugin(&mut self, fixture: &PluginFixture<'_>) {
        let plugin_dir = self.plugin_dir(fixture.language, fixture.name);
        self.registry
            .register(fixture.key, fixture.name, fixture.language, fixture.template.clone())
            .expect("register plugin");
        for (version, sha1) in fixture.versions {
            let coordinate = fixture.template.with_version(version).expect("coordinate");
            self.checksums.upsert_coordinate(&coordinate, *sha1);

            let version_dir = plugin_dir.join(version);
            fs::create_dir_all(&version_dir).expect("create version dir");
            let payload = if fixture.language == "ruby" {
                String::from("ROOT")
            } else {
                format!("{}.jar", fixture.name)
            };
            fs::write(version_dir.join(payload), b"").expect("touch payload");
        }

        let store = FilesystemStateStore;
        if let Some(active) = fixture.active {
            store.set_active(&plugin_dir, active).expect("set active");
        }
        for version in fixture.disabled {
            store.disable(&plugin_dir, version).expect("disable");
        }
    }

    pub(crate) fn add_foo_and_bar(&mut self) {
        self.add_plugin(&PluginFixture {
            key: "foo",
            name: "plugin_foo",
            language: "ruby",
            template: CoordinateTemplate::new("com.foo", "foo", "tar.gz"),
            versions: &[("1.2.3", "12345"), ("2.0.0", "23456"), ("2.0.1", "34567")],
            active: Some("2.0.1"),
            disabled: &["1.2.3"],
        });
        self.add_plugin(&PluginFixture {
            key: "bar",
            name: "plugin_bar",
            language: "java",
            template: CoordinateTemplate::new("com.bar", "bar", "jar"),
            versions: &[("1.0.0", "98765")],
            active: None,
            disabled: &[],
        });
    }

    pub(crate) fn inspect(&self) -> InventoryReport {
        self.inspect_root(&self.plugins_root())
    }

    pub(crate) fn inspect_root(&self, root: &Path) -> InventoryReport {
        Inspector::new(&self.registry, &self.checksums, FilesystemStateStore)
            .inspect(root)
            .expect("inspect plugins root")
    }
}

#[test]
fn end_to_end_inventory_after_persisting_state() {
    let mut bundles = Bundles::new();
    bundles.add_foo_and_bar();

    // Persist and reload everything the way separate invocations would.
    bundles
        .checksums
        .save(&bundles.manifest_path())
        .expect("save manifest");
    let registry_path = PluginRegistry::identifiers_path(&bundles.plugins_root());
    bundles.registry.save(&registry_path).expect("save registry");
    let registry = PluginRegistry::load(&registry_path).expect("load registry");
    let checksums = ChecksumManifest::load(&bundles.manifest_path()).expect("load manifest");

    let report = Inspector::new(&registry, &checksums, FilesystemStateStore)
        .inspect(&bundles.plugins_root())
        .expect("inspect");

    assert_eq!(report.len(), 2);
    assert!(report.warnings().is_empty(), "{:?}", report.warnings());

    let bar = report.get("plugin_bar").expect("plugin_bar");
    assert_eq!(bar.plugin_key, "bar");
    assert_eq!(bar.language, Language::Java);
    assert_eq!(bar.plugin_path, bundles.plugin_dir("java", "plugin_bar"));

    let foo = report.get("plugin_foo").expect("plugin_foo");
    assert_eq!(foo.plugin_path, bundles.plugin_dir("ruby", "plugin_foo"));
    assert_eq!(
        foo.default_version().map(|entry| entry.version.as_str()),
        Some("2.0.1")
    );
    assert_eq!(
        foo.version("2.0.0").and_then(|entry| entry.sha1.as_deref()),
        Some("23456")
    );
}

#[test]
fn report_serialises_for_presentation_layers() {
    let mut bundles = Bundles::new();
    bundles.add_foo_and_bar();
    let report = bundles.inspect();

    let value = serde_json::to_value(&report).expect("serialise report");
    let foo_versions = &value["plugins"]["plugin_foo"]["versions"];
    assert_eq!(foo_versions[0]["version"], "1.2.3");
    assert_eq!(foo_versions[0]["is_disabled"], true);
    assert_eq!(foo_versions[2]["is_default"], true);
    assert_eq!(value["plugins"]["plugin_bar"]["versions"][0]["sha1"], "98765");
    assert_eq!(value["warnings"], serde_json::json!([]));
}

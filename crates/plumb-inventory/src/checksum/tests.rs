//! Unit tests for the checksum manifest.

use std::fs;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;

#[fixture]
fn scratch() -> TempDir {
    TempDir::new().expect("create temp dir")
}

fn populated() -> ChecksumManifest {
    let mut manifest = ChecksumManifest::new();
    manifest.upsert("com.foo:foo:tar.gz:1.2.3", "12345");
    manifest.upsert("com.foo:foo:tar.gz:2.0.0", "23456");
    manifest.upsert("com.bar:bar:jar:sources:1.0.0", "98765");
    manifest
}

// ---------------------------------------------------------------------------
// In-memory operations
// ---------------------------------------------------------------------------

#[test]
fn upsert_overwrites_previous_value() {
    let mut manifest = ChecksumManifest::new();
    manifest.upsert("com.foo:foo:tar.gz:1.2.3", "old");
    manifest.upsert("com.foo:foo:tar.gz:1.2.3", "new");
    assert_eq!(manifest.len(), 1);
    assert_eq!(manifest.lookup("com.foo:foo:tar.gz:1.2.3"), Some("new"));
}

#[test]
fn lookup_unknown_key_is_none() {
    assert_eq!(populated().lookup("com.foo:foo:tar.gz:9.9.9"), None);
}

#[test]
fn coordinate_helpers_use_canonical_key() {
    let coordinate =
        Coordinate::new("com.foo", "foo", "2.0.1", "tar.gz", None).expect("valid coordinate");
    let mut manifest = ChecksumManifest::new();
    manifest.upsert_coordinate(&coordinate, "34567");
    assert_eq!(manifest.lookup("com.foo:foo:tar.gz:2.0.1"), Some("34567"));
    assert_eq!(manifest.lookup_coordinate(&coordinate), Some("34567"));
}

#[test]
fn remove_drops_entry() {
    let mut manifest = populated();
    assert_eq!(
        manifest.remove("com.foo:foo:tar.gz:1.2.3").as_deref(),
        Some("12345")
    );
    assert_eq!(manifest.remove("com.foo:foo:tar.gz:1.2.3"), None);
    assert_eq!(manifest.len(), 2);
}

#[test]
fn entries_iterate_in_key_order() {
    let manifest = populated();
    let keys: Vec<&str> = manifest.entries().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![
            "com.bar:bar:jar:sources:1.0.0",
            "com.foo:foo:tar.gz:1.2.3",
            "com.foo:foo:tar.gz:2.0.0",
        ]
    );
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[rstest]
fn load_missing_file_yields_empty_manifest(scratch: TempDir) {
    let manifest = ChecksumManifest::load(&scratch.path().join("sha1.yml")).expect("load");
    assert!(manifest.is_empty());
}

#[rstest]
fn load_blank_file_yields_empty_manifest(scratch: TempDir) {
    let path = scratch.path().join("sha1.yml");
    fs::write(&path, "\n").expect("write blank file");
    assert!(ChecksumManifest::load(&path).expect("load").is_empty());
}

#[rstest]
fn save_then_load_round_trips(scratch: TempDir) {
    let path = scratch.path().join("sha1.yml");
    let manifest = populated();
    manifest.save(&path).expect("save");
    let reloaded = ChecksumManifest::load(&path).expect("load");
    assert_eq!(reloaded, manifest);
}

#[rstest]
fn save_replaces_previous_contents(scratch: TempDir) {
    let path = scratch.path().join("sha1.yml");
    populated().save(&path).expect("first save");

    let mut smaller = ChecksumManifest::new();
    smaller.upsert("com.bar:bar:jar:1.0.0", "98765");
    smaller.save(&path).expect("second save");

    assert_eq!(ChecksumManifest::load(&path).expect("load"), smaller);
}

#[rstest]
fn save_creates_missing_parent_directories(scratch: TempDir) {
    let path = scratch.path().join("nested").join("bundles").join("sha1.yml");
    populated().save(&path).expect("save");
    assert!(path.is_file());
}

#[rstest]
fn save_leaves_no_temporary_files(scratch: TempDir) {
    let path = scratch.path().join("sha1.yml");
    populated().save(&path).expect("save");
    let names: Vec<String> = fs::read_dir(scratch.path())
        .expect("read dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, vec!["sha1.yml"]);
}

#[rstest]
fn saved_file_uses_sha1_section(scratch: TempDir) {
    let path = scratch.path().join("sha1.yml");
    populated().save(&path).expect("save");
    let contents = fs::read_to_string(&path).expect("read");
    assert!(contents.contains("sha1"), "unexpected document: {contents}");
    assert!(
        contents.contains("com.foo:foo:tar.gz:1.2.3"),
        "unexpected document: {contents}"
    );
}

#[rstest]
fn load_reads_hand_written_document(scratch: TempDir) {
    let path = scratch.path().join("sha1.yml");
    fs::write(
        &path,
        "sha1:\n  \"com.foo:foo:tar.gz:1.2.3\": \"abc123\"\n",
    )
    .expect("write manifest");
    let manifest = ChecksumManifest::load(&path).expect("load");
    assert_eq!(manifest.lookup("com.foo:foo:tar.gz:1.2.3"), Some("abc123"));
}

#[rstest]
fn load_rejects_malformed_document(scratch: TempDir) {
    let path = scratch.path().join("sha1.yml");
    fs::write(&path, "sha1: [unterminated\n").expect("write manifest");
    let err = ChecksumManifest::load(&path).expect_err("malformed manifest");
    assert!(matches!(err, InventoryError::Manifest { .. }), "{err:?}");
}

#[rstest]
fn save_keeps_sections_owned_by_other_tools(scratch: TempDir) {
    let path = scratch.path().join("sha1.yml");
    fs::write(
        &path,
        "md5:\n  \"com.foo:foo:tar.gz:1.2.3\": \"d41d8\"\nsha1:\n  \"com.foo:foo:tar.gz:1.2.3\": \"abc123\"\n",
    )
    .expect("write manifest");

    let mut manifest = ChecksumManifest::load(&path).expect("load");
    manifest.upsert("com.foo:foo:tar.gz:2.0.0", "def456");
    manifest.save(&path).expect("save");

    let contents = fs::read_to_string(&path).expect("read");
    assert!(contents.contains("md5"), "unexpected document: {contents}");
    assert!(contents.contains("d41d8"), "unexpected document: {contents}");
    let reloaded = ChecksumManifest::load(&path).expect("reload");
    assert_eq!(reloaded.lookup("com.foo:foo:tar.gz:2.0.0"), Some("def456"));
    assert_eq!(reloaded, manifest);
}

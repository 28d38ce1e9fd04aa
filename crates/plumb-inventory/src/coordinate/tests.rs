//! Unit tests for coordinates and key building.

use rstest::rstest;

use super::*;

fn foo(version: &str) -> Coordinate {
    Coordinate::new("com.foo", "foo", version, "tar.gz", None).expect("valid coordinate")
}

// ---------------------------------------------------------------------------
// Key format
// ---------------------------------------------------------------------------

#[test]
fn key_without_classifier_omits_segment() {
    assert_eq!(foo("1.2.3").key(), "com.foo:foo:tar.gz:1.2.3");
}

#[test]
fn key_with_classifier_places_it_before_version() {
    let coordinate = Coordinate::new("com.foo", "foo", "1.2.3", "jar", Some("jar-with-deps"))
        .expect("valid coordinate");
    assert_eq!(coordinate.key(), "com.foo:foo:jar:jar-with-deps:1.2.3");
}

#[test]
fn key_is_stable_across_calls() {
    let first = build_key("com.foo", "foo", "1.2.3", "tar.gz", None).expect("first");
    let second = build_key("com.foo", "foo", "1.2.3", "tar.gz", None).expect("second");
    assert_eq!(first, second);
}

#[test]
fn template_and_direct_construction_agree() {
    let template = CoordinateTemplate::new("com.foo", "foo", "tar.gz");
    let via_template = template.with_version("2.0.1").expect("valid");
    assert_eq!(via_template, foo("2.0.1"));
    assert_eq!(via_template.template(), template);
}

#[rstest]
#[case::group(("org.foo", "foo", "1.2.3", "tar.gz", None))]
#[case::artifact(("com.foo", "fooz", "1.2.3", "tar.gz", None))]
#[case::version(("com.foo", "foo", "1.2.4", "tar.gz", None))]
#[case::packaging(("com.foo", "foo", "1.2.3", "jar", None))]
#[case::classifier(("com.foo", "foo", "1.2.3", "tar.gz", Some("sources")))]
fn varying_one_field_changes_key(
    #[case] fields: (&str, &str, &str, &str, Option<&str>),
) {
    let (group, artifact, version, packaging, classifier) = fields;
    let varied = build_key(group, artifact, version, packaging, classifier).expect("valid");
    assert_ne!(varied, foo("1.2.3").key());
}

#[test]
fn missing_classifier_never_collides_with_empty_classifier() {
    let without = build_key("com.foo", "foo", "1.2.3", "tar.gz", None).expect("without");
    let empty = build_key("com.foo", "foo", "1.2.3", "tar.gz", Some("")).expect("empty");
    assert_ne!(without, empty);
    assert!(!without.contains("null"));
    assert_eq!(empty, "com.foo:foo:tar.gz::1.2.3");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[rstest]
#[case::blank_group(("", "foo", "1.0", "jar"), "group")]
#[case::whitespace_artifact(("com.foo", "  ", "1.0", "jar"), "artifact")]
#[case::blank_version(("com.foo", "foo", "", "jar"), "version")]
#[case::blank_packaging(("com.foo", "foo", "1.0", ""), "packaging")]
#[case::separator_in_group(("com:foo", "foo", "1.0", "jar"), "group")]
fn invalid_fields_are_rejected(
    #[case] fields: (&str, &str, &str, &str),
    #[case] expected_field: &str,
) {
    let (group, artifact, version, packaging) = fields;
    let err = Coordinate::new(group, artifact, version, packaging, None)
        .expect_err("coordinate should be rejected");
    match err {
        InventoryError::InvalidCoordinate { field, .. } => assert_eq!(field, expected_field),
        other => panic!("expected InvalidCoordinate, got {other:?}"),
    }
}

#[test]
fn classifier_with_separator_is_rejected() {
    let err = Coordinate::new("com.foo", "foo", "1.0", "jar", Some("a:b"))
        .expect_err("classifier should be rejected");
    assert!(matches!(
        err,
        InventoryError::InvalidCoordinate {
            field: "classifier",
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[rstest]
#[case::plain("com.bar:bar:jar:1.0.0")]
#[case::classified("com.foo:foo:jar:sources:1.2.3")]
#[case::empty_classifier("com.foo:foo:tar.gz::1.2.3")]
fn parsed_key_renders_identically(#[case] key: &str) {
    let coordinate: Coordinate = key.parse().expect("parse key");
    assert_eq!(coordinate.key(), key);
}

#[test]
fn parse_splits_fields() {
    let coordinate: Coordinate = "com.foo:foo:jar:sources:1.2.3".parse().expect("parse");
    assert_eq!(coordinate.group(), "com.foo");
    assert_eq!(coordinate.artifact(), "foo");
    assert_eq!(coordinate.packaging(), "jar");
    assert_eq!(coordinate.classifier(), Some("sources"));
    assert_eq!(coordinate.version(), "1.2.3");
}

#[rstest]
#[case::too_few("com.foo:foo:jar")]
#[case::too_many("a:b:c:d:e:f")]
fn parse_rejects_wrong_segment_count(#[case] key: &str) {
    let err = key.parse::<Coordinate>().expect_err("should fail");
    assert!(matches!(
        err,
        InventoryError::InvalidCoordinate { field: "key", .. }
    ));
}

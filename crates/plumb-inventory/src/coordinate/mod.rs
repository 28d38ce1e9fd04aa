//! Package coordinates and their canonical lookup keys.
//!
//! A [`Coordinate`] names one artefact build: group, artifact, packaging,
//! an optional classifier, and a version. Its [`Coordinate::key`] is the
//! string both the checksum manifest and the inventory scanner use to agree on
//! lookups. The key has the form `group:artifact:packaging:version`, with the
//! classifier inserted before the version when present.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

const SEPARATOR: char = ':';

/// Coordinate fields minus the version, as recorded for a registered plugin.
///
/// # Example
///
/// ```
/// use plumb_inventory::CoordinateTemplate;
///
/// let template = CoordinateTemplate::new("com.foo", "foo", "tar.gz");
/// let coordinate = template.with_version("1.2.3").expect("valid coordinate");
/// assert_eq!(coordinate.key(), "com.foo:foo:tar.gz:1.2.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordinateTemplate {
    group: String,
    artifact: String,
    packaging: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    classifier: Option<String>,
}

impl CoordinateTemplate {
    /// Creates a template without a classifier.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        packaging: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            packaging: packaging.into(),
            classifier: None,
        }
    }

    /// Sets the classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Checks every field against the coordinate grammar.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidCoordinate`] if a required field is
    /// blank or any field contains the `:` separator.
    pub fn validate(&self) -> Result<(), InventoryError> {
        required("group", &self.group)?;
        required("artifact", &self.artifact)?;
        required("packaging", &self.packaging)?;
        if let Some(classifier) = &self.classifier {
            unseparated("classifier", classifier)?;
        }
        Ok(())
    }

    /// Completes the template into a full coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidCoordinate`] if any field is blank or
    /// contains the `:` separator.
    pub fn with_version(&self, version: &str) -> Result<Coordinate, InventoryError> {
        Coordinate::new(
            &self.group,
            &self.artifact,
            version,
            &self.packaging,
            self.classifier.as_deref(),
        )
    }

    /// Returns the group.
    #[must_use]
    pub const fn group(&self) -> &str {
        self.group.as_str()
    }

    /// Returns the artifact.
    #[must_use]
    pub const fn artifact(&self) -> &str {
        self.artifact.as_str()
    }

    /// Returns the packaging.
    #[must_use]
    pub const fn packaging(&self) -> &str {
        self.packaging.as_str()
    }

    /// Returns the classifier, if any.
    #[must_use]
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }
}

/// Fully-qualified, validated package coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
    packaging: String,
    classifier: Option<String>,
}

impl Coordinate {
    /// Validates the fields and builds a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidCoordinate`] when a required field is
    /// blank or when any field contains `:`.
    pub fn new(
        group: &str,
        artifact: &str,
        version: &str,
        packaging: &str,
        classifier: Option<&str>,
    ) -> Result<Self, InventoryError> {
        let coordinate = Self {
            group: required("group", group)?,
            artifact: required("artifact", artifact)?,
            version: required("version", version)?,
            packaging: required("packaging", packaging)?,
            classifier: classifier
                .map(|value| unseparated("classifier", value))
                .transpose()?,
        };
        Ok(coordinate)
    }

    /// Returns the canonical lookup key.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Returns the group.
    #[must_use]
    pub const fn group(&self) -> &str {
        self.group.as_str()
    }

    /// Returns the artifact.
    #[must_use]
    pub const fn artifact(&self) -> &str {
        self.artifact.as_str()
    }

    /// Returns the version.
    #[must_use]
    pub const fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Returns the packaging.
    #[must_use]
    pub const fn packaging(&self) -> &str {
        self.packaging.as_str()
    }

    /// Returns the classifier, if any.
    #[must_use]
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Drops the version, yielding the template this coordinate came from.
    #[must_use]
    pub fn template(&self) -> CoordinateTemplate {
        CoordinateTemplate {
            group: self.group.clone(),
            artifact: self.artifact.clone(),
            packaging: self.packaging.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.packaging)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)
    }
}

impl FromStr for Coordinate {
    type Err = InventoryError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = key.split(SEPARATOR).collect();
        match parts.as_slice() {
            [group, artifact, packaging, version] => {
                Self::new(group, artifact, version, packaging, None)
            }
            [group, artifact, packaging, classifier, version] => {
                Self::new(group, artifact, version, packaging, Some(classifier))
            }
            _ => Err(InventoryError::invalid_coordinate(
                "key",
                format!("'{key}' must have four or five ':'-separated segments"),
            )),
        }
    }
}

/// Builds the canonical key for the given coordinate fields.
///
/// # Errors
///
/// Returns [`InventoryError::InvalidCoordinate`] on the same conditions as
/// [`Coordinate::new`].
///
/// # Example
///
/// ```
/// use plumb_inventory::coordinate::build_key;
///
/// let key = build_key("com.bar", "bar", "1.0.0", "jar", None).expect("valid");
/// assert_eq!(key, "com.bar:bar:jar:1.0.0");
/// ```
pub fn build_key(
    group: &str,
    artifact: &str,
    version: &str,
    packaging: &str,
    classifier: Option<&str>,
) -> Result<String, InventoryError> {
    Coordinate::new(group, artifact, version, packaging, classifier).map(|c| c.key())
}

fn required(field: &'static str, value: &str) -> Result<String, InventoryError> {
    if value.trim().is_empty() {
        return Err(InventoryError::invalid_coordinate(
            field,
            "must not be empty",
        ));
    }
    unseparated(field, value)
}

fn unseparated(field: &'static str, value: &str) -> Result<String, InventoryError> {
    if value.contains(SEPARATOR) {
        return Err(InventoryError::invalid_coordinate(
            field,
            format!("must not contain '{SEPARATOR}', got '{value}'"),
        ));
    }
    Ok(value.to_owned())
}

#[cfg(test)]
mod tests;

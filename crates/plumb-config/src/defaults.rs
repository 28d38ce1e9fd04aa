use camino::Utf8Path;

use crate::logging::LogFormat;

/// Plugins root used when none is configured.
pub const DEFAULT_PLUGINS_ROOT: &str = "/var/tmp/bundles/plugins";

/// Checksum manifest used when none is configured.
pub const DEFAULT_CHECKSUM_MANIFEST: &str = "/var/tmp/bundles/sha1.yml";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default plugins root as a path.
#[must_use]
pub fn default_plugins_root() -> &'static Utf8Path {
    Utf8Path::new(DEFAULT_PLUGINS_ROOT)
}

/// Default checksum manifest as a path.
#[must_use]
pub fn default_checksum_manifest() -> &'static Utf8Path {
    Utf8Path::new(DEFAULT_CHECKSUM_MANIFEST)
}

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

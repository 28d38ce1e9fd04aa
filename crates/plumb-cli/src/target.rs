//! Resolution of the `<plugin>` command argument to a plugin directory.

use std::path::{Path, PathBuf};

use plumb_inventory::{Language, PluginRegistry};

use crate::AppError;

/// Resolves `plugin` against the registry first, then as a
/// `<language>/<plugin_name>` path beneath `plugins_root`.
pub(crate) fn resolve_plugin_dir(
    plugin: &str,
    plugins_root: &Path,
    registry: &PluginRegistry,
) -> Result<PathBuf, AppError> {
    if let Some(identity) = registry.get(plugin) {
        return Ok(identity.plugin_dir(plugins_root));
    }

    let Some((language_text, plugin_name)) = plugin.split_once('/') else {
        return Err(AppError::UnknownPlugin {
            plugin: plugin.to_owned(),
        });
    };
    let language: Language = language_text.parse()?;
    if let Some(reason) = invalid_name_reason(plugin_name) {
        return Err(AppError::InvalidPluginPath {
            plugin: plugin.to_owned(),
            reason,
        });
    }
    Ok(language.subtree(plugins_root).join(plugin_name))
}

fn invalid_name_reason(plugin_name: &str) -> Option<&'static str> {
    if plugin_name.trim().is_empty() {
        Some("plugin name is empty")
    } else if plugin_name.contains(['/', '\\']) {
        Some("plugin name must be a single path component")
    } else if plugin_name == "." || plugin_name == ".." {
        Some("plugin name must not be a relative directory")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use plumb_inventory::CoordinateTemplate;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry
            .register(
                "foo",
                "plugin_foo",
                "ruby",
                CoordinateTemplate::new("com.foo", "foo", "tar.gz"),
            )
            .expect("register foo");
        registry
    }

    #[rstest]
    fn registered_key_resolves_through_the_registry(registry: PluginRegistry) {
        let dir = resolve_plugin_dir("foo", Path::new("/plugins"), &registry).expect("resolve");
        assert_eq!(dir, Path::new("/plugins/ruby/plugin_foo"));
    }

    #[rstest]
    #[case("java/plugin_bar", "/plugins/java/plugin_bar")]
    #[case("Ruby/plugin_local", "/plugins/ruby/plugin_local")]
    fn language_paths_resolve_without_registration(
        registry: PluginRegistry,
        #[case] plugin: &str,
        #[case] expected: &str,
    ) {
        let dir = resolve_plugin_dir(plugin, Path::new("/plugins"), &registry).expect("resolve");
        assert_eq!(dir, Path::new(expected));
    }

    #[rstest]
    fn unregistered_bare_name_is_unknown(registry: PluginRegistry) {
        let error = resolve_plugin_dir("bar", Path::new("/plugins"), &registry)
            .expect_err("bare unknown name");
        assert!(matches!(error, AppError::UnknownPlugin { plugin } if plugin == "bar"));
    }

    #[rstest]
    #[case("java/..")]
    #[case("java/a/b")]
    #[case("java/")]
    fn unsafe_plugin_names_are_rejected(registry: PluginRegistry, #[case] plugin: &str) {
        let error = resolve_plugin_dir(plugin, Path::new("/plugins"), &registry)
            .expect_err("unsafe name");
        assert!(matches!(error, AppError::InvalidPluginPath { .. }), "{error:?}");
    }

    #[rstest]
    fn unknown_language_is_rejected(registry: PluginRegistry) {
        let error = resolve_plugin_dir("python/plugin_py", Path::new("/plugins"), &registry)
            .expect_err("unknown language");
        assert!(matches!(error, AppError::Inventory(_)), "{error:?}");
    }
}

//! Execution of parsed commands against the configured plugin tree.

use std::io::Write;

use plumb_config::Config;
use plumb_inventory::{
    ChecksumManifest, FilesystemStateStore, Inspector, PluginRegistry, VersionStateStore,
};
use tracing::debug;

use crate::cli::{CliCommand, VersionTarget};
use crate::output::{ResolvedOutputFormat, StateChange, render_report, render_state_change};
use crate::target::resolve_plugin_dir;
use crate::{AppError, IoStreams};

/// State transitions exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    SetActive,
    Disable,
    Enable,
}

impl Transition {
    const fn as_str(self) -> &'static str {
        match self {
            Self::SetActive => "set-active",
            Self::Disable => "disable",
            Self::Enable => "enable",
        }
    }
}

pub(crate) fn execute<W, E>(
    command: &CliCommand,
    config: &Config,
    format: ResolvedOutputFormat,
    io: &mut IoStreams<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let plugins_root = config.plugins_root().as_std_path();
    let registry = PluginRegistry::load(&PluginRegistry::identifiers_path(plugins_root))?;
    match command {
        CliCommand::Inspect => inspect(config, &registry, format, io),
        CliCommand::SetActive(target) => {
            transition(Transition::SetActive, target, config, &registry, format, io)
        }
        CliCommand::Disable(target) => {
            transition(Transition::Disable, target, config, &registry, format, io)
        }
        CliCommand::Enable(target) => {
            transition(Transition::Enable, target, config, &registry, format, io)
        }
    }
}

fn inspect<W, E>(
    config: &Config,
    registry: &PluginRegistry,
    format: ResolvedOutputFormat,
    io: &mut IoStreams<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let checksums = ChecksumManifest::load(config.checksum_manifest().as_std_path())?;
    let report = Inspector::new(registry, &checksums, FilesystemStateStore)
        .inspect(config.plugins_root().as_std_path())?;
    debug!(plugins = report.len(), "rendering inventory");

    let rendered = render_report(&report, format)?;
    io.stdout
        .write_all(rendered.as_bytes())
        .map_err(AppError::WriteOutput)?;
    for warning in report.warnings() {
        writeln!(
            io.stderr,
            "warning: {}: {}",
            warning.path.display(),
            warning.message
        )
        .map_err(AppError::WriteOutput)?;
    }
    Ok(())
}

fn transition<W, E>(
    action: Transition,
    target: &VersionTarget,
    config: &Config,
    registry: &PluginRegistry,
    format: ResolvedOutputFormat,
    io: &mut IoStreams<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let plugin_dir = resolve_plugin_dir(
        &target.plugin,
        config.plugins_root().as_std_path(),
        registry,
    )?;
    let store = FilesystemStateStore;
    match action {
        Transition::SetActive => store.set_active(&plugin_dir, &target.version)?,
        Transition::Disable => store.disable(&plugin_dir, &target.version)?,
        Transition::Enable => store.enable(&plugin_dir, &target.version)?,
    }

    let change = StateChange {
        action: action.as_str(),
        flags: store.inspect(&plugin_dir, &target.version)?,
        plugin_path: plugin_dir,
        version: target.version.clone(),
    };
    let rendered = render_state_change(&change, format)?;
    io.stdout
        .write_all(rendered.as_bytes())
        .map_err(AppError::WriteOutput)
}

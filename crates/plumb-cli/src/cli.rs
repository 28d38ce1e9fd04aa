//! Command-line argument definitions for `plumb`.

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Command-line interface for the plugin inventory tool.
///
/// Configuration flags (`--plugins-root`, `--checksum-manifest`,
/// `--log-filter`, `--log-format`, `--config-path`) are stripped before this
/// parser runs and must therefore precede everything else.
#[derive(Parser, Debug)]
#[command(name = "plumb", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Controls how results are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Operations on the installed plugin tree.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Lists every installed plugin and version.
    Inspect,
    /// Points the plugin's active pointer at a version.
    SetActive(VersionTarget),
    /// Marks a version as disabled.
    Disable(VersionTarget),
    /// Clears a version's disabled marker.
    Enable(VersionTarget),
}

/// A plugin version named on the command line.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct VersionTarget {
    /// Registered plugin key, or `<language>/<plugin_name>`.
    #[arg(value_name = "PLUGIN")]
    pub(crate) plugin: String,
    /// Installed version directory name.
    #[arg(value_name = "VERSION")]
    pub(crate) version: String,
}

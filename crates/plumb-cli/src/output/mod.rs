//! Rendering of inventory reports and state changes.
//!
//! JSON output is the serialised value with a trailing newline. Human output
//! is an aligned table for reports and a one-line summary for state changes.

mod table;

use std::path::PathBuf;

use clap::ValueEnum;
use plumb_inventory::{InventoryReport, VersionFlags};
use serde::Serialize;

use crate::AppError;

use self::table::Table;

/// Output format selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit JSON.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Aligned text.
    Human,
    /// Serialised JSON.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto if stdout_is_terminal => ResolvedOutputFormat::Human,
            Self::Auto | Self::Json => ResolvedOutputFormat::Json,
            Self::Human => ResolvedOutputFormat::Human,
        }
    }
}

/// Result of a `set-active`, `disable` or `enable` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StateChange {
    pub(crate) action: &'static str,
    pub(crate) plugin_path: PathBuf,
    pub(crate) version: String,
    #[serde(flatten)]
    pub(crate) flags: VersionFlags,
}

pub(crate) fn render_report(
    report: &InventoryReport,
    format: ResolvedOutputFormat,
) -> Result<String, AppError> {
    match format {
        ResolvedOutputFormat::Json => to_json(report),
        ResolvedOutputFormat::Human => Ok(report_table(report)),
    }
}

pub(crate) fn render_state_change(
    change: &StateChange,
    format: ResolvedOutputFormat,
) -> Result<String, AppError> {
    match format {
        ResolvedOutputFormat::Json => to_json(change),
        ResolvedOutputFormat::Human => Ok(format!(
            "{} {} {}: default {}, disabled {}\n",
            change.action,
            change.plugin_path.display(),
            change.version,
            yes_no(change.flags.is_default),
            yes_no(change.flags.is_disabled),
        )),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    let mut text = serde_json::to_string_pretty(value).map_err(AppError::Serialise)?;
    text.push('\n');
    Ok(text)
}

fn report_table(report: &InventoryReport) -> String {
    if report.is_empty() {
        return String::from("no plugins installed\n");
    }

    let mut table = Table::new([
        "PLUGIN", "KEY", "LANGUAGE", "VERSION", "DEFAULT", "DISABLED", "SHA1",
    ]);
    for plugin in report.plugins() {
        let language = plugin.language.to_string();
        if plugin.versions.is_empty() {
            table.push([
                plugin.plugin_name.as_str(),
                plugin.plugin_key.as_str(),
                language.as_str(),
                "-",
                "-",
                "-",
                "-",
            ]);
            continue;
        }
        for entry in &plugin.versions {
            table.push([
                plugin.plugin_name.as_str(),
                plugin.plugin_key.as_str(),
                language.as_str(),
                entry.version.as_str(),
                yes_no(entry.is_default),
                yes_no(entry.is_disabled),
                entry.sha1.as_deref().unwrap_or("-"),
            ]);
        }
    }
    table.render()
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

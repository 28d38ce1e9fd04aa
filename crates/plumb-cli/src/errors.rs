//! Error type for the CLI runtime.

use std::io;
use std::sync::Arc;

use plumb_config::ConfigError;
use plumb_inventory::InventoryError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("unknown plugin '{plugin}': use a registered key or <language>/<plugin_name>")]
    UnknownPlugin { plugin: String },
    #[error("invalid plugin path '{plugin}': {reason}")]
    InvalidPluginPath { plugin: String, reason: &'static str },
    #[error("failed to serialise output: {0}")]
    Serialise(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}

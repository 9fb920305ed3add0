//! CLI error types

use pricer_ccr::PipelineError;
use pricer_core::ValidationError;
use pricer_engine::EngineConfigError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `ccr` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid trade at {location} of {path}: {source}")]
    InvalidRecord {
        path: String,
        location: String,
        source: ValidationError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Pipeline failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Engine configuration error: {0}")]
    Engine(#[from] EngineConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

//! Application configuration management
//!
//! Layers configuration from defaults, a TOML file, `CCR_*` environment
//! variables and CLI flags, each overriding the one before.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_ccr::PipelineConfig;
use pricer_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file read when `--config` is not given, if present.
pub const DEFAULT_CONFIG_FILE: &str = "ccr.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {name} has invalid value '{value}'")]
    EnvError { name: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Effective configuration of one `ccr` invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Pipeline settings
    pub pipeline: PipelineConfig,
    /// Reference engine settings
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `CCR_*` variables found through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env_value(&lookup, "CCR_CVA_RATE")? {
            self.pipeline.cva_rate = v;
        }
        if let Some(v) = env_value(&lookup, "CCR_MAX_CONCURRENCY")? {
            self.pipeline.max_concurrency = v;
        }
        if let Some(v) = env_value(&lookup, "CCR_BATCH_SIZE")? {
            self.pipeline.batch_size = v;
        }
        if let Some(v) = env_value(&lookup, "CCR_MAX_ATTEMPTS")? {
            self.pipeline.retry.max_attempts = v;
        }
        if let Some(v) = env_value(&lookup, "CCR_RETRY_BACKOFF_MS")? {
            self.pipeline.retry.backoff_ms = v;
        }
        if let Some(v) = env_value(&lookup, "CCR_NUM_PATHS")? {
            self.engine.num_paths = v;
        }
        if let Some(v) = env_value(&lookup, "CCR_SEED")? {
            self.engine.seed = v;
        }
        if let Some(v) = lookup("CCR_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&v)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(rate) = cli.cva_rate {
            self.pipeline.cva_rate = rate;
        }
        if let Some(n) = cli.concurrency {
            self.pipeline.max_concurrency = n;
        }
        if let Some(n) = cli.batch_size {
            self.pipeline.batch_size = n;
        }
        if let Some(n) = cli.max_attempts {
            self.pipeline.retry.max_attempts = n;
        }
        if let Some(ms) = cli.retry_backoff_ms {
            self.pipeline.retry.backoff_ms = ms;
        }
        if let Some(n) = cli.num_paths {
            self.engine.num_paths = n;
        }
        if let Some(seed) = cli.engine_seed {
            self.engine.seed = seed;
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.engine
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }
}

fn env_value<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvError { name, value }),
    }
}

/// CLI overrides
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// CVA rate override
    pub cva_rate: Option<f64>,
    /// Concurrency bound override
    pub concurrency: Option<usize>,
    /// Batch size override
    pub batch_size: Option<usize>,
    /// Retry attempts override
    pub max_attempts: Option<u32>,
    /// Retry backoff override
    pub retry_backoff_ms: Option<u64>,
    /// Monte Carlo path count override
    pub num_paths: Option<usize>,
    /// Engine seed override
    pub engine_seed: Option<u64>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `ccr.toml` if it exists)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<AppConfig, ConfigError> {
    build_config_with_env(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            AppConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => AppConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

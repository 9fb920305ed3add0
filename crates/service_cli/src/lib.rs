//! Neutryx CCR CLI - command line driver for the credit risk pipeline
//!
//! # Commands
//!
//! - `ccr simulate` - Run a synthetic option book through the pipeline
//! - `ccr run --input <file>` - Run trades from a CSV or JSON file
//! - `ccr check` - Print the effective configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate owns everything the
//! pipeline treats as external: configuration layering, logging set-up,
//! trade ingestion and result sinks.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod synthetic;

pub use error::{CliError, Result};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Simulate command implementation
//!
//! Generates a synthetic option book and runs it through the pipeline.

use std::path::Path;

use pricer_ccr::RunOutcome;
use tracing::info;

use crate::config::AppConfig;
use crate::output::OutputFormat;
use crate::synthetic::generate_trades;
use crate::{CliError, Result};

/// Run the simulate command
pub fn run(
    trades: usize,
    counterparties: &[String],
    seed: u64,
    config: &AppConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<RunOutcome> {
    if counterparties.is_empty() {
        return Err(CliError::InvalidArgument(
            "At least one counterparty is required".to_string(),
        ));
    }
    info!(trades, counterparties = counterparties.len(), seed, "Generating synthetic book");

    let book = generate_trades(trades, counterparties, seed).map_err(|source| {
        CliError::InvalidRecord {
            path: "synthetic book".to_string(),
            location: "generation".to_string(),
            source,
        }
    })?;
    super::execute(book, config, format, output)
}

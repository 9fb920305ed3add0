//! Run command implementation
//!
//! Loads a trade file and runs it through the pipeline.

use std::path::Path;

use pricer_ccr::RunOutcome;
use tracing::info;

use crate::config::AppConfig;
use crate::input::load_trades;
use crate::output::OutputFormat;
use crate::Result;

/// Run the run command
pub fn run(
    input: &Path,
    config: &AppConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<RunOutcome> {
    let trades = load_trades(input)?;
    info!(path = %input.display(), trades = trades.len(), "Trades loaded");
    super::execute(trades, config, format, output)
}

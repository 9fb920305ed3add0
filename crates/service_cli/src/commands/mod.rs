//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod run;
pub mod simulate;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use pricer_ccr::{run_pipeline, RunOutcome, ValuationClient};
use pricer_core::TradeRequest;
use pricer_engine::MonteCarloEngine;
use tracing::info;

use crate::config::AppConfig;
use crate::output::{write_outcome, write_summary, OutputFormat};
use crate::Result;

/// Price `trades` with the reference engine and write the outcome
pub(crate) fn execute(
    trades: Vec<TradeRequest>,
    config: &AppConfig,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<RunOutcome> {
    let engine = MonteCarloEngine::new(config.engine.clone())?;
    let client = ValuationClient::with_retry(engine, config.pipeline.retry.clone());
    let pricer = |trade: &TradeRequest| client.price(trade);

    let outcome = run_pipeline(trades, &pricer, &config.pipeline)?;

    match output {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            write_outcome(&outcome, format, &mut file)?;
            file.flush()?;
            info!(path = %path.display(), "Results written");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_outcome(&outcome, format, &mut handle)?;
        }
    }
    if format.is_data_only() {
        write_summary(&outcome, &mut io::stderr().lock())?;
    }

    Ok(outcome)
}

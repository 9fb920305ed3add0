//! Pipeline driver: one bounded run from trades to aggregates.
//!
//! The driver owns no domain data. It checks the run's preconditions,
//! hands the stage functions to the execution substrate and assembles the
//! [`RunOutcome`].

use std::collections::HashSet;
use std::time::Instant;

use pricer_core::{TradeRequest, ValidationError, ValuationResult};

use super::aggregation::aggregate_groups;
use super::grouping::{group_by_counterparty, withhold_incomplete};
use super::pricing::price_trades;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, ValuationError};
use crate::parallel::CancellationToken;
use crate::report::{FailureKind, RunOutcome, RunSummary};

/// Runs the pipeline over `trades`.
///
/// Per-trade and per-key failures are reported in the outcome; only a
/// broken precondition fails the run.
///
/// # Errors
///
/// - [`PipelineError::InvalidConfig`] if `config` does not validate.
/// - [`PipelineError::DuplicateTrade`] if a `trade_id` appears twice.
/// - [`PipelineError::ThreadPool`] if the worker pool cannot be built.
///
/// # Examples
///
/// ```
/// use pricer_ccr::{run_pipeline, PipelineConfig, ValuationError};
/// use pricer_core::{TradeRequest, ValuationResult};
///
/// let trade = TradeRequest::builder()
///     .trade_id("T1")
///     .counterparty_id("CPTY_A")
///     .notional(1.0)
///     .strike(100.0)
///     .maturity(1.0)
///     .spot_price(100.0)
///     .volatility(0.2)
///     .risk_free_rate(0.05)
///     .build()
///     .unwrap();
///
/// let pricer = |t: &TradeRequest| -> Result<ValuationResult, ValuationError> {
///     Ok(ValuationResult::new(t.trade_id().clone(), t.counterparty_id().clone(), 100.0, 10.0))
/// };
/// let outcome = run_pipeline(vec![trade], &pricer, &PipelineConfig::default()).unwrap();
///
/// assert_eq!(outcome.risks.len(), 1);
/// assert_eq!(outcome.risks[0].total_pv, 100.0);
/// ```
pub fn run_pipeline<F>(
    trades: Vec<TradeRequest>,
    pricer: &F,
    config: &PipelineConfig,
) -> Result<RunOutcome, PipelineError>
where
    F: Fn(&TradeRequest) -> Result<ValuationResult, ValuationError> + Sync,
{
    run_pipeline_with_cancellation(trades, pricer, config, &CancellationToken::new())
}

/// Runs the pipeline over trades read from `source`.
///
/// The source is drained before pricing starts; the first invalid record
/// aborts the run with [`PipelineError::Ingestion`].
pub fn run_source<I, F>(
    source: I,
    pricer: &F,
    config: &PipelineConfig,
) -> Result<RunOutcome, PipelineError>
where
    I: IntoIterator<Item = Result<TradeRequest, ValidationError>>,
    F: Fn(&TradeRequest) -> Result<ValuationResult, ValuationError> + Sync,
{
    let trades = source.into_iter().collect::<Result<Vec<_>, _>>()?;
    run_pipeline(trades, pricer, config)
}

/// Runs the pipeline, aborting early once `cancel` fires.
///
/// Trades not yet priced when the token fires are reported as skipped.
/// Counterparties with a skipped trade are listed in
/// [`RunOutcome::withheld`] and get no aggregate; all others are emitted
/// as usual.
pub fn run_pipeline_with_cancellation<F>(
    trades: Vec<TradeRequest>,
    pricer: &F,
    config: &PipelineConfig,
    cancel: &CancellationToken,
) -> Result<RunOutcome, PipelineError>
where
    F: Fn(&TradeRequest) -> Result<ValuationResult, ValuationError> + Sync,
{
    let start = Instant::now();
    config.validate()?;
    check_unique_ids(&trades)?;

    tracing::info!(
        trades = trades.len(),
        max_concurrency = config.max_concurrency,
        batch_size = config.batch_size,
        cva_rate = config.cva_rate,
        "Pipeline run started"
    );

    let parallel = config.parallel();
    let pool = parallel.build_pool()?;
    let pricing = price_trades(&trades, pricer, &parallel, &pool, cancel);

    let mut groups = group_by_counterparty(pricing.priced);
    let withheld = withhold_incomplete(&mut groups, &pricing.failures);
    let (risks, aggregation_errors) = aggregate_groups(&groups, config.cva_rate);

    let count = |kind: FailureKind| pricing.failures.iter().filter(|f| f.kind == kind).count();
    let skipped = count(FailureKind::Skipped);
    let summary = RunSummary {
        trades_submitted: trades.len(),
        trades_priced: trades.len() - pricing.failures.len(),
        pricing_failures: count(FailureKind::Pricing),
        integrity_failures: count(FailureKind::Integrity),
        skipped,
        counterparties: risks.len(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    };

    if skipped > 0 {
        tracing::warn!(
            skipped,
            withheld = withheld.len(),
            "Pipeline run cancelled; incomplete counterparties withheld"
        );
    }
    tracing::info!(
        counterparties = summary.counterparties,
        priced = summary.trades_priced,
        pricing_failures = summary.pricing_failures,
        integrity_failures = summary.integrity_failures,
        skipped = summary.skipped,
        aggregation_errors = aggregation_errors.len(),
        elapsed_ms = summary.elapsed_ms,
        "Pipeline run completed"
    );

    Ok(RunOutcome {
        risks,
        failures: pricing.failures,
        aggregation_errors,
        withheld,
        summary,
    })
}

fn check_unique_ids(trades: &[TradeRequest]) -> Result<(), PipelineError> {
    let mut seen = HashSet::with_capacity(trades.len());
    for trade in trades {
        if !seen.insert(trade.trade_id()) {
            return Err(PipelineError::DuplicateTrade(trade.trade_id().to_string()));
        }
    }
    Ok(())
}

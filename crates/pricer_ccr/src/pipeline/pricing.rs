//! Pricing stage: prices every trade independently on the bounded pool.

use pricer_core::{CounterpartyId, TradeRequest, ValuationResult};
use rayon::ThreadPool;

use crate::error::ValuationError;
use crate::parallel::{CancellationToken, ParallelConfig};
use crate::report::{FailureKind, TradeFailure};

/// A priced trade keyed by its counterparty.
pub type PricedPair = (CounterpartyId, ValuationResult);

/// Output of the pricing stage.
#[derive(Clone, Debug, Default)]
pub struct PricingOutput {
    /// One pair per successfully priced trade.
    pub priced: Vec<PricedPair>,
    /// Trades that did not produce a pair, in input order.
    pub failures: Vec<TradeFailure>,
}

/// Prices `trades` with `pricer`.
///
/// `pricer` is any function from a trade to a valuation; in production it
/// is [`ValuationClient::price`](crate::ValuationClient::price). Once
/// `cancel` fires, trades not yet started are recorded as
/// [`FailureKind::Skipped`]; calls already in flight complete, except that
/// a client built with
/// [`ValuationClient::with_cancellation`](crate::ValuationClient::with_cancellation)
/// abandons its retry backoff.
pub fn price_trades<F>(
    trades: &[TradeRequest],
    pricer: &F,
    parallel: &ParallelConfig,
    pool: &ThreadPool,
    cancel: &CancellationToken,
) -> PricingOutput
where
    F: Fn(&TradeRequest) -> Result<ValuationResult, ValuationError> + Sync,
{
    let outcomes = parallel.map_in_batches(pool, trades, |trade| price_one(trade, pricer, cancel));

    let mut output = PricingOutput {
        priced: Vec::with_capacity(outcomes.len()),
        failures: Vec::new(),
    };
    for outcome in outcomes {
        match outcome {
            Ok(pair) => output.priced.push(pair),
            Err(failure) => output.failures.push(failure),
        }
    }
    output
}

fn price_one<F>(
    trade: &TradeRequest,
    pricer: &F,
    cancel: &CancellationToken,
) -> Result<PricedPair, TradeFailure>
where
    F: Fn(&TradeRequest) -> Result<ValuationResult, ValuationError> + Sync,
{
    if cancel.is_cancelled() {
        return Err(TradeFailure {
            trade_id: trade.trade_id().clone(),
            counterparty_id: trade.counterparty_id().clone(),
            kind: FailureKind::Skipped,
            message: "run cancelled before pricing".to_string(),
        });
    }

    match pricer(trade) {
        Ok(result) => {
            tracing::debug!(
                trade_id = %trade.trade_id(),
                counterparty_id = %trade.counterparty_id(),
                present_value = result.present_value,
                pfe_95 = result.pfe_95,
                "Trade priced"
            );
            Ok((trade.counterparty_id().clone(), result))
        }
        Err(err) => {
            let kind = err.kind();
            tracing::warn!(
                trade_id = %trade.trade_id(),
                counterparty_id = %trade.counterparty_id(),
                kind = kind.as_str(),
                error = %err,
                "Trade dropped"
            );
            Err(TradeFailure {
                trade_id: trade.trade_id().clone(),
                counterparty_id: trade.counterparty_id().clone(),
                kind,
                message: err.to_string(),
            })
        }
    }
}

//! Valuation client: the pipeline's side of the engine boundary.
//!
//! A call serialises the trade, invokes the engine, decodes the response
//! and checks that it echoes the request before the result may enter
//! grouping. No state is kept between calls.

use std::time::{Duration, Instant};

use pricer_core::wire;
use pricer_core::{TradeRequest, ValuationResult};
use pricer_engine::PricingEngine;

use crate::config::RetryPolicy;
use crate::error::{IntegrityError, PricingError, ValuationError};
use crate::parallel::CancellationToken;

/// Longest uninterrupted sleep while waiting to retry.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Prices single trades through a [`PricingEngine`].
///
/// # Examples
///
/// ```
/// use pricer_ccr::ValuationClient;
/// use pricer_core::TradeRequest;
/// use pricer_engine::{EngineConfig, MonteCarloEngine};
///
/// let engine = MonteCarloEngine::new(EngineConfig::default().with_num_paths(1_000)).unwrap();
/// let client = ValuationClient::new(engine);
/// let trade = TradeRequest::builder()
///     .trade_id("TRD_0")
///     .counterparty_id("CPTY_A")
///     .notional(1_000_000.0)
///     .strike(100.0)
///     .maturity(1.0)
///     .spot_price(100.0)
///     .volatility(0.2)
///     .risk_free_rate(0.05)
///     .build()
///     .unwrap();
///
/// let result = client.price(&trade).unwrap();
/// assert_eq!(result.counterparty_id.as_str(), "CPTY_A");
/// ```
#[derive(Debug, Clone)]
pub struct ValuationClient<E> {
    engine: E,
    retry: RetryPolicy,
    cancel: Option<CancellationToken>,
}

impl<E: PricingEngine> ValuationClient<E> {
    /// Creates a client that makes a single attempt per trade.
    pub fn new(engine: E) -> Self {
        Self::with_retry(engine, RetryPolicy::default())
    }

    /// Creates a client with the given retry policy.
    pub fn with_retry(engine: E, retry: RetryPolicy) -> Self {
        Self {
            engine,
            retry,
            cancel: None,
        }
    }

    /// Stops retrying once `cancel` fires.
    ///
    /// Pass the token given to
    /// [`run_pipeline_with_cancellation`](crate::run_pipeline_with_cancellation)
    /// so a cancelled run does not wait out retry backoff.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Returns the wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Prices one trade.
    ///
    /// # Errors
    ///
    /// - [`ValuationError::Pricing`] when the engine is unreachable, times
    ///   out on every attempt, rejects the request, or answers with bytes
    ///   that do not decode to a valuation with finite measures and a
    ///   non-negative PFE.
    /// - [`ValuationError::Integrity`] when the response names a different
    ///   trade or counterparty.
    /// - [`PricingError::Cancelled`] when the cancellation token fires
    ///   between attempts.
    pub fn price(&self, trade: &TradeRequest) -> Result<ValuationResult, ValuationError> {
        let request = wire::encode_request(trade);
        let response = self.call_with_retry(trade, &request)?;

        let result = wire::decode_result(&response)
            .map_err(|e| PricingError::MalformedResponse(e.to_string()))?;

        if &result.trade_id != trade.trade_id() {
            return Err(IntegrityError::TradeIdMismatch {
                expected: trade.trade_id().to_string(),
                actual: result.trade_id.to_string(),
            }
            .into());
        }
        if &result.counterparty_id != trade.counterparty_id() {
            return Err(IntegrityError::CounterpartyMismatch {
                trade_id: trade.trade_id().to_string(),
                expected: trade.counterparty_id().to_string(),
                actual: result.counterparty_id.to_string(),
            }
            .into());
        }
        if !result.has_valid_measures() {
            return Err(PricingError::MalformedResponse(format!(
                "invalid measures for trade {}: present_value={}, pfe_95={}",
                result.trade_id, result.present_value, result.pfe_95
            ))
            .into());
        }

        Ok(result)
    }

    fn call_with_retry(&self, trade: &TradeRequest, request: &[u8]) -> Result<Vec<u8>, PricingError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.engine.calculate_risk(request) {
                Ok(response) => return Ok(response),
                Err(err) => {
                    let err = PricingError::from(err);
                    if !err.is_transient() || attempt >= max_attempts {
                        return Err(err);
                    }
                    let delay = self.retry.delay_after(attempt);
                    tracing::debug!(
                        trade_id = %trade.trade_id(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying engine call"
                    );
                    if !self.wait(delay) {
                        tracing::debug!(trade_id = %trade.trade_id(), attempt, "Retry abandoned on cancellation");
                        return Err(PricingError::Cancelled { attempts: attempt });
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// Sleeps for `delay`. Returns `false` if cancelled before or during it.
    fn wait(&self, delay: Duration) -> bool {
        let Some(cancel) = &self.cancel else {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            return true;
        };

        let deadline = Instant::now() + delay;
        loop {
            if cancel.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep((deadline - now).min(CANCEL_POLL_INTERVAL));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_engine::EngineError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn trade() -> TradeRequest {
        TradeRequest::builder()
            .trade_id("TRD_1")
            .counterparty_id("CPTY_A")
            .notional(1.0)
            .strike(100.0)
            .maturity(1.0)
            .spot_price(100.0)
            .volatility(0.2)
            .risk_free_rate(0.0)
            .build()
            .unwrap()
    }

    /// Answers with a fixed result regardless of the request.
    struct Fixed(ValuationResult);

    impl PricingEngine for Fixed {
        fn calculate_risk(&self, _request: &[u8]) -> Result<Vec<u8>, EngineError> {
            Ok(wire::encode_result(&self.0))
        }
    }

    /// Fails transiently `failures` times, then echoes the request.
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
        error: EngineError,
    }

    impl PricingEngine for Flaky {
        fn calculate_risk(&self, request: &[u8]) -> Result<Vec<u8>, EngineError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(self.error.clone());
            }
            let trade = wire::decode_request(request).map_err(|e| EngineError::Rejected(e.to_string()))?;
            Ok(wire::encode_result(&ValuationResult::new(
                trade.trade_id().clone(),
                trade.counterparty_id().clone(),
                1.0,
                2.0,
            )))
        }
    }

    fn flaky(failures: u32, error: EngineError) -> Flaky {
        Flaky {
            failures,
            calls: AtomicU32::new(0),
            error,
        }
    }

    #[test]
    fn test_price_success() {
        let client = ValuationClient::new(Fixed(ValuationResult::new("TRD_1", "CPTY_A", -4.0, 3.0)));
        let result = client.price(&trade()).unwrap();
        assert_eq!(result.present_value, -4.0);
        assert_eq!(result.pfe_95, 3.0);
    }

    #[test]
    fn test_counterparty_echo_mismatch_is_integrity_error() {
        let client = ValuationClient::new(Fixed(ValuationResult::new("TRD_1", "CPTY_B", 1.0, 1.0)));
        let err = client.price(&trade()).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::Integrity(IntegrityError::CounterpartyMismatch { .. })
        ));
    }

    #[test]
    fn test_trade_echo_mismatch_is_integrity_error() {
        let client = ValuationClient::new(Fixed(ValuationResult::new("TRD_9", "CPTY_A", 1.0, 1.0)));
        let err = client.price(&trade()).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::Integrity(IntegrityError::TradeIdMismatch { .. })
        ));
    }

    #[test]
    fn test_negative_pfe_is_malformed() {
        let client = ValuationClient::new(Fixed(ValuationResult::new("TRD_1", "CPTY_A", 1.0, -1.0)));
        let err = client.price(&trade()).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::Pricing(PricingError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_undecodable_response_is_malformed() {
        struct Garbage;
        impl PricingEngine for Garbage {
            fn calculate_risk(&self, _request: &[u8]) -> Result<Vec<u8>, EngineError> {
                Ok(vec![0xff, 0xff, 0xff])
            }
        }
        let err = ValuationClient::new(Garbage).price(&trade()).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::Pricing(PricingError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_single_attempt_by_default() {
        let client = ValuationClient::new(flaky(1, EngineError::Unavailable("down".to_string())));
        let err = client.price(&trade()).unwrap_err();
        assert_eq!(
            err,
            ValuationError::Pricing(PricingError::Unreachable("down".to_string()))
        );
        assert_eq!(client.engine().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transient_failure_retried() {
        let client = ValuationClient::with_retry(
            flaky(2, EngineError::Timeout { elapsed_ms: 5 }),
            RetryPolicy::new(3, 0),
        );
        let result = client.price(&trade()).unwrap();
        assert_eq!(result.pfe_95, 2.0);
        assert_eq!(client.engine().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_retries_are_bounded() {
        let client = ValuationClient::with_retry(
            flaky(10, EngineError::Unavailable("down".to_string())),
            RetryPolicy::new(3, 0),
        );
        assert!(client.price(&trade()).is_err());
        assert_eq!(client.engine().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_rejection_not_retried() {
        let client = ValuationClient::with_retry(
            flaky(10, EngineError::Rejected("unsupported".to_string())),
            RetryPolicy::new(5, 0),
        );
        let err = client.price(&trade()).unwrap_err();
        assert!(matches!(err, ValuationError::Pricing(PricingError::Rejected(_))));
        assert_eq!(client.engine().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancelled_run_stops_retrying() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let client = ValuationClient::with_retry(
            flaky(10, EngineError::Unavailable("down".to_string())),
            RetryPolicy::new(5, 10_000),
        )
        .with_cancellation(cancel);

        let started = Instant::now();
        let err = client.price(&trade()).unwrap_err();
        assert_eq!(
            err,
            ValuationError::Pricing(PricingError::Cancelled { attempts: 1 })
        );
        assert_eq!(err.kind(), crate::FailureKind::Skipped);
        assert_eq!(client.engine().calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_cancel_interrupts_backoff() {
        let cancel = CancellationToken::new();
        let client = ValuationClient::with_retry(
            flaky(10, EngineError::Timeout { elapsed_ms: 1 }),
            RetryPolicy::new(3, 20_000),
        )
        .with_cancellation(cancel.clone());

        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            cancel.cancel();
        });
        let started = Instant::now();
        let err = client.price(&trade()).unwrap_err();
        canceller.join().unwrap();

        assert!(matches!(
            err,
            ValuationError::Pricing(PricingError::Cancelled { attempts: 1 })
        ));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_uncancelled_token_does_not_block_retry() {
        let client = ValuationClient::with_retry(
            flaky(1, EngineError::Unavailable("down".to_string())),
            RetryPolicy::new(2, 1),
        )
        .with_cancellation(CancellationToken::new());
        assert!(client.price(&trade()).is_ok());
        assert_eq!(client.engine().calls.load(Ordering::SeqCst), 2);
    }
}

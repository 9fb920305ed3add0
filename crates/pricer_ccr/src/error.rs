//! Error types for the CCR pipeline.
//!
//! Per-trade failures ([`PricingError`], [`IntegrityError`]) and per-key
//! failures ([`AggregationError`]) are recorded in the run report and never
//! abort a run. Only [`PipelineError`] is fatal.

use pricer_core::{CounterpartyId, ValidationError};
use pricer_engine::EngineError;
use thiserror::Error;

use crate::report::FailureKind;

/// The pricing engine call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The engine could not be reached.
    #[error("Pricing engine unreachable: {0}")]
    Unreachable(String),

    /// The engine did not answer in time.
    #[error("Pricing engine timed out after {elapsed_ms} ms")]
    Timeout {
        /// Time spent waiting.
        elapsed_ms: u64,
    },

    /// The engine refused the request.
    #[error("Pricing engine rejected the request: {0}")]
    Rejected(String),

    /// The engine answered with bytes that are not a usable valuation.
    #[error("Malformed pricing response: {0}")]
    MalformedResponse(String),

    /// The run was cancelled while waiting to retry.
    #[error("Run cancelled after {attempts} engine attempt(s)")]
    Cancelled {
        /// Engine calls made before giving up.
        attempts: u32,
    },
}

impl PricingError {
    /// Returns whether re-invoking the engine may succeed.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, PricingError::Unreachable(_) | PricingError::Timeout { .. })
    }
}

impl From<EngineError> for PricingError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Unavailable(msg) => PricingError::Unreachable(msg),
            EngineError::Timeout { elapsed_ms } => PricingError::Timeout { elapsed_ms },
            EngineError::Rejected(msg) => PricingError::Rejected(msg),
        }
    }
}

/// The pricing response does not echo the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// Response carries a different trade id.
    #[error("Response trade_id mismatch: expected {expected}, got {actual}")]
    TradeIdMismatch {
        /// Trade id sent.
        expected: String,
        /// Trade id received.
        actual: String,
    },

    /// Response carries a different counterparty id.
    #[error("Response counterparty_id mismatch for trade {trade_id}: expected {expected}, got {actual}")]
    CounterpartyMismatch {
        /// Trade being priced.
        trade_id: String,
        /// Counterparty sent.
        expected: String,
        /// Counterparty received.
        actual: String,
    },
}

/// Failure of a single [`ValuationClient::price`](crate::ValuationClient::price) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// Engine call failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Engine answered for a different trade or counterparty.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

impl ValuationError {
    /// Returns the failure kind reported for the dropped trade.
    pub fn kind(&self) -> FailureKind {
        match self {
            ValuationError::Pricing(PricingError::Cancelled { .. }) => FailureKind::Skipped,
            ValuationError::Pricing(_) => FailureKind::Pricing,
            ValuationError::Integrity(_) => FailureKind::Integrity,
        }
    }
}

/// A key could not be aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AggregationError {
    /// A key reached aggregation with no results.
    #[error("Counterparty {0} reached aggregation with an empty result set")]
    EmptyGroup(CounterpartyId),
}

/// Run-fatal pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A malformed trade reached the driver.
    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] ValidationError),

    /// The same trade id appears twice in one run.
    #[error("Duplicate trade ID: {0}")]
    DuplicateTrade(String),

    /// The pipeline configuration is unusable.
    #[error("Invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// The worker pool could not be built.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_map_to_pricing_errors() {
        assert_eq!(
            PricingError::from(EngineError::Unavailable("down".to_string())),
            PricingError::Unreachable("down".to_string())
        );
        assert_eq!(
            PricingError::from(EngineError::Timeout { elapsed_ms: 30 }),
            PricingError::Timeout { elapsed_ms: 30 }
        );
        assert_eq!(
            PricingError::from(EngineError::Rejected("bad".to_string())),
            PricingError::Rejected("bad".to_string())
        );
    }

    #[test]
    fn test_only_unreachable_and_timeout_are_transient() {
        assert!(PricingError::Unreachable(String::new()).is_transient());
        assert!(PricingError::Timeout { elapsed_ms: 1 }.is_transient());
        assert!(!PricingError::Rejected(String::new()).is_transient());
        assert!(!PricingError::MalformedResponse(String::new()).is_transient());
        assert!(!PricingError::Cancelled { attempts: 1 }.is_transient());
    }

    #[test]
    fn test_valuation_error_kind() {
        let pricing: ValuationError = PricingError::Rejected("x".to_string()).into();
        assert_eq!(pricing.kind(), FailureKind::Pricing);

        let integrity: ValuationError = IntegrityError::TradeIdMismatch {
            expected: "T1".to_string(),
            actual: "T2".to_string(),
        }
        .into();
        assert_eq!(integrity.kind(), FailureKind::Integrity);

        let cancelled: ValuationError = PricingError::Cancelled { attempts: 2 }.into();
        assert_eq!(cancelled.kind(), FailureKind::Skipped);
        assert_eq!(
            integrity.to_string(),
            "Response trade_id mismatch: expected T1, got T2"
        );
    }

    #[test]
    fn test_error_display_duplicate_trade() {
        let err = PipelineError::DuplicateTrade("TRD_1".to_string());
        assert_eq!(format!("{}", err), "Duplicate trade ID: TRD_1");
    }

    #[test]
    fn test_error_display_empty_group() {
        let err = AggregationError::EmptyGroup(CounterpartyId::new("CPTY_Z"));
        assert!(err.to_string().contains("CPTY_Z"));
    }
}

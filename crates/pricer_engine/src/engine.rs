//! The serialised call boundary to a valuation engine.
//!
//! An engine receives one encoded `TradeRequestMessage` and answers with one
//! encoded `ValuationResultMessage` (see `pricer_core::wire`). Engines hold
//! no per-call state; a single instance is shared by every pricing worker.

use std::sync::Arc;
use thiserror::Error;

/// Failure classes reported by a valuation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine could not be reached.
    #[error("Pricing engine unavailable: {0}")]
    Unavailable(String),

    /// The engine did not answer in time.
    #[error("Pricing engine timed out after {elapsed_ms}ms")]
    Timeout {
        /// Time waited before giving up.
        elapsed_ms: u64,
    },

    /// The engine refused the request.
    #[error("Pricing request rejected: {0}")]
    Rejected(String),
}

impl EngineError {
    /// Returns whether a retry could plausibly succeed.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::Unavailable(_) | EngineError::Timeout { .. })
    }
}

/// A valuation engine reachable through a serialised request/response call.
///
/// # Examples
///
/// ```
/// use pricer_engine::{EngineError, PricingEngine};
///
/// struct Offline;
///
/// impl PricingEngine for Offline {
///     fn calculate_risk(&self, _request: &[u8]) -> Result<Vec<u8>, EngineError> {
///         Err(EngineError::Unavailable("maintenance window".to_string()))
///     }
/// }
///
/// assert!(Offline.calculate_risk(&[]).unwrap_err().is_transient());
/// ```
pub trait PricingEngine: Send + Sync {
    /// Prices one serialised trade request and returns the serialised result.
    fn calculate_risk(&self, request: &[u8]) -> Result<Vec<u8>, EngineError>;
}

impl<E: PricingEngine + ?Sized> PricingEngine for Arc<E> {
    fn calculate_risk(&self, request: &[u8]) -> Result<Vec<u8>, EngineError> {
        (**self).calculate_risk(request)
    }
}

impl<E: PricingEngine + ?Sized> PricingEngine for Box<E> {
    fn calculate_risk(&self, request: &[u8]) -> Result<Vec<u8>, EngineError> {
        (**self).calculate_risk(request)
    }
}

impl<E: PricingEngine + ?Sized> PricingEngine for &E {
    fn calculate_risk(&self, request: &[u8]) -> Result<Vec<u8>, EngineError> {
        (**self).calculate_risk(request)
    }
}

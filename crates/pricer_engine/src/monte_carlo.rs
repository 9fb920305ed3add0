//! Reference Monte Carlo valuation engine.
//!
//! [`MonteCarloEngine`] decodes a trade request, samples terminal spots under
//! GBM and reports
//!
//! ```text
//! PV     = notional · e^{-rT} · mean(payoff(S_T))
//! PFE_q  = notional · quantile_q(max(payoff(S_T), 0))
//! ```
//!
//! where `payoff` is `max(S_T - K, 0)` for `OPTION` and `S_T - K` for
//! `FORWARD`. PFE is the exposure at maturity, so it is not discounted.

use pricer_core::types::{TradeRequest, TradeType, ValuationResult};
use pricer_core::wire;
use thiserror::Error;

use crate::engine::{EngineError, PricingEngine};
use crate::rng::{trade_seed, PricerRng};
use crate::simulator::{quantile, simulate_gbm};

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Engine configuration error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineConfigError {
    /// Path count outside valid range [1, MAX_PATHS].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Quantile outside (0, 1).
    #[error("Invalid PFE quantile {0}: must be in (0, 1)")]
    InvalidQuantile(f64),
}

/// Monte Carlo engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Number of simulation paths per trade.
    pub num_paths: usize,
    /// Base seed; each trade's seed is derived from it and the trade id.
    pub seed: u64,
    /// Confidence level of the potential future exposure.
    pub pfe_quantile: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_paths: 10_000,
            seed: 42,
            pfe_quantile: 0.95,
        }
    }
}

impl EngineConfig {
    /// Sets the number of paths.
    pub fn with_num_paths(mut self, num_paths: usize) -> Self {
        self.num_paths = num_paths;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the PFE confidence level.
    pub fn with_pfe_quantile(mut self, q: f64) -> Self {
        self.pfe_quantile = q;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.num_paths == 0 || self.num_paths > MAX_PATHS {
            return Err(EngineConfigError::InvalidPathCount(self.num_paths));
        }
        if !(self.pfe_quantile > 0.0 && self.pfe_quantile < 1.0) {
            return Err(EngineConfigError::InvalidQuantile(self.pfe_quantile));
        }
        Ok(())
    }
}

/// In-process Monte Carlo implementation of [`PricingEngine`].
#[derive(Clone, Debug)]
pub struct MonteCarloEngine {
    config: EngineConfig,
}

impl MonteCarloEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, EngineConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Values a decoded trade.
    pub fn value(&self, trade: &TradeRequest) -> ValuationResult {
        let mut rng = PricerRng::from_seed(trade_seed(self.config.seed, trade.trade_id().as_str()));
        let spots = simulate_gbm(
            trade.spot_price(),
            trade.risk_free_rate(),
            trade.volatility(),
            trade.maturity(),
            self.config.num_paths,
            &mut rng,
        );

        let strike = trade.strike();
        let payoff = |s: f64| match trade.trade_type() {
            TradeType::Option => (s - strike).max(0.0),
            TradeType::Forward => s - strike,
        };

        let n = spots.len() as f64;
        let mean_payoff = spots.iter().map(|&s| payoff(s)).sum::<f64>() / n;
        let discount = (-trade.risk_free_rate() * trade.maturity()).exp();

        let mut exposures: Vec<f64> = spots.iter().map(|&s| payoff(s).max(0.0)).collect();
        let pfe = quantile(&mut exposures, self.config.pfe_quantile);

        tracing::trace!(
            trade_id = %trade.trade_id(),
            seed = rng.seed(),
            mean_payoff,
            pfe,
            "Trade simulated"
        );

        ValuationResult::new(
            trade.trade_id().clone(),
            trade.counterparty_id().clone(),
            trade.notional() * discount * mean_payoff,
            trade.notional() * pfe,
        )
    }
}

impl PricingEngine for MonteCarloEngine {
    fn calculate_risk(&self, request: &[u8]) -> Result<Vec<u8>, EngineError> {
        let trade =
            wire::decode_request(request).map_err(|e| EngineError::Rejected(e.to_string()))?;
        let result = self.value(&trade);
        Ok(wire::encode_result(&result))
    }
}

//! # Pricer Engine (Layer 3: Valuation Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_engine is the valuation engine the CCR pipeline calls out to. The
//! pipeline treats it as opaque: it only ever sees the byte-level
//! [`PricingEngine`] boundary. This crate provides:
//! - The boundary trait and its failure classes (`engine`)
//! - A seeded, reproducible RNG wrapper (`rng`)
//! - A geometric Brownian motion terminal-spot sampler (`simulator`)
//! - [`MonteCarloEngine`], a reference engine pricing `OPTION` and
//!   `FORWARD` trades with PV and 95% PFE (`monte_carlo`)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::{TradeRequest, TradeType};
//! use pricer_core::wire;
//! use pricer_engine::{EngineConfig, MonteCarloEngine, PricingEngine};
//!
//! let engine = MonteCarloEngine::new(EngineConfig::default().with_num_paths(2_000)).unwrap();
//! let trade = TradeRequest::builder()
//!     .trade_id("TRD_0")
//!     .counterparty_id("CPTY_A")
//!     .trade_type(TradeType::Option)
//!     .notional(1.0)
//!     .strike(100.0)
//!     .maturity(1.0)
//!     .spot_price(100.0)
//!     .volatility(0.2)
//!     .risk_free_rate(0.05)
//!     .build()
//!     .unwrap();
//!
//! let response = engine.calculate_risk(&wire::encode_request(&trade)).unwrap();
//! let result = wire::decode_result(&response).unwrap();
//! assert_eq!(result.trade_id.as_str(), "TRD_0");
//! assert!(result.pfe_95 >= 0.0);
//! ```
//!
//! ## Reproducibility
//!
//! Each trade is simulated with a seed derived from the engine seed and the
//! trade id, so a trade's valuation does not depend on which worker prices
//! it or in what order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod monte_carlo;
pub mod rng;
pub mod simulator;

pub use engine::{EngineError, PricingEngine};
pub use monte_carlo::{EngineConfig, EngineConfigError, MonteCarloEngine, MAX_PATHS};
pub use rng::PricerRng;

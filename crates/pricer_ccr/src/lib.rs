//! # Pricer CCR (L4: Application)
//!
//! Per-counterparty credit exposure from a batch of trades.
//!
//! Each trade is priced independently by an external engine, results are
//! partitioned by counterparty, and every partition is reduced to one
//! [`CounterpartyRisk`](pricer_core::CounterpartyRisk) record carrying
//! total PV, total 95% PFE and the derived CVA charge.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             pricer_ccr (L4)             │
//! ├─────────────────────────────────────────┤
//! │  valuation/ - engine boundary client   │
//! │  pipeline/  - pricing, grouping,       │
//! │               aggregation, driver      │
//! │  parallel/  - bounded Rayon pool,      │
//! │               cancellation             │
//! │  report/    - run outcome and summary  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_engine (L3)           │
//! │  byte-level PricingEngine boundary     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Failure handling
//!
//! - A trade whose engine call fails is dropped and reported as a pricing
//!   failure; a response that does not echo its request is reported as an
//!   integrity failure. The run continues either way.
//! - A key that reaches aggregation with no results is reported and does
//!   not affect other keys.
//! - Only a broken precondition (invalid configuration, duplicate trade
//!   id, malformed input record) aborts a run.
//!
//! ## Example
//!
//! ```
//! use pricer_ccr::{run_pipeline, PipelineConfig, ValuationClient};
//! use pricer_core::TradeRequest;
//! use pricer_engine::{EngineConfig, MonteCarloEngine};
//!
//! let engine = MonteCarloEngine::new(EngineConfig::default().with_num_paths(1_000)).unwrap();
//! let client = ValuationClient::new(engine);
//!
//! let trades: Vec<TradeRequest> = ["CPTY_A", "CPTY_B", "CPTY_A"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, cpty)| {
//!         TradeRequest::builder()
//!             .trade_id(format!("TRD_{i}"))
//!             .counterparty_id(*cpty)
//!             .notional(1_000_000.0)
//!             .strike(100.0)
//!             .maturity(1.0)
//!             .spot_price(100.0)
//!             .volatility(0.2)
//!             .risk_free_rate(0.05)
//!             .build()
//!             .unwrap()
//!     })
//!     .collect();
//!
//! let outcome = run_pipeline(trades, &|t: &TradeRequest| client.price(t), &PipelineConfig::default())
//!     .unwrap();
//!
//! assert_eq!(outcome.risks.len(), 2);
//! assert_eq!(outcome.risks[0].counterparty_id.as_str(), "CPTY_A");
//! assert_eq!(outcome.risks[0].trade_count, 2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod error;
pub mod parallel;
pub mod pipeline;
pub mod report;
pub mod valuation;

pub use config::{PipelineConfig, RetryPolicy, DEFAULT_CVA_RATE};
pub use error::{AggregationError, IntegrityError, PipelineError, PricingError, ValuationError};
pub use parallel::{CancellationToken, ParallelConfig};
pub use pipeline::{run_pipeline, run_pipeline_with_cancellation, run_source};
pub use report::{FailureKind, RunOutcome, RunSummary, TradeFailure};
pub use valuation::ValuationClient;

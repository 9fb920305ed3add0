//! # pricer_core: Foundation Types for Counterparty Credit Risk
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the CCR workspace, providing:
//! - Strongly typed identifiers: `TradeId`, `CounterpartyId` (`types::ids`)
//! - The trade to be priced: `TradeRequest`, `TradeType` (`types::trade`)
//! - Pricer output for one trade: `ValuationResult` (`types::valuation`)
//! - Per-counterparty aggregate: `CounterpartyRisk` (`types::risk`)
//! - Ingestion validation errors: `ValidationError` (`error`)
//! - The binary request/response contract to the pricing engine (`wire`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - prost: Protocol Buffers encoding for the engine boundary
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{TradeRequest, TradeType};
//! use pricer_core::wire;
//!
//! let trade = TradeRequest::builder()
//!     .trade_id("TRD_1")
//!     .counterparty_id("CPTY_A")
//!     .trade_type(TradeType::Option)
//!     .notional(1_000_000.0)
//!     .strike(100.0)
//!     .maturity(1.0)
//!     .spot_price(101.5)
//!     .volatility(0.20)
//!     .risk_free_rate(0.05)
//!     .build()
//!     .unwrap();
//!
//! let bytes = wire::encode_request(&trade);
//! let decoded = wire::decode_request(&bytes).unwrap();
//! assert_eq!(decoded, trade);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for trades, valuations and aggregates

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod types;
pub mod wire;

pub use error::ValidationError;
pub use types::{
    CounterpartyId, CounterpartyRisk, TradeId, TradeRequest, TradeRequestBuilder, TradeType,
    ValuationResult,
};

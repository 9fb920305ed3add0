//! Trade, valuation and exposure types.
//!
//! This module provides:
//! - `ids`: Newtype identifiers for trades and counterparties
//! - `trade`: The trade request handed to the pricing engine, with its validating builder
//! - `valuation`: The pricing engine's result for one trade
//! - `risk`: The per-counterparty aggregate emitted by the pipeline
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`TradeId`], [`CounterpartyId`] from `ids`
//! - [`TradeRequest`], [`TradeRequestBuilder`], [`TradeType`] from `trade`
//! - [`ValuationResult`] from `valuation`
//! - [`CounterpartyRisk`] from `risk`

pub mod ids;
pub mod risk;
pub mod trade;
pub mod valuation;

pub use ids::{CounterpartyId, TradeId};
pub use risk::CounterpartyRisk;
pub use trade::{TradeRequest, TradeRequestBuilder, TradeType};
pub use valuation::ValuationResult;

//! Ingestion validation errors.
//!
//! A [`TradeRequest`](crate::types::TradeRequest) can only be constructed
//! through its validating builder, so a malformed trade is rejected here and
//! never reaches the pricing stage.

use thiserror::Error;

/// Reasons a trade record is rejected at ingestion.
///
/// # Examples
/// ```
/// use pricer_core::ValidationError;
///
/// let err = ValidationError::EmptyCounterpartyId { trade_id: "TRD_7".to_string() };
/// assert_eq!(format!("{}", err), "Trade TRD_7 has an empty counterparty_id");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The trade identifier is missing or empty.
    #[error("Trade has an empty trade_id")]
    EmptyTradeId,

    /// The counterparty identifier (the aggregation key) is missing or empty.
    #[error("Trade {trade_id} has an empty counterparty_id")]
    EmptyCounterpartyId {
        /// Offending trade.
        trade_id: String,
    },

    /// A required field was never set on the builder.
    #[error("Trade {trade_id}: missing field '{field}'")]
    MissingField {
        /// Offending trade.
        trade_id: String,
        /// Field name.
        field: &'static str,
    },

    /// A numeric field holds NaN or an infinity.
    #[error("Trade {trade_id}: field '{field}' is not finite ({value})")]
    NonFinite {
        /// Offending trade.
        trade_id: String,
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// A numeric field violates its domain constraint.
    #[error("Trade {trade_id}: field '{field}' {constraint}, got {value}")]
    OutOfRange {
        /// Offending trade.
        trade_id: String,
        /// Field name.
        field: &'static str,
        /// Human readable constraint, e.g. "must be positive".
        constraint: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// The trade type tag is not one of the supported tags.
    #[error("Unknown trade type tag: {0}")]
    UnknownTradeType(String),
}

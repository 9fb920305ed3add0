//! Binary request/response contract to the pricing engine.
//!
//! Requests and responses cross the engine boundary as Protocol Buffers
//! buffers, which are self-describing at the field level: every field carries
//! its tag and wire type, so a decoder skips fields it does not know.
//!
//! # Compatibility
//!
//! The schema is versioned independently of the pipeline. Field tags are
//! append-only and never reused; removing a field means reserving its tag.
//! Old clients keep decoding new responses because unknown tags are skipped.
//!
//! # Example
//!
//! ```
//! use pricer_core::types::ValuationResult;
//! use pricer_core::wire;
//!
//! let result = ValuationResult::new("TRD_0", "CPTY_A", 12.5, 40.0);
//! let bytes = wire::encode_result(&result);
//! assert_eq!(wire::decode_result(&bytes).unwrap(), result);
//! ```

mod codec;
mod messages;

pub use codec::{
    decode_request, decode_result, decode_risk, decode_risks, encode_request, encode_result,
    encode_risk, encode_risks, WireError,
};
pub use messages::{CounterpartyRiskMessage, TradeRequestMessage, ValuationResultMessage};

/// Revision of the message schema in [`messages`].
pub const WIRE_SCHEMA_VERSION: u32 = 1;

//! Conversions between domain types and wire buffers.

use prost::Message;
use thiserror::Error;

use super::messages::{CounterpartyRiskMessage, TradeRequestMessage, ValuationResultMessage};
use crate::error::ValidationError;
use crate::types::{CounterpartyId, CounterpartyRisk, TradeRequest, ValuationResult};

/// Errors raised while decoding a wire buffer.
#[derive(Debug, Error)]
pub enum WireError {
    /// The buffer is not a valid encoding of the expected message.
    #[error("Malformed wire buffer: {0}")]
    Decode(#[from] prost::DecodeError),

    /// The buffer decoded, but the trade it carries fails validation.
    #[error("Invalid trade on the wire: {0}")]
    Invalid(#[from] ValidationError),
}

/// Serialises a trade request for the pricing engine.
pub fn encode_request(trade: &TradeRequest) -> Vec<u8> {
    TradeRequestMessage {
        trade_id: trade.trade_id().as_str().to_string(),
        counterparty_id: trade.counterparty_id().as_str().to_string(),
        trade_type: trade.trade_type().as_str().to_string(),
        notional: trade.notional(),
        strike: trade.strike(),
        maturity: trade.maturity(),
        spot_price: trade.spot_price(),
        volatility: trade.volatility(),
        risk_free_rate: trade.risk_free_rate(),
    }
    .encode_to_vec()
}

/// Deserialises and validates a trade request.
///
/// # Errors
///
/// [`WireError::Decode`] for a malformed buffer, [`WireError::Invalid`] when
/// the decoded fields do not form a valid trade.
pub fn decode_request(bytes: &[u8]) -> Result<TradeRequest, WireError> {
    let msg = TradeRequestMessage::decode(bytes)?;
    let trade = TradeRequest::builder()
        .trade_id(msg.trade_id)
        .counterparty_id(msg.counterparty_id)
        .trade_type(msg.trade_type.parse()?)
        .notional(msg.notional)
        .strike(msg.strike)
        .maturity(msg.maturity)
        .spot_price(msg.spot_price)
        .volatility(msg.volatility)
        .risk_free_rate(msg.risk_free_rate)
        .build()?;
    Ok(trade)
}

/// Serialises a valuation result.
pub fn encode_result(result: &ValuationResult) -> Vec<u8> {
    ValuationResultMessage {
        trade_id: result.trade_id.as_str().to_string(),
        counterparty_id: result.counterparty_id.as_str().to_string(),
        present_value: result.present_value,
        pfe_95: result.pfe_95,
    }
    .encode_to_vec()
}

/// Deserialises a valuation result.
///
/// No semantic checks are applied here; echo and range checks belong to the
/// valuation client.
pub fn decode_result(bytes: &[u8]) -> Result<ValuationResult, WireError> {
    let msg = ValuationResultMessage::decode(bytes)?;
    Ok(ValuationResult::new(
        msg.trade_id,
        msg.counterparty_id,
        msg.present_value,
        msg.pfe_95,
    ))
}

/// Serialises a counterparty aggregate for export.
pub fn encode_risk(risk: &CounterpartyRisk) -> Vec<u8> {
    CounterpartyRiskMessage {
        counterparty_id: risk.counterparty_id.as_str().to_string(),
        total_pv: risk.total_pv,
        total_pfe: risk.total_pfe,
        cva_charge: risk.cva_charge,
        trade_count: risk.trade_count as u64,
    }
    .encode_to_vec()
}

/// Deserialises a counterparty aggregate.
pub fn decode_risk(bytes: &[u8]) -> Result<CounterpartyRisk, WireError> {
    Ok(risk_from_message(CounterpartyRiskMessage::decode(bytes)?))
}

/// Serialises a sequence of aggregates as length-delimited frames.
///
/// Each frame is a varint byte length followed by one [`encode_risk`]
/// buffer, the standard framing for a stream of protobuf messages.
pub fn encode_risks(risks: &[CounterpartyRisk]) -> Vec<u8> {
    let mut out = Vec::new();
    for risk in risks {
        let frame = encode_risk(risk);
        prost::encoding::encode_varint(frame.len() as u64, &mut out);
        out.extend_from_slice(&frame);
    }
    out
}

/// Deserialises a stream written by [`encode_risks`].
///
/// # Errors
///
/// [`WireError::Decode`] if a frame is truncated or malformed.
pub fn decode_risks(bytes: &[u8]) -> Result<Vec<CounterpartyRisk>, WireError> {
    let mut buf = bytes;
    let mut risks = Vec::new();
    while !buf.is_empty() {
        let msg = CounterpartyRiskMessage::decode_length_delimited(&mut buf)?;
        risks.push(risk_from_message(msg));
    }
    Ok(risks)
}

fn risk_from_message(msg: CounterpartyRiskMessage) -> CounterpartyRisk {
    CounterpartyRisk {
        counterparty_id: CounterpartyId::new(msg.counterparty_id),
        total_pv: msg.total_pv,
        total_pfe: msg.total_pfe,
        cva_charge: msg.cva_charge,
        trade_count: msg.trade_count as usize,
    }
}

//! Trade requests handed to the pricing engine.
//!
//! A [`TradeRequest`] is immutable once built. The only way to build one is
//! [`TradeRequestBuilder::build`], which validates every field, so the
//! pricing stage never sees a trade without a counterparty key.

use std::fmt;
use std::str::FromStr;

use super::ids::{CounterpartyId, TradeId};
use crate::error::ValidationError;

/// Product tag of a trade.
///
/// Carried on the wire as its upper-case tag (`"OPTION"`, `"FORWARD"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum TradeType {
    /// European call option on the underlying.
    #[default]
    Option,
    /// Linear forward on the underlying.
    Forward,
}

impl TradeType {
    /// Returns the wire tag for this trade type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Option => "OPTION",
            TradeType::Forward => "FORWARD",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPTION" => Ok(TradeType::Option),
            "FORWARD" => Ok(TradeType::Forward),
            _ => Err(ValidationError::UnknownTradeType(s.to_string())),
        }
    }
}

/// One trade to be priced, together with its market-data snapshot.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{TradeRequest, TradeType};
///
/// let trade = TradeRequest::builder()
///     .trade_id("TRD_0")
///     .counterparty_id("CPTY_A")
///     .trade_type(TradeType::Option)
///     .notional(1_000_000.0)
///     .strike(100.0)
///     .maturity(1.0)
///     .spot_price(100.0)
///     .volatility(0.2)
///     .risk_free_rate(0.05)
///     .build()
///     .unwrap();
///
/// assert_eq!(trade.counterparty_id().as_str(), "CPTY_A");
/// assert_eq!(trade.notional(), 1_000_000.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TradeRequest {
    trade_id: TradeId,
    counterparty_id: CounterpartyId,
    trade_type: TradeType,
    notional: f64,
    strike: f64,
    maturity: f64,
    spot_price: f64,
    volatility: f64,
    risk_free_rate: f64,
}

impl TradeRequest {
    /// Returns a new builder.
    #[inline]
    pub fn builder() -> TradeRequestBuilder {
        TradeRequestBuilder::default()
    }

    /// Returns the trade ID.
    #[inline]
    pub fn trade_id(&self) -> &TradeId {
        &self.trade_id
    }

    /// Returns the counterparty ID.
    #[inline]
    pub fn counterparty_id(&self) -> &CounterpartyId {
        &self.counterparty_id
    }

    /// Returns the trade type.
    #[inline]
    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// Returns the notional amount (always positive).
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the maturity in years (always positive).
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the spot price of the underlying.
    #[inline]
    pub fn spot_price(&self) -> f64 {
        self.spot_price
    }

    /// Returns the volatility (never negative).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the continuously compounded risk-free rate.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }
}

/// Validating builder for [`TradeRequest`].
#[derive(Clone, Debug, Default)]
pub struct TradeRequestBuilder {
    trade_id: Option<String>,
    counterparty_id: Option<String>,
    trade_type: TradeType,
    notional: Option<f64>,
    strike: Option<f64>,
    maturity: Option<f64>,
    spot_price: Option<f64>,
    volatility: Option<f64>,
    risk_free_rate: Option<f64>,
}

impl TradeRequestBuilder {
    /// Sets the trade ID.
    pub fn trade_id(mut self, id: impl Into<String>) -> Self {
        self.trade_id = Some(id.into());
        self
    }

    /// Sets the counterparty ID.
    pub fn counterparty_id(mut self, id: impl Into<String>) -> Self {
        self.counterparty_id = Some(id.into());
        self
    }

    /// Sets the trade type. Defaults to [`TradeType::Option`].
    pub fn trade_type(mut self, trade_type: TradeType) -> Self {
        self.trade_type = trade_type;
        self
    }

    /// Sets the notional.
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the strike.
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the maturity in years.
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the spot price.
    pub fn spot_price(mut self, spot_price: f64) -> Self {
        self.spot_price = Some(spot_price);
        self
    }

    /// Sets the volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the risk-free rate.
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Validates all fields and builds the trade.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if an id is empty, a field is missing or
    /// non-finite, `notional` or `maturity` is not positive, or `volatility`
    /// is negative.
    pub fn build(self) -> Result<TradeRequest, ValidationError> {
        let trade_id = match self.trade_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(ValidationError::EmptyTradeId),
        };
        let counterparty_id = match self.counterparty_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(ValidationError::EmptyCounterpartyId { trade_id }),
        };

        let notional = required(&trade_id, "notional", self.notional)?;
        let strike = required(&trade_id, "strike", self.strike)?;
        let maturity = required(&trade_id, "maturity", self.maturity)?;
        let spot_price = required(&trade_id, "spot_price", self.spot_price)?;
        let volatility = required(&trade_id, "volatility", self.volatility)?;
        let risk_free_rate = required(&trade_id, "risk_free_rate", self.risk_free_rate)?;

        if notional <= 0.0 {
            return Err(out_of_range(&trade_id, "notional", "must be positive", notional));
        }
        if maturity <= 0.0 {
            return Err(out_of_range(&trade_id, "maturity", "must be positive", maturity));
        }
        if volatility < 0.0 {
            return Err(out_of_range(
                &trade_id,
                "volatility",
                "must be non-negative",
                volatility,
            ));
        }

        Ok(TradeRequest {
            trade_id: TradeId::new(trade_id),
            counterparty_id: CounterpartyId::new(counterparty_id),
            trade_type: self.trade_type,
            notional,
            strike,
            maturity,
            spot_price,
            volatility,
            risk_free_rate,
        })
    }
}

fn required(trade_id: &str, field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::MissingField {
        trade_id: trade_id.to_string(),
        field,
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NonFinite {
            trade_id: trade_id.to_string(),
            field,
            value,
        });
    }
    Ok(value)
}

fn out_of_range(trade_id: &str, field: &'static str, constraint: &'static str, value: f64) -> ValidationError {
    ValidationError::OutOfRange {
        trade_id: trade_id.to_string(),
        field,
        constraint,
        value,
    }
}

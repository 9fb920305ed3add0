//! Protocol Buffers message definitions.
//!
//! Equivalent `.proto` (package `ccr.v1`):
//!
//! ```text
//! message TradeRequest {
//!   string trade_id = 1;        string counterparty_id = 2;
//!   string trade_type = 3;      double notional = 4;
//!   double strike = 5;          double maturity = 6;
//!   double spot_price = 7;      double volatility = 8;
//!   double risk_free_rate = 9;
//! }
//! message ValuationResult {
//!   string trade_id = 1;        string counterparty_id = 2;
//!   double present_value = 3;   double pfe_95 = 4;
//! }
//! message CounterpartyRisk {
//!   string counterparty_id = 1; double total_pv = 2;
//!   double total_pfe = 3;       double cva_charge = 4;
//!   uint64 trade_count = 5;
//! }
//! ```

/// Wire form of a trade request.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TradeRequestMessage {
    /// Trade identifier.
    #[prost(string, tag = "1")]
    pub trade_id: String,
    /// Counterparty identifier.
    #[prost(string, tag = "2")]
    pub counterparty_id: String,
    /// Trade type tag, e.g. `OPTION`.
    #[prost(string, tag = "3")]
    pub trade_type: String,
    /// Notional amount.
    #[prost(double, tag = "4")]
    pub notional: f64,
    /// Strike.
    #[prost(double, tag = "5")]
    pub strike: f64,
    /// Maturity in years.
    #[prost(double, tag = "6")]
    pub maturity: f64,
    /// Spot price of the underlying.
    #[prost(double, tag = "7")]
    pub spot_price: f64,
    /// Volatility.
    #[prost(double, tag = "8")]
    pub volatility: f64,
    /// Risk-free rate.
    #[prost(double, tag = "9")]
    pub risk_free_rate: f64,
}

/// Wire form of a valuation result.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ValuationResultMessage {
    /// Echo of the request's trade identifier.
    #[prost(string, tag = "1")]
    pub trade_id: String,
    /// Echo of the request's counterparty identifier.
    #[prost(string, tag = "2")]
    pub counterparty_id: String,
    /// Present value.
    #[prost(double, tag = "3")]
    pub present_value: f64,
    /// 95% potential future exposure.
    #[prost(double, tag = "4")]
    pub pfe_95: f64,
}

/// Wire form of a counterparty aggregate, used by export sinks.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CounterpartyRiskMessage {
    /// Counterparty identifier.
    #[prost(string, tag = "1")]
    pub counterparty_id: String,
    /// Sum of present values.
    #[prost(double, tag = "2")]
    pub total_pv: f64,
    /// Sum of 95% potential future exposures.
    #[prost(double, tag = "3")]
    pub total_pfe: f64,
    /// CVA charge.
    #[prost(double, tag = "4")]
    pub cva_charge: f64,
    /// Number of valuations aggregated.
    #[prost(uint64, tag = "5")]
    pub trade_count: u64,
}

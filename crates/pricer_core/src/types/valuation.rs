//! Pricing engine output for a single trade.

use super::ids::{CounterpartyId, TradeId};

/// Valuation of exactly one [`TradeRequest`](super::TradeRequest).
///
/// `trade_id` and `counterparty_id` echo the originating request; the
/// valuation client checks the echo before a result enters grouping.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationResult {
    /// Trade identifier.
    pub trade_id: TradeId,
    /// Counterparty identifier (the grouping key).
    pub counterparty_id: CounterpartyId,
    /// Present value; may be negative.
    pub present_value: f64,
    /// Potential future exposure at 95% confidence; non-negative.
    pub pfe_95: f64,
}

impl ValuationResult {
    /// Creates a new valuation result.
    pub fn new(
        trade_id: impl Into<TradeId>,
        counterparty_id: impl Into<CounterpartyId>,
        present_value: f64,
        pfe_95: f64,
    ) -> Self {
        Self {
            trade_id: trade_id.into(),
            counterparty_id: counterparty_id.into(),
            present_value,
            pfe_95,
        }
    }

    /// Returns whether the numeric fields satisfy their domain: both finite
    /// and `pfe_95` non-negative.
    #[inline]
    pub fn has_valid_measures(&self) -> bool {
        self.present_value.is_finite() && self.pfe_95.is_finite() && self.pfe_95 >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valuation_result() {
        let result = ValuationResult::new("T1", "CPTY_A", -20.0, 5.0);
        assert_eq!(result.trade_id.as_str(), "T1");
        assert_eq!(result.counterparty_id.as_str(), "CPTY_A");
        assert_eq!(result.present_value, -20.0);
        assert_eq!(result.pfe_95, 5.0);
        assert!(result.has_valid_measures());
    }

    #[test]
    fn test_negative_pfe_is_invalid() {
        let result = ValuationResult::new("T1", "CPTY_A", 1.0, -0.5);
        assert!(!result.has_valid_measures());
    }

    #[test]
    fn test_non_finite_pv_is_invalid() {
        let result = ValuationResult::new("T1", "CPTY_A", f64::INFINITY, 0.0);
        assert!(!result.has_valid_measures());
    }
}

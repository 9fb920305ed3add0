//! Per-counterparty aggregate exposure.

use super::ids::CounterpartyId;

/// Aggregate credit exposure for one counterparty.
///
/// One record is produced per distinct counterparty with at least one
/// successfully priced trade. It is terminal: written to the sink and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterpartyRisk {
    /// Counterparty identifier.
    pub counterparty_id: CounterpartyId,
    /// Sum of present values; may be negative.
    pub total_pv: f64,
    /// Sum of 95% potential future exposures; non-negative.
    pub total_pfe: f64,
    /// Credit valuation adjustment charge: `total_pfe × cva_rate`.
    pub cva_charge: f64,
    /// Number of valuations folded into this record.
    pub trade_count: usize,
}

impl CounterpartyRisk {
    /// Creates a new aggregate, deriving the CVA charge from `total_pfe`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::{CounterpartyId, CounterpartyRisk};
    ///
    /// let risk = CounterpartyRisk::new(CounterpartyId::new("CPTY_B"), 50.0, 8.0, 0.02, 1);
    /// assert_eq!(risk.cva_charge, 8.0 * 0.02);
    /// ```
    pub fn new(
        counterparty_id: CounterpartyId,
        total_pv: f64,
        total_pfe: f64,
        cva_rate: f64,
        trade_count: usize,
    ) -> Self {
        Self {
            counterparty_id,
            total_pv,
            total_pfe,
            cva_charge: total_pfe * cva_rate,
            trade_count,
        }
    }
}

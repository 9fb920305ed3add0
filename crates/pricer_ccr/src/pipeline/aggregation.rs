//! Aggregation stage: reduces one counterparty's results to a
//! [`CounterpartyRisk`].
//!
//! Sums use Neumaier compensated summation in slice order. The grouping
//! stage hands over each group sorted by `trade_id`, so a run's aggregates
//! are bit-identical whatever order the trades were priced in. For an
//! arbitrary permutation of the same slice the totals agree to within a
//! few ulps of the largest partial sum.

use pricer_core::{CounterpartyId, CounterpartyRisk, ValuationResult};

use super::grouping::Groups;
use crate::error::AggregationError;

/// Aggregates one counterparty's valuation results.
///
/// ```text
/// total_pv   = Σ present_value
/// total_pfe  = Σ pfe_95
/// cva_charge = total_pfe × cva_rate
/// ```
///
/// # Errors
///
/// [`AggregationError::EmptyGroup`] if `results` is empty.
///
/// # Examples
///
/// ```
/// use pricer_ccr::pipeline::aggregate;
/// use pricer_core::{CounterpartyId, ValuationResult};
///
/// let results = vec![
///     ValuationResult::new("T1", "CPTY_A", 100.0, 10.0),
///     ValuationResult::new("T2", "CPTY_A", -20.0, 5.0),
/// ];
/// let risk = aggregate(&CounterpartyId::new("CPTY_A"), &results, 0.02).unwrap();
///
/// assert_eq!(risk.total_pv, 80.0);
/// assert_eq!(risk.total_pfe, 15.0);
/// assert_eq!(risk.cva_charge, 15.0 * 0.02);
/// ```
pub fn aggregate(
    counterparty_id: &CounterpartyId,
    results: &[ValuationResult],
    cva_rate: f64,
) -> Result<CounterpartyRisk, AggregationError> {
    if results.is_empty() {
        return Err(AggregationError::EmptyGroup(counterparty_id.clone()));
    }
    let total_pv = compensated_sum(results.iter().map(|r| r.present_value));
    let total_pfe = compensated_sum(results.iter().map(|r| r.pfe_95));
    Ok(CounterpartyRisk::new(
        counterparty_id.clone(),
        total_pv,
        total_pfe,
        cva_rate,
        results.len(),
    ))
}

/// Aggregates every group, in key order.
///
/// A failing key is reported and does not affect the others.
pub fn aggregate_groups(
    groups: &Groups,
    cva_rate: f64,
) -> (Vec<CounterpartyRisk>, Vec<AggregationError>) {
    let mut risks = Vec::with_capacity(groups.len());
    let mut errors = Vec::new();
    for (key, results) in groups {
        match aggregate(key, results, cva_rate) {
            Ok(risk) => risks.push(risk),
            Err(err) => {
                tracing::error!(counterparty_id = %key, error = %err, "Aggregation failed");
                errors.push(err);
            }
        }
    }
    (risks, errors)
}

/// Neumaier summation.
///
/// Once the running sum overflows the overflowed value is returned as is;
/// the compensation term would otherwise turn it into `NaN`.
fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for x in values {
        let t = sum + x;
        if !t.is_finite() {
            return t;
        }
        if sum.abs() >= x.abs() {
            compensation += (sum - t) + x;
        } else {
            compensation += (x - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

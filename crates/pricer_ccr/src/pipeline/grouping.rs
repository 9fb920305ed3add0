//! Grouping stage: partitions priced pairs by counterparty.
//!
//! The partition consumes the whole pricing output before any group is
//! handed on, so no key is ever aggregated from a partial result set.
//! Each group is put in `trade_id` order, which makes the downstream
//! reduction independent of the order in which trades were priced.

use std::collections::{BTreeMap, BTreeSet};

use pricer_core::{CounterpartyId, ValuationResult};

use super::pricing::PricedPair;
use crate::report::{FailureKind, TradeFailure};

/// Complete result sets keyed by counterparty, in key order.
pub type Groups = BTreeMap<CounterpartyId, Vec<ValuationResult>>;

/// Partitions `pairs` by counterparty.
///
/// # Examples
///
/// ```
/// use pricer_ccr::pipeline::group_by_counterparty;
/// use pricer_core::{CounterpartyId, ValuationResult};
///
/// let pairs = vec![
///     (CounterpartyId::new("CPTY_B"), ValuationResult::new("T3", "CPTY_B", 50.0, 8.0)),
///     (CounterpartyId::new("CPTY_A"), ValuationResult::new("T2", "CPTY_A", -20.0, 5.0)),
///     (CounterpartyId::new("CPTY_A"), ValuationResult::new("T1", "CPTY_A", 100.0, 10.0)),
/// ];
/// let groups = group_by_counterparty(pairs);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[&CounterpartyId::new("CPTY_A")][0].trade_id.as_str(), "T1");
/// ```
pub fn group_by_counterparty(pairs: Vec<PricedPair>) -> Groups {
    let mut groups = Groups::new();
    for (key, result) in pairs {
        groups.entry(key).or_default().push(result);
    }
    for results in groups.values_mut() {
        results.sort_by(|a, b| a.trade_id.cmp(&b.trade_id));
    }
    groups
}

/// Removes every group with a skipped trade and returns the removed keys.
///
/// A counterparty whose trades did not all reach a definitive outcome is
/// withheld entirely, including when none of its trades were priced.
pub fn withhold_incomplete(groups: &mut Groups, failures: &[TradeFailure]) -> Vec<CounterpartyId> {
    let incomplete: BTreeSet<&CounterpartyId> = failures
        .iter()
        .filter(|f| f.kind == FailureKind::Skipped)
        .map(|f| &f.counterparty_id)
        .collect();

    incomplete
        .into_iter()
        .map(|key| {
            groups.remove(key);
            key.clone()
        })
        .collect()
}

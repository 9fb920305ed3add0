//! Identifier types for trades and counterparties.
//!
//! Newtypes keep a trade id from being used where a counterparty key is
//! expected. `CounterpartyId` is the grouping key of the pipeline, so it is
//! `Ord` as well as `Hash`: aggregates are emitted in key order.

use std::fmt;

/// Unique identifier for a trade within one pipeline run.
///
/// # Examples
///
/// ```
/// use pricer_core::types::TradeId;
///
/// let id = TradeId::new("TRD_0");
/// assert_eq!(id.as_str(), "TRD_0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TradeId(String);

impl TradeId {
    /// Creates a new trade ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the ID is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TradeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TradeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a counterparty; the aggregation key.
///
/// # Examples
///
/// ```
/// use pricer_core::types::CounterpartyId;
///
/// let id = CounterpartyId::new("CPTY_A");
/// assert_eq!(id.as_str(), "CPTY_A");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CounterpartyId(String);

impl CounterpartyId {
    /// Creates a new counterparty ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the ID is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CounterpartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CounterpartyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CounterpartyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn test_trade_id_creation() {
        let id = TradeId::new("TRD_1");
        assert_eq!(id.as_str(), "TRD_1");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_trade_id_from_string() {
        let id: TradeId = String::from("TRD_2").into();
        assert_eq!(id.as_str(), "TRD_2");
    }

    #[test]
    fn test_trade_id_display() {
        assert_eq!(format!("{}", TradeId::new("TRD_3")), "TRD_3");
    }

    #[test]
    fn test_counterparty_id_hash() {
        let mut set = HashSet::new();
        set.insert(CounterpartyId::new("CPTY_A"));
        set.insert(CounterpartyId::new("CPTY_B"));
        set.insert(CounterpartyId::new("CPTY_A")); // Duplicate
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_counterparty_id_ordering() {
        let set: BTreeSet<CounterpartyId> = ["CPTY_C", "CPTY_A", "CPTY_B"]
            .into_iter()
            .map(CounterpartyId::from)
            .collect();
        let ordered: Vec<&str> = set.iter().map(|c| c.as_str()).collect();
        assert_eq!(ordered, vec!["CPTY_A", "CPTY_B", "CPTY_C"]);
    }

    #[test]
    fn test_empty_counterparty_id() {
        assert!(CounterpartyId::new("").is_empty());
    }
}

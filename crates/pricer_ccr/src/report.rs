//! Run report: aggregates plus everything that did not make it into them.

use std::fmt;

use pricer_core::{CounterpartyId, CounterpartyRisk, TradeId};

use crate::error::AggregationError;

/// Why a trade is missing from the aggregates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FailureKind {
    /// The engine call failed.
    Pricing,
    /// The engine answered for another trade or counterparty.
    Integrity,
    /// The run was cancelled before the trade was priced.
    Skipped,
}

impl FailureKind {
    /// All kinds, in report order.
    pub const ALL: [FailureKind; 3] = [
        FailureKind::Pricing,
        FailureKind::Integrity,
        FailureKind::Skipped,
    ];

    /// Returns the lower-case label used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Pricing => "pricing",
            FailureKind::Integrity => "integrity",
            FailureKind::Skipped => "skipped",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trade dropped from the run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TradeFailure {
    /// Dropped trade.
    pub trade_id: TradeId,
    /// Counterparty the trade belongs to.
    pub counterparty_id: CounterpartyId,
    /// Failure class.
    pub kind: FailureKind,
    /// Human-readable cause.
    pub message: String,
}

/// Counts describing a completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunSummary {
    /// Trades handed to the pipeline.
    pub trades_submitted: usize,
    /// Trades priced successfully.
    pub trades_priced: usize,
    /// Trades dropped on an engine failure.
    pub pricing_failures: usize,
    /// Trades dropped on an echo mismatch.
    pub integrity_failures: usize,
    /// Trades never priced because the run was cancelled.
    pub skipped: usize,
    /// Aggregates emitted.
    pub counterparties: usize,
    /// Wall-clock duration of the run.
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// Returns the number of dropped trades per failure kind.
    pub fn failures_by_kind(&self) -> [(FailureKind, usize); 3] {
        [
            (FailureKind::Pricing, self.pricing_failures),
            (FailureKind::Integrity, self.integrity_failures),
            (FailureKind::Skipped, self.skipped),
        ]
    }

    /// Returns the total number of dropped trades.
    pub fn dropped(&self) -> usize {
        self.pricing_failures + self.integrity_failures + self.skipped
    }
}

/// Everything a run produced.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunOutcome {
    /// One aggregate per emitted counterparty, sorted by id.
    pub risks: Vec<CounterpartyRisk>,
    /// Dropped trades, in input order.
    pub failures: Vec<TradeFailure>,
    /// Keys whose aggregation failed.
    pub aggregation_errors: Vec<AggregationError>,
    /// Keys not emitted because the run was cancelled before all their
    /// trades were priced.
    pub withheld: Vec<CounterpartyId>,
    /// Counts.
    pub summary: RunSummary,
}

impl RunOutcome {
    /// Returns the aggregate for `counterparty_id`, if one was emitted.
    pub fn risk_for(&self, counterparty_id: &str) -> Option<&CounterpartyRisk> {
        self.risks
            .iter()
            .find(|r| r.counterparty_id.as_str() == counterparty_id)
    }

    /// Returns whether every submitted trade made it into an aggregate.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.aggregation_errors.is_empty() && self.withheld.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_by_kind() {
        let summary = RunSummary {
            trades_submitted: 10,
            trades_priced: 6,
            pricing_failures: 2,
            integrity_failures: 1,
            skipped: 1,
            ..Default::default()
        };
        assert_eq!(
            summary.failures_by_kind(),
            [
                (FailureKind::Pricing, 2),
                (FailureKind::Integrity, 1),
                (FailureKind::Skipped, 1)
            ]
        );
        assert_eq!(summary.dropped(), 4);
    }

    #[test]
    fn test_failure_kind_labels() {
        let labels: Vec<&str> = FailureKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(labels, vec!["pricing", "integrity", "skipped"]);
        assert_eq!(format!("{}", FailureKind::Integrity), "integrity");
    }

    #[test]
    fn test_empty_outcome_is_complete() {
        let outcome = RunOutcome::default();
        assert!(outcome.is_complete());
        assert!(outcome.risk_for("CPTY_A").is_none());
    }
}

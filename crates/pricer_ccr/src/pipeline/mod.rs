//! The keyed fan-out/aggregate pipeline.
//!
//! ```text
//! Source → Pricing → Grouping → Aggregation → Sink
//! ```
//!
//! - `pricing`: prices each trade independently on a bounded pool
//! - `grouping`: partitions results by counterparty (the barrier)
//! - `aggregation`: reduces each partition to a `CounterpartyRisk`
//! - `driver`: wires the stages for one bounded run

pub mod aggregation;
pub mod driver;
pub mod grouping;
pub mod pricing;

pub use aggregation::{aggregate, aggregate_groups};
pub use driver::{run_pipeline, run_pipeline_with_cancellation, run_source};
pub use grouping::{group_by_counterparty, withhold_incomplete, Groups};
pub use pricing::{price_trades, PricedPair, PricingOutput};

//! Result sinks: table, JSON, CSV and protobuf

use std::io::Write;

use clap::ValueEnum;
use pricer_ccr::{FailureKind, RunOutcome};
use pricer_core::wire;

use crate::error::Result;

/// Output format of the aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    /// Length-delimited `CounterpartyRiskMessage` frames
    Protobuf,
}

impl OutputFormat {
    /// Whether the format carries aggregates only, without the run summary
    pub fn is_data_only(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Protobuf)
    }
}

/// Write the aggregates in `format`
///
/// The table and JSON forms carry the dropped-trade summary themselves.
/// The CSV and protobuf forms hold aggregates only; use [`write_summary`]
/// alongside them.
pub fn write_outcome<W: Write>(outcome: &RunOutcome, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(outcome, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcome)?;
            writeln!(out)?;
            Ok(())
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for risk in &outcome.risks {
                writer.serialize(risk)?;
            }
            writer.flush()?;
            Ok(())
        }
        OutputFormat::Protobuf => {
            out.write_all(&wire::encode_risks(&outcome.risks))?;
            Ok(())
        }
    }
}

fn write_table<W: Write>(outcome: &RunOutcome, out: &mut W) -> Result<()> {
    writeln!(out, "┌──────────────────┬────────┬──────────────────┬──────────────────┬──────────────┐")?;
    writeln!(out, "│ Counterparty     │ Trades │ Total PV         │ Total PFE        │ CVA          │")?;
    writeln!(out, "├──────────────────┼────────┼──────────────────┼──────────────────┼──────────────┤")?;
    if outcome.risks.is_empty() {
        writeln!(out, "│ (no data)        │        │                  │                  │              │")?;
    }
    for risk in &outcome.risks {
        writeln!(
            out,
            "│ {:<16} │ {:>6} │ {:>16.2} │ {:>16.2} │ {:>12.2} │",
            risk.counterparty_id.as_str(),
            risk.trade_count,
            risk.total_pv,
            risk.total_pfe,
            risk.cva_charge
        )?;
    }
    writeln!(out, "└──────────────────┴────────┴──────────────────┴──────────────────┴──────────────┘")?;
    write_summary(outcome, out)
}

/// Write the dropped-trade summary by failure kind
pub fn write_summary<W: Write>(outcome: &RunOutcome, out: &mut W) -> Result<()> {
    let summary = &outcome.summary;
    writeln!(
        out,
        "Trades: {} submitted, {} priced, {} dropped ({} ms)",
        summary.trades_submitted,
        summary.trades_priced,
        summary.dropped(),
        summary.elapsed_ms
    )?;
    if summary.dropped() > 0 {
        let by_kind: Vec<String> = summary
            .failures_by_kind()
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(kind, n)| format!("{kind}={n}"))
            .collect();
        writeln!(out, "Dropped by kind: {}", by_kind.join(", "))?;
        for failure in outcome.failures.iter().filter(|f| f.kind != FailureKind::Skipped) {
            writeln!(
                out,
                "  [{}] {} ({}): {}",
                failure.kind, failure.trade_id, failure.counterparty_id, failure.message
            )?;
        }
    }
    if !outcome.withheld.is_empty() {
        let keys: Vec<&str> = outcome.withheld.iter().map(|k| k.as_str()).collect();
        writeln!(out, "Withheld (incomplete): {}", keys.join(", "))?;
    }
    for err in &outcome.aggregation_errors {
        writeln!(out, "Aggregation error: {err}")?;
    }
    Ok(())
}

//! Trade ingestion from CSV and JSON files
//!
//! Every record goes through [`TradeRequest::builder`]; the first invalid
//! record aborts ingestion, so nothing malformed reaches pricing.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use pricer_core::{TradeRequest, ValidationError};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// One trade as it appears in an input file
///
/// Every field is optional at this level so that a missing value is
/// reported by the builder with the trade it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TradeRecord {
    pub trade_id: Option<String>,
    pub counterparty_id: Option<String>,
    pub trade_type: Option<String>,
    pub notional: Option<f64>,
    pub strike: Option<f64>,
    pub maturity: Option<f64>,
    pub spot_price: Option<f64>,
    pub volatility: Option<f64>,
    pub risk_free_rate: Option<f64>,
}

impl TradeRecord {
    /// Validate the record into a trade request
    pub fn into_request(self) -> std::result::Result<TradeRequest, ValidationError> {
        let mut builder = TradeRequest::builder();
        if let Some(id) = self.trade_id {
            builder = builder.trade_id(id);
        }
        if let Some(id) = self.counterparty_id {
            builder = builder.counterparty_id(id);
        }
        if let Some(tag) = self.trade_type.filter(|t| !t.trim().is_empty()) {
            builder = builder.trade_type(tag.parse()?);
        }
        if let Some(v) = self.notional {
            builder = builder.notional(v);
        }
        if let Some(v) = self.strike {
            builder = builder.strike(v);
        }
        if let Some(v) = self.maturity {
            builder = builder.maturity(v);
        }
        if let Some(v) = self.spot_price {
            builder = builder.spot_price(v);
        }
        if let Some(v) = self.volatility {
            builder = builder.volatility(v);
        }
        if let Some(v) = self.risk_free_rate {
            builder = builder.risk_free_rate(v);
        }
        builder.build()
    }
}

/// Load trades from a `.csv` or `.json` file
pub fn load_trades(path: &Path) -> Result<Vec<TradeRequest>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let reader = BufReader::new(File::open(path)?);
    let name = path.display().to_string();

    match extension.as_deref() {
        Some("csv") => read_csv(reader, &name),
        Some("json") => read_json(reader, &name),
        _ => Err(CliError::InvalidArgument(format!(
            "Unsupported input file: {}. Supported: .csv, .json",
            name
        ))),
    }
}

/// Read trades from CSV with a header row
pub fn read_csv<R: Read>(reader: R, name: &str) -> Result<Vec<TradeRequest>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut trades = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());
        let record: TradeRecord = row.deserialize(Some(&headers))?;
        let trade = record.into_request().map_err(|source| CliError::InvalidRecord {
            path: name.to_string(),
            location: format!("line {}", line),
            source,
        })?;
        trades.push(trade);
    }
    Ok(trades)
}

/// Read trades from a JSON array of records
pub fn read_json<R: Read>(reader: R, name: &str) -> Result<Vec<TradeRequest>> {
    let records: Vec<TradeRecord> = serde_json::from_reader(reader)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            record.into_request().map_err(|source| CliError::InvalidRecord {
                path: name.to_string(),
                location: format!("record {}", i + 1),
                source,
            })
        })
        .collect()
}

//! End-to-end properties of the CCR pipeline.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use pricer_ccr::{
    run_pipeline, run_pipeline_with_cancellation, CancellationToken, FailureKind, PipelineConfig,
    PricingError, RetryPolicy, ValuationClient, ValuationError,
};
use pricer_core::{TradeRequest, ValuationResult};
use pricer_engine::{EngineConfig, EngineError, MonteCarloEngine, PricingEngine};
use proptest::prelude::*;

fn trade(id: &str, cpty: &str) -> TradeRequest {
    TradeRequest::builder()
        .trade_id(id)
        .counterparty_id(cpty)
        .notional(1_000_000.0)
        .strike(100.0)
        .maturity(1.0)
        .spot_price(100.0)
        .volatility(0.2)
        .risk_free_rate(0.05)
        .build()
        .unwrap()
}

/// Input row: (counterparty index, pv, pfe, fails).
type Row = (u8, f64, f64, bool);

fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0u8..6, -1e6f64..1e6, 0.0f64..1e6, prop::bool::weighted(0.2)), 0..80)
}

fn build(rows: &[Row]) -> (Vec<TradeRequest>, HashMap<String, Row>) {
    let trades = rows
        .iter()
        .enumerate()
        .map(|(i, r)| trade(&format!("T{i:03}"), &format!("CPTY_{}", r.0)))
        .collect();
    let table = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (format!("T{i:03}"), *r))
        .collect();
    (trades, table)
}

fn table_pricer(
    table: &HashMap<String, Row>,
) -> impl Fn(&TradeRequest) -> Result<ValuationResult, ValuationError> + Sync + '_ {
    move |t: &TradeRequest| -> Result<ValuationResult, ValuationError> {
        let (_, pv, pfe, fails) = table[t.trade_id().as_str()];
        if fails {
            return Err(PricingError::Rejected("scripted".to_string()).into());
        }
        Ok(ValuationResult::new(
            t.trade_id().clone(),
            t.counterparty_id().clone(),
            pv,
            pfe,
        ))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_priced_result_counted_exactly_once(rows in rows()) {
        let (trades, table) = build(&rows);
        let pricer = table_pricer(&table);
        let config = PipelineConfig::default().with_max_concurrency(4).with_batch_size(3);
        let outcome = run_pipeline(trades, &pricer, &config).unwrap();

        let priced = rows.iter().filter(|r| !r.3).count();
        let counted: usize = outcome.risks.iter().map(|r| r.trade_count).sum();
        prop_assert_eq!(counted, priced);
        prop_assert_eq!(outcome.summary.trades_priced, priced);
        prop_assert_eq!(outcome.failures.len(), rows.len() - priced);
        prop_assert!(outcome.failures.iter().all(|f| f.kind == FailureKind::Pricing));

        for risk in &outcome.risks {
            let expected: Vec<&Row> = rows
                .iter()
                .filter(|r| !r.3 && format!("CPTY_{}", r.0) == risk.counterparty_id.as_str())
                .collect();
            prop_assert!(!expected.is_empty());
            prop_assert_eq!(risk.trade_count, expected.len());
            let pv: f64 = expected.iter().map(|r| r.1).sum();
            let pfe: f64 = expected.iter().map(|r| r.2).sum();
            let scale = expected.iter().map(|r| r.1.abs() + r.2).sum::<f64>().max(1.0);
            prop_assert!((risk.total_pv - pv).abs() <= 1e-9 * scale);
            prop_assert!((risk.total_pfe - pfe).abs() <= 1e-9 * scale);
            prop_assert_eq!(risk.cva_charge, risk.total_pfe * config.cva_rate);
        }
    }

    #[test]
    fn prop_input_order_does_not_change_output(rows in rows()) {
        let (trades, table) = build(&rows);
        let pricer = table_pricer(&table);
        let mut reversed = trades.clone();
        reversed.reverse();

        let config = PipelineConfig::default().with_max_concurrency(3).with_batch_size(2);
        let forward = run_pipeline(trades, &pricer, &config).unwrap();
        let backward = run_pipeline(reversed, &pricer, &config).unwrap();

        prop_assert_eq!(forward.risks, backward.risks);
    }
}

#[test]
fn test_monte_carlo_book_is_reproducible() {
    let engine = MonteCarloEngine::new(EngineConfig::default().with_num_paths(2_000)).unwrap();
    let client = ValuationClient::new(engine);
    let pricer = |t: &TradeRequest| client.price(t);

    let book: Vec<TradeRequest> = (0..24)
        .map(|i| trade(&format!("TRD_{i}"), ["CPTY_A", "CPTY_B", "CPTY_C"][i % 3]))
        .collect();

    let serial = PipelineConfig::default().with_max_concurrency(1);
    let parallel = PipelineConfig::default().with_max_concurrency(4).with_batch_size(5);
    let a = run_pipeline(book.clone(), &pricer, &serial).unwrap();
    let b = run_pipeline(book, &pricer, &parallel).unwrap();

    assert_eq!(a.risks, b.risks);
    assert_eq!(a.risks.len(), 3);
    for risk in &a.risks {
        assert_eq!(risk.trade_count, 8);
        assert!(risk.total_pfe > 0.0);
        assert_relative_eq!(risk.cva_charge, risk.total_pfe * 0.02);
    }
}

/// Engine that is down for every trade of one counterparty.
struct PartialOutage;

impl PricingEngine for PartialOutage {
    fn calculate_risk(&self, request: &[u8]) -> Result<Vec<u8>, EngineError> {
        let trade = pricer_core::wire::decode_request(request)
            .map_err(|e| EngineError::Rejected(e.to_string()))?;
        if trade.counterparty_id().as_str() == "CPTY_DOWN" {
            return Err(EngineError::Unavailable("maintenance".to_string()));
        }
        Ok(pricer_core::wire::encode_result(&ValuationResult::new(
            trade.trade_id().clone(),
            trade.counterparty_id().clone(),
            2.0,
            3.0,
        )))
    }
}

#[test]
fn test_engine_outage_isolated_to_one_counterparty() {
    let client = ValuationClient::with_retry(PartialOutage, RetryPolicy::new(2, 0));
    let pricer = |t: &TradeRequest| client.price(t);
    let trades = vec![
        trade("T1", "CPTY_UP"),
        trade("T2", "CPTY_DOWN"),
        trade("T3", "CPTY_UP"),
    ];
    let outcome = run_pipeline(trades, &pricer, &PipelineConfig::default()).unwrap();

    assert_eq!(outcome.risks.len(), 1);
    let up = outcome.risk_for("CPTY_UP").unwrap();
    assert_eq!(up.total_pv, 4.0);
    assert_eq!(up.total_pfe, 6.0);
    assert_eq!(outcome.summary.pricing_failures, 1);
    assert_eq!(outcome.failures[0].counterparty_id.as_str(), "CPTY_DOWN");
    assert!(outcome.failures[0].message.contains("maintenance"));
}

#[test]
fn test_cancellation_cuts_retry_backoff_short() {
    let cancel = CancellationToken::new();
    let client = ValuationClient::with_retry(PartialOutage, RetryPolicy::new(4, 30_000))
        .with_cancellation(cancel.clone());
    let pricer = |t: &TradeRequest| client.price(t);
    let trades = vec![trade("T1", "CPTY_UP"), trade("T2", "CPTY_DOWN")];

    let canceller = {
        let cancel = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            cancel.cancel();
        })
    };
    let started = Instant::now();
    let outcome =
        run_pipeline_with_cancellation(trades, &pricer, &PipelineConfig::default(), &cancel)
            .unwrap();
    canceller.join().unwrap();

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(outcome.risk_for("CPTY_DOWN").is_none());
    assert_eq!(outcome.withheld.len(), 1);
    assert_eq!(outcome.withheld[0].as_str(), "CPTY_DOWN");
    let down = outcome
        .failures
        .iter()
        .find(|f| f.trade_id.as_str() == "T2")
        .unwrap();
    assert_eq!(down.kind, FailureKind::Skipped);
    assert_eq!(outcome.summary.pricing_failures, 0);
}

/// Engine that swaps the counterparty on the way back.
struct Scrambler;

impl PricingEngine for Scrambler {
    fn calculate_risk(&self, request: &[u8]) -> Result<Vec<u8>, EngineError> {
        let trade = pricer_core::wire::decode_request(request)
            .map_err(|e| EngineError::Rejected(e.to_string()))?;
        Ok(pricer_core::wire::encode_result(&ValuationResult::new(
            trade.trade_id().clone(),
            "CPTY_OTHER",
            1.0,
            1.0,
        )))
    }
}

#[test]
fn test_echo_mismatch_reported_as_integrity_failure() {
    let client = ValuationClient::new(Scrambler);
    let pricer = |t: &TradeRequest| client.price(t);
    let outcome =
        run_pipeline(vec![trade("T1", "CPTY_A")], &pricer, &PipelineConfig::default()).unwrap();

    assert!(outcome.risks.is_empty());
    assert_eq!(outcome.summary.integrity_failures, 1);
    assert_eq!(outcome.failures[0].kind, FailureKind::Integrity);
}

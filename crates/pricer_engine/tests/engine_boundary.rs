//! Integration tests for the serialised engine boundary.

use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_core::types::{TradeRequest, TradeType};
use pricer_core::wire;
use pricer_engine::{EngineConfig, EngineError, MonteCarloEngine, PricingEngine};
use proptest::prelude::*;

fn trade(id: &str, cpty: &str, trade_type: TradeType, spot: f64) -> TradeRequest {
    TradeRequest::builder()
        .trade_id(id)
        .counterparty_id(cpty)
        .trade_type(trade_type)
        .notional(1_000_000.0)
        .strike(100.0)
        .maturity(1.0)
        .spot_price(spot)
        .volatility(0.2)
        .risk_free_rate(0.05)
        .build()
        .unwrap()
}

fn price(engine: &dyn PricingEngine, trade: &TradeRequest) -> pricer_core::ValuationResult {
    let response = engine.calculate_risk(&wire::encode_request(trade)).unwrap();
    wire::decode_result(&response).unwrap()
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine: Arc<dyn PricingEngine> =
        Arc::new(MonteCarloEngine::new(EngineConfig::default().with_num_paths(1_000)).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let t = trade(&format!("TRD_{i}"), "CPTY_A", TradeType::Option, 100.0);
                price(engine.as_ref(), &t)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        assert_eq!(result.trade_id.as_str(), format!("TRD_{i}"));
        assert!(result.has_valid_measures());
    }
}

#[test]
fn test_same_trade_same_result_across_engines() {
    let config = EngineConfig::default().with_num_paths(2_000).with_seed(7);
    let a = MonteCarloEngine::new(config.clone()).unwrap();
    let b = MonteCarloEngine::new(config).unwrap();
    let t = trade("TRD_5", "CPTY_B", TradeType::Option, 105.0);
    assert_eq!(price(&a, &t), price(&b, &t));
}

#[test]
fn test_different_seed_changes_result() {
    let a = MonteCarloEngine::new(EngineConfig::default().with_num_paths(2_000).with_seed(1))
        .unwrap();
    let b = MonteCarloEngine::new(EngineConfig::default().with_num_paths(2_000).with_seed(2))
        .unwrap();
    let t = trade("TRD_5", "CPTY_B", TradeType::Option, 105.0);
    assert_ne!(price(&a, &t).present_value, price(&b, &t).present_value);
}

#[test]
fn test_forward_pv_matches_discounted_forward() {
    let engine =
        MonteCarloEngine::new(EngineConfig::default().with_num_paths(200_000)).unwrap();
    let t = trade("TRD_F", "CPTY_C", TradeType::Forward, 100.0);
    let result = price(&engine, &t);
    // E[S_T] = S_0 e^{rT}, so PV = N (S_0 - K e^{-rT})
    let expected = 1_000_000.0 * (100.0 - 100.0 * (-0.05f64).exp());
    assert_relative_eq!(result.present_value, expected, max_relative = 0.05);
}

#[test]
fn test_empty_request_rejected_not_transient() {
    let engine = MonteCarloEngine::new(EngineConfig::default()).unwrap();
    match engine.calculate_risk(&[]) {
        Err(EngineError::Rejected(msg)) => assert!(!msg.is_empty()),
        other => panic!("expected rejection, got {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_option_measures_are_valid(spot in 50.0f64..150.0, vol in 0.0f64..0.8) {
        let engine = MonteCarloEngine::new(EngineConfig::default().with_num_paths(500)).unwrap();
        let t = TradeRequest::builder()
            .trade_id("TRD_P")
            .counterparty_id("CPTY_P")
            .trade_type(TradeType::Option)
            .notional(1.0)
            .strike(100.0)
            .maturity(1.0)
            .spot_price(spot)
            .volatility(vol)
            .risk_free_rate(0.05)
            .build()
            .unwrap();
        let result = price(&engine, &t);
        prop_assert!(result.has_valid_measures());
        prop_assert!(result.present_value >= 0.0);
    }
}

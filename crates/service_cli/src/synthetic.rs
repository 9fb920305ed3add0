//! Synthetic trade book for demonstration runs

use pricer_core::{TradeRequest, TradeType, ValidationError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Counterparties used when none are given
pub const DEFAULT_COUNTERPARTIES: [&str; 3] = ["CPTY_A", "CPTY_B", "CPTY_C"];

/// Generate `count` at-the-money-ish one-year options
///
/// Each trade has notional 1 000 000, strike 100, spot drawn uniformly from
/// [90, 110), vol 20% and rate 5%, and is booked against a counterparty
/// drawn uniformly from `counterparties`. The book is fully determined by
/// `seed`.
pub fn generate_trades(
    count: usize,
    counterparties: &[String],
    seed: u64,
) -> Result<Vec<TradeRequest>, ValidationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let counterparty = if counterparties.is_empty() {
                String::new()
            } else {
                counterparties[rng.gen_range(0..counterparties.len())].clone()
            };
            TradeRequest::builder()
                .trade_id(format!("TRD_{i}"))
                .counterparty_id(counterparty)
                .trade_type(TradeType::Option)
                .notional(1_000_000.0)
                .strike(100.0)
                .maturity(1.0)
                .spot_price(100.0 + rng.gen_range(-10.0..10.0))
                .volatility(0.20)
                .risk_free_rate(0.05)
                .build()
        })
        .collect()
}

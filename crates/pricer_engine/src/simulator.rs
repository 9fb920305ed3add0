//! Geometric Brownian motion terminal-spot sampling.
//!
//! Under the risk-neutral measure the terminal spot is
//!
//! ```text
//! S_T = S_0 · exp((r - σ²/2)·T + σ·√T·Z),   Z ~ N(0, 1)
//! ```
//!
//! so a single normal draw per path is exact; no time stepping is needed for
//! payoffs that only depend on `S_T`.

use crate::rng::PricerRng;

/// Samples `n_paths` terminal spots of a GBM.
///
/// # Arguments
///
/// * `s0` - Spot at time zero
/// * `r` - Risk-free rate (drift under the risk-neutral measure)
/// * `sigma` - Volatility
/// * `t` - Horizon in years
/// * `n_paths` - Number of paths
/// * `rng` - Random source
///
/// # Examples
///
/// ```
/// use pricer_engine::rng::PricerRng;
/// use pricer_engine::simulator::simulate_gbm;
///
/// let mut rng = PricerRng::from_seed(42);
/// let spots = simulate_gbm(100.0, 0.05, 0.2, 1.0, 1_000, &mut rng);
/// assert_eq!(spots.len(), 1_000);
/// assert!(spots.iter().all(|s| *s > 0.0));
/// ```
pub fn simulate_gbm(
    s0: f64,
    r: f64,
    sigma: f64,
    t: f64,
    n_paths: usize,
    rng: &mut PricerRng,
) -> Vec<f64> {
    let drift = (r - 0.5 * sigma * sigma) * t;
    let diffusion = sigma * t.sqrt();

    let mut spots = vec![0.0; n_paths];
    rng.fill_normal(&mut spots);
    for z in spots.iter_mut() {
        *z = s0 * (drift + diffusion * *z).exp();
    }
    spots
}

/// Returns the nearest-rank `q`-quantile of `values`.
///
/// `values` is sorted in place. Returns `0.0` for an empty slice; `q` is
/// clamped to `[0, 1]`.
///
/// ```
/// use pricer_engine::simulator::quantile;
///
/// let mut values: Vec<f64> = (1..=100).map(f64::from).collect();
/// assert_eq!(quantile(&mut values, 0.95), 95.0);
/// ```
pub fn quantile(values: &mut [f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let q = q.clamp(0.0, 1.0);
    let rank = (q * values.len() as f64).ceil() as usize;
    values[rank.saturating_sub(1).min(values.len() - 1)]
}

//! Pipeline configuration.
//!
//! [`PipelineConfig`] is passed explicitly into the driver; nothing about a
//! run is read from process-wide state.

use std::time::Duration;

use crate::error::PipelineError;
use crate::parallel::{ParallelConfig, DEFAULT_BATCH_SIZE};

/// Default CVA rate applied to total PFE.
pub const DEFAULT_CVA_RATE: f64 = 0.02;

/// Upper bound on a single retry delay.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Bounded re-invocation of transient engine failures.
///
/// Only unreachable and timed-out calls are retried. The delay doubles after
/// every failed attempt, capped at [`MAX_RETRY_DELAY`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RetryPolicy {
    /// Total attempts per trade, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_ms: 0,
        }
    }
}

impl RetryPolicy {
    /// Creates a retry policy.
    pub fn new(max_attempts: u32, backoff_ms: u64) -> Self {
        Self {
            max_attempts,
            backoff_ms,
        }
    }

    /// Returns the delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(20);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor)).min(MAX_RETRY_DELAY)
    }
}

/// Configuration of one pipeline run.
///
/// # Examples
///
/// ```
/// use pricer_ccr::PipelineConfig;
///
/// let config = PipelineConfig::default().with_cva_rate(0.03).with_max_concurrency(4);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cva_rate, 0.03);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Rate applied to total PFE to derive the CVA charge.
    pub cva_rate: f64,
    /// Maximum number of concurrent engine calls.
    pub max_concurrency: usize,
    /// Trades handed to a worker at a time.
    pub batch_size: usize,
    /// Retry policy for transient engine failures.
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cva_rate: DEFAULT_CVA_RATE,
            max_concurrency: num_cpus::get(),
            batch_size: DEFAULT_BATCH_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Sets the CVA rate.
    pub fn with_cva_rate(mut self, cva_rate: f64) -> Self {
        self.cva_rate = cva_rate;
        self
    }

    /// Sets the concurrency bound.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Sets the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the execution settings for the pricing stage.
    pub fn parallel(&self) -> ParallelConfig {
        ParallelConfig::new(self.batch_size, self.max_concurrency)
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.cva_rate.is_finite() || self.cva_rate < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "cva_rate must be finite and non-negative, got {}",
                self.cva_rate
            )));
        }
        if self.max_concurrency == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(PipelineError::InvalidConfig(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

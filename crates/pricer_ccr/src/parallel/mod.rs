//! Rayon-based execution substrate for the pricing stage.
//!
//! Engine calls run on a dedicated thread pool sized to the configured
//! concurrency bound, so the global rayon pool and the pricing engine are
//! never oversubscribed by a run. Trades are handed out in batches.

mod cancel;

pub use cancel::CancellationToken;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Batch size for parallel processing.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Batch size for chunked processing
    pub batch_size: usize,
    /// Worker threads in the pricing pool
    pub max_concurrency: usize,
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, max_concurrency: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Builds the bounded worker pool for one run.
    pub fn build_pool(&self) -> Result<ThreadPool, ThreadPoolBuildError> {
        ThreadPoolBuilder::new()
            .num_threads(self.max_concurrency)
            .thread_name(|i| format!("ccr-pricer-{i}"))
            .build()
    }

    /// Maps every item on `pool`, `batch_size` items per task.
    ///
    /// Output order matches input order.
    pub fn map_in_batches<T, R, F>(&self, pool: &ThreadPool, items: &[T], mapper: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        pool.install(|| {
            items
                .par_chunks(self.batch_size)
                .flat_map_iter(|batch| batch.iter().map(&mapper))
                .collect()
        })
    }
}

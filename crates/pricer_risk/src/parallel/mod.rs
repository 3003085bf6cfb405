//! Rayon-based parallelisation utilities.
//!
//! This module provides helpers for evaluating scenario rows in parallel
//! using Rayon. Results always come back in input order, so output index `i`
//! corresponds to input row `i` whichever path is taken.

use rayon::prelude::*;

/// Batch size for parallel processing.
///
/// Minimum number of rows handed to one Rayon task.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Row count from which batch evaluation switches to Rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Batch size for chunked processing
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Sets the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the batch size (at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Configuration that never parallelises.
    pub fn sequential() -> Self {
        Self::default().with_parallel_threshold(usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Maps `mapper(index, item)` over `items`, in parallel once the slice
/// reaches the configured threshold.
///
/// # Arguments
///
/// * `config` - Threshold and batch size
/// * `items` - Slice of items to process
/// * `mapper` - Function of the item index and the item
///
/// # Returns
///
/// Vector of mapped results, in input order.
///
/// # Examples
///
/// ```
/// use pricer_risk::parallel::{map_indexed, ParallelConfig};
///
/// let items = vec![1.0, 2.0, 3.0];
/// let out = map_indexed(&ParallelConfig::default(), &items, |i, x| x * i as f64);
/// assert_eq!(out, vec![0.0, 2.0, 6.0]);
/// ```
pub fn map_indexed<T, R, F>(config: &ParallelConfig, items: &[T], mapper: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync + Send,
{
    if config.should_parallelize(items.len()) {
        items
            .par_iter()
            .with_min_len(config.batch_size.max(1))
            .enumerate()
            .map(|(i, item)| mapper(i, item))
            .collect()
    } else {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| mapper(i, item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_new_clamps_batch_size() {
        assert_eq!(ParallelConfig::new(0, 10).batch_size, 1);
        assert_eq!(ParallelConfig::default().with_batch_size(0).batch_size, 1);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default().with_parallel_threshold(100);
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(config.should_parallelize(1000));
        assert!(!ParallelConfig::sequential().should_parallelize(1_000_000));
    }

    #[test]
    fn test_map_indexed_sequential_and_parallel_agree() {
        let items: Vec<i64> = (0..1000).collect();
        let sequential = map_indexed(&ParallelConfig::sequential(), &items, |i, &x| i as i64 * x);
        let parallel = map_indexed(
            &ParallelConfig::new(8, 0),
            &items,
            |i, &x| i as i64 * x,
        );
        assert_eq!(sequential, parallel);
        assert_eq!(parallel[999], 999 * 999);
    }

    #[test]
    fn test_map_indexed_empty() {
        let items: Vec<f64> = Vec::new();
        let out: Vec<f64> = map_indexed(&ParallelConfig::new(1, 0), &items, |_, &x| x);
        assert!(out.is_empty());
    }
}

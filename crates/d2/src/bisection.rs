//! Recursive bisection driver.

use crate::cut::{find_balanced_cut, SearchBudget, SplitMethod};
use gridpart_core::solver::{PartitionConfig, Partitioner};
use gridpart_core::{Error, PartitionResult, Result, WeightedGrid};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Recursive inertial bisection partitioner.
///
/// Each level splits the current grid in the ratio `⌊n/2⌋ : n − ⌊n/2⌋` and recurses into
/// both sides, appending `'0'` or `'1'` to the subset id.
pub struct Bisector {
    config: PartitionConfig,
    cancelled: Arc<AtomicBool>,
}

impl Bisector {
    /// Creates a new bisector with the given configuration.
    pub fn new(config: PartitionConfig) -> Self {
        Self {
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a bisector with default configuration.
    pub fn default_config() -> Self {
        Self::new(PartitionConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Shared cancel flag, for cancelling from another thread.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn divide(
        &self,
        grid: WeightedGrid,
        n_subsets: usize,
        prefix: String,
        budget: &SearchBudget,
    ) -> Result<PartitionResult> {
        if n_subsets <= 1 || grid.len() <= 1 {
            return Ok(PartitionResult::leaf(prefix, grid));
        }

        if budget.is_cancelled() {
            log::warn!(
                "partition cancelled; '{}' kept as one subset of {} points",
                prefix,
                grid.len()
            );
            let mut result = PartitionResult::leaf(prefix, grid);
            result.cancelled = true;
            return Ok(result);
        }

        let n1 = n_subsets / 2;
        let n2 = n_subsets - n1;
        let bisection = find_balanced_cut(&grid, (n1, n2), budget, self.config.parallel)?;

        let mut result = PartitionResult::new();
        result.splits = 1;
        if bisection.method == SplitMethod::RegionGrowing {
            result.fallback_splits = 1;
        }
        if bisection.deadline_hit {
            result.deadline_hits = 1;
        }

        let first_prefix = format!("{}0", prefix);
        let second_prefix = format!("{}1", prefix);
        let (first, second) = (bisection.first, bisection.second);

        let branch = |side: WeightedGrid, n: usize, id: String| -> Result<PartitionResult> {
            if side.is_empty() {
                Ok(PartitionResult::new())
            } else {
                self.divide(side, n, id, budget)
            }
        };

        let (left, right) = if self.config.parallel {
            rayon::join(
                || branch(first, n1, first_prefix),
                || branch(second, n2, second_prefix),
            )
        } else {
            (
                branch(first, n1, first_prefix),
                branch(second, n2, second_prefix),
            )
        };

        result.merge(left?);
        result.merge(right?);
        Ok(result)
    }
}

impl Partitioner for Bisector {
    fn partition(&self, grid: &WeightedGrid, n_subsets: usize) -> Result<PartitionResult> {
        if n_subsets == 0 {
            return Err(Error::InvalidConfig(
                "number of subsets must be at least 1".to_string(),
            ));
        }
        grid.validate()?;

        // Reset cancellation flag
        self.cancelled.store(false, Ordering::Relaxed);

        let start = Instant::now();
        let deadline = (self.config.time_limit_ms > 0)
            .then(|| start + Duration::from_millis(self.config.time_limit_ms));
        let budget = SearchBudget::new(deadline, Arc::clone(&self.cancelled));

        let working = self.config.zero_weight_policy.apply(grid);
        let point_count = working.len();
        let mut result = self.divide(working, n_subsets, String::new(), &budget)?;
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::debug!(
            "partitioned {} points into {} subsets ({} splits, {} by region growing) in {} ms",
            point_count,
            result.len(),
            result.splits,
            result.fallback_splits,
            result.computation_time_ms
        );
        if result.deadline_hits > 0 {
            log::warn!(
                "time limit of {} ms hit during {} cut scans",
                self.config.time_limit_ms,
                result.deadline_hits
            );
        }
        Ok(result)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Partitions `grid` into at most `n_subsets` subsets with the default configuration.
///
/// Subset ids are binary domain paths; `n_subsets == 1` yields the single id `""`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for `n_subsets == 0` and [`Error::InvalidGrid`] for
/// negative or non-finite weights.
pub fn recursive_binary_subset_division(
    grid: &WeightedGrid,
    n_subsets: usize,
) -> Result<PartitionResult> {
    Bisector::default_config().partition(grid, n_subsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpart_core::ZeroWeightPolicy;

    #[test]
    fn test_single_subset() {
        let grid = WeightedGrid::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let result = recursive_binary_subset_division(&grid, 1).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get(""), Some(&grid));
        assert_eq!(result.splits, 0);
    }

    #[test]
    fn test_binary_ids() {
        let grid = WeightedGrid::from_rows(&[vec![1.0; 4]]);
        let result = recursive_binary_subset_division(&grid, 4).unwrap();
        assert_eq!(result.ids().collect::<Vec<_>>(), vec!["00", "01", "10", "11"]);
        assert_eq!(result.splits, 3);
        assert!(result.covers(&grid));
    }

    #[test]
    fn test_zero_subsets_rejected() {
        let grid = WeightedGrid::from_rows(&[vec![1.0]]);
        let err = recursive_binary_subset_division(&grid, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let grid = WeightedGrid::from_rows(&[vec![1.0, -2.0]]);
        let err = recursive_binary_subset_division(&grid, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidGrid(_)));
    }

    #[test]
    fn test_cancelled_budget_emits_leaves() {
        let bisector = Bisector::default_config();
        let grid = WeightedGrid::from_rows(&[vec![1.0; 3], vec![1.0; 3]]);
        let flag = Arc::new(AtomicBool::new(true));
        let budget = SearchBudget::new(None, flag);
        let result = bisector.divide(grid.clone(), 4, String::new(), &budget).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.len(), 1);
        assert!(result.covers(&grid));
    }

    #[test]
    fn test_non_zero_policy() {
        let grid = WeightedGrid::from_rows(&[vec![0.0, 1.0, 1.0], vec![0.0, 1.0, 1.0]]);
        let bisector = Bisector::new(
            PartitionConfig::new().with_zero_weight_policy(ZeroWeightPolicy::NonZeroOnly),
        );
        let result = bisector.partition(&grid, 2).unwrap();
        assert_eq!(result.total_points(), 4);
        assert!(result.covers(&grid.without_zero_weights()));
    }
}

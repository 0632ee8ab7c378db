//! Benchmark runner for synthetic partitioning cases.

use crate::error::BenchmarkError;
use crate::result::{BenchmarkResult, RunResult};
use crate::synthetic::{SyntheticGridGenerator, DEFAULT_FILL_RATIO};
use gridpart_core::{
    evaluate_partition_quality, PartitionConfig, PartitionResult, Partitioner, WeightedGrid,
    ZeroWeightPolicy,
};
use gridpart_d2::Bisector;
use serde::{Deserialize, Serialize};

/// A grid size and subset count to benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkCase {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Requested subset count
    pub n_subsets: usize,
}

impl BenchmarkCase {
    /// Creates a case.
    pub const fn new(rows: usize, cols: usize, n_subsets: usize) -> Self {
        Self {
            rows,
            cols,
            n_subsets,
        }
    }

    /// Short display name, `rows x cols / n`.
    pub fn name(&self) -> String {
        format!("{}x{}/{}", self.rows, self.cols, self.n_subsets)
    }
}

/// The standard case table.
pub fn default_cases() -> Vec<BenchmarkCase> {
    vec![
        BenchmarkCase::new(4, 3, 3),
        BenchmarkCase::new(5, 6, 4),
        BenchmarkCase::new(3, 4, 2),
        BenchmarkCase::new(10, 13, 5),
    ]
}

/// Configuration for benchmark runs.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Seed for grid generation.
    pub seed: u64,
    /// Probability that a generated cell is active.
    pub fill_ratio: f64,
    /// Partitioner configuration.
    pub partition: PartitionConfig,
    /// Attach domain maps to run results.
    pub record_maps: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fill_ratio: DEFAULT_FILL_RATIO,
            partition: PartitionConfig::default(),
            record_maps: false,
        }
    }
}

impl BenchmarkConfig {
    /// Creates a new benchmark configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generator seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the fill ratio of generated grids.
    pub fn with_fill_ratio(mut self, ratio: f64) -> Self {
        self.fill_ratio = ratio;
        self
    }

    /// Sets the partitioner configuration.
    pub fn with_partition_config(mut self, config: PartitionConfig) -> Self {
        self.partition = config;
        self
    }

    /// Attaches domain maps to run results.
    pub fn with_domain_maps(mut self, record: bool) -> Self {
        self.record_maps = record;
        self
    }
}

/// Benchmark runner.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    bisector: Bisector,
}

impl BenchmarkRunner {
    /// Creates a new benchmark runner.
    pub fn new(config: BenchmarkConfig) -> Self {
        let bisector = Bisector::new(config.partition.clone());
        Self { config, bisector }
    }

    /// The active configuration.
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Generates the grid for `case` from the configured seed.
    pub fn generate(&self, case: &BenchmarkCase) -> Result<WeightedGrid, BenchmarkError> {
        let grid = SyntheticGridGenerator::with_seed(self.config.seed)
            .with_fill_ratio(self.config.fill_ratio)
            .generate(case.rows, case.cols)?;
        Ok(grid)
    }

    /// Generates and partitions a single case.
    pub fn run_case(&self, case: &BenchmarkCase) -> Result<RunResult, BenchmarkError> {
        let grid = self.generate(case)?;
        self.run_grid(case, &grid)
    }

    /// Partitions a given grid as `case`.
    pub fn run_grid(
        &self,
        case: &BenchmarkCase,
        grid: &WeightedGrid,
    ) -> Result<RunResult, BenchmarkError> {
        self.partition_grid(case, grid).map(|(_, run)| run)
    }

    /// Partitions a given grid as `case`, returning the partition together with its record.
    pub fn partition_grid(
        &self,
        case: &BenchmarkCase,
        grid: &WeightedGrid,
    ) -> Result<(PartitionResult, RunResult), BenchmarkError> {
        log::info!(
            "running case {} ({} points, total weight {})",
            case.name(),
            grid.len(),
            grid.total_weight()
        );

        let result = self.bisector.partition(grid, case.n_subsets)?;
        let working = self.config.partition.zero_weight_policy.apply(grid);
        let covered = match result.verify_coverage(&working) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("case {}: {}", case.name(), e);
                false
            }
        };
        let quality = evaluate_partition_quality(&result, grid);

        let run = RunResult {
            case: case.name(),
            rows: case.rows,
            cols: case.cols,
            n_subsets: case.n_subsets,
            seed: self.config.seed,
            non_zero_only: self.config.partition.zero_weight_policy
                == ZeroWeightPolicy::NonZeroOnly,
            points: working.len(),
            subsets_produced: result.len(),
            fallback_splits: result.fallback_splits,
            covered,
            time_ms: result.computation_time_ms,
            quality,
            domain_map: None,
        };

        let run = if self.config.record_maps {
            run.with_domain_map(&result.domain_assignment(case.rows, case.cols))
        } else {
            run
        };
        Ok((result, run))
    }

    /// Runs every case, stopping at the first partition error.
    pub fn run_all(&self, cases: &[BenchmarkCase]) -> Result<BenchmarkResult, BenchmarkError> {
        let mut results = BenchmarkResult::new();
        results.metadata.config = format!("{:?}", self.config);
        for case in cases {
            let run = self.run_case(case)?;
            log::info!(
                "case {}: {} subsets, range {:.1}% of mean, {} ms",
                run.case,
                run.subsets_produced,
                run.quality.weight_percentage_range,
                run.time_ms
            );
            results.add_run(run);
        }
        Ok(results)
    }

    /// Runs every case and fails if any result does not cover its grid.
    pub fn run_all_checked(
        &self,
        cases: &[BenchmarkCase],
    ) -> Result<BenchmarkResult, BenchmarkError> {
        let results = self.run_all(cases)?;
        if let Some(run) = results.runs.iter().find(|r| !r.covered) {
            return Err(BenchmarkError::Coverage {
                case: run.case.clone(),
                reason: "subsets do not cover the grid exactly once".to_string(),
            });
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_cases_covered() {
        let runner = BenchmarkRunner::new(BenchmarkConfig::new().with_seed(42));
        let results = runner.run_all_checked(&default_cases()).unwrap();
        assert_eq!(results.runs.len(), 4);
        for run in &results.runs {
            assert!(run.covered);
            assert!(run.subsets_produced <= run.n_subsets);
            assert_eq!(run.points, run.rows * run.cols);
            assert_relative_eq!(
                run.quality.subset_weights.iter().sum::<f64>(),
                run.quality.total_weight
            );
        }
    }

    #[test]
    fn test_non_zero_policy_points() {
        let config = BenchmarkConfig::new().with_seed(3).with_partition_config(
            PartitionConfig::new().with_zero_weight_policy(ZeroWeightPolicy::NonZeroOnly),
        );
        let runner = BenchmarkRunner::new(config);
        let case = BenchmarkCase::new(5, 6, 4);
        let grid = runner.generate(&case).unwrap();
        let run = runner.run_grid(&case, &grid).unwrap();
        assert!(run.non_zero_only);
        assert!(run.covered);
        assert_eq!(run.points, grid.without_zero_weights().len());
    }

    #[test]
    fn test_domain_map_recorded() {
        let runner = BenchmarkRunner::new(BenchmarkConfig::new().with_domain_maps(true));
        let run = runner.run_case(&BenchmarkCase::new(3, 4, 2)).unwrap();
        let map = run.domain_map.unwrap();
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_partition_grid_matches_record() {
        let runner = BenchmarkRunner::new(BenchmarkConfig::new().with_seed(11));
        let case = BenchmarkCase::new(5, 6, 4);
        let grid = runner.generate(&case).unwrap();
        let (result, run) = runner.partition_grid(&case, &grid).unwrap();
        assert_eq!(run.subsets_produced, result.len());
        assert_eq!(run.fallback_splits, result.fallback_splits);
        assert_eq!(run.time_ms, result.computation_time_ms);
        assert_eq!(run.quality, evaluate_partition_quality(&result, &grid));
    }

    #[test]
    fn test_invalid_fill_ratio() {
        let runner = BenchmarkRunner::new(BenchmarkConfig::new().with_fill_ratio(2.0));
        let err = runner.run_case(&BenchmarkCase::new(2, 2, 2)).unwrap_err();
        assert!(matches!(err, BenchmarkError::Partition(_)));
    }
}

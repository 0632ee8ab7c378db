//! Benchmark result types and recording.

use gridpart_core::{DomainMap, PartitionQuality};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::BenchmarkError;

/// Result of a single benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Case name, e.g. `"5x6/4"`
    pub case: String,
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Requested subset count
    pub n_subsets: usize,
    /// Seed used to generate the grid
    pub seed: u64,
    /// Whether zero-weight cells were excluded
    pub non_zero_only: bool,
    /// Points that took part in the partition
    pub points: usize,
    /// Subsets produced
    pub subsets_produced: usize,
    /// Bisections resolved by region growing
    pub fallback_splits: usize,
    /// Whether the subsets cover the partitioned grid exactly once
    pub covered: bool,
    /// Computation time in milliseconds
    pub time_ms: u64,
    /// Weight balance statistics
    pub quality: PartitionQuality,
    /// Domain map, one string per row (optional, for visualization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_map: Option<Vec<String>>,
}

impl RunResult {
    /// Attaches the rendered domain map.
    pub fn with_domain_map(mut self, map: &DomainMap) -> Self {
        self.domain_map = Some(map.to_string().lines().map(str::to_string).collect());
        self
    }
}

/// Collection of benchmark results.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Individual run results
    pub runs: Vec<RunResult>,
    /// Additional metadata
    pub metadata: BenchmarkMetadata,
}

/// Metadata about the benchmark run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BenchmarkMetadata {
    /// gridpart version
    pub version: String,
    /// Configuration used
    pub config: String,
}

impl BenchmarkResult {
    /// Creates a new benchmark result.
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            metadata: BenchmarkMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                config: String::new(),
            },
        }
    }

    /// Adds a run result.
    pub fn add_run(&mut self, result: RunResult) {
        self.runs.push(result);
    }

    /// Returns true if every run covered its grid.
    pub fn all_covered(&self) -> bool {
        self.runs.iter().all(|r| r.covered)
    }

    /// Saves results to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), BenchmarkError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Saves results to a CSV file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<(), BenchmarkError> {
        let mut file = File::create(path)?;

        writeln!(
            file,
            "case,rows,cols,n_subsets,seed,points,subsets,fallback_splits,covered,total_weight,mean_weight,variance,range_percent,time_ms"
        )?;

        for run in &self.runs {
            writeln!(
                file,
                "{},{},{},{},{},{},{},{},{},{:.2},{:.4},{:.4},{:.2},{}",
                run.case,
                run.rows,
                run.cols,
                run.n_subsets,
                run.seed,
                run.points,
                run.subsets_produced,
                run.fallback_splits,
                run.covered,
                run.quality.total_weight,
                run.quality.mean_weight,
                run.quality.weight_variance,
                run.quality.weight_percentage_range,
                run.time_ms,
            )?;
        }

        Ok(())
    }

    /// Prints a summary table to stdout.
    pub fn print_summary(&self) {
        println!("\n{:=<96}", "");
        println!("BENCHMARK RESULTS");
        println!("{:=<96}", "");
        println!(
            "{:<12} {:>8} {:>9} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8}",
            "Case", "Points", "Subsets", "Mean", "Min", "Max", "Range%", "Time(ms)", "Covered"
        );
        println!("{:-<96}", "");

        for run in &self.runs {
            println!(
                "{:<12} {:>8} {:>9} {:>10.2} {:>10.2} {:>10.2} {:>10.1} {:>10} {:>8}",
                run.case,
                run.points,
                format!("{}/{}", run.subsets_produced, run.n_subsets),
                run.quality.mean_weight,
                run.quality.min_weight,
                run.quality.max_weight,
                run.quality.weight_percentage_range,
                run.time_ms,
                if run.covered { "yes" } else { "NO" },
            );
        }

        println!("{:=<96}", "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_run() -> RunResult {
        RunResult {
            case: "4x3/3".to_string(),
            rows: 4,
            cols: 3,
            n_subsets: 3,
            seed: 42,
            non_zero_only: false,
            points: 12,
            subsets_produced: 3,
            fallback_splits: 0,
            covered: true,
            time_ms: 1,
            quality: PartitionQuality::default(),
            domain_map: None,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let mut results = BenchmarkResult::new();
        results.add_run(sample_run());
        let json = serde_json::to_string(&results).unwrap();
        assert!(!json.contains("domain_map"));

        let parsed: BenchmarkResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.runs.len(), 1);
        assert_eq!(parsed.runs[0].case, "4x3/3");
        assert!(parsed.all_covered());
    }

    #[test]
    fn test_save_files() {
        let mut results = BenchmarkResult::new();
        results.add_run(sample_run());

        let dir = std::env::temp_dir();
        let json_path = dir.join(format!("gridpart_results_{}.json", std::process::id()));
        let csv_path = dir.join(format!("gridpart_results_{}.csv", std::process::id()));
        results.save_json(&json_path).unwrap();
        results.save_csv(&csv_path).unwrap();

        let csv = fs::read_to_string(&csv_path).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().starts_with("4x3/3,4,3,3,42"));

        let _ = fs::remove_file(json_path);
        let _ = fs::remove_file(csv_path);
    }
}

//! gridpart Benchmark Runner CLI

use clap::{Parser, Subcommand, ValueEnum};
use gridpart_benchmark::{
    default_cases, BenchmarkCase, BenchmarkConfig, BenchmarkResult, BenchmarkRunner,
    ProjectionAxis, SyntheticGridGenerator,
};
use gridpart_core::{
    evaluate_partition_quality, PartitionConfig, PartitionQuality, PartitionResult, Partitioner,
    WeightedGrid, ZeroWeightPolicy,
};
use gridpart_d2::Bisector;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridpart-bench")]
#[command(about = "Recursive inertial bisection benchmark runner for gridpart")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct PartitionArgs {
    /// Exclude zero-weight cells from the partition
    #[arg(long)]
    exclude_zero: bool,

    /// Time limit per partition in milliseconds (0 = unlimited)
    #[arg(short, long, default_value = "0")]
    time_limit: u64,

    /// Evaluate branches in parallel
    #[arg(long)]
    parallel: bool,
}

impl PartitionArgs {
    fn config(&self) -> PartitionConfig {
        let policy = if self.exclude_zero {
            ZeroWeightPolicy::NonZeroOnly
        } else {
            ZeroWeightPolicy::IncludeAll
        };
        PartitionConfig::new()
            .with_zero_weight_policy(policy)
            .with_time_limit(self.time_limit)
            .with_parallel(self.parallel)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Partition a single synthetic grid and print the result
    Run {
        /// Grid rows
        #[arg(short, long, default_value = "4")]
        rows: usize,

        /// Grid columns
        #[arg(short, long, default_value = "3")]
        cols: usize,

        /// Number of subsets
        #[arg(short = 'n', long, default_value = "3")]
        subsets: usize,

        /// Random seed for reproducibility
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Probability that a cell is active
        #[arg(long, default_value = "0.6")]
        fill_ratio: f64,

        #[command(flatten)]
        partition: PartitionArgs,

        /// Output file for the run result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the standard case table
    Cases {
        /// Random seed for reproducibility
        #[arg(short, long, default_value = "42")]
        seed: u64,

        #[command(flatten)]
        partition: PartitionArgs,

        /// Output file for results (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for CSV results
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Project a random 3D activity volume and partition the projection
    Volume {
        /// Cells along X
        #[arg(long, default_value = "8")]
        nx: usize,

        /// Cells along Y
        #[arg(long, default_value = "8")]
        ny: usize,

        /// Cells along Z
        #[arg(long, default_value = "3")]
        nz: usize,

        /// Axis to sum along
        #[arg(short, long, value_enum, default_value = "z")]
        axis: AxisArg,

        /// Number of subsets
        #[arg(short = 'n', long, default_value = "4")]
        subsets: usize,

        /// Random seed for reproducibility
        #[arg(short, long, default_value = "42")]
        seed: u64,

        #[command(flatten)]
        partition: PartitionArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AxisArg {
    X,
    Y,
    Z,
}

impl From<AxisArg> for ProjectionAxis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::X => ProjectionAxis::X,
            AxisArg::Y => ProjectionAxis::Y,
            AxisArg::Z => ProjectionAxis::Z,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            rows,
            cols,
            subsets,
            seed,
            fill_ratio,
            partition,
            output,
        } => {
            let config = BenchmarkConfig::new()
                .with_seed(seed)
                .with_fill_ratio(fill_ratio)
                .with_partition_config(partition.config())
                .with_domain_maps(true);
            let runner = BenchmarkRunner::new(config);
            let case = BenchmarkCase::new(rows, cols, subsets);
            let grid = runner.generate(&case)?;

            println!("Weight grid ({}x{}, seed {}):", rows, cols, seed);
            print_weights(&grid, rows, cols);

            let (result, run) = runner.partition_grid(&case, &grid)?;
            print_partition(&result, &run.quality);

            println!("\nDomain map:");
            print!("{}", result.domain_assignment(rows, cols));

            if let Some(path) = output {
                let mut results = BenchmarkResult::new();
                results.add_run(run);
                results.save_json(&path)?;
                println!("\nResult saved to: {}", path.display());
            }
        }

        Commands::Cases {
            seed,
            partition,
            output,
            csv,
        } => {
            let config = BenchmarkConfig::new()
                .with_seed(seed)
                .with_partition_config(partition.config());
            let runner = BenchmarkRunner::new(config);
            let results = runner.run_all(&default_cases())?;

            results.print_summary();

            if let Some(path) = output {
                results.save_json(&path)?;
                println!("Results saved to: {}", path.display());
            }

            if let Some(path) = csv {
                results.save_csv(&path)?;
                println!("CSV saved to: {}", path.display());
            }

            if !results.all_covered() {
                anyhow::bail!("at least one case did not cover its grid");
            }
        }

        Commands::Volume {
            nx,
            ny,
            nz,
            axis,
            subsets,
            seed,
            partition,
        } => {
            let volume = SyntheticGridGenerator::with_seed(seed).generate_volume(nx, ny, nz)?;
            let axis = ProjectionAxis::from(axis);
            let grid = volume.project(axis);
            let (rows, cols) = match axis {
                ProjectionAxis::X => (ny, nz),
                ProjectionAxis::Y => (nx, nz),
                ProjectionAxis::Z => (nx, ny),
            };

            println!(
                "Projected {}x{}x{} volume along {:?} ({}x{}):",
                nx, ny, nz, axis, rows, cols
            );
            print_weights(&grid, rows, cols);

            let bisector = Bisector::new(partition.config());
            let result = bisector.partition(&grid, subsets)?;
            let quality = evaluate_partition_quality(&result, &grid);
            print_partition(&result, &quality);

            println!("\nDomain map:");
            print!("{}", result.domain_assignment(rows, cols));
        }
    }

    Ok(())
}

fn print_weights(grid: &WeightedGrid, rows: usize, cols: usize) {
    for i in 0..rows as i64 {
        let row: Vec<String> = (0..cols as i64)
            .map(|j| {
                let w = grid.get(&(i, j).into()).unwrap_or(0.0);
                format!("{:>4}", w)
            })
            .collect();
        println!("{}", row.join(""));
    }
}

fn print_partition(result: &PartitionResult, quality: &PartitionQuality) {
    println!("\nSubsets:");
    for (id, subset) in result.iter() {
        let coords: Vec<String> = subset.coords().map(|c| c.to_string()).collect();
        println!(
            "  {:<6} weight {:>8.2}  points {:>4}  {}",
            format!("'{}'", id),
            subset.total_weight(),
            subset.len(),
            coords.join(" ")
        );
    }

    println!("\nStatistics:");
    println!("  Total weight:       {:.2}", quality.total_weight);
    println!("  Mean weight:        {:.2}", quality.mean_weight);
    println!("  Max weight:         {:.2}", quality.max_weight);
    println!("  Min weight:         {:.2}", quality.min_weight);
    println!("  Weight variance:    {:.2}", quality.weight_variance);
    println!(
        "  Weight range:       {:.2} ({:.1}% of mean)",
        quality.weight_range, quality.weight_percentage_range
    );
    println!(
        "  Splits:             {} ({} by region growing)",
        result.splits, result.fallback_splits
    );
    if !quality.all_connected() {
        println!(
            "  Disconnected:       {}",
            quality.disconnected_subsets.join(", ")
        );
    }
    println!("  Time:               {} ms", result.computation_time_ms);
}

//! Benchmark Suite for gridpart
//!
//! This crate provides:
//! - Synthetic weighted grid generation
//! - Projection of 3D activity volumes onto weighted grids
//! - Benchmark runner over a table of grid sizes and subset counts
//! - Result recording (JSON, CSV) and summary tables

mod error;
mod mesh;
mod result;
mod runner;
mod synthetic;

pub use error::BenchmarkError;
pub use mesh::{ActivityVolume, ProjectionAxis};
pub use result::{BenchmarkMetadata, BenchmarkResult, RunResult};
pub use runner::{default_cases, BenchmarkCase, BenchmarkConfig, BenchmarkRunner};
pub use synthetic::{SyntheticGridGenerator, DEFAULT_FILL_RATIO, DEFAULT_MAX_WEIGHT};

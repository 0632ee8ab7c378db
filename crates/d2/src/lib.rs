//! # gridpart 2D
//!
//! Recursive inertial bisection of weighted 2D grids.
//!
//! This crate splits a [`WeightedGrid`] into a requested number of weight-balanced,
//! 4-connected sub-domains. Each bisection orders the points along a principal axis of
//! the grid's inertia tensor and picks the best connected contiguous cut, falling back to
//! region growing when no such cut exists.
//!
//! ## Features
//!
//! - Principal-axis ordering with the lower-dispersion axis
//! - Exhaustive balanced cut search with 4-connectivity validation
//! - Region-growing fallback for fragmented grids
//! - Binary domain ids (`"0"`, `"10"`, ...) for arbitrary subset counts
//! - Optional rayon parallelism, time limit and cancellation
//!
//! ## Quick Start
//!
//! ```rust
//! use gridpart_d2::{Bisector, PartitionConfig, Partitioner, WeightedGrid};
//!
//! let grid = WeightedGrid::from_rows(&[
//!     vec![5.0, 2.0, 0.0],
//!     vec![0.0, 3.0, 4.0],
//!     vec![1.0, 0.0, 2.0],
//! ]);
//!
//! let bisector = Bisector::new(PartitionConfig::new().with_parallel(true));
//! let result = bisector.partition(&grid, 3).unwrap();
//!
//! assert!(result.covers(&grid));
//! for (id, subset) in result.iter() {
//!     println!("{}: {} points, weight {}", id, subset.len(), subset.total_weight());
//! }
//! ```
//!
//! ## Quality
//!
//! ```rust
//! use gridpart_d2::{evaluate_partition_quality, recursive_binary_subset_division, WeightedGrid};
//!
//! let grid = WeightedGrid::from_rows(&[vec![1.0; 4], vec![1.0; 4]]);
//! let result = recursive_binary_subset_division(&grid, 2).unwrap();
//! let quality = evaluate_partition_quality(&result, &grid);
//! assert_eq!(quality.weight_range, 0.0);
//! ```

pub mod bisection;
pub mod cut;
pub mod region;

// Re-exports
pub use bisection::{recursive_binary_subset_division, Bisector};
pub use cut::{find_balanced_cut, Bisection, SearchBudget, SplitMethod};
pub use region::{grow_regions, RegionSplit};
pub use gridpart_core::{
    evaluate_partition_quality, Coord, DomainMap, Error, PartitionConfig, PartitionQuality,
    PartitionResult, Partitioner, Result, Subset, WeightedGrid, WeightedPoint, ZeroWeightPolicy,
};

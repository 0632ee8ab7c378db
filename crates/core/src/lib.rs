//! # gridpart Core
//!
//! Core types and numerics for recursive inertial bisection of weighted 2D grids.
//!
//! This crate provides the data model and the geometric building blocks shared by the
//! partitioning engine (`gridpart-d2`) and the benchmark harness.
//!
//! ## Core Components
//!
//! - **Data model**: [`Coord`], [`WeightedPoint`], [`WeightedGrid`], [`Subset`]
//! - **Inertia**: [`compute_inertia`], [`compute_grid_inertia`], [`InertiaTensor`], [`CenterOfMass`]
//! - **Principal axes**: [`PrincipalAxes`] - symmetric 2×2 eigen-decomposition
//! - **Projection**: [`AxisProjection`], [`project_onto_axis`], [`max_dispersion`]
//! - **Connectivity**: [`is_connected`], [`is_connected_from`] - 4-neighbour traversal
//! - **Partitioner trait**: [`Partitioner`] - common interface for grid partitioners
//! - **Results**: [`PartitionResult`], [`DomainMap`], [`PartitionQuality`]
//!
//! ## Pipeline
//!
//! | Step | Module | Output |
//! |------|--------|--------|
//! | Center of mass and tensor | [`inertia`] | `(InertiaTensor, CenterOfMass)` |
//! | Eigen-decomposition | [`principal`] | two unit axes, moments |
//! | Projection | [`projection`] | points ordered along an axis |
//! | Cut search, region growing | `gridpart-d2` | two subsets |
//! | Evaluation | [`quality`] | [`PartitionQuality`] |
//!
//! ## Configuration
//!
//! ```rust
//! use gridpart_core::{PartitionConfig, ZeroWeightPolicy};
//!
//! let config = PartitionConfig::new()
//!     .with_zero_weight_policy(ZeroWeightPolicy::NonZeroOnly)
//!     .with_time_limit(500)
//!     .with_parallel(true);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod connectivity;
pub mod error;
pub mod grid;
pub mod inertia;
pub mod principal;
pub mod projection;
pub mod quality;
pub mod result;
pub mod solver;

// Re-exports
pub use connectivity::{is_connected, is_connected_from};
pub use error::{Error, Result};
pub use grid::{Coord, Subset, WeightedGrid, WeightedPoint};
pub use inertia::{compute_grid_inertia, compute_inertia, CenterOfMass, InertiaTensor};
pub use principal::{PrincipalAxes, SYMMETRY_TOLERANCE};
pub use projection::{max_dispersion, project_onto_axis, AxisProjection, ProjectedPoint};
pub use quality::{evaluate_partition_quality, PartitionQuality};
pub use result::{DomainMap, PartitionResult};
pub use solver::{PartitionConfig, Partitioner, ZeroWeightPolicy};

//! Partitioner trait and configuration.

use crate::grid::WeightedGrid;
use crate::result::PartitionResult;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which grid entries take part in a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ZeroWeightPolicy {
    /// Every coordinate of the input is assigned to a subset.
    #[default]
    IncludeAll,
    /// Zero-weight entries are dropped before partitioning and never appear in the result.
    NonZeroOnly,
}

impl ZeroWeightPolicy {
    /// The grid that actually gets partitioned under this policy.
    pub fn apply(self, grid: &WeightedGrid) -> WeightedGrid {
        match self {
            Self::IncludeAll => grid.clone(),
            Self::NonZeroOnly => grid.without_zero_weights(),
        }
    }
}

/// Common configuration for partitioners.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartitionConfig {
    /// Zero-weight inclusion policy.
    pub zero_weight_policy: ZeroWeightPolicy,

    /// Deadline for the whole run in milliseconds (0 = unlimited).
    ///
    /// Once exceeded, ordered cut scans stop early and fall back to region growing
    /// when they have not found a connected cut yet.
    pub time_limit_ms: u64,

    /// Evaluate independent branches and axes on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            zero_weight_policy: ZeroWeightPolicy::default(),
            time_limit_ms: 0,
            parallel: false,
        }
    }
}

impl PartitionConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zero-weight inclusion policy.
    pub fn with_zero_weight_policy(mut self, policy: ZeroWeightPolicy) -> Self {
        self.zero_weight_policy = policy;
        self
    }

    /// Sets the time limit in milliseconds (0 = unlimited).
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Trait for grid partitioners.
pub trait Partitioner {
    /// Splits `grid` into at most `n_subsets` subsets.
    fn partition(&self, grid: &WeightedGrid, n_subsets: usize) -> Result<PartitionResult>;

    /// Cancels an ongoing partition. Already produced subsets stay valid.
    fn cancel(&self);
}

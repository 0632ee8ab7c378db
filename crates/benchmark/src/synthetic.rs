//! Synthetic weighted grid generator.
//!
//! Produces dense `rows × cols` grids where each cell is active with a fixed probability
//! and active cells carry a uniform integer weight in `1..=max_weight`. Inactive cells are
//! kept with weight 0 so that zero-weight handling is exercised.

use gridpart_core::{Coord, Error, Result, WeightedGrid};
use rand::prelude::*;

use crate::mesh::ActivityVolume;

/// Default probability that a cell is active.
pub const DEFAULT_FILL_RATIO: f64 = 0.6;

/// Default upper bound for active cell weights.
pub const DEFAULT_MAX_WEIGHT: u32 = 8;

/// Generator for synthetic weighted grids.
#[derive(Debug, Clone)]
pub struct SyntheticGridGenerator {
    rng: StdRng,
    fill_ratio: f64,
    max_weight: u32,
}

impl Default for SyntheticGridGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticGridGenerator {
    /// Creates a new generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            fill_ratio: DEFAULT_FILL_RATIO,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }

    /// Creates a new generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            fill_ratio: DEFAULT_FILL_RATIO,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }

    /// Sets the probability that a cell is active.
    pub fn with_fill_ratio(mut self, ratio: f64) -> Self {
        self.fill_ratio = ratio;
        self
    }

    /// Sets the largest weight an active cell can get.
    pub fn with_max_weight(mut self, max_weight: u32) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Generates a `rows × cols` grid keyed `(i, j)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the fill ratio is outside `[0, 1]` or the
    /// maximum weight is 0.
    pub fn generate(&mut self, rows: usize, cols: usize) -> Result<WeightedGrid> {
        self.check_fill_ratio()?;
        if self.max_weight == 0 {
            return Err(Error::InvalidConfig(
                "maximum weight must be at least 1".to_string(),
            ));
        }

        let mut grid = WeightedGrid::new();
        for i in 0..rows as i64 {
            for j in 0..cols as i64 {
                let weight = if self.rng.gen_bool(self.fill_ratio) {
                    self.rng.gen_range(1..=self.max_weight) as f64
                } else {
                    0.0
                };
                grid.insert(Coord::new(i, j), weight);
            }
        }
        Ok(grid)
    }

    /// Generates an `nx × ny × nz` volume of active (1) and inactive (0) cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the fill ratio is outside `[0, 1]`.
    pub fn generate_volume(&mut self, nx: usize, ny: usize, nz: usize) -> Result<ActivityVolume> {
        self.check_fill_ratio()?;
        let mut volume = ActivityVolume::new(nx, ny, nz);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    if self.rng.gen_bool(self.fill_ratio) {
                        volume.set(i, j, k, 1.0)?;
                    }
                }
            }
        }
        Ok(volume)
    }

    fn check_fill_ratio(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.fill_ratio) {
            Ok(())
        } else {
            Err(Error::InvalidConfig(format!(
                "fill ratio must be within [0, 1], got {}",
                self.fill_ratio
            )))
        }
    }
}

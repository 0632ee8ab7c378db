//! Projection of a 3D activity volume onto a 2D weighted grid.

use gridpart_core::{Coord, Error, Result, WeightedGrid};
use serde::{Deserialize, Serialize};

/// Axis a volume is summed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionAxis {
    /// Sum over `i`; the grid is keyed `(j, k)`.
    X,
    /// Sum over `j`; the grid is keyed `(i, k)`.
    Y,
    /// Sum over `k`; the grid is keyed `(i, j)`.
    #[default]
    Z,
}

/// Per-cell activity of a logically rectangular `nx × ny × nz` mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityVolume {
    nx: usize,
    ny: usize,
    nz: usize,
    values: Vec<f64>,
}

impl ActivityVolume {
    /// Creates an all-inactive volume.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            values: vec![0.0; nx * ny * nz],
        }
    }

    /// Dimensions `(nx, ny, nz)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    fn index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        (i < self.nx && j < self.ny && k < self.nz).then(|| (i * self.ny + j) * self.nz + k)
    }

    /// Value of cell `(i, j, k)`, or `None` outside the volume.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<f64> {
        self.index(i, j, k).map(|idx| self.values[idx])
    }

    /// Sets cell `(i, j, k)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`] for an out-of-range cell or a negative or
    /// non-finite value.
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidGrid(format!(
                "cell ({}, {}, {}) value must be finite and non-negative, got {}",
                i, j, k, value
            )));
        }
        let idx = self.index(i, j, k).ok_or_else(|| {
            Error::InvalidGrid(format!(
                "cell ({}, {}, {}) outside {}x{}x{} volume",
                i, j, k, self.nx, self.ny, self.nz
            ))
        })?;
        self.values[idx] = value;
        Ok(())
    }

    /// Sums the volume along `axis` into a dense weighted grid.
    ///
    /// Every coordinate of the projected plane is present, including those whose column
    /// sums to zero.
    pub fn project(&self, axis: ProjectionAxis) -> WeightedGrid {
        let (rows, cols, depth) = match axis {
            ProjectionAxis::X => (self.ny, self.nz, self.nx),
            ProjectionAxis::Y => (self.nx, self.nz, self.ny),
            ProjectionAxis::Z => (self.nx, self.ny, self.nz),
        };

        let mut grid = WeightedGrid::new();
        for a in 0..rows {
            for b in 0..cols {
                let sum: f64 = (0..depth)
                    .filter_map(|d| match axis {
                        ProjectionAxis::X => self.get(d, a, b),
                        ProjectionAxis::Y => self.get(a, d, b),
                        ProjectionAxis::Z => self.get(a, b, d),
                    })
                    .sum();
                grid.insert(Coord::new(a as i64, b as i64), sum);
            }
        }
        grid
    }
}

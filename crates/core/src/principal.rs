//! Principal axis solver.
//!
//! Eigen-decomposes a symmetric 2×2 tensor into principal moments (eigenvalues) and
//! principal axes (orthonormal eigenvectors). The decomposition satisfies
//! `A · diag(moments) · Aᵀ ≈ M` where the columns of `A` are the axes.
//!
//! Axes are returned in descending moment order and each axis is oriented so that its
//! first non-negligible component is positive, which makes downstream orderings
//! reproducible across platforms.

use nalgebra::{Matrix2, SymmetricEigen, Vector2};

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute symmetry tolerance, scaled by the largest matrix entry when that exceeds 1.
pub const SYMMETRY_TOLERANCE: f64 = 1e-8;

/// Components smaller than this are treated as zero when orienting an axis.
const ORIENTATION_EPSILON: f64 = 1e-12;

/// Principal moments and axes of a symmetric 2×2 tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrincipalAxes {
    moments: [f64; 2],
    axes: [Vector2<f64>; 2],
}

impl PrincipalAxes {
    /// Decomposes `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AsymmetricTensor`] if the off-diagonal entries differ by more than
    /// [`SYMMETRY_TOLERANCE`] (relative to the largest entry when it exceeds 1).
    pub fn from_matrix(matrix: &Matrix2<f64>) -> Result<Self> {
        let upper = matrix[(0, 1)];
        let lower = matrix[(1, 0)];
        let tolerance = SYMMETRY_TOLERANCE * matrix.amax().max(1.0);
        if (upper - lower).abs() > tolerance {
            return Err(Error::AsymmetricTensor {
                upper,
                lower,
                tolerance,
            });
        }

        // Average out round-off so the symmetric solver sees an exactly symmetric input
        let symmetric = (matrix + matrix.transpose()) * 0.5;
        let eigen = SymmetricEigen::new(symmetric);

        let mut pairs: Vec<(f64, Vector2<f64>)> = (0..2)
            .map(|i| {
                let column: Vector2<f64> = eigen.eigenvectors.column(i).into_owned();
                (eigen.eigenvalues[i], orient(normalize(column)))
            })
            .collect();
        pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

        if (pairs[0].0 - pairs[1].0).abs() <= tolerance {
            log::debug!(
                "degenerate principal moments {:.6} and {:.6}; axes are not unique",
                pairs[0].0,
                pairs[1].0
            );
        }

        Ok(Self {
            moments: [pairs[0].0, pairs[1].0],
            axes: [pairs[0].1, pairs[1].1],
        })
    }

    /// Principal moments, largest first.
    #[inline]
    pub fn moments(&self) -> [f64; 2] {
        self.moments
    }

    /// Unit principal axes, in the same order as [`moments`](Self::moments).
    #[inline]
    pub fn axes(&self) -> [Vector2<f64>; 2] {
        self.axes
    }

    /// Axis `i` (0 or 1).
    ///
    /// # Panics
    /// Panics if `i > 1`.
    #[inline]
    pub fn axis(&self, i: usize) -> Vector2<f64> {
        self.axes[i]
    }

    /// Matrix whose columns are the axes.
    pub fn axes_matrix(&self) -> Matrix2<f64> {
        Matrix2::from_columns(&self.axes)
    }

    /// Rebuilds `A · diag(moments) · Aᵀ`.
    pub fn reconstruct(&self) -> Matrix2<f64> {
        let a = self.axes_matrix();
        a * Matrix2::from_diagonal(&Vector2::new(self.moments[0], self.moments[1])) * a.transpose()
    }
}

fn normalize(v: Vector2<f64>) -> Vector2<f64> {
    let norm = v.norm();
    if norm > 0.0 {
        v / norm
    } else {
        v
    }
}

fn orient(v: Vector2<f64>) -> Vector2<f64> {
    let leading = if v.x.abs() > ORIENTATION_EPSILON {
        v.x
    } else {
        v.y
    };
    if leading < 0.0 {
        -v
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::prelude::*;

    fn assert_orthonormal(axes: &PrincipalAxes) {
        let [a, b] = axes.axes();
        assert!((a.norm() - 1.0).abs() < 1e-8);
        assert!((b.norm() - 1.0).abs() < 1e-8);
        assert!(a.dot(&b).abs() < 1e-8);
    }

    #[test]
    fn test_asymmetric_matrix_rejected() {
        let m = Matrix2::new(3.0, 1.0, 2.0, 4.0);
        let err = PrincipalAxes::from_matrix(&m).unwrap_err();
        assert!(matches!(
            err,
            Error::AsymmetricTensor {
                upper,
                lower,
                ..
            } if upper == 1.0 && lower == 2.0
        ));
    }

    #[test]
    fn test_diagonal_matrix() {
        let axes = PrincipalAxes::from_matrix(&Matrix2::new(2.0, 0.0, 0.0, 5.0)).unwrap();
        let moments = axes.moments();
        assert_relative_eq!(moments[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(moments[1], 2.0, epsilon = 1e-12);

        // moment 5 belongs to the y direction, moment 2 to x
        assert_relative_eq!(axes.axis(0).y.abs(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(axes.axis(0).x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(axes.axis(1).x.abs(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(axes.axis(1).y, 0.0, epsilon = 1e-12);
        assert_orthonormal(&axes);
    }

    #[test]
    fn test_reconstruction_known_matrix() {
        let m = Matrix2::new(3.0, 1.0, 1.0, 2.0);
        let axes = PrincipalAxes::from_matrix(&m).unwrap();
        assert!((axes.reconstruct() - m).amax() < 1e-8);
        assert_orthonormal(&axes);
        assert!(axes.moments()[0] >= axes.moments()[1]);
    }

    #[test]
    fn test_reconstruction_random_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let a = rng.gen_range(-50.0..50.0);
            let b = rng.gen_range(-50.0..50.0);
            let d = rng.gen_range(-50.0..50.0);
            let m = Matrix2::new(a, b, b, d);
            let axes = PrincipalAxes::from_matrix(&m).unwrap();
            assert!(
                (axes.reconstruct() - m).amax() < 1e-8,
                "reconstruction failed for {:?}",
                m
            );
            assert_orthonormal(&axes);
        }
    }

    #[test]
    fn test_zero_matrix() {
        let axes = PrincipalAxes::from_matrix(&Matrix2::zeros()).unwrap();
        assert_eq!(axes.moments(), [0.0, 0.0]);
        assert_orthonormal(&axes);
    }

    #[test]
    fn test_axes_are_oriented() {
        let axes = PrincipalAxes::from_matrix(&Matrix2::new(12.0, -6.0, -6.0, 9.0)).unwrap();
        for axis in axes.axes() {
            assert!(axis.x > 0.0 || (axis.x.abs() <= ORIENTATION_EPSILON && axis.y > 0.0));
        }
    }

    #[test]
    fn test_round_off_asymmetry_accepted() {
        let m = Matrix2::new(1.0e4, 3.0, 3.0 + 1e-9, 2.0e4);
        assert!(PrincipalAxes::from_matrix(&m).is_ok());
    }
}

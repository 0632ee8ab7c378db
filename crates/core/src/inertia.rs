//! Weighted center of mass and 2×2 inertia tensor.
//!
//! For points `(x, y)` with weights `w`:
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | `x̄`, `ȳ` | `Σ w·x / Σ w`, `Σ w·y / Σ w` (origin when `Σ w = 0`) |
//! | `Ixx` | `Σ w (y − ȳ)²` |
//! | `Iyy` | `Σ w (x − x̄)²` |
//! | `Ixy` | `−Σ w (x − x̄)(y − ȳ)` |

use nalgebra::{Matrix2, Point2};

use crate::grid::{WeightedGrid, WeightedPoint};
use crate::principal::PrincipalAxes;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weighted-average position of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CenterOfMass {
    /// Mean x.
    pub x: f64,
    /// Mean y.
    pub y: f64,
}

impl CenterOfMass {
    /// Creates a center of mass.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The fallback center used for zero total weight.
    pub fn origin() -> Self {
        Self::default()
    }

    /// As a nalgebra point.
    #[inline]
    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Symmetric 2×2 inertia tensor relative to the center of mass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InertiaTensor {
    /// Moment about the x axis, `Σ w (y − ȳ)²`.
    pub ixx: f64,
    /// Product of inertia, `−Σ w (x − x̄)(y − ȳ)`.
    pub ixy: f64,
    /// Moment about the y axis, `Σ w (x − x̄)²`.
    pub iyy: f64,
}

impl InertiaTensor {
    /// Creates a tensor from its three independent entries.
    pub fn new(ixx: f64, ixy: f64, iyy: f64) -> Self {
        Self { ixx, ixy, iyy }
    }

    /// The zero tensor.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns true if every entry is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.ixx == 0.0 && self.ixy == 0.0 && self.iyy == 0.0
    }

    /// Dense matrix form `[[Ixx, Ixy], [Ixy, Iyy]]`.
    pub fn to_matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.ixx, self.ixy, self.ixy, self.iyy)
    }

    /// Eigen-decomposes the tensor into principal moments and axes.
    pub fn principal_axes(&self) -> Result<PrincipalAxes> {
        PrincipalAxes::from_matrix(&self.to_matrix())
    }
}

/// Computes the inertia tensor and center of mass of a list of weighted points.
///
/// Duplicate coordinates are allowed and simply add up.
pub fn compute_inertia(points: &[WeightedPoint]) -> (InertiaTensor, CenterOfMass) {
    inertia_of(points.iter().map(|p| (p.coord.x as f64, p.coord.y as f64, p.weight)))
}

/// Computes the inertia tensor and center of mass of a grid.
pub fn compute_grid_inertia(grid: &WeightedGrid) -> (InertiaTensor, CenterOfMass) {
    inertia_of(grid.iter().map(|(c, w)| (c.x as f64, c.y as f64, w)))
}

fn inertia_of<I>(points: I) -> (InertiaTensor, CenterOfMass)
where
    I: Iterator<Item = (f64, f64, f64)> + Clone,
{
    let mut total_weight = 0.0;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for (x, y, w) in points.clone() {
        total_weight += w;
        sum_x += w * x;
        sum_y += w * y;
    }

    let center = if total_weight == 0.0 {
        CenterOfMass::origin()
    } else {
        CenterOfMass::new(sum_x / total_weight, sum_y / total_weight)
    };

    let mut tensor = InertiaTensor::zero();
    for (x, y, w) in points {
        let dx = x - center.x;
        let dy = y - center.y;
        tensor.ixx += w * dy * dy;
        tensor.iyy += w * dx * dx;
        tensor.ixy -= w * dx * dy;
    }

    (tensor, center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_point() {
        let (tensor, center) = compute_inertia(&[WeightedPoint::new(0, 0, 1.0)]);
        assert_eq!(center, CenterOfMass::new(0.0, 0.0));
        assert!(tensor.is_zero());
    }

    #[test]
    fn test_coincident_points() {
        let (tensor, center) = compute_inertia(&[
            WeightedPoint::new(1, 1, 1.0),
            WeightedPoint::new(1, 1, 1.0),
        ]);
        assert_eq!(center, CenterOfMass::new(1.0, 1.0));
        assert!(tensor.is_zero());
    }

    #[test]
    fn test_two_points() {
        let (tensor, center) = compute_inertia(&[
            WeightedPoint::new(0, 0, 1.0),
            WeightedPoint::new(2, 0, 3.0),
        ]);
        assert_relative_eq!(center.x, 1.5);
        assert_relative_eq!(center.y, 0.0);
        assert_relative_eq!(tensor.ixx, 0.0);
        assert_relative_eq!(tensor.ixy, 0.0);
        assert_relative_eq!(tensor.iyy, 3.0);
    }

    #[test]
    fn test_square_corners() {
        let (tensor, center) = compute_inertia(&[
            WeightedPoint::new(-1, -1, 1.0),
            WeightedPoint::new(1, -1, 1.0),
            WeightedPoint::new(-1, 1, 1.0),
            WeightedPoint::new(1, 1, 1.0),
        ]);
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);
        assert_relative_eq!(tensor.ixx, 4.0);
        assert_relative_eq!(tensor.iyy, 4.0);
        assert_relative_eq!(tensor.ixy, 0.0);
    }

    #[test]
    fn test_all_zero_weights() {
        let grid = WeightedGrid::from_rows(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        let (tensor, center) = compute_grid_inertia(&grid);
        assert_eq!(center, CenterOfMass::origin());
        assert!(tensor.is_zero());
    }

    #[test]
    fn test_empty_grid() {
        let (tensor, center) = compute_grid_inertia(&WeightedGrid::new());
        assert_eq!(center, CenterOfMass::origin());
        assert!(tensor.is_zero());
    }

    #[test]
    fn test_diagonal_line_has_product_term() {
        // Points on y = x: positive covariance, so Ixy is negative
        let grid = WeightedGrid::from_rows(&[
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ]);
        let (tensor, center) = compute_grid_inertia(&grid);
        assert_relative_eq!(center.x, 1.0);
        assert_relative_eq!(center.y, 1.0);
        assert_relative_eq!(tensor.ixx, 2.0);
        assert_relative_eq!(tensor.iyy, 2.0);
        assert_relative_eq!(tensor.ixy, -2.0);
        assert_eq!(tensor.to_matrix(), Matrix2::new(2.0, -2.0, -2.0, 2.0));
    }

    #[test]
    fn test_grid_and_points_agree() {
        let grid = WeightedGrid::from_rows(&[vec![5.0, 2.0, 0.0], vec![0.0, 3.0, 4.0]]);
        assert_eq!(compute_grid_inertia(&grid), compute_inertia(&grid.points()));
    }
}

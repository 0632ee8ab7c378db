//! Axis projector.
//!
//! Projects every grid point onto a unit axis through the center of mass. The signed
//! scalar `s = axis · (p − c)` orders the points along the axis; the snapped position
//! `p + s · axis` is only used to measure how spread out a projection is and never moves
//! a point.

use nalgebra::{Point2, Vector2};

use crate::grid::{Coord, WeightedGrid};
use crate::inertia::CenterOfMass;

/// A grid point together with its projection onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Original coordinate.
    pub coord: Coord,
    /// Original weight.
    pub weight: f64,
    /// Signed distance along the axis from the center of mass.
    pub scalar: f64,
    /// `coord + scalar · axis`.
    pub snapped: Point2<f64>,
}

/// Projects each point of `grid` onto `axis` (expected to be unit length).
///
/// Points are returned in grid (coordinate) order.
pub fn project_onto_axis(
    grid: &WeightedGrid,
    center: &CenterOfMass,
    axis: &Vector2<f64>,
) -> Vec<ProjectedPoint> {
    let origin = center.to_point();
    grid.iter()
        .map(|(coord, weight)| {
            let position = coord.to_point();
            let scalar = axis.dot(&(position - origin));
            ProjectedPoint {
                coord,
                weight,
                scalar,
                snapped: position + axis * scalar,
            }
        })
        .collect()
}

/// Largest pairwise Euclidean distance among snapped positions.
///
/// Zero for fewer than two points. Quadratic in the number of points.
pub fn max_dispersion(points: &[ProjectedPoint]) -> f64 {
    let mut max_sq = 0.0_f64;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            max_sq = max_sq.max((a.snapped - b.snapped).norm_squared());
        }
    }
    max_sq.sqrt()
}

/// A full projection of a grid onto one axis.
#[derive(Debug, Clone)]
pub struct AxisProjection {
    /// The unit axis.
    pub axis: Vector2<f64>,
    /// Projected points in grid order.
    pub points: Vec<ProjectedPoint>,
    /// [`max_dispersion`] of `points`.
    pub dispersion: f64,
}

impl AxisProjection {
    /// Projects `grid` and measures the dispersion.
    pub fn new(grid: &WeightedGrid, center: &CenterOfMass, axis: Vector2<f64>) -> Self {
        let points = project_onto_axis(grid, center, &axis);
        let dispersion = max_dispersion(&points);
        Self {
            axis,
            points,
            dispersion,
        }
    }

    /// Coordinates sorted by ascending scalar; equal scalars keep coordinate order.
    pub fn sorted_coords(&self) -> Vec<Coord> {
        let mut order: Vec<&ProjectedPoint> = self.points.iter().collect();
        order.sort_by(|a, b| a.scalar.total_cmp(&b.scalar));
        order.into_iter().map(|p| p.coord).collect()
    }
}

//! Weighted grid data model.
//!
//! A [`WeightedGrid`] maps integer grid coordinates to non-negative weights. It is the
//! 2D projection of load or activity from a 3D computational mesh and the input of every
//! partitioning operation. The map is ordered by coordinate so that iteration, sorting
//! tie-breaks and therefore whole partitioning runs are reproducible.

use std::collections::BTreeMap;
use std::fmt;

use nalgebra::Point2;

use crate::connectivity;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer grid coordinate, ordered by `x` then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    /// First grid index.
    pub x: i64,
    /// Second grid index.
    pub y: i64,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The 4-adjacent coordinates (right, left, up, down) that fit in `i64`.
    ///
    /// Coordinates on the edge of the `i64` range have fewer than four neighbours.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        [
            self.x.checked_add(1).map(|x| Coord::new(x, self.y)),
            self.x.checked_sub(1).map(|x| Coord::new(x, self.y)),
            self.y.checked_add(1).map(|y| Coord::new(self.x, y)),
            self.y.checked_sub(1).map(|y| Coord::new(self.x, y)),
        ]
        .into_iter()
        .flatten()
    }

    /// Returns true if `other` differs by exactly one unit along exactly one axis.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        matches!(
            (self.x.abs_diff(other.x), self.y.abs_diff(other.y)),
            (1, 0) | (0, 1)
        )
    }

    /// The coordinate as a floating point position.
    #[inline]
    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single weighted grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightedPoint {
    /// Grid coordinate.
    pub coord: Coord,
    /// Load carried by the cell (expected to be `>= 0`).
    pub weight: f64,
}

impl WeightedPoint {
    /// Creates a weighted point.
    pub fn new(x: i64, y: i64, weight: f64) -> Self {
        Self {
            coord: Coord::new(x, y),
            weight,
        }
    }
}

/// Mapping from grid coordinate to weight.
///
/// Keys are unique; inserting an existing coordinate replaces its weight.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<WeightedPoint>", into = "Vec<WeightedPoint>")
)]
pub struct WeightedGrid {
    cells: BTreeMap<Coord, f64>,
}

/// A partition cell. Same representation as the grid it was cut from.
pub type Subset = WeightedGrid;

impl WeightedGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from weighted points. Later duplicates overwrite earlier ones.
    pub fn from_points(points: impl IntoIterator<Item = WeightedPoint>) -> Self {
        points
            .into_iter()
            .map(|p| (p.coord, p.weight))
            .collect()
    }

    /// Builds a grid from a dense weight matrix; entry `rows[i][j]` lands on `(i, j)`.
    ///
    /// Every entry is kept, including zeros.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Self {
        let mut grid = Self::new();
        for (i, row) in rows.iter().enumerate() {
            for (j, &weight) in row.as_ref().iter().enumerate() {
                grid.insert(Coord::new(i as i64, j as i64), weight);
            }
        }
        grid
    }

    /// Inserts or replaces the weight of a coordinate.
    pub fn insert(&mut self, coord: Coord, weight: f64) -> Option<f64> {
        self.cells.insert(coord, weight)
    }

    /// Weight of a coordinate, if present.
    #[inline]
    pub fn get(&self, coord: &Coord) -> Option<f64> {
        self.cells.get(coord).copied()
    }

    /// Returns true if the coordinate belongs to the grid.
    #[inline]
    pub fn contains(&self, coord: &Coord) -> bool {
        self.cells.contains_key(coord)
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the grid has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.cells.values().sum()
    }

    /// Iterates `(coord, weight)` pairs in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, f64)> + Clone + '_ {
        self.cells.iter().map(|(c, w)| (*c, *w))
    }

    /// Iterates coordinates in order.
    pub fn coords(&self) -> impl DoubleEndedIterator<Item = Coord> + '_ {
        self.cells.keys().copied()
    }

    /// All entries as weighted points, in coordinate order.
    pub fn points(&self) -> Vec<WeightedPoint> {
        self.iter()
            .map(|(coord, weight)| WeightedPoint { coord, weight })
            .collect()
    }

    /// Sub-grid made of the given coordinates. Coordinates not in the grid are skipped.
    pub fn select<'a>(&self, coords: impl IntoIterator<Item = &'a Coord>) -> WeightedGrid {
        coords
            .into_iter()
            .filter_map(|c| self.get(c).map(|w| (*c, w)))
            .collect()
    }

    /// Copy of the grid without zero-weight entries.
    pub fn without_zero_weights(&self) -> WeightedGrid {
        self.iter().filter(|&(_, w)| w != 0.0).collect()
    }

    /// Returns true if no coordinate is shared with `other`.
    pub fn is_disjoint(&self, other: &WeightedGrid) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.coords().all(|c| !large.contains(&c))
    }

    /// Returns true if the points form a single 4-connected component.
    ///
    /// The empty grid counts as connected.
    pub fn is_four_connected(&self) -> bool {
        match self.cells.keys().next() {
            None => true,
            Some(&start) => {
                connectivity::is_connected_from(start, self.len(), |c| self.contains(&c))
            }
        }
    }

    /// Checks that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (coord, weight) in self.iter() {
            if !weight.is_finite() {
                return Err(Error::InvalidGrid(format!(
                    "weight at {} is not finite ({})",
                    coord, weight
                )));
            }
            if weight < 0.0 {
                return Err(Error::InvalidGrid(format!(
                    "weight at {} is negative ({})",
                    coord, weight
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(Coord, f64)> for WeightedGrid {
    fn from_iter<I: IntoIterator<Item = (Coord, f64)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Coord, f64)> for WeightedGrid {
    fn extend<I: IntoIterator<Item = (Coord, f64)>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl From<Vec<WeightedPoint>> for WeightedGrid {
    fn from(points: Vec<WeightedPoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<WeightedGrid> for Vec<WeightedPoint> {
    fn from(grid: WeightedGrid) -> Self {
        grid.points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> WeightedGrid {
        WeightedGrid::from_rows(&[vec![5.0, 2.0, 0.0], vec![0.0, 3.0, 4.0], vec![1.0, 0.0, 2.0]])
    }

    #[test]
    fn test_from_rows_keeps_zero_entries() {
        let grid = sample_grid();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.get(&Coord::new(0, 0)), Some(5.0));
        assert_eq!(grid.get(&Coord::new(2, 1)), Some(0.0));
        assert_eq!(grid.total_weight(), 17.0);
    }

    #[test]
    fn test_without_zero_weights() {
        let grid = sample_grid().without_zero_weights();
        assert_eq!(grid.len(), 6);
        assert!(!grid.contains(&Coord::new(0, 2)));
        assert_eq!(grid.total_weight(), 17.0);
    }

    #[test]
    fn test_duplicate_points_overwrite() {
        let grid = WeightedGrid::from_points([
            WeightedPoint::new(1, 1, 1.0),
            WeightedPoint::new(1, 1, 4.0),
        ]);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(&Coord::new(1, 1)), Some(4.0));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let grid = WeightedGrid::from_points([
            WeightedPoint::new(2, 0, 1.0),
            WeightedPoint::new(0, 5, 1.0),
            WeightedPoint::new(0, 1, 1.0),
        ]);
        let coords: Vec<Coord> = grid.coords().collect();
        assert_eq!(
            coords,
            vec![Coord::new(0, 1), Coord::new(0, 5), Coord::new(2, 0)]
        );
    }

    #[test]
    fn test_adjacency() {
        let c = Coord::new(3, 3);
        for n in c.neighbors() {
            assert!(c.is_adjacent(n));
        }
        assert!(!c.is_adjacent(Coord::new(4, 4)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn test_neighbors_at_i64_limits() {
        let corner = Coord::new(i64::MAX, i64::MIN);
        let neighbors: Vec<Coord> = corner.neighbors().collect();
        assert_eq!(
            neighbors,
            vec![Coord::new(i64::MAX - 1, i64::MIN), Coord::new(i64::MAX, i64::MIN + 1)]
        );
        assert_eq!(Coord::new(0, 0).neighbors().count(), 4);
        assert!(!Coord::new(i64::MIN, 0).is_adjacent(Coord::new(i64::MAX, 0)));
        assert!(Coord::new(i64::MAX, 0).is_adjacent(Coord::new(i64::MAX, 1)));

        let edge = WeightedGrid::from_points([
            WeightedPoint::new(i64::MAX, 0, 1.0),
            WeightedPoint::new(i64::MAX, 1, 1.0),
        ]);
        assert!(edge.is_four_connected());
    }

    #[test]
    fn test_four_connectivity() {
        assert!(sample_grid().is_four_connected());
        assert!(WeightedGrid::new().is_four_connected());

        // (2, 0) is isolated once zero-weight cells are dropped
        assert!(!sample_grid().without_zero_weights().is_four_connected());
    }

    #[test]
    fn test_select_and_disjoint() {
        let grid = sample_grid();
        let left = grid.select(&[Coord::new(0, 0), Coord::new(0, 1), Coord::new(9, 9)]);
        assert_eq!(left.len(), 2);
        let right = grid.select(&[Coord::new(2, 2)]);
        assert!(left.is_disjoint(&right));
        assert!(!left.is_disjoint(&grid));
    }

    #[test]
    fn test_validate() {
        assert!(sample_grid().validate().is_ok());

        let mut bad = sample_grid();
        bad.insert(Coord::new(5, 5), -1.0);
        assert!(matches!(bad.validate(), Err(Error::InvalidGrid(_))));

        let mut nan = sample_grid();
        nan.insert(Coord::new(5, 5), f64::NAN);
        assert!(nan.validate().is_err());
    }
}

//! Partition result representation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::grid::{Coord, Subset, WeightedGrid};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a partition run.
///
/// Subsets are keyed by their binary domain path: the sequence of `'0'` / `'1'` choices
/// taken at each recursive split. Ids iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartitionResult {
    /// Subsets keyed by binary domain path.
    pub subsets: BTreeMap<String, Subset>,

    /// Number of bisections performed.
    pub splits: usize,

    /// Number of bisections resolved by region growing.
    pub fallback_splits: usize,

    /// Number of cut scans aborted by the deadline or cancellation.
    pub deadline_hits: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,

    /// Whether the run was cancelled before reaching the requested subset count.
    pub cancelled: bool,
}

impl PartitionResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result holding a single leaf.
    pub fn leaf(id: impl Into<String>, subset: Subset) -> Self {
        let mut result = Self::new();
        result.subsets.insert(id.into(), subset);
        result
    }

    /// Number of subsets.
    #[inline]
    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    /// Returns true if there are no subsets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }

    /// Subset with the given id.
    pub fn get(&self, id: &str) -> Option<&Subset> {
        self.subsets.get(id)
    }

    /// Subset ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.subsets.keys().map(String::as_str)
    }

    /// Iterates `(id, subset)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Subset)> {
        self.subsets.iter().map(|(id, s)| (id.as_str(), s))
    }

    /// Total number of points over all subsets.
    pub fn total_points(&self) -> usize {
        self.subsets.values().map(WeightedGrid::len).sum()
    }

    /// Total weight per subset, in id order.
    pub fn subset_weights(&self) -> Vec<f64> {
        self.subsets.values().map(WeightedGrid::total_weight).collect()
    }

    /// Folds another result (from a sibling branch) into this one.
    pub fn merge(&mut self, other: PartitionResult) {
        self.subsets.extend(other.subsets);
        self.splits += other.splits;
        self.fallback_splits += other.fallback_splits;
        self.deadline_hits += other.deadline_hits;
        self.cancelled |= other.cancelled;
    }

    /// Checks that the subsets are pairwise disjoint and that their union is exactly the
    /// coordinate set of `grid`.
    pub fn verify_coverage(&self, grid: &WeightedGrid) -> Result<()> {
        let mut owner: HashMap<Coord, &str> = HashMap::with_capacity(grid.len());
        for (id, subset) in self.iter() {
            for coord in subset.coords() {
                if !grid.contains(&coord) {
                    return Err(Error::Internal(format!(
                        "subset '{}' contains {} which is not in the grid",
                        id, coord
                    )));
                }
                if let Some(previous) = owner.insert(coord, id) {
                    return Err(Error::Internal(format!(
                        "{} is assigned to both '{}' and '{}'",
                        coord, previous, id
                    )));
                }
            }
        }
        if owner.len() != grid.len() {
            return Err(Error::Internal(format!(
                "{} of {} grid points are not assigned",
                grid.len() - owner.len(),
                grid.len()
            )));
        }
        Ok(())
    }

    /// Returns true if [`verify_coverage`](Self::verify_coverage) succeeds.
    pub fn covers(&self, grid: &WeightedGrid) -> bool {
        self.verify_coverage(grid).is_ok()
    }

    /// Renders the result as an `rows × cols` map of domain ids.
    ///
    /// Cells absent from every subset get an empty label; coordinates outside the
    /// window are ignored.
    pub fn domain_assignment(&self, rows: usize, cols: usize) -> DomainMap {
        let mut map = DomainMap::new(rows, cols);
        for (id, subset) in self.iter() {
            for coord in subset.coords() {
                if coord.x < 0 || coord.y < 0 {
                    continue;
                }
                let (i, j) = (coord.x as usize, coord.y as usize);
                if i < rows && j < cols {
                    map.labels[i * cols + j] = id.to_string();
                }
            }
        }
        map
    }
}

/// A dense grid of domain-id labels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DomainMap {
    rows: usize,
    cols: usize,
    labels: Vec<String>,
}

impl DomainMap {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            labels: vec![String::new(); rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Label of cell `(i, j)`, or `None` outside the map.
    pub fn label(&self, i: usize, j: usize) -> Option<&str> {
        if i < self.rows && j < self.cols {
            Some(self.labels[i * self.cols + j].as_str())
        } else {
            None
        }
    }

    /// Iterates rows as label slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> {
        self.labels.chunks(self.cols.max(1)).take(self.rows)
    }
}

impl fmt::Display for DomainMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(String::len).max().unwrap_or(0).max(1);
        for row in self.iter_rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|label| {
                    let shown = if label.is_empty() { "." } else { label.as_str() };
                    format!("{:>width$}", shown, width = width)
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

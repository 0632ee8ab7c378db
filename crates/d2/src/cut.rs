//! Balanced cut search along a principal axis.
//!
//! The grid is ordered along the principal axis with the smaller dispersion and every
//! contiguous split of that order is a candidate. A candidate is valid when both sides are
//! 4-connected; the valid candidate whose first side is closest to its target weight wins.
//! When no candidate is valid the split is delegated to region growing.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use gridpart_core::{
    compute_grid_inertia, is_connected_from, AxisProjection, Coord, Error, Result, Subset,
    WeightedGrid,
};
use nalgebra::Vector2;

use crate::region::grow_regions;

/// Relative tolerance under which two axis dispersions count as equal.
pub const DISPERSION_TIE_TOLERANCE: f64 = 1e-9;

/// How a bisection was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMethod {
    /// Contiguous split of the axis-sorted order.
    OrderedCut,
    /// Region growing from the two extreme points.
    RegionGrowing,
}

/// Two disjoint subsets whose union is the input grid.
#[derive(Debug, Clone)]
pub struct Bisection {
    /// Subset aimed at the first target share.
    pub first: Subset,
    /// The remaining points.
    pub second: Subset,
    /// How the split was found.
    pub method: SplitMethod,
    /// Axis the points were ordered along (`None` for trivial inputs).
    pub axis: Option<Vector2<f64>>,
    /// `|weight(first) − target1| / total`, measured on the balancing weights.
    pub imbalance: f64,
    /// Whether both subsets are 4-connected.
    pub connected: bool,
    /// Whether the scan was cut short by the deadline or cancellation.
    pub deadline_hit: bool,
}

/// Time and cancellation limits for a cut search.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    deadline: Option<Instant>,
    cancelled: Arc<AtomicBool>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl SearchBudget {
    /// A budget that never runs out.
    pub fn unlimited() -> Self {
        Self {
            deadline: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A budget bounded by `deadline` (if any) and the shared cancel flag.
    pub fn new(deadline: Option<Instant>, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            deadline,
            cancelled,
        }
    }

    /// Returns true once the cancel flag is set.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Returns true once the deadline has passed.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Returns true if the search should stop.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.is_cancelled() || self.is_expired()
    }
}

/// Splits `grid` into two subsets weighted approximately `ratio.0 : ratio.1`.
///
/// A grid with zero total weight is balanced by point count. Empty input yields two empty
/// subsets and a single point goes entirely to `first`.
///
/// Each candidate costs one connectivity traversal, so the search is `O(N²)` traversals in
/// the worst case and is intended for grids of moderate size.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if both ratio parts are zero.
pub fn find_balanced_cut(
    grid: &WeightedGrid,
    ratio: (usize, usize),
    budget: &SearchBudget,
    parallel: bool,
) -> Result<Bisection> {
    let (n1, n2) = ratio;
    if n1 + n2 == 0 {
        return Err(Error::InvalidConfig(
            "cut ratio must have a positive part".to_string(),
        ));
    }

    if grid.len() <= 1 {
        let total = grid.total_weight();
        let target1 = total * n1 as f64 / (n1 + n2) as f64;
        return Ok(Bisection {
            first: grid.clone(),
            second: WeightedGrid::new(),
            method: SplitMethod::OrderedCut,
            axis: None,
            imbalance: if total > 0.0 {
                (total - target1).abs() / total
            } else {
                0.0
            },
            connected: true,
            deadline_hit: false,
        });
    }

    let balance = balancing_grid(grid);
    let projection = choose_projection(&balance, parallel)?;
    let sorted = projection.sorted_coords();

    let total = balance.total_weight();
    let target1 = total * n1 as f64 / (n1 + n2) as f64;
    let n = sorted.len();

    let rank: HashMap<Coord, usize> = sorted.iter().enumerate().map(|(i, &c)| (c, i)).collect();
    let side_connected = |k: usize| -> bool {
        let first_ok = is_connected_from(sorted[0], k, |c| rank.get(&c).is_some_and(|&r| r < k));
        first_ok
            && is_connected_from(sorted[k], n - k, |c| {
                rank.get(&c).is_some_and(|&r| r >= k)
            })
    };

    let mut best: Option<(usize, f64)> = None;
    let mut deadline_hit = false;
    let mut weight1 = 0.0;
    for k in 1..n {
        if budget.is_exhausted() {
            deadline_hit = true;
            log::warn!(
                "cut scan stopped at index {} of {} ({})",
                k,
                n,
                if budget.is_cancelled() {
                    "cancelled"
                } else {
                    "deadline exceeded"
                }
            );
            break;
        }

        weight1 += balance.get(&sorted[k - 1]).unwrap_or(0.0);
        let imbalance = (weight1 - target1).abs() / total;
        // Only a strictly better candidate can replace the current best
        if best.is_some_and(|(_, b)| imbalance >= b) {
            continue;
        }
        if side_connected(k) {
            best = Some((k, imbalance));
        }
    }

    if let Some((k, imbalance)) = best {
        log::debug!(
            "ordered cut at {}/{} along ({:.4}, {:.4}), imbalance {:.4}",
            k,
            n,
            projection.axis.x,
            projection.axis.y,
            imbalance
        );
        return Ok(Bisection {
            first: grid.select(&sorted[..k]),
            second: grid.select(&sorted[k..]),
            method: SplitMethod::OrderedCut,
            axis: Some(projection.axis),
            imbalance,
            connected: true,
            deadline_hit,
        });
    }

    log::warn!(
        "no connected ordered cut among {} points, falling back to region growing",
        n
    );
    let regions = grow_regions(&balance, ratio, &sorted);
    let weight1: f64 = regions.first.iter().filter_map(|c| balance.get(c)).sum();
    let connected = regions.is_connected();

    Ok(Bisection {
        first: grid.select(&regions.first),
        second: grid.select(&regions.second),
        method: SplitMethod::RegionGrowing,
        axis: Some(projection.axis),
        imbalance: (weight1 - target1).abs() / total,
        connected,
        deadline_hit,
    })
}

/// The weights the cut is balanced on: the grid itself, or unit weights when the grid
/// carries no weight at all.
fn balancing_grid(grid: &WeightedGrid) -> Cow<'_, WeightedGrid> {
    if grid.total_weight() > 0.0 {
        Cow::Borrowed(grid)
    } else {
        Cow::Owned(grid.coords().map(|c| (c, 1.0)).collect())
    }
}

/// Projects onto both principal axes and keeps the one with the smaller dispersion.
fn choose_projection(grid: &WeightedGrid, parallel: bool) -> Result<AxisProjection> {
    let (tensor, center) = compute_grid_inertia(grid);
    let principal = tensor.principal_axes()?;
    let [axis1, axis2] = principal.axes();

    let (p1, p2) = if parallel {
        rayon::join(
            || AxisProjection::new(grid, &center, axis1),
            || AxisProjection::new(grid, &center, axis2),
        )
    } else {
        (
            AxisProjection::new(grid, &center, axis1),
            AxisProjection::new(grid, &center, axis2),
        )
    };

    let tolerance = DISPERSION_TIE_TOLERANCE * p1.dispersion.max(p2.dispersion);
    let chosen = if p2.dispersion < p1.dispersion - tolerance {
        p2
    } else {
        p1
    };
    log::debug!(
        "axis ({:.4}, {:.4}) chosen with dispersion {:.4}, moments {:?}",
        chosen.axis.x,
        chosen.axis.y,
        chosen.dispersion,
        principal.moments()
    );
    Ok(chosen)
}

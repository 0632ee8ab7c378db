//! Region-growing fallback bisection.
//!
//! Used when no contiguous split of the axis order keeps both sides 4-connected. Two
//! regions start from the extreme points of the order and take turns absorbing frontier
//! points: the region further below its target grows, by the neighbour that leaves it
//! closest to that target. Points no region can reach, and points left once the only
//! region still able to grow has met its target, are handed out afterwards.

use std::collections::{BTreeSet, HashSet};

use gridpart_core::{is_connected_from, Coord, WeightedGrid};

/// Outcome of region growing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSplit {
    /// Coordinates grown from the first seed.
    pub first: BTreeSet<Coord>,
    /// Coordinates grown from the last seed.
    pub second: BTreeSet<Coord>,
    /// Number of points assigned after growth stopped.
    pub leftovers: usize,
}

impl RegionSplit {
    /// Returns true if both regions are 4-connected.
    pub fn is_connected(&self) -> bool {
        if self.leftovers == 0 {
            return true;
        }
        [&self.first, &self.second].iter().all(|set| match set.first() {
            None => true,
            Some(&start) => is_connected_from(start, set.len(), |c| set.contains(&c)),
        })
    }
}

struct Region {
    members: BTreeSet<Coord>,
    frontier: BTreeSet<Coord>,
    weight: f64,
    target: f64,
}

impl Region {
    fn new(target: f64) -> Self {
        Self {
            members: BTreeSet::new(),
            frontier: BTreeSet::new(),
            weight: 0.0,
            target,
        }
    }

    /// Normalized distance below target; 0 when the target is 0.
    fn deficit(&self) -> f64 {
        if self.target > 0.0 {
            (self.target - self.weight) / self.target
        } else {
            0.0
        }
    }

    /// How much closer to its target the region gets by absorbing `weight`.
    fn gain(&self, weight: f64) -> f64 {
        (self.target - self.weight).abs() - (self.target - self.weight - weight).abs()
    }

    fn best_candidate(&self, grid: &WeightedGrid) -> Option<Coord> {
        self.frontier.iter().copied().min_by(|a, b| {
            let da = (self.target - self.weight - grid.get(a).unwrap_or(0.0)).abs();
            let db = (self.target - self.weight - grid.get(b).unwrap_or(0.0)).abs();
            da.total_cmp(&db)
        })
    }
}

/// Grows two regions over `grid` with target shares `ratio.0 : ratio.1`.
///
/// `sorted` is the axis order of the grid's coordinates; its first and last entries seed
/// the two regions. Every grid point ends up in exactly one region.
pub fn grow_regions(grid: &WeightedGrid, ratio: (usize, usize), sorted: &[Coord]) -> RegionSplit {
    let (Some(&seed_a), Some(&seed_b)) = (sorted.first(), sorted.last()) else {
        return RegionSplit::default();
    };
    if seed_a == seed_b {
        return RegionSplit {
            first: grid.coords().collect(),
            ..Default::default()
        };
    }

    let (n1, n2) = ratio;
    let parts = (n1 + n2).max(1) as f64;
    let total = grid.total_weight();
    let mut regions = [
        Region::new(total * n1 as f64 / parts),
        Region::new(total * n2 as f64 / parts),
    ];
    let mut assigned: HashSet<Coord> = HashSet::with_capacity(grid.len());

    let mut assign = |regions: &mut [Region; 2], idx: usize, coord: Coord| {
        assigned.insert(coord);
        for region in regions.iter_mut() {
            region.frontier.remove(&coord);
        }
        let region = &mut regions[idx];
        region.members.insert(coord);
        region.weight += grid.get(&coord).unwrap_or(0.0);
        for neighbor in coord.neighbors() {
            if grid.contains(&neighbor) && !assigned.contains(&neighbor) {
                region.frontier.insert(neighbor);
            }
        }
    };

    assign(&mut regions, 0, seed_a);
    assign(&mut regions, 1, seed_b);

    loop {
        let grower = match (regions[0].frontier.is_empty(), regions[1].frontier.is_empty()) {
            (true, true) => break,
            // A lone grower stops at its target; the rest are handed out as leftovers
            (false, true) if regions[0].deficit() <= 0.0 => break,
            (true, false) if regions[1].deficit() <= 0.0 => break,
            (false, true) => 0,
            (true, false) => 1,
            (false, false) => {
                if regions[0].deficit() > regions[1].deficit() {
                    0
                } else {
                    1
                }
            }
        };
        match regions[grower].best_candidate(grid) {
            Some(coord) => assign(&mut regions, grower, coord),
            None => break,
        }
    }

    let [mut a, mut b] = regions;
    let mut leftovers = 0;
    for (coord, weight) in grid.iter() {
        if a.members.contains(&coord) || b.members.contains(&coord) {
            continue;
        }
        leftovers += 1;
        let region = if a.gain(weight) >= b.gain(weight) {
            &mut a
        } else {
            &mut b
        };
        region.members.insert(coord);
        region.weight += weight;
    }

    if leftovers > 0 {
        log::warn!(
            "{} unreachable points assigned after region growing; regions may be disconnected",
            leftovers
        );
    }

    RegionSplit {
        first: a.members,
        second: b.members,
        leftovers,
    }
}

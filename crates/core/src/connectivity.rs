//! 4-connectivity checks on coordinate sets.
//!
//! Two coordinates are adjacent iff they differ by exactly one unit along exactly one
//! axis. A set is connected when a breadth-first traversal restricted to the set reaches
//! every member from any starting member.

use std::collections::{HashSet, VecDeque};

use crate::grid::Coord;

/// Breadth-first traversal from `start` over coordinates accepted by `contains`.
///
/// Returns true if exactly `expected` coordinates are reachable, i.e. the set described
/// by `contains` (of size `expected`) is one 4-connected component. `expected == 0`
/// is trivially connected.
pub fn is_connected_from<F>(start: Coord, expected: usize, contains: F) -> bool
where
    F: Fn(Coord) -> bool,
{
    if expected == 0 {
        return true;
    }
    if !contains(start) {
        return false;
    }

    let mut visited = HashSet::with_capacity(expected);
    let mut queue = VecDeque::with_capacity(expected);
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in current.neighbors() {
            if contains(neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited.len() == expected
}

/// Returns true if the coordinates form a single 4-connected component.
///
/// Duplicates are ignored; an empty slice is connected.
pub fn is_connected(coords: &[Coord]) -> bool {
    let members: HashSet<Coord> = coords.iter().copied().collect();
    match coords.first() {
        None => true,
        Some(&start) => is_connected_from(start, members.len(), |c| members.contains(&c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(list: &[(i64, i64)]) -> Vec<Coord> {
        list.iter().map(|&c| Coord::from(c)).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(is_connected(&[]));
        assert!(is_connected(&coords(&[(4, 4)])));
    }

    #[test]
    fn test_line_is_connected() {
        assert!(is_connected(&coords(&[(0, 0), (0, 1), (0, 2), (1, 2)])));
    }

    #[test]
    fn test_diagonal_is_not_connected() {
        assert!(!is_connected(&coords(&[(0, 0), (1, 1)])));
    }

    #[test]
    fn test_two_islands() {
        assert!(!is_connected(&coords(&[(0, 0), (0, 1), (5, 5), (5, 6)])));
    }

    #[test]
    fn test_ring_with_hole() {
        // 3x3 block without its center is still one component
        let ring = coords(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ]);
        assert!(is_connected(&ring));
    }

    #[test]
    fn test_predicate_form() {
        let members: HashSet<Coord> = coords(&[(0, 0), (1, 0), (2, 0)]).into_iter().collect();
        assert!(is_connected_from(Coord::new(0, 0), 3, |c| members.contains(&c)));
        // start outside the set
        assert!(!is_connected_from(Coord::new(9, 9), 3, |c| members.contains(&c)));
        // wrong expected size
        assert!(!is_connected_from(Coord::new(0, 0), 4, |c| members.contains(&c)));
    }
}

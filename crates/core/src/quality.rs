//! Partition quality statistics.

use crate::grid::WeightedGrid;
use crate::result::PartitionResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weight balance statistics of a partition.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartitionQuality {
    /// Total weight of the original grid.
    pub total_weight: f64,
    /// `total_weight / subset count`.
    pub mean_weight: f64,
    /// Heaviest subset weight.
    pub max_weight: f64,
    /// Lightest subset weight.
    pub min_weight: f64,
    /// Population variance of the subset weights.
    pub weight_variance: f64,
    /// `max_weight - min_weight`.
    pub weight_range: f64,
    /// `weight_range` as a percentage of `mean_weight` (0 when the mean is 0).
    pub weight_percentage_range: f64,
    /// Subset ids in order.
    pub subset_ids: Vec<String>,
    /// Weight of each subset, in id order.
    pub subset_weights: Vec<f64>,
    /// Point count of each subset, in id order.
    pub subset_sizes: Vec<usize>,
    /// Ids of subsets that are not 4-connected.
    pub disconnected_subsets: Vec<String>,
}

impl PartitionQuality {
    /// Number of evaluated subsets.
    pub fn subset_count(&self) -> usize {
        self.subset_weights.len()
    }

    /// Returns true if every subset is 4-connected.
    pub fn all_connected(&self) -> bool {
        self.disconnected_subsets.is_empty()
    }
}

/// Evaluates the weight balance of `result` against the grid it was computed from.
///
/// An empty result yields all-zero statistics.
pub fn evaluate_partition_quality(
    result: &PartitionResult,
    original: &WeightedGrid,
) -> PartitionQuality {
    let total_weight = original.total_weight();
    let subset_ids: Vec<String> = result.ids().map(str::to_string).collect();
    let subset_weights = result.subset_weights();
    let subset_sizes: Vec<usize> = result.iter().map(|(_, s)| s.len()).collect();
    let disconnected_subsets: Vec<String> = result
        .iter()
        .filter(|(_, s)| !s.is_four_connected())
        .map(|(id, _)| id.to_string())
        .collect();

    if subset_weights.is_empty() {
        return PartitionQuality {
            total_weight,
            ..Default::default()
        };
    }

    let count = subset_weights.len() as f64;
    let mean_weight = total_weight / count;
    let max_weight = subset_weights.iter().copied().fold(f64::MIN, f64::max);
    let min_weight = subset_weights.iter().copied().fold(f64::MAX, f64::min);

    let actual_mean = subset_weights.iter().sum::<f64>() / count;
    let weight_variance = subset_weights
        .iter()
        .map(|w| (w - actual_mean).powi(2))
        .sum::<f64>()
        / count;

    let weight_range = max_weight - min_weight;
    let weight_percentage_range = if mean_weight > 0.0 {
        weight_range / mean_weight * 100.0
    } else {
        0.0
    };

    PartitionQuality {
        total_weight,
        mean_weight,
        max_weight,
        min_weight,
        weight_variance,
        weight_range,
        weight_percentage_range,
        subset_ids,
        subset_weights,
        subset_sizes,
        disconnected_subsets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::WeightedPoint;
    use approx::assert_relative_eq;

    fn grid(points: &[(i64, i64, f64)]) -> WeightedGrid {
        WeightedGrid::from_points(points.iter().map(|&(x, y, w)| WeightedPoint::new(x, y, w)))
    }

    #[test]
    fn test_quality_statistics() {
        let original = grid(&[
            (0, 0, 10.0),
            (0, 1, 5.0),
            (0, 2, 15.0),
            (1, 0, 5.0),
            (1, 1, 10.0),
            (1, 2, 5.0),
        ]);
        let mut result = PartitionResult::new();
        result
            .subsets
            .insert("0".into(), grid(&[(0, 0, 10.0), (0, 1, 5.0)]));
        result.subsets.insert(
            "1".into(),
            grid(&[(0, 2, 15.0), (1, 0, 5.0), (1, 1, 10.0), (1, 2, 5.0)]),
        );

        let quality = evaluate_partition_quality(&result, &original);
        assert_eq!(quality.total_weight, 50.0);
        assert_eq!(quality.mean_weight, 25.0);
        assert_eq!(quality.max_weight, 35.0);
        assert_eq!(quality.min_weight, 15.0);
        assert_eq!(quality.subset_weights, vec![15.0, 35.0]);
        assert_eq!(quality.subset_sizes, vec![2, 4]);
        assert_eq!(quality.weight_range, 20.0);
        assert_relative_eq!(quality.weight_percentage_range, 80.0);
        assert_relative_eq!(quality.weight_variance, 100.0);
        assert_eq!(quality.subset_ids, vec!["0".to_string(), "1".to_string()]);
        assert_eq!(quality.subset_count(), 2);
        assert!(quality.all_connected());
    }

    #[test]
    fn test_disconnected_subset_reported() {
        let original = grid(&[(0, 0, 1.0), (5, 5, 1.0)]);
        let result = PartitionResult::leaf("", original.clone());
        let quality = evaluate_partition_quality(&result, &original);
        assert_eq!(quality.disconnected_subsets, vec!["".to_string()]);
        assert!(!quality.all_connected());
        assert_eq!(quality.weight_variance, 0.0);
        assert_eq!(quality.weight_range, 0.0);
    }

    #[test]
    fn test_zero_weight_grid() {
        let original = grid(&[(0, 0, 0.0), (0, 1, 0.0)]);
        let mut result = PartitionResult::new();
        result.subsets.insert("0".into(), grid(&[(0, 0, 0.0)]));
        result.subsets.insert("1".into(), grid(&[(0, 1, 0.0)]));
        let quality = evaluate_partition_quality(&result, &original);
        assert_eq!(quality.mean_weight, 0.0);
        assert_eq!(quality.weight_percentage_range, 0.0);
        assert_eq!(quality.subset_sizes, vec![1, 1]);
    }

    #[test]
    fn test_empty_result() {
        let quality = evaluate_partition_quality(&PartitionResult::new(), &grid(&[(0, 0, 3.0)]));
        assert_eq!(quality.total_weight, 3.0);
        assert_eq!(quality.subset_count(), 0);
    }
}

//! k-Distance Density Curve
//!
//! For a threshold ε, the mean over all points of the fraction of the other
//! N − 1 points lying within ε:
//!
//!   ρ(ε) = (1/N) Σᵢ |{j ≠ i : Dᵢⱼ ≤ ε}| / (N − 1)
//!
//! Each point's neighbour distances are sorted once, so every threshold costs
//! one binary search per point.

use crate::geometry::DistanceMatrix;

/// Precomputed per-point sorted neighbour distances.
#[derive(Debug, Clone)]
pub struct KDistanceCurve {
    sorted: Vec<Vec<f64>>,
}

impl KDistanceCurve {
    pub fn new(distances: &DistanceMatrix) -> Self {
        Self {
            sorted: distances.sorted_neighbor_distances(),
        }
    }

    /// Mean neighbour fraction ρ(ε) in [0, 1]; 0 for a single point.
    pub fn density(&self, epsilon: f64) -> f64 {
        let n = self.sorted.len();
        if n < 2 {
            return 0.0;
        }
        let others = (n - 1) as f64;
        let total: f64 = self
            .sorted
            .iter()
            .map(|row| row.partition_point(|&d| d <= epsilon) as f64 / others)
            .sum();
        total / n as f64
    }
}

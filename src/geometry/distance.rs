//! Euclidean Distance Matrix
//!
//! Dᵢⱼ = ‖xᵢ − xⱼ‖₂, symmetric with a zero diagonal. Computed once per
//! analysis run in O(N²·D) and shared read-only by every later stage.

use ndarray::{Array2, ArrayView1};

use super::PointCloud;
use crate::error::{AnalysisError, Result};

/// Symmetric N×N matrix of pairwise Euclidean distances.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    distances: Array2<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise distances of a point cloud.
    ///
    /// Entries are finite whenever the true distance is representable: each
    /// pair is scaled by its largest coordinate gap before squaring, so very
    /// large or very small coordinates neither overflow nor underflow.
    pub fn from_cloud(cloud: &PointCloud) -> Self {
        let points = cloud.as_array();
        let n = points.nrows();
        let dim = points.ncols();

        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i + 1..n {
                let mut scale: f64 = 0.0;
                for d in 0..dim {
                    scale = scale.max((points[[i, d]] - points[[j, d]]).abs());
                }
                if scale == 0.0 {
                    continue;
                }

                let mut ratio_sq = 0.0;
                for d in 0..dim {
                    let ratio = (points[[i, d]] - points[[j, d]]) / scale;
                    ratio_sq += ratio * ratio;
                }
                let dist = scale * ratio_sq.sqrt();
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        Self { distances: dm }
    }

    /// Wrap a precomputed matrix.
    ///
    /// The matrix must be square, non-empty, symmetric, finite, non-negative
    /// and have a zero diagonal.
    pub fn from_array(distances: Array2<f64>) -> Result<Self> {
        let n = distances.nrows();
        if n == 0 {
            return Err(AnalysisError::invalid("distance matrix is empty"));
        }
        if distances.ncols() != n {
            return Err(AnalysisError::invalid(format!(
                "distance matrix is {}x{}, expected square",
                n,
                distances.ncols()
            )));
        }
        for i in 0..n {
            if distances[[i, i]] != 0.0 {
                return Err(AnalysisError::invalid(format!(
                    "diagonal entry {} is {}, expected 0",
                    i,
                    distances[[i, i]]
                )));
            }
            for j in i + 1..n {
                let d = distances[[i, j]];
                if !d.is_finite() || d < 0.0 || d != distances[[j, i]] {
                    return Err(AnalysisError::invalid(format!(
                        "entry ({}, {}) = {} is not a symmetric non-negative distance",
                        i, j, d
                    )));
                }
            }
        }
        Ok(Self { distances })
    }

    /// Number of points N
    pub fn len(&self) -> usize {
        self.distances.nrows()
    }

    /// Always false: an empty matrix cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.distances.nrows() == 0
    }

    /// Distance between points `i` and `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[[i, j]]
    }

    /// Distances from point `i` to every point (including itself)
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.distances.row(i)
    }

    /// Largest entry (0 for a single point)
    pub fn max(&self) -> f64 {
        self.distances.iter().cloned().fold(0.0, f64::max)
    }

    /// Smallest strictly positive entry, if any pair of points is distinct
    pub fn min_positive(&self) -> Option<f64> {
        self.distances
            .iter()
            .cloned()
            .filter(|&d| d > 0.0)
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.min(d))))
    }

    /// Maximum distance among a set of point indices (0 for fewer than two).
    pub fn diameter_of(&self, members: &[usize]) -> f64 {
        let mut diameter: f64 = 0.0;
        for (k, &a) in members.iter().enumerate() {
            for &b in &members[k + 1..] {
                diameter = diameter.max(self.distances[[a, b]]);
            }
        }
        diameter
    }

    /// For every point, the distances to all *other* points in ascending order.
    pub fn sorted_neighbor_distances(&self) -> Vec<Vec<f64>> {
        let n = self.len();
        (0..n)
            .map(|i| {
                let mut row: Vec<f64> = (0..n)
                    .filter(|&j| j != i)
                    .map(|j| self.distances[[i, j]])
                    .collect();
                row.sort_by(|a, b| a.total_cmp(b));
                row
            })
            .collect()
    }

    /// Underlying matrix
    pub fn as_array(&self) -> &Array2<f64> {
        &self.distances
    }
}

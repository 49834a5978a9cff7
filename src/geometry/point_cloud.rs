//! Point Cloud: an ordered, immutable set of points in ℝᴰ

use ndarray::{Array2, ArrayView1};

use crate::error::{AnalysisError, Result};

/// N points of dimension D, one point per row.
///
/// A cloud always holds at least one point with at least one finite
/// coordinate per axis. It is never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Array2<f64>,
}

impl PointCloud {
    /// Wrap an N×D matrix, validating it.
    pub fn from_array(points: Array2<f64>) -> Result<Self> {
        if points.nrows() == 0 {
            return Err(AnalysisError::invalid("point cloud is empty"));
        }
        if points.ncols() == 0 {
            return Err(AnalysisError::invalid("points have zero dimensions"));
        }
        if let Some(((i, d), v)) = points.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(AnalysisError::invalid(format!(
                "point {} has non-finite coordinate {} on axis {}",
                i, v, d
            )));
        }
        Ok(Self { points })
    }

    /// Build a cloud from row vectors, all of the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| AnalysisError::invalid("point cloud is empty"))?;
        let dim = first.len();

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(AnalysisError::invalid(format!(
                "point {} has {} coordinates, expected {}",
                i,
                row.len(),
                dim
            )));
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let points = Array2::from_shape_vec((rows.len(), dim), flat)
            .map_err(|e| AnalysisError::invalid(e.to_string()))?;
        Self::from_array(points)
    }

    /// Number of points N
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    /// Always false: an empty cloud cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Ambient dimension D
    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }

    /// Coordinates of point `i`
    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.points.row(i)
    }

    /// Underlying N×D matrix
    pub fn as_array(&self) -> &Array2<f64> {
        &self.points
    }
}

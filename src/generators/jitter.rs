//! Jitter Padding: growing undersized clouds
//!
//! Scaling fits need enough points to populate several decades of ε. When a
//! cloud is smaller than the requested size, copies of its own points
//! (taken in order, cycling) are appended with additive Gaussian noise of
//! standard deviation σ on every axis. The generator is seeded explicitly, so
//! padding is reproducible and independent of any other randomness.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::{AnalysisError, Result};
use crate::geometry::PointCloud;

/// Pads a cloud up to `target` points with jittered copies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterPadding {
    target: usize,
    sigma: f64,
    seed: u64,
}

impl JitterPadding {
    pub fn new(target: usize, sigma: f64, seed: u64) -> Self {
        Self { target, sigma, seed }
    }

    /// Return `cloud` padded to the target size (unchanged if already large
    /// enough). Original points keep their indices.
    pub fn pad(&self, cloud: &PointCloud) -> Result<PointCloud> {
        let n = cloud.len();
        if n >= self.target {
            return Ok(cloud.clone());
        }

        let noise = Normal::new(0.0, self.sigma).map_err(|e| {
            AnalysisError::invalid(format!("jitter sigma {}: {}", self.sigma, e))
        })?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let dim = cloud.dimension();
        let src = cloud.as_array();
        let mut padded = Array2::<f64>::zeros((self.target, dim));
        padded.slice_mut(ndarray::s![..n, ..]).assign(src);

        for i in n..self.target {
            let origin = (i - n) % n;
            for d in 0..dim {
                padded[[i, d]] = src[[origin, d]] + noise.sample(&mut rng);
            }
        }

        PointCloud::from_array(padded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn triangle() -> PointCloud {
        PointCloud::from_array(array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.866]]).unwrap()
    }

    #[test]
    fn test_pads_to_target() {
        let padded = JitterPadding::new(10, 0.01, 42).pad(&triangle()).unwrap();
        assert_eq!(padded.len(), 10);
        assert_eq!(padded.dimension(), 2);

        // Originals preserved
        for i in 0..3 {
            assert_eq!(padded.point(i), triangle().point(i));
        }
        // Copies stay near their source point
        for i in 3..10 {
            let src = triangle();
            let origin = src.point((i - 3) % 3);
            let dist: f64 = padded
                .point(i)
                .iter()
                .zip(origin.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            assert!(dist < 0.1);
        }
    }

    #[test]
    fn test_large_cloud_unchanged() {
        let cloud = triangle();
        let padded = JitterPadding::new(2, 0.5, 1).pad(&cloud).unwrap();
        assert_eq!(padded, cloud);
    }

    #[test]
    fn test_seeded_and_reproducible() {
        let a = JitterPadding::new(8, 0.1, 5).pad(&triangle()).unwrap();
        let b = JitterPadding::new(8, 0.1, 5).pad(&triangle()).unwrap();
        let c = JitterPadding::new(8, 0.1, 6).pad(&triangle()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_sigma() {
        assert!(JitterPadding::new(8, f64::NAN, 5).pad(&triangle()).is_err());
    }
}

//! Planar Cantor Set via the Chaos Game
//!
//! The iterated function system (Robins, *Computational Topology at Multiple
//! Resolutions*, eq. 2.6) consists of three contractions of ratio ½:
//!
//!   f₁(x, y) = (½(1 − y), ½x)
//!   f₂(x, y) = (½(1 + y), ½x)
//!   f₃(x, y) = (½y, ½(2 − x))
//!
//! Starting from the origin, each new point applies one map chosen
//! uniformly at random to the previous point. The orbit converges onto the
//! attractor, whose box-counting dimension is log 3 / log 2 ≈ 1.585.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

use super::PointGenerator;
use crate::error::{AnalysisError, Result};
use crate::geometry::PointCloud;

/// Affine map of the plane: (x, y) ↦ A·(x, y) + b
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMap2 {
    pub a: [[f64; 2]; 2],
    pub b: [f64; 2],
}

impl AffineMap2 {
    pub const fn new(a: [[f64; 2]; 2], b: [f64; 2]) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        [
            self.a[0][0] * p[0] + self.a[0][1] * p[1] + self.b[0],
            self.a[1][0] * p[0] + self.a[1][1] * p[1] + self.b[1],
        ]
    }
}

/// Chaos-game sampler over a set of planar affine contractions.
#[derive(Debug, Clone)]
pub struct CantorSet {
    maps: Vec<AffineMap2>,
}

impl CantorSet {
    /// Sampler over custom maps; at least one map is required.
    pub fn with_maps(maps: Vec<AffineMap2>) -> Result<Self> {
        if maps.is_empty() {
            return Err(AnalysisError::invalid("an IFS needs at least one map"));
        }
        Ok(Self { maps })
    }

    pub fn maps(&self) -> &[AffineMap2] {
        &self.maps
    }
}

impl Default for CantorSet {
    /// The three maps of eq. 2.6
    fn default() -> Self {
        Self {
            maps: vec![
                AffineMap2::new([[0.0, -0.5], [0.5, 0.0]], [0.5, 0.0]),
                AffineMap2::new([[0.0, 0.5], [0.5, 0.0]], [0.5, 0.0]),
                AffineMap2::new([[0.0, 0.5], [-0.5, 0.0]], [0.0, 1.0]),
            ],
        }
    }
}

impl PointGenerator for CantorSet {
    fn dimension(&self) -> usize {
        2
    }

    fn generate(&self, n: usize, seed: u64) -> Result<PointCloud> {
        if n == 0 {
            return Err(AnalysisError::invalid("cannot generate an empty point cloud"));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let pick = Uniform::new(0, self.maps.len())
            .map_err(|e| AnalysisError::invalid(e.to_string()))?;

        let mut points = Array2::<f64>::zeros((n, 2));
        let mut current = [0.0, 0.0];

        for i in 1..n {
            current = self.maps[pick.sample(&mut rng)].apply(current);
            points[[i, 0]] = current[0];
            points[[i, 1]] = current[1];
        }

        PointCloud::from_array(points)
    }

    fn name(&self) -> &'static str {
        "cantor-ifs"
    }
}

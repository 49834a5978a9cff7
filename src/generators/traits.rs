//! Point Generator Trait: deterministic synthetic data
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PointGenerator Trait                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + dimension()        - Ambient dimension of every point     │
//! │  + generate(n, seed)  - n points, identical for equal seeds  │
//! │  + name()             - Label for logs and CLI output        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::error::Result;
use crate::geometry::PointCloud;

/// A reproducible source of point clouds.
pub trait PointGenerator {
    /// Dimension of the generated points
    fn dimension(&self) -> usize;

    /// Generate `n` points. The same seed must yield the same sequence.
    ///
    /// Fails with `InvalidInput` when `n` is zero.
    fn generate(&self, n: usize, seed: u64) -> Result<PointCloud>;

    /// Short human-readable name
    fn name(&self) -> &'static str;
}

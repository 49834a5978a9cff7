//! Generators Module: Synthetic Point Clouds and Data Preparation
//!
//! Test beds for the scaling analysis:
//!
//! - **CantorSet**: chaos-game sampler of a three-map iterated function
//!   system whose attractor is a planar Cantor set of dimension log 3 / log 2
//! - **JitterPadding**: pads undersized clouds with Gaussian-jittered copies
//!   of their own points
//!
//! Both are explicitly seeded; nothing here touches process-wide state.

mod traits;
mod cantor;
mod jitter;

pub use traits::PointGenerator;
pub use cantor::{AffineMap2, CantorSet};
pub use jitter::JitterPadding;

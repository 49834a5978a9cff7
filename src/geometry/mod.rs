//! Geometry Module: Point Clouds, Distances and the Spanning Backbone
//!
//! Everything the multiscale analysis derives exactly once per run:
//! - the point cloud X ⊂ ℝᴰ itself
//! - the Euclidean distance matrix D, Dᵢⱼ = ‖xᵢ − xⱼ‖
//! - the minimum spanning tree T of the complete graph weighted by D
//!
//! ## Why the MST
//!
//! Two points are ε-connected iff they are joined by a path whose edges are
//! all ≤ ε. Removing every MST edge longer than ε leaves a forest whose trees
//! are exactly the ε-components, so a single O(N²) tree answers the
//! connectivity question for every threshold.

mod point_cloud;
mod distance;
mod spanning_tree;

pub use point_cloud::PointCloud;
pub use distance::DistanceMatrix;
pub use spanning_tree::{Edge, SpanningTree};

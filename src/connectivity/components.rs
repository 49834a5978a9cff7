//! ε-Connected Components on the MST Backbone
//!
//! For a threshold ε, the MST edges split into *surviving* (weight ≤ ε) and
//! *cut* (weight > ε). Cutting one edge of a tree splits exactly one
//! component in two, hence
//!
//!   C(ε) = 1 + |{e ∈ T : w(e) > ε}|
//!
//! The components themselves are recovered by breadth-first expansion over
//! the surviving edges. For each component we track its diameter (largest
//! pairwise distance among its members) and whether it is a singleton.
//!
//! ## Diameter approximation
//!
//! Members are determined by the MST forest, and the diameter is the largest
//! distance among those members. Since MST components coincide with the
//! components of the full ε-threshold graph, this is the largest distance
//! between ε-connected points; it is not a path-length (graph) diameter.

use std::collections::VecDeque;

use log::trace;

use crate::error::{AnalysisError, Result};
use crate::geometry::{DistanceMatrix, SpanningTree};

/// Partition of all points into ε-components.
#[derive(Debug, Clone, PartialEq)]
pub struct Components {
    /// Members of each component, in discovery order
    members: Vec<Vec<usize>>,
    /// MST edges longer than ε
    cut_edges: usize,
}

impl Components {
    /// Number of components C(ε)
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Number of MST edges cut at this threshold
    pub fn cut_edges(&self) -> usize {
        self.cut_edges
    }

    /// Number of singleton components I(ε)
    pub fn isolated_count(&self) -> usize {
        self.members.iter().filter(|c| c.len() == 1).count()
    }

    /// Size of each component
    pub fn sizes(&self) -> Vec<usize> {
        self.members.iter().map(Vec::len).collect()
    }

    /// Members of each component, in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.members.iter().map(Vec::as_slice)
    }
}

/// Connectivity statistics at one threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepStats {
    /// Threshold ε
    pub epsilon: f64,
    /// C(ε): number of ε-components
    pub component_count: usize,
    /// D(ε): largest component diameter
    pub max_diameter: f64,
    /// I(ε): number of singleton components
    pub isolated_count: usize,
}

/// Evaluates ε-connectivity of one point set at arbitrary thresholds.
///
/// Borrows the tree and distance matrix; every call allocates its own
/// adjacency, visited set and queue, so steps are independent.
#[derive(Debug, Clone, Copy)]
pub struct ConnectivityStep<'a> {
    tree: &'a SpanningTree,
    distances: &'a DistanceMatrix,
}

impl<'a> ConnectivityStep<'a> {
    pub fn new(tree: &'a SpanningTree, distances: &'a DistanceMatrix) -> Result<Self> {
        if tree.n_points() != distances.len() {
            return Err(AnalysisError::invalid(format!(
                "spanning tree covers {} points but the distance matrix has {}",
                tree.n_points(),
                distances.len()
            )));
        }
        Ok(Self { tree, distances })
    }

    /// Number of points N
    pub fn n_points(&self) -> usize {
        self.distances.len()
    }

    /// Adjacency lists of the surviving edges, plus the number of cut edges.
    fn surviving_adjacency(&self, epsilon: f64) -> (Vec<Vec<usize>>, usize) {
        let mut adjacency = vec![Vec::new(); self.n_points()];
        let mut cut = 0;

        for edge in self.tree.edges() {
            if edge.weight <= epsilon {
                adjacency[edge.u].push(edge.v);
                adjacency[edge.v].push(edge.u);
            } else {
                cut += 1;
            }
        }

        (adjacency, cut)
    }

    /// Decompose all points into ε-components.
    pub fn components(&self, epsilon: f64) -> Components {
        let n = self.n_points();
        let (adjacency, cut_edges) = self.surviving_adjacency(epsilon);

        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        let mut members = Vec::with_capacity(cut_edges + 1);

        for seed in 0..n {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            queue.push_back(seed);

            let mut component = Vec::new();
            while let Some(v) = queue.pop_front() {
                component.push(v);
                for &w in &adjacency[v] {
                    if !visited[w] {
                        visited[w] = true;
                        queue.push_back(w);
                    }
                }
            }
            members.push(component);
        }

        debug_assert_eq!(
            members.len(),
            cut_edges + 1,
            "component count must be one more than the number of cut MST edges"
        );

        Components { members, cut_edges }
    }

    /// C(ε), D(ε) and I(ε) at one threshold.
    pub fn stats(&self, epsilon: f64) -> StepStats {
        let components = self.components(epsilon);

        let max_diameter = components
            .iter()
            .map(|c| self.distances.diameter_of(c))
            .fold(0.0, f64::max);

        let stats = StepStats {
            epsilon,
            component_count: components.count(),
            max_diameter,
            isolated_count: components.isolated_count(),
        };
        trace!("eps={:.6e}: {:?}", epsilon, stats);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PointCloud;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    struct Fixture {
        dm: DistanceMatrix,
        mst: SpanningTree,
    }

    impl Fixture {
        fn new(points: Array2<f64>) -> Self {
            let cloud = PointCloud::from_array(points).unwrap();
            let dm = DistanceMatrix::from_cloud(&cloud);
            let mst = SpanningTree::prim(&dm);
            Self { dm, mst }
        }

        fn step(&self) -> ConnectivityStep<'_> {
            ConnectivityStep::new(&self.mst, &self.dm).unwrap()
        }
    }

    fn random_cloud(n: usize, seed: u64) -> Array2<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        Array2::from_shape_fn((n, 2), |_| rng.random::<f64>())
    }

    #[test]
    fn test_unit_square() {
        let f = Fixture::new(array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
        let step = f.step();

        let at_zero = step.stats(0.0);
        assert_eq!(at_zero.component_count, 4);
        assert_eq!(at_zero.isolated_count, 4);
        assert_eq!(at_zero.max_diameter, 0.0);

        let at_one = step.stats(1.0);
        assert_eq!(at_one.component_count, 1);
        assert_eq!(at_one.isolated_count, 0);
        assert_relative_eq!(at_one.max_diameter, 2.0_f64.sqrt());
    }

    #[test]
    fn test_single_point() {
        let f = Fixture::new(array![[2.0, -1.0]]);
        let step = f.step();
        for eps in [0.0, 0.5, 100.0] {
            let s = step.stats(eps);
            assert_eq!(s.component_count, 1);
            assert_eq!(s.isolated_count, 1);
            assert_eq!(s.max_diameter, 0.0);
        }
    }

    #[test]
    fn test_two_clusters() {
        // Two tight pairs 10 apart
        let f = Fixture::new(array![[0.0, 0.0], [0.1, 0.0], [10.0, 0.0], [10.1, 0.0]]);
        let s = f.step().stats(0.5);
        assert_eq!(s.component_count, 2);
        assert_eq!(s.isolated_count, 0);
        assert_relative_eq!(s.max_diameter, 0.1, epsilon = 1e-12);

        let comps = f.step().components(0.5);
        assert_eq!(comps.sizes(), vec![2, 2]);
        assert_eq!(comps.cut_edges(), 1);
    }

    #[test]
    fn test_mismatched_inputs_rejected() {
        let a = Fixture::new(array![[0.0], [1.0]]);
        let b = Fixture::new(array![[0.0], [1.0], [2.0]]);
        assert!(ConnectivityStep::new(&a.mst, &b.dm).is_err());
    }

    #[test]
    fn test_below_min_edge_everything_isolated() {
        let f = Fixture::new(random_cloud(40, 7));
        let below = f.mst.min_edge_weight().unwrap() * 0.5;
        let s = f.step().stats(below);
        assert_eq!(s.component_count, 40);
        assert_eq!(s.isolated_count, 40);
        assert_eq!(s.max_diameter, 0.0);
    }

    #[test]
    fn test_above_max_edge_fully_connected() {
        let f = Fixture::new(random_cloud(40, 11));
        let s = f.step().stats(f.mst.max_edge_weight());
        assert_eq!(s.component_count, 1);
        assert!(s.isolated_count <= 1);
        assert_relative_eq!(s.max_diameter, f.dm.max());
    }

    #[test]
    fn test_invariants_over_threshold_sweep() {
        let f = Fixture::new(random_cloud(60, 3));
        let step = f.step();
        let n = step.n_points();
        let max_w = f.mst.max_edge_weight();

        let mut prev: Option<StepStats> = None;
        for k in 0..=50 {
            let eps = max_w * 1.1 * k as f64 / 50.0;
            let comps = step.components(eps);

            // Count identity
            assert_eq!(comps.count(), 1 + f.mst.count_longer_than(eps));

            // Partition: every point exactly once
            let mut seen = vec![0usize; n];
            for c in comps.iter() {
                for &v in c {
                    seen[v] += 1;
                }
            }
            assert!(seen.iter().all(|&c| c == 1));
            assert_eq!(comps.sizes().iter().sum::<usize>(), n);

            // Monotonicity
            let s = step.stats(eps);
            if let Some(p) = prev {
                assert!(s.component_count <= p.component_count);
                assert!(s.max_diameter >= p.max_diameter);
            }
            prev = Some(s);
        }
    }
}

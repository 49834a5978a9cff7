//! Minimum Spanning Tree via dense Prim
//!
//! The complete graph on N points is dense (N(N−1)/2 edges), so the
//! array-based Prim variant is optimal: keep, for every vertex outside the
//! tree, the cheapest known edge into the tree; repeatedly pull the cheapest
//! vertex in and relax its neighbours. O(N²) time, O(N) extra memory, no
//! priority queue.
//!
//! ## Determinism
//!
//! The tree grows from vertex 0. When several out-of-tree vertices share the
//! minimum connecting distance, the lowest index wins; a relaxation only
//! replaces a connection on a strict improvement. Edges are stored in the
//! order they were added.

use super::DistanceMatrix;

/// An undirected weighted edge between two distinct points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Endpoint already in the tree when the edge was added
    pub u: usize,
    /// Endpoint pulled into the tree by this edge
    pub v: usize,
    /// Euclidean length D[u][v]
    pub weight: f64,
}

/// Minimum spanning tree over all points: exactly max(N − 1, 0) edges.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    edges: Vec<Edge>,
    n_points: usize,
}

impl SpanningTree {
    /// Build the MST of the complete graph weighted by `distances`.
    pub fn prim(distances: &DistanceMatrix) -> Self {
        let n = distances.len();
        if n <= 1 {
            return Self { edges: Vec::new(), n_points: n };
        }

        let mut in_tree = vec![false; n];
        // Cheapest known connection into the tree and the tree vertex providing it
        let mut best = vec![f64::INFINITY; n];
        let mut parent = vec![0usize; n];
        let mut edges = Vec::with_capacity(n - 1);

        in_tree[0] = true;
        for v in 1..n {
            best[v] = distances.get(0, v);
        }

        for _ in 1..n {
            // Select the closest out-of-tree vertex, lowest index on ties
            let mut next = None;
            let mut next_dist = f64::INFINITY;
            for v in 0..n {
                if !in_tree[v] && (next.is_none() || best[v] < next_dist) {
                    next = Some(v);
                    next_dist = best[v];
                }
            }
            let Some(v) = next else { break };

            in_tree[v] = true;
            edges.push(Edge { u: parent[v], v, weight: next_dist });

            // Relax connections through the new tree vertex
            for w in 0..n {
                if !in_tree[w] {
                    let d = distances.get(v, w);
                    if d < best[w] {
                        best[w] = d;
                        parent[w] = v;
                    }
                }
            }
        }

        Self { edges, n_points: n }
    }

    /// Tree edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of points spanned
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Sum of edge weights
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Longest edge; beyond it every point is ε-connected (0 when empty)
    pub fn max_edge_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).fold(0.0, f64::max)
    }

    /// Shortest edge; below it every point is isolated
    pub fn min_edge_weight(&self) -> Option<f64> {
        self.edges.iter().map(|e| e.weight).reduce(f64::min)
    }

    /// Number of edges strictly longer than `epsilon`
    pub fn count_longer_than(&self, epsilon: f64) -> usize {
        self.edges.iter().filter(|e| e.weight > epsilon).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PointCloud;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn tree_of(points: ndarray::Array2<f64>) -> (DistanceMatrix, SpanningTree) {
        let cloud = PointCloud::from_array(points).unwrap();
        let dm = DistanceMatrix::from_cloud(&cloud);
        let mst = SpanningTree::prim(&dm);
        (dm, mst)
    }

    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            let p = parent[i];
            parent[i] = find(parent, p);
        }
        parent[i]
    }

    /// Minimum total weight over every spanning tree, by enumerating all
    /// (N − 1)-edge subsets of the complete graph.
    fn brute_force_min_weight(dm: &DistanceMatrix) -> f64 {
        let n = dm.len();
        let all: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        let m = all.len();
        let mut best = f64::INFINITY;

        for mask in 0u32..(1u32 << m) {
            if mask.count_ones() as usize != n - 1 {
                continue;
            }
            let mut parent: Vec<usize> = (0..n).collect();
            let mut weight = 0.0;
            let mut acyclic = true;
            for (k, &(i, j)) in all.iter().enumerate() {
                if mask & (1 << k) == 0 {
                    continue;
                }
                let ri = find(&mut parent, i);
                let rj = find(&mut parent, j);
                if ri == rj {
                    acyclic = false;
                    break;
                }
                parent[ri] = rj;
                weight += dm.get(i, j);
            }
            if acyclic {
                best = best.min(weight);
            }
        }
        best
    }

    #[test]
    fn test_single_point_has_no_edges() {
        let (_, mst) = tree_of(array![[0.5, 0.5]]);
        assert!(mst.edges().is_empty());
        assert_eq!(mst.n_points(), 1);
        assert_eq!(mst.max_edge_weight(), 0.0);
        assert_eq!(mst.min_edge_weight(), None);
    }

    #[test]
    fn test_collinear_chain() {
        let (_, mst) = tree_of(array![[0.0], [3.0], [1.0], [6.0]]);
        assert_eq!(mst.edges().len(), 3);
        assert_relative_eq!(mst.total_weight(), 6.0);
        assert_relative_eq!(mst.max_edge_weight(), 3.0);
        assert_eq!(mst.min_edge_weight(), Some(1.0));
        assert_eq!(mst.count_longer_than(2.5), 1);
    }

    #[test]
    fn test_ties_break_to_lowest_index() {
        // Vertices 1, 2, 3 are all at distance 1 from vertex 0
        let (_, mst) = tree_of(array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]]);
        let order: Vec<(usize, usize)> = mst.edges().iter().map(|e| (e.u, e.v)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_spanning_and_acyclic() {
        let (_, mst) = tree_of(array![
            [0.0, 0.0],
            [2.0, 1.0],
            [0.3, 4.0],
            [5.0, 5.0],
            [1.0, 1.0],
            [4.0, 0.2]
        ]);
        let n = mst.n_points();
        assert_eq!(mst.edges().len(), n - 1);

        let mut parent: Vec<usize> = (0..n).collect();
        for e in mst.edges() {
            assert_ne!(e.u, e.v);
            let ru = find(&mut parent, e.u);
            let rv = find(&mut parent, e.v);
            assert_ne!(ru, rv, "MST must be acyclic");
            parent[ru] = rv;
        }
        let root = find(&mut parent, 0);
        assert!((0..n).all(|i| find(&mut parent, i) == root));
    }

    #[test]
    fn test_matches_brute_force_on_small_clouds() {
        let clouds = vec![
            array![[0.0, 0.0], [1.0, 0.0]],
            array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.866]],
            array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
            array![[0.0, 0.0], [2.0, 1.0], [0.3, 4.0], [5.0, 5.0], [1.0, 1.0]],
            array![
                [0.1, 0.9],
                [0.4, 0.2],
                [0.8, 0.8],
                [0.3, 0.5],
                [0.9, 0.1],
                [0.55, 0.45]
            ],
            array![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [0.0, 2.0, 0.0], [3.0, 0.0, 1.0], [1.0, 0.0, 2.0], [2.0, 2.0, 2.0]],
        ];

        for points in clouds {
            let (dm, mst) = tree_of(points);
            let expected = brute_force_min_weight(&dm);
            assert_relative_eq!(mst.total_weight(), expected, epsilon = 1e-12);
        }
    }
}

//! Persistent Homology of the Vietoris-Rips Filtration
//!
//! A persistence interval [b, d) records a topological feature of dimension
//! k (component, loop, void, ...) that appears at scale b and disappears at
//! scale d. Features that never die have d = ∞.
//!
//! The scaling analysis consumes intervals only through the
//! [`PersistenceEngine`] trait. [`RipsPersistence`] is a self-contained
//! engine built on the standard algorithm:
//!
//! 1. Enumerate every simplex of VR(X) up to the top dimension whose edges
//!    are all ≤ max_scale; a simplex is born at its longest edge, rounded up
//!    to the filtration resolution
//! 2. Sort simplices by (birth, dimension, vertices)
//! 3. Reduce the boundary matrix over Z/2 by left-to-right column additions
//! 4. Read off (birth, death) pairs from the pivots; unpaired creators are
//!    essential
//!
//! The number of simplices grows as N^(top+1); intended for modest clouds.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::error::{AnalysisError, Result};
use crate::geometry::{DistanceMatrix, PointCloud};

/// A persistence interval [birth, death) in one homological dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistenceInterval {
    pub dimension: usize,
    pub birth: f64,
    pub death: f64,
}

impl PersistenceInterval {
    pub fn new(dimension: usize, birth: f64, death: f64) -> Self {
        Self { dimension, birth, death }
    }

    /// Lifetime d − b (infinite for essential features)
    pub fn persistence(&self) -> f64 {
        if self.death.is_infinite() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }

    /// Is this an essential feature (never dies)?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// Source of persistence intervals for a point cloud.
pub trait PersistenceEngine {
    /// Compute the intervals of the filtration of `cloud` up to `max_scale`.
    ///
    /// Simplices up to dimension `max_dimension` are built, so intervals are
    /// reported for dimensions `0..max_dimension`. Filtration values are
    /// resolved to multiples of `step`.
    fn intervals(
        &self,
        cloud: &PointCloud,
        max_scale: f64,
        max_dimension: usize,
        step: f64,
    ) -> Result<Vec<PersistenceInterval>>;
}

/// Exact Vietoris-Rips persistence via boundary-matrix reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RipsPersistence;

impl PersistenceEngine for RipsPersistence {
    fn intervals(
        &self,
        cloud: &PointCloud,
        max_scale: f64,
        max_dimension: usize,
        step: f64,
    ) -> Result<Vec<PersistenceInterval>> {
        if !max_scale.is_finite() || max_scale < 0.0 {
            return Err(AnalysisError::invalid(format!(
                "max_scale must be finite and non-negative, got {}",
                max_scale
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(AnalysisError::invalid(format!(
                "filtration step must be positive, got {}",
                step
            )));
        }
        if max_dimension < 1 {
            return Err(AnalysisError::invalid("max_dimension must be at least 1"));
        }

        let distances = DistanceMatrix::from_cloud(cloud);
        Ok(compute_rips_persistence(&distances, max_scale, max_dimension, step))
    }
}

/// Slack in grid units, absorbing round-off when snapping to the grid
const GRADE_TOLERANCE: f64 = 1e-9;

/// Grid index of a filtration value
fn grade(value: f64, step: f64) -> u64 {
    (value / step - GRADE_TOLERANCE).ceil().max(0.0) as u64
}

/// A simplex in the filtration with its grid birth
#[derive(Debug, Clone)]
struct FilteredSimplex {
    /// Vertex indices (sorted)
    vertices: Vec<usize>,
    /// Grid index of the filtration value where it appears
    grade: u64,
}

impl FilteredSimplex {
    fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }
}

/// Sparse column representation for boundary matrix
#[derive(Debug, Clone, Default)]
struct SparseColumn {
    rows: BTreeSet<usize>,
}

impl SparseColumn {
    fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lowest (maximum) non-zero row
    fn low(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    /// Toggle one entry - addition in Z/2Z
    fn toggle(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    fn add_assign(&mut self, other: &SparseColumn) {
        for &row in &other.rows {
            self.toggle(row);
        }
    }
}

/// Every clique of the threshold graph with at most `max_vertices` vertices.
struct CliqueCollector<'a> {
    distances: &'a DistanceMatrix,
    max_scale: f64,
    step: f64,
    max_vertices: usize,
    out: Vec<FilteredSimplex>,
}

impl CliqueCollector<'_> {
    fn extend(&mut self, clique: &mut Vec<usize>, birth: u64, candidates: &[usize]) {
        for (k, &w) in candidates.iter().enumerate() {
            let w_birth = clique
                .iter()
                .map(|&u| grade(self.distances.get(u, w), self.step))
                .fold(birth, u64::max);

            clique.push(w);
            self.out.push(FilteredSimplex {
                vertices: clique.clone(),
                grade: w_birth,
            });

            if clique.len() < self.max_vertices {
                let next: Vec<usize> = candidates[k + 1..]
                    .iter()
                    .copied()
                    .filter(|&x| self.distances.get(w, x) <= self.max_scale)
                    .collect();
                if !next.is_empty() {
                    self.extend(clique, w_birth, &next);
                }
            }
            clique.pop();
        }
    }
}

/// Persistence intervals of VR(X) for dimensions `0..max_dimension`.
pub fn compute_rips_persistence(
    distances: &DistanceMatrix,
    max_scale: f64,
    max_dimension: usize,
    step: f64,
) -> Vec<PersistenceInterval> {
    let n = distances.len();

    // Step 1: Build filtration (all simplices up to max_dimension)
    let mut collector = CliqueCollector {
        distances,
        max_scale,
        step,
        max_vertices: max_dimension + 1,
        out: Vec::new(),
    };
    for v in 0..n {
        collector.out.push(FilteredSimplex { vertices: vec![v], grade: 0 });
        let higher: Vec<usize> = (v + 1..n)
            .filter(|&w| distances.get(v, w) <= max_scale)
            .collect();
        if max_dimension >= 1 && !higher.is_empty() {
            let mut clique = vec![v];
            collector.extend(&mut clique, 0, &higher);
        }
    }
    let mut simplices = collector.out;

    // Step 2: Sort by (birth, dimension, lexicographic vertices)
    simplices.sort_by(|a, b| {
        a.grade
            .cmp(&b.grade)
            .then(a.dimension().cmp(&b.dimension()))
            .then(a.vertices.cmp(&b.vertices))
    });
    debug!("Rips filtration: {} simplices up to dimension {}", simplices.len(), max_dimension);

    let simplex_index: HashMap<&[usize], usize> = simplices
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.vertices.as_slice(), idx))
        .collect();

    // Step 3: Build and reduce boundary matrix
    let m = simplices.len();
    let mut columns: Vec<SparseColumn> = Vec::with_capacity(m);
    let mut low_to_col: HashMap<usize, usize> = HashMap::new();

    for (col_idx, simplex) in simplices.iter().enumerate() {
        let mut boundary = SparseColumn::default();

        if simplex.dimension() > 0 {
            // ∂[v0, ..., vk] = Σ [v0, ..., v̂i, ..., vk]
            for i in 0..simplex.vertices.len() {
                let mut face = simplex.vertices.clone();
                face.remove(i);
                if let Some(&face_idx) = simplex_index.get(face.as_slice()) {
                    boundary.toggle(face_idx);
                }
            }
        }

        while let Some(low_idx) = boundary.low() {
            match low_to_col.get(&low_idx) {
                Some(&pivot_col) => boundary.add_assign(&columns[pivot_col]),
                None => break,
            }
        }

        if let Some(low_idx) = boundary.low() {
            low_to_col.insert(low_idx, col_idx);
        }

        columns.push(boundary);
    }

    // Step 4: Extract persistence pairs
    let value = |g: u64| g as f64 * step;
    let mut intervals = Vec::new();
    let mut paired = vec![false; m];

    for (col_idx, column) in columns.iter().enumerate() {
        if let Some(low_idx) = column.low() {
            paired[low_idx] = true;
            paired[col_idx] = true;

            let birth = &simplices[low_idx];
            let death = &simplices[col_idx];
            if birth.dimension() < max_dimension && death.grade > birth.grade {
                intervals.push(PersistenceInterval::new(
                    birth.dimension(),
                    value(birth.grade),
                    value(death.grade),
                ));
            }
        }
    }

    // Essential features: unpaired creators below the top dimension
    for (idx, simplex) in simplices.iter().enumerate() {
        if !paired[idx] && columns[idx].is_zero() && simplex.dimension() < max_dimension {
            intervals.push(PersistenceInterval::new(
                simplex.dimension(),
                value(simplex.grade),
                f64::INFINITY,
            ));
        }
    }

    intervals
}

//! Filtration Summary: per-dimension statistics of a persistence diagram
//!
//! For every homological dimension k < max_d:
//! - number of features (components, holes, voids, ...)
//! - maximum lifetime
//! - average lifetime (NaN when no feature of that dimension exists)
//! - optionally, the number of features living at least a given threshold
//!
//! Essential features have infinite lifetime; they are counted with the
//! largest pairwise distance of the cloud as their lifetime, the scale at
//! which the filtration is complete.

use log::warn;

use super::persistence::{PersistenceEngine, PersistenceInterval};
use crate::error::Result;
use crate::geometry::{DistanceMatrix, PointCloud};

/// Highest simplex dimension built by default (features of dims 0, 1, 2)
pub const DEFAULT_MAX_DIMENSION: usize = 3;

/// Default filtration resolution
pub const DEFAULT_FILTRATION_STEP: f64 = 0.001;

/// Per-dimension feature statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct FiltrationResult {
    /// Number of features in each dimension
    pub counts: Vec<usize>,
    /// Longest lifetime in each dimension (0 when empty)
    pub max_lifetime: Vec<f64>,
    /// Mean lifetime in each dimension (NaN when empty)
    pub average_lifetime: Vec<f64>,
    /// Features with lifetime ≥ the relevance threshold, when one was set
    pub relevant_counts: Option<Vec<usize>>,
}

impl FiltrationResult {
    /// Number of tracked dimensions
    pub fn max_dimension(&self) -> usize {
        self.counts.len()
    }
}

/// Aggregates persistence intervals into a [`FiltrationResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct FiltrationSummary {
    max_dimension: usize,
    step: f64,
    relevance_threshold: Option<f64>,
}

impl Default for FiltrationSummary {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION)
    }
}

impl FiltrationSummary {
    pub fn new(max_dimension: usize) -> Self {
        Self {
            max_dimension,
            step: DEFAULT_FILTRATION_STEP,
            relevance_threshold: None,
        }
    }

    /// Resolution passed to the persistence engine
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Also count features living at least `threshold`
    pub fn with_relevance_threshold(mut self, threshold: f64) -> Self {
        self.relevance_threshold = Some(threshold);
        self
    }

    /// Summarise intervals; infinite lifetimes become `max_distance`.
    pub fn summarize(&self, intervals: &[PersistenceInterval], max_distance: f64) -> FiltrationResult {
        let dims = self.max_dimension;
        let mut counts = vec![0usize; dims];
        let mut max_lifetime = vec![0.0f64; dims];
        let mut total = vec![0.0f64; dims];
        let mut relevant = vec![0usize; dims];
        let mut dropped = 0usize;

        for interval in intervals {
            let k = interval.dimension;
            if k >= dims {
                dropped += 1;
                continue;
            }

            let lifetime = if interval.is_essential() {
                max_distance
            } else {
                interval.persistence()
            };

            counts[k] += 1;
            total[k] += lifetime;
            max_lifetime[k] = max_lifetime[k].max(lifetime);
            if self.relevance_threshold.is_some_and(|t| lifetime >= t) {
                relevant[k] += 1;
            }
        }

        if dropped > 0 {
            warn!(
                "ignored {} intervals of dimension >= {}",
                dropped, self.max_dimension
            );
        }

        let average_lifetime = total
            .iter()
            .zip(&counts)
            .map(|(&sum, &c)| sum / c as f64)
            .collect();

        FiltrationResult {
            counts,
            max_lifetime,
            average_lifetime,
            relevant_counts: self.relevance_threshold.map(|_| relevant),
        }
    }

    /// Run `engine` on `cloud` up to its largest pairwise distance and
    /// summarise the result.
    pub fn analyze<E: PersistenceEngine + ?Sized>(
        &self,
        cloud: &PointCloud,
        engine: &E,
    ) -> Result<FiltrationResult> {
        let max_distance = DistanceMatrix::from_cloud(cloud).max();
        let intervals = engine.intervals(cloud, max_distance, self.max_dimension, self.step)?;
        Ok(self.summarize(&intervals, max_distance))
    }
}

/// Filtration analysis with the default dimension (3) and step (0.001).
pub fn filtration_analysis<E: PersistenceEngine + ?Sized>(
    cloud: &PointCloud,
    engine: &E,
) -> Result<FiltrationResult> {
    FiltrationSummary::default().analyze(cloud, engine)
}

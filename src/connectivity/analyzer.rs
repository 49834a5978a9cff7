//! Scaling Analyzer: connectivity across scales and its power laws
//!
//! For a self-similar set of dimension d sampled densely enough, the
//! ε-connectivity statistics follow power laws over a range of scales:
//!
//!   C(ε) ~ ε^(−γ)        (number of ε-components)
//!   D(ε) ~ ε^(δ)         (largest ε-component diameter)
//!
//! The analyzer sweeps a series of thresholds over one shared distance
//! matrix and MST, tabulates C(ε), D(ε), I(ε) and optionally the k-distance
//! density ρ(ε), then fits γ and δ by least squares on the admissible rows.
//!
//! ## Admissible rows
//!
//! Two cutoffs are available:
//! - `IsolationCutoff`: use rows where fewer than a fraction (default 90%)
//!   of the points are isolated. Small ε, where almost every point is its
//!   own component, carries no scaling information.
//! - `UntilConnected`: use rows up to and including the first with C(ε) = 1.
//!   Larger ε adds nothing about the transition.
//!
//! With `LogLog` scale, γ is the slope of ln C against ln(1/ε) and δ the
//! slope of ln D against ln ε. With `Linear` scale, γ and δ are the raw
//! slopes of C and D against ε.

use std::path::Path;

use log::{debug, info, warn};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{ConnectivityStep, EpsilonSeries, KDistanceCurve, SimpleRegression};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::generators::JitterPadding;
use crate::geometry::{DistanceMatrix, PointCloud, SpanningTree};
use crate::io::read_point_cloud;

/// Default isolated-point fraction above which rows are excluded
pub const DEFAULT_MAX_ISOLATED_FRACTION: f64 = 0.9;

/// Which rows of the table feed the γ and δ regressions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Admissibility {
    /// Rows with I(ε) < fraction · N
    IsolationCutoff { max_isolated_fraction: f64 },
    /// Rows up to and including the first with C(ε) = 1
    UntilConnected,
}

impl Default for Admissibility {
    fn default() -> Self {
        Admissibility::IsolationCutoff {
            max_isolated_fraction: DEFAULT_MAX_ISOLATED_FRACTION,
        }
    }
}

impl Admissibility {
    pub fn validate(&self) -> Result<()> {
        if let Admissibility::IsolationCutoff { max_isolated_fraction } = *self {
            if !(max_isolated_fraction > 0.0 && max_isolated_fraction <= 1.0) {
                return Err(AnalysisError::invalid(format!(
                    "max_isolated_fraction must lie in (0, 1], got {}",
                    max_isolated_fraction
                )));
            }
        }
        Ok(())
    }

    /// Select the admissible rows of an ascending table.
    pub fn select<'r>(&self, rows: &'r [AnalysisRow], n_points: usize) -> Vec<&'r AnalysisRow> {
        match *self {
            Admissibility::IsolationCutoff { max_isolated_fraction } => {
                let limit = max_isolated_fraction * n_points as f64;
                rows.iter()
                    .filter(|r| (r.isolated_count as f64) < limit)
                    .collect()
            }
            Admissibility::UntilConnected => {
                let end = rows
                    .iter()
                    .position(|r| r.component_count == 1)
                    .map_or(rows.len(), |i| i + 1);
                rows[..end].iter().collect()
            }
        }
    }
}

/// Coordinates the γ/δ regressions are fitted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionScale {
    /// ln C vs ln(1/ε), ln D vs ln ε
    #[default]
    LogLog,
    /// C vs ε, D vs ε
    Linear,
}

/// Connectivity statistics at one threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisRow {
    pub epsilon: f64,
    /// C(ε)
    pub component_count: usize,
    /// D(ε)
    pub max_diameter: f64,
    /// I(ε)
    pub isolated_count: usize,
    /// ρ(ε), when the density curve was requested
    pub knn_density: Option<f64>,
}

/// Full outcome of a scaling analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingResult {
    /// One row per threshold, ascending ε
    pub rows: Vec<AnalysisRow>,
    /// Number of points analysed (after any padding)
    pub n_points: usize,
    /// Component-count exponent; `None` when undefined
    pub gamma: Option<f64>,
    /// Diameter exponent; `None` when undefined
    pub delta: Option<f64>,
    /// Slope of ρ(ε) against ε; `None` when not computed or undefined
    pub knn_exponent: Option<f64>,
    /// Rows that passed the admissibility rule
    pub admissible_rows: usize,
}

impl ScalingResult {
    /// Numeric table with columns [ε, C, D, I] plus ρ when present.
    pub fn to_matrix(&self) -> Array2<f64> {
        let with_knn = self.rows.iter().any(|r| r.knn_density.is_some());
        let cols = if with_knn { 5 } else { 4 };
        let mut table = Array2::<f64>::zeros((self.rows.len(), cols));

        for (i, row) in self.rows.iter().enumerate() {
            table[[i, 0]] = row.epsilon;
            table[[i, 1]] = row.component_count as f64;
            table[[i, 2]] = row.max_diameter;
            table[[i, 3]] = row.isolated_count as f64;
            if with_knn {
                table[[i, 4]] = row.knn_density.unwrap_or(f64::NAN);
            }
        }
        table
    }
}

/// Runs the multiscale connectivity analysis described by an
/// [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct ScalingAnalyzer {
    config: AnalysisConfig,
}

impl ScalingAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse a point cloud.
    pub fn analyze(&self, cloud: &PointCloud) -> Result<ScalingResult> {
        self.config.validate()?;

        let padded;
        let cloud = match &self.config.padding {
            Some(p) if cloud.len() < p.min_points => {
                padded = JitterPadding::new(p.min_points, p.sigma, p.seed).pad(cloud)?;
                info!("padded cloud from {} to {} points", cloud.len(), padded.len());
                &padded
            }
            _ => cloud,
        };

        info!(
            "scaling analysis: N={}, D={}, steps={}, epsilon={:?}",
            cloud.len(),
            cloud.dimension(),
            self.config.n_steps,
            self.config.epsilon
        );

        let distances = DistanceMatrix::from_cloud(cloud);
        self.run(&distances)
    }

    /// Analyse a precomputed distance matrix.
    pub fn analyze_distances(&self, distances: &DistanceMatrix) -> Result<ScalingResult> {
        self.config.validate()?;
        self.run(distances)
    }

    fn run(&self, distances: &DistanceMatrix) -> Result<ScalingResult> {
        let n = distances.len();
        let series = EpsilonSeries::from_policy(&self.config.epsilon, self.config.n_steps, distances)?;

        let tree = SpanningTree::prim(distances);
        debug!(
            "MST: {} edges, total weight {:.6}, longest {:.6}",
            tree.edges().len(),
            tree.total_weight(),
            tree.max_edge_weight()
        );

        let step = ConnectivityStep::new(&tree, distances)?;
        let density = self.config.knn_density.then(|| KDistanceCurve::new(distances));

        let rows: Vec<AnalysisRow> = series
            .iter()
            .map(|eps| {
                let stats = step.stats(eps);
                let row = AnalysisRow {
                    epsilon: eps,
                    component_count: stats.component_count,
                    max_diameter: stats.max_diameter,
                    isolated_count: stats.isolated_count,
                    knn_density: density.as_ref().map(|d| d.density(eps)),
                };
                debug!(
                    "eps={:.6e} C={} D={:.6e} I={}",
                    row.epsilon, row.component_count, row.max_diameter, row.isolated_count
                );
                row
            })
            .collect();

        let admissible = self.config.admissibility.select(&rows, n);
        let (gamma, delta) = fit_exponents(&admissible, self.config.scale);

        let knn_exponent = if self.config.knn_density {
            let mut reg = SimpleRegression::new();
            for row in &rows {
                if let Some(rho) = row.knn_density {
                    reg.add_finite(row.epsilon, rho);
                }
            }
            defined_slope(&reg, "k-distance")
        } else {
            None
        };

        info!(
            "gamma={:?} delta={:?} knn={:?} ({} of {} rows admissible)",
            gamma,
            delta,
            knn_exponent,
            admissible.len(),
            rows.len()
        );

        Ok(ScalingResult {
            admissible_rows: admissible.len(),
            rows,
            n_points: n,
            gamma,
            delta,
            knn_exponent,
        })
    }
}

/// Fit γ and δ over the admissible rows.
fn fit_exponents(rows: &[&AnalysisRow], scale: RegressionScale) -> (Option<f64>, Option<f64>) {
    let mut gamma_reg = SimpleRegression::new();
    let mut delta_reg = SimpleRegression::new();

    for row in rows {
        let eps = row.epsilon;
        let ce = row.component_count as f64;
        let de = row.max_diameter;
        match scale {
            RegressionScale::LogLog => {
                gamma_reg.add_finite((1.0 / eps).ln(), ce.ln());
                delta_reg.add_finite(eps.ln(), de.ln());
            }
            RegressionScale::Linear => {
                gamma_reg.add_finite(eps, ce);
                delta_reg.add_finite(eps, de);
            }
        }
    }

    (
        defined_slope(&gamma_reg, "gamma"),
        defined_slope(&delta_reg, "delta"),
    )
}

fn defined_slope(reg: &SimpleRegression, name: &str) -> Option<f64> {
    match reg.slope() {
        Ok(slope) => {
            if let (Ok(intercept), Ok(r2)) = (reg.intercept(), reg.r_squared()) {
                debug!(
                    "{} fit over {} points: slope {:.6}, intercept {:.6}, R² {:.4}",
                    name,
                    reg.len(),
                    slope,
                    intercept,
                    r2
                );
            }
            Some(slope)
        }
        Err(e) => {
            warn!("{} exponent undefined: {}", name, e);
            None
        }
    }
}

/// Analyse a point cloud file.
///
/// With both bounds given the thresholds are a base-2 exponential series
/// rescaled into [mineps, maxeps]; with neither they are derived from the
/// distance matrix.
pub fn analyze_file(
    path: &Path,
    mineps: Option<f64>,
    maxeps: Option<f64>,
    n_steps: usize,
) -> Result<ScalingResult> {
    let config = match (mineps, maxeps) {
        (Some(min), Some(max)) => AnalysisConfig::for_range(min, max, n_steps),
        (None, None) => AnalysisConfig::auto(n_steps),
        _ => {
            return Err(AnalysisError::invalid(
                "mineps and maxeps must be given together",
            ))
        }
    };
    config.validate()?;

    let cloud = read_point_cloud(path, &config.input)?;
    ScalingAnalyzer::new(config).analyze(&cloud)
}

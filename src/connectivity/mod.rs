//! Connectivity Module: ε-Components Across Scales
//!
//! Given the MST backbone of a point cloud, this module answers, for a whole
//! series of thresholds ε:
//! - C(ε): how many ε-connected components exist
//! - D(ε): how wide the widest of them is
//! - I(ε): how many points are still isolated
//!
//! and extracts the power-law exponents relating these quantities to ε.
//!
//! ## Pipeline
//!
//! ```text
//! PointCloud → DistanceMatrix → SpanningTree ─┐
//!                      │                      ├→ ConnectivityStep(ε) → AnalysisRow
//!                      └→ EpsilonSeries ──────┘                           │
//!                                                      SimpleRegression ←─┘ → ScalingResult
//! ```

mod epsilon;
mod components;
mod density;
mod regression;
mod analyzer;

pub use epsilon::{EpsilonPolicy, EpsilonSeries};
pub use components::{Components, ConnectivityStep, StepStats};
pub use density::KDistanceCurve;
pub use regression::SimpleRegression;
pub use analyzer::{
    analyze_file,
    Admissibility,
    AnalysisRow,
    RegressionScale,
    ScalingAnalyzer,
    ScalingResult,
    DEFAULT_MAX_ISOLATED_FRACTION,
};

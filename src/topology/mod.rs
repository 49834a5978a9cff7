//! Topology Module: Persistence Intervals and Their Summaries
//!
//! The connectivity analysis tracks only 0-dimensional structure
//! (components) along an ε-series. This module complements it with the full
//! persistence diagram of the Vietoris-Rips filtration VR_ε(X), summarised
//! per homological dimension:
//!
//! - `persistence.rs`: the `PersistenceEngine` seam and an exact
//!   boundary-matrix reduction engine
//! - `filtration.rs`: counts, maximum and average lifetimes per dimension

mod persistence;
mod filtration;

pub use persistence::{
    compute_rips_persistence,
    PersistenceEngine,
    PersistenceInterval,
    RipsPersistence,
};
pub use filtration::{
    filtration_analysis,
    FiltrationResult,
    FiltrationSummary,
    DEFAULT_FILTRATION_STEP,
    DEFAULT_MAX_DIMENSION,
};

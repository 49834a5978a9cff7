//! Error types shared by every stage of the analysis.
//!
//! Input problems are detected eagerly, at the start of the component that
//! owns them, and surfaced to the caller. No stage returns a partial result.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading data or running an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Empty cloud, inconsistent dimensionality, bad step count or range.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Not enough usable data for a numeric quantity to be defined.
    #[error("numerically degenerate: {0}")]
    NumericDegenerate(String),
    /// Reading an input file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A matrix field could not be parsed as a number.
    #[error("line {line}: cannot parse `{token}` as a number")]
    Parse { line: usize, token: String },
    /// A JSON configuration file could not be parsed.
    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

impl AnalysisError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        Self::NumericDegenerate(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

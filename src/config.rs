//! Run configuration, loadable from JSON
//!
//! ```json
//! {
//!   "input": { "delimiter": ",", "has_header": true },
//!   "n_steps": 30,
//!   "epsilon": { "kind": "exponential", "base": 2.0, "min": 1e-5, "max": 1.0 },
//!   "admissibility": { "kind": "isolation_cutoff", "max_isolated_fraction": 0.9 },
//!   "scale": "log_log",
//!   "knn_density": false,
//!   "padding": { "min_points": 200, "sigma": 1e-3, "seed": 1234 }
//! }
//! ```
//!
//! Every field is optional; omitted fields take the auto-range defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::connectivity::{Admissibility, EpsilonPolicy, RegressionScale};
use crate::error::{AnalysisError, Result};

/// How the input matrix file is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Field separator. Whitespace separators collapse runs of blanks.
    pub delimiter: char,
    /// Skip the first non-blank line.
    pub has_header: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ' ',
            has_header: false,
        }
    }
}

/// Jitter padding applied to clouds smaller than `min_points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddingConfig {
    pub min_points: usize,
    /// Standard deviation of the Gaussian jitter
    pub sigma: f64,
    pub seed: u64,
}

/// Full configuration of one scaling analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: InputConfig,
    /// Number of thresholds
    pub n_steps: usize,
    pub epsilon: EpsilonPolicy,
    /// Which rows enter the gamma/delta fits
    pub admissibility: Admissibility,
    /// Log-log or raw linear fits
    pub scale: RegressionScale,
    /// Compute the k-distance density column and its exponent
    pub knn_density: bool,
    pub padding: Option<PaddingConfig>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::auto(20)
    }
}

impl AnalysisConfig {
    /// Thresholds auto-derived from the distance matrix.
    ///
    /// Geometric spacing, fits stop at the first fully connected step, raw
    /// linear fits, k-distance curve enabled.
    pub fn auto(n_steps: usize) -> Self {
        Self {
            input: InputConfig::default(),
            n_steps,
            epsilon: EpsilonPolicy::Geometric,
            admissibility: Admissibility::UntilConnected,
            scale: RegressionScale::Linear,
            knn_density: true,
            padding: None,
        }
    }

    /// Caller-supplied range [min, max].
    ///
    /// Base-2 exponential spacing rescaled into the range, fits restricted to
    /// rows with fewer than 90% isolated points, log-log fits.
    pub fn for_range(min: f64, max: f64, n_steps: usize) -> Self {
        Self {
            input: InputConfig::default(),
            n_steps,
            epsilon: EpsilonPolicy::Exponential { base: 2.0, min, max },
            admissibility: Admissibility::default(),
            scale: RegressionScale::LogLog,
            knn_density: false,
            padding: None,
        }
    }

    /// Reject inconsistent settings before any data is touched.
    pub fn validate(&self) -> Result<()> {
        if self.n_steps < 1 {
            return Err(AnalysisError::invalid("n_steps must be at least 1"));
        }
        self.epsilon.validate()?;
        self.admissibility.validate()?;
        if let Some(padding) = &self.padding {
            if padding.min_points < 1 {
                return Err(AnalysisError::invalid("padding.min_points must be at least 1"));
            }
            if !padding.sigma.is_finite() || padding.sigma < 0.0 {
                return Err(AnalysisError::invalid(format!(
                    "padding.sigma must be finite and non-negative, got {}",
                    padding.sigma
                )));
            }
        }
        Ok(())
    }
}

/// Read and validate a JSON configuration file.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let data = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AnalysisConfig =
        serde_json::from_str(&data).map_err(|source| AnalysisError::Config {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.n_steps, 20);
        assert_eq!(config.epsilon, EpsilonPolicy::Geometric);
        assert_eq!(config.input.delimiter, ' ');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "input": { "delimiter": ",", "has_header": true },
            "n_steps": 30,
            "epsilon": { "kind": "linear", "min": 0.0, "max": 2.0 },
            "admissibility": { "kind": "isolation_cutoff", "max_isolated_fraction": 0.5 },
            "scale": "log_log",
            "knn_density": false,
            "padding": { "min_points": 50, "sigma": 0.01, "seed": 9 }
        }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.input.delimiter, ',');
        assert!(config.input.has_header);
        assert_eq!(config.n_steps, 30);
        assert_eq!(config.epsilon, EpsilonPolicy::Linear { min: 0.0, max: 2.0 });
        assert_eq!(
            config.admissibility,
            Admissibility::IsolationCutoff { max_isolated_fraction: 0.5 }
        );
        assert_eq!(config.scale, RegressionScale::LogLog);
        assert_eq!(config.padding.as_ref().map(|p| p.min_points), Some(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AnalysisConfig::auto(0);
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidInput(_))));

        config = AnalysisConfig::for_range(1.0, 0.1, 10);
        assert!(config.validate().is_err());

        config = AnalysisConfig::auto(10);
        config.admissibility = Admissibility::IsolationCutoff { max_isolated_fraction: 1.5 };
        assert!(config.validate().is_err());

        config = AnalysisConfig::auto(10);
        config.padding = Some(PaddingConfig { min_points: 10, sigma: -1.0, seed: 0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/analysis.json")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn test_load_config_from_disk() {
        let path = std::env::temp_dir().join(format!("tda_multiscale_cfg_{}.json", std::process::id()));
        fs::write(&path, r#"{ "n_steps": 12, "scale": "linear" }"#).unwrap();
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.n_steps, 12);
        assert_eq!(config.scale, RegressionScale::Linear);

        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }
}

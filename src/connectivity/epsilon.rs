//! Epsilon Series: the thresholds at which connectivity is sampled
//!
//! Three spacing policies are supported:
//!
//! - **Exponential**: `base^i` for i = 0..n−1, affinely mapped onto
//!   [ε_min, ε_max]. Dense near ε_min, sparse near ε_max.
//! - **Linear**: evenly spaced over [ε_min, ε_max].
//! - **Geometric**: evenly spaced in log ε, with ε_min and ε_max taken from
//!   the smallest strictly positive and the largest pairwise distance. Taking
//!   logs of this series gives evenly spaced abscissae for the log-log fits.
//!
//! Every series is non-decreasing, starts exactly at ε_min and (for n ≥ 2)
//! ends exactly at ε_max. A one-step series is the single value ε_min.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::geometry::DistanceMatrix;

/// How the thresholds of a run are spaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EpsilonPolicy {
    /// `base^i`, rescaled into [min, max]
    Exponential { base: f64, min: f64, max: f64 },
    /// Evenly spaced over [min, max]
    Linear { min: f64, max: f64 },
    /// Log-spaced between the smallest positive and the largest distance
    #[default]
    Geometric,
}

impl EpsilonPolicy {
    /// Check the policy parameters without needing any data.
    pub fn validate(&self) -> Result<()> {
        match *self {
            EpsilonPolicy::Exponential { base, min, max } => {
                if !base.is_finite() || base <= 0.0 || base == 1.0 {
                    return Err(AnalysisError::invalid(format!(
                        "exponential base must be positive and different from 1, got {}",
                        base
                    )));
                }
                check_range(min, max)
            }
            EpsilonPolicy::Linear { min, max } => check_range(min, max),
            EpsilonPolicy::Geometric => Ok(()),
        }
    }
}

/// Ordered, non-decreasing sequence of thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonSeries {
    values: Vec<f64>,
}

fn check_steps(n_steps: usize) -> Result<()> {
    if n_steps < 1 {
        return Err(AnalysisError::invalid("epsilon series needs at least one step"));
    }
    Ok(())
}

fn check_range(min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(AnalysisError::invalid(format!(
            "epsilon range [{}, {}] must be finite, non-negative and ordered",
            min, max
        )));
    }
    Ok(())
}

impl EpsilonSeries {
    /// Exponential series `base^i` linearly rescaled into [min, max].
    pub fn exponential(base: f64, n_steps: usize, min: f64, max: f64) -> Result<Self> {
        check_steps(n_steps)?;
        EpsilonPolicy::Exponential { base, min, max }.validate()?;

        if n_steps == 1 {
            return Ok(Self { values: vec![min] });
        }

        let last = (n_steps - 1) as f64;
        let span = max - min;

        // Fraction of the way from base^0 to base^last, normalised so that
        // long series with base > 1 never overflow.
        let fraction = |i: usize| -> f64 {
            let i = i as f64;
            if base > 1.0 {
                let floor = base.powf(-last);
                (base.powf(i - last) - floor) / (1.0 - floor)
            } else {
                (1.0 - base.powf(i)) / (1.0 - base.powf(last))
            }
        };

        let mut values: Vec<f64> = (0..n_steps).map(|i| min + fraction(i) * span).collect();
        values[0] = min;
        values[n_steps - 1] = max;
        Ok(Self { values })
    }

    /// Evenly spaced series over [min, max].
    pub fn linear(min: f64, max: f64, n_steps: usize) -> Result<Self> {
        check_steps(n_steps)?;
        check_range(min, max)?;

        if n_steps == 1 {
            return Ok(Self { values: vec![min] });
        }

        let step = (max - min) / (n_steps - 1) as f64;
        let mut values: Vec<f64> = (0..n_steps).map(|i| min + step * i as f64).collect();
        values[n_steps - 1] = max;
        Ok(Self { values })
    }

    /// Log-spaced series over [min, max]; `min` must be strictly positive.
    pub fn geometric(min: f64, max: f64, n_steps: usize) -> Result<Self> {
        check_steps(n_steps)?;
        check_range(min, max)?;
        if min <= 0.0 {
            return Err(AnalysisError::invalid(format!(
                "geometric spacing needs a positive lower bound, got {}",
                min
            )));
        }

        if n_steps == 1 {
            return Ok(Self { values: vec![min] });
        }

        let (ln_min, ln_max) = (min.ln(), max.ln());
        let step = (ln_max - ln_min) / (n_steps - 1) as f64;
        let mut values: Vec<f64> = (0..n_steps)
            .map(|i| (ln_min + step * i as f64).exp())
            .collect();
        values[0] = min;
        values[n_steps - 1] = max;
        Ok(Self { values })
    }

    /// Geometric series spanning the observed distance scales.
    ///
    /// Fails with `NumericDegenerate` when no pair of points is distinct
    /// (a single point, or duplicates only).
    pub fn from_distances(distances: &DistanceMatrix, n_steps: usize) -> Result<Self> {
        check_steps(n_steps)?;
        let min = distances.min_positive().ok_or_else(|| {
            AnalysisError::degenerate(
                "all pairwise distances are zero, cannot derive an epsilon range",
            )
        })?;
        Self::geometric(min, distances.max(), n_steps)
    }

    /// Build the series a policy describes.
    pub fn from_policy(
        policy: &EpsilonPolicy,
        n_steps: usize,
        distances: &DistanceMatrix,
    ) -> Result<Self> {
        match *policy {
            EpsilonPolicy::Exponential { base, min, max } => {
                Self::exponential(base, n_steps, min, max)
            }
            EpsilonPolicy::Linear { min, max } => Self::linear(min, max, n_steps),
            EpsilonPolicy::Geometric => Self::from_distances(distances, n_steps),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PointCloud;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn non_decreasing(values: &[f64]) -> bool {
        values.windows(2).all(|w| w[0] <= w[1])
    }

    #[test]
    fn test_linear_series() {
        let s = EpsilonSeries::linear(0.0, 1.0, 5).unwrap();
        assert_eq!(s.len(), 5);
        assert_relative_eq!(s.values()[1], 0.25);
        assert_eq!(s.values()[0], 0.0);
        assert_eq!(s.values()[4], 1.0);
    }

    #[test]
    fn test_exponential_series_shape() {
        // 2^0..2^3 = 1, 2, 4, 8 mapped onto [0, 7]: 0, 1, 3, 7
        let s = EpsilonSeries::exponential(2.0, 4, 0.0, 7.0).unwrap();
        let expected = [0.0, 1.0, 3.0, 7.0];
        for (v, e) in s.iter().zip(expected) {
            assert_relative_eq!(v, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_exponential_series_long_does_not_overflow() {
        let s = EpsilonSeries::exponential(2.0, 2000, 1e-5, 1.0).unwrap();
        assert!(s.iter().all(f64::is_finite));
        assert!(non_decreasing(s.values()));
        assert_eq!(s.values()[0], 1e-5);
        assert_eq!(s.values()[1999], 1.0);
    }

    #[test]
    fn test_exponential_base_below_one() {
        let s = EpsilonSeries::exponential(0.5, 6, 1.0, 2.0).unwrap();
        assert!(non_decreasing(s.values()));
        assert_eq!(s.values()[0], 1.0);
        assert_eq!(s.values()[5], 2.0);
    }

    #[test]
    fn test_geometric_series() {
        let s = EpsilonSeries::geometric(0.01, 1.0, 3).unwrap();
        assert_relative_eq!(s.values()[1], 0.1, epsilon = 1e-12);
        assert_eq!(s.values()[0], 0.01);
        assert_eq!(s.values()[2], 1.0);
    }

    #[test]
    fn test_single_step() {
        assert_eq!(EpsilonSeries::linear(0.2, 0.8, 1).unwrap().values(), &[0.2]);
        assert_eq!(EpsilonSeries::exponential(2.0, 1, 0.2, 0.8).unwrap().values(), &[0.2]);
        assert_eq!(EpsilonSeries::geometric(0.2, 0.8, 1).unwrap().values(), &[0.2]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            EpsilonSeries::linear(0.0, 1.0, 0),
            Err(AnalysisError::InvalidInput(_))
        ));
        assert!(EpsilonSeries::linear(1.0, 0.5, 4).is_err());
        assert!(EpsilonSeries::linear(-1.0, 0.5, 4).is_err());
        assert!(EpsilonSeries::exponential(1.0, 4, 0.0, 1.0).is_err());
        assert!(EpsilonSeries::exponential(-2.0, 4, 0.0, 1.0).is_err());
        assert!(EpsilonSeries::geometric(0.0, 1.0, 4).is_err());
    }

    #[test]
    fn test_from_distances() {
        let cloud = PointCloud::from_array(array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
        let dm = DistanceMatrix::from_cloud(&cloud);
        let s = EpsilonSeries::from_distances(&dm, 10).unwrap();
        assert_eq!(s.len(), 10);
        assert_eq!(s.values()[0], 1.0);
        assert_eq!(s.values()[9], 2.0_f64.sqrt());
        assert!(non_decreasing(s.values()));
    }

    #[test]
    fn test_from_distances_degenerate() {
        let cloud = PointCloud::from_array(array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]).unwrap();
        let dm = DistanceMatrix::from_cloud(&cloud);
        assert!(matches!(
            EpsilonSeries::from_distances(&dm, 10),
            Err(AnalysisError::NumericDegenerate(_))
        ));
        assert!(matches!(
            EpsilonSeries::from_distances(&dm, 0),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_policy_serde() {
        let policy: EpsilonPolicy =
            serde_json::from_str(r#"{"kind":"exponential","base":2.0,"min":1e-5,"max":1.0}"#).unwrap();
        assert_eq!(policy, EpsilonPolicy::Exponential { base: 2.0, min: 1e-5, max: 1.0 });
        let policy: EpsilonPolicy = serde_json::from_str(r#"{"kind":"geometric"}"#).unwrap();
        assert_eq!(policy, EpsilonPolicy::Geometric);
    }
}

//! Single-Variable Ordinary Least Squares
//!
//! Accumulates (x, y) observations with running means and centred sums
//! (Welford-style updates), so adding points never requires a second pass
//! and large offsets do not cancel catastrophically.
//!
//!   slope = Σ(x − x̄)(y − ȳ) / Σ(x − x̄)²

use crate::error::{AnalysisError, Result};

/// Incremental simple linear regression y = a + b·x.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleRegression {
    n: usize,
    x_mean: f64,
    y_mean: f64,
    /// Σ(x − x̄)²
    sxx: f64,
    /// Σ(y − ȳ)²
    syy: f64,
    /// Σ(x − x̄)(y − ȳ)
    sxy: f64,
}

impl SimpleRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    pub fn add(&mut self, x: f64, y: f64) {
        self.n += 1;
        let n = self.n as f64;
        let dx = x - self.x_mean;
        let dy = y - self.y_mean;
        self.sxx += dx * dx * (n - 1.0) / n;
        self.syy += dy * dy * (n - 1.0) / n;
        self.sxy += dx * dy * (n - 1.0) / n;
        self.x_mean += dx / n;
        self.y_mean += dy / n;
    }

    /// Add an observation only if both coordinates are finite.
    ///
    /// Returns whether the point was used.
    pub fn add_finite(&mut self, x: f64, y: f64) -> bool {
        if x.is_finite() && y.is_finite() {
            self.add(x, y);
            true
        } else {
            false
        }
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Least-squares slope b.
    ///
    /// Undefined (`NumericDegenerate`) with fewer than two observations or
    /// when every x is identical.
    pub fn slope(&self) -> Result<f64> {
        if self.n < 2 {
            return Err(AnalysisError::degenerate(format!(
                "regression needs at least 2 points, got {}",
                self.n
            )));
        }
        if self.sxx <= 0.0 {
            return Err(AnalysisError::degenerate(
                "regression abscissae have zero variance",
            ));
        }
        Ok(self.sxy / self.sxx)
    }

    /// Least-squares intercept a.
    pub fn intercept(&self) -> Result<f64> {
        let slope = self.slope()?;
        Ok(self.y_mean - slope * self.x_mean)
    }

    /// Coefficient of determination R² (1 when y is constant).
    pub fn r_squared(&self) -> Result<f64> {
        let slope = self.slope()?;
        if self.syy <= 0.0 {
            return Ok(1.0);
        }
        Ok((slope * self.sxy / self.syy).clamp(0.0, 1.0))
    }
}

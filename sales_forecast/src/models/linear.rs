//! Ordinary linear regression

use crate::error::{ForecastError, Result};
use crate::features::FEATURE_COUNT;
use serde::Deserialize;

/// `intercept + coefficients · x`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LinearRegression {
    pub(crate) feature_names: Vec<String>,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegression {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ForecastError::ArtifactError(format!(
                "Linear model has {} coefficients, expected {}",
                self.coefficients.len(),
                FEATURE_COUNT
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ForecastError::ArtifactError(
                "Linear model parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn predict_one(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x.iter())
                .map(|(w, v)| w * v)
                .sum::<f64>()
    }
}

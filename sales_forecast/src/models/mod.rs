//! Pre-trained quantity regressors

use crate::error::{ForecastError, Result};
use crate::features::{FeatureRow, FEATURE_COLUMNS, FEATURE_COUNT};
use serde::Deserialize;
use std::fmt::Debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

mod linear;
mod tree_ensemble;

use linear::LinearRegression;
use tree_ensemble::{GradientBoosting, RandomForest};

/// Anything that maps feature rows to predicted quantities
pub trait Predictor: Debug {
    /// Predict one quantity per row, in row order
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// A model artifact as exported by the training pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelArtifact {
    Linear(LinearRegression),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
}

impl ModelArtifact {
    fn feature_names(&self) -> &[String] {
        match self {
            ModelArtifact::Linear(m) => &m.feature_names,
            ModelArtifact::RandomForest(m) => &m.feature_names,
            ModelArtifact::GradientBoosting(m) => &m.feature_names,
        }
    }

    fn validate(&self) -> Result<()> {
        check_feature_names(self.feature_names())?;
        match self {
            ModelArtifact::Linear(m) => m.validate(),
            ModelArtifact::RandomForest(m) => m.validate(),
            ModelArtifact::GradientBoosting(m) => m.validate(),
        }
    }
}

/// A validated pre-trained regressor.
///
/// Only obtainable through the loaders or `Deserialize`, both of which check
/// the feature schema and the tree structure, so prediction never walks a
/// malformed tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ModelArtifact")]
pub struct RegressionModel {
    artifact: ModelArtifact,
}

impl TryFrom<ModelArtifact> for RegressionModel {
    type Error = ForecastError;

    fn try_from(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }
}

impl RegressionModel {
    /// Load and validate a JSON model artifact
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        let model = Self::try_from(artifact)?;
        info!(path = %path.display(), model = model.name(), "loaded regression model");
        Ok(model)
    }

    /// Parse and validate a model from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::try_from(artifact)
    }

    fn predict_one(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        match &self.artifact {
            ModelArtifact::Linear(m) => m.predict_one(x),
            ModelArtifact::RandomForest(m) => m.predict_one(x),
            ModelArtifact::GradientBoosting(m) => m.predict_one(x),
        }
    }
}

impl Predictor for RegressionModel {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        Ok(rows
            .iter()
            .map(|row| self.predict_one(&row.to_vector()))
            .collect())
    }

    fn name(&self) -> &str {
        match &self.artifact {
            ModelArtifact::Linear(_) => "linear regression",
            ModelArtifact::RandomForest(_) => "random forest",
            ModelArtifact::GradientBoosting(_) => "gradient boosting",
        }
    }
}

/// The artifact must have been trained on exactly our column order
fn check_feature_names(names: &[String]) -> Result<()> {
    let matches = names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_COLUMNS.iter()).all(|(a, b)| a == b);
    if !matches {
        return Err(ForecastError::ArtifactError(format!(
            "Model features {:?} do not match expected columns {:?}",
            names, FEATURE_COLUMNS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_schema_mismatch() {
        let json = r#"{
            "kind": "linear",
            "feature_names": ["is_weekend", "dayofweek", "bulan", "tahun", "Merk",
                              "Kategori ID", "Metode Penjualan", "Harga Jual", "Diskon"],
            "intercept": 0.0,
            "coefficients": [0, 0, 0, 0, 0, 0, 0, 0, 0]
        }"#;
        assert!(matches!(
            RegressionModel::from_json_str(json),
            Err(ForecastError::ArtifactError(_))
        ));
    }

    #[test]
    fn test_unknown_kind() {
        let json = r#"{"kind": "svm", "feature_names": []}"#;
        assert!(matches!(
            RegressionModel::from_json_str(json),
            Err(ForecastError::JsonError(_))
        ));
    }
}

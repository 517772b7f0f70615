//! Tree ensembles stored as flat node arrays

use crate::error::{ForecastError, Result};
use crate::features::FEATURE_COUNT;
use serde::Deserialize;

/// Marker for "no child" in `children_left`/`children_right`
const LEAF: i64 = -1;

/// A binary regression tree in array form.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise a sample goes
/// left when `x[feature[i]] <= threshold[i]`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DecisionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
}

impl DecisionTree {
    pub(crate) fn validate(&self) -> Result<()> {
        let n = self.value.len();
        if n == 0 {
            return Err(ForecastError::ArtifactError("Tree has no nodes".to_string()));
        }
        if self.children_left.len() != n
            || self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
        {
            return Err(ForecastError::ArtifactError(
                "Tree node arrays have different lengths".to_string(),
            ));
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                if right != LEAF {
                    return Err(ForecastError::ArtifactError(format!(
                        "Node {} has a right child but no left child",
                        node
                    )));
                }
                continue;
            }

            // Children after their parent means every walk terminates
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ForecastError::ArtifactError(format!(
                        "Node {} has out-of-order child {}",
                        node, child
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature >= FEATURE_COUNT as i64 {
                return Err(ForecastError::ArtifactError(format!(
                    "Node {} splits on unknown feature {}",
                    node, feature
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn predict_one(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut node = 0;
        loop {
            let left = self.children_left[node];
            if left == LEAF {
                return self.value[node];
            }
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// Averages the output of its trees
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RandomForest {
    pub(crate) feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(ForecastError::ArtifactError(
                "Random forest has no trees".to_string(),
            ));
        }
        self.trees.iter().try_for_each(DecisionTree::validate)
    }

    pub(crate) fn predict_one(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_one(x)).sum();
        sum / self.trees.len() as f64
    }
}

/// `init + learning_rate * sum(trees)`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GradientBoosting {
    pub(crate) feature_names: Vec<String>,
    init: f64,
    learning_rate: f64,
    trees: Vec<DecisionTree>,
}

impl GradientBoosting {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ForecastError::ArtifactError(format!(
                "Learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        self.trees.iter().try_for_each(DecisionTree::validate)
    }

    pub(crate) fn predict_one(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict_one(x)).sum();
        self.init + self.learning_rate * sum
    }
}

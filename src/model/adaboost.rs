//! AdaBoost regression ensemble, inference only
//!
//! Weak learners are regression stumps; the ensemble prediction is the
//! weighted median of the stump outputs, matching the boosted-regressor
//! artifacts this crate consumes.

use crate::error::{Result, TankhouseError};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// A single regression stump: splits on one feature at one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stump {
    pub feature_index: usize,
    pub threshold: f64,
    /// Prediction when feature <= threshold
    pub left_value: f64,
    /// Prediction when feature > threshold
    pub right_value: f64,
}

impl Stump {
    fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        if row[self.feature_index] <= self.threshold {
            self.left_value
        } else {
            self.right_value
        }
    }
}

/// Boosted stump ensemble with per-stump weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaBoostRegressor {
    n_features: usize,
    stumps: Vec<Stump>,
    /// One weight per stump, accumulated during boosting.
    weights: Vec<f64>,
}

impl AdaBoostRegressor {
    pub fn new(n_features: usize, stumps: Vec<Stump>, weights: Vec<f64>) -> Self {
        Self {
            n_features,
            stumps,
            weights,
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_estimators(&self) -> usize {
        self.stumps.len()
    }

    /// Structural sanity of a decoded artifact.
    pub fn validate(&self) -> Result<()> {
        if self.n_features == 0 {
            return Err(TankhouseError::Serialization(
                "ensemble declares zero features".to_string(),
            ));
        }
        if self.stumps.is_empty() {
            return Err(TankhouseError::Serialization(
                "ensemble has no estimators".to_string(),
            ));
        }
        if self.stumps.len() != self.weights.len() {
            return Err(TankhouseError::Serialization(format!(
                "estimator/weight count mismatch: {} vs {}",
                self.stumps.len(),
                self.weights.len()
            )));
        }
        if let Some(stump) = self.stumps.iter().find(|s| s.feature_index >= self.n_features) {
            return Err(TankhouseError::Serialization(format!(
                "stump splits on feature {} but the ensemble takes {}",
                stump.feature_index, self.n_features
            )));
        }
        Ok(())
    }

    /// Weighted median: sort stump outputs, walk the weight cumulative
    /// sum, take the first output at or past half the total weight.
    fn weighted_median(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut pairs: Vec<(f64, f64)> = self
            .stumps
            .iter()
            .zip(self.weights.iter())
            .map(|(s, &w)| (s.predict_row(row), w))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let total: f64 = pairs.iter().map(|(_, w)| w).sum();
        let mut cum = 0.0;
        for &(pred, w) in &pairs {
            cum += w;
            if cum >= 0.5 * total {
                return pred;
            }
        }
        pairs.last().map(|(pred, _)| *pred).unwrap_or(0.0)
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features {
            return Err(TankhouseError::Inference(format!(
                "model takes {} feature(s), input has {}",
                self.n_features,
                x.ncols()
            )));
        }
        Ok(Array1::from_vec(
            x.rows()
                .into_iter()
                .map(|row| self.weighted_median(row))
                .collect(),
        ))
    }
}

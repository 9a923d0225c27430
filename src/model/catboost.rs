//! CatBoost-style gradient boosted oblivious trees, inference only
//!
//! Symmetric (oblivious) decision trees: all nodes at the same depth use
//! the same split, so a tree is fully described by one (feature,
//! threshold) pair per level plus its leaf values. This module only
//! evaluates ensembles that were trained elsewhere.

use crate::error::{Result, TankhouseError};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Symmetric (oblivious) tree: each level uses the same split feature +
/// threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetricTree {
    /// (feature, threshold) per level
    pub splits: Vec<(usize, f64)>,
    /// 2^depth leaf values
    pub leaf_values: Vec<f64>,
}

impl SymmetricTree {
    /// Walk the splits; split indices must be below the ensemble width.
    fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut idx = 0usize;
        for &(feature, threshold) in &self.splits {
            idx = idx * 2 + usize::from(row[feature] > threshold);
        }
        self.leaf_values[idx.min(self.leaf_values.len() - 1)]
    }
}

/// Boosted ensemble of symmetric trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatBoostRegressor {
    n_features: usize,
    learning_rate: f64,
    base_prediction: f64,
    trees: Vec<SymmetricTree>,
}

impl CatBoostRegressor {
    pub fn new(
        n_features: usize,
        learning_rate: f64,
        base_prediction: f64,
        trees: Vec<SymmetricTree>,
    ) -> Self {
        Self {
            n_features,
            learning_rate,
            base_prediction,
            trees,
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Structural sanity of a decoded artifact: every split must stay
    /// inside the declared feature width and every tree must have leaves.
    pub fn validate(&self) -> Result<()> {
        if self.n_features == 0 {
            return Err(TankhouseError::Serialization(
                "ensemble declares zero features".to_string(),
            ));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if tree.leaf_values.is_empty() {
                return Err(TankhouseError::Serialization(format!(
                    "tree {i} has no leaf values"
                )));
            }
            if let Some(&(feature, _)) =
                tree.splits.iter().find(|(f, _)| *f >= self.n_features)
            {
                return Err(TankhouseError::Serialization(format!(
                    "tree {i} splits on feature {feature} but the ensemble takes {}",
                    self.n_features
                )));
            }
        }
        Ok(())
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
                .map(|row| {
                    self.base_prediction
                        + self
                            .trees
                            .iter()
                            .map(|t| self.learning_rate * t.predict_row(row))
                            .sum::<f64>()
                })
                .collect(),
        ))
    }
}

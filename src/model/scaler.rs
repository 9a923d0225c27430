//! Standard (z-score) feature scaling, inference only
//!
//! Holds the per-feature centering and scaling terms of an already
//! fitted scaler; this crate never fits one.

use crate::error::{Result, TankhouseError};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Fitted standard scaler: forward transform `(x - mean) / scale`,
/// inverse transform `x * scale + mean`, column-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Scaler that leaves all values unchanged (mean 0, scale 1).
    pub fn identity(n_features: usize) -> Self {
        Self {
            mean: vec![0.0; n_features],
            scale: vec![1.0; n_features],
        }
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Structural sanity of a decoded artifact.
    pub fn validate(&self) -> Result<()> {
        if self.mean.len() != self.scale.len() {
            return Err(TankhouseError::Serialization(format!(
                "scaler mean/scale length mismatch: {} vs {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.mean.is_empty() {
            return Err(TankhouseError::Serialization(
                "scaler has no features".to_string(),
            ));
        }
        if let Some(s) = self.scale.iter().find(|s| !s.is_finite() || **s == 0.0) {
            return Err(TankhouseError::Serialization(format!(
                "scaler has invalid scale factor {s}"
            )));
        }
        Ok(())
    }

    fn check_width(&self, got: usize) -> Result<()> {
        if got != self.mean.len() {
            return Err(TankhouseError::Inference(format!(
                "scaler was fitted on {} feature(s), input has {got}",
                self.mean.len()
            )));
        }
        Ok(())
    }

    /// Apply the forward transform column-wise.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(x.ncols())?;
        let mut out = x.clone();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            let (mean, scale) = (self.mean[j], self.scale[j]);
            col.mapv_inplace(|v| (v - mean) / scale);
        }
        Ok(out)
    }

    /// Undo the transform, mapping scaled values back to physical units.
    pub fn inverse_transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(x.ncols())?;
        let mut out = x.clone();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            let (mean, scale) = (self.mean[j], self.scale[j]);
            col.mapv_inplace(|v| v * scale + mean);
        }
        Ok(out)
    }
}

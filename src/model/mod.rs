//! Model artifacts and loading
//!
//! Provides everything between the serialized artifacts on disk and a
//! callable model:
//! - Estimator implementations (boosted oblivious trees, AdaBoost
//!   stumps, standard scaler), inference only
//! - The native binary and portable JSON artifact formats
//! - The per-type bundle loader with per-slot degradation

mod adaboost;
mod catboost;
mod format;
mod loader;
mod scaler;

pub use adaboost::{AdaBoostRegressor, Stump};
pub use catboost::{CatBoostRegressor, SymmetricTree};
pub use format::{load_native, load_portable, save_native, save_portable, Estimator};
pub use loader::{load_bundle, BundleSlot, ModelBundle};
pub use scaler::StandardScaler;

use crate::error::Result;
use ndarray::{Array1, Array2};

/// Capability interface shared by every model backend: given a feature
/// matrix, produce one output per row.
pub trait Regressor: Send + Sync {
    /// Make predictions
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Feature width the model was fitted on
    fn n_features(&self) -> usize;
}

impl Regressor for CatBoostRegressor {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        CatBoostRegressor::predict(self, x)
    }

    fn n_features(&self) -> usize {
        CatBoostRegressor::n_features(self)
    }
}

impl Regressor for AdaBoostRegressor {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        AdaBoostRegressor::predict(self, x)
    }

    fn n_features(&self) -> usize {
        AdaBoostRegressor::n_features(self)
    }
}

/// Contents of a model slot: the backend is picked once, when the
/// artifact is decoded, and stays fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedModel {
    CatBoost(CatBoostRegressor),
    AdaBoost(AdaBoostRegressor),
}

impl LoadedModel {
    pub fn algorithm(&self) -> &'static str {
        match self {
            LoadedModel::CatBoost(_) => "catboost",
            LoadedModel::AdaBoost(_) => "adaboost",
        }
    }
}

impl Regressor for LoadedModel {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match self {
            LoadedModel::CatBoost(m) => m.predict(x),
            LoadedModel::AdaBoost(m) => m.predict(x),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            LoadedModel::CatBoost(m) => m.n_features(),
            LoadedModel::AdaBoost(m) => m.n_features(),
        }
    }
}

//! Tankhouse - Outlet ion concentration prediction
//!
//! This crate predicts the outlet ion concentration of an electrolytic
//! copper refining cell from its operating parameters:
//! - Parameter catalog with allowed ranges per operating parameter
//! - Registry of prediction types with canonical feature order
//! - Loading of serialized boosted-tree models and scalers
//! - Range-validated prediction pipeline with output classification
//!
//! # Modules
//!
//! ## Core
//! - [`catalog`] - Operating parameters and prediction type registry
//! - [`model`] - Estimators, scalers and artifact (de)serialization
//! - [`engine`] - Validation and the prediction pipeline
//!
//! ## Services
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Core modules
pub mod catalog;
pub mod engine;
pub mod model;

// Services
pub mod cli;

pub use error::{Result, TankhouseError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, TankhouseError};

    // Catalog
    pub use crate::catalog::{
        OutputRange, ParameterCatalog, ParameterSpec, PredictionTypeRegistry, PredictionTypeSpec,
    };

    // Models and artifacts
    pub use crate::model::{
        load_bundle, AdaBoostRegressor, BundleSlot, CatBoostRegressor, Estimator, LoadedModel,
        ModelBundle, Regressor, StandardScaler,
    };

    // Engine
    pub use crate::engine::{FeatureVector, PredictionEngine, PredictionOutcome, Violation};
}

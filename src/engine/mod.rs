//! Prediction pipeline
//!
//! The run-time half of the crate:
//! - Feature vectors supplied by callers
//! - Range validation against the parameter catalog
//! - The prediction engine (scale -> predict -> inverse-scale -> clamp
//!   -> classify)

mod features;
mod predictor;
mod validate;

pub use features::FeatureVector;
pub use predictor::{PredictionEngine, PredictionOutcome};
pub use validate::{check_ranges, Violation};

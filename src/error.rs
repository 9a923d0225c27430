//! Error types for the tankhouse prediction engine

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::Violation;
use crate::model::BundleSlot;

/// Result type alias for tankhouse operations
pub type Result<T> = std::result::Result<T, TankhouseError>;

/// Main error type for the tankhouse crate
#[derive(Error, Debug)]
pub enum TankhouseError {
    /// The requested prediction type is not in the registry.
    #[error("unknown prediction type: {0}")]
    UnknownPredictionType(String),

    /// An artifact file was absent at load time. Consumed by the loader,
    /// which degrades the affected slot instead of propagating.
    #[error("{slot} artifact missing: {}", .path.display())]
    ArtifactMissing { slot: BundleSlot, path: PathBuf },

    /// An artifact file was present but could not be decoded into the
    /// estimator the slot expects. Consumed by the loader like
    /// [`ArtifactMissing`](Self::ArtifactMissing).
    #[error("{slot} artifact corrupt: {}: {reason}", .path.display())]
    ArtifactCorrupt {
        slot: BundleSlot,
        path: PathBuf,
        reason: String,
    },

    /// The bundle for the requested prediction type has at least one
    /// empty slot; no inference is attempted.
    #[error("prediction type {key} is unavailable (missing: {})", join_slots(.missing))]
    Unavailable { key: String, missing: Vec<BundleSlot> },

    /// A parameter required by the prediction type is absent from the
    /// submitted feature vector.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// One or more input parameters fall outside their allowed ranges.
    /// Carries the full list so the caller can report all of them at once.
    #[error("{} parameter(s) outside allowed range", .0.len())]
    OutOfRange(Vec<Violation>),

    /// The scale → predict → inverse-scale computation itself failed
    /// (e.g. a feature-width mismatch between vector and scaler).
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_slots(slots: &[BundleSlot]) -> String {
    slots
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<serde_json::Error> for TankhouseError {
    fn from(err: serde_json::Error) -> Self {
        TankhouseError::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for TankhouseError {
    fn from(err: bincode::Error) -> Self {
        TankhouseError::Serialization(err.to_string())
    }
}

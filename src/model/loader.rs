//! Per-type artifact bundle loading
//!
//! Resolves a prediction type's artifact descriptor into a loaded
//! bundle. Loading never fails as a whole: each slot degrades to empty
//! on a missing or corrupt artifact, with one diagnostic per artifact,
//! and the engine later refuses requests against incomplete bundles.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use crate::catalog::{ModelFormat, PredictionTypeSpec};
use crate::error::{Result, TankhouseError};
use crate::model::format::{load_native, load_portable, Estimator};
use crate::model::scaler::StandardScaler;
use crate::model::LoadedModel;

/// The three artifact slots backing one prediction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleSlot {
    Model,
    ScalerX,
    ScalerY,
}

impl fmt::Display for BundleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BundleSlot::Model => "model",
            BundleSlot::ScalerX => "feature scaler",
            BundleSlot::ScalerY => "target scaler",
        };
        f.write_str(name)
    }
}

/// Loaded artifacts of one prediction type. Any slot may be empty; an
/// incomplete bundle marks its type unavailable rather than failing
/// startup.
#[derive(Debug, Clone, Default)]
pub struct ModelBundle {
    pub model: Option<LoadedModel>,
    pub scaler_x: Option<StandardScaler>,
    pub scaler_y: Option<StandardScaler>,
}

impl ModelBundle {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bundle with all three slots filled.
    pub fn complete(model: LoadedModel, scaler_x: StandardScaler, scaler_y: StandardScaler) -> Self {
        Self {
            model: Some(model),
            scaler_x: Some(scaler_x),
            scaler_y: Some(scaler_y),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.model.is_some() && self.scaler_x.is_some() && self.scaler_y.is_some()
    }

    /// Empty slots, in slot order.
    pub fn missing_slots(&self) -> Vec<BundleSlot> {
        let mut missing = Vec::new();
        if self.model.is_none() {
            missing.push(BundleSlot::Model);
        }
        if self.scaler_x.is_none() {
            missing.push(BundleSlot::ScalerX);
        }
        if self.scaler_y.is_none() {
            missing.push(BundleSlot::ScalerY);
        }
        missing
    }
}

/// Load the three artifacts named by a type's descriptor from `root`.
pub fn load_bundle(root: impl AsRef<Path>, spec: &PredictionTypeSpec) -> ModelBundle {
    let root = root.as_ref();
    let artifacts = &spec.artifacts;

    let model_path = root.join(&artifacts.model);
    let model = slot_or_log(
        &spec.key,
        BundleSlot::Model,
        &model_path,
        load_artifact(BundleSlot::Model, &model_path, |path| {
            decode_model(path, artifacts.model_format)
        }),
    );

    let scaler_x_path = root.join(&artifacts.scaler_x);
    let scaler_x = slot_or_log(
        &spec.key,
        BundleSlot::ScalerX,
        &scaler_x_path,
        load_artifact(BundleSlot::ScalerX, &scaler_x_path, decode_scaler),
    );

    let scaler_y_path = root.join(&artifacts.scaler_y);
    let scaler_y = slot_or_log(
        &spec.key,
        BundleSlot::ScalerY,
        &scaler_y_path,
        load_artifact(BundleSlot::ScalerY, &scaler_y_path, decode_scaler),
    );

    ModelBundle {
        model,
        scaler_x,
        scaler_y,
    }
}

/// Decode one artifact, classifying failures as missing or corrupt.
fn load_artifact<T>(
    slot: BundleSlot,
    path: &Path,
    decode: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
    if !path.exists() {
        return Err(TankhouseError::ArtifactMissing {
            slot,
            path: path.to_path_buf(),
        });
    }
    decode(path).map_err(|e| TankhouseError::ArtifactCorrupt {
        slot,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// One diagnostic per artifact: info on success, warn on a skipped slot.
fn slot_or_log<T>(type_key: &str, slot: BundleSlot, path: &Path, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => {
            info!(
                prediction_type = %type_key,
                slot = %slot,
                path = %path.display(),
                "artifact loaded"
            );
            Some(value)
        }
        Err(e) => {
            warn!(prediction_type = %type_key, error = %e, "artifact skipped");
            None
        }
    }
}

fn decode_model(path: &Path, format: ModelFormat) -> Result<LoadedModel> {
    match format {
        ModelFormat::Native => Ok(LoadedModel::CatBoost(load_native(path)?)),
        ModelFormat::Portable => match load_portable(path)? {
            Estimator::CatBoost(m) => Ok(LoadedModel::CatBoost(m)),
            Estimator::AdaBoost(m) => Ok(LoadedModel::AdaBoost(m)),
            other => Err(TankhouseError::Serialization(format!(
                "expected a model estimator, found {}",
                other.kind()
            ))),
        },
    }
}

fn decode_scaler(path: &Path) -> Result<StandardScaler> {
    match load_portable(path)? {
        Estimator::StandardScaler(s) => Ok(s),
        other => Err(TankhouseError::Serialization(format!(
            "expected a standard_scaler estimator, found {}",
            other.kind()
        ))),
    }
}

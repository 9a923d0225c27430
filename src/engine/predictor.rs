//! Prediction engine
//!
//! Orchestrates one prediction request end to end: resolve the type,
//! gate on bundle availability and input ranges, assemble the feature
//! row in canonical order, run scale -> predict -> inverse-scale, clamp
//! to physical bounds and classify against the expected output range.

use std::collections::HashMap;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{OutputRange, ParameterCatalog, ParameterSpec, PredictionTypeRegistry, PredictionTypeSpec};
use crate::engine::validate::check_ranges;
use crate::engine::{FeatureVector, Violation};
use crate::error::{Result, TankhouseError};
use crate::model::{load_bundle, BundleSlot, ModelBundle, Regressor};

/// Result of one successful prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    /// Predicted concentration in physical units, clamped to >= 0.
    pub value: f64,
    /// Expected range the value was classified against.
    pub range: OutputRange,
    /// Whether `value` lies inside `range`, inclusive at both ends.
    pub within_range: bool,
}

/// Engine over a fixed catalog, registry and set of loaded bundles.
///
/// All state is immutable after construction; predictions are pure
/// functions of (bundle, features), so a shared reference can serve
/// requests from multiple threads.
#[derive(Debug)]
pub struct PredictionEngine {
    catalog: ParameterCatalog,
    registry: PredictionTypeRegistry,
    bundles: HashMap<String, ModelBundle>,
}

impl PredictionEngine {
    /// Build an engine from already-loaded bundles.
    pub fn new(
        catalog: ParameterCatalog,
        registry: PredictionTypeRegistry,
        bundles: HashMap<String, ModelBundle>,
    ) -> Self {
        Self {
            catalog,
            registry,
            bundles,
        }
    }

    /// Load the artifacts of every registered type from `artifact_root`.
    ///
    /// Never fails: a type whose artifacts are missing or corrupt comes
    /// up unavailable (with per-artifact diagnostics from the loader)
    /// while the remaining types stay usable.
    pub fn load(
        catalog: ParameterCatalog,
        registry: PredictionTypeRegistry,
        artifact_root: impl AsRef<Path>,
    ) -> Self {
        let root = artifact_root.as_ref();
        let bundles = registry
            .iter()
            .map(|spec| (spec.key.clone(), load_bundle(root, spec)))
            .collect();
        Self::new(catalog, registry, bundles)
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &PredictionTypeRegistry {
        &self.registry
    }

    /// Registered type keys in declaration order.
    pub fn prediction_types(&self) -> Vec<&str> {
        self.registry.keys().collect()
    }

    fn spec(&self, type_key: &str) -> Result<&PredictionTypeSpec> {
        self.registry
            .get(type_key)
            .ok_or_else(|| TankhouseError::UnknownPredictionType(type_key.to_string()))
    }

    /// Catalog entries for a type's required parameters, in canonical
    /// order. Required keys without a catalog entry are skipped, the
    /// same fallback the validator applies.
    pub fn required_parameters(&self, type_key: &str) -> Result<Vec<&ParameterSpec>> {
        let spec = self.spec(type_key)?;
        Ok(spec
            .parameter_keys()
            .filter_map(|key| self.catalog.get(key))
            .collect())
    }

    /// Feature vector seeded with the type's default value per key.
    pub fn default_features(&self, type_key: &str) -> Result<FeatureVector> {
        let spec = self.spec(type_key)?;
        Ok(spec.defaults().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Whether the type's bundle has all three slots loaded.
    pub fn is_available(&self, type_key: &str) -> bool {
        self.bundles
            .get(type_key)
            .map(ModelBundle::is_complete)
            .unwrap_or(false)
    }

    /// Empty bundle slots for a type; all three when no bundle exists.
    pub fn missing_slots(&self, type_key: &str) -> Result<Vec<BundleSlot>> {
        self.spec(type_key)?;
        Ok(match self.bundles.get(type_key) {
            Some(bundle) => bundle.missing_slots(),
            None => vec![BundleSlot::Model, BundleSlot::ScalerX, BundleSlot::ScalerY],
        })
    }

    /// Check a feature vector against the catalog ranges for this type.
    pub fn validate(&self, type_key: &str, features: &FeatureVector) -> Result<Vec<Violation>> {
        let spec = self.spec(type_key)?;
        check_ranges(&self.catalog, spec, features)
    }

    /// Run one prediction, gating on availability and input validity.
    pub fn predict(&self, type_key: &str, features: &FeatureVector) -> Result<PredictionOutcome> {
        let result = self.predict_inner(type_key, features);
        if let Err(e) = &result {
            warn!(prediction_type = %type_key, error = %e, "prediction failed");
        }
        result
    }

    fn predict_inner(&self, type_key: &str, features: &FeatureVector) -> Result<PredictionOutcome> {
        let spec = self.spec(type_key)?;

        let bundle = match self.bundles.get(type_key) {
            Some(bundle) => bundle,
            None => {
                return Err(TankhouseError::Unavailable {
                    key: type_key.to_string(),
                    missing: vec![BundleSlot::Model, BundleSlot::ScalerX, BundleSlot::ScalerY],
                })
            }
        };
        let (model, scaler_x, scaler_y) =
            match (&bundle.model, &bundle.scaler_x, &bundle.scaler_y) {
                (Some(model), Some(scaler_x), Some(scaler_y)) => (model, scaler_x, scaler_y),
                _ => {
                    return Err(TankhouseError::Unavailable {
                        key: type_key.to_string(),
                        missing: bundle.missing_slots(),
                    })
                }
            };

        let violations = check_ranges(&self.catalog, spec, features)?;
        if !violations.is_empty() {
            return Err(TankhouseError::OutOfRange(violations));
        }

        // Row assembly follows the canonical order verbatim; the scaler
        // and model were fit on exactly this layout.
        let mut row = Vec::with_capacity(spec.n_features());
        for key in spec.parameter_keys() {
            match features.get(key) {
                Some(value) => row.push(value),
                None => return Err(TankhouseError::MissingParameter(key.to_string())),
            }
        }
        let x = Array2::from_shape_vec((1, row.len()), row)
            .map_err(|e| TankhouseError::Inference(e.to_string()))?;

        let scaled = scaler_x.transform(&x)?;
        let predictions = model.predict(&scaled)?;
        let raw = match predictions.first() {
            Some(&raw) => raw,
            None => {
                return Err(TankhouseError::Inference(
                    "model produced no output".to_string(),
                ))
            }
        };

        let y = Array2::from_shape_vec((1, 1), vec![raw])
            .map_err(|e| TankhouseError::Inference(e.to_string()))?;
        let physical = scaler_y.inverse_transform(&y)?[[0, 0]];

        // Concentrations cannot go negative; clamp instead of erroring.
        let value = physical.max(0.0);

        Ok(PredictionOutcome {
            value,
            range: spec.output_range,
            within_range: spec.output_range.contains(value),
        })
    }
}

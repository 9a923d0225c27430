//! Integration test: prediction pipeline end-to-end
//!
//! Writes real artifact files into a temporary root, loads an engine
//! over them and drives the full validate -> scale -> predict ->
//! inverse-scale -> classify path for the builtin prediction types.

use std::path::Path;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use tankhouse::catalog::{ModelFormat, ParameterCatalog, PredictionTypeRegistry, PredictionTypeSpec};
use tankhouse::engine::{FeatureVector, PredictionEngine};
use tankhouse::error::TankhouseError;
use tankhouse::model::{
    save_native, save_portable, AdaBoostRegressor, BundleSlot, CatBoostRegressor, Estimator,
    StandardScaler, Stump,
};

/// Empty ensemble predicting its base value, 0.0 in scaled space.
fn constant_catboost(n_features: usize) -> Estimator {
    Estimator::CatBoost(CatBoostRegressor::new(n_features, 1.0, 0.0, Vec::new()))
}

/// Single stump with equal leaves, 0.0 in scaled space on any input.
fn constant_adaboost(n_features: usize) -> Estimator {
    Estimator::AdaBoost(AdaBoostRegressor::new(
        n_features,
        vec![Stump {
            feature_index: 0,
            threshold: 0.0,
            left_value: 0.0,
            right_value: 0.0,
        }],
        vec![1.0],
    ))
}

/// Writes a complete artifact set for `spec` whose prediction comes out
/// at exactly `target_value`: the model yields 0.0 in scaled space and
/// the target scaler maps 0.0 back to `target_value`.
fn write_bundle(root: &Path, spec: &PredictionTypeSpec, model: &Estimator, target_value: f64) {
    match (spec.artifacts.model_format, model) {
        (ModelFormat::Native, Estimator::CatBoost(m)) => {
            save_native(m, root.join(&spec.artifacts.model)).unwrap();
        }
        (ModelFormat::Native, _) => panic!("native artifacts carry boosted-tree models"),
        (ModelFormat::Portable, est) => {
            save_portable(est, root.join(&spec.artifacts.model)).unwrap();
        }
    }

    let n = spec.n_features();
    save_portable(
        &Estimator::StandardScaler(StandardScaler::identity(n)),
        root.join(&spec.artifacts.scaler_x),
    )
    .unwrap();
    save_portable(
        &Estimator::StandardScaler(StandardScaler::new(vec![target_value], vec![1.0])),
        root.join(&spec.artifacts.scaler_y),
    )
    .unwrap();
}

/// Full artifact root for all builtin types, each tuned to predict a
/// value inside its expected output range.
fn full_root(dir: &TempDir) -> PredictionEngine {
    let registry = PredictionTypeRegistry::builtin();
    let root = dir.path();

    let oac_w = registry.get("OAC_W").unwrap();
    write_bundle(root, oac_w, &constant_catboost(oac_w.n_features()), 7.7);

    let occ_d = registry.get("OCC_D").unwrap();
    write_bundle(root, occ_d, &constant_catboost(occ_d.n_features()), 47.0);

    let occ_w = registry.get("OCC_W").unwrap();
    write_bundle(root, occ_w, &constant_adaboost(occ_w.n_features()), 45.0);

    PredictionEngine::load(ParameterCatalog::builtin(), registry, root)
}

#[test]
fn test_all_builtin_types_available_from_full_root() {
    let dir = TempDir::new().unwrap();
    let engine = full_root(&dir);

    for key in ["OAC_W", "OCC_D", "OCC_W"] {
        assert!(engine.is_available(key), "{key} should be available");
        assert!(engine.missing_slots(key).unwrap().is_empty());
    }
}

#[test]
fn test_oac_w_defaults_predict_within_expected_range() {
    let dir = TempDir::new().unwrap();
    let engine = full_root(&dir);

    let features = engine.default_features("OAC_W").unwrap();
    assert_eq!(features.len(), 15);

    let outcome = engine.predict("OAC_W", &features).unwrap();
    assert_abs_diff_eq!(outcome.value, 7.7, epsilon = 1e-9);
    assert!(outcome.within_range);
    assert_eq!(outcome.range.min, 6.36);
    assert_eq!(outcome.range.max, 9.11);
}

#[test]
fn test_occ_d_takes_eleven_parameters() {
    let dir = TempDir::new().unwrap();
    let engine = full_root(&dir);

    let features = engine.default_features("OCC_D").unwrap();
    assert_eq!(features.len(), 11);
    assert!(!features.contains_key("Inlet Arsenic ion concentration"));

    let outcome = engine.predict("OCC_D", &features).unwrap();
    assert_abs_diff_eq!(outcome.value, 47.0, epsilon = 1e-9);
    assert!(outcome.within_range);
}

#[test]
fn test_occ_w_adaboost_end_to_end() {
    let dir = TempDir::new().unwrap();
    let engine = full_root(&dir);

    let outcome = engine
        .predict("OCC_W", &engine.default_features("OCC_W").unwrap())
        .unwrap();
    assert_abs_diff_eq!(outcome.value, 45.0, epsilon = 1e-9);
    assert!(outcome.within_range);
}

#[test]
fn test_extra_keys_do_not_disturb_a_prediction() {
    let dir = TempDir::new().unwrap();
    let engine = full_root(&dir);

    // OCC_D ignores the minor-ion keys the weekly types require.
    let features = engine
        .default_features("OCC_D")
        .unwrap()
        .set("Inlet Arsenic ion concentration", 8.67)
        .set("Inlet Nickel ion concentration", 10.7);

    let outcome = engine.predict("OCC_D", &features).unwrap();
    assert_abs_diff_eq!(outcome.value, 47.0, epsilon = 1e-9);
}

#[test]
fn test_out_of_range_parameter_rejected_with_details() {
    let dir = TempDir::new().unwrap();
    let engine = full_root(&dir);

    let features = engine
        .default_features("OAC_W")
        .unwrap()
        .set("Anode_Copper_content", 50.0);

    let err = engine.predict("OAC_W", &features).unwrap_err();
    match err {
        TankhouseError::OutOfRange(violations) => {
            assert_eq!(violations.len(), 1);
            let v = &violations[0];
            assert_eq!(v.key, "Anode_Copper_content");
            assert_eq!(v.label, "Anode Copper content");
            assert_eq!(v.value, 50.0);
            assert_eq!(v.min, 99.46);
            assert_eq!(v.max, 99.9);
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }

    // validate() reports the same violations without failing.
    let violations = engine.validate("OAC_W", &features).unwrap();
    assert_eq!(violations.len(), 1);
}

#[test]
fn test_missing_parameter_rejected() {
    let dir = TempDir::new().unwrap();
    let engine = full_root(&dir);

    let spec = engine.registry().get("OAC_W").unwrap();
    let features: FeatureVector = spec
        .defaults()
        .filter(|(key, _)| *key != "Current Density")
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    let err = engine.predict("OAC_W", &features).unwrap_err();
    match err {
        TankhouseError::MissingParameter(key) => assert_eq!(key, "Current Density"),
        other => panic!("expected MissingParameter, got {other:?}"),
    }
}

#[test]
fn test_empty_root_leaves_every_type_unavailable() {
    let dir = TempDir::new().unwrap();
    let engine = PredictionEngine::load(
        ParameterCatalog::builtin(),
        PredictionTypeRegistry::builtin(),
        dir.path(),
    );

    for key in ["OAC_W", "OCC_D", "OCC_W"] {
        assert!(!engine.is_available(key));
        assert_eq!(engine.missing_slots(key).unwrap().len(), 3);
    }

    let err = engine
        .predict("OCC_D", &engine.default_features("OCC_D").unwrap())
        .unwrap_err();
    match err {
        TankhouseError::Unavailable { key, missing } => {
            assert_eq!(key, "OCC_D");
            assert_eq!(missing.len(), 3);
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[test]
fn test_corrupt_model_degrades_only_its_type() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let registry = PredictionTypeRegistry::builtin();

    // OCC_D gets a valid bundle, OAC_W a garbage model next to valid scalers.
    let occ_d = registry.get("OCC_D").unwrap();
    write_bundle(root, occ_d, &constant_catboost(occ_d.n_features()), 47.0);

    let oac_w = registry.get("OAC_W").unwrap();
    write_bundle(root, oac_w, &constant_catboost(oac_w.n_features()), 7.7);
    std::fs::write(root.join(&oac_w.artifacts.model), b"not an estimator").unwrap();

    let engine = PredictionEngine::load(ParameterCatalog::builtin(), registry, root);

    assert!(!engine.is_available("OAC_W"));
    assert_eq!(engine.missing_slots("OAC_W").unwrap(), vec![BundleSlot::Model]);

    let err = engine
        .predict("OAC_W", &engine.default_features("OAC_W").unwrap())
        .unwrap_err();
    match err {
        TankhouseError::Unavailable { missing, .. } => {
            assert_eq!(missing, vec![BundleSlot::Model]);
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }

    // The healthy type keeps serving.
    assert!(engine.is_available("OCC_D"));
    assert!(engine
        .predict("OCC_D", &engine.default_features("OCC_D").unwrap())
        .is_ok());
}

#[test]
fn test_out_of_range_prediction_is_flagged() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let registry = PredictionTypeRegistry::builtin();

    let oac_w = registry.get("OAC_W").unwrap();
    write_bundle(root, oac_w, &constant_catboost(oac_w.n_features()), 12.0);

    let engine = PredictionEngine::load(ParameterCatalog::builtin(), registry, root);
    let outcome = engine
        .predict("OAC_W", &engine.default_features("OAC_W").unwrap())
        .unwrap();

    assert_abs_diff_eq!(outcome.value, 12.0, epsilon = 1e-9);
    assert!(!outcome.within_range, "12.0 g/L lies above 6.36-9.11");
}

#[test]
fn test_negative_prediction_clamps_to_zero() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let registry = PredictionTypeRegistry::builtin();

    let oac_w = registry.get("OAC_W").unwrap();
    write_bundle(root, oac_w, &constant_catboost(oac_w.n_features()), -3.0);

    let engine = PredictionEngine::load(ParameterCatalog::builtin(), registry, root);
    let outcome = engine
        .predict("OAC_W", &engine.default_features("OAC_W").unwrap())
        .unwrap();

    assert_eq!(outcome.value, 0.0);
    assert!(!outcome.within_range);
}

#[test]
fn test_features_parse_from_json_file() {
    let dir = TempDir::new().unwrap();
    let engine = full_root(&dir);

    let defaults = engine.default_features("OCC_D").unwrap();
    let path = dir.path().join("input.json");
    std::fs::write(&path, serde_json::to_string_pretty(&defaults).unwrap()).unwrap();

    let features = tankhouse::cli::read_features(&path).unwrap();
    assert_eq!(features.len(), 11);
    assert!(engine.predict("OCC_D", &features).is_ok());
}

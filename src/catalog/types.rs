//! Prediction type registry
//!
//! Maps each prediction-type key to everything the engine needs to serve
//! it: the canonical parameter order the model was fit on, per-parameter
//! defaults, the expected output concentration range and the artifact
//! descriptor naming the serialized model and scaler files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serialization kind of a model artifact.
///
/// Scaler artifacts are always `Portable`; model artifacts carry this tag
/// so the loader knows which decoder to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    /// Boosted-tree binary container (magic + version + checksum).
    Native,
    /// Tagged JSON estimator document.
    Portable,
}

/// File names of the three artifacts backing one prediction type,
/// resolved against the artifact root directory at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub model: String,
    pub scaler_x: String,
    pub scaler_y: String,
    pub model_format: ModelFormat,
}

/// Inclusive expected range for a predicted outlet concentration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputRange {
    pub min: f64,
    pub max: f64,
}

impl OutputRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for OutputRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// One entry of a type's canonical parameter order, with the default
/// value front ends seed the corresponding field with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredParameter {
    pub key: String,
    pub default: f64,
}

/// Full specification of one prediction type.
///
/// `required` is ordered: the scaler and model behind this type were fit
/// on feature rows in exactly this parameter order, so the engine
/// assembles rows by walking it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionTypeSpec {
    pub key: String,
    /// Human-readable description of the predicted quantity.
    pub description: String,
    pub required: Vec<RequiredParameter>,
    pub output_range: OutputRange,
    pub artifacts: ArtifactSpec,
}

impl PredictionTypeSpec {
    /// Canonical parameter keys in feature order.
    pub fn parameter_keys(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(|r| r.key.as_str())
    }

    /// (key, default) pairs in canonical order.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, f64)> {
        self.required.iter().map(|r| (r.key.as_str(), r.default))
    }

    pub fn default_of(&self, key: &str) -> Option<f64> {
        self.required.iter().find(|r| r.key == key).map(|r| r.default)
    }

    pub fn n_features(&self) -> usize {
        self.required.len()
    }
}

/// Immutable registry of prediction types, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionTypeRegistry {
    entries: Vec<PredictionTypeSpec>,
}

fn req(key: &str, default: f64) -> RequiredParameter {
    RequiredParameter {
        key: key.to_string(),
        default,
    }
}

impl PredictionTypeRegistry {
    pub fn new(entries: Vec<PredictionTypeSpec>) -> Self {
        Self { entries }
    }

    /// The three reference prediction types of the tankhouse system.
    ///
    /// OAC_W/OCC_W consume all 15 catalog parameters; OCC_D was fit
    /// without the four inlet minor-ion concentrations (antimony,
    /// bismuth, nickel, arsenic) and takes 11.
    pub fn builtin() -> Self {
        Self::new(vec![
            PredictionTypeSpec {
                key: "OAC_W".to_string(),
                description: "Outlet arsenic ion concentration (weekly)".to_string(),
                required: vec![
                    req("Electrolyte_Time", 164.0),
                    req("Anode_Copper_content", 99.83),
                    req("Anode_Bismuth_content", 0.0156),
                    req("Anode_Antimony_content", 0.0255),
                    req("Anode_Nickel_content", 0.0406),
                    req("Anode_Arsenic_content", 0.0873),
                    req("Current Density", 340.417),
                    req("Inlet Sulfate ion concentration", 178.18),
                    req("Inlet Copper ion concentration", 48.97),
                    req("Inlet Antimony ion concentration", 0.200),
                    req("Inlet Bismuth ion concentration", 0.170),
                    req("Inlet Nickel ion concentration", 10.700),
                    req("Inlet Chloride ion concentration", 0.057),
                    req("Inlet Arsenic ion concentration", 8.67),
                    req("Number of Electrolysis Tanks", 371.67),
                ],
                output_range: OutputRange::new(6.36, 9.11),
                artifacts: ArtifactSpec {
                    model: "catboost_OAC_W_model.json".to_string(),
                    scaler_x: "scaler_X_OAC_W.json".to_string(),
                    scaler_y: "scaler_y_OAC_W.json".to_string(),
                    model_format: ModelFormat::Portable,
                },
            },
            PredictionTypeSpec {
                key: "OCC_D".to_string(),
                description: "Outlet copper ion concentration (daily)".to_string(),
                required: vec![
                    req("Electrolyte_Time", 37.33),
                    req("Anode_Copper_content", 99.83),
                    req("Anode_Bismuth_content", 0.0226),
                    req("Anode_Antimony_content", 0.02),
                    req("Anode_Nickel_content", 0.0271),
                    req("Anode_Arsenic_content", 0.09),
                    req("Current Density", 327.204),
                    req("Inlet Sulfate ion concentration", 171.61),
                    req("Inlet Copper ion concentration", 50.38),
                    req("Inlet Chloride ion concentration", 0.056),
                    req("Number of Electrolysis Tanks", 415.83),
                ],
                output_range: OutputRange::new(44.35, 50.14),
                artifacts: ArtifactSpec {
                    model: "catboost_OCC_D_model.tkhm".to_string(),
                    scaler_x: "scaler_X_OCC_D.json".to_string(),
                    scaler_y: "scaler_y_OCC_D.json".to_string(),
                    model_format: ModelFormat::Native,
                },
            },
            PredictionTypeSpec {
                key: "OCC_W".to_string(),
                description: "Outlet copper ion concentration (weekly)".to_string(),
                required: vec![
                    req("Electrolyte_Time", 108.0),
                    req("Anode_Copper_content", 99.79),
                    req("Anode_Bismuth_content", 0.0199),
                    req("Anode_Antimony_content", 0.0437),
                    req("Anode_Nickel_content", 0.0392),
                    req("Anode_Arsenic_content", 0.1015),
                    req("Current Density", 327.015),
                    req("Inlet Sulfate ion concentration", 168.0),
                    req("Inlet Copper ion concentration", 49.33),
                    req("Inlet Antimony ion concentration", 0.240),
                    req("Inlet Bismuth ion concentration", 0.093),
                    req("Inlet Nickel ion concentration", 9.9),
                    req("Inlet Chloride ion concentration", 0.056),
                    req("Inlet Arsenic ion concentration", 9.30),
                    req("Number of Electrolysis Tanks", 269.5),
                ],
                output_range: OutputRange::new(44.35, 50.14),
                artifacts: ArtifactSpec {
                    model: "adaboost_OCC_W_model.json".to_string(),
                    scaler_x: "scaler_X_OCC_W.json".to_string(),
                    scaler_y: "scaler_y_OCC_W.json".to_string(),
                    model_format: ModelFormat::Portable,
                },
            },
        ])
    }

    pub fn get(&self, key: &str) -> Option<&PredictionTypeSpec> {
        self.entries.iter().find(|t| t.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Type keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|t| t.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredictionTypeSpec> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

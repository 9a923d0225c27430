//! Process parameter catalog
//!
//! Static registry of the tankhouse process parameters: display label,
//! unit, allowed numeric range and UI increment step per parameter key.

use serde::{Deserialize, Serialize};

/// Specification of a single process parameter.
///
/// The `key` is the stable lookup identity used by prediction-type
/// parameter orders and feature vectors; `label` and `unit` are display
/// attributes for front ends. The range `[min, max]` is inclusive at
/// both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub key: String,
    pub label: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
    /// Increment used by front-end +/- controls; not part of the
    /// prediction contract.
    pub step: f64,
}

impl ParameterSpec {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        unit: impl Into<String>,
        min: f64,
        max: f64,
        step: f64,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            unit: unit.into(),
            min,
            max,
            step,
        }
    }
}

/// Immutable lookup table of known parameters, in declaration order.
///
/// Constructed once at startup and passed explicitly to the components
/// that need it; never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterCatalog {
    entries: Vec<ParameterSpec>,
}

impl ParameterCatalog {
    /// Build a catalog from explicit entries (order preserved).
    pub fn new(entries: Vec<ParameterSpec>) -> Self {
        Self { entries }
    }

    /// The reference catalog of the copper electrorefining process:
    /// anode assay contents, inlet electrolyte ion concentrations and
    /// electrolysis operating conditions.
    pub fn builtin() -> Self {
        let spec = ParameterSpec::new;
        Self::new(vec![
            spec("Anode_Copper_content", "Anode Copper content", "%", 99.46, 99.90, 0.5),
            spec("Anode_Bismuth_content", "Anode Bismuth content", "%", 0.0074, 0.0406, 0.02),
            spec("Anode_Antimony_content", "Anode Antimony content", "%", 0.0161, 0.0534, 0.02),
            spec("Anode_Nickel_content", "Anode Nickel content", "%", 0.0145, 0.394, 0.5),
            spec("Anode_Arsenic_content", "Anode Arsenic content", "%", 0.0391, 0.190, 0.2),
            spec("Current Density", "Current Density", "A/m2", 259.073, 384.352, 1.0),
            spec(
                "Inlet Sulfate ion concentration",
                "Inlet Sulfate ion concentration",
                "g/L",
                161.86,
                191.73,
                5.0,
            ),
            spec(
                "Inlet Copper ion concentration",
                "Inlet Copper ion concentration",
                "g/L",
                38.81,
                53.65,
                0.1,
            ),
            spec(
                "Inlet Antimony ion concentration",
                "Inlet Antimony ion concentration",
                "g/L",
                0.16,
                0.27,
                0.1,
            ),
            spec(
                "Inlet Bismuth ion concentration",
                "Inlet Bismuth ion concentration",
                "g/L",
                0.08,
                0.319,
                0.1,
            ),
            spec(
                "Inlet Nickel ion concentration",
                "Inlet Nickel ion concentration",
                "g/L",
                5.68,
                14.98,
                0.1,
            ),
            spec(
                "Inlet Arsenic ion concentration",
                "Inlet Arsenic ion concentration",
                "g/L",
                5.0,
                14.82,
                0.1,
            ),
            spec("Electrolyte_Time", "Electrolyte Time", "Day", 3.33, 334.0, 0.2),
            spec(
                "Inlet Chloride ion concentration",
                "Inlet Chloride ion concentration",
                "g/L",
                0.043,
                0.072,
                0.02,
            ),
            spec("Number of Electrolysis Tanks", "Number of Electrolysis Tanks", "Set", 42.0, 436.0, 5.0),
        ])
    }

    /// Look up a parameter by key.
    pub fn get(&self, key: &str) -> Option<&ParameterSpec> {
        self.entries.iter().find(|p| p.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

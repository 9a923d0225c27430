//! Input range validation

use std::fmt;

use crate::catalog::{ParameterCatalog, PredictionTypeSpec};
use crate::engine::FeatureVector;
use crate::error::{Result, TankhouseError};

/// A submitted parameter value outside its allowed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: current value {:.4}, allowed range {} - {}",
            self.label, self.value, self.min, self.max
        )
    }
}

/// Check every parameter the type requires against its catalog range.
///
/// Violations come back in the type's canonical parameter order, one per
/// offending key, inclusive range at both ends. A required key missing
/// from the feature vector is an error. A required key without a catalog
/// entry is deliberately skipped, not rejected: a registry may require
/// parameters the catalog does not bound.
pub fn check_ranges(
    catalog: &ParameterCatalog,
    spec: &PredictionTypeSpec,
    features: &FeatureVector,
) -> Result<Vec<Violation>> {
    let mut violations = Vec::new();

    for key in spec.parameter_keys() {
        let value = match features.get(key) {
            Some(v) => v,
            None => return Err(TankhouseError::MissingParameter(key.to_string())),
        };
        let param = match catalog.get(key) {
            Some(p) => p,
            None => continue,
        };
        if value < param.min || value > param.max {
            violations.push(Violation {
                key: key.to_string(),
                label: param.label.clone(),
                value,
                min: param.min,
                max: param.max,
            });
        }
    }

    Ok(violations)
}

//! Static process knowledge
//!
//! Provides the immutable lookup tables the rest of the crate is driven
//! by:
//! - Parameter catalog (labels, units, valid ranges, UI steps)
//! - Prediction type registry (canonical feature orders, defaults,
//!   output ranges, artifact descriptors)

mod parameters;
mod types;

pub use parameters::{ParameterCatalog, ParameterSpec};
pub use types::{
    ArtifactSpec, ModelFormat, OutputRange, PredictionTypeRegistry, PredictionTypeSpec,
    RequiredParameter,
};

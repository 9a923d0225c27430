//! Artifact serialization formats
//!
//! Two kinds back the on-disk artifacts:
//! - native boosted-tree binary: a bincode container with magic bytes,
//!   format version and checksum around the encoded ensemble
//! - portable estimator document: tagged JSON able to carry any
//!   estimator kind
//!
//! Writers exist alongside the readers so tooling and tests can produce
//! well-formed artifacts.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TankhouseError};
use crate::model::adaboost::AdaBoostRegressor;
use crate::model::catboost::CatBoostRegressor;
use crate::model::scaler::StandardScaler;

/// Magic bytes for native tankhouse model files
const MAGIC: [u8; 4] = [b'T', b'K', b'H', b'M'];
/// Current native format version
const VERSION: u32 = 1;

/// Any estimator a portable document can carry, dispatched by its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "estimator")]
pub enum Estimator {
    #[serde(rename = "catboost")]
    CatBoost(CatBoostRegressor),
    #[serde(rename = "adaboost")]
    AdaBoost(AdaBoostRegressor),
    #[serde(rename = "standard_scaler")]
    StandardScaler(StandardScaler),
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::CatBoost(_) => "catboost",
            Estimator::AdaBoost(_) => "adaboost",
            Estimator::StandardScaler(_) => "standard_scaler",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Estimator::CatBoost(m) => m.validate(),
            Estimator::AdaBoost(m) => m.validate(),
            Estimator::StandardScaler(s) => s.validate(),
        }
    }
}

/// On-disk wrapper of the native boosted-tree binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NativeContainer {
    magic: [u8; 4],
    format_version: u32,
    model_data: Vec<u8>,
    checksum: u64,
}

impl NativeContainer {
    fn new(model_data: Vec<u8>) -> Self {
        let checksum = compute_checksum(&model_data);
        Self {
            magic: MAGIC,
            format_version: VERSION,
            model_data,
            checksum,
        }
    }

    fn verify_checksum(&self) -> bool {
        compute_checksum(&self.model_data) == self.checksum
    }
}

/// Compute a fast hash of the encoded payload using XxHash64
fn compute_checksum(data: &[u8]) -> u64 {
    use xxhash_rust::xxh3::xxh3_64;
    xxh3_64(data)
}

/// Write a boosted-tree ensemble in the native binary format.
pub fn save_native(model: &CatBoostRegressor, path: impl AsRef<Path>) -> Result<()> {
    let container = NativeContainer::new(bincode::serialize(model)?);
    let file = File::create(path.as_ref())?;
    bincode::serialize_into(BufWriter::new(file), &container)?;
    Ok(())
}

/// Read a boosted-tree ensemble from the native binary format; rejects
/// wrong magic, unknown versions, checksum mismatches and structurally
/// broken payloads.
pub fn load_native(path: impl AsRef<Path>) -> Result<CatBoostRegressor> {
    let file = File::open(path.as_ref())?;
    let container: NativeContainer = bincode::deserialize_from(BufReader::new(file))?;

    if container.magic != MAGIC {
        return Err(TankhouseError::Serialization(format!(
            "bad magic bytes {:?}, not a native model file",
            container.magic
        )));
    }
    if container.format_version != VERSION {
        return Err(TankhouseError::Serialization(format!(
            "unsupported native format version {}",
            container.format_version
        )));
    }
    if !container.verify_checksum() {
        return Err(TankhouseError::Serialization(
            "checksum verification failed".to_string(),
        ));
    }

    let model: CatBoostRegressor = bincode::deserialize(&container.model_data)?;
    model.validate()?;
    Ok(model)
}

/// Write an estimator as a portable tagged JSON document.
pub fn save_portable(estimator: &Estimator, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), estimator)?;
    Ok(())
}

/// Read an estimator from a portable tagged JSON document.
pub fn load_portable(path: impl AsRef<Path>) -> Result<Estimator> {
    let file = File::open(path.as_ref())?;
    let estimator: Estimator = serde_json::from_reader(BufReader::new(file))?;
    estimator.validate()?;
    Ok(estimator)
}

//! Sweep parameters, loaded from an optional JSON file.
use std::{fs, num::NonZeroUsize, path::{Path, PathBuf}};
use serde::{Deserialize, Serialize};
use crate::adapter::{SchemeCatalog, SchemeDescriptor};
use crate::error::BenchError;

pub const DEFAULT_MAX_ATTRIBUTES: usize = 30;
pub const DEFAULT_OUTPUT_DIR: &str = "results";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub max_attributes: NonZeroUsize,
    pub iterations: NonZeroUsize,
    pub schemes: Vec<String>,
    pub curves: Vec<String>,
    pub output_dir: PathBuf,
    /// Additional or replacement scheme descriptors.
    pub descriptors: Vec<SchemeDescriptor>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            max_attributes: NonZeroUsize::new(DEFAULT_MAX_ATTRIBUTES).unwrap_or(NonZeroUsize::MIN),
            iterations: NonZeroUsize::MIN,
            schemes: vec![String::from("BSW07"), String::from("ac17"), String::from("waters11")],
            curves: vec![String::from("BN254"), String::from("BLS12-381")],
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            descriptors: Vec::new(),
        }
    }
}

impl BenchConfig {
    /// Reads a configuration file; absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<BenchConfig, BenchError> {
        let contents = fs::read_to_string(path).map_err(|source| BenchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        BenchConfig::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<BenchConfig, BenchError> {
        let config: BenchConfig =
            serde_json::from_str(contents).map_err(|e| BenchError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.schemes.is_empty() {
            return Err(BenchError::InvalidConfig(String::from("no schemes configured")));
        }
        if self.curves.is_empty() {
            return Err(BenchError::InvalidConfig(String::from("no curves configured")));
        }
        for descriptor in self.descriptors.iter() {
            if descriptor.name.trim().is_empty() {
                return Err(BenchError::InvalidConfig(String::from("descriptor without a name")));
            }
        }
        Ok(())
    }

    /// The built-in descriptors with the configured ones registered on top.
    pub fn catalog(&self) -> SchemeCatalog {
        let mut catalog = SchemeCatalog::builtin();
        for descriptor in self.descriptors.iter() {
            catalog.register(descriptor.clone());
        }
        catalog
    }
}

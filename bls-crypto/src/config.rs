use std::path::Path;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Operational settings of an [`Engine`](crate::Engine).
///
/// Algorithms are fixed at compile time; only knobs that do not change the
/// scheme live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Verify shares on the rayon pool in the verified combine path.
    #[builder(default = true)]
    #[serde(default = "default_parallel_verify")]
    pub parallel_verify: bool,

    /// Smallest share set `combine_signature_shares` accepts.
    #[builder(default = 1)]
    #[serde(default = "default_min_signature_shares")]
    pub min_signature_shares: usize,
}

fn default_parallel_verify() -> bool {
    true
}

fn default_min_signature_shares() -> usize {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EngineConfig {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| ConfigError(path.into(), Box::new(e)))?;
        toml::from_str(&s).map_err(|e| ConfigError(path.into(), Box::new(e)))
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let s = toml::to_string_pretty(self).map_err(|e| ConfigError(path.into(), Box::new(e)))?;
        std::fs::write(path, s).map_err(|e| ConfigError(path.into(), Box::new(e)))
    }
}

//! Configuration for huff-tree

use crate::error::{CompressError, Result};
use crate::symbol::HUFF_TREE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// 32-bit value written before the tree header and required on input.
    pub magic: u32,
    pub max_input_size: u64,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            magic: HUFF_TREE,
            max_input_size: 100 * 1024 * 1024, // 100 MB
        }
    }
}

impl CompressionConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CompressError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_input_size == 0 {
            return Err(CompressError::Config("max_input_size must be non-zero".into()));
        }
        Ok(())
    }
}

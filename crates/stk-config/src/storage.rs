//! Where the catalog trail lives.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    String::from(".stockroom")
}

const fn default_trail() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding `trail.jsonl` and `trail.lock`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Whether mutations are persisted to the trail. When off, every process
    /// starts with an empty catalog.
    #[serde(default = "default_trail")]
    pub trail: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            trail: default_trail(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn data_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

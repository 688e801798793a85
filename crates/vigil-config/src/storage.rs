use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_output_dir() -> PathBuf {
    PathBuf::from("captures")
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory for artifacts; `images/` and `ocr/` live underneath.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl StorageConfig {
    pub fn new() -> Self {
        let output_dir = env::var("VIGIL_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_output_dir());

        Self { output_dir }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

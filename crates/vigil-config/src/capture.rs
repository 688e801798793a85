use std::env;

use serde::{Deserialize, Serialize};

fn default_interval_ms() -> u64 {
    1000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Sampling interval between screen grabs, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl CaptureConfig {
    pub fn new() -> Self {
        let interval_ms = env::var("VIGIL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_interval_ms);

        Self { interval_ms }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

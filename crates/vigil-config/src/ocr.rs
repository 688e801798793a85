use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_language() -> String {
    "eng".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// When false, frames are still captured but the text file stays empty.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_language")]
    pub language: String,
}

impl OcrConfig {
    pub fn new() -> Self {
        let enabled = env::var("VIGIL_OCR_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_enabled);

        let language = env::var("VIGIL_OCR_LANGUAGE").unwrap_or_else(|_| default_language());

        Self { enabled, language }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            language: default_language(),
        }
    }
}

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::ocr::OcrConfig;
use self::storage::StorageConfig;

pub mod capture;
pub mod ocr;
pub mod storage;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub storage: StorageConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            capture: CaptureConfig::new(),
            ocr: OcrConfig::new(),
            storage: StorageConfig::new(),
        }
    }
}

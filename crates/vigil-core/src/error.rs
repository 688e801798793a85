use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no area selected")]
    EmptySelection,

    #[error("frame buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    InvalidFrame {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
    },

    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write artifact {path}: {source}")]
    ArtifactWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

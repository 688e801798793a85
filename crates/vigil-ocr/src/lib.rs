mod capture;
#[cfg(windows)]
mod com;
mod ocr;

pub use capture::{ScreenSource, encode_png_frame};
#[cfg(windows)]
pub use com::ComGuard;
#[cfg(windows)]
pub use ocr::WindowsExtractor;
#[cfg(feature = "tesseract")]
pub use ocr::TesseractExtractor;
pub use ocr::{NoopExtractor, default_extractor};

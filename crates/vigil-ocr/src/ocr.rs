use anyhow::Result;
use vigil_core::monitor::TextExtractor;
use vigil_types::Frame;

/// Stand-in used when recognition is turned off. Artifacts still get their
/// text file, just empty.
pub struct NoopExtractor;

impl TextExtractor for NoopExtractor {
    fn extract(&self, _frame: &Frame) -> Result<String> {
        Ok(String::new())
    }
}

/// Picks the OCR backend compiled into this build.
pub fn default_extractor(language: &str) -> Result<Box<dyn TextExtractor>> {
    #[cfg(windows)]
    {
        return Ok(Box::new(WindowsExtractor::new(language)?));
    }
    #[cfg(all(not(windows), feature = "tesseract"))]
    {
        return Ok(Box::new(TesseractExtractor::new(language)));
    }
    #[cfg(all(not(windows), not(feature = "tesseract")))]
    {
        let _ = language;
        anyhow::bail!(
            "no OCR backend available on this platform; rebuild with --features tesseract \
             or set VIGIL_OCR_ENABLED=false"
        )
    }
}

#[cfg(feature = "tesseract")]
pub use self::tesseract_impl::TesseractExtractor;

#[cfg(feature = "tesseract")]
mod tesseract_impl {
    use anyhow::{Context, Result};
    use vigil_core::monitor::TextExtractor;
    use vigil_types::Frame;

    use crate::capture::encode_png_frame;

    /// Tesseract-backed recognition. The engine is stateless per invocation,
    /// so each extract spins up a fresh instance for the configured language.
    pub struct TesseractExtractor {
        language: String,
    }

    impl TesseractExtractor {
        pub fn new(language: &str) -> Self {
            Self {
                language: language.to_string(),
            }
        }
    }

    impl TextExtractor for TesseractExtractor {
        fn extract(&self, frame: &Frame) -> Result<String> {
            let png = encode_png_frame(frame)?;
            let mut engine = tesseract::Tesseract::new(None, Some(&self.language))
                .context("Failed to initialize tesseract")?
                .set_image_from_mem(&png)
                .context("Failed to load image into tesseract")?;
            engine.get_text().context("Failed to recognize text")
        }
    }
}

#[cfg(windows)]
pub use self::windows_impl::WindowsExtractor;

#[cfg(windows)]
mod windows_impl {
    use anyhow::{Context, Result};
    use vigil_core::monitor::TextExtractor;
    use vigil_types::Frame;
    use windows::{
        Globalization::Language,
        Graphics::Imaging::BitmapDecoder,
        Media::Ocr::OcrEngine,
        Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
        core::HSTRING,
    };

    use crate::capture::encode_png_frame;
    use crate::com::ComGuard;

    /// Windows.Media.Ocr engine for the capture thread. Holds the COM guard
    /// for as long as the extractor lives.
    pub struct WindowsExtractor {
        engine: OcrEngine,
        _com: ComGuard,
    }

    impl WindowsExtractor {
        pub fn new(language_code: &str) -> Result<Self> {
            let com = ComGuard::initialize()?;

            // the config default is a tesseract-style code
            let tag = match language_code {
                "eng" => "en",
                other => other,
            };
            let language = Language::CreateLanguage(&HSTRING::from(tag))
                .context("Failed to create language")?;
            let engine = OcrEngine::TryCreateFromLanguage(&language)
                .context("Failed to create OCR engine for language")?;

            Ok(Self { engine, _com: com })
        }
    }

    impl TextExtractor for WindowsExtractor {
        fn extract(&self, frame: &Frame) -> Result<String> {
            let png = encode_png_frame(frame)?;

            let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
            let writer = DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;
            writer
                .WriteBytes(&png)
                .context("Failed to write image bytes")?;
            writer
                .StoreAsync()
                .context("Failed to store async")?
                .get()
                .context("Failed to store data")?;
            writer.FlushAsync().context("Failed to flush")?.get()?;
            stream.Seek(0).context("Failed to seek")?;

            let decoder = BitmapDecoder::CreateAsync(&stream)
                .context("Failed to create decoder async")?
                .get()
                .context("Failed to get decoder")?;
            let bitmap = decoder
                .GetSoftwareBitmapAsync()
                .context("Failed to get bitmap async")?
                .get()
                .context("Failed to get software bitmap")?;

            let result = self
                .engine
                .RecognizeAsync(&bitmap)
                .context("Failed to recognize async")?
                .get()
                .context("Failed to get OCR result")?;

            Ok(result.Text().context("Failed to get text")?.to_string())
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use image::{ImageFormat, RgbaImage};
use tracing::info;
use vigil_types::Frame;

use crate::error::{Error, Result};

const IMAGES_DIR: &str = "images";
const OCR_DIR: &str = "ocr";

#[derive(Debug, Clone)]
pub struct SavedArtifact {
    pub image_path: PathBuf,
    pub text_path: PathBuf,
}

/// Persists (frame, text) pairs as `images/<id>.png` + `ocr/<id>.txt` under
/// an output root. Identifiers are local timestamps at second resolution;
/// saves landing in the same second get a monotonic `-N` suffix so no
/// artifact is ever overwritten, even at sub-second sampling intervals.
#[derive(Debug)]
pub struct ArtifactStore {
    root: PathBuf,
    last_stamp: Option<String>,
    sequence: u32,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            last_stamp: None,
            sequence: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn save(&mut self, frame: &Frame, text: &str) -> Result<SavedArtifact> {
        let images_dir = self.root.join(IMAGES_DIR);
        let ocr_dir = self.root.join(OCR_DIR);
        create_dir(&images_dir)?;
        create_dir(&ocr_dir)?;

        let id = self.next_id();
        let image_path = images_dir.join(format!("{id}.png"));
        let text_path = ocr_dir.join(format!("{id}.txt"));

        let image = RgbaImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or(
            Error::InvalidFrame {
                expected: frame.expected_len(),
                actual: frame.data.len(),
                width: frame.width,
                height: frame.height,
            },
        )?;
        image.save_with_format(&image_path, ImageFormat::Png)?;

        fs::write(&text_path, text).map_err(|source| Error::ArtifactWrite {
            path: text_path.clone(),
            source,
        })?;

        info!(
            "saved capture to {} and {}",
            image_path.display(),
            text_path.display()
        );

        Ok(SavedArtifact {
            image_path,
            text_path,
        })
    }

    fn next_id(&mut self) -> String {
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        if self.last_stamp.as_deref() == Some(stamp.as_str()) {
            self.sequence += 1;
        } else {
            self.sequence = 0;
            self.last_stamp = Some(stamp.clone());
        }
        if self.sequence == 0 {
            stamp
        } else {
            format!("{stamp}-{}", self.sequence)
        }
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(rgba: [u8; 4]) -> Frame {
        let mut data = Vec::with_capacity(4 * 4 * 4);
        for _ in 0..16 {
            data.extend_from_slice(&rgba);
        }
        Frame::new(data, 4, 4)
    }

    #[test]
    fn creates_layout_under_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("captures");
        let mut store = ArtifactStore::new(&root);

        let saved = store.save(&solid_frame([255, 0, 0, 255]), "hello").unwrap();

        assert!(root.join("images").is_dir());
        assert!(root.join("ocr").is_dir());
        assert!(saved.image_path.is_file());
        assert_eq!(fs::read_to_string(&saved.text_path).unwrap(), "hello");
    }

    #[test]
    fn existing_layout_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ArtifactStore::new(dir.path());

        store.save(&solid_frame([0, 255, 0, 255]), "one").unwrap();
        store.save(&solid_frame([0, 0, 255, 255]), "two").unwrap();
    }

    #[test]
    fn same_second_saves_produce_distinct_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ArtifactStore::new(dir.path());

        let first = store.save(&solid_frame([1, 1, 1, 255]), "first").unwrap();
        let second = store.save(&solid_frame([2, 2, 2, 255]), "second").unwrap();

        assert_ne!(first.image_path, second.image_path);
        assert_ne!(first.text_path, second.text_path);
        assert_eq!(fs::read_to_string(&first.text_path).unwrap(), "first");
        assert_eq!(fs::read_to_string(&second.text_path).unwrap(), "second");
    }

    #[test]
    fn image_and_text_share_an_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ArtifactStore::new(dir.path());

        let saved = store.save(&solid_frame([9, 9, 9, 255]), "").unwrap();
        let image_id = saved.image_path.file_stem().unwrap().to_owned();
        let text_id = saved.text_path.file_stem().unwrap().to_owned();
        assert_eq!(image_id, text_id);
    }

    #[test]
    fn saved_image_decodes_back_to_the_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ArtifactStore::new(dir.path());
        let frame = solid_frame([10, 20, 30, 255]);

        let saved = store.save(&frame, "").unwrap();

        let decoded = image::open(&saved.image_path).unwrap().into_rgba8();
        assert_eq!(decoded.width(), frame.width);
        assert_eq!(decoded.height(), frame.height);
        assert_eq!(decoded.into_raw(), frame.data);
    }

    #[test]
    fn mismatched_frame_buffer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ArtifactStore::new(dir.path());
        let bad = Frame::new(vec![0; 10], 4, 4);

        assert!(matches!(
            store.save(&bad, ""),
            Err(Error::InvalidFrame { .. })
        ));
    }
}

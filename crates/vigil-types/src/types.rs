use serde::{Deserialize, Serialize};

/// Screen rectangle selected for monitoring, in physical pixel coordinates.
///
/// Always normalized: `(x, y)` is the top-left corner and `width`/`height`
/// are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Build a region from two opposite corners of a drag gesture, in any
    /// order. Returns `None` when the corners collapse to a zero-area
    /// rectangle on either axis.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Option<Self> {
        let width = a.0.abs_diff(b.0);
        let height = a.1.abs_diff(b.1);
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            width,
            height,
        })
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// True when the rectangle lies fully inside the given bounds.
    pub fn fits_within(&self, x: i32, y: i32, width: u32, height: u32) -> bool {
        self.x >= x
            && self.y >= y
            && self.right() <= x + width as i32
            && self.bottom() <= y + height as i32
    }
}

/// One raw RGBA8 capture of a region at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Expected buffer length for the frame's dimensions (RGBA8).
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

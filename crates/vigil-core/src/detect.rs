use sha2::{Digest, Sha256};
use vigil_types::Frame;

/// SHA-256 digest over a frame's raw pixel bytes. A weak checksum would risk
/// treating two different frames as identical and silently dropping captures.
pub type Fingerprint = [u8; 32];

pub fn fingerprint(frame: &Frame) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(&frame.data);
    hasher.finalize().into()
}

/// Remembers the fingerprint of the last observed frame and reports whether a
/// new frame differs from it.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: Option<Fingerprint>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `frame` differs from the previously observed frame.
    /// The first observation always counts as changed. Memory advances on
    /// every call, changed or not.
    pub fn observe(&mut self, frame: &Frame) -> bool {
        let current = fingerprint(frame);
        let changed = self.last != Some(current);
        self.last = Some(current);
        changed
    }
}

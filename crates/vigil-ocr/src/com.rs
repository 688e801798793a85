use anyhow::{Context, Result};

/// RAII guard for COM initialization on the capture thread.
///
/// CoUninitialize runs when the guard is dropped, even on panic or early
/// return, so the OCR engine never outlives its apartment.
pub struct ComGuard;

impl ComGuard {
    pub fn initialize() -> Result<Self> {
        unsafe {
            windows::Win32::System::Com::CoInitializeEx(
                Some(std::ptr::null()),
                windows::Win32::System::Com::COINIT_MULTITHREADED,
            )
            .ok()
            .with_context(|| "Failed to initialize COM")?;
        }
        Ok(ComGuard)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe {
            windows::Win32::System::Com::CoUninitialize();
        }
    }
}

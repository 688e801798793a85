use anyhow::{Context, Result};
use vigil_core::monitor::FrameSource;
use vigil_types::{Frame, Region};
use xcap::Monitor;

/// Captures the selected region from the screen. The monitor handle is
/// resolved once at construction so grabbing a frame does not re-enumerate
/// displays every tick.
pub struct ScreenSource {
    monitor: Monitor,
    region: Region,
}

impl ScreenSource {
    pub fn new(region: Region) -> Result<Self> {
        let mut monitors = Monitor::all().context("Failed to enumerate monitors")?;
        if monitors.is_empty() {
            anyhow::bail!("no monitor found");
        }

        let index = monitors
            .iter()
            .position(|m| region.fits_within(m.x(), m.y(), m.width(), m.height()))
            .unwrap_or(0);
        let monitor = monitors.swap_remove(index);

        tracing::debug!(
            "capturing region {:?} from monitor at ({}, {})",
            region,
            monitor.x(),
            monitor.y()
        );

        Ok(Self { monitor, region })
    }
}

impl FrameSource for ScreenSource {
    fn grab(&mut self) -> Result<Frame> {
        let image = self
            .monitor
            .capture_image()
            .context("Failed to capture screen")?;

        let cropped = xcap::image::imageops::crop_imm(
            &image,
            (self.region.x - self.monitor.x()).max(0) as u32,
            (self.region.y - self.monitor.y()).max(0) as u32,
            self.region.width,
            self.region.height,
        )
        .to_image();

        Ok(Frame::new(
            cropped.as_raw().clone(),
            cropped.width(),
            cropped.height(),
        ))
    }
}

/// Encode a raw frame as PNG bytes for the OCR engines.
pub fn encode_png_frame(frame: &Frame) -> Result<Vec<u8>> {
    use image::ImageEncoder;

    let mut buffer = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            &frame.data,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .context("Failed to encode PNG")?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_png_decodes_back_to_the_frame() {
        let frame = Frame::new(vec![128; 3 * 2 * 4], 3, 2);
        let png = encode_png_frame(&frame).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.into_raw(), frame.data);
    }
}

//! Still image capture and encoding
//!
//! The frame capturer copies the current frame of a live stream into an
//! image buffer at the stream's native resolution and encodes it as PNG.
//! The resulting payload travels to the upload form as a base64 data URL;
//! the server strips the prefix and decodes the remainder, so the format
//! here is bit-exact contract, not presentation.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use image::RgbImage;
use tracing::debug;

use crate::device::DeviceSession;
use crate::error::{CaptureError, CaptureResult};

/// Data-URL prefix of the capture hand-off payload
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encoded output of a capture action
///
/// Held exclusively by the capture widget: overwritten as a whole on each
/// new capture, dropped on retake, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StillImage {
    png: Bytes,
}

impl StillImage {
    /// Wrap already-encoded PNG bytes
    pub fn from_png(png: Vec<u8>) -> Self {
        Self {
            png: Bytes::from(png),
        }
    }

    /// Raw PNG bytes
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Encoded size in bytes
    pub fn len(&self) -> usize {
        self.png.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }

    /// Render the payload as the form-field data URL
    ///
    /// Standard base64 alphabet with padding, behind the fixed
    /// `data:image/png;base64,` prefix.
    pub fn to_data_url(&self) -> String {
        format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(&self.png))
    }
}

/// Produces a [`StillImage`] from the current frame of a live stream
#[derive(Debug, Default)]
pub struct FrameCapturer;

impl FrameCapturer {
    /// Create a new frame capturer
    pub fn new() -> Self {
        Self
    }

    /// Capture the current frame of an active session as a PNG still
    ///
    /// Requires the session to be active and the stream to have decoded at
    /// least one frame at a non-zero resolution; otherwise fails with
    /// [`CaptureError::NoFrameAvailable`]. Synchronous: no network or disk
    /// I/O, no suspension.
    pub fn capture(&self, session: &DeviceSession) -> CaptureResult<StillImage> {
        if !session.is_active() {
            return Err(CaptureError::NoFrameAvailable);
        }

        let (width, height) = session.dimensions();
        if width == 0 || height == 0 {
            return Err(CaptureError::NoFrameAvailable);
        }

        let frame = session.current_frame().ok_or(CaptureError::NoFrameAvailable)?;

        let expected = width as usize * height as usize * 3;
        if frame.data.len() != expected {
            return Err(CaptureError::InvalidFrameData {
                expected,
                actual: frame.data.len(),
            });
        }

        let image = RgbImage::from_raw(width, height, frame.data.to_vec()).ok_or_else(|| {
            CaptureError::EncodingFailed {
                reason: "frame buffer rejected by image container".to_string(),
            }
        })?;

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| CaptureError::EncodingFailed {
                reason: e.to_string(),
            })?;

        debug!(width, height, bytes = png.len(), "Captured still frame");
        Ok(StillImage::from_png(png))
    }
}

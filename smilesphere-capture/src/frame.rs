//! Frame types shared by video streams and the frame capturer

use bytes::Bytes;

/// Single decoded video frame in tightly packed RGB24
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel data, `width * height * 3` bytes
    pub data: Bytes,
    /// Timestamp in milliseconds
    pub timestamp: u64,
}

impl VideoFrame {
    /// Create a new frame from packed RGB24 data
    pub fn new(width: u32, height: u32, data: Bytes, timestamp: u64) -> Self {
        Self {
            width,
            height,
            data,
            timestamp,
        }
    }

    /// Expected buffer length for the frame's dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Check that the buffer length matches the dimensions
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == self.expected_len()
    }
}

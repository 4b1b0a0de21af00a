//! Scriptable media devices for tests and demos
//!
//! The mock answers every acquisition request with one configured outcome
//! and keeps counters that let tests assert the session invariants: how
//! often the platform was asked, and how many granted streams have not been
//! stopped yet.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::device::{MediaDevices, VideoStream};
use crate::error::{CaptureError, CaptureResult};
use crate::frame::VideoFrame;

/// Outcome the mock gives every acquisition request
#[derive(Debug, Clone, Copy)]
enum GrantPolicy {
    /// Hand out a live stream
    Stream {
        width: u32,
        height: u32,
        with_frame: bool,
    },
    /// Refuse with a permission error
    Deny,
    /// Refuse because no device is present
    Unavailable,
}

/// Scriptable camera platform
///
/// Construct one per scenario: [`MockMediaDevices::granting`] for the happy
/// path, [`MockMediaDevices::denying`] for a refused permission prompt,
/// [`MockMediaDevices::unsupported`] for a runtime without capture support.
#[derive(Debug)]
pub struct MockMediaDevices {
    supported: bool,
    policy: GrantPolicy,
    acquire_calls: AtomicUsize,
    live_streams: Arc<AtomicUsize>,
}

impl MockMediaDevices {
    /// Platform that grants a stream with one decoded frame ready
    pub fn granting(width: u32, height: u32) -> Self {
        Self::with_policy(GrantPolicy::Stream {
            width,
            height,
            with_frame: true,
        })
    }

    /// Platform that grants a stream before any frame has decoded
    pub fn granting_frameless(width: u32, height: u32) -> Self {
        Self::with_policy(GrantPolicy::Stream {
            width,
            height,
            with_frame: false,
        })
    }

    /// Platform where the user refuses the permission prompt
    pub fn denying() -> Self {
        Self::with_policy(GrantPolicy::Deny)
    }

    /// Platform with no usable camera attached
    pub fn unavailable() -> Self {
        Self::with_policy(GrantPolicy::Unavailable)
    }

    /// Platform without any capture API
    pub fn unsupported() -> Self {
        let mut devices = Self::with_policy(GrantPolicy::Unavailable);
        devices.supported = false;
        devices
    }

    fn with_policy(policy: GrantPolicy) -> Self {
        Self {
            supported: true,
            policy,
            acquire_calls: AtomicUsize::new(0),
            live_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of acquisition requests the platform has seen
    pub fn acquire_calls(&self) -> usize {
        self.acquire_calls.load(Ordering::SeqCst)
    }

    /// Number of granted streams that have not been stopped yet
    pub fn live_streams(&self) -> usize {
        self.live_streams.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaDevices for MockMediaDevices {
    fn supported(&self) -> bool {
        self.supported
    }

    async fn acquire_video(&self) -> CaptureResult<Box<dyn VideoStream>> {
        self.acquire_calls.fetch_add(1, Ordering::SeqCst);

        match self.policy {
            GrantPolicy::Stream {
                width,
                height,
                with_frame,
            } => {
                self.live_streams.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(MockStream::new(
                    width,
                    height,
                    with_frame,
                    Arc::clone(&self.live_streams),
                )))
            }
            GrantPolicy::Deny => Err(CaptureError::PermissionDenied {
                reason: "user dismissed the permission prompt".to_string(),
            }),
            GrantPolicy::Unavailable => Err(CaptureError::DeviceUnavailable {
                reason: "no video input device".to_string(),
            }),
        }
    }
}

/// Stream handed out by the mock platform
struct MockStream {
    width: u32,
    height: u32,
    frame: Option<VideoFrame>,
    stopped: bool,
    live_streams: Arc<AtomicUsize>,
}

impl MockStream {
    fn new(width: u32, height: u32, with_frame: bool, live_streams: Arc<AtomicUsize>) -> Self {
        let frame =
            with_frame.then(|| VideoFrame::new(width, height, synthetic_rgb(width, height), 0));
        Self {
            width,
            height,
            frame,
            stopped: false,
            live_streams,
        }
    }
}

impl VideoStream for MockStream {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn current_frame(&self) -> Option<VideoFrame> {
        if self.stopped {
            return None;
        }
        self.frame.clone()
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.live_streams.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Deterministic gradient so encoded stills carry recognizable content
fn synthetic_rgb(width: u32, height: u32) -> Bytes {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x % 256) as u8);
            data.push((y % 256) as u8);
            data.push(((x + y) % 256) as u8);
        }
    }
    Bytes::from(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceSession;

    #[tokio::test]
    async fn test_granting_mock_counts_live_streams() {
        let devices = MockMediaDevices::granting(4, 4);
        assert_eq!(devices.live_streams(), 0);

        let mut session = DeviceSession::acquire(&devices).await.unwrap();
        assert_eq!(devices.acquire_calls(), 1);
        assert_eq!(devices.live_streams(), 1);
        assert!(session.current_frame().is_some());

        session.release();
        assert_eq!(devices.live_streams(), 0);
    }

    #[tokio::test]
    async fn test_denying_mock_reports_permission_denied() {
        let devices = MockMediaDevices::denying();
        let result = DeviceSession::acquire(&devices).await;

        assert!(matches!(
            result,
            Err(CaptureError::PermissionDenied { .. })
        ));
        assert_eq!(devices.acquire_calls(), 1);
        assert_eq!(devices.live_streams(), 0);
    }

    #[tokio::test]
    async fn test_frameless_mock_has_dimensions_but_no_frame() {
        let devices = MockMediaDevices::granting_frameless(8, 6);
        let session = DeviceSession::acquire(&devices).await.unwrap();

        assert_eq!(session.dimensions(), (8, 6));
        assert!(session.current_frame().is_none());
    }

    #[test]
    fn test_synthetic_frame_is_well_formed() {
        let frame = VideoFrame::new(5, 3, synthetic_rgb(5, 3), 0);
        assert!(frame.is_well_formed());
    }
}

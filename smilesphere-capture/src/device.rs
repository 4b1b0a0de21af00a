//! Device session management and the platform capture boundary
//!
//! The widget talks to camera hardware exclusively through the
//! [`MediaDevices`] trait. Acquisition is the single asynchronous operation
//! of the whole crate: the platform may show a permission prompt with
//! unbounded latency and no cancellation primitive, so callers re-check
//! their own state once the grant arrives.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CaptureError, CaptureResult};
use crate::frame::VideoFrame;

/// Live video stream handle produced by a granted acquisition
pub trait VideoStream: Send {
    /// Native resolution as (width, height); reports (0, 0) until the first
    /// frame has decoded
    fn dimensions(&self) -> (u32, u32);

    /// Most recent decoded frame, if any
    fn current_frame(&self) -> Option<VideoFrame>;

    /// Stop every underlying track. Further frames are never produced.
    fn stop(&mut self);
}

/// Platform boundary for camera access
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Whether the runtime exposes camera capture at all
    fn supported(&self) -> bool;

    /// Request a video-only stream from the platform
    ///
    /// May prompt the user for permission. Fails with
    /// [`CaptureError::PermissionDenied`] when the request is refused and
    /// [`CaptureError::DeviceUnavailable`] when no camera exists.
    async fn acquire_video(&self) -> CaptureResult<Box<dyn VideoStream>>;
}

/// Exclusive owner of one granted camera stream
///
/// At most one session is active per widget instance; the widget guards
/// against duplicate acquisition. [`DeviceSession::release`] is idempotent
/// and safe to call from UI events and page teardown alike.
pub struct DeviceSession {
    stream: Option<Box<dyn VideoStream>>,
}

impl std::fmt::Debug for DeviceSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceSession")
            .field("is_active", &self.is_active())
            .finish()
    }
}

impl DeviceSession {
    /// Acquire a video-only stream and wrap it in an active session
    ///
    /// Suspends until the platform resolves the request. On failure no
    /// session exists and no handle is retained.
    pub async fn acquire(devices: &dyn MediaDevices) -> CaptureResult<Self> {
        if !devices.supported() {
            return Err(CaptureError::DeviceUnavailable {
                reason: "camera capture is not supported in this runtime".to_string(),
            });
        }

        debug!("Requesting video stream from platform");
        let stream = devices.acquire_video().await?;
        let (width, height) = stream.dimensions();
        debug!(width, height, "Video stream granted");

        Ok(Self {
            stream: Some(stream),
        })
    }

    /// Whether the session still holds a live stream
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Native resolution of the stream, (0, 0) once released
    pub fn dimensions(&self) -> (u32, u32) {
        self.stream
            .as_ref()
            .map(|stream| stream.dimensions())
            .unwrap_or((0, 0))
    }

    /// Most recent decoded frame of the stream
    pub fn current_frame(&self) -> Option<VideoFrame> {
        self.stream
            .as_ref()
            .and_then(|stream| stream.current_frame())
    }

    /// Stop the underlying tracks and deactivate the session
    ///
    /// Idempotent: releasing an inactive session is a no-op and never fails.
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("Device session released");
        }
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        // The hardware handle must never outlive its owner.
        self.release();
    }
}

//! Hardware-backed media devices via `nokhwa`
//!
//! The camera is opened on a dedicated thread because `nokhwa::Camera` is
//! not `Send`. The thread decodes every frame to RGB24 and parks the most
//! recent one in a shared slot; `current_frame` only ever clones that slot,
//! so capture stays synchronous and lock contention stays negligible.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::{query, Camera};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::device::{MediaDevices, VideoStream};
use crate::error::{CaptureError, CaptureResult};
use crate::frame::VideoFrame;

const PREFERRED_WIDTH: u32 = 640;
const PREFERRED_HEIGHT: u32 = 480;
const PREFERRED_FPS: u32 = 30;

/// Camera platform backed by real hardware
#[derive(Debug, Clone)]
pub struct NativeMediaDevices {
    device_index: u32,
}

impl NativeMediaDevices {
    /// Use the first camera the platform enumerates
    pub fn new() -> Self {
        Self { device_index: 0 }
    }

    /// Use a specific camera by platform index
    pub fn with_device_index(device_index: u32) -> Self {
        Self { device_index }
    }
}

impl Default for NativeMediaDevices {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaDevices for NativeMediaDevices {
    fn supported(&self) -> bool {
        true
    }

    async fn acquire_video(&self) -> CaptureResult<Box<dyn VideoStream>> {
        let index = self.device_index;
        let stream = tokio::task::spawn_blocking(move || NativeStream::open(index))
            .await
            .map_err(|e| CaptureError::DeviceUnavailable {
                reason: e.to_string(),
            })??;
        Ok(Box::new(stream))
    }
}

/// Live hardware stream with a background decode thread
struct NativeStream {
    width: u32,
    height: u32,
    latest: Arc<Mutex<Option<VideoFrame>>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl NativeStream {
    /// Open the camera and block until the stream reports its format
    ///
    /// Must run on a blocking-capable thread; the permission prompt and the
    /// stream negotiation both have unbounded latency.
    fn open(device_index: u32) -> CaptureResult<Self> {
        let devices = query(ApiBackend::Auto).map_err(|e| classify(&e))?;
        if devices.is_empty() {
            return Err(CaptureError::DeviceUnavailable {
                reason: "no camera devices found".to_string(),
            });
        }

        let latest: Arc<Mutex<Option<VideoFrame>>> = Arc::new(Mutex::new(None));
        let stop = Arc::new(AtomicBool::new(false));
        let (info_tx, info_rx) = mpsc::channel::<CaptureResult<(u32, u32)>>();

        let thread_latest = Arc::clone(&latest);
        let thread_stop = Arc::clone(&stop);

        // The camera must be created inside the thread; nokhwa handles are
        // not Send on every platform backend.
        let thread = thread::spawn(move || {
            capture_loop(device_index, thread_latest, thread_stop, info_tx);
        });

        match info_rx.recv() {
            Ok(Ok((width, height))) => {
                debug!(width, height, "Native camera stream opened");
                Ok(Self {
                    width,
                    height,
                    latest,
                    stop,
                    thread: Some(thread),
                })
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(CaptureError::DeviceUnavailable {
                    reason: "capture thread terminated before reporting a format".to_string(),
                })
            }
        }
    }
}

impl VideoStream for NativeStream {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn current_frame(&self) -> Option<VideoFrame> {
        self.latest.lock().clone()
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for NativeStream {
    fn drop(&mut self) {
        VideoStream::stop(self);
    }
}

fn capture_loop(
    device_index: u32,
    latest: Arc<Mutex<Option<VideoFrame>>>,
    stop: Arc<AtomicBool>,
    info_tx: mpsc::Sender<CaptureResult<(u32, u32)>>,
) {
    let index = CameraIndex::Index(device_index);
    let preferred = Resolution::new(PREFERRED_WIDTH, PREFERRED_HEIGHT);

    // Format preference mirrors what webcams commonly negotiate: NV12,
    // then MJPEG, then whatever the camera offers at its best resolution.
    let attempts = [
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            preferred,
            FrameFormat::NV12,
            PREFERRED_FPS,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(CameraFormat::new(
            preferred,
            FrameFormat::MJPEG,
            PREFERRED_FPS,
        ))),
        RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution),
    ];

    let mut camera = None;
    let mut last_error = None;
    for requested in attempts {
        match Camera::new(index.clone(), requested) {
            Ok(opened) => {
                camera = Some(opened);
                break;
            }
            Err(e) => last_error = Some(e),
        }
    }

    let mut camera = match camera {
        Some(camera) => camera,
        None => {
            let error = match last_error {
                Some(e) => classify(&e),
                None => CaptureError::DeviceUnavailable {
                    reason: "no camera format accepted".to_string(),
                },
            };
            let _ = info_tx.send(Err(error));
            return;
        }
    };

    if let Err(e) = camera.open_stream() {
        let _ = info_tx.send(Err(classify(&e)));
        return;
    }

    let resolution = camera.resolution();
    let _ = info_tx.send(Ok((resolution.width(), resolution.height())));

    let started = Instant::now();
    while !stop.load(Ordering::Relaxed) {
        match camera.frame() {
            Ok(buffer) => {
                // Decode failures (torn MJPEG frames and the like) skip the
                // frame; the previous one stays in the slot.
                if let Ok(decoded) = buffer.decode_image::<RgbFormat>() {
                    let resolution = buffer.resolution();
                    let frame = VideoFrame::new(
                        resolution.width(),
                        resolution.height(),
                        Bytes::from(decoded.into_raw()),
                        started.elapsed().as_millis() as u64,
                    );
                    *latest.lock() = Some(frame);
                }
            }
            Err(e) => {
                warn!(error = %e, "Dropped camera frame");
            }
        }

        // camera.frame() already blocks for the next frame; this only
        // bounds how long a stop request can go unnoticed.
        thread::sleep(Duration::from_millis(1));
    }

    let _ = camera.stop_stream();
}

/// Map a platform error onto the capture taxonomy
///
/// Backends do not report permission refusals uniformly, so this falls back
/// to inspecting the message text.
fn classify(error: &nokhwa::NokhwaError) -> CaptureError {
    let reason = error.to_string();
    let lowered = reason.to_lowercase();
    if lowered.contains("permission")
        || lowered.contains("denied")
        || lowered.contains("authorization")
        || lowered.contains("access")
    {
        CaptureError::PermissionDenied { reason }
    } else {
        CaptureError::DeviceUnavailable { reason }
    }
}

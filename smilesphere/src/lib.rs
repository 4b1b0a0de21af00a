//! # SmileSphere - Photo Page Behavior
//!
//! SmileSphere is the client-side behavior layer of a photo-sharing page:
//! a camera capture widget plus the page's supporting features (flash
//! banner dismissal, upload preview, like toggle, password meter), all
//! headless behind a UI surface trait so any host toolkit can present it.
//!
//! ## Key Features
//!
//! - **Camera capture widget**: Acquire the camera, preview live video,
//!   capture a PNG still into the upload form, retake at will
//! - **Deterministic concurrency**: At most one device session, stale
//!   grants released, all visible behavior synchronous and testable
//! - **Headless by design**: Behavior emits plain side effects; hosts
//!   implement [`UiSurface`] to present them
//! - **Page features included**: Flash dismissal, upload preview, like
//!   toggle against the server, password strength meter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use smilesphere::{MockMediaDevices, PhotoPage, RecordingSurface, WidgetEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Build the page against a headless surface
//!     let mut page = PhotoPage::builder(RecordingSurface::new())
//!         .devices(Arc::new(MockMediaDevices::granting(640, 480)))
//!         .build()?;
//!
//!     // The visitor opens the camera tab; acquisition resolves async
//!     page.dispatch(WidgetEvent::CameraTabSelected);
//!     page.settle().await;
//!
//!     // Capture a still into the upload form field
//!     page.dispatch(WidgetEvent::CaptureRequested);
//!     println!("field: {:?}", page.surface().captured_field());
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use smilesphere_capture::{
    AcquireTicket, CaptureError, CaptureResult, CaptureWidget, Command, DeviceSession,
    FrameCapturer, MediaDevices, MockMediaDevices, Outcome, StillImage, UiEffect, UiRegion,
    UserNotice, VideoFrame, VideoStream, WidgetEvent, WidgetState, PNG_DATA_URL_PREFIX,
};

#[cfg(feature = "native-devices")]
pub use smilesphere_capture::NativeMediaDevices;

// Public API modules
pub mod config;
pub mod flash;
pub mod likes;
pub mod page;
pub mod password;
pub mod preview;
pub mod runtime;
pub mod surface;

// Re-export main API types
pub use config::{PageConfig, DEFAULT_LIKE_BASE_URL};
pub use flash::{FlashHandle, FlashSet};
pub use likes::{LikeClient, LikeError, LikeUpdate};
pub use page::{PageError, PhotoPage, PhotoPageBuilder};
pub use preview::PreviewImage;
pub use runtime::CaptureRuntime;
pub use surface::{RecordingSurface, UiSurface};

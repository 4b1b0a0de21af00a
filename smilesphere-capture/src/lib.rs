//! # SmileSphere Capture
//!
//! Camera capture core for the SmileSphere upload page. This crate owns the
//! capture widget state machine, device session management and still-image
//! encoding; it never touches a UI toolkit. Transitions return effects as
//! plain data, and the page layer applies them to real screen regions.

#![warn(clippy::all)]

pub mod backend;
pub mod controller;
pub mod device;
pub mod effects;
pub mod error;
pub mod events;
pub mod frame;
pub mod still;

// Re-export main types
pub use backend::MockMediaDevices;
#[cfg(feature = "native-devices")]
pub use backend::NativeMediaDevices;
pub use controller::{AcquireTicket, CaptureWidget, Command, Outcome, WidgetState};
pub use device::{DeviceSession, MediaDevices, VideoStream};
pub use effects::{UiEffect, UiRegion, UserNotice};
pub use error::{CaptureError, CaptureResult, ErrorCategory};
pub use events::WidgetEvent;
pub use frame::VideoFrame;
pub use still::{FrameCapturer, StillImage, PNG_DATA_URL_PREFIX};

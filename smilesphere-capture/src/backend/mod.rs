//! Capture backends
//!
//! A backend is any implementation of [`MediaDevices`](crate::device::MediaDevices):
//! the scriptable mock that tests and demos drive, and the hardware-backed
//! implementation behind the `native-devices` feature.

pub mod mock;

#[cfg(feature = "native-devices")]
pub mod native;

pub use mock::MockMediaDevices;

#[cfg(feature = "native-devices")]
pub use native::NativeMediaDevices;

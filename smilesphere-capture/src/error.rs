//! Capture error types and handling
//!
//! This module defines the error taxonomy of the capture widget. Acquisition
//! failures are surfaced to the user exactly once and never retried
//! automatically; a premature capture is transient and recovered silently.

use thiserror::Error;

/// Main error type for capture operations
#[derive(Error, Debug)]
pub enum CaptureError {
    /// User or OS refused camera access
    #[error("Camera permission denied: {reason}")]
    PermissionDenied {
        /// Platform-reported refusal reason
        reason: String,
    },

    /// No camera hardware exists, or the capture API is absent in the runtime
    #[error("Camera unavailable: {reason}")]
    DeviceUnavailable {
        /// Platform-reported failure reason
        reason: String,
    },

    /// Capture attempted before the stream decoded its first frame
    #[error("No frame available yet")]
    NoFrameAvailable,

    /// Frame buffer did not match the stream's reported dimensions
    #[error("Invalid frame data: expected {expected} bytes, got {actual}")]
    InvalidFrameData {
        /// Expected buffer size
        expected: usize,
        /// Actual buffer size
        actual: usize,
    },

    /// PNG encoding of a captured frame failed
    #[error("Still encoding failed: {reason}")]
    EncodingFailed {
        /// Failure reason
        reason: String,
    },
}

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

impl CaptureError {
    /// Check if the error is transient and should be swallowed by the widget
    /// rather than shown to the user.
    pub fn is_transient(&self) -> bool {
        match self {
            CaptureError::NoFrameAvailable => true,
            CaptureError::InvalidFrameData { .. } => true,
            CaptureError::PermissionDenied { .. } => false,
            CaptureError::DeviceUnavailable { .. } => false,
            CaptureError::EncodingFailed { .. } => false,
        }
    }

    /// Check if the error is an acquisition failure that must be reported to
    /// the user with the camera-permissions message.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(
            self,
            CaptureError::PermissionDenied { .. } | CaptureError::DeviceUnavailable { .. }
        )
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            CaptureError::PermissionDenied { .. } => ErrorCategory::Access,
            CaptureError::DeviceUnavailable { .. } => ErrorCategory::Device,
            CaptureError::NoFrameAvailable => ErrorCategory::Stream,
            CaptureError::InvalidFrameData { .. } => ErrorCategory::Data,
            CaptureError::EncodingFailed { .. } => ErrorCategory::Encoding,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Permission and access errors
    Access,
    /// Device and hardware errors
    Device,
    /// Stream readiness errors
    Stream,
    /// Data validation errors
    Data,
    /// Image encoding errors
    Encoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let denied = CaptureError::PermissionDenied {
            reason: "user dismissed the prompt".to_string(),
        };
        assert_eq!(denied.category(), ErrorCategory::Access);
        assert!(!denied.is_transient());
        assert!(denied.is_acquisition_failure());

        let premature = CaptureError::NoFrameAvailable;
        assert_eq!(premature.category(), ErrorCategory::Stream);
        assert!(premature.is_transient());
        assert!(!premature.is_acquisition_failure());
    }

    #[test]
    fn test_error_display() {
        let error = CaptureError::InvalidFrameData {
            expected: 1024,
            actual: 512,
        };
        assert_eq!(
            error.to_string(),
            "Invalid frame data: expected 1024 bytes, got 512"
        );

        let error = CaptureError::NoFrameAvailable;
        assert_eq!(error.to_string(), "No frame available yet");
    }

    #[test]
    fn test_unavailable_is_acquisition_failure() {
        let error = CaptureError::DeviceUnavailable {
            reason: "no video input found".to_string(),
        };
        assert!(error.is_acquisition_failure());
        assert_eq!(error.category(), ErrorCategory::Device);
    }
}

//! Side effects emitted by widget transitions
//!
//! Transitions return effects as plain data instead of touching any UI
//! toolkit. The page layer owns a thin adapter that applies them to real
//! regions; tests record them and assert on the resulting flags.

use crate::still::StillImage;

/// Named page regions the widget shows and hides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiRegion {
    /// The capture button
    CaptureButton,
    /// The retake button
    RetakeButton,
    /// The file-picker preview container on the upload tab
    UploadPreview,
}

/// Messages the widget surfaces to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserNotice {
    /// Device acquisition failed; the user must re-trigger the camera tab
    CameraAccessFailed,
    /// The runtime has no camera support; the file upload remains usable
    CameraUnsupported,
}

impl UserNotice {
    /// User-facing message text
    pub fn message(&self) -> &'static str {
        match self {
            UserNotice::CameraAccessFailed => {
                "Error accessing camera. Please make sure you've granted camera permissions."
            }
            UserNotice::CameraUnsupported => {
                "Your browser doesn't support camera access. Please use the file upload option."
            }
        }
    }
}

/// Externally observable effects of a widget transition
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Make a region visible
    ShowRegion(UiRegion),
    /// Hide a region
    HideRegion(UiRegion),
    /// Bind the granted stream to the live preview element
    AttachPreview,
    /// Unbind the stream from the live preview element
    DetachPreview,
    /// Resume live playback
    StartPlayback,
    /// Pause live playback
    PausePlayback,
    /// Write the capture payload into the upload form field
    SetCapturedField(StillImage),
    /// Clear the upload form field
    ClearCapturedField,
    /// Show a blocking notice to the user
    Alert(UserNotice),
    /// Fire the cosmetic shutter animation
    ShutterPulse,
}

impl UiEffect {
    /// Get the effect type as a string
    pub fn effect_type(&self) -> &'static str {
        match self {
            UiEffect::ShowRegion(_) => "show_region",
            UiEffect::HideRegion(_) => "hide_region",
            UiEffect::AttachPreview => "attach_preview",
            UiEffect::DetachPreview => "detach_preview",
            UiEffect::StartPlayback => "start_playback",
            UiEffect::PausePlayback => "pause_playback",
            UiEffect::SetCapturedField(_) => "set_captured_field",
            UiEffect::ClearCapturedField => "clear_captured_field",
            UiEffect::Alert(_) => "alert",
            UiEffect::ShutterPulse => "shutter_pulse",
        }
    }

    /// Check if this effect carries the capture payload
    pub fn is_field_write(&self) -> bool {
        matches!(self, UiEffect::SetCapturedField(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages_match_the_page() {
        assert_eq!(
            UserNotice::CameraAccessFailed.message(),
            "Error accessing camera. Please make sure you've granted camera permissions."
        );
        assert_eq!(
            UserNotice::CameraUnsupported.message(),
            "Your browser doesn't support camera access. Please use the file upload option."
        );
    }

    #[test]
    fn test_effect_type_names() {
        assert_eq!(
            UiEffect::ShowRegion(UiRegion::CaptureButton).effect_type(),
            "show_region"
        );
        assert_eq!(UiEffect::ShutterPulse.effect_type(), "shutter_pulse");
        assert!(UiEffect::SetCapturedField(StillImage::from_png(vec![1])).is_field_write());
        assert!(!UiEffect::ClearCapturedField.is_field_write());
    }
}

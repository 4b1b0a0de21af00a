//! Widget input events
//!
//! Each event is a named signal with no payload, delivered in the order the
//! user and the page produce them. The widget performs no reordering or
//! debouncing.

/// Events the capture widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The camera tab was activated
    CameraTabSelected,
    /// The upload tab was activated
    UploadTabSelected,
    /// The capture button was pressed
    CaptureRequested,
    /// The retake button was pressed
    RetakeRequested,
    /// The page is being torn down
    PageUnloading,
}

impl WidgetEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            WidgetEvent::CameraTabSelected => "camera_tab_selected",
            WidgetEvent::UploadTabSelected => "upload_tab_selected",
            WidgetEvent::CaptureRequested => "capture_requested",
            WidgetEvent::RetakeRequested => "retake_requested",
            WidgetEvent::PageUnloading => "page_unloading",
        }
    }

    /// Check if this is a tab-switch event
    pub fn is_tab_switch(&self) -> bool {
        matches!(
            self,
            WidgetEvent::CameraTabSelected | WidgetEvent::UploadTabSelected
        )
    }

    /// Check if this event tears the device session down unconditionally
    pub fn is_teardown(&self) -> bool {
        matches!(
            self,
            WidgetEvent::UploadTabSelected | WidgetEvent::PageUnloading
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(
            WidgetEvent::CameraTabSelected.event_type(),
            "camera_tab_selected"
        );
        assert_eq!(WidgetEvent::PageUnloading.event_type(), "page_unloading");
    }

    #[test]
    fn test_event_classification() {
        assert!(WidgetEvent::CameraTabSelected.is_tab_switch());
        assert!(WidgetEvent::UploadTabSelected.is_tab_switch());
        assert!(!WidgetEvent::CaptureRequested.is_tab_switch());

        assert!(WidgetEvent::UploadTabSelected.is_teardown());
        assert!(WidgetEvent::PageUnloading.is_teardown());
        assert!(!WidgetEvent::CameraTabSelected.is_teardown());
        assert!(!WidgetEvent::RetakeRequested.is_teardown());
    }
}

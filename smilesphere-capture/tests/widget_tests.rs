//! Scenario tests for the capture widget
//!
//! These drive the widget through full user journeys with the mock platform
//! and assert on states, effect sequences and the platform counters.

use smilesphere_capture::*;

fn acquire_ticket(outcome: &Outcome) -> AcquireTicket {
    match outcome.command {
        Some(Command::Acquire(ticket)) => ticket,
        None => panic!("expected an acquire command, got {:?}", outcome),
    }
}

async fn resolve(
    widget: &mut CaptureWidget,
    ticket: AcquireTicket,
    devices: &MockMediaDevices,
) -> Vec<UiEffect> {
    widget.device_acquired(ticket, DeviceSession::acquire(devices).await)
}

// ============================================================================
// WIDGET LIFECYCLE TESTS
// ============================================================================

#[tokio::test]
async fn test_full_capture_journey() {
    let devices = MockMediaDevices::granting(16, 12);
    let mut widget = CaptureWidget::new(devices.supported());

    // Camera tab: acquisition starts, nothing visible changes yet.
    let outcome = widget.handle_event(WidgetEvent::CameraTabSelected);
    assert!(outcome.effects.is_empty());
    let ticket = acquire_ticket(&outcome);
    assert_eq!(widget.state(), WidgetState::Idle);

    // Grant arrives: preview goes live.
    let effects = resolve(&mut widget, ticket, &devices).await;
    assert_eq!(effects[0], UiEffect::AttachPreview);
    assert_eq!(effects[1], UiEffect::StartPlayback);
    assert_eq!(widget.state(), WidgetState::Live);

    // Capture: preview freezes, the form field gets the payload.
    let outcome = widget.handle_event(WidgetEvent::CaptureRequested);
    assert_eq!(widget.state(), WidgetState::Captured);
    assert!(outcome.effects.iter().any(|e| e.is_field_write()));
    assert!(outcome.effects.contains(&UiEffect::PausePlayback));

    // Retake: back to live, field cleared.
    let outcome = widget.handle_event(WidgetEvent::RetakeRequested);
    assert_eq!(widget.state(), WidgetState::Live);
    assert!(outcome.effects.contains(&UiEffect::ClearCapturedField));
    assert!(widget.still().is_none());

    // Second capture, then away to the upload tab.
    widget.handle_event(WidgetEvent::CaptureRequested);
    assert!(widget.still().is_some());

    let outcome = widget.handle_event(WidgetEvent::UploadTabSelected);
    assert_eq!(outcome.effects, vec![UiEffect::DetachPreview]);
    assert_eq!(widget.state(), WidgetState::Idle);
    assert_eq!(devices.live_streams(), 0);
    // The captured payload survives the tab switch.
    assert!(widget.still().is_some());
}

#[tokio::test]
async fn test_reacquire_after_upload_tab_round_trip() {
    let devices = MockMediaDevices::granting(8, 6);
    let mut widget = CaptureWidget::new(true);

    let ticket = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    resolve(&mut widget, ticket, &devices).await;
    widget.handle_event(WidgetEvent::UploadTabSelected);
    assert_eq!(devices.live_streams(), 0);

    // Coming back re-acquires from scratch.
    let ticket = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    let effects = resolve(&mut widget, ticket, &devices).await;
    assert_eq!(effects[0], UiEffect::AttachPreview);
    assert_eq!(widget.state(), WidgetState::Live);
    assert_eq!(devices.acquire_calls(), 2);
    assert_eq!(devices.live_streams(), 1);
}

#[tokio::test]
async fn test_page_unload_after_capture_releases_everything() {
    let devices = MockMediaDevices::granting(8, 6);
    let mut widget = CaptureWidget::new(true);

    let ticket = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    resolve(&mut widget, ticket, &devices).await;
    widget.handle_event(WidgetEvent::CaptureRequested);

    let outcome = widget.handle_event(WidgetEvent::PageUnloading);
    assert_eq!(outcome.effects, vec![UiEffect::DetachPreview]);
    assert_eq!(widget.state(), WidgetState::Idle);
    assert!(!widget.session_active());
    assert_eq!(devices.live_streams(), 0);
}

// ============================================================================
// SESSION INVARIANT TESTS
// ============================================================================

#[tokio::test]
async fn test_at_most_one_session_across_tab_storm() {
    let devices = MockMediaDevices::granting(8, 6);
    let mut widget = CaptureWidget::new(true);

    for _ in 0..3 {
        let outcome = widget.handle_event(WidgetEvent::CameraTabSelected);
        if let Some(Command::Acquire(ticket)) = outcome.command {
            resolve(&mut widget, ticket, &devices).await;
        }
        assert!(devices.live_streams() <= 1);

        widget.handle_event(WidgetEvent::UploadTabSelected);
        assert_eq!(devices.live_streams(), 0);
    }

    // One acquisition per round trip, never more.
    assert_eq!(devices.acquire_calls(), 3);
}

#[tokio::test]
async fn test_unsupported_widget_never_touches_the_platform() {
    let devices = MockMediaDevices::unsupported();
    let mut widget = CaptureWidget::new(devices.supported());

    for event in [
        WidgetEvent::CameraTabSelected,
        WidgetEvent::CaptureRequested,
        WidgetEvent::RetakeRequested,
        WidgetEvent::UploadTabSelected,
        WidgetEvent::CameraTabSelected,
        WidgetEvent::PageUnloading,
    ] {
        let outcome = widget.handle_event(event);
        assert!(outcome.command.is_none());
    }

    assert_eq!(devices.acquire_calls(), 0);
    assert_eq!(widget.state(), WidgetState::Unsupported);
}

#[tokio::test]
async fn test_repeated_camera_tab_issues_one_request() {
    let devices = MockMediaDevices::granting(8, 6);
    let mut widget = CaptureWidget::new(true);

    let first = widget.handle_event(WidgetEvent::CameraTabSelected);
    let ticket = acquire_ticket(&first);

    // Impatient re-clicks while the prompt is open.
    for _ in 0..4 {
        let again = widget.handle_event(WidgetEvent::CameraTabSelected);
        assert!(again.command.is_none());
    }

    resolve(&mut widget, ticket, &devices).await;
    assert_eq!(devices.acquire_calls(), 1);
    assert_eq!(widget.state(), WidgetState::Live);
}

// ============================================================================
// CANCELLATION AND FAILURE TESTS
// ============================================================================

#[tokio::test]
async fn test_grant_after_leaving_camera_tab_is_released() {
    let devices = MockMediaDevices::granting(8, 6);
    let mut widget = CaptureWidget::new(true);

    let ticket = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    widget.handle_event(WidgetEvent::UploadTabSelected);

    let effects = resolve(&mut widget, ticket, &devices).await;
    assert!(effects.is_empty());
    assert_eq!(widget.state(), WidgetState::Idle);
    assert_eq!(devices.live_streams(), 0);
}

#[tokio::test]
async fn test_stale_grant_does_not_shadow_a_fresh_request() {
    let devices = MockMediaDevices::granting(8, 6);
    let mut widget = CaptureWidget::new(true);

    let first = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    widget.handle_event(WidgetEvent::UploadTabSelected);
    let second = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));

    // The abandoned grant lands first and must not go live.
    let effects = resolve(&mut widget, first, &devices).await;
    assert!(effects.is_empty());
    assert_eq!(widget.state(), WidgetState::Idle);

    // The fresh grant still wins.
    let effects = resolve(&mut widget, second, &devices).await;
    assert_eq!(effects[0], UiEffect::AttachPreview);
    assert_eq!(widget.state(), WidgetState::Live);
    assert_eq!(devices.acquire_calls(), 2);
    assert_eq!(devices.live_streams(), 1);
}

#[tokio::test]
async fn test_grant_after_page_unload_is_released() {
    let devices = MockMediaDevices::granting(8, 6);
    let mut widget = CaptureWidget::new(true);

    let ticket = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    widget.handle_event(WidgetEvent::PageUnloading);

    let effects = resolve(&mut widget, ticket, &devices).await;
    assert!(effects.is_empty());
    assert_eq!(devices.live_streams(), 0);
}

#[tokio::test]
async fn test_denied_grant_allows_manual_retry() {
    let denying = MockMediaDevices::denying();
    let granting = MockMediaDevices::granting(8, 6);
    let mut widget = CaptureWidget::new(true);

    let ticket = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    let effects = resolve(&mut widget, ticket, &denying).await;
    assert_eq!(
        effects,
        vec![UiEffect::Alert(UserNotice::CameraAccessFailed)]
    );
    assert_eq!(widget.state(), WidgetState::Idle);

    // No automatic retry happened; the user re-triggers by hand.
    let ticket = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    let effects = resolve(&mut widget, ticket, &granting).await;
    assert_eq!(effects[0], UiEffect::AttachPreview);
    assert_eq!(widget.state(), WidgetState::Live);
}

#[tokio::test]
async fn test_unavailable_device_reports_the_same_notice() {
    let devices = MockMediaDevices::unavailable();
    let mut widget = CaptureWidget::new(true);

    let ticket = acquire_ticket(&widget.handle_event(WidgetEvent::CameraTabSelected));
    let effects = resolve(&mut widget, ticket, &devices).await;

    assert_eq!(
        effects,
        vec![UiEffect::Alert(UserNotice::CameraAccessFailed)]
    );
    assert_eq!(widget.state(), WidgetState::Idle);
}

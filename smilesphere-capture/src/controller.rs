//! Capture widget state machine
//!
//! The widget is a synchronous transition function over `(state, event)`
//! pairs. Each transition returns an [`Outcome`]: UI effects to apply in
//! order, plus at most one [`Command`] for work the caller must run
//! asynchronously. The only such work is device acquisition, which resolves
//! through [`CaptureWidget::device_acquired`] with the ticket it was issued.
//!
//! Tickets exist because acquisition cannot be cancelled: when the user
//! leaves the camera tab while the permission prompt is still open, the
//! pending ticket is dropped, and the grant that later arrives with a stale
//! ticket has its stream released on the spot. This keeps the invariant
//! that at most one device session is active per widget.

use tracing::{debug, warn};

use crate::device::DeviceSession;
use crate::effects::{UiEffect, UiRegion, UserNotice};
use crate::error::CaptureResult;
use crate::events::WidgetEvent;
use crate::still::{FrameCapturer, StillImage};

/// Observable states of the capture widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// No device session held
    #[default]
    Idle,
    /// A session is active and the preview is playing
    Live,
    /// The preview is frozen and a still payload is held
    Captured,
    /// The runtime cannot capture; acquisition is never attempted
    Unsupported,
}

/// Ticket identifying one acquisition request
///
/// A grant whose ticket no longer matches the widget's pending request is
/// stale and must not go live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquireTicket(u64);

/// Asynchronous work a transition requests from the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Acquire a device session, then report back with this ticket
    Acquire(AcquireTicket),
}

/// Result of feeding one event through the widget
#[derive(Debug, Default)]
pub struct Outcome {
    /// Effects to apply to the page, in order
    pub effects: Vec<UiEffect>,
    /// Follow-up work, if the transition needs any
    pub command: Option<Command>,
}

impl Outcome {
    fn none() -> Self {
        Self::default()
    }

    fn effects(effects: Vec<UiEffect>) -> Self {
        Self {
            effects,
            command: None,
        }
    }
}

/// The capture widget controller
///
/// Owns the device session, the frame capturer and the captured still.
/// All methods are synchronous; the caller runs the acquisition command on
/// its own executor and feeds the result back in.
#[derive(Debug)]
pub struct CaptureWidget {
    state: WidgetState,
    session: Option<DeviceSession>,
    capturer: FrameCapturer,
    still: Option<StillImage>,
    next_ticket: u64,
    pending: Option<AcquireTicket>,
}

impl CaptureWidget {
    /// Create a widget for a runtime that does or does not support capture
    ///
    /// An unsupported widget never issues acquisition commands; the camera
    /// tab only raises the unsupported notice.
    pub fn new(supported: bool) -> Self {
        let state = if supported {
            WidgetState::Idle
        } else {
            WidgetState::Unsupported
        };
        Self {
            state,
            session: None,
            capturer: FrameCapturer::new(),
            still: None,
            next_ticket: 0,
            pending: None,
        }
    }

    /// Current state
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// The still held from the most recent capture, if any
    ///
    /// Survives leaving the camera tab; only a retake or a newer capture
    /// replaces it.
    pub fn still(&self) -> Option<&StillImage> {
        self.still.as_ref()
    }

    /// Whether a device session is currently active
    pub fn session_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_active())
    }

    /// Whether an acquisition request is in flight
    pub fn has_pending_acquire(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one event through the transition table
    pub fn handle_event(&mut self, event: WidgetEvent) -> Outcome {
        debug!(state = ?self.state, event = event.event_type(), "Widget event");

        match (self.state, event) {
            (WidgetState::Idle, WidgetEvent::CameraTabSelected) => self.begin_acquisition(),
            (WidgetState::Unsupported, WidgetEvent::CameraTabSelected) => {
                Outcome::effects(vec![UiEffect::Alert(UserNotice::CameraUnsupported)])
            }
            // One live session per widget: re-entering the camera tab while
            // a session exists never re-acquires.
            (WidgetState::Live | WidgetState::Captured, WidgetEvent::CameraTabSelected) => {
                Outcome::none()
            }

            (
                WidgetState::Idle | WidgetState::Unsupported,
                WidgetEvent::UploadTabSelected,
            ) => {
                // Leaving the camera tab invalidates a grant still in flight.
                self.pending = None;
                Outcome::none()
            }
            (WidgetState::Live | WidgetState::Captured, WidgetEvent::UploadTabSelected) => {
                self.teardown(WidgetState::Idle)
            }

            (WidgetState::Live, WidgetEvent::CaptureRequested) => self.capture(),
            (_, WidgetEvent::CaptureRequested) => Outcome::none(),

            (WidgetState::Captured, WidgetEvent::RetakeRequested) => self.retake(),
            (_, WidgetEvent::RetakeRequested) => Outcome::none(),

            (_, WidgetEvent::PageUnloading) => {
                let after = if self.state == WidgetState::Unsupported {
                    WidgetState::Unsupported
                } else {
                    WidgetState::Idle
                };
                self.teardown(after)
            }
        }
    }

    /// Resolve an acquisition command issued by an earlier transition
    ///
    /// A grant is fresh only while the widget is still idle and the ticket
    /// still matches its pending request. A stale grant's stream is
    /// released immediately and produces no effects.
    pub fn device_acquired(
        &mut self,
        ticket: AcquireTicket,
        result: CaptureResult<DeviceSession>,
    ) -> Vec<UiEffect> {
        let fresh = self.state == WidgetState::Idle && self.pending == Some(ticket);
        if !fresh {
            debug!(ticket = ticket.0, "Stale device grant; releasing stream");
            if let Ok(mut session) = result {
                session.release();
            }
            return Vec::new();
        }
        self.pending = None;

        match result {
            Ok(session) => {
                let (width, height) = session.dimensions();
                debug!(ticket = ticket.0, width, height, "Entering live state");
                self.session = Some(session);
                self.state = WidgetState::Live;
                vec![
                    UiEffect::AttachPreview,
                    UiEffect::StartPlayback,
                    UiEffect::ShowRegion(UiRegion::CaptureButton),
                    UiEffect::HideRegion(UiRegion::RetakeButton),
                ]
            }
            Err(e) => {
                warn!(ticket = ticket.0, error = %e, "Device acquisition failed");
                vec![UiEffect::Alert(UserNotice::CameraAccessFailed)]
            }
        }
    }

    fn begin_acquisition(&mut self) -> Outcome {
        if self.pending.is_some() {
            debug!("Acquisition already in flight; ignoring camera tab");
            return Outcome::none();
        }

        self.next_ticket += 1;
        let ticket = AcquireTicket(self.next_ticket);
        self.pending = Some(ticket);
        debug!(ticket = ticket.0, "Requesting device acquisition");

        Outcome {
            effects: Vec::new(),
            command: Some(Command::Acquire(ticket)),
        }
    }

    fn capture(&mut self) -> Outcome {
        let session = match self.session.as_ref() {
            Some(session) => session,
            None => {
                warn!("Capture requested in live state without a session");
                return Outcome::none();
            }
        };

        match self.capturer.capture(session) {
            Ok(still) => {
                let effects = vec![
                    UiEffect::ShutterPulse,
                    UiEffect::SetCapturedField(still.clone()),
                    UiEffect::HideRegion(UiRegion::CaptureButton),
                    UiEffect::ShowRegion(UiRegion::RetakeButton),
                    UiEffect::PausePlayback,
                ];
                self.still = Some(still);
                self.state = WidgetState::Captured;
                debug!("Still captured; preview frozen");
                Outcome::effects(effects)
            }
            Err(e) if e.is_transient() => {
                // The stream has not produced a usable frame yet. The user
                // stays live and can press capture again.
                debug!(error = %e, "Premature capture ignored");
                Outcome::none()
            }
            Err(e) => {
                warn!(error = %e, "Capture failed");
                Outcome::none()
            }
        }
    }

    fn retake(&mut self) -> Outcome {
        self.still = None;
        self.state = WidgetState::Live;
        debug!("Retake requested; resuming live preview");
        Outcome::effects(vec![
            UiEffect::ClearCapturedField,
            UiEffect::ShowRegion(UiRegion::CaptureButton),
            UiEffect::HideRegion(UiRegion::RetakeButton),
            UiEffect::StartPlayback,
        ])
    }

    fn teardown(&mut self, after: WidgetState) -> Outcome {
        self.pending = None;

        let effects = match self.session.take() {
            Some(mut session) => {
                session.release();
                debug!("Device session released on teardown");
                vec![UiEffect::DetachPreview]
            }
            None => Vec::new(),
        };

        self.state = after;
        Outcome::effects(effects)
    }
}

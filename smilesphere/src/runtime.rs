//! Async adapter between the widget and its host event loop
//!
//! The widget itself is synchronous; device acquisition is the one
//! operation that suspends. The runtime owns that boundary: acquisition
//! commands are spawned onto tokio, and each grant comes back over a
//! channel with the ticket it was issued. Grants take effect only when the
//! host drains them through [`CaptureRuntime::settle`], so event ordering
//! stays exactly the order the host applies things in.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use smilesphere_capture::{
    AcquireTicket, CaptureResult, CaptureWidget, Command, DeviceSession, MediaDevices, UiEffect,
    WidgetEvent, WidgetState,
};

use crate::surface::UiSurface;

type Grant = (AcquireTicket, CaptureResult<DeviceSession>);

/// Drives one capture widget against a UI surface
pub struct CaptureRuntime<S> {
    widget: CaptureWidget,
    devices: Arc<dyn MediaDevices>,
    surface: S,
    grant_tx: mpsc::UnboundedSender<Grant>,
    grant_rx: mpsc::UnboundedReceiver<Grant>,
    outstanding: usize,
}

impl<S: UiSurface> CaptureRuntime<S> {
    /// Create a runtime for the given platform and surface
    ///
    /// Platform support is probed once here; an unsupported platform yields
    /// a widget that never attempts acquisition.
    pub fn new(devices: Arc<dyn MediaDevices>, surface: S) -> Self {
        let widget = CaptureWidget::new(devices.supported());
        let (grant_tx, grant_rx) = mpsc::unbounded_channel();
        Self {
            widget,
            devices,
            surface,
            grant_tx,
            grant_rx,
            outstanding: 0,
        }
    }

    /// Feed one event through the widget and apply its effects
    ///
    /// Synchronous: any acquisition the transition requests is spawned, not
    /// awaited. Call [`CaptureRuntime::settle`] to apply resolved grants.
    pub fn dispatch(&mut self, event: WidgetEvent) {
        let outcome = self.widget.handle_event(event);
        self.apply(&outcome.effects);

        if let Some(Command::Acquire(ticket)) = outcome.command {
            self.spawn_acquire(ticket);
        }
    }

    /// Await every in-flight acquisition and apply its effects
    pub async fn settle(&mut self) {
        while self.outstanding > 0 {
            match self.grant_rx.recv().await {
                Some((ticket, result)) => {
                    self.outstanding -= 1;
                    let effects = self.widget.device_acquired(ticket, result);
                    self.apply(&effects);
                }
                None => break,
            }
        }
    }

    /// Current widget state
    pub fn state(&self) -> WidgetState {
        self.widget.state()
    }

    /// The widget itself
    pub fn widget(&self) -> &CaptureWidget {
        &self.widget
    }

    /// The surface being driven
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface for page-level features
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn spawn_acquire(&mut self, ticket: AcquireTicket) {
        let devices = Arc::clone(&self.devices);
        let grant_tx = self.grant_tx.clone();
        self.outstanding += 1;
        debug!(?ticket, "Spawning device acquisition");

        tokio::spawn(async move {
            let result = DeviceSession::acquire(devices.as_ref()).await;
            // The receiver only disappears when the whole runtime is gone;
            // an undeliverable session stops its stream on drop.
            let _ = grant_tx.send((ticket, result));
        });
    }

    fn apply(&mut self, effects: &[UiEffect]) {
        for effect in effects {
            self.surface.apply(effect);
        }
    }
}

//! UI surface contract and the recording surface
//!
//! The capture core emits effects as plain data; a [`UiSurface`] turns them
//! into presentation. Real hosts wrap their toolkit behind this trait. The
//! [`RecordingSurface`] is the headless implementation tests and demos use:
//! it applies every effect to an in-memory model of the page and keeps an
//! ordered log.

use std::collections::HashMap;

use smilesphere_capture::{UiEffect, UiRegion, UserNotice};

/// Toolkit boundary the page layer drives
///
/// All methods are synchronous. A surface owns presentation only; behavior
/// stays in the capture core and the page layer.
pub trait UiSurface {
    /// Make a named region visible
    fn show_region(&mut self, region: UiRegion);

    /// Hide a named region
    fn hide_region(&mut self, region: UiRegion);

    /// Bind the granted stream to the live preview element
    fn attach_preview(&mut self);

    /// Unbind the stream from the live preview element
    fn detach_preview(&mut self);

    /// Resume playback on the preview element
    fn start_playback(&mut self);

    /// Pause playback on the preview element
    fn pause_playback(&mut self);

    /// Write the capture payload into the upload form field
    fn set_captured_field(&mut self, data_url: String);

    /// Clear the upload form field
    fn clear_captured_field(&mut self);

    /// Show a blocking notice to the user
    fn alert(&mut self, notice: UserNotice);

    /// Fire the cosmetic shutter animation
    fn shutter_pulse(&mut self);

    /// Apply one core effect to this surface
    ///
    /// The capture payload crosses the toolkit boundary as its data URL,
    /// which is the exact value the upload form submits.
    fn apply(&mut self, effect: &UiEffect) {
        match effect {
            UiEffect::ShowRegion(region) => self.show_region(*region),
            UiEffect::HideRegion(region) => self.hide_region(*region),
            UiEffect::AttachPreview => self.attach_preview(),
            UiEffect::DetachPreview => self.detach_preview(),
            UiEffect::StartPlayback => self.start_playback(),
            UiEffect::PausePlayback => self.pause_playback(),
            UiEffect::SetCapturedField(still) => self.set_captured_field(still.to_data_url()),
            UiEffect::ClearCapturedField => self.clear_captured_field(),
            UiEffect::Alert(notice) => self.alert(*notice),
            UiEffect::ShutterPulse => self.shutter_pulse(),
        }
    }
}

/// Headless surface that models the page in memory
#[derive(Debug, Default)]
pub struct RecordingSurface {
    visible: HashMap<UiRegion, bool>,
    preview_attached: bool,
    playing: bool,
    captured_field: Option<String>,
    alerts: Vec<UserNotice>,
    shutter_pulses: usize,
    log: Vec<&'static str>,
}

impl RecordingSurface {
    /// Create an empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Visibility of a region, if any effect has touched it yet
    pub fn region_visible(&self, region: UiRegion) -> Option<bool> {
        self.visible.get(&region).copied()
    }

    /// Whether a stream is bound to the preview element
    pub fn preview_attached(&self) -> bool {
        self.preview_attached
    }

    /// Whether the preview element is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current value of the upload form field
    pub fn captured_field(&self) -> Option<&str> {
        self.captured_field.as_deref()
    }

    /// Every alert shown so far, oldest first
    pub fn alerts(&self) -> &[UserNotice] {
        &self.alerts
    }

    /// Number of shutter animations fired
    pub fn shutter_pulses(&self) -> usize {
        self.shutter_pulses
    }

    /// Ordered log of applied effect types
    pub fn effect_log(&self) -> &[&'static str] {
        &self.log
    }
}

impl UiSurface for RecordingSurface {
    fn show_region(&mut self, region: UiRegion) {
        self.visible.insert(region, true);
        self.log.push("show_region");
    }

    fn hide_region(&mut self, region: UiRegion) {
        self.visible.insert(region, false);
        self.log.push("hide_region");
    }

    fn attach_preview(&mut self) {
        self.preview_attached = true;
        self.log.push("attach_preview");
    }

    fn detach_preview(&mut self) {
        // Unbinding the stream necessarily halts playback as well.
        self.preview_attached = false;
        self.playing = false;
        self.log.push("detach_preview");
    }

    fn start_playback(&mut self) {
        self.playing = true;
        self.log.push("start_playback");
    }

    fn pause_playback(&mut self) {
        self.playing = false;
        self.log.push("pause_playback");
    }

    fn set_captured_field(&mut self, data_url: String) {
        self.captured_field = Some(data_url);
        self.log.push("set_captured_field");
    }

    fn clear_captured_field(&mut self) {
        self.captured_field = None;
        self.log.push("clear_captured_field");
    }

    fn alert(&mut self, notice: UserNotice) {
        self.alerts.push(notice);
        self.log.push("alert");
    }

    fn shutter_pulse(&mut self) {
        self.shutter_pulses += 1;
        self.log.push("shutter_pulse");
    }
}

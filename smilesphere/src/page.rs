//! The photo page facade
//!
//! One value owning every client-side behavior of the page: the capture
//! widget runtime, flash banner dismissal, the upload preview, and the
//! like client. Hosts build it against their own [`UiSurface`] and feed
//! it events as the visitor produces them.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use smilesphere_capture::{MediaDevices, UiRegion, WidgetEvent, WidgetState};

use crate::config::PageConfig;
use crate::flash::{FlashHandle, FlashSet};
use crate::likes::{LikeClient, LikeError, LikeUpdate};
use crate::preview::PreviewImage;
use crate::runtime::CaptureRuntime;
use crate::surface::UiSurface;

/// Error building or driving a photo page
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Missing configuration error
    #[error("Missing required configuration: {field}")]
    MissingConfiguration {
        /// Missing configuration field
        field: String,
    },

    /// Like client error
    #[error("Like client error: {0}")]
    LikeClient(#[from] LikeError),
}

/// Client-side behavior of one photo page
pub struct PhotoPage<S: UiSurface> {
    runtime: CaptureRuntime<S>,
    flashes: FlashSet,
    likes: LikeClient,
    preview: Option<PreviewImage>,
}

impl<S: UiSurface> PhotoPage<S> {
    /// Start building a page against the given surface
    pub fn builder(surface: S) -> PhotoPageBuilder<S> {
        PhotoPageBuilder::new(surface)
    }

    /// Feed one widget event through the capture runtime
    ///
    /// Synchronous; any device acquisition it triggers resolves through
    /// [`PhotoPage::settle`].
    pub fn dispatch(&mut self, event: WidgetEvent) {
        self.runtime.dispatch(event);
    }

    /// Await every in-flight device acquisition and apply its effects
    pub async fn settle(&mut self) {
        self.runtime.settle().await;
    }

    /// Current capture widget state
    pub fn capture_state(&self) -> WidgetState {
        self.runtime.state()
    }

    /// The surface being driven
    pub fn surface(&self) -> &S {
        self.runtime.surface()
    }

    /// Preview a file chosen for upload
    ///
    /// Builds the inline preview, reveals the preview region, and keeps
    /// the image until the selection changes or is cleared.
    pub fn preview_file(&mut self, name: &str, bytes: &[u8]) -> &PreviewImage {
        debug!(name, size = bytes.len(), "Previewing chosen file");
        let preview = PreviewImage::from_file(name, bytes);
        self.runtime
            .surface_mut()
            .show_region(UiRegion::UploadPreview);
        self.preview.insert(preview)
    }

    /// Drop the chosen file's preview and hide its region
    pub fn clear_preview(&mut self) {
        self.preview = None;
        self.runtime
            .surface_mut()
            .hide_region(UiRegion::UploadPreview);
    }

    /// The current upload preview, if a file is chosen
    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    /// Register a flash banner present at page init
    pub fn register_flash(&mut self) -> FlashHandle {
        self.flashes.register()
    }

    /// Close every flash banner due at `elapsed` page time
    pub fn dismiss_due_flashes(&mut self, elapsed: Duration) -> Vec<FlashHandle> {
        self.flashes.due(elapsed)
    }

    /// Close one flash banner by hand
    pub fn close_flash(&mut self, handle: FlashHandle) -> bool {
        self.flashes.close(handle)
    }

    /// Number of flash banners still up
    pub fn open_flash_count(&self) -> usize {
        self.flashes.open_count()
    }

    /// Toggle the visitor's like on a photo
    ///
    /// Returns the server-confirmed state to paint, or `None` when the
    /// server declined; the button is never repainted speculatively.
    pub async fn toggle_like(&self, photo_id: u64) -> Result<Option<LikeUpdate>, PageError> {
        Ok(self.likes.toggle(photo_id).await?)
    }
}

/// Fluent builder for page configuration
pub struct PhotoPageBuilder<S: UiSurface> {
    surface: S,
    devices: Option<Arc<dyn MediaDevices>>,
    config: PageConfig,
}

impl<S: UiSurface> PhotoPageBuilder<S> {
    pub(crate) fn new(surface: S) -> Self {
        Self {
            surface,
            devices: None,
            config: PageConfig::default(),
        }
    }

    /// Set the media device platform (required)
    pub fn devices(mut self, devices: Arc<dyn MediaDevices>) -> Self {
        self.devices = Some(devices);
        self
    }

    /// Set the base URL the like toggle posts to
    pub fn like_base_url(mut self, url: &str) -> Self {
        self.config.like_base_url = url.to_string();
        self
    }

    /// Set how long flash banners stay up
    pub fn flash_dismiss_after(mut self, after: Duration) -> Self {
        self.config.flash_dismiss_after = after;
        self
    }

    /// Build the page with the current configuration
    pub fn build(self) -> Result<PhotoPage<S>, PageError> {
        let devices = self
            .devices
            .ok_or_else(|| PageError::MissingConfiguration {
                field: "devices".to_string(),
            })?;

        let PageConfig {
            like_base_url,
            flash_dismiss_after,
        } = self.config;

        let likes = LikeClient::with_base_url(like_base_url)?;
        info!(
            supported = devices.supported(),
            like_base_url = likes.base_url(),
            "Photo page initialized"
        );

        Ok(PhotoPage {
            runtime: CaptureRuntime::new(devices, self.surface),
            flashes: FlashSet::with_dismiss_after(flash_dismiss_after),
            likes,
            preview: None,
        })
    }
}

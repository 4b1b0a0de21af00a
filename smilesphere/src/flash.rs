//! Flash message auto-dismissal
//!
//! Server-rendered notification banners close themselves a fixed delay
//! after page init. Deadlines are measured in elapsed page time, so the
//! host feeds the clock in and dismissal stays deterministic under test.

use std::time::Duration;

use tracing::debug;

/// How long a banner stays up by default
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// Handle to one flash banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlashHandle(u64);

#[derive(Debug)]
struct Flash {
    handle: FlashHandle,
    deadline: Duration,
    closed: bool,
}

/// The set of flash banners on one page
#[derive(Debug)]
pub struct FlashSet {
    dismiss_after: Duration,
    flashes: Vec<Flash>,
    next_handle: u64,
}

impl FlashSet {
    /// Create a set with the default dismissal delay
    pub fn new() -> Self {
        Self::with_dismiss_after(DEFAULT_DISMISS_AFTER)
    }

    /// Create a set with a custom dismissal delay
    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self {
            dismiss_after,
            flashes: Vec::new(),
            next_handle: 0,
        }
    }

    /// Register a banner present at page init
    ///
    /// Its deadline is one dismissal delay after page time zero.
    pub fn register(&mut self) -> FlashHandle {
        self.next_handle += 1;
        let handle = FlashHandle(self.next_handle);
        self.flashes.push(Flash {
            handle,
            deadline: self.dismiss_after,
            closed: false,
        });
        handle
    }

    /// Close every banner due at `elapsed` page time and report them
    ///
    /// Banners already closed, by an earlier tick or by hand, are never
    /// reported twice.
    pub fn due(&mut self, elapsed: Duration) -> Vec<FlashHandle> {
        let mut closing = Vec::new();
        for flash in &mut self.flashes {
            if !flash.closed && elapsed >= flash.deadline {
                flash.closed = true;
                closing.push(flash.handle);
            }
        }
        if !closing.is_empty() {
            debug!(count = closing.len(), "Dismissing flash banners");
        }
        closing
    }

    /// Close one banner by hand
    ///
    /// Returns whether this call closed it; closing an already-closed
    /// banner is a no-op.
    pub fn close(&mut self, handle: FlashHandle) -> bool {
        match self.flashes.iter_mut().find(|f| f.handle == handle) {
            Some(flash) if !flash.closed => {
                flash.closed = true;
                true
            }
            _ => false,
        }
    }

    /// Number of banners still up
    pub fn open_count(&self) -> usize {
        self.flashes.iter().filter(|f| !f.closed).count()
    }
}

impl Default for FlashSet {
    fn default() -> Self {
        Self::new()
    }
}

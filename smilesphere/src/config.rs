//! Configuration types and defaults

use std::time::Duration;

use crate::flash::DEFAULT_DISMISS_AFTER;

/// Default base URL of the page backend during development
pub const DEFAULT_LIKE_BASE_URL: &str = "http://localhost:5000";

/// Page behavior configuration
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Base URL the like toggle posts to
    pub like_base_url: String,
    /// How long a flash banner stays up before auto-dismissal
    pub flash_dismiss_after: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            like_base_url: DEFAULT_LIKE_BASE_URL.to_string(),
            flash_dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.like_base_url, "http://localhost:5000");
        assert_eq!(config.flash_dismiss_after, Duration::from_millis(5000));
    }
}

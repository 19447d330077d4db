//! Application-level configuration.
//!
//! Controls how the use cases behave: LLM timeout and the bounds on how
//! much article text is accepted and sent.

use sage_domain::MIN_CONTENT_CHARS;
use std::time::Duration;

/// Default cap on the characters of article text put into a prompt.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 30_000;

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for the model before timing out.
    pub timeout: Option<Duration>,
    /// Minimum article length; never below [`MIN_CONTENT_CHARS`].
    pub min_content_chars: usize,
    /// Article text beyond this many characters is cut before prompting.
    pub max_content_chars: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            min_content_chars: MIN_CONTENT_CHARS,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(seconds));
        self
    }

    /// Applies an optional timeout in seconds; `None` means no timeout.
    pub fn with_optional_timeout(mut self, seconds: Option<u64>) -> Self {
        self.timeout = seconds.map(Duration::from_secs);
        self
    }

    pub fn with_content_bounds(mut self, min_chars: usize, max_chars: usize) -> Self {
        self.min_content_chars = min_chars.max(MIN_CONTENT_CHARS);
        self.max_content_chars = max_chars.max(self.min_content_chars);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BehaviorConfig::default();
        assert!(config.timeout.is_none());
        assert_eq!(config.min_content_chars, 100);
        assert_eq!(config.max_content_chars, 30_000);
    }

    #[test]
    fn test_content_bounds_are_clamped() {
        let config = BehaviorConfig::default().with_content_bounds(10, 50);
        assert_eq!(config.min_content_chars, 100);
        assert_eq!(config.max_content_chars, 100);
    }

    #[test]
    fn test_timeout() {
        let config = BehaviorConfig::default().with_timeout_seconds(5);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        let config = config.with_optional_timeout(None);
        assert!(config.timeout.is_none());
    }
}

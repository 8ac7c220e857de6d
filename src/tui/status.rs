//! Status line messages.

use std::time::{Duration, Instant};

/// Temporary status message with optional auto-clear.
///
/// Shown in the footer after actions such as exports or theme changes.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    message: Option<String>,
    set_at: Option<Instant>,
    auto_clear_after: Option<Duration>,
}

impl StatusMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a status message manager with auto-clear after duration.
    #[must_use]
    pub const fn with_auto_clear(duration: Duration) -> Self {
        Self {
            message: None,
            set_at: None,
            auto_clear_after: Some(duration),
        }
    }

    pub fn set(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.set_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.set_at = None;
    }

    /// Current message, dropping it first if it has expired.
    pub fn message(&mut self) -> Option<&str> {
        if let (Some(set_at), Some(duration)) = (self.set_at, self.auto_clear_after)
            && set_at.elapsed() >= duration
        {
            self.clear();
        }
        self.message.as_deref()
    }

    /// Current message without checking expiry.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut status = StatusMessage::new();
        status.set("Exported items.json");
        assert_eq!(status.message(), Some("Exported items.json"));
        status.clear();
        assert!(status.peek().is_none());
    }

    #[test]
    fn test_auto_clear() {
        let mut status = StatusMessage::with_auto_clear(Duration::ZERO);
        status.set("gone");
        assert!(status.message().is_none());
    }
}

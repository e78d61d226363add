//! Transient status-bar messages.

use std::time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A message that disappears on its own.
pub struct Notice {
    /// Text shown in the status bar.
    pub text: String,
    /// Whether the message reports a failure.
    pub is_error: bool,
    expires_at: Instant,
}

/// Pending notices, newest last.
pub struct Notices {
    ttl: Duration,
    queue: Vec<Notice>,
}

impl Notices {
    #[must_use]
    /// Notices that live for `ttl` each.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queue: Vec::new(),
        }
    }

    /// Shows an informational message.
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), false, Instant::now());
    }

    /// Shows a failure message.
    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), true, Instant::now());
    }

    fn push(&mut self, text: String, is_error: bool, now: Instant) {
        self.queue.push(Notice {
            text,
            is_error,
            expires_at: now + self.ttl,
        });
    }

    /// Drops every notice that has expired at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.queue.retain(|n| n.expires_at > now);
    }

    #[must_use]
    /// The notice to display, if any.
    pub fn current(&self) -> Option<&Notice> {
        self.queue.last()
    }

    #[must_use]
    /// Number of live notices.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/notice.rs"]
mod tests;

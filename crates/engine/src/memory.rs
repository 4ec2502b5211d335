//! Notification memory: suppresses repeated chat messages.
//!
//! Two cells, each holding only the most recent value it was given:
//! - the last status message that was acted upon
//! - the last failure message that was reported
//!
//! A transition away from a value and back to it counts as new. State lives
//! in memory only; after a restart the first status is announced again.
//!
//! A success does not clear the error cell, so an error that reappears
//! after an intervening success with identical text stays silent.

/// In-memory dedup state owned by the poll loop.
#[derive(Debug, Clone, Default)]
pub struct NotificationMemory {
    last_notified: String,
    last_reported_error: String,
}

impl NotificationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `message` differs from the last status that was acted upon.
    pub fn should_notify_status(&self, message: &str) -> bool {
        self.last_notified != message
    }

    /// Remember `message` as the last status acted upon.
    pub fn record_status(&mut self, message: impl Into<String>) {
        self.last_notified = message.into();
    }

    /// Whether `message` differs from the last reported failure.
    pub fn should_report_error(&self, message: &str) -> bool {
        self.last_reported_error != message
    }

    /// Remember `message` as the last reported failure.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_reported_error = message.into();
    }

    /// Last status message, or `None` if nothing was notified yet.
    pub fn last_notified(&self) -> Option<&str> {
        non_empty(&self.last_notified)
    }

    /// Last failure message, or `None` if no failure is being suppressed.
    pub fn last_reported_error(&self) -> Option<&str> {
        non_empty(&self.last_reported_error)
    }
}

fn non_empty(cell: &str) -> Option<&str> {
    (!cell.is_empty()).then_some(cell)
}

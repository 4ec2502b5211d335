//! Poll loop: the fetch → validate → format → notify state machine.
//!
//! Each cycle either produces a status message or a [`CycleError`]. Both
//! are passed through [`NotificationMemory`] so that the chat sees one
//! message per distinct status and one per distinct failure. Every cycle
//! ends with a fixed sleep, whatever happened.

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use herald_common::config::AppConfig;
use herald_common::error::CycleError;
use herald_engine::formatter::format_status;
use herald_engine::memory::NotificationMemory;
use herald_engine::validator::validate;
use herald_notifier::Notifier;

use crate::client::StatusSource;

/// What a single cycle ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status was found and a notification was attempted.
    StatusSent,
    /// The status matched the last one acted upon.
    StatusUnchanged,
    /// The cycle failed with a new error and a failure notification was attempted.
    ErrorSent,
    /// The cycle failed with the same error as last reported.
    ErrorSuppressed,
}

/// Prefix of every failure notification.
const FAILURE_PREFIX: &str = "Program failure";

/// Text of the failure notification for `error`.
pub fn failure_message(error: &CycleError) -> String {
    format!("{FAILURE_PREFIX}: {error}")
}

/// Long-running poller for a single homework status feed.
pub struct PollLoop<S, N> {
    source: S,
    notifier: N,
    chat_id: String,
    retry_period: Duration,
    /// Lower bound of the query window. Fixed for the lifetime of the loop.
    cursor: i64,
    memory: NotificationMemory,
}

impl<S, N> PollLoop<S, N>
where
    S: StatusSource,
    N: Notifier,
{
    pub fn new(config: &AppConfig, source: S, notifier: N) -> Self {
        Self {
            source,
            notifier,
            chat_id: config.telegram_chat_id.clone(),
            retry_period: config.retry_period,
            cursor: config.from_date.unwrap_or_else(|| Utc::now().timestamp()),
            memory: NotificationMemory::new(),
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn memory(&self) -> &NotificationMemory {
        &self.memory
    }

    /// Run cycles until `cancel` fires.
    ///
    /// The token is checked before every cycle and interrupts the sleep.
    /// A cycle already in flight is allowed to finish so that the memory
    /// cells always match what was sent.
    pub async fn run(&mut self, cancel: CancellationToken) -> anyhow::Result<()> {
        tracing::info!(
            cursor = self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "Poll loop started"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let outcome = self.run_cycle().await;
            tracing::debug!(?outcome, "Cycle finished");

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }

        tracing::info!("Poll loop stopped");
        Ok(())
    }

    /// Execute one cycle without the trailing sleep.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.check_status().await {
            Ok(message) => self.on_status(message).await,
            Err(error) => self.on_error(error).await,
        }
    }

    async fn check_status(&self) -> Result<String, CycleError> {
        let raw = self.source.fetch(self.cursor).await?;
        let items = validate(&raw)?;
        Ok(format_status(&items[0])?)
    }

    async fn on_status(&mut self, message: String) -> CycleOutcome {
        if !self.memory.should_notify_status(&message) {
            tracing::debug!("No new homework status");
            return CycleOutcome::StatusUnchanged;
        }

        tracing::info!(text = %message, "Homework status changed");
        self.deliver(&message).await;
        self.memory.record_status(message);
        CycleOutcome::StatusSent
    }

    async fn on_error(&mut self, error: CycleError) -> CycleOutcome {
        tracing::error!(error = %error, "Poll cycle failed");

        let message = failure_message(&error);
        if !self.memory.should_report_error(&message) {
            tracing::debug!("Same failure already reported, not notifying");
            return CycleOutcome::ErrorSuppressed;
        }

        self.deliver(&message).await;
        self.memory.record_error(message);
        CycleOutcome::ErrorSent
    }

    /// Single delivery attempt; failures are logged and swallowed.
    async fn deliver(&self, text: &str) {
        match self.notifier.send(&self.chat_id, text).await {
            Ok(()) => tracing::debug!(chat_id = %self.chat_id, "Notification sent"),
            Err(e) => tracing::error!(
                chat_id = %self.chat_id,
                error = %e,
                "Failed to send notification"
            ),
        }
    }
}

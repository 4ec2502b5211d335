//! Notification delivery for the review poller.
//!
//! The poll loop only sees the [`Notifier`] trait; [`TelegramNotifier`]
//! is the production channel.

pub mod telegram;

use async_trait::async_trait;

use herald_common::error::NotifyError;

pub use telegram::TelegramNotifier;

/// A channel that can deliver a text message to a destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `text` to `chat_id`. A single attempt, no retries.
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotifyError>;
}

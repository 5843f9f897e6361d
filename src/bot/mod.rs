//! Outbound chat notifications.

/// Telegram implementation of [`MessageSender`]
pub mod messaging;
/// Best-effort sending with deduplication
pub mod notifier;

pub use messaging::{parse_recipient, TelegramSender};
pub use notifier::Notifier;

use async_trait::async_trait;

/// Something that can deliver a plain-text message to the configured chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send `text` to the chat.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the message was not delivered.
    async fn send_text(&self, text: &str) -> anyhow::Result<()>;
}

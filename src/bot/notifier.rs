//! Best-effort notifier.
//!
//! Transport errors are logged and reported as `false`, never propagated.
//! [`Notifier::notify`] additionally skips a message identical to the last one
//! delivered.

use super::MessageSender;
use tracing::{debug, error};

/// Delivers notifications and remembers the last delivered text.
pub struct Notifier<S> {
    sender: S,
    last_message: Option<String>,
}

impl<S: MessageSender> Notifier<S> {
    /// Wrap a sender. Nothing has been delivered yet.
    pub const fn new(sender: S) -> Self {
        Self {
            sender,
            last_message: None,
        }
    }

    /// Send `text` once, without deduplication.
    ///
    /// Returns `true` if the message was delivered.
    pub async fn send_message(&self, text: &str) -> bool {
        match self.sender.send_text(text).await {
            Ok(()) => {
                debug!("Отправлено сообщение: {text}");
                true
            }
            Err(e) => {
                error!("Не смог отправить сообщение {text} в чат: {e}");
                false
            }
        }
    }

    /// Send `text` unless it equals the last delivered message.
    ///
    /// The last message is only updated after a successful delivery, so a
    /// failed send is attempted again next time. Returns `true` if the message
    /// was delivered by this call.
    pub async fn notify(&mut self, text: &str) -> bool {
        if self.is_duplicate(text) {
            debug!("Повторное сообщение не отправлено: {text}");
            return false;
        }

        let delivered = self.send_message(text).await;
        if delivered {
            self.last_message = Some(text.to_string());
        }
        delivered
    }

    /// Whether `text` matches the last delivered message.
    #[must_use]
    pub fn is_duplicate(&self, text: &str) -> bool {
        self.last_message.as_deref() == Some(text)
    }

    /// The last delivered message, if any.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::MockMessageSender;

    #[tokio::test]
    async fn test_same_text_twice_is_sent_once() {
        let mut sender = MockMessageSender::new();
        sender
            .expect_send_text()
            .withf(|text: &str| text == "hello")
            .times(1)
            .returning(|_| Ok(()));

        let mut notifier = Notifier::new(sender);
        assert!(notifier.notify("hello").await);
        assert!(!notifier.notify("hello").await);
        assert_eq!(notifier.last_message(), Some("hello"));
    }

    #[tokio::test]
    async fn test_different_text_is_sent() {
        let mut sender = MockMessageSender::new();
        sender.expect_send_text().times(3).returning(|_| Ok(()));

        let mut notifier = Notifier::new(sender);
        assert!(notifier.notify("a").await);
        assert!(notifier.notify("b").await);
        assert!(notifier.notify("a").await);
        assert_eq!(notifier.last_message(), Some("a"));
    }

    #[tokio::test]
    async fn test_failed_send_is_swallowed_and_not_recorded() {
        let mut sender = MockMessageSender::new();
        sender
            .expect_send_text()
            .times(2)
            .returning(|_| Err(anyhow::anyhow!("Telegram send error: timed out")));

        let mut notifier = Notifier::new(sender);
        assert!(!notifier.notify("hello").await);
        assert_eq!(notifier.last_message(), None);
        // not a duplicate, since the first attempt was never delivered
        assert!(!notifier.notify("hello").await);
    }

    #[tokio::test]
    async fn test_send_message_does_not_dedup() {
        let mut sender = MockMessageSender::new();
        sender.expect_send_text().times(2).returning(|_| Ok(()));

        let notifier = Notifier::new(sender);
        assert!(notifier.send_message("bye").await);
        assert!(notifier.send_message("bye").await);
        assert_eq!(notifier.last_message(), None);
    }
}

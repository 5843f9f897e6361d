//! Telegram delivery for notifications.
//!
//! Messages are sent as plain text to a single chat, truncated to the
//! Telegram length limit.

use super::MessageSender;
use crate::config::TELEGRAM_MESSAGE_LIMIT;
use crate::utils;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;

/// Parses `TELEGRAM_CHAT_ID`: a numeric id, or a `@channel` username otherwise.
#[must_use]
pub fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    chat_id.parse::<i64>().map_or_else(
        |_| Recipient::ChannelUsername(chat_id.to_string()),
        |id| Recipient::Id(ChatId(id)),
    )
}

/// Sends notifications through a teloxide [`Bot`].
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
    chat: Recipient,
}

impl TelegramSender {
    /// Create a sender bound to one chat.
    #[must_use]
    pub fn new(bot: Bot, chat_id: &str) -> Self {
        Self {
            bot,
            chat: parse_recipient(chat_id),
        }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send_text(&self, text: &str) -> anyhow::Result<()> {
        let text = if text.chars().count() > TELEGRAM_MESSAGE_LIMIT {
            format!("{}...", utils::truncate_str(text, TELEGRAM_MESSAGE_LIMIT))
        } else {
            text.to_string()
        };

        self.bot
            .send_message(self.chat.clone(), text)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("Telegram send error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_chat_id() {
        assert_eq!(parse_recipient("123456"), Recipient::Id(ChatId(123_456)));
        assert_eq!(
            parse_recipient(" -1001234567890 "),
            Recipient::Id(ChatId(-1_001_234_567_890))
        );
    }

    #[test]
    fn test_channel_username() {
        assert_eq!(
            parse_recipient("@homework_updates"),
            Recipient::ChannelUsername("@homework_updates".to_string())
        );
    }
}

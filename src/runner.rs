use crate::bot::{Notifier, TelegramSender};
use crate::config::Settings;
use crate::error::HomeworkError;
use crate::poller::Poller;
use crate::practicum::PracticumClient;
use crate::utils::unix_now;
use teloxide::Bot;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Validate the configuration, wire up the clients and poll until `shutdown`.
///
/// # Errors
///
/// Returns `HomeworkError::MissingConfig` before any network activity if a
/// required secret is missing.
pub async fn run_bot(settings: &Settings, shutdown: CancellationToken) -> Result<(), HomeworkError> {
    let credentials = settings.check_tokens()?;
    info!("Configuration loaded successfully.");

    let api = PracticumClient::new(credentials.practicum_token.as_str(), settings.http_timeout());
    let bot = Bot::new(credentials.telegram_token.as_str());
    let sender = TelegramSender::new(bot, &credentials.telegram_chat_id);

    let mut poller = Poller::new(
        api,
        Notifier::new(sender),
        unix_now(),
        settings.retry_period(),
    );
    poller.run(shutdown).await;

    Ok(())
}

//! The polling loop.
//!
//! ```text
//! Starting --greeting--> Polling --cycle--> Sleeping --retry period--> Polling
//!                           \                   |
//!                            `---- shutdown ----+--> FatalStop
//! ```
//!
//! Every error except a configuration error is turned into a chat
//! notification and the loop carries on after the usual pause.

use crate::bot::{MessageSender, Notifier};
use crate::config::{FAREWELL_MESSAGE, GREETING_MESSAGE};
use crate::error::HomeworkError;
use crate::practicum::{check_response, HomeworkApi};
use crate::status::parse_status;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Constructed, greeting not sent yet
    Starting,
    /// Querying the API
    Polling,
    /// Waiting for the next cycle
    Sleeping,
    /// Stopped by the operator
    FatalStop,
}

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API could not be reached; cursor unchanged
    NoResponse,
    /// Valid answer without changed homeworks; cursor advanced
    NoUpdates,
    /// A status change was found; cursor advanced
    Notified {
        /// Notification text
        message: String,
        /// Whether it reached the chat in this cycle
        delivered: bool,
    },
    /// The cycle failed; cursor unchanged
    Failed {
        /// What went wrong
        error: HomeworkError,
        /// Whether the failure notification reached the chat
        notified: bool,
    },
}

/// Polls the homework API and relays status changes to the chat.
pub struct Poller<A, S> {
    api: A,
    notifier: Notifier<S>,
    cursor: i64,
    retry_period: Duration,
    state: PollState,
}

impl<A: HomeworkApi, S: MessageSender> Poller<A, S> {
    /// Create a poller whose first request asks for changes since `cursor`.
    pub const fn new(api: A, notifier: Notifier<S>, cursor: i64, retry_period: Duration) -> Self {
        Self {
            api,
            notifier,
            cursor,
            retry_period,
            state: PollState::Starting,
        }
    }

    /// Lower bound of the next request.
    #[must_use]
    pub const fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Current loop state.
    #[must_use]
    pub const fn state(&self) -> PollState {
        self.state
    }

    /// The notifier, with its record of the last delivered message.
    #[must_use]
    pub const fn notifier(&self) -> &Notifier<S> {
        &self.notifier
    }

    /// Send the greeting and enter the polling state.
    pub async fn start(&mut self) {
        self.notifier.notify(GREETING_MESSAGE).await;
        self.state = PollState::Polling;
    }

    /// Run one poll cycle and leave the loop in `Sleeping`.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        self.state = PollState::Polling;

        let outcome = match self.check_updates().await {
            Ok(outcome) => outcome,
            Err(error) => {
                let message = format!("Сбой в работе программы: {error}");
                error!("{message}");
                let notified = self.notifier.notify(&message).await;
                CycleOutcome::Failed { error, notified }
            }
        };

        self.state = PollState::Sleeping;
        outcome
    }

    async fn check_updates(&mut self) -> Result<CycleOutcome, HomeworkError> {
        let Some(answer) = self.api.get_api_answer(self.cursor).await? else {
            return Ok(CycleOutcome::NoResponse);
        };

        let validated = check_response(&answer)?;
        let outcome = match validated.homework {
            None => CycleOutcome::NoUpdates,
            Some(homework) => {
                let message = parse_status(&homework)?;
                let delivered = self.notifier.notify(&message).await;
                CycleOutcome::Notified { message, delivered }
            }
        };

        self.cursor = validated.current_date;
        Ok(outcome)
    }

    /// Poll until `shutdown` is cancelled, then send the farewell.
    pub async fn run(&mut self, shutdown: CancellationToken) {
        info!(
            cursor = self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "Homework poller started"
        );
        self.start().await;

        loop {
            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                outcome = self.poll_once() => {
                    debug!(?outcome, cursor = self.cursor, "Poll cycle finished");
                }
            }

            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                () = tokio::time::sleep(self.retry_period) => {}
            }
        }

        info!("Shutdown requested, stopping poller");
        self.notifier.send_message(FAREWELL_MESSAGE).await;
        self.state = PollState::FatalStop;
    }
}

//! Homework status bot
//!
//! Polls the Practicum homework API and relays review status changes to a
//! Telegram chat.

/// Outbound chat notifications
pub mod bot;
/// Configuration and settings management
pub mod config;
/// Error taxonomy
pub mod error;
/// Logging setup with secret redaction
pub mod logging;
/// The polling loop
pub mod poller;
/// Practicum API client and response validation
pub mod practicum;
/// Startup and wiring
pub mod runner;
/// Verdict table and notification text
pub mod status;
/// Text and time helpers
pub mod utils;

pub use error::HomeworkError;

//! Minimal Telegram greeting bot.
//!
//! Reads the bot token from the environment, wipes any stale webhook so
//! long-polling can take over, and answers `/start` with a greeting.

/// Telegram command handlers.
pub mod bot;
/// Configuration and settings management.
pub mod config;
/// Logging setup with bot-token redaction.
pub mod logging;
/// Dispatcher wiring and the polling runtime.
pub mod runner;

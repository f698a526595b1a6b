//! Telegram bot integration and handlers

pub mod bot;
pub mod handlers;

/// Bot type used by every handler
pub type Bot = teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{handle_add_command, handle_start_command, schema, HandlerDeps, HandlerError};

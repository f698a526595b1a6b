//! Telegram bot handler tree configuration
//!
//! This module provides the dispatcher schema for the bot. The handlers are
//! organized so integration tests can drive the same command handlers as
//! production code.

mod commands;
mod schema;
mod types;

pub use commands::{handle_add_command, handle_start_command};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};

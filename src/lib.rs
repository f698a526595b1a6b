//! Expense bot - Telegram bot that records expenses into Google Sheets
//!
//! A user sends `/add <category> <amount>`; the bot appends
//! `date | category | amount` to the first worksheet of a spreadsheet and
//! confirms in chat.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors and logging
//! - `expense`: expense entries and `/add` argument parsing
//! - `sheets`: Google service-account auth and the Sheets client
//! - `telegram`: command definitions, handlers and dispatcher schema
//! - `i18n`: user-facing message table

pub mod cli;
pub mod core;
pub mod expense;
pub mod i18n;
pub mod sheets;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult, Config};
pub use expense::{record_expense, AddArgs, CommandError, ExpenseEntry};
pub use sheets::{ExpenseSheet, GoogleSheetsConnector, SheetConnector, SheetHandle, SheetsError};
pub use telegram::{schema, HandlerDeps, HandlerError};

//! Spreadsheet backend
//!
//! The rest of the bot only sees two seams: [`SheetConnector`] establishes a
//! connection and [`ExpenseSheet`] appends rows to it. [`SheetHandle`] caches
//! the connection for the lifetime of the process.

pub mod auth;
pub mod client;
mod error;
mod handle;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use client::{GoogleEndpoints, GoogleSheetsConnector, SheetsClient, Worksheet, WorksheetProperties};
pub use error::SheetsError;
pub use handle::SheetHandle;

/// A worksheet that accepts appended rows
#[async_trait]
pub trait ExpenseSheet: Send + Sync {
    /// Appends one row after the last row of the sheet.
    async fn append_row(&self, row: Vec<Value>) -> Result<(), SheetsError>;

    /// Human-readable description used in logs and the CLI.
    fn describe(&self) -> String;
}

/// Establishes a connection to the expense sheet
#[async_trait]
pub trait SheetConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn ExpenseSheet>, SheetsError>;
}

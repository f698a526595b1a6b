//! Handler types and dependencies

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::sheets::SheetHandle;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Source of "today" for new expense rows
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub sheets: Arc<SheetHandle>,
    pub clock: Clock,
}

impl HandlerDeps {
    /// Create new handler dependencies using the process-local calendar date
    pub fn new(sheets: Arc<SheetHandle>) -> Self {
        Self {
            sheets,
            clock: Arc::new(|| Local::now().date_naive()),
        }
    }

    /// Replace the date source (tests pin the date this way)
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}

impl fmt::Debug for HandlerDeps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDeps")
            .field("sheet_connected", &self.sheets.is_connected())
            .finish_non_exhaustive()
    }
}

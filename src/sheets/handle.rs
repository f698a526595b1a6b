use std::sync::Arc;

use tokio::sync::OnceCell;

use super::{ExpenseSheet, SheetConnector, SheetsError};

/// Process-wide, lazily connected spreadsheet handle.
///
/// The first caller establishes the connection; concurrent first callers
/// wait on the same attempt instead of connecting twice. A failed attempt
/// leaves the handle empty so a later command can try again.
pub struct SheetHandle {
    connector: Arc<dyn SheetConnector>,
    sheet: OnceCell<Arc<dyn ExpenseSheet>>,
}

impl SheetHandle {
    pub fn new(connector: Arc<dyn SheetConnector>) -> Self {
        Self {
            connector,
            sheet: OnceCell::new(),
        }
    }

    /// Returns the cached sheet, connecting on first use.
    pub async fn get(&self) -> Result<Arc<dyn ExpenseSheet>, SheetsError> {
        let sheet = self
            .sheet
            .get_or_try_init(|| async {
                let sheet = self.connector.connect().await?;
                log::info!("Connected to worksheet {}", sheet.describe());
                Ok::<_, SheetsError>(sheet)
            })
            .await?;
        Ok(Arc::clone(sheet))
    }

    pub fn is_connected(&self) -> bool {
        self.sheet.initialized()
    }
}

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::sheets::SheetsError;

/// Centralized error types for the application
///
/// Errors from every layer convert into this enum so the binary edge can
/// report them uniformly. Per-command failures that are shown to the user
/// live in [`crate::expense::CommandError`] instead.
///
/// # Example
///
/// ```no_run
/// use expense_bot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Startup configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Spreadsheet backend errors
    #[error("Spreadsheet error: {0}")]
    Sheets(#[from] SheetsError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: AppError = ConfigError::Missing(vec!["APP_URL"]).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required environment variable(s): APP_URL"
        );
    }

    #[test]
    fn test_sheets_error_converts() {
        let err: AppError = SheetsError::NoWorksheets.into();
        assert!(matches!(err, AppError::Sheets(SheetsError::NoWorksheets)));
    }
}

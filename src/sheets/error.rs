use thiserror::Error;

/// Errors talking to the Google Sheets backend
#[derive(Error, Debug)]
pub enum SheetsError {
    /// The service-account JSON could not be parsed
    #[error("Invalid service-account credential: {0}")]
    InvalidCredential(#[from] serde_json::Error),

    /// The private key was rejected or the assertion could not be signed
    #[error("Failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Transport-level failures (DNS, TLS, timeouts, undecodable bodies)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Google answered with a non-success status
    #[error("Google API request failed with status {status}: {body}")]
    Api { status: reqwest::StatusCode, body: String },

    /// No spreadsheet with that name/id is visible to the service account
    #[error("Spreadsheet not found or not shared with the service account: {0}")]
    SpreadsheetNotFound(String),

    #[error("Spreadsheet has no worksheets")]
    NoWorksheets,
}

impl SheetsError {
    /// Turns a non-success response into [`SheetsError::Api`], passing
    /// successful responses through.
    pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SheetsError::Api { status, body })
    }
}

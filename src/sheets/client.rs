//! Minimal Google Sheets / Drive REST client
//!
//! Only the three calls the bot needs: resolve a spreadsheet by name, read
//! its worksheet list, and append one row.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};

use super::auth::{ServiceAccountKey, TokenProvider};
use super::{ExpenseSheet, SheetConnector, SheetsError};
use crate::core::config::{Config, SpreadsheetRef};

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// Base URLs of the Google APIs, overridable for tests
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub sheets: String,
    pub drive: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            sheets: "https://sheets.googleapis.com/v4".to_string(),
            drive: "https://www.googleapis.com/drive/v3".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: WorksheetProperties,
}

/// Identity of one worksheet (tab) inside a spreadsheet
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

/// Escapes a value for use inside a single-quoted Drive query literal.
fn drive_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// A1 range addressing a whole worksheet by title, e.g. `'Sheet 1'`.
fn worksheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Authenticated client for the Sheets and Drive APIs
pub struct SheetsClient {
    http: reqwest::Client,
    endpoints: GoogleEndpoints,
    auth: TokenProvider,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey, http: reqwest::Client, endpoints: GoogleEndpoints) -> Result<Self, SheetsError> {
        let auth = TokenProvider::new(key, http.clone())?;
        Ok(Self { http, endpoints, auth })
    }

    /// Finds a spreadsheet the service account can see by its exact name.
    pub async fn find_spreadsheet_id(&self, name: &str) -> Result<String, SheetsError> {
        let token = self.auth.token().await?;
        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            drive_query_literal(name),
            SPREADSHEET_MIME_TYPE
        );

        let response = self
            .http
            .get(format!("{}/files", self.endpoints.drive))
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "2"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;
        let list: DriveFileList = SheetsError::check(response).await?.json().await?;

        if list.files.len() > 1 {
            log::warn!("Several spreadsheets named '{}' found, using the first one", name);
        }
        list.files
            .into_iter()
            .next()
            .map(|file| file.id)
            .ok_or_else(|| SheetsError::SpreadsheetNotFound(name.to_string()))
    }

    /// Returns the first worksheet (lowest index) of a spreadsheet.
    pub async fn first_worksheet(&self, spreadsheet_id: &str) -> Result<WorksheetProperties, SheetsError> {
        let token = self.auth.token().await?;
        let response = self
            .http
            .get(format!(
                "{}/spreadsheets/{}",
                self.endpoints.sheets,
                urlencoding::encode(spreadsheet_id)
            ))
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties(sheetId,title,index)")])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SheetsError::SpreadsheetNotFound(spreadsheet_id.to_string()));
        }
        let metadata: SpreadsheetMetadata = SheetsError::check(response).await?.json().await?;

        metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties)
            .min_by_key(|properties| properties.index)
            .ok_or(SheetsError::NoWorksheets)
    }

    /// Appends `row` after the last row of the table in `worksheet_title`.
    ///
    /// Values are written as-is (`RAW`), so numbers stay numbers and text is
    /// never interpreted as a formula.
    pub async fn append_row(&self, spreadsheet_id: &str, worksheet_title: &str, row: &[Value]) -> Result<(), SheetsError> {
        let token = self.auth.token().await?;
        let url = format!(
            "{}/spreadsheets/{}/values/{}:append",
            self.endpoints.sheets,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(&worksheet_range(worksheet_title))
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({
                "majorDimension": "ROWS",
                "values": [row],
            }))
            .send()
            .await?;
        SheetsError::check(response).await?;
        Ok(())
    }
}

/// A connected worksheet that expense rows are appended to
pub struct Worksheet {
    client: Arc<SheetsClient>,
    spreadsheet_id: String,
    properties: WorksheetProperties,
}

impl Worksheet {
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn properties(&self) -> &WorksheetProperties {
        &self.properties
    }
}

#[async_trait]
impl ExpenseSheet for Worksheet {
    async fn append_row(&self, row: Vec<Value>) -> Result<(), SheetsError> {
        self.client
            .append_row(&self.spreadsheet_id, &self.properties.title, &row)
            .await
    }

    fn describe(&self) -> String {
        format!("'{}' in spreadsheet {}", self.properties.title, self.spreadsheet_id)
    }
}

/// Connects to the configured spreadsheet using the service-account JSON.
///
/// The credential is parsed on every connection attempt rather than at
/// startup, so a broken credential surfaces as an unreachable sheet.
pub struct GoogleSheetsConnector {
    credential: SecretString,
    spreadsheet: SpreadsheetRef,
    http: reqwest::Client,
    endpoints: GoogleEndpoints,
}

impl GoogleSheetsConnector {
    pub fn new(credential: SecretString, spreadsheet: SpreadsheetRef, http: reqwest::Client) -> Self {
        Self::with_endpoints(credential, spreadsheet, http, GoogleEndpoints::default())
    }

    /// Builds a connector for the configured spreadsheet with its own HTTP
    /// client honouring the configured timeout.
    pub fn from_config(config: &Config) -> Result<Self, SheetsError> {
        let http = reqwest::Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self::new(config.service_account.clone(), config.spreadsheet.clone(), http))
    }

    pub fn with_endpoints(
        credential: SecretString,
        spreadsheet: SpreadsheetRef,
        http: reqwest::Client,
        endpoints: GoogleEndpoints,
    ) -> Self {
        Self {
            credential,
            spreadsheet,
            http,
            endpoints,
        }
    }

    /// Opens the worksheet rows are appended to.
    pub async fn open(&self) -> Result<Worksheet, SheetsError> {
        let key = ServiceAccountKey::from_json(self.credential.expose_secret())?;
        let client = SheetsClient::new(key, self.http.clone(), self.endpoints.clone())?;
        log::info!("Connecting to Google Sheets as {}", client.auth.client_email());

        let spreadsheet_id = match &self.spreadsheet {
            SpreadsheetRef::Id(id) => id.clone(),
            SpreadsheetRef::Name(name) => client.find_spreadsheet_id(name).await?,
        };
        let properties = client.first_worksheet(&spreadsheet_id).await?;

        Ok(Worksheet {
            client: Arc::new(client),
            spreadsheet_id,
            properties,
        })
    }
}

#[async_trait]
impl SheetConnector for GoogleSheetsConnector {
    async fn connect(&self) -> Result<Arc<dyn ExpenseSheet>, SheetsError> {
        let worksheet = self.open().await?;
        Ok(Arc::new(worksheet))
    }
}

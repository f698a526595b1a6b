//! Common test utilities
//!
//! This module is shared across all integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use teloxide::types::ChatId;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use expense_bot::sheets::{ExpenseSheet, SheetConnector, SheetsError};

pub const TEST_CHAT_ID: ChatId = ChatId(123456789);

/// Service-account JSON with a throwaway RSA key
pub fn service_account_json() -> String {
    include_str!("../fixtures/service_account.json").to_string()
}

/// Same credential with `token_uri` pointed at a mock server
pub fn service_account_json_with_token_uri(token_uri: &str) -> String {
    let mut value: Value = serde_json::from_str(&service_account_json()).unwrap();
    value["token_uri"] = Value::from(token_uri);
    value.to_string()
}

/// In-memory sheet recording appended rows
#[derive(Default)]
pub struct RecordingSheet {
    pub rows: Mutex<Vec<Vec<Value>>>,
    pub fail_appends: bool,
}

impl RecordingSheet {
    pub fn failing() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail_appends: true,
        }
    }

    pub fn rows(&self) -> Vec<Vec<Value>> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExpenseSheet for RecordingSheet {
    async fn append_row(&self, row: Vec<Value>) -> Result<(), SheetsError> {
        if self.fail_appends {
            return Err(SheetsError::Api {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "backend unavailable".to_string(),
            });
        }
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    fn describe(&self) -> String {
        "recording sheet".to_string()
    }
}

/// Connector handing out a shared [`RecordingSheet`], or failing every attempt
pub struct FakeConnector {
    pub sheet: Arc<RecordingSheet>,
    pub fail: bool,
    pub attempts: AtomicUsize,
}

impl FakeConnector {
    pub fn new(sheet: Arc<RecordingSheet>) -> Self {
        Self {
            sheet,
            fail: false,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            sheet: Arc::new(RecordingSheet::default()),
            fail: true,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetConnector for FakeConnector {
    async fn connect(&self) -> Result<Arc<dyn ExpenseSheet>, SheetsError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SheetsError::SpreadsheetNotFound("ExpensesTracker".to_string()));
        }
        Ok(self.sheet.clone())
    }
}

/// Telegram Bot API stand-in
pub struct TelegramMock {
    pub server: MockServer,
}

impl TelegramMock {
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        let response = serde_json::json!({
            "ok": true,
            "result": {
                "message_id": 42,
                "from": {
                    "id": 987654321,
                    "is_bot": true,
                    "first_name": "ExpenseBot",
                    "username": "expense_bot"
                },
                "chat": {
                    "id": TEST_CHAT_ID.0,
                    "first_name": "Test",
                    "username": "testuser",
                    "type": "private"
                },
                "date": 1735992000,
                "text": "ok"
            }
        });

        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/sendMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/setMyCommands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "result": true})))
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn bot(&self) -> teloxide::Bot {
        teloxide::Bot::new("123456:TEST_TOKEN").set_api_url(self.server.uri().parse().unwrap())
    }

    /// JSON bodies of all requests made to `api_method` (case-insensitive)
    pub async fn requests_to(&self, api_method: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path().to_lowercase().ends_with(&format!("/{}", api_method.to_lowercase())))
            .map(|req| serde_json::from_slice(&req.body).unwrap())
            .collect()
    }

    /// Texts of all messages the bot sent
    pub async fn sent_texts(&self) -> Vec<String> {
        self.requests_to("sendMessage")
            .await
            .into_iter()
            .map(|body| body["text"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

//! Service-account authentication
//!
//! Implements the OAuth 2.0 JWT bearer flow used by Google service accounts:
//! an RS256-signed assertion is exchanged at the credential's `token_uri`
//! for a short-lived access token. Tokens are cached and refreshed shortly
//! before they expire, since the spreadsheet handle lives for the whole
//! process.

use std::fmt;
use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::SheetsError;

/// OAuth scopes requested for the access token.
///
/// Drive read access is needed to resolve a spreadsheet by name.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.readonly",
];

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each signed assertion (Google caps it at one hour)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before their reported expiry
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account JSON key this bot uses
#[derive(Deserialize, Clone)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parses the raw JSON blob downloaded from the Google Cloud console.
    pub fn from_json(raw: &str) -> Result<Self, SheetsError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct AccessToken {
    value: SecretString,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + REFRESH_MARGIN < self.expires_at
    }
}

/// Hands out bearer tokens for the service account, refreshing on demand
pub struct TokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    /// Fails if the credential's private key is not a valid RSA PEM key.
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        Ok(Self {
            key,
            encoding_key,
            http,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn claims(&self, now: i64) -> Claims {
        Claims {
            iss: self.key.client_email.clone(),
            scope: SCOPES.join(" "),
            aud: self.key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }

    fn assertion(&self, now: i64) -> Result<String, SheetsError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        Ok(jsonwebtoken::encode(&header, &self.claims(now), &self.encoding_key)?)
    }

    /// Returns a valid access token, exchanging a new assertion when the
    /// cached one is missing or about to expire.
    pub async fn token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.expose_secret().to_string());
        }

        let token = self.fetch().await?;
        let value = token.value.expose_secret().to_string();
        *cached = Some(token);
        Ok(value)
    }

    async fn fetch(&self) -> Result<AccessToken, SheetsError> {
        let assertion = self.assertion(chrono::Utc::now().timestamp())?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let body: TokenResponse = SheetsError::check(response).await?.json().await?;

        let lifetime = body.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS as u64);
        log::info!(
            "Obtained Google access token for {} (expires in {}s)",
            self.key.client_email,
            lifetime
        );

        Ok(AccessToken {
            value: SecretString::from(body.access_token),
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        })
    }
}

// ==========================================
// Sales Bulk Import - remote API client
// ==========================================
// Blocking reqwest client (the pipeline is single-threaded and
// synchronous; every remote call blocks until it returns or times out).
// The OAuth token itself is acquired and refreshed out-of-band; this
// layer only reads it through TokenProvider.
// ==========================================

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Fixed per-call network timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ==========================================
// ApiError
// ==========================================
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("response parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// True when a search call can safely treat this failure as "no match"
    /// and move on to the next strategy. Transport failures and 5xx are
    /// retryable conditions, not negatives.
    pub fn is_no_match(&self) -> bool {
        matches!(self, ApiError::Http { status, .. } if (400..500).contains(status))
    }
}

// ==========================================
// TokenProvider
// ==========================================
// External collaborator seam: session cache / persistent store / refresh
// all live behind it.
pub trait TokenProvider: Send + Sync {
    /// Current access token, or None when there is no valid one.
    fn access_token(&self) -> Option<String>;
}

/// Fixed token, e.g. handed in by the hosting UI or an env variable.
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}

// ==========================================
// ApiClient trait
// ==========================================
pub trait ApiClient {
    /// Checked once before a batch starts.
    fn token_is_valid(&self) -> bool;

    /// Authenticated GET; non-2xx surfaces as ApiError::Http.
    fn authenticated_get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError>;

    /// Authenticated POST; non-2xx surfaces as ApiError::Http.
    fn authenticated_post(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}

// ==========================================
// HttpApiClient - reqwest implementation
// ==========================================
pub struct HttpApiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    tokens: Box<dyn TokenProvider>,
}

impl HttpApiClient {
    pub fn new(api_base: impl Into<String>, tokens: Box<dyn TokenProvider>) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("sales-bulk-import/{}", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.tokens.access_token().ok_or(ApiError::NotAuthenticated)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn into_json(response: reqwest::blocking::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Value>()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

impl ApiClient for HttpApiClient {
    fn token_is_valid(&self) -> bool {
        self.tokens.access_token().is_some()
    }

    fn authenticated_get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .bearer_auth(token)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::into_json(response)
    }

    fn authenticated_post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let token = self.bearer()?;
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::into_json(response)
    }
}

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::debug;

use super::ApiError;
use crate::config::Config;

/// HTTP-like verb of an endpoint. Anything other than `Get` is treated as a
/// mutation by the cache layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Whether this verb reads data rather than changing it.
    pub fn is_query(&self) -> bool {
        matches!(self, Verb::Get)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verb::Get => write!(f, "GET"),
            Verb::Post => write!(f, "POST"),
            Verb::Put => write!(f, "PUT"),
            Verb::Delete => write!(f, "DELETE"),
        }
    }
}

/// Resource path plus query parameters, relative to the backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    path: String,
    params: Vec<(String, String)>,
}

impl Address {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present. Absent values
    /// are omitted entirely so the server sees the same request for
    /// `None` and "not passed".
    pub fn opt_param(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Render as `path?a=1&b=2` for logging and fake transports.
    pub fn to_request_line(&self) -> String {
        if self.params.is_empty() {
            self.path.clone()
        } else {
            let query: Vec<String> = self
                .params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            format!("{}?{}", self.path, query.join("&"))
        }
    }
}

/// The single seam to the remote REST API: JSON in, JSON out.
///
/// The cache layer is agnostic to the concrete backend beyond this contract.
/// Production code uses [`HttpTransport`]; tests substitute an in-process
/// fake so no network is touched.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        address: &Address,
        verb: Verb,
        body: Option<&Value>,
    ) -> Result<Value, ApiError>;
}

/// reqwest-backed transport for the dashboard backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpTransport {
    /// Create a transport against the configured backend base URL.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Set or clear the bearer token used for authenticated requests.
    /// Poisoned lock means another holder panicked; propagate by overwriting.
    pub fn set_token(&self, token: Option<String>) {
        let mut guard = match self.token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = token;
    }

    fn auth_header(&self) -> Option<String> {
        let guard = match self.token.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.as_ref().map(|token| format!("Bearer {}", token))
    }

    fn url_for(&self, address: &Address) -> String {
        format!("{}{}", self.base_url, address.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        address: &Address,
        verb: Verb,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(address);
        let mut request = match verb {
            Verb::Get => self.client.get(&url),
            Verb::Post => self.client.post(&url),
            Verb::Put => self.client.put(&url),
            Verb::Delete => self.client.delete(&url),
        };

        request = request.query(address.params());
        if let Some(auth) = self.auth_header() {
            request = request.header(header::AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(verb = %verb, request = %address.to_request_line(), "Dispatching request");

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &text));
        }

        // Some mutation endpoints reply with an empty body on success
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Shape(e.to_string()))
    }
}

use thiserror::Error;

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Failure surfaced by a query or mutation call.
///
/// `Network` means the transport never got a usable answer from the server.
/// `Response` means the server answered with a non-success status and a
/// (possibly structured) message. `Shape` means the server answered with a
/// success status but the body did not match the endpoint's declared schema;
/// it is treated as a response-class failure, never coerced into data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned {status}: {message}")]
    Response { status: u16, message: String },

    #[error("Invalid response shape: {0}")]
    Shape(String),
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Build a `Response` error from an HTTP status and raw body.
    ///
    /// The backend wraps errors as `{"message": "..."}`; when the body parses
    /// that way the message alone is kept, otherwise the truncated raw body is.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str().map(String::from)))
            .unwrap_or_else(|| Self::truncate_body(body));

        ApiError::Response { status, message }
    }

    /// Structured message for display, matching what callers show in toasts.
    pub fn message(&self) -> String {
        match self {
            ApiError::Network(msg) => msg.clone(),
            ApiError::Response { message, .. } => message.clone(),
            ApiError::Shape(msg) => msg.clone(),
        }
    }

    /// HTTP status of a `Response` error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

use serde::Deserialize;

/// Minimal mutation acknowledgement: `{ "message": "..." }`.
/// Used by delete-style endpoints that echo nothing else back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

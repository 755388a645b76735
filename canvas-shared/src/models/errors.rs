//! Error bodies returned by the API.

use serde::{Deserialize, Serialize};

/// Error body returned by the portfolio API.
///
/// Handled errors arrive as `{ "success": false, "message": .., "data": null }`,
/// framework-level failures as `{ "detail": .. }` where `detail` may be a string
/// or a list of validation entries.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ErrorResponse {
    /// `false` on handled failures.
    #[serde(default)]
    pub success: Option<bool>,
    /// Handled failure reason.
    #[serde(default)]
    pub message: Option<String>,
    /// Framework failure reason: a string or a list of validation entries.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Best human readable reason carried by the body.
    ///
    /// Prefers `message`, then a string `detail`, then the `msg` of the first
    /// entry of a list `detail`.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().map(str::trim)
            && !message.is_empty()
        {
            return Some(message.to_string());
        }

        match self.detail.as_ref()? {
            serde_json::Value::String(detail) if !detail.trim().is_empty() => {
                Some(detail.trim().to_string())
            }
            serde_json::Value::Array(entries) => entries
                .iter()
                .find_map(|entry| entry.get("msg").and_then(serde_json::Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason() {
            Some(reason) => f.write_str(&reason),
            None => f.write_str("unknown error"),
        }
    }
}

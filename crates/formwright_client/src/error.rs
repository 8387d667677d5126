//! Error taxonomy for the collaborator clients.
//!
//! Four classes matter to callers: validation (inline, per-field,
//! non-fatal), plain HTTP failures (surfaced as a banner, retryable by
//! re-invoking the action), network failures (same, never corrupt
//! in-memory state), and auth failures (after the one refresh retry,
//! the user is logged out).

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A specific submitted value was rejected; surface inline.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Non-auth HTTP failure; retryable by re-invoking the action.
    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure (DNS, timeout, connection reset).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Still unauthorized after the single refresh retry.
    #[error("Not authenticated")]
    Unauthorized,

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body the backend returns for 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

/// Classify a non-success response into the taxonomy.
///
/// 401 is NOT mapped here; the transport intercepts it for the
/// refresh-and-retry path before errors reach this function.
pub(crate) fn classify_response(status: u16, body: &str) -> ApiError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.error.clone().or_else(|| b.message.clone()))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "no response body".to_string()
            } else {
                body.to_string()
            }
        });

    if let Some(field) = parsed.and_then(|b| b.field) {
        return ApiError::Validation { field, message };
    }
    if status == 422 {
        return ApiError::Validation {
            field: String::new(),
            message,
        };
    }
    ApiError::Http { status, message }
}

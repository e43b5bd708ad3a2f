use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::ErrorCode;

/// Substring that marks an error payload in any SMSC JSON reply.
const ERROR_MARKER: &str = "\"error_code\"";

/// `fmt=3` asks SMSC for JSON replies.
pub const JSON_FORMAT: (&str, &str) = ("fmt", "3");

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonResponse {
    #[serde(default)]
    error: String,
    error_code: i32,
}

/// Classified SMSC reply, before any endpoint-specific checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayReply<T> {
    Success(T),
    Rejected { message: String, code: ErrorCode },
    Unrecognized,
}

/// Decide which schema `body` follows by probing for field names, then decode it.
///
/// The error shape is probed first; `success_marker` is only consulted when the
/// error marker is absent.
pub fn probe_and_decode<T: DeserializeOwned>(
    body: &str,
    success_marker: &str,
) -> Result<GatewayReply<T>, TransportError> {
    if body.contains(ERROR_MARKER) {
        let parsed: ErrorJsonResponse = serde_json::from_str(body)?;
        return Ok(GatewayReply::Rejected {
            message: parsed.error,
            code: ErrorCode::new(parsed.error_code),
        });
    }

    if body.contains(success_marker) {
        let parsed: T = serde_json::from_str(body)?;
        return Ok(GatewayReply::Success(parsed));
    }

    Ok(GatewayReply::Unrecognized)
}

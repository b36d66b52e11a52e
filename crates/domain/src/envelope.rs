//! Wire shapes shared between parsers and the safe-call pipeline.

use serde::{Deserialize, Serialize};

/// Outcome of running an error parser over a response body.
///
/// Ephemeral: produced and consumed within a single call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessErrorInfo {
    pub is_error: bool,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl BusinessErrorInfo {
    pub fn error(code: impl Into<String>, message: Option<String>) -> Self {
        Self { is_error: true, code: Some(code.into()), message }
    }
}

/// Envelope for APIs that always wrap payloads:
/// `{"success": bool, "data": T?, "errorCode": string?, "message": string?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

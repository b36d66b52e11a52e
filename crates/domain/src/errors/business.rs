//! Application-level failures reported inside successful responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Business rule violation signalled by the API in a 2xx response body.
///
/// Each variant carries an optional human-readable `message` from the server
/// and, where it makes sense, optional context. Amounts and limits are kept as
/// decimal text so no precision is lost in transit.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessError {
    #[error("{}", .message.as_deref().unwrap_or("profile is incomplete"))]
    ProfileIncomplete { required_fields: Option<Vec<String>>, message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("email address is not verified"))]
    EmailNotVerified { message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("phone number is not verified"))]
    PhoneNotVerified { message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("identity verification is required"))]
    KycRequired { message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("account is suspended"))]
    AccountSuspended { reason: Option<String>, message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("amount is below the minimum"))]
    MinimumAmountNotMet { minimum_amount: Option<String>, message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("amount exceeds the maximum"))]
    MaximumAmountExceeded { maximum_amount: Option<String>, message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("daily limit reached"))]
    DailyLimitReached { limit: Option<String>, message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("feature is disabled"))]
    FeatureDisabled { feature_name: Option<String>, message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("resource is unavailable"))]
    ResourceUnavailable { resource_id: Option<String>, message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("validation failed"))]
    ValidationFailed {
        field_errors: Option<BTreeMap<String, String>>,
        message: Option<String>,
    },

    #[error("{}", .message.as_deref().unwrap_or("entry already exists"))]
    DuplicateEntry { field: Option<String>, message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("session expired"))]
    SessionExpired { message: Option<String> },

    #[error("{}", .message.as_deref().unwrap_or("re-authentication required"))]
    ReAuthRequired { message: Option<String> },

    #[error("business error {code}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
    Unknown { code: String, message: Option<String> },
}

impl BusinessError {
    /// Server-supplied message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::ProfileIncomplete { message, .. }
            | Self::EmailNotVerified { message }
            | Self::PhoneNotVerified { message }
            | Self::KycRequired { message }
            | Self::AccountSuspended { message, .. }
            | Self::MinimumAmountNotMet { message, .. }
            | Self::MaximumAmountExceeded { message, .. }
            | Self::DailyLimitReached { message, .. }
            | Self::FeatureDisabled { message, .. }
            | Self::ResourceUnavailable { message, .. }
            | Self::ValidationFailed { message, .. }
            | Self::DuplicateEntry { message, .. }
            | Self::SessionExpired { message }
            | Self::ReAuthRequired { message }
            | Self::Unknown { message, .. } => message.as_deref(),
        }
    }

    /// Canonical code of the family, or the raw code for [`Self::Unknown`].
    pub fn code(&self) -> &str {
        match self {
            Self::ProfileIncomplete { .. } => "PROFILE_INCOMPLETE",
            Self::EmailNotVerified { .. } => "EMAIL_NOT_VERIFIED",
            Self::PhoneNotVerified { .. } => "PHONE_NOT_VERIFIED",
            Self::KycRequired { .. } => "KYC_REQUIRED",
            Self::AccountSuspended { .. } => "ACCOUNT_SUSPENDED",
            Self::MinimumAmountNotMet { .. } => "MINIMUM_AMOUNT_NOT_MET",
            Self::MaximumAmountExceeded { .. } => "MAXIMUM_AMOUNT_EXCEEDED",
            Self::DailyLimitReached { .. } => "DAILY_LIMIT_REACHED",
            Self::FeatureDisabled { .. } => "FEATURE_DISABLED",
            Self::ResourceUnavailable { .. } => "RESOURCE_UNAVAILABLE",
            Self::ValidationFailed { .. } => "VALIDATION_FAILED",
            Self::DuplicateEntry { .. } => "DUPLICATE_ENTRY",
            Self::SessionExpired { .. } => "SESSION_EXPIRED",
            Self::ReAuthRequired { .. } => "REAUTH_REQUIRED",
            Self::Unknown { code, .. } => code,
        }
    }

    /// UI-text lookup key.
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::ProfileIncomplete { .. } => "error_business_profile_incomplete",
            Self::EmailNotVerified { .. } => "error_business_email_not_verified",
            Self::PhoneNotVerified { .. } => "error_business_phone_not_verified",
            Self::KycRequired { .. } => "error_business_kyc_required",
            Self::AccountSuspended { .. } => "error_business_account_suspended",
            Self::MinimumAmountNotMet { .. } => "error_business_minimum_amount",
            Self::MaximumAmountExceeded { .. } => "error_business_maximum_amount",
            Self::DailyLimitReached { .. } => "error_business_daily_limit",
            Self::FeatureDisabled { .. } => "error_business_feature_disabled",
            Self::ResourceUnavailable { .. } => "error_business_resource_unavailable",
            Self::ValidationFailed { .. } => "error_business_validation_failed",
            Self::DuplicateEntry { .. } => "error_business_duplicate_entry",
            Self::SessionExpired { .. } => "error_business_session_expired",
            Self::ReAuthRequired { .. } => "error_business_reauth_required",
            Self::Unknown { .. } => "error_business_unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefers_server_message() {
        let err = BusinessError::KycRequired { message: Some("Upload your ID".into()) };
        assert_eq!(err.to_string(), "Upload your ID");

        let err = BusinessError::KycRequired { message: None };
        assert_eq!(err.to_string(), "identity verification is required");
    }

    #[test]
    fn unknown_display_includes_code() {
        let err = BusinessError::Unknown { code: "SOME_NEW_CODE".into(), message: None };
        assert_eq!(err.to_string(), "business error SOME_NEW_CODE");

        let err =
            BusinessError::Unknown { code: "SOME_NEW_CODE".into(), message: Some("nope".into()) };
        assert_eq!(err.to_string(), "business error SOME_NEW_CODE: nope");
        assert_eq!(err.code(), "SOME_NEW_CODE");
    }

    #[test]
    fn message_accessor_covers_context_variants() {
        let err = BusinessError::MinimumAmountNotMet {
            minimum_amount: Some("10.00".into()),
            message: Some("Minimum is 10".into()),
        };
        assert_eq!(err.message(), Some("Minimum is 10"));
        assert_eq!(err.code(), "MINIMUM_AMOUNT_NOT_MET");
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = BusinessError::ValidationFailed {
            field_errors: Some(BTreeMap::from([("email".to_string(), "invalid".to_string())])),
            message: None,
        };
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["type"], "VALIDATION_FAILED");
        assert_eq!(value["field_errors"]["email"], "invalid");

        let back: BusinessError = serde_json::from_value(value).unwrap();
        assert_eq!(back, err);
    }
}

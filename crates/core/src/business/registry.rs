//! Code → business error registry
//!
//! Built once on first use and never mutated. Keys are uppercase codes; each
//! family answers to a couple of aliases because backends disagree on naming.

use std::collections::HashMap;

use coinfolio_domain::BusinessError;
use once_cell::sync::Lazy;

type Factory = fn(Option<String>) -> BusinessError;

static REGISTRY: Lazy<HashMap<&'static str, Factory>> = Lazy::new(|| {
    let entries: [(&'static str, Factory); 30] = [
        ("PROFILE_INCOMPLETE", profile_incomplete),
        ("INCOMPLETE_PROFILE", profile_incomplete),
        ("EMAIL_NOT_VERIFIED", |message| BusinessError::EmailNotVerified { message }),
        ("EMAIL_UNVERIFIED", |message| BusinessError::EmailNotVerified { message }),
        ("PHONE_NOT_VERIFIED", |message| BusinessError::PhoneNotVerified { message }),
        ("PHONE_UNVERIFIED", |message| BusinessError::PhoneNotVerified { message }),
        ("KYC_REQUIRED", |message| BusinessError::KycRequired { message }),
        ("KYC_PENDING", |message| BusinessError::KycRequired { message }),
        ("VERIFICATION_REQUIRED", |message| BusinessError::KycRequired { message }),
        ("ACCOUNT_SUSPENDED", account_suspended),
        ("ACCOUNT_LOCKED", account_suspended),
        ("ACCOUNT_BLOCKED", account_suspended),
        ("MINIMUM_AMOUNT_NOT_MET", minimum_amount_not_met),
        ("AMOUNT_TOO_LOW", minimum_amount_not_met),
        ("MAXIMUM_AMOUNT_EXCEEDED", maximum_amount_exceeded),
        ("AMOUNT_TOO_HIGH", maximum_amount_exceeded),
        ("DAILY_LIMIT_REACHED", daily_limit_reached),
        ("DAILY_LIMIT_EXCEEDED", daily_limit_reached),
        ("FEATURE_DISABLED", feature_disabled),
        ("FEATURE_UNAVAILABLE", feature_disabled),
        ("RESOURCE_UNAVAILABLE", resource_unavailable),
        ("RESOURCE_NOT_AVAILABLE", resource_unavailable),
        ("VALIDATION_FAILED", validation_failed),
        ("VALIDATION_ERROR", validation_failed),
        ("DUPLICATE_ENTRY", duplicate_entry),
        ("ALREADY_EXISTS", duplicate_entry),
        ("SESSION_EXPIRED", |message| BusinessError::SessionExpired { message }),
        ("TOKEN_EXPIRED", |message| BusinessError::SessionExpired { message }),
        ("REAUTH_REQUIRED", |message| BusinessError::ReAuthRequired { message }),
        ("RE_AUTH_REQUIRED", |message| BusinessError::ReAuthRequired { message }),
    ];
    entries.into_iter().collect()
});

fn profile_incomplete(message: Option<String>) -> BusinessError {
    BusinessError::ProfileIncomplete { required_fields: None, message }
}

fn account_suspended(message: Option<String>) -> BusinessError {
    BusinessError::AccountSuspended { reason: None, message }
}

fn minimum_amount_not_met(message: Option<String>) -> BusinessError {
    BusinessError::MinimumAmountNotMet { minimum_amount: None, message }
}

fn maximum_amount_exceeded(message: Option<String>) -> BusinessError {
    BusinessError::MaximumAmountExceeded { maximum_amount: None, message }
}

fn daily_limit_reached(message: Option<String>) -> BusinessError {
    BusinessError::DailyLimitReached { limit: None, message }
}

fn feature_disabled(message: Option<String>) -> BusinessError {
    BusinessError::FeatureDisabled { feature_name: None, message }
}

fn resource_unavailable(message: Option<String>) -> BusinessError {
    BusinessError::ResourceUnavailable { resource_id: None, message }
}

fn validation_failed(message: Option<String>) -> BusinessError {
    BusinessError::ValidationFailed { field_errors: None, message }
}

fn duplicate_entry(message: Option<String>) -> BusinessError {
    BusinessError::DuplicateEntry { field: None, message }
}

/// Resolve an API error code into a [`BusinessError`].
///
/// Lookup ignores case and surrounding whitespace. Unregistered codes become
/// [`BusinessError::Unknown`] carrying the code as received.
pub fn business_error_from_code(code: &str, message: Option<String>) -> BusinessError {
    let key = code.trim().to_ascii_uppercase();
    match REGISTRY.get(key.as_str()) {
        Some(factory) => factory(message),
        None => BusinessError::Unknown { code: code.to_string(), message },
    }
}

/// Every registered alias, in no particular order.
pub fn registered_codes() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

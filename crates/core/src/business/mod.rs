//! Business error parser
//!
//! Many APIs report rule violations inside a 200 response. The safe-call
//! pipeline runs an [`ApiErrorParser`] over every 2xx body before decoding
//! the payload; a parser that does not recognise the body returns `None` and
//! the body is treated as the expected payload.
//!
//! [`DefaultApiErrorParser`] understands the two common envelope shapes:
//!
//! ```json
//! {"success": false, "errorCode": "KYC_REQUIRED", "message": "Verify your identity"}
//! {"error": {"code": "KYC_REQUIRED", "message": "Verify your identity"}}
//! ```
//!
//! Backends with a different envelope plug in their own parser:
//!
//! ```rust
//! use coinfolio_core::{parse_business_error, FnErrorParser};
//! use coinfolio_domain::{BusinessError, BusinessErrorInfo};
//!
//! let parser = FnErrorParser(|body: &str| {
//!     body.strip_prefix("ERR:").map(|code| BusinessErrorInfo::error(code, None))
//! });
//!
//! assert_eq!(
//!     parse_business_error("ERR:SESSION_EXPIRED", &parser),
//!     Some(BusinessError::SessionExpired { message: None })
//! );
//! assert_eq!(parse_business_error(r#"{"price": 1}"#, &parser), None);
//! ```

mod registry;

use std::sync::Arc;

use coinfolio_domain::{BusinessError, BusinessErrorInfo};
pub use registry::{business_error_from_code, registered_codes};
use serde::Deserialize;
use tracing::debug;

/// Pluggable decoder for a backend's error envelope.
pub trait ApiErrorParser: Send + Sync {
    /// Decode `body` into error information, or `None` if the body is not a
    /// recognised envelope.
    fn parse(&self, body: &str) -> Option<BusinessErrorInfo>;
}

impl<P: ApiErrorParser + ?Sized> ApiErrorParser for &P {
    fn parse(&self, body: &str) -> Option<BusinessErrorInfo> {
        (**self).parse(body)
    }
}

impl<P: ApiErrorParser + ?Sized> ApiErrorParser for Arc<P> {
    fn parse(&self, body: &str) -> Option<BusinessErrorInfo> {
        (**self).parse(body)
    }
}

impl<P: ApiErrorParser + ?Sized> ApiErrorParser for Box<P> {
    fn parse(&self, body: &str) -> Option<BusinessErrorInfo> {
        (**self).parse(body)
    }
}

/// Adapts a closure into an [`ApiErrorParser`].
#[derive(Debug, Clone, Copy)]
pub struct FnErrorParser<F>(pub F);

impl<F> ApiErrorParser for FnErrorParser<F>
where
    F: Fn(&str) -> Option<BusinessErrorInfo> + Send + Sync,
{
    fn parse(&self, body: &str) -> Option<BusinessErrorInfo> {
        (self.0)(body)
    }
}

/// Parser for `{success, errorCode, message}` and `{error: {code, message}}`.
///
/// When both shapes are present the top-level fields win.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultApiErrorParser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    success: Option<bool>,
    error_code: Option<String>,
    message: Option<String>,
    error: Option<NestedError>,
}

#[derive(Debug, Deserialize)]
struct NestedError {
    code: Option<String>,
    message: Option<String>,
}

impl ErrorEnvelope {
    fn is_business_error(&self) -> bool {
        self.success == Some(false) || self.code().is_some()
    }

    fn code(&self) -> Option<&str> {
        self.error_code
            .as_deref()
            .or_else(|| self.error.as_ref().and_then(|nested| nested.code.as_deref()))
    }

    fn into_info(self) -> BusinessErrorInfo {
        let is_error = self.is_business_error();
        let (nested_code, nested_message) =
            self.error.map_or((None, None), |nested| (nested.code, nested.message));
        BusinessErrorInfo {
            is_error,
            code: self.error_code.or(nested_code),
            message: self.message.or(nested_message),
        }
    }
}

impl ApiErrorParser for DefaultApiErrorParser {
    fn parse(&self, body: &str) -> Option<BusinessErrorInfo> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        if !value.is_object() {
            return None;
        }
        let envelope: ErrorEnvelope = serde_json::from_value(value).ok()?;
        Some(envelope.into_info())
    }
}

/// Run `parser` over a 2xx body and resolve a reported error code.
///
/// Returns `None` when the parser does not recognise the body, when the
/// envelope does not flag an error, or when it flags one without a code.
pub fn parse_business_error<P>(body: &str, parser: &P) -> Option<BusinessError>
where
    P: ApiErrorParser + ?Sized,
{
    let info = parser.parse(body)?;
    if !info.is_error {
        return None;
    }
    let code = info.code?;
    let error = business_error_from_code(&code, info.message);
    debug!(code = %code, resolved = error.code(), "response body carries a business error");
    Some(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Option<BusinessErrorInfo> {
        DefaultApiErrorParser.parse(body)
    }

    #[test]
    fn flat_envelope() {
        let info = parse(r#"{"success":false,"errorCode":"KYC_REQUIRED","message":"verify"}"#);
        assert_eq!(info, Some(BusinessErrorInfo::error("KYC_REQUIRED", Some("verify".into()))));
    }

    #[test]
    fn nested_envelope() {
        let info = parse(r#"{"error":{"code":"DAILY_LIMIT_REACHED","message":"try tomorrow"}}"#);
        assert_eq!(
            info,
            Some(BusinessErrorInfo::error("DAILY_LIMIT_REACHED", Some("try tomorrow".into())))
        );
    }

    #[test]
    fn code_without_success_flag_is_an_error() {
        let info = parse(r#"{"errorCode":"SESSION_EXPIRED"}"#).unwrap();
        assert!(info.is_error);
    }

    #[test]
    fn success_false_without_code_is_flagged_but_unresolved() {
        let body = r#"{"success":false,"message":"nope"}"#;
        let info = parse(body).unwrap();
        assert!(info.is_error);
        assert_eq!(info.code, None);
        assert_eq!(parse_business_error(body, &DefaultApiErrorParser), None);
    }

    #[test]
    fn top_level_fields_win_over_nested() {
        let info = parse(
            r#"{"errorCode":"KYC_PENDING","message":"top","error":{"code":"OTHER","message":"nested"}}"#,
        )
        .unwrap();
        assert_eq!(info.code.as_deref(), Some("KYC_PENDING"));
        assert_eq!(info.message.as_deref(), Some("top"));
    }

    #[test]
    fn nested_message_fills_missing_top_level_message() {
        let info = parse(r#"{"success":false,"error":{"code":"AMOUNT_TOO_LOW","message":"min 10"}}"#)
            .unwrap();
        assert_eq!(info.code.as_deref(), Some("AMOUNT_TOO_LOW"));
        assert_eq!(info.message.as_deref(), Some("min 10"));
    }

    #[test]
    fn plain_payloads_are_not_errors() {
        let info = parse(r#"{"id":"bitcoin","current_price":64000.5,"message":"ok"}"#).unwrap();
        assert!(!info.is_error);

        let info = parse(r#"{"success":true,"data":{"id":1}}"#).unwrap();
        assert!(!info.is_error);
    }

    #[test]
    fn unrecognised_shapes_return_none() {
        for body in ["", "not json", "[1,2,3]", "[]", "42", "\"text\"", "null"] {
            assert_eq!(parse(body), None, "{body:?}");
        }
        // `error` used for something other than the nested envelope
        assert_eq!(parse(r#"{"error":"boom"}"#), None);
    }

    #[test]
    fn parse_business_error_resolves_codes() {
        let body = r#"{"success":false,"errorCode":"KYC_REQUIRED"}"#;
        assert_eq!(
            parse_business_error(body, &DefaultApiErrorParser),
            Some(BusinessError::KycRequired { message: None })
        );

        let body = r#"{"error":{"code":"SOME_NEW_CODE","message":"later"}}"#;
        assert_eq!(
            parse_business_error(body, &DefaultApiErrorParser),
            Some(BusinessError::Unknown {
                code: "SOME_NEW_CODE".into(),
                message: Some("later".into())
            })
        );
    }

    #[test]
    fn trait_objects_and_smart_pointers_delegate() {
        let shared: Arc<dyn ApiErrorParser> = Arc::new(DefaultApiErrorParser);
        let boxed: Box<dyn ApiErrorParser> = Box::new(DefaultApiErrorParser);
        let body = r#"{"errorCode":"ALREADY_EXISTS"}"#;

        let expected = Some(BusinessError::DuplicateEntry { field: None, message: None });
        assert_eq!(parse_business_error(body, &shared), expected);
        assert_eq!(parse_business_error(body, &boxed), expected);
        assert_eq!(parse_business_error(body, shared.as_ref()), expected);
    }
}

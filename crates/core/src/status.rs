//! HTTP status mapper

use coinfolio_domain::RemoteError;

/// `true` iff `code` is in `200..=299`.
pub const fn is_success(code: u16) -> bool {
    matches!(code, 200..=299)
}

/// Map a non-success status code onto the remote error taxonomy.
///
/// Total: every code yields a variant. Unlisted 5xx codes are
/// `ServerError`; everything else unlisted is `Unknown`.
pub const fn map_status_code_to_error(code: u16) -> RemoteError {
    match code {
        400 => RemoteError::BadRequest,
        401 => RemoteError::Unauthorized,
        403 => RemoteError::Forbidden,
        404 => RemoteError::NotFound,
        408 => RemoteError::RequestTimeout,
        409 => RemoteError::Conflict,
        413 => RemoteError::PayloadTooLarge,
        429 => RemoteError::TooManyRequests,
        503 => RemoteError::ServiceUnavailable,
        500..=599 => RemoteError::ServerError,
        _ => RemoteError::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_exactly_2xx() {
        for code in 100..=599 {
            assert_eq!(is_success(code), (200..=299).contains(&code), "status {code}");
        }
        assert!(!is_success(0));
        assert!(!is_success(u16::MAX));
    }

    #[test]
    fn exact_table() {
        let table = [
            (400, RemoteError::BadRequest),
            (401, RemoteError::Unauthorized),
            (403, RemoteError::Forbidden),
            (404, RemoteError::NotFound),
            (408, RemoteError::RequestTimeout),
            (409, RemoteError::Conflict),
            (413, RemoteError::PayloadTooLarge),
            (429, RemoteError::TooManyRequests),
            (500, RemoteError::ServerError),
            (503, RemoteError::ServiceUnavailable),
        ];
        for (code, expected) in table {
            assert_eq!(map_status_code_to_error(code), expected, "status {code}");
        }
    }

    #[test]
    fn unlisted_server_errors_are_server_error() {
        for code in [501, 502, 504, 530, 599] {
            assert_eq!(map_status_code_to_error(code), RemoteError::ServerError, "status {code}");
        }
    }

    #[test]
    fn unlisted_codes_are_unknown() {
        for code in [100, 204, 302, 402, 418, 451, 600, 999] {
            assert_eq!(map_status_code_to_error(code), RemoteError::Unknown, "status {code}");
        }
    }
}

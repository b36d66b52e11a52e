//! Macro for attaching stable codes to fieldless error enums
//!
//! Remote and local errors are identified by a `SCREAMING_SNAKE_CASE` code
//! that UI-text lookup, logging and telemetry key on. This macro keeps the
//! variant-to-code table in one place and derives both directions from it.
//!
//! # Example
//!
//! ```rust
//! use coinfolio_domain::impl_error_code_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum VaultError {
//!     Locked,
//!     Missing,
//! }
//!
//! impl_error_code_conversions!(VaultError {
//!     Locked => "LOCKED",
//!     Missing => "MISSING",
//! });
//!
//! assert_eq!(VaultError::Locked.code(), "LOCKED");
//! assert_eq!("missing".parse::<VaultError>(), Ok(VaultError::Missing));
//! ```

/// Implements `code()`, `ALL` and `FromStr` for fieldless error enums
///
/// This macro generates:
/// - `ALL`: every variant in declaration order
/// - `code()`: the stable identifier of a variant
/// - `FromStr`: case-insensitive, whitespace-tolerant parsing of a code
#[macro_export]
macro_rules! impl_error_code_conversions {
    ($enum_name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable identifier for this variant.
            pub const fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestError {
        Offline,
        Expired,
    }

    impl_error_code_conversions!(TestError {
        Offline => "OFFLINE",
        Expired => "TOKEN_EXPIRED",
    });

    #[test]
    fn test_code_lookup() {
        assert_eq!(TestError::Offline.code(), "OFFLINE");
        assert_eq!(TestError::Expired.code(), "TOKEN_EXPIRED");
    }

    #[test]
    fn test_all_lists_variants_in_order() {
        assert_eq!(TestError::ALL, &[TestError::Offline, TestError::Expired]);
    }

    #[test]
    fn test_fromstr_is_case_insensitive() {
        assert_eq!(TestError::from_str("token_expired").unwrap(), TestError::Expired);
        assert_eq!(TestError::from_str(" Offline ").unwrap(), TestError::Offline);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestError::from_str("nope");
        assert!(result.unwrap_err().contains("Invalid TestError: nope"));
    }
}

//! Fluent combinators over `Result`
//!
//! `Result<T, E>` is the only channel through which data-layer operations
//! surface failure. `map` comes from std; this module adds side-effecting
//! taps and a unit conversion so logging and analytics can be attached to a
//! chain without consuming the value.
//!
//! ```rust
//! use coinfolio_common::result::ResultExt;
//!
//! let mut seen = Vec::new();
//! let result: Result<u32, String> = Ok(7);
//! let result = result.on_success(|v| seen.push(*v)).on_error(|_| unreachable!());
//!
//! assert_eq!(result, Ok(7));
//! assert_eq!(seen, vec![7]);
//! assert_eq!(result.as_empty_result(), Ok(()));
//! ```

/// Extension methods for `Result<T, E>`
pub trait ResultExt<T, E>: Sized {
    /// Run `action` on the success value, returning the result unchanged.
    #[must_use]
    fn on_success<F>(self, action: F) -> Self
    where
        F: FnOnce(&T);

    /// Run `action` on the error, returning the result unchanged.
    #[must_use]
    fn on_error<F>(self, action: F) -> Self
    where
        F: FnOnce(&E);

    /// Discard the success payload, keeping the error unchanged.
    fn as_empty_result(self) -> Result<(), E>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn on_success<F>(self, action: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Ok(value) = &self {
            action(value);
        }
        self
    }

    fn on_error<F>(self, action: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Err(error) = &self {
            action(error);
        }
        self
    }

    fn as_empty_result(self) -> Result<(), E> {
        self.map(|_| ())
    }
}

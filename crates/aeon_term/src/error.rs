//! Error types raised by this crate.
//!
//! Per the error handling design, type errors are *data*: `type_of` never
//! raises, it returns an `error` [`crate::Term`]/[`Type`](crate::Type).
//! [`PatternError`] is the one raised error this crate produces, and only
//! when a [`crate::pattern::Matcher`] reaches its fallback with no wildcard
//! registered — a programming error in the caller, not a user input error.

use std::fmt;
use std::panic::Location;

/// Raised when an exhaustive [`crate::pattern::Matcher`] has no handler (and
/// no wildcard) for the term it was given.
///
/// Carries the call-site location of the `Matcher` that failed to match,
/// captured via `#[track_caller]` rather than a parsed source span, since
/// this crate has no lexer of its own.
#[derive(Debug, Clone)]
pub struct PatternError {
    pub variant: &'static str,
    pub location: &'static Location<'static>,
}

impl PatternError {
    #[track_caller]
    pub fn new(variant: &'static str) -> Self {
        PatternError {
            variant,
            location: Location::caller(),
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bad pattern: no handler for variant `{}` ({})",
            self.variant, self.location
        )
    }
}

impl std::error::Error for PatternError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_variant_and_location() {
        let err = PatternError::new("conjunction");
        let msg = err.to_string();
        assert!(msg.contains("conjunction"));
        assert!(msg.contains("bad pattern"));
    }
}

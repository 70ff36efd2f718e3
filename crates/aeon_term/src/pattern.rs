//! Pattern-match dispatch (§4.2): a single `match(t)(handler1, handler2, …)`
//! primitive over the closed [`crate::Term`] variant family.
//!
//! Rather than a C++-style visitor template, dispatch here is a small
//! builder: each `.case(extract, handle)` call is a trampoline that attempts
//! to destructure the term through `extract` and, on success, invokes
//! `handle` with the destructured fields. The first case registered that
//! matches wins; a `.wildcard(..)` handler, if present, always comes last
//! regardless of where it appears in the call chain. `.finish()` raises
//! [`PatternError`] if nothing matched and no wildcard was registered.
//!
//! This mirrors the original's runtime dispatch table: an array of handler
//! trampolines, one per variant tag, tried in registration order with a
//! fallback that raises `bad-pattern`.

use crate::error::PatternError;
use crate::Term;

/// A chainable pattern-match dispatcher over a single [`Term`].
///
/// `R` is the common return type of all handlers (§4.2's "common type of all
/// handler return types").
pub struct Matcher<'t, R> {
    term: &'t Term,
    outcome: Option<R>,
    wildcard: Option<Box<dyn FnOnce(&'t Term) -> R + 't>>,
}

impl<'t, R> Matcher<'t, R> {
    pub fn new(term: &'t Term) -> Self {
        Matcher {
            term,
            outcome: None,
            wildcard: None,
        }
    }

    /// Registers a case: `extract` attempts to destructure the matcher's
    /// term; if it succeeds and no earlier case has already matched,
    /// `handle` is invoked with the destructured value.
    pub fn case<V>(
        mut self,
        extract: impl FnOnce(&'t Term) -> Option<V>,
        handle: impl FnOnce(V) -> R,
    ) -> Self {
        if self.outcome.is_none() {
            if let Some(v) = extract(self.term) {
                self.outcome = Some(handle(v));
            }
        }
        self
    }

    /// Registers the wildcard handler, invoked if no prior case matched.
    /// Only the first `.wildcard(..)` call in a chain has effect.
    pub fn wildcard(mut self, handle: impl FnOnce(&'t Term) -> R + 't) -> Self {
        if self.wildcard.is_none() {
            self.wildcard = Some(Box::new(handle));
        }
        self
    }

    /// Resolves the match: the first matching case's result, else the
    /// wildcard's result, else a [`PatternError`] (§4.2's exhaustiveness
    /// invariant).
    #[track_caller]
    pub fn finish(self) -> Result<R, PatternError> {
        if let Some(r) = self.outcome {
            return Ok(r);
        }
        if let Some(wildcard) = self.wildcard {
            return Ok(wildcard(self.term));
        }
        Err(PatternError::new(self.term.variant_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Term;

    #[test]
    fn first_matching_case_wins() {
        let t = Term::boolean(true);
        let r = Matcher::new(&t)
            .case(Term::as_boolean, |b| if b { "true-case" } else { "false-case" })
            .case(Term::as_integer, |_| "integer-case")
            .finish()
            .unwrap();
        assert_eq!(r, "true-case");
    }

    #[test]
    fn wildcard_used_when_nothing_else_matches() {
        let t = Term::integer(5);
        let r = Matcher::new(&t)
            .case(Term::as_boolean, |_| "bool")
            .wildcard(|_| "fallback")
            .finish()
            .unwrap();
        assert_eq!(r, "fallback");
    }

    #[test]
    fn no_match_and_no_wildcard_raises_bad_pattern() {
        let t = Term::integer(5);
        let err = Matcher::<&str>::new(&t)
            .case(Term::as_boolean, |_| "bool")
            .finish()
            .unwrap_err();
        assert!(err.to_string().contains("bad pattern"));
    }

    #[test]
    fn destructured_case_receives_fields() {
        let t = Term::conjunction(vec![Term::boolean(true), Term::boolean(false)]);
        let len = Matcher::new(&t)
            .case(Term::as_conjunction, |ts| ts.len())
            .wildcard(|_| 0)
            .finish()
            .unwrap();
        assert_eq!(len, 2);
    }
}

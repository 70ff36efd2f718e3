//! The solver crate's own error type (§7, §10.2): a thin wrapper around
//! whatever error a concrete [`crate::Backend`] raises, so that a caller
//! holding a `Solver<B>` always has a single `SolverError<B::Error>` to
//! handle rather than reaching into the backend's own type.

use std::fmt;

/// Errors raised by [`crate::Solver`] (§4.8's `check`/`value`): the backend
/// rejected a construct or otherwise failed while being replayed against
/// (§7's "back-end error", which "propagates up through `check` and aborts
/// the current operation").
#[derive(Debug)]
pub enum SolverError<E> {
    Backend(E),
}

impl<E: fmt::Display> fmt::Display for SolverError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Backend(e) => write!(f, "backend error: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for SolverError<E> {}

impl<E> From<E> for SolverError<E> {
    fn from(e: E) -> Self {
        SolverError::Backend(e)
    }
}

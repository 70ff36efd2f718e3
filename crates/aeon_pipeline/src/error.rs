//! Errors raised by consumers and pipeline stages in this crate (§7's
//! "back-end error": raised by the consumer, propagates through `check`,
//! aborts the current operation).

use std::fmt;

#[derive(Debug, Clone)]
pub enum PipelineError {
    /// The back-end rejected a construct it was asked to translate or
    /// assert (§4.6's consumer contract).
    Rejected(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Rejected(msg) => write!(f, "consumer rejected construct: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

pub type Result<T> = std::result::Result<T, PipelineError>;

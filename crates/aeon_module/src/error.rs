//! Errors raised by module operations (§7).
//!
//! Type errors remain data (an `error` [`aeon_term::Term`]); a
//! [`ModuleError`] is raised only for the module-level preconditions §4.5's
//! operation table calls out: `define`'s value failing to type-check, and
//! `pop(n)` with `n` greater than the current push depth.

use std::fmt;

use aeon_term::Type;

#[derive(Debug, Clone)]
pub enum ModuleError {
    /// `define`'s value did not type-check to the declared type.
    TypeMismatch { declared: Type, actual: Type },
    /// `require`'s term did not type to boolean.
    RequirementNotBoolean { actual: Type },
    /// `pop(n)` with `n` exceeding the current snapshot depth.
    PopBeyondDepth { requested: usize, depth: usize },
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleError::TypeMismatch { declared, actual } => write!(
                f,
                "definition value has type {actual} but was declared as {declared}"
            ),
            ModuleError::RequirementNotBoolean { actual } => {
                write!(f, "requirement must type to boolean, got {actual}")
            }
            ModuleError::PopBeyondDepth { requested, depth } => write!(
                f,
                "pop({requested}) exceeds current push depth {depth}"
            ),
        }
    }
}

impl std::error::Error for ModuleError {}

pub type Result<T> = std::result::Result<T, ModuleError>;

#![cfg_attr(docsrs, feature(doc_cfg))]

//! # aeon-module
//!
//! Scoped module, entity/root, and resolver semantics for the Aeon logic
//! engine (§3.5, §3.6, §4.5).
//!
//! Builds on [`aeon_term`]'s hash-consed term algebra with a persistent,
//! replayable log of `adopt`/`state` actions: [`Root`] groups entities
//! sharing a recursion mode, [`Module`] is the ordered scope that adopts
//! roots and records top-level statements, and [`Consumer`] is the sink
//! trait a module replays against (defined here, not in a higher "pipeline"
//! crate, since [`Module::replay`] is itself a module operation).
//!
//! # Example
//!
//! ```
//! use aeon_module::{Module, RecursionMode};
//! use aeon_term::{Term, Type};
//!
//! let mut m = Module::new();
//! m.declare("p", Type::boolean());
//! let p = m.resolved(&Term::variable("p"));
//! m.require(p).unwrap();
//! assert_eq!(m.actions().len(), 2);
//! ```

pub mod consumer;
pub mod error;
pub mod module;
pub mod resolver;
pub mod root;

pub use consumer::Consumer;
pub use error::ModuleError;
pub use module::{Action, Module, StatementKind};
pub use resolver::{resolved, ResolutionMap};
pub use root::{RecursionMode, Root};

#![cfg_attr(docsrs, feature(doc_cfg))]

//! # aeon-solver
//!
//! The solver facade for the Aeon logic engine (§4.8, §6): a pluggable
//! [`Backend`] trait, a reference in-memory implementation, an optional
//! Z3-backed adapter, and the small ambient pieces (configuration, errors)
//! that wrap them into something an embedder can drive directly.
//!
//! - [`facade`] — [`Solver`] and the [`Backend`] trait it drives.
//! - [`backend`] — concrete backends: [`backend::memory::MemoryBackend`]
//!   always, [`backend::z3`] behind the `backend-z3` feature.
//! - [`config`] — [`SolverConfig`], loadable from TOML.
//! - [`error`] — [`SolverError`].

pub mod backend;
pub mod config;
pub mod error;
pub mod facade;

pub use backend::memory::MemoryBackend;
#[cfg(feature = "backend-z3")]
pub use backend::z3::Z3Backend;
pub use config::{BackendKind, PoolSizeHints, SolverConfig};
pub use error::SolverError;
pub use facade::{Backend, Solver, Verdict};

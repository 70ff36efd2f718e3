//! Concrete [`crate::Backend`] implementations.
//!
//! - [`memory`] — a dependency-free, brute-force reference backend, always
//!   available.
//! - [`z3`] — an adapter onto Z3's Rust bindings, gated behind the
//!   `backend-z3` feature (§6).

pub mod memory;

#[cfg(feature = "backend-z3")]
pub mod z3;

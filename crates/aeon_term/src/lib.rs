#![cfg_attr(docsrs, feature(doc_cfg))]

//! # aeon-term
//!
//! Hash-consed term and type algebra for the Aeon logic engine.
//!
//! This crate provides the foundational types of the pipeline: [`Label`],
//! [`Term`], [`Type`], and [`Entity`], plus the two functions that close over
//! the term algebra: [`type_of`] (the type checker, §4.3) and [`evaluate`]
//! (the partial evaluator, §4.4). The [`pattern`] module provides the
//! pattern-match dispatch primitive (§4.2) used internally and available to
//! downstream crates.
//!
//! # Design principles
//!
//! This crate has no knowledge of modules, scoping, or consumers/back-ends —
//! it provides only the closed term/type sum types and the two total
//! functions defined purely in terms of them. Higher-level crates
//! (`aeon-module`, `aeon-pipeline`, `aeon-solver`) build scoping, streaming,
//! and solving on top of it.
//!
//! # Example
//!
//! ```
//! use aeon_term::{Entity, Term, Type, type_of, evaluate};
//!
//! let p = Entity::new("p".into(), Type::boolean());
//! let t = Term::conjunction(vec![Term::object(p), Term::boolean(true)]);
//! assert_eq!(type_of(&t), Type::boolean());
//! assert!(evaluate(&t).as_boolean().is_none()); // `p` has no value yet
//! ```

pub mod entity;
pub mod error;
pub mod eval;
pub mod label;
pub mod pattern;
pub mod term;
pub mod ty;

pub use entity::Entity;
pub use error::PatternError;
pub use eval::{evaluate, substitute};
pub use label::{fresh, Label, Symbol};
pub use pattern::Matcher;
pub use term::{Decl, Term};
pub use ty::Type;
pub use type_check::type_of;

mod type_check;

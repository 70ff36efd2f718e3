#![cfg_attr(docsrs, feature(doc_cfg))]

//! # aeon-pipeline
//!
//! Composable producer/consumer pipeline stages for the Aeon logic engine
//! (§4.7).
//!
//! [`aeon_module::Consumer`] is the sink trait every stage here is built
//! around: a stage is a `Consumer` that wraps a downstream `Consumer`,
//! transforming or augmenting the stream of `adopt`/`state`/`push`/`pop`
//! calls before forwarding it. Composition is just nesting one stage's
//! wrapper around another's, which is associative by construction, and
//! [`stage::Identity`] is the identity element.
//!
//! - [`stage`] — the identity stage and composition helpers.
//! - [`surrogate`] — the canonical surrogate-encoder stage (§4.7).
//! - [`smtlib`] — a textual SMT-LIB2 printer consumer (§6, "a natural stage").
//! - [`recorder`] — a `Consumer` that materializes a stream back into a
//!   [`aeon_module::Module`], used to snapshot the output of a stage chain.
//! - [`either`] — a small ad hoc two-case sum type used internally by
//!   [`surrogate`] (§10.6).

pub mod either;
pub mod error;
pub mod recorder;
pub mod smtlib;
pub mod stage;
pub mod surrogate;

pub use either::Either;
pub use error::PipelineError;
pub use recorder::Recorder;
pub use smtlib::SmtLibPrinter;
pub use stage::Identity;
pub use surrogate::SurrogateEncoder;

//! The consumer interface (§4.6): the sink protocol driven by a module's
//! replay and by every pipeline stage downstream of it (§4.7), every
//! back-end adapter (§6), and the solver facade (§4.8).
//!
//! Defined in this crate (rather than a higher "pipeline" crate) because
//! [`Module::replay`](crate::Module::replay) is itself a module operation
//! (§4.5's operation table) that needs the trait to exist at this layer;
//! `aeon-pipeline` builds composable stages and reference consumers on top
//! of it, and `aeon-solver`'s backend adapter implements it directly.

use std::sync::Arc;

use aeon_term::Term;

use crate::module::{Module, StatementKind};
use crate::root::Root;

/// A sink driven by [`Module::replay`] and by pipeline stages.
///
/// All operations are fallible only by raising an unrecoverable error (e.g.
/// the back-end rejected a construct, §4.6's contract); there is no
/// recoverable "soft" failure mode at this layer.
pub trait Consumer {
    type Error: std::error::Error;

    /// Accepts a fully-formed module in one call, rather than as an
    /// incremental stream. The default implementation simply replays every
    /// action of `module` from empty.
    fn import(&mut self, module: &Module) -> Result<(), Self::Error> {
        for action in module.actions().iter() {
            match action {
                crate::module::Action::Adopt(root) => self.adopt(root.clone())?,
                crate::module::Action::State(term, kind) => self.state(term.clone(), *kind)?,
            }
        }
        Ok(())
    }

    /// Appends `root`'s entities to the consumer's internal scope.
    fn adopt(&mut self, root: Arc<Root>) -> Result<(), Self::Error>;

    /// Records a top-level fact.
    fn state(&mut self, term: Term, kind: StatementKind) -> Result<(), Self::Error>;

    /// Snapshots consumer state.
    fn push(&mut self) -> Result<(), Self::Error>;

    /// Restores consumer state `n` levels above the current one.
    fn pop(&mut self, n: usize) -> Result<(), Self::Error>;
}

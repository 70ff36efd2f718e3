//! [`Recorder`]: a [`Consumer`] that materializes a driven stream back into
//! an [`aeon_module::Module`] value.
//!
//! Every stage in this crate is a `Consumer`; to inspect what a stage chain
//! produced (in tests, or to hand a transformed module on to a further
//! consumer as a single value) something has to be at the end of the chain
//! collecting calls back into a `Module`. `Recorder` is that sink: its
//! `push`/`pop` track depth the same way [`aeon_module::Module::push`] and
//! [`aeon_module::Module::pop`] do, by snapshotting and restoring the
//! recorded module itself.

use std::convert::Infallible;
use std::sync::Arc;

use aeon_module::module::StatementKind;
use aeon_module::{Consumer, Module, Root};
use aeon_term::Term;

/// Accumulates `adopt`/`state`/`push`/`pop` calls into an owned [`Module`].
#[derive(Default)]
pub struct Recorder {
    module: Module,
}

impl Recorder {
    pub fn new() -> Self {
        Recorder { module: Module::new() }
    }

    /// Consumes the recorder, returning the module it built up.
    pub fn into_module(self) -> Module {
        self.module
    }

    pub fn module(&self) -> &Module {
        &self.module
    }
}

impl Consumer for Recorder {
    type Error = Infallible;

    fn adopt(&mut self, root: Arc<Root>) -> Result<(), Self::Error> {
        self.module.adopt(root);
        Ok(())
    }

    fn state(&mut self, term: Term, kind: StatementKind) -> Result<(), Self::Error> {
        self.module.state(term, kind);
        Ok(())
    }

    fn push(&mut self) -> Result<(), Self::Error> {
        self.module.push();
        Ok(())
    }

    fn pop(&mut self, n: usize) -> Result<(), Self::Error> {
        // A `Recorder` has no notion of a precondition violation of its own
        // (§7's "pop(n) with n greater than depth" belongs to `Module`
        // itself); a replay that asks a fresh `Recorder` to pop more than it
        // has recorded is a caller bug, so this just saturates at the root.
        self.module.pop(n.min(self.module.depth())).ok();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_module::Module;
    use aeon_term::Type;

    #[test]
    fn recorder_rebuilds_an_equal_module_from_a_replay() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let resolved = m.resolved(&Term::variable("p"));
        m.require(resolved).unwrap();

        let mut recorder = Recorder::new();
        m.replay(&Module::new(), &mut recorder).unwrap();
        assert_eq!(recorder.into_module(), m);
    }

    #[test]
    fn recorder_tracks_push_pop_depth() {
        let mut recorder = Recorder::new();
        recorder.push().unwrap();
        assert_eq!(recorder.module().depth(), 1);
        recorder.pop(1).unwrap();
        assert_eq!(recorder.module().depth(), 0);
    }
}

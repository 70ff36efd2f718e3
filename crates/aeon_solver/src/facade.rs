//! The solver facade (§4.8): drives a pluggable backend against a module's
//! replayed action log.

use std::sync::Arc;

use aeon_module::{Consumer, Module};
use aeon_term::{Entity, Term};

use crate::error::SolverError;

/// The result of [`Solver::check`] (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable,
    Unsatisfiable,
    /// The backend could not decide within its resource bounds (a timeout,
    /// or — for the in-memory reference backend — a search space it
    /// declined to enumerate exhaustively).
    Unknown,
}

/// A decision-procedure adapter (§6's back-end contract): a [`Consumer`]
/// that can additionally be asked for a verdict and for the model value of
/// an object once one exists.
pub trait Backend: Consumer {
    /// Asks the backend for a verdict over everything it has observed via
    /// `adopt`/`state` so far.
    fn check(&mut self) -> Verdict;

    /// After a [`Verdict::Satisfiable`] result, the model's assigned value
    /// for `entity`, if the backend can supply one.
    fn value(&mut self, entity: &Arc<Entity>) -> Option<Term>;
}

/// Drives a [`Backend`] against successive modules (§4.8).
///
/// Holds the last module it replayed so that each `check` only replays the
/// *difference* since the previous call, per [`Module::replay`]'s contract —
/// mirroring how an incremental SMT session is actually driven (assert only
/// what changed, re-`check-sat`).
pub struct Solver<B: Backend> {
    backend: B,
    baseline: Module,
}

impl<B: Backend> Solver<B> {
    pub fn new(backend: B) -> Self {
        Solver {
            backend,
            baseline: Module::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Replays `module`'s actions since the last call (or from empty, on the
    /// first call) against the backend, then asks it for a verdict.
    pub fn check(&mut self, module: &Module) -> Result<Verdict, SolverError<B::Error>> {
        module.replay(&self.baseline, &mut self.backend)?;
        self.baseline = module.clone();
        log::debug!("check: replayed against backend, asking for a verdict");
        let verdict = self.backend.check();
        if verdict == Verdict::Unknown {
            log::warn!("check: backend returned unknown");
        }
        Ok(verdict)
    }

    /// The model value assigned to `entity` after a satisfiable `check`.
    pub fn value(&mut self, entity: &Arc<Entity>) -> Option<Term> {
        self.backend.value(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use aeon_module::Module;
    use aeon_term::Type;

    #[test]
    fn s4_free_boolean_variable_is_satisfiable() {
        let mut m = Module::new();
        let p = m.declare("p", Type::boolean());
        let resolved = m.resolved(&Term::variable("p"));
        m.require(resolved).unwrap();

        let mut solver = Solver::new(MemoryBackend::new());
        assert_eq!(solver.check(&m).unwrap(), Verdict::Satisfiable);
        assert_eq!(solver.value(&p), Some(Term::boolean(true)));
    }

    #[test]
    fn s6_popped_contradiction_leaves_the_module_satisfiable() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        m.push();
        m.require(Term::boolean(false)).unwrap();
        m.pop(1).unwrap();

        let mut solver = Solver::new(MemoryBackend::new());
        assert_eq!(solver.check(&m).unwrap(), Verdict::Satisfiable);
    }

    #[test]
    fn contradiction_is_unsatisfiable() {
        let mut m = Module::new();
        m.require(Term::boolean(false)).unwrap();

        let mut solver = Solver::new(MemoryBackend::new());
        assert_eq!(solver.check(&m).unwrap(), Verdict::Unsatisfiable);
    }

    #[test]
    fn incremental_check_only_replays_the_difference() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let resolved = m.resolved(&Term::variable("p"));
        m.require(resolved).unwrap();

        let mut solver = Solver::new(MemoryBackend::new());
        assert_eq!(solver.check(&m).unwrap(), Verdict::Satisfiable);

        let q = m.declare("q", Type::boolean());
        let resolved_q = m.resolved(&Term::variable("q"));
        m.require(resolved_q).unwrap();
        assert_eq!(solver.check(&m).unwrap(), Verdict::Satisfiable);
        assert_eq!(solver.value(&q), Some(Term::boolean(true)));
    }
}

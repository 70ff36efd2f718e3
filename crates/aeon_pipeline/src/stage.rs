//! The identity stage and composition helpers (§4.7: "composition is
//! associative; an identity stage exists").
//!
//! A stage, in this crate, is simply a [`Consumer`] that wraps another
//! `Consumer`. Nesting two wrappers composes them; [`Identity`] forwards
//! every call unchanged and is the composition's neutral element.

use std::sync::Arc;

use aeon_module::{Consumer, Root};
use aeon_term::Term;

use aeon_module::module::StatementKind;

/// Forwards every call to `downstream` unchanged. Composing any stage with
/// `Identity` (on either side) is observationally the same as the stage
/// alone.
pub struct Identity<C: Consumer> {
    downstream: C,
}

impl<C: Consumer> Identity<C> {
    pub fn new(downstream: C) -> Self {
        Identity { downstream }
    }

    pub fn into_inner(self) -> C {
        self.downstream
    }
}

impl<C: Consumer> Consumer for Identity<C> {
    type Error = C::Error;

    fn adopt(&mut self, root: Arc<Root>) -> Result<(), Self::Error> {
        self.downstream.adopt(root)
    }

    fn state(&mut self, term: Term, kind: StatementKind) -> Result<(), Self::Error> {
        self.downstream.state(term, kind)
    }

    fn push(&mut self) -> Result<(), Self::Error> {
        self.downstream.push()
    }

    fn pop(&mut self, n: usize) -> Result<(), Self::Error> {
        self.downstream.pop(n)
    }
}

/// Composes two stage constructors, innermost-first: `compose(f, g)` applied
/// to a downstream consumer `c` yields `g(f(c))`, i.e. data flows through
/// `f`'s transformation before `g`'s. Both `f` and `g` are themselves stage
/// constructors (`FnOnce(C) -> Consumer`), matching how [`SurrogateEncoder::new`]
/// and [`crate::SmtLibPrinter::new`] are used directly as stage constructors.
///
/// [`SurrogateEncoder::new`]: crate::SurrogateEncoder::new
pub fn compose<C, F, G, M, D>(f: F, g: G) -> impl FnOnce(C) -> D
where
    C: Consumer,
    M: Consumer,
    F: FnOnce(C) -> M,
    G: FnOnce(M) -> D,
{
    move |downstream| g(f(downstream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use aeon_module::Module;
    use aeon_term::Type;

    #[test]
    fn identity_stage_passes_every_action_through_unchanged() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let resolved = m.resolved(&Term::variable("p"));
        m.require(resolved).unwrap();

        let mut identity = Identity::new(Recorder::new());
        m.replay(&Module::new(), &mut identity).unwrap();
        assert_eq!(identity.into_inner().into_module(), m);
    }

    #[test]
    fn composing_with_identity_on_either_side_is_a_no_op() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());

        let build = compose(|c: Recorder| Identity::new(c), |c: Identity<Recorder>| Identity::new(c));
        let mut stacked = build(Recorder::new());
        m.replay(&Module::new(), &mut stacked).unwrap();
        assert_eq!(stacked.into_inner().into_inner().into_module(), m);
    }
}

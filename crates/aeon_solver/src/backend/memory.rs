//! The in-memory, brute-force reference [`Backend`] (§6's "illustrative"
//! back-end slot, filled here with a dependency-free reference
//! implementation used by this crate's own tests and available to
//! embedders that don't need or want to link an external solver).
//!
//! Scope: this backend decides satisfiability by enumerating every
//! assignment of the module's free boolean-sorted declarations and
//! checking the conjunction of its `requirement` facts with [`evaluate`]
//! under each one. It does not perform bounded model checking or any other
//! temporal unrolling — `init`/`transition`/`final` facts (as produced by
//! [`aeon_pipeline::SurrogateEncoder`]) are accepted but not interpreted,
//! since doing so would require a trace-length parameter this backend does
//! not take. It exists to exercise the solver facade end to end (scenarios
//! S4/S6) and as a last-resort backend for small, purely propositional
//! modules, not as a production decision procedure.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use aeon_module::module::StatementKind;
use aeon_module::{Consumer, Root};
use aeon_term::{evaluate, Entity, Term};

use crate::facade::{Backend, Verdict};

/// Free boolean variables beyond this count cause [`MemoryBackend::check`]
/// to give up and return [`Verdict::Unknown`] rather than enumerate
/// `2^n` assignments.
const MAX_ENUMERATED_VARS: usize = 20;

/// Accumulates `adopt`/`state` calls and answers `check`/`value` by brute
/// force (see module docs for the precise scope).
#[derive(Default)]
pub struct MemoryBackend {
    free_vars: Vec<Arc<Entity>>,
    requirements: Vec<Term>,
    stack: Vec<(usize, usize)>,
    model: Option<HashMap<u64, Term>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

impl Consumer for MemoryBackend {
    type Error = Infallible;

    fn adopt(&mut self, root: Arc<Root>) -> Result<(), Self::Error> {
        for entity in root.entities() {
            if entity.value().is_none() && entity.ty().is_boolean() {
                self.free_vars.push(entity.clone());
            }
        }
        self.model = None;
        Ok(())
    }

    fn state(&mut self, term: Term, kind: StatementKind) -> Result<(), Self::Error> {
        if kind == StatementKind::Requirement {
            self.requirements.push(term);
        }
        self.model = None;
        Ok(())
    }

    fn push(&mut self) -> Result<(), Self::Error> {
        self.stack.push((self.free_vars.len(), self.requirements.len()));
        Ok(())
    }

    fn pop(&mut self, n: usize) -> Result<(), Self::Error> {
        for _ in 0..n {
            if let Some((vars_len, reqs_len)) = self.stack.pop() {
                self.free_vars.truncate(vars_len);
                self.requirements.truncate(reqs_len);
            }
        }
        self.model = None;
        Ok(())
    }
}

impl Backend for MemoryBackend {
    fn check(&mut self) -> Verdict {
        if self.free_vars.len() > MAX_ENUMERATED_VARS {
            log::warn!(
                "check: {} free boolean variables exceeds the enumeration bound of {MAX_ENUMERATED_VARS}",
                self.free_vars.len()
            );
            return Verdict::Unknown;
        }
        let total: u64 = 1 << self.free_vars.len();
        for bits in 0..total {
            let assignment: HashMap<u64, Term> = self
                .free_vars
                .iter()
                .enumerate()
                .map(|(i, e)| (e.id(), Term::boolean(bits & (1 << i) != 0)))
                .collect();
            if self
                .requirements
                .iter()
                .all(|r| evaluate(&substitute_entities(r, &assignment)) == Term::boolean(true))
            {
                self.model = Some(assignment);
                return Verdict::Satisfiable;
            }
        }
        if self.requirements.iter().any(|r| !is_ground_boolean(r, &self.free_vars)) {
            log::warn!("check: a requirement referenced a free symbol this backend cannot interpret");
            return Verdict::Unknown;
        }
        Verdict::Unsatisfiable
    }

    fn value(&mut self, entity: &Arc<Entity>) -> Option<Term> {
        self.model.as_ref()?.get(&entity.id()).cloned()
    }
}

/// Whether every free object `t` references is tracked in `free_vars` (i.e.
/// this backend's brute-force search actually covers it). Used only to
/// decide whether an exhaustively-failed search is a genuine `unsatisfiable`
/// or an `unknown` because some symbol was outside the search space.
fn is_ground_boolean(t: &Term, free_vars: &[Arc<Entity>]) -> bool {
    if let Some(entity) = t.as_object() {
        return entity.value().is_some() || free_vars.iter().any(|e| e.id() == entity.id());
    }
    if t.as_boolean().is_some() || t.as_integer().is_some() || t.as_real().is_some() || t.as_variable().is_some() {
        return true;
    }
    children(t).iter().all(|c| is_ground_boolean(c, free_vars))
}

/// Replaces every `object(e)` whose entity id is a key of `assignment` with
/// its assigned constant, rebuilding everything else unchanged (structural
/// recursion over every [`Term`] shape, same pattern as the resolver's
/// substitution and the surrogate encoder's rewrite).
fn substitute_entities(t: &Term, assignment: &HashMap<u64, Term>) -> Term {
    if let Some(entity) = t.as_object() {
        if let Some(value) = assignment.get(&entity.id()) {
            return value.clone();
        }
        return t.clone();
    }
    if t.as_boolean().is_some() || t.as_integer().is_some() || t.as_real().is_some() || t.as_variable().is_some() {
        return t.clone();
    }
    if let Some((head, args)) = t.as_atom() {
        return Term::atom(
            substitute_entities(head, assignment),
            args.iter().map(|a| substitute_entities(a, assignment)).collect(),
        );
    }
    if let Some((decls, body)) = t.as_forall() {
        return Term::forall(decls.to_vec(), substitute_entities(body, assignment));
    }
    if let Some((decls, body)) = t.as_exists() {
        return Term::exists(decls.to_vec(), substitute_entities(body, assignment));
    }
    if let Some((decls, body)) = t.as_lambda() {
        return Term::lambda(decls.to_vec(), substitute_entities(body, assignment));
    }
    rebuild_from_children(t, &children(t).iter().map(|c| substitute_entities(c, assignment)).collect::<Vec<_>>())
}

/// The direct subterms of `t`, in constructor order, for the term shapes
/// [`substitute_entities`]/[`is_ground_boolean`] handle generically rather
/// than case by case (everything except binders, already handled above,
/// and the already-handled leaves/atom).
fn children(t: &Term) -> Vec<Term> {
    if let Some(ts) = t.as_equal() {
        return ts.to_vec();
    }
    if let Some(ts) = t.as_distinct() {
        return ts.to_vec();
    }
    if let Some(inner) = t.as_negation() {
        return vec![inner.clone()];
    }
    if let Some(ts) = t.as_conjunction() {
        return ts.to_vec();
    }
    if let Some(ts) = t.as_disjunction() {
        return ts.to_vec();
    }
    if let Some((l, r)) = t.as_implication() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((g, a, b)) = t.as_ite() {
        return vec![g.clone(), a.clone(), b.clone()];
    }
    if let Some(inner) = t.as_tomorrow() {
        return vec![inner.clone()];
    }
    if let Some(inner) = t.as_w_tomorrow() {
        return vec![inner.clone()];
    }
    if let Some(inner) = t.as_eventually() {
        return vec![inner.clone()];
    }
    if let Some(inner) = t.as_always() {
        return vec![inner.clone()];
    }
    if let Some((l, r)) = t.as_until() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((l, r)) = t.as_release() {
        return vec![l.clone(), r.clone()];
    }
    if let Some(inner) = t.as_yesterday() {
        return vec![inner.clone()];
    }
    if let Some(inner) = t.as_w_yesterday() {
        return vec![inner.clone()];
    }
    if let Some(inner) = t.as_once() {
        return vec![inner.clone()];
    }
    if let Some(inner) = t.as_historically() {
        return vec![inner.clone()];
    }
    if let Some((l, r)) = t.as_since() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((l, r)) = t.as_triggered() {
        return vec![l.clone(), r.clone()];
    }
    if let Some(inner) = t.as_minus() {
        return vec![inner.clone()];
    }
    if let Some(ts) = t.as_sum() {
        return ts.to_vec();
    }
    if let Some(ts) = t.as_product() {
        return ts.to_vec();
    }
    if let Some((l, r)) = t.as_difference() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((l, r)) = t.as_division() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((l, r)) = t.as_less_than() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((l, r)) = t.as_less_than_eq() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((l, r)) = t.as_greater_than() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((l, r)) = t.as_greater_than_eq() {
        return vec![l.clone(), r.clone()];
    }
    if let Some((inner, _)) = t.as_error() {
        return vec![inner.clone()];
    }
    Vec::new()
}

/// Rebuilds a node of the same shape as `t` from already-processed
/// `new_children`, for every shape [`children`] decomposes.
fn rebuild_from_children(t: &Term, new_children: &[Term]) -> Term {
    if t.as_equal().is_some() {
        return Term::equal(new_children.to_vec());
    }
    if t.as_distinct().is_some() {
        return Term::distinct(new_children.to_vec());
    }
    if t.as_negation().is_some() {
        return Term::negation(new_children[0].clone());
    }
    if t.as_conjunction().is_some() {
        return Term::conjunction(new_children.to_vec());
    }
    if t.as_disjunction().is_some() {
        return Term::disjunction(new_children.to_vec());
    }
    if t.as_implication().is_some() {
        return Term::implication(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_ite().is_some() {
        return Term::ite(new_children[0].clone(), new_children[1].clone(), new_children[2].clone());
    }
    if t.as_tomorrow().is_some() {
        return Term::tomorrow(new_children[0].clone());
    }
    if t.as_w_tomorrow().is_some() {
        return Term::w_tomorrow(new_children[0].clone());
    }
    if t.as_eventually().is_some() {
        return Term::eventually(new_children[0].clone());
    }
    if t.as_always().is_some() {
        return Term::always(new_children[0].clone());
    }
    if t.as_until().is_some() {
        return Term::until(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_release().is_some() {
        return Term::release(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_yesterday().is_some() {
        return Term::yesterday(new_children[0].clone());
    }
    if t.as_w_yesterday().is_some() {
        return Term::w_yesterday(new_children[0].clone());
    }
    if t.as_once().is_some() {
        return Term::once(new_children[0].clone());
    }
    if t.as_historically().is_some() {
        return Term::historically(new_children[0].clone());
    }
    if t.as_since().is_some() {
        return Term::since(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_triggered().is_some() {
        return Term::triggered(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_minus().is_some() {
        return Term::minus(new_children[0].clone());
    }
    if t.as_sum().is_some() {
        return Term::sum(new_children.to_vec());
    }
    if t.as_product().is_some() {
        return Term::product(new_children.to_vec());
    }
    if t.as_difference().is_some() {
        return Term::difference(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_division().is_some() {
        return Term::division(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_less_than().is_some() {
        return Term::less_than(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_less_than_eq().is_some() {
        return Term::less_than_eq(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_greater_than().is_some() {
        return Term::greater_than(new_children[0].clone(), new_children[1].clone());
    }
    if t.as_greater_than_eq().is_some() {
        return Term::greater_than_eq(new_children[0].clone(), new_children[1].clone());
    }
    if let Some((_, msg)) = t.as_error() {
        return Term::error(new_children[0].clone(), msg.to_string());
    }
    t.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_module::Module;
    use aeon_term::Type;

    #[test]
    fn empty_module_is_trivially_satisfiable() {
        let mut backend = MemoryBackend::new();
        backend.adopt(Root::singleton(aeon_module::RecursionMode::Forbidden, Entity::new("p".into(), Type::boolean())))
            .unwrap();
        assert_eq!(backend.check(), Verdict::Satisfiable);
    }

    #[test]
    fn conjunction_of_free_variable_and_its_negation_is_unsatisfiable() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let p = m.resolved(&Term::variable("p"));
        m.require(Term::conjunction(vec![p.clone(), Term::negation(p)])).unwrap();

        let mut backend = MemoryBackend::new();
        backend.import(&m).unwrap();
        assert_eq!(backend.check(), Verdict::Unsatisfiable);
    }

    #[test]
    fn too_many_free_variables_is_unknown() {
        let mut m = Module::new();
        let mut conjuncts = Vec::new();
        for i in 0..(MAX_ENUMERATED_VARS + 1) {
            let name = format!("v{i}");
            m.declare(name.as_str(), Type::boolean());
            conjuncts.push(m.resolved(&Term::variable(name.as_str())));
        }
        m.require(Term::conjunction(conjuncts)).unwrap();

        let mut backend = MemoryBackend::new();
        backend.import(&m).unwrap();
        assert_eq!(backend.check(), Verdict::Unknown);
    }

    #[test]
    fn push_pop_discards_requirements_added_since_the_push() {
        let mut backend = MemoryBackend::new();
        backend.push().unwrap();
        backend.state(Term::boolean(false), StatementKind::Requirement).unwrap();
        assert_eq!(backend.check(), Verdict::Unsatisfiable);
        backend.pop(1).unwrap();
        assert_eq!(backend.check(), Verdict::Satisfiable);
    }
}

//! The surrogate-encoder stage (§4.7): the canonical pipeline stage,
//! illustrating the general shape every stage follows.
//!
//! For every temporal subterm `op(body)` (or `op(l, r)` for the binary
//! temporal operators) found anywhere in a `state`d term — including nested
//! inside quantifier bodies — this stage:
//!
//! 1. declares a fresh boolean-valued function symbol `surr` parameterized
//!    over the subterm's free variables (those of its enclosing quantifiers
//!    still in scope at that point);
//! 2. replaces the subterm, in the term handed downstream, with
//!    `surr(v1, …, vk)`;
//! 3. emits (before the rewritten `state` call) an `adopt` for `surr`'s root
//!    and a `transition` fact `∀v. op(body) <=> surr(v)`, plus one boundary
//!    fact pinning `surr`'s value at the trace endpoint dictated by the
//!    operator's temporal direction: `final` for future operators (there is
//!    no state beyond the last one), `init` for past operators (there is no
//!    state before the first one).
//!
//! The encoding is bottom-up (children are encoded — and may themselves
//! introduce surrogates — before their parent is inspected), so a surrogate's
//! own transition/boundary facts only ever reference already-rewritten
//! (surrogate-free or surrogate-referencing) subterms, never raw temporal
//! operators the stage hasn't already accounted for.

use std::sync::Arc;

use aeon_module::module::StatementKind;
use aeon_module::{Consumer, RecursionMode, Root};
use aeon_term::{Decl, Entity, Label, Term, Type};

use crate::either::Either;

/// Wraps a downstream [`Consumer`], rewriting every `state`d term's temporal
/// subterms into boolean surrogates before forwarding (§4.7).
pub struct SurrogateEncoder<C: Consumer> {
    downstream: C,
}

impl<C: Consumer> SurrogateEncoder<C> {
    pub fn new(downstream: C) -> Self {
        SurrogateEncoder { downstream }
    }

    pub fn into_inner(self) -> C {
        self.downstream
    }
}

impl<C: Consumer> Consumer for SurrogateEncoder<C> {
    type Error = C::Error;

    fn adopt(&mut self, root: Arc<Root>) -> Result<(), Self::Error> {
        self.downstream.adopt(root)
    }

    fn state(&mut self, term: Term, kind: StatementKind) -> Result<(), Self::Error> {
        let mut pending = Vec::new();
        let rewritten = encode(&term, &[], &mut pending);
        for fact in pending {
            self.downstream.adopt(fact.root)?;
            self.downstream.state(fact.transition, StatementKind::Transition)?;
            self.downstream.state(fact.boundary, fact.boundary_kind)?;
        }
        self.downstream.state(rewritten, kind)
    }

    fn push(&mut self) -> Result<(), Self::Error> {
        self.downstream.push()
    }

    fn pop(&mut self, n: usize) -> Result<(), Self::Error> {
        self.downstream.pop(n)
    }
}

/// One surrogate's worth of facts, queued until the `state` call they were
/// discovered within is ready to be forwarded (so the `adopt` and its
/// `transition`/boundary facts always precede the statement that uses the
/// surrogate, matching replay's insertion-order invariant, §3.6).
struct PendingFact {
    root: Arc<Root>,
    transition: Term,
    boundary: Term,
    boundary_kind: StatementKind,
}

/// Encodes `t` bottom-up under the quantifier decls currently in `scope`,
/// queueing a [`PendingFact`] into `pending` for every temporal subterm
/// encountered and returning the rewritten term.
fn encode(t: &Term, scope: &[Decl], pending: &mut Vec<PendingFact>) -> Term {
    encode_either(t, scope, pending).either(|unchanged| unchanged, |surrogate| surrogate)
}

/// The same traversal as [`encode`], but distinguishing *why* the returned
/// term is what it is: [`Either::Left`] means `t`'s own node needed no
/// rewriting (it was rebuilt from already-encoded children, or passed
/// through untouched), [`Either::Right`] means `t`'s node was itself a
/// temporal operator that got replaced by a fresh surrogate atom.
fn encode_either(t: &Term, scope: &[Decl], pending: &mut Vec<PendingFact>) -> Either<Term, Term> {
    if t.as_boolean().is_some()
        || t.as_integer().is_some()
        || t.as_real().is_some()
        || t.as_variable().is_some()
        || t.as_object().is_some()
    {
        return Either::Left(t.clone());
    }
    if let Some(ts) = t.as_equal() {
        return Either::Left(Term::equal(encode_all(ts, scope, pending)));
    }
    if let Some(ts) = t.as_distinct() {
        return Either::Left(Term::distinct(encode_all(ts, scope, pending)));
    }
    if let Some((head, args)) = t.as_atom() {
        return Either::Left(Term::atom(encode(head, scope, pending), encode_all(args, scope, pending)));
    }
    if let Some(inner) = t.as_negation() {
        return Either::Left(Term::negation(encode(inner, scope, pending)));
    }
    if let Some(ts) = t.as_conjunction() {
        return Either::Left(Term::conjunction(encode_all(ts, scope, pending)));
    }
    if let Some(ts) = t.as_disjunction() {
        return Either::Left(Term::disjunction(encode_all(ts, scope, pending)));
    }
    if let Some((l, r)) = t.as_implication() {
        return Either::Left(Term::implication(encode(l, scope, pending), encode(r, scope, pending)));
    }
    if let Some((g, then_b, else_b)) = t.as_ite() {
        return Either::Left(Term::ite(
            encode(g, scope, pending),
            encode(then_b, scope, pending),
            encode(else_b, scope, pending),
        ));
    }
    if let Some((decls, body)) = t.as_forall() {
        return Either::Left(Term::forall(decls.to_vec(), encode_under_binder(body, decls, scope, pending)));
    }
    if let Some((decls, body)) = t.as_exists() {
        return Either::Left(Term::exists(decls.to_vec(), encode_under_binder(body, decls, scope, pending)));
    }
    if let Some((decls, body)) = t.as_lambda() {
        return Either::Left(Term::lambda(decls.to_vec(), encode_under_binder(body, decls, scope, pending)));
    }
    if let Some(inner) = t.as_tomorrow() {
        let op = Term::tomorrow(encode(inner, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some(inner) = t.as_w_tomorrow() {
        let op = Term::w_tomorrow(encode(inner, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some(inner) = t.as_eventually() {
        let op = Term::eventually(encode(inner, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some(inner) = t.as_always() {
        let op = Term::always(encode(inner, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some((l, r)) = t.as_until() {
        let op = Term::until(encode(l, scope, pending), encode(r, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some((l, r)) = t.as_release() {
        let op = Term::release(encode(l, scope, pending), encode(r, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some(inner) = t.as_yesterday() {
        let op = Term::yesterday(encode(inner, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some(inner) = t.as_w_yesterday() {
        let op = Term::w_yesterday(encode(inner, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some(inner) = t.as_once() {
        let op = Term::once(encode(inner, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some(inner) = t.as_historically() {
        let op = Term::historically(encode(inner, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some((l, r)) = t.as_since() {
        let op = Term::since(encode(l, scope, pending), encode(r, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some((l, r)) = t.as_triggered() {
        let op = Term::triggered(encode(l, scope, pending), encode(r, scope, pending));
        return Either::Right(surrogate_for(op, scope, pending));
    }
    if let Some(inner) = t.as_minus() {
        return Either::Left(Term::minus(encode(inner, scope, pending)));
    }
    if let Some(ts) = t.as_sum() {
        return Either::Left(Term::sum(encode_all(ts, scope, pending)));
    }
    if let Some(ts) = t.as_product() {
        return Either::Left(Term::product(encode_all(ts, scope, pending)));
    }
    if let Some((l, r)) = t.as_difference() {
        return Either::Left(Term::difference(encode(l, scope, pending), encode(r, scope, pending)));
    }
    if let Some((l, r)) = t.as_division() {
        return Either::Left(Term::division(encode(l, scope, pending), encode(r, scope, pending)));
    }
    if let Some((l, r)) = t.as_less_than() {
        return Either::Left(Term::less_than(encode(l, scope, pending), encode(r, scope, pending)));
    }
    if let Some((l, r)) = t.as_less_than_eq() {
        return Either::Left(Term::less_than_eq(encode(l, scope, pending), encode(r, scope, pending)));
    }
    if let Some((l, r)) = t.as_greater_than() {
        return Either::Left(Term::greater_than(encode(l, scope, pending), encode(r, scope, pending)));
    }
    if let Some((l, r)) = t.as_greater_than_eq() {
        return Either::Left(Term::greater_than_eq(encode(l, scope, pending), encode(r, scope, pending)));
    }
    if let Some((inner, msg)) = t.as_error() {
        return Either::Left(Term::error(encode(inner, scope, pending), msg.to_string()));
    }
    unreachable!("encode_either: every Term variant is handled above")
}

fn encode_all(ts: &[Term], scope: &[Decl], pending: &mut Vec<PendingFact>) -> Vec<Term> {
    ts.iter().map(|t| encode(t, scope, pending)).collect()
}

fn encode_under_binder(body: &Term, decls: &[Decl], scope: &[Decl], pending: &mut Vec<PendingFact>) -> Term {
    let mut inner_scope = scope.to_vec();
    inner_scope.extend(decls.iter().cloned());
    encode(body, &inner_scope, pending)
}

/// Synthesizes a fresh surrogate for the already-encoded temporal node `op`,
/// queues its transition and boundary facts into `pending`, and returns the
/// atom that replaces `op` at its use site.
fn surrogate_for(op: Term, scope: &[Decl], pending: &mut Vec<PendingFact>) -> Term {
    let free = op.free_variables();
    let params: Vec<Decl> = scope.iter().filter(|d| free.contains(&d.name)).cloned().collect();
    let param_types: Vec<Type> = params.iter().map(|d| d.ty.clone()).collect();
    let args: Vec<Term> = params.iter().map(|d| Term::variable(d.name)).collect();

    let entity = Entity::new(surrogate_label(&op, &params), Type::function(param_types, Type::boolean()));
    let root = Root::singleton(RecursionMode::Forbidden, entity.clone());
    let surrogate_atom = Term::atom(Term::object(entity), args);
    log::debug!(
        "surrogate: introduced {} for `{op}` ({} free parameter(s))",
        surrogate_atom,
        params.len()
    );

    let equiv = iff(op.clone(), surrogate_atom.clone());
    let transition = quantify_if_needed(&params, equiv);

    let (boundary_body, boundary_kind) = boundary_for(&op, &surrogate_atom);
    let boundary = quantify_if_needed(&params, boundary_body);

    pending.push(PendingFact {
        root,
        transition,
        boundary,
        boundary_kind,
    });

    surrogate_atom
}

/// Names a surrogate deterministically from the operator it stands for and
/// its still-in-scope free parameters (§4.7: fresh labels must be derived
/// from their inputs, not a process-global counter, so that replaying the
/// same upstream module twice yields the same surrogate symbols and the
/// same hash-consed terms).
fn surrogate_label(op: &Term, params: &[Decl]) -> Label {
    let mut signature = op.to_string();
    for p in params {
        signature.push(';');
        signature.push_str(&p.name.to_string());
    }
    Label::Fresh(fnv1a(signature.as_bytes()))
}

/// FNV-1a over the surrogate's signature string: deterministic across runs
/// and processes, unlike `std`'s randomized-by-default `HashMap` hasher.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn quantify_if_needed(params: &[Decl], body: Term) -> Term {
    if params.is_empty() {
        body
    } else {
        Term::forall(params.to_vec(), body)
    }
}

fn iff(l: Term, r: Term) -> Term {
    Term::conjunction(vec![Term::implication(l.clone(), r.clone()), Term::implication(r, l)])
}

/// The boundary fact pinning a surrogate's value at the trace endpoint
/// dictated by its operator's temporal direction (§4.7): `final` for future
/// operators, `init` for past ones. Strong operators (`X`, `Y`) cannot hold
/// at the endpoint where they'd need a successor/predecessor that doesn't
/// exist; their weak counterparts (`wX`, `wY`) hold vacuously there.
/// Operators with a fixpoint reading (`F`, `G`, `U`, `R` and their past
/// duals) reduce, at the endpoint, to their own base case.
fn boundary_for(op: &Term, a: &Term) -> (Term, StatementKind) {
    if op.as_tomorrow().is_some() {
        return (Term::negation(a.clone()), StatementKind::Final);
    }
    if op.as_w_tomorrow().is_some() {
        return (a.clone(), StatementKind::Final);
    }
    if let Some(body) = op.as_eventually() {
        return (iff(a.clone(), body.clone()), StatementKind::Final);
    }
    if let Some(body) = op.as_always() {
        return (iff(a.clone(), body.clone()), StatementKind::Final);
    }
    if let Some((_, r)) = op.as_until() {
        return (iff(a.clone(), r.clone()), StatementKind::Final);
    }
    if let Some((_, r)) = op.as_release() {
        return (iff(a.clone(), r.clone()), StatementKind::Final);
    }
    if op.as_yesterday().is_some() {
        return (Term::negation(a.clone()), StatementKind::Init);
    }
    if op.as_w_yesterday().is_some() {
        return (a.clone(), StatementKind::Init);
    }
    if let Some(body) = op.as_once() {
        return (iff(a.clone(), body.clone()), StatementKind::Init);
    }
    if let Some(body) = op.as_historically() {
        return (iff(a.clone(), body.clone()), StatementKind::Init);
    }
    if let Some((_, r)) = op.as_since() {
        return (iff(a.clone(), r.clone()), StatementKind::Init);
    }
    if let Some((_, r)) = op.as_triggered() {
        return (iff(a.clone(), r.clone()), StatementKind::Init);
    }
    unreachable!("boundary_for: called with a non-temporal op term")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use aeon_module::{Consumer, Module};

    fn entities_with_function_type(root: &Root) -> usize {
        root.entities().iter().filter(|e| e.ty().as_function().is_some()).count()
    }

    #[test]
    fn s5_always_implies_eventually_introduces_two_surrogates() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        m.declare("q", Type::boolean());
        let p = m.resolved(&Term::variable("p"));
        let q = m.resolved(&Term::variable("q"));

        let formula = Term::always(Term::implication(p, Term::eventually(q)));
        m.require(formula).unwrap();

        let mut encoder = SurrogateEncoder::new(Recorder::new());
        m.replay(&Module::new(), &mut encoder).unwrap();
        let encoded = encoder.into_inner().into_module();

        let surrogate_roots: Vec<_> = encoded
            .actions()
            .iter()
            .filter_map(|a| match a {
                aeon_module::Action::Adopt(root) if entities_with_function_type(root) > 0 => Some(root.clone()),
                _ => None,
            })
            .collect();
        // one surrogate for `eventually(q)`, one for the enclosing `always(...)`
        assert_eq!(surrogate_roots.len(), 2);

        let transition_count = encoded
            .actions()
            .iter()
            .filter(|a| matches!(a, aeon_module::Action::State(_, aeon_module::StatementKind::Transition)))
            .count();
        assert_eq!(transition_count, 2);

        let final_count = encoded
            .actions()
            .iter()
            .filter(|a| matches!(a, aeon_module::Action::State(_, aeon_module::StatementKind::Final)))
            .count();
        assert_eq!(final_count, 2);
    }

    #[test]
    fn surrogate_with_no_free_variables_is_not_quantified() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let p = m.resolved(&Term::variable("p"));
        m.require(Term::tomorrow(p)).unwrap();

        let mut encoder = SurrogateEncoder::new(Recorder::new());
        m.replay(&Module::new(), &mut encoder).unwrap();
        let encoded = encoder.into_inner().into_module();

        let transitions: Vec<Term> = encoded
            .actions()
            .iter()
            .filter_map(|a| match a {
                aeon_module::Action::State(t, aeon_module::StatementKind::Transition) => Some(t.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(transitions.len(), 1);
        assert!(transitions[0].as_forall().is_none());
    }

    fn surrogate_names(m: &aeon_module::Module) -> Vec<String> {
        let mut names: Vec<String> = m
            .actions()
            .iter()
            .filter_map(|a| match a {
                aeon_module::Action::Adopt(root) if entities_with_function_type(root) > 0 => {
                    Some(root.entities().iter().map(|e| e.name().to_string()).collect::<Vec<_>>())
                }
                _ => None,
            })
            .flatten()
            .collect();
        names.sort();
        names
    }

    #[test]
    fn stage_is_pure_given_the_same_upstream_module() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let p = m.resolved(&Term::variable("p"));
        m.require(Term::eventually(p)).unwrap();

        let mut first = SurrogateEncoder::new(Recorder::new());
        m.replay(&Module::new(), &mut first).unwrap();
        let mut second = SurrogateEncoder::new(Recorder::new());
        m.replay(&Module::new(), &mut second).unwrap();

        let first_module = first.into_inner().into_module();
        let second_module = second.into_inner().into_module();
        assert_eq!(first_module.actions().len(), second_module.actions().len());
        // The actual point of determinism (§4.7): the surrogate *names*
        // must match across independent replays of the same upstream
        // module, not merely their count -- a process-global counter would
        // pass the length check above while still minting `Fresh(7)` here
        // and `Fresh(9)` there.
        assert_eq!(surrogate_names(&first_module), surrogate_names(&second_module));
    }
}

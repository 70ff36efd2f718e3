//! An adapter onto Z3's Rust bindings (§6's back-end contract), gated
//! behind the `backend-z3` feature and grounded on the low-level encoding
//! pattern already used by this stack's `logicaffeine_verify::solver`
//! module: one [`Context`]/[`Z3Solver`] pair driven directly, entities
//! mapped one by one onto Z3 constants or [`FuncDecl`]s rather than
//! through any higher-level session wrapper.
//!
//! Scope: this backend encodes the quantifier-free, non-temporal fragment
//! of the term algebra plus `forall`/`exists` over the primitive sorts.
//! Raw temporal connectives (`tomorrow`, `always`, `until`, ...) have no
//! native Z3 counterpart; a module containing one must be run through
//! [`aeon_pipeline::SurrogateEncoder`] first, which rewrites every
//! temporal subterm into a fresh boolean surrogate plus its defining
//! facts before anything reaches this adapter. Encountering one here is
//! reported as [`Z3BackendError::UnsupportedTerm`] rather than silently
//! misencoded.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use aeon_module::module::StatementKind;
use aeon_module::{Consumer, RecursionMode, Root};
use aeon_term::{Entity, Label, Term, Type};

use z3::ast::{Ast, Bool, Dynamic, Int, Real};
use z3::{Context, FuncDecl, RecFuncDecl, SatResult, Solver as Z3Solver, Sort};

use crate::facade::{Backend, Verdict};

/// Errors this backend can raise while encoding a term or declaring an
/// entity.
#[derive(Debug)]
pub enum Z3BackendError {
    /// `term` has no Z3 counterpart this adapter knows how to build —
    /// typically a raw temporal connective that reached the backend
    /// without first passing through a surrogate-encoding stage.
    UnsupportedTerm(String),
}

impl fmt::Display for Z3BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Z3BackendError::UnsupportedTerm(desc) => {
                write!(f, "z3 backend cannot encode {desc}; run it through the surrogate encoder first")
            }
        }
    }
}

impl std::error::Error for Z3BackendError {}

/// A [`Backend`] that drives a live Z3 [`Z3Solver`].
///
/// Borrows its [`Context`] rather than owning one, matching how the Z3
/// bindings tie every AST node's lifetime to the context that built it:
/// callers construct a `Context` once (typically with a `timeout` param
/// the way `logicaffeine_verify::solver::Verifier` sets one) and hand a
/// reference to it here.
pub struct Z3Backend<'ctx> {
    ctx: &'ctx Context,
    solver: Z3Solver<'ctx>,
    consts: HashMap<u64, Dynamic<'ctx>>,
    funcs: HashMap<u64, FuncDecl<'ctx>>,
    rec_funcs: HashMap<u64, RecFuncDecl<'ctx>>,
}

impl<'ctx> Z3Backend<'ctx> {
    pub fn new(ctx: &'ctx Context) -> Self {
        Z3Backend {
            ctx,
            solver: Z3Solver::new(ctx),
            consts: HashMap::new(),
            funcs: HashMap::new(),
            rec_funcs: HashMap::new(),
        }
    }

    fn sort_for(&self, ty: &Type) -> Sort<'ctx> {
        if ty.is_boolean() || ty.is_error() {
            return Sort::bool(self.ctx);
        }
        match ty.to_string().as_str() {
            "real" => Sort::real(self.ctx),
            _ => Sort::int(self.ctx),
        }
    }

    /// Declares `entity` the first time it is seen: a bare Z3 constant for
    /// a non-function type, a [`FuncDecl`] (or, for an `Allowed`-mode
    /// root, a [`RecFuncDecl`]) for a function type.
    fn declare_entity(&mut self, entity: &Arc<Entity>, recursive: bool) -> Result<(), Z3BackendError> {
        if let Some((params, range)) = entity.ty().as_function() {
            let param_sorts: Vec<Sort<'ctx>> = params.iter().map(|p| self.sort_for(p)).collect();
            let domain: Vec<&Sort<'ctx>> = param_sorts.iter().collect();
            let range_sort = self.sort_for(range);
            let name = entity.name().to_string();
            if recursive {
                let decl = RecFuncDecl::new(self.ctx, name.as_str(), &domain, &range_sort);
                self.rec_funcs.insert(entity.id(), decl);
                return Ok(());
            }
            let decl = FuncDecl::new(self.ctx, name.as_str(), &domain, &range_sort);
            self.funcs.insert(entity.id(), decl);
            // A non-recursive function entity still has to have its body
            // asserted (`adopt`'s recursive branch below only fires for
            // `Allowed`-mode roots): since a plain `FuncDecl` has no
            // `add_def`, the body is instead pinned down with a
            // forall-quantified defining equation, same shape `encode_quantifier`
            // produces for an explicit `forall` term.
            if let Some((decls, body)) = entity.value().and_then(Term::as_lambda) {
                let mut inner = HashMap::new();
                let mut consts = Vec::with_capacity(decls.len());
                for d in decls {
                    let sort = self.sort_for(&d.ty);
                    let c = match sort.kind() {
                        z3::SortKind::Bool => Dynamic::from_ast(&Bool::new_const(self.ctx, d.name.to_string().as_str())),
                        z3::SortKind::Real => Dynamic::from_ast(&Real::new_const(self.ctx, d.name.to_string().as_str())),
                        _ => Dynamic::from_ast(&Int::new_const(self.ctx, d.name.to_string().as_str())),
                    };
                    inner.insert(d.name, c.clone());
                    consts.push(c);
                }
                let body_ast = self.term_to_ast(body, &inner)?;
                let arg_refs: Vec<&dyn Ast<'ctx>> = consts.iter().map(|c| c as &dyn Ast<'ctx>).collect();
                let applied = self.funcs.get(&entity.id()).expect("just inserted").apply(&arg_refs);
                let bound_refs: Vec<&dyn Ast<'ctx>> = consts.iter().map(|c| c as &dyn Ast<'ctx>).collect();
                let eq = as_bool_or_eq(self.ctx, &applied, &body_ast);
                let defn = z3::ast::forall_const(self.ctx, &bound_refs, &[], &eq);
                self.solver.assert(&defn);
            }
            return Ok(());
        }
        let name = entity.name().to_string();
        let constant = match self.sort_for(entity.ty()).kind() {
            z3::SortKind::Bool => Dynamic::from_ast(&Bool::new_const(self.ctx, name.as_str())),
            z3::SortKind::Real => Dynamic::from_ast(&Real::new_const(self.ctx, name.as_str())),
            _ => Dynamic::from_ast(&Int::new_const(self.ctx, name.as_str())),
        };
        if let Some(value) = entity.value() {
            let encoded = self.term_to_ast(value, &HashMap::new())?;
            self.solver.assert(&as_bool_or_eq(self.ctx, &constant, &encoded));
        }
        self.consts.insert(entity.id(), constant);
        Ok(())
    }

    /// Encodes `t` into a Z3 [`Dynamic`], resolving `Term::variable` names
    /// against `bound` (the locally bound constants introduced by an
    /// enclosing `forall`/`exists`) before falling back to a declared
    /// entity's constant or function.
    fn term_to_ast(&mut self, t: &Term, bound: &HashMap<Label, Dynamic<'ctx>>) -> Result<Dynamic<'ctx>, Z3BackendError> {
        if let Some(b) = t.as_boolean() {
            return Ok(Dynamic::from_ast(&Bool::from_bool(self.ctx, b)));
        }
        if let Some(n) = t.as_integer() {
            return Ok(Dynamic::from_ast(&Int::from_i64(self.ctx, n)));
        }
        if let Some(r) = t.as_real() {
            return Ok(Dynamic::from_ast(&real_from_f64(self.ctx, r)));
        }
        if let Some(name) = t.as_variable() {
            if let Some(ast) = bound.get(&name) {
                return Ok(ast.clone());
            }
            return Err(Z3BackendError::UnsupportedTerm(format!("unresolved variable `{name}`")));
        }
        if let Some(entity) = t.as_object() {
            if let Some(ast) = self.consts.get(&entity.id()) {
                return Ok(ast.clone());
            }
            self.declare_entity(entity, false)?;
            return Ok(self.consts.get(&entity.id()).expect("just declared").clone());
        }
        if let Some((head, args)) = t.as_atom() {
            return self.encode_apply(head, args, bound);
        }
        if let Some(ts) = t.as_equal() {
            return self.encode_chain(ts, bound, |ctx, a, b| Dynamic::from_ast(&a._eq(b)), |ctx, xs| Bool::and(ctx, &xs));
        }
        if let Some(ts) = t.as_distinct() {
            let encoded: Vec<Dynamic<'ctx>> = ts.iter().map(|x| self.term_to_ast(x, bound)).collect::<Result<_, _>>()?;
            let refs: Vec<&Dynamic<'ctx>> = encoded.iter().collect();
            return Ok(Dynamic::from_ast(&Dynamic::distinct(self.ctx, &refs)));
        }
        if let Some(inner) = t.as_negation() {
            let b = self.as_bool(inner, bound)?;
            return Ok(Dynamic::from_ast(&b.not()));
        }
        if let Some(ts) = t.as_conjunction() {
            let encoded: Vec<Bool<'ctx>> = ts.iter().map(|x| self.as_bool(x, bound)).collect::<Result<_, _>>()?;
            let refs: Vec<&Bool<'ctx>> = encoded.iter().collect();
            return Ok(Dynamic::from_ast(&Bool::and(self.ctx, &refs)));
        }
        if let Some(ts) = t.as_disjunction() {
            let encoded: Vec<Bool<'ctx>> = ts.iter().map(|x| self.as_bool(x, bound)).collect::<Result<_, _>>()?;
            let refs: Vec<&Bool<'ctx>> = encoded.iter().collect();
            return Ok(Dynamic::from_ast(&Bool::or(self.ctx, &refs)));
        }
        if let Some((l, r)) = t.as_implication() {
            let lb = self.as_bool(l, bound)?;
            let rb = self.as_bool(r, bound)?;
            return Ok(Dynamic::from_ast(&lb.implies(&rb)));
        }
        if let Some((g, a, b)) = t.as_ite() {
            let gb = self.as_bool(g, bound)?;
            let av = self.term_to_ast(a, bound)?;
            let bv = self.term_to_ast(b, bound)?;
            return Ok(gb.ite(&av, &bv));
        }
        if let Some((decls, body)) = t.as_forall() {
            return self.encode_quantifier(decls, body, bound, true);
        }
        if let Some((decls, body)) = t.as_exists() {
            return self.encode_quantifier(decls, body, bound, false);
        }
        if let Some(inner) = t.as_minus() {
            return self.encode_arith1(inner, bound, |x| Dynamic::from_ast(&(-x)));
        }
        if let Some(ts) = t.as_sum() {
            return self.encode_arith_n(ts, bound, |ctx, xs| Int::add(ctx, &xs), |ctx, xs| Real::add(ctx, &xs));
        }
        if let Some(ts) = t.as_product() {
            return self.encode_arith_n(ts, bound, |ctx, xs| Int::mul(ctx, &xs), |ctx, xs| Real::mul(ctx, &xs));
        }
        if let Some((l, r)) = t.as_difference() {
            return self.encode_arith2(l, r, bound, |a, b| a - b, |a, b| a - b);
        }
        if let Some((l, r)) = t.as_division() {
            return self.encode_arith2(l, r, bound, |a, b| a / b, |a, b| a / b);
        }
        if let Some((l, r)) = t.as_less_than() {
            return self.encode_cmp(l, r, bound, |a, b| a.lt(b), |a, b| a.lt(b));
        }
        if let Some((l, r)) = t.as_less_than_eq() {
            return self.encode_cmp(l, r, bound, |a, b| a.le(b), |a, b| a.le(b));
        }
        if let Some((l, r)) = t.as_greater_than() {
            return self.encode_cmp(l, r, bound, |a, b| a.gt(b), |a, b| a.gt(b));
        }
        if let Some((l, r)) = t.as_greater_than_eq() {
            return self.encode_cmp(l, r, bound, |a, b| a.ge(b), |a, b| a.ge(b));
        }
        if let Some((inner, _)) = t.as_error() {
            return self.term_to_ast(inner, bound);
        }
        Err(Z3BackendError::UnsupportedTerm(format!("`{t}`")))
    }

    fn as_bool(&mut self, t: &Term, bound: &HashMap<Label, Dynamic<'ctx>>) -> Result<Bool<'ctx>, Z3BackendError> {
        let ast = self.term_to_ast(t, bound)?;
        ast.as_bool()
            .ok_or_else(|| Z3BackendError::UnsupportedTerm(format!("`{t}` as a boolean")))
    }

    fn encode_chain(
        &mut self,
        ts: &[Term],
        bound: &HashMap<Label, Dynamic<'ctx>>,
        pair: impl Fn(&'ctx Context, &Dynamic<'ctx>, &Dynamic<'ctx>) -> Dynamic<'ctx>,
        fold: impl Fn(&'ctx Context, Vec<&Bool<'ctx>>) -> Bool<'ctx>,
    ) -> Result<Dynamic<'ctx>, Z3BackendError> {
        let encoded: Vec<Dynamic<'ctx>> = ts.iter().map(|x| self.term_to_ast(x, bound)).collect::<Result<_, _>>()?;
        let pairs: Vec<Bool<'ctx>> = encoded
            .windows(2)
            .map(|w| pair(self.ctx, &w[0], &w[1]).as_bool().expect("equality is always boolean"))
            .collect();
        let refs: Vec<&Bool<'ctx>> = pairs.iter().collect();
        Ok(Dynamic::from_ast(&fold(self.ctx, refs)))
    }

    fn encode_apply(
        &mut self,
        head: &Term,
        args: &[Term],
        bound: &HashMap<Label, Dynamic<'ctx>>,
    ) -> Result<Dynamic<'ctx>, Z3BackendError> {
        let entity = head
            .as_object()
            .ok_or_else(|| Z3BackendError::UnsupportedTerm(format!("applying non-entity head `{head}`")))?;
        let encoded_args: Vec<Dynamic<'ctx>> = args.iter().map(|a| self.term_to_ast(a, bound)).collect::<Result<_, _>>()?;
        let arg_refs: Vec<&dyn Ast<'ctx>> = encoded_args.iter().map(|a| a as &dyn Ast<'ctx>).collect();
        if let Some(decl) = self.funcs.get(&entity.id()) {
            return Ok(decl.apply(&arg_refs));
        }
        if let Some(decl) = self.rec_funcs.get(&entity.id()) {
            return Ok(decl.apply(&arg_refs));
        }
        self.declare_entity(entity, false)?;
        Ok(self.funcs.get(&entity.id()).expect("just declared").apply(&arg_refs))
    }

    fn encode_quantifier(
        &mut self,
        decls: &[aeon_term::Decl],
        body: &Term,
        bound: &HashMap<Label, Dynamic<'ctx>>,
        universal: bool,
    ) -> Result<Dynamic<'ctx>, Z3BackendError> {
        let mut inner = bound.clone();
        let mut consts = Vec::with_capacity(decls.len());
        for decl in decls {
            let sort = self.sort_for(&decl.ty);
            let name = decl.name.to_string();
            let c = match sort.kind() {
                z3::SortKind::Bool => Dynamic::from_ast(&Bool::new_const(self.ctx, name.as_str())),
                z3::SortKind::Real => Dynamic::from_ast(&Real::new_const(self.ctx, name.as_str())),
                _ => Dynamic::from_ast(&Int::new_const(self.ctx, name.as_str())),
            };
            inner.insert(decl.name, c.clone());
            consts.push(c);
        }
        let body_bool = self.as_bool(body, &inner)?;
        let bound_refs: Vec<&dyn Ast<'ctx>> = consts.iter().map(|c| c as &dyn Ast<'ctx>).collect();
        let quantified = if universal {
            z3::ast::forall_const(self.ctx, &bound_refs, &[], &body_bool)
        } else {
            z3::ast::exists_const(self.ctx, &bound_refs, &[], &body_bool)
        };
        Ok(Dynamic::from_ast(&quantified))
    }

    fn encode_arith1(
        &mut self,
        inner: &Term,
        bound: &HashMap<Label, Dynamic<'ctx>>,
        neg: impl FnOnce(Int<'ctx>) -> Dynamic<'ctx>,
    ) -> Result<Dynamic<'ctx>, Z3BackendError> {
        let ast = self.term_to_ast(inner, bound)?;
        if let Some(i) = ast.as_int() {
            return Ok(neg(i));
        }
        if let Some(r) = ast.as_real() {
            return Ok(Dynamic::from_ast(&(-r)));
        }
        Err(Z3BackendError::UnsupportedTerm(format!("arithmetic negation of `{inner}`")))
    }

    fn encode_arith_n(
        &mut self,
        ts: &[Term],
        bound: &HashMap<Label, Dynamic<'ctx>>,
        int_fold: impl Fn(&'ctx Context, Vec<&Int<'ctx>>) -> Int<'ctx>,
        real_fold: impl Fn(&'ctx Context, Vec<&Real<'ctx>>) -> Real<'ctx>,
    ) -> Result<Dynamic<'ctx>, Z3BackendError> {
        let encoded: Vec<Dynamic<'ctx>> = ts.iter().map(|x| self.term_to_ast(x, bound)).collect::<Result<_, _>>()?;
        if encoded.iter().any(|d| d.as_real().is_some()) {
            let reals: Vec<Real<'ctx>> = encoded
                .iter()
                .map(|d| d.as_real().unwrap_or_else(|| to_real(self.ctx, d)))
                .collect();
            let refs: Vec<&Real<'ctx>> = reals.iter().collect();
            return Ok(Dynamic::from_ast(&real_fold(self.ctx, refs)));
        }
        let ints: Vec<Int<'ctx>> = encoded
            .iter()
            .map(|d| d.as_int().ok_or_else(|| Z3BackendError::UnsupportedTerm("a non-numeric operand".into())))
            .collect::<Result<_, _>>()?;
        let refs: Vec<&Int<'ctx>> = ints.iter().collect();
        Ok(Dynamic::from_ast(&int_fold(self.ctx, refs)))
    }

    fn encode_arith2(
        &mut self,
        l: &Term,
        r: &Term,
        bound: &HashMap<Label, Dynamic<'ctx>>,
        int_op: impl FnOnce(Int<'ctx>, Int<'ctx>) -> Int<'ctx>,
        real_op: impl FnOnce(Real<'ctx>, Real<'ctx>) -> Real<'ctx>,
    ) -> Result<Dynamic<'ctx>, Z3BackendError> {
        let la = self.term_to_ast(l, bound)?;
        let ra = self.term_to_ast(r, bound)?;
        if la.as_real().is_some() || ra.as_real().is_some() {
            let lr = la.as_real().unwrap_or_else(|| to_real(self.ctx, &la));
            let rr = ra.as_real().unwrap_or_else(|| to_real(self.ctx, &ra));
            return Ok(Dynamic::from_ast(&real_op(lr, rr)));
        }
        let li = la.as_int().ok_or_else(|| Z3BackendError::UnsupportedTerm(format!("`{l}` as numeric")))?;
        let ri = ra.as_int().ok_or_else(|| Z3BackendError::UnsupportedTerm(format!("`{r}` as numeric")))?;
        Ok(Dynamic::from_ast(&int_op(li, ri)))
    }

    fn encode_cmp(
        &mut self,
        l: &Term,
        r: &Term,
        bound: &HashMap<Label, Dynamic<'ctx>>,
        int_op: impl FnOnce(&Int<'ctx>, &Int<'ctx>) -> Bool<'ctx>,
        real_op: impl FnOnce(&Real<'ctx>, &Real<'ctx>) -> Bool<'ctx>,
    ) -> Result<Dynamic<'ctx>, Z3BackendError> {
        let la = self.term_to_ast(l, bound)?;
        let ra = self.term_to_ast(r, bound)?;
        if la.as_real().is_some() || ra.as_real().is_some() {
            let lr = la.as_real().unwrap_or_else(|| to_real(self.ctx, &la));
            let rr = ra.as_real().unwrap_or_else(|| to_real(self.ctx, &ra));
            return Ok(Dynamic::from_ast(&real_op(&lr, &rr)));
        }
        let li = la.as_int().ok_or_else(|| Z3BackendError::UnsupportedTerm(format!("`{l}` as numeric")))?;
        let ri = ra.as_int().ok_or_else(|| Z3BackendError::UnsupportedTerm(format!("`{r}` as numeric")))?;
        Ok(Dynamic::from_ast(&int_op(&li, &ri)))
    }
}

fn to_real<'ctx>(ctx: &'ctx Context, d: &Dynamic<'ctx>) -> Real<'ctx> {
    d.as_int().map(|i| Int::to_real(&i)).unwrap_or_else(|| Real::from_real(ctx, 0, 1))
}

/// Approximates an `f64` as a Z3 rational, scaling by a fixed denominator.
/// This algebra stores reals as 64-bit floats (§3.2's `Real` constant), not
/// arbitrary-precision rationals, so round-tripping through Z3's exact
/// rational sort is necessarily an approximation.
fn real_from_f64<'ctx>(ctx: &'ctx Context, f: f64) -> Real<'ctx> {
    const SCALE: i32 = 1_000_000;
    let scaled = (f * SCALE as f64).round() as i32;
    Real::from_real(ctx, scaled, SCALE)
}

fn as_bool_or_eq<'ctx>(ctx: &'ctx Context, constant: &Dynamic<'ctx>, value: &Dynamic<'ctx>) -> Bool<'ctx> {
    let _ = ctx;
    constant._eq(value)
}

impl<'ctx> Consumer for Z3Backend<'ctx> {
    type Error = Z3BackendError;

    fn adopt(&mut self, root: Arc<Root>) -> Result<(), Self::Error> {
        let recursive = root.mode() == RecursionMode::Allowed;
        for entity in root.entities() {
            self.declare_entity(entity, recursive)?;
        }
        if recursive {
            for entity in root.entities() {
                if let (Some(decl), Some((decls, body))) =
                    (self.rec_funcs.get(&entity.id()).cloned(), entity.value().and_then(Term::as_lambda))
                {
                    let mut inner = HashMap::new();
                    let mut consts = Vec::with_capacity(decls.len());
                    for d in decls {
                        let sort = self.sort_for(&d.ty);
                        let c = match sort.kind() {
                            z3::SortKind::Bool => Dynamic::from_ast(&Bool::new_const(self.ctx, d.name.to_string().as_str())),
                            z3::SortKind::Real => Dynamic::from_ast(&Real::new_const(self.ctx, d.name.to_string().as_str())),
                            _ => Dynamic::from_ast(&Int::new_const(self.ctx, d.name.to_string().as_str())),
                        };
                        inner.insert(d.name, c.clone());
                        consts.push(c);
                    }
                    let body_ast = self.term_to_ast(body, &inner)?;
                    let bound_refs: Vec<&dyn Ast<'ctx>> = consts.iter().map(|c| c as &dyn Ast<'ctx>).collect();
                    decl.add_def(&bound_refs, &body_ast);
                }
            }
        }
        Ok(())
    }

    fn state(&mut self, term: Term, kind: StatementKind) -> Result<(), Self::Error> {
        let ast = self.as_bool(&term, &HashMap::new())?;
        match kind {
            StatementKind::Requirement | StatementKind::Init | StatementKind::Transition | StatementKind::Final => {
                log::trace!("z3: asserting a {kind:?} fact");
                self.solver.assert(&ast);
            }
        }
        Ok(())
    }

    fn push(&mut self) -> Result<(), Self::Error> {
        self.solver.push();
        Ok(())
    }

    fn pop(&mut self, n: usize) -> Result<(), Self::Error> {
        self.solver.pop(u32::try_from(n).unwrap_or(u32::MAX));
        Ok(())
    }
}

impl<'ctx> Backend for Z3Backend<'ctx> {
    fn check(&mut self) -> Verdict {
        log::debug!("z3: check-sat");
        match self.solver.check() {
            SatResult::Sat => Verdict::Satisfiable,
            SatResult::Unsat => Verdict::Unsatisfiable,
            SatResult::Unknown => {
                log::warn!("z3: solver returned unknown ({:?})", self.solver.get_reason_unknown());
                Verdict::Unknown
            }
        }
    }

    fn value(&mut self, entity: &Arc<Entity>) -> Option<Term> {
        let model = self.solver.get_model()?;
        let ast = self.consts.get(&entity.id())?;
        let evaluated = model.eval(ast, true)?;
        ast_to_term(&evaluated)
    }
}

/// Converts a model-evaluated, variable-free Z3 [`Dynamic`] back into a
/// [`Term`] constant, the inverse of the constant cases in
/// [`Z3Backend::term_to_ast`].
fn ast_to_term(ast: &Dynamic<'_>) -> Option<Term> {
    if let Some(b) = ast.as_bool() {
        return b.as_bool().map(Term::boolean);
    }
    if let Some(i) = ast.as_int() {
        return i.as_i64().map(Term::integer);
    }
    if let Some(r) = ast.as_real() {
        return r.as_real().map(|(num, den)| Term::real(num as f64 / den as f64));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_module::Module;
    use aeon_term::Type;

    #[test]
    fn free_boolean_variable_is_satisfiable() {
        let mut m = Module::new();
        let p = m.declare("p", Type::boolean());
        let resolved = m.resolved(&Term::variable("p"));
        m.require(resolved).unwrap();

        let cfg = z3::Config::new();
        let ctx = Context::new(&cfg);
        let mut backend = Z3Backend::new(&ctx);
        m.replay(&Module::new(), &mut backend).unwrap();
        assert_eq!(backend.check(), Verdict::Satisfiable);
        assert_eq!(backend.value(&p), Some(Term::boolean(true)));
    }

    #[test]
    fn contradiction_is_unsatisfiable() {
        let mut m = Module::new();
        m.require(Term::boolean(false)).unwrap();

        let cfg = z3::Config::new();
        let ctx = Context::new(&cfg);
        let mut backend = Z3Backend::new(&ctx);
        m.replay(&Module::new(), &mut backend).unwrap();
        assert_eq!(backend.check(), Verdict::Unsatisfiable);
    }

    #[test]
    fn non_recursive_function_definition_is_encoded_not_left_uninterpreted() {
        use aeon_term::{Decl, Entity};

        let mut m = Module::new();
        let negate_ty = Type::function(vec![Type::boolean()], Type::boolean());
        let x = Decl::new("x", Type::boolean());
        let body = Term::negation(Term::variable("x"));
        m.define(
            "negate",
            negate_ty,
            Term::lambda(vec![x], body),
            RecursionMode::Forbidden,
        )
        .unwrap();
        let negate: Arc<Entity> = m
            .resolved(&Term::variable("negate"))
            .as_object()
            .unwrap()
            .clone();
        let applied = Term::atom(Term::object(negate), vec![Term::boolean(true)]);
        m.require(applied).unwrap();

        let cfg = z3::Config::new();
        let ctx = Context::new(&cfg);
        let mut backend = Z3Backend::new(&ctx);
        m.replay(&Module::new(), &mut backend).unwrap();
        // `negate(true)` can only be satisfiable if the definition equation
        // was actually asserted and forces it to `false`, then negated by
        // nothing here — so this only holds if the uninterpreted encoding
        // was rejected: requiring `negate(true)` to be true is unsatisfiable
        // once the body `not(x)` is wired in.
        assert_eq!(backend.check(), Verdict::Unsatisfiable);
    }

    #[test]
    fn push_pop_discards_a_requirement() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        m.push();
        m.require(Term::boolean(false)).unwrap();
        m.pop(1).unwrap();

        let cfg = z3::Config::new();
        let ctx = Context::new(&cfg);
        let mut backend = Z3Backend::new(&ctx);
        m.replay(&Module::new(), &mut backend).unwrap();
        assert_eq!(backend.check(), Verdict::Satisfiable);
    }
}

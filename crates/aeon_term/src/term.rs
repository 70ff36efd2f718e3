//! The term AST (§3.2): an immutable, hash-consed node chosen from a closed
//! set of variants covering constants, symbols, predicates, connectives,
//! quantifiers/binders, future and past temporal operators, arithmetic,
//! relational operators, and the `error` variant produced by the type
//! checker.
//!
//! Equality and hashing are by canonical pointer identity (`Arc::ptr_eq`),
//! exactly like [`crate::Type`]: two terms are equal iff they are the same
//! canonical node, and canonicalization guarantees that is equivalent to
//! structural equality for all live nodes (testable property 1, §8).

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, Weak};

use once_cell::sync::Lazy;

use crate::entity::Entity;
use crate::label::Label;
use crate::ty::Type;

/// Bit-pattern wrapper giving `f64` the `Eq`/`Hash` the hash-cons pool key
/// needs. `NaN` payloads are compared bitwise, which is fine here: terms are
/// never used as a numeric ordering key, only as a hash-cons identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct FloatBits(u64);

impl FloatBits {
    fn new(f: f64) -> Self {
        FloatBits(f.to_bits())
    }
    fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// A `(label, type)` pair bound by a quantifier or lambda (§3.2).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Decl {
    pub name: Label,
    pub ty: Type,
}

impl Decl {
    pub fn new(name: impl Into<Label>, ty: Type) -> Self {
        Decl {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum TermKind {
    Integer(i64),
    Real(FloatBits),
    Boolean(bool),
    Variable(Label),
    Object(Arc<Entity>),
    Equal(Vec<Term>),
    Distinct(Vec<Term>),
    Atom(Term, Vec<Term>),
    Negation(Term),
    Conjunction(Vec<Term>),
    Disjunction(Vec<Term>),
    Implication(Term, Term),
    Ite(Term, Term, Term),
    Forall(Vec<Decl>, Term),
    Exists(Vec<Decl>, Term),
    Lambda(Vec<Decl>, Term),
    Tomorrow(Term),
    WTomorrow(Term),
    Eventually(Term),
    Always(Term),
    Until(Term, Term),
    Release(Term, Term),
    Yesterday(Term),
    WYesterday(Term),
    Once(Term),
    Historically(Term),
    Since(Term, Term),
    Triggered(Term, Term),
    Minus(Term),
    Sum(Vec<Term>),
    Product(Vec<Term>),
    Difference(Term, Term),
    Division(Term, Term),
    LessThan(Term, Term),
    LessThanEq(Term, Term),
    GreaterThan(Term, Term),
    GreaterThanEq(Term, Term),
    Error(Term, String),
}

struct TermNode {
    kind: TermKind,
}

/// A canonical, hash-consed term handle (§3.2).
#[derive(Clone)]
pub struct Term(Arc<TermNode>);

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

static POOL: Lazy<Mutex<rustc_hash::FxHashMap<TermKind, Weak<TermNode>>>> =
    Lazy::new(|| Mutex::new(rustc_hash::FxHashMap::default()));

fn mk(kind: TermKind) -> Term {
    let mut pool = POOL.lock().unwrap();
    if let Some(weak) = pool.get(&kind) {
        if let Some(arc) = weak.upgrade() {
            return Term(arc);
        }
    }
    let arc = Arc::new(TermNode { kind: kind.clone() });
    pool.insert(kind, Arc::downgrade(&arc));
    log::trace!("hash-cons: new term node allocated");
    Term(arc)
}

macro_rules! unary_ctor {
    ($name:ident, $variant:ident) => {
        pub fn $name(t: Term) -> Term {
            mk(TermKind::$variant(t))
        }
    };
}

macro_rules! binary_ctor {
    ($name:ident, $variant:ident) => {
        pub fn $name(l: Term, r: Term) -> Term {
            mk(TermKind::$variant(l, r))
        }
    };
}

macro_rules! nary_ctor {
    ($name:ident, $variant:ident) => {
        pub fn $name(ts: Vec<Term>) -> Term {
            mk(TermKind::$variant(ts))
        }
    };
}

impl Term {
    // ---- constants ----
    pub fn integer(i: i64) -> Term {
        mk(TermKind::Integer(i))
    }
    pub fn real(f: f64) -> Term {
        mk(TermKind::Real(FloatBits::new(f)))
    }
    pub fn boolean(b: bool) -> Term {
        mk(TermKind::Boolean(b))
    }

    // ---- symbols ----
    pub fn variable(label: impl Into<Label>) -> Term {
        mk(TermKind::Variable(label.into()))
    }
    pub fn object(entity: Arc<Entity>) -> Term {
        mk(TermKind::Object(entity))
    }

    // ---- predicates ----
    nary_ctor!(equal, Equal);
    nary_ctor!(distinct, Distinct);
    pub fn atom(head: Term, args: Vec<Term>) -> Term {
        mk(TermKind::Atom(head, args))
    }

    // ---- connectives ----
    unary_ctor!(negation, Negation);
    nary_ctor!(conjunction, Conjunction);
    nary_ctor!(disjunction, Disjunction);
    binary_ctor!(implication, Implication);
    pub fn ite(guard: Term, then_branch: Term, else_branch: Term) -> Term {
        mk(TermKind::Ite(guard, then_branch, else_branch))
    }

    // ---- quantifiers / binders ----
    pub fn forall(decls: Vec<Decl>, body: Term) -> Term {
        mk(TermKind::Forall(decls, body))
    }
    pub fn exists(decls: Vec<Decl>, body: Term) -> Term {
        mk(TermKind::Exists(decls, body))
    }
    pub fn lambda(decls: Vec<Decl>, body: Term) -> Term {
        mk(TermKind::Lambda(decls, body))
    }

    // ---- future temporal operators ----
    unary_ctor!(tomorrow, Tomorrow);
    unary_ctor!(w_tomorrow, WTomorrow);
    unary_ctor!(eventually, Eventually);
    unary_ctor!(always, Always);
    binary_ctor!(until, Until);
    binary_ctor!(release, Release);

    // ---- past temporal operators ----
    unary_ctor!(yesterday, Yesterday);
    unary_ctor!(w_yesterday, WYesterday);
    unary_ctor!(once, Once);
    unary_ctor!(historically, Historically);
    binary_ctor!(since, Since);
    binary_ctor!(triggered, Triggered);

    // ---- arithmetic ----
    unary_ctor!(minus, Minus);
    nary_ctor!(sum, Sum);
    nary_ctor!(product, Product);
    binary_ctor!(difference, Difference);
    binary_ctor!(division, Division);

    // ---- relational ----
    binary_ctor!(less_than, LessThan);
    binary_ctor!(less_than_eq, LessThanEq);
    binary_ctor!(greater_than, GreaterThan);
    binary_ctor!(greater_than_eq, GreaterThanEq);

    // ---- error ----
    pub fn error(inner: Term, message: impl Into<String>) -> Term {
        mk(TermKind::Error(inner, message.into()))
    }

    /// The variant's name, used for diagnostics (`PatternError`, SMT-LIB2
    /// printing) and not otherwise load-bearing.
    pub fn variant_name(&self) -> &'static str {
        match &self.0.kind {
            TermKind::Integer(_) => "integer",
            TermKind::Real(_) => "real",
            TermKind::Boolean(_) => "boolean",
            TermKind::Variable(_) => "variable",
            TermKind::Object(_) => "object",
            TermKind::Equal(_) => "equal",
            TermKind::Distinct(_) => "distinct",
            TermKind::Atom(..) => "atom",
            TermKind::Negation(_) => "negation",
            TermKind::Conjunction(_) => "conjunction",
            TermKind::Disjunction(_) => "disjunction",
            TermKind::Implication(..) => "implication",
            TermKind::Ite(..) => "ite",
            TermKind::Forall(..) => "forall",
            TermKind::Exists(..) => "exists",
            TermKind::Lambda(..) => "lambda",
            TermKind::Tomorrow(_) => "tomorrow",
            TermKind::WTomorrow(_) => "w_tomorrow",
            TermKind::Eventually(_) => "eventually",
            TermKind::Always(_) => "always",
            TermKind::Until(..) => "until",
            TermKind::Release(..) => "release",
            TermKind::Yesterday(_) => "yesterday",
            TermKind::WYesterday(_) => "w_yesterday",
            TermKind::Once(_) => "once",
            TermKind::Historically(_) => "historically",
            TermKind::Since(..) => "since",
            TermKind::Triggered(..) => "triggered",
            TermKind::Minus(_) => "minus",
            TermKind::Sum(_) => "sum",
            TermKind::Product(_) => "product",
            TermKind::Difference(..) => "difference",
            TermKind::Division(..) => "division",
            TermKind::LessThan(..) => "less_than",
            TermKind::LessThanEq(..) => "less_than_eq",
            TermKind::GreaterThan(..) => "greater_than",
            TermKind::GreaterThanEq(..) => "greater_than_eq",
            TermKind::Error(..) => "error",
        }
    }

    // ---- accessors used by pattern::Matcher, type_check, eval, stages ----

    pub fn as_integer(&self) -> Option<i64> {
        match &self.0.kind {
            TermKind::Integer(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_real(&self) -> Option<f64> {
        match &self.0.kind {
            TermKind::Real(f) => Some(f.get()),
            _ => None,
        }
    }
    pub fn as_boolean(&self) -> Option<bool> {
        match &self.0.kind {
            TermKind::Boolean(b) => Some(*b),
            _ => None,
        }
    }
    pub fn as_variable(&self) -> Option<Label> {
        match &self.0.kind {
            TermKind::Variable(l) => Some(*l),
            _ => None,
        }
    }
    pub fn as_object(&self) -> Option<&Arc<Entity>> {
        match &self.0.kind {
            TermKind::Object(e) => Some(e),
            _ => None,
        }
    }
    pub fn as_equal(&self) -> Option<&[Term]> {
        match &self.0.kind {
            TermKind::Equal(ts) => Some(ts),
            _ => None,
        }
    }
    pub fn as_distinct(&self) -> Option<&[Term]> {
        match &self.0.kind {
            TermKind::Distinct(ts) => Some(ts),
            _ => None,
        }
    }
    pub fn as_atom(&self) -> Option<(&Term, &[Term])> {
        match &self.0.kind {
            TermKind::Atom(head, args) => Some((head, args)),
            _ => None,
        }
    }
    pub fn as_negation(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Negation(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_conjunction(&self) -> Option<&[Term]> {
        match &self.0.kind {
            TermKind::Conjunction(ts) => Some(ts),
            _ => None,
        }
    }
    pub fn as_disjunction(&self) -> Option<&[Term]> {
        match &self.0.kind {
            TermKind::Disjunction(ts) => Some(ts),
            _ => None,
        }
    }
    pub fn as_implication(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::Implication(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_ite(&self) -> Option<(&Term, &Term, &Term)> {
        match &self.0.kind {
            TermKind::Ite(g, t, e) => Some((g, t, e)),
            _ => None,
        }
    }
    pub fn as_forall(&self) -> Option<(&[Decl], &Term)> {
        match &self.0.kind {
            TermKind::Forall(decls, body) => Some((decls, body)),
            _ => None,
        }
    }
    pub fn as_exists(&self) -> Option<(&[Decl], &Term)> {
        match &self.0.kind {
            TermKind::Exists(decls, body) => Some((decls, body)),
            _ => None,
        }
    }
    pub fn as_lambda(&self) -> Option<(&[Decl], &Term)> {
        match &self.0.kind {
            TermKind::Lambda(decls, body) => Some((decls, body)),
            _ => None,
        }
    }
    pub fn as_tomorrow(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Tomorrow(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_w_tomorrow(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::WTomorrow(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_eventually(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Eventually(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_always(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Always(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_until(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::Until(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_release(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::Release(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_yesterday(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Yesterday(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_w_yesterday(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::WYesterday(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_once(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Once(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_historically(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Historically(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_since(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::Since(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_triggered(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::Triggered(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_minus(&self) -> Option<&Term> {
        match &self.0.kind {
            TermKind::Minus(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_sum(&self) -> Option<&[Term]> {
        match &self.0.kind {
            TermKind::Sum(ts) => Some(ts),
            _ => None,
        }
    }
    pub fn as_product(&self) -> Option<&[Term]> {
        match &self.0.kind {
            TermKind::Product(ts) => Some(ts),
            _ => None,
        }
    }
    pub fn as_difference(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::Difference(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_division(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::Division(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_less_than(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::LessThan(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_less_than_eq(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::LessThanEq(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_greater_than(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::GreaterThan(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_greater_than_eq(&self) -> Option<(&Term, &Term)> {
        match &self.0.kind {
            TermKind::GreaterThanEq(l, r) => Some((l, r)),
            _ => None,
        }
    }
    pub fn as_error(&self) -> Option<(&Term, &str)> {
        match &self.0.kind {
            TermKind::Error(inner, msg) => Some((inner, msg.as_str())),
            _ => None,
        }
    }
    pub fn is_error(&self) -> bool {
        matches!(self.0.kind, TermKind::Error(..))
    }

    /// Free variables of this term (labels not bound by an enclosing
    /// quantifier/lambda and not already `object`-resolved), computed
    /// bottom-up. Used by the surrogate-encoder stage (§4.7) to determine a
    /// fresh surrogate function's parameter signature.
    pub fn free_variables(&self) -> HashSet<Label> {
        let mut out = HashSet::new();
        self.collect_free_variables(&mut out);
        out
    }

    fn collect_free_variables(&self, out: &mut HashSet<Label>) {
        match &self.0.kind {
            TermKind::Variable(l) => {
                out.insert(*l);
            }
            TermKind::Integer(_) | TermKind::Real(_) | TermKind::Boolean(_) | TermKind::Object(_) => {}
            TermKind::Equal(ts) | TermKind::Distinct(ts) | TermKind::Conjunction(ts)
            | TermKind::Disjunction(ts) | TermKind::Sum(ts) | TermKind::Product(ts) => {
                for t in ts {
                    t.collect_free_variables(out);
                }
            }
            TermKind::Atom(head, args) => {
                head.collect_free_variables(out);
                for a in args {
                    a.collect_free_variables(out);
                }
            }
            TermKind::Negation(t)
            | TermKind::Tomorrow(t)
            | TermKind::WTomorrow(t)
            | TermKind::Eventually(t)
            | TermKind::Always(t)
            | TermKind::Yesterday(t)
            | TermKind::WYesterday(t)
            | TermKind::Once(t)
            | TermKind::Historically(t)
            | TermKind::Minus(t) => t.collect_free_variables(out),
            TermKind::Implication(l, r)
            | TermKind::Until(l, r)
            | TermKind::Release(l, r)
            | TermKind::Since(l, r)
            | TermKind::Triggered(l, r)
            | TermKind::Difference(l, r)
            | TermKind::Division(l, r)
            | TermKind::LessThan(l, r)
            | TermKind::LessThanEq(l, r)
            | TermKind::GreaterThan(l, r)
            | TermKind::GreaterThanEq(l, r) => {
                l.collect_free_variables(out);
                r.collect_free_variables(out);
            }
            TermKind::Ite(g, t, e) => {
                g.collect_free_variables(out);
                t.collect_free_variables(out);
                e.collect_free_variables(out);
            }
            TermKind::Forall(decls, body) | TermKind::Exists(decls, body) | TermKind::Lambda(decls, body) => {
                let mut inner = HashSet::new();
                body.collect_free_variables(&mut inner);
                for d in decls {
                    inner.remove(&d.name);
                }
                out.extend(inner);
            }
            TermKind::Error(inner, _) => inner.collect_free_variables(out),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, head: &str, ts: &[Term]) -> fmt::Result {
            write!(f, "({head}")?;
            for t in ts {
                write!(f, " {t}")?;
            }
            write!(f, ")")
        }
        fn decls(f: &mut fmt::Formatter<'_>, ds: &[Decl]) -> fmt::Result {
            write!(f, "(")?;
            for (i, d) in ds.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{d}")?;
            }
            write!(f, ")")
        }
        match &self.0.kind {
            TermKind::Integer(i) => write!(f, "{i}"),
            TermKind::Real(x) => write!(f, "{}", x.get()),
            TermKind::Boolean(b) => write!(f, "{b}"),
            TermKind::Variable(l) => write!(f, "{l}"),
            TermKind::Object(e) => write!(f, "{}", e.name()),
            TermKind::Equal(ts) => list(f, "=", ts),
            TermKind::Distinct(ts) => list(f, "distinct", ts),
            TermKind::Atom(head, args) => {
                write!(f, "({head}")?;
                for a in args {
                    write!(f, " {a}")?;
                }
                write!(f, ")")
            }
            TermKind::Negation(t) => write!(f, "(not {t})"),
            TermKind::Conjunction(ts) => list(f, "and", ts),
            TermKind::Disjunction(ts) => list(f, "or", ts),
            TermKind::Implication(l, r) => write!(f, "(=> {l} {r})"),
            TermKind::Ite(g, t, e) => write!(f, "(ite {g} {t} {e})"),
            TermKind::Forall(ds, body) => {
                write!(f, "(forall ")?;
                decls(f, ds)?;
                write!(f, " {body})")
            }
            TermKind::Exists(ds, body) => {
                write!(f, "(exists ")?;
                decls(f, ds)?;
                write!(f, " {body})")
            }
            TermKind::Lambda(ds, body) => {
                write!(f, "(lambda ")?;
                decls(f, ds)?;
                write!(f, " {body})")
            }
            TermKind::Tomorrow(t) => write!(f, "(X {t})"),
            TermKind::WTomorrow(t) => write!(f, "(wX {t})"),
            TermKind::Eventually(t) => write!(f, "(F {t})"),
            TermKind::Always(t) => write!(f, "(G {t})"),
            TermKind::Until(l, r) => write!(f, "(U {l} {r})"),
            TermKind::Release(l, r) => write!(f, "(R {l} {r})"),
            TermKind::Yesterday(t) => write!(f, "(Y {t})"),
            TermKind::WYesterday(t) => write!(f, "(wY {t})"),
            TermKind::Once(t) => write!(f, "(O {t})"),
            TermKind::Historically(t) => write!(f, "(H {t})"),
            TermKind::Since(l, r) => write!(f, "(S {l} {r})"),
            TermKind::Triggered(l, r) => write!(f, "(T {l} {r})"),
            TermKind::Minus(t) => write!(f, "(- {t})"),
            TermKind::Sum(ts) => list(f, "+", ts),
            TermKind::Product(ts) => list(f, "*", ts),
            TermKind::Difference(l, r) => write!(f, "(- {l} {r})"),
            TermKind::Division(l, r) => write!(f, "(/ {l} {r})"),
            TermKind::LessThan(l, r) => write!(f, "(< {l} {r})"),
            TermKind::LessThanEq(l, r) => write!(f, "(<= {l} {r})"),
            TermKind::GreaterThan(l, r) => write!(f, "(> {l} {r})"),
            TermKind::GreaterThanEq(l, r) => write!(f, "(>= {l} {r})"),
            TermKind::Error(inner, msg) => write!(f, "(error {inner} {msg:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_constants_are_pointer_equal() {
        assert_eq!(Term::integer(3), Term::integer(3));
        assert_ne!(Term::integer(3), Term::integer(4));
    }

    #[test]
    fn identical_subterms_hash_cons_to_the_same_node() {
        let p = Term::variable("p");
        let t1 = Term::conjunction(vec![p.clone(), Term::boolean(true)]);
        let t2 = Term::conjunction(vec![Term::variable("p"), Term::boolean(true)]);
        assert_eq!(t1, t2);
    }

    #[test]
    fn different_variants_with_same_children_are_distinct() {
        let a = Term::disjunction(vec![Term::boolean(true), Term::boolean(false)]);
        let b = Term::conjunction(vec![Term::boolean(true), Term::boolean(false)]);
        assert_ne!(a, b);
    }

    #[test]
    fn real_constants_compare_by_bit_pattern() {
        assert_eq!(Term::real(1.5), Term::real(1.5));
        assert_ne!(Term::real(1.5), Term::real(2.5));
    }

    #[test]
    fn free_variables_exclude_bound_decls() {
        let p = Term::variable("p");
        let q = Term::variable("q");
        let body = Term::conjunction(vec![p, q]);
        let bound = Term::forall(vec![Decl::new("p", Type::boolean())], body);
        let fv = bound.free_variables();
        assert!(!fv.contains(&Label::new("p")));
        assert!(fv.contains(&Label::new("q")));
    }

    #[test]
    fn free_variables_of_atom_include_head_and_args() {
        let f = Term::variable("f");
        let x = Term::variable("x");
        let t = Term::atom(f, vec![x]);
        let fv = t.free_variables();
        assert_eq!(fv.len(), 2);
    }

    #[test]
    fn display_renders_sexpr_like_form() {
        let t = Term::negation(Term::variable("p"));
        assert_eq!(t.to_string(), "(not p)");
    }

    #[test]
    fn error_term_reports_is_error() {
        let e = Term::error(Term::variable("p"), "unbound free variable");
        assert!(e.is_error());
        let (_, msg) = e.as_error().unwrap();
        assert_eq!(msg, "unbound free variable");
    }
}

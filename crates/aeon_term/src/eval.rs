//! The evaluator (§4.4): constant-folds and β-reduces where possible.
//! `evaluate` never raises; it always returns a term semantically equal to
//! its input. No normal-form rewriting beyond folding is performed
//! (explicit non-goal).

use std::collections::HashMap;

use crate::label::Label;
use crate::term::{Decl, Term};

/// Evaluates `t`, folding closed arithmetic/boolean subterms and
/// β-reducing fully-applied `atom(lambda(..), args)` applications.
pub fn evaluate(t: &Term) -> Term {
    if t.as_boolean().is_some() || t.as_integer().is_some() || t.as_real().is_some() {
        return t.clone();
    }
    if let Some(entity) = t.as_object() {
        if let Some(value) = entity.value() {
            if value.as_lambda().is_none() {
                return evaluate(value);
            }
        }
        return t.clone();
    }
    if t.as_variable().is_some() {
        return t.clone();
    }
    if let Some((head, args)) = t.as_atom() {
        let head_eval = evaluate(head);
        let args_eval: Vec<Term> = args.iter().map(evaluate).collect();
        if let Some((decls, body)) = head_eval.as_lambda() {
            if decls.len() == args_eval.len() {
                return evaluate(&substitute(body, decls, &args_eval));
            }
        }
        return Term::atom(head_eval, args_eval);
    }
    if let Some(ts) = t.as_equal() {
        return Term::equal(ts.iter().map(evaluate).collect());
    }
    if let Some(ts) = t.as_distinct() {
        return Term::distinct(ts.iter().map(evaluate).collect());
    }
    if let Some(inner) = t.as_negation() {
        let inner = evaluate(inner);
        if let Some(b) = inner.as_boolean() {
            return Term::boolean(!b);
        }
        return Term::negation(inner);
    }
    if let Some(ts) = t.as_conjunction() {
        return fold_bool_nary(ts, true, Term::conjunction);
    }
    if let Some(ts) = t.as_disjunction() {
        return fold_bool_nary(ts, false, Term::disjunction);
    }
    if let Some((l, r)) = t.as_implication() {
        let l = evaluate(l);
        let r = evaluate(r);
        if let (Some(lb), Some(rb)) = (l.as_boolean(), r.as_boolean()) {
            return Term::boolean(!lb || rb);
        }
        return Term::implication(l, r);
    }
    if let Some((g, then_b, else_b)) = t.as_ite() {
        let g = evaluate(g);
        if let Some(b) = g.as_boolean() {
            return evaluate(if b { then_b } else { else_b });
        }
        return Term::ite(g, evaluate(then_b), evaluate(else_b));
    }
    if let Some((decls, body)) = t.as_forall() {
        return Term::forall(decls.to_vec(), evaluate(body));
    }
    if let Some((decls, body)) = t.as_exists() {
        return Term::exists(decls.to_vec(), evaluate(body));
    }
    if t.as_lambda().is_some() {
        // Evaluation of an un-applied lambda leaves it as-is: there is
        // nothing to fold or reduce until it is applied via `atom`.
        return t.clone();
    }
    if let Some(inner) = t.as_tomorrow() {
        return Term::tomorrow(evaluate(inner));
    }
    if let Some(inner) = t.as_w_tomorrow() {
        return Term::w_tomorrow(evaluate(inner));
    }
    if let Some(inner) = t.as_eventually() {
        return Term::eventually(evaluate(inner));
    }
    if let Some(inner) = t.as_always() {
        return Term::always(evaluate(inner));
    }
    if let Some((l, r)) = t.as_until() {
        return Term::until(evaluate(l), evaluate(r));
    }
    if let Some((l, r)) = t.as_release() {
        return Term::release(evaluate(l), evaluate(r));
    }
    if let Some(inner) = t.as_yesterday() {
        return Term::yesterday(evaluate(inner));
    }
    if let Some(inner) = t.as_w_yesterday() {
        return Term::w_yesterday(evaluate(inner));
    }
    if let Some(inner) = t.as_once() {
        return Term::once(evaluate(inner));
    }
    if let Some(inner) = t.as_historically() {
        return Term::historically(evaluate(inner));
    }
    if let Some((l, r)) = t.as_since() {
        return Term::since(evaluate(l), evaluate(r));
    }
    if let Some((l, r)) = t.as_triggered() {
        return Term::triggered(evaluate(l), evaluate(r));
    }
    if let Some(inner) = t.as_minus() {
        let inner = evaluate(inner);
        if let Some(i) = inner.as_integer() {
            return Term::integer(-i);
        }
        if let Some(x) = inner.as_real() {
            return Term::real(-x);
        }
        return Term::minus(inner);
    }
    if let Some(ts) = t.as_sum() {
        return fold_numeric_nary(ts, 0, Term::sum, |a, b| a + b, |a, b| a + b);
    }
    if let Some(ts) = t.as_product() {
        return fold_numeric_nary(ts, 1, Term::product, |a, b| a * b, |a, b| a * b);
    }
    if let Some((l, r)) = t.as_difference() {
        return fold_numeric_binary(l, r, Term::difference, |a, b| a - b, |a, b| a - b);
    }
    if let Some((l, r)) = t.as_division() {
        return fold_division(l, r);
    }
    if let Some((l, r)) = t.as_less_than() {
        return fold_relational(l, r, Term::less_than, |a, b| a < b, |a, b| a < b);
    }
    if let Some((l, r)) = t.as_less_than_eq() {
        return fold_relational(l, r, Term::less_than_eq, |a, b| a <= b, |a, b| a <= b);
    }
    if let Some((l, r)) = t.as_greater_than() {
        return fold_relational(l, r, Term::greater_than, |a, b| a > b, |a, b| a > b);
    }
    if let Some((l, r)) = t.as_greater_than_eq() {
        return fold_relational(l, r, Term::greater_than_eq, |a, b| a >= b, |a, b| a >= b);
    }
    if let Some((inner, msg)) = t.as_error() {
        return Term::error(evaluate(inner), msg.to_string());
    }
    unreachable!("evaluate: every Term variant is handled above")
}

fn fold_bool_nary(ts: &[Term], identity: bool, rebuild: fn(Vec<Term>) -> Term) -> Term {
    let evaluated: Vec<Term> = ts.iter().map(evaluate).collect();
    let mut folded = Vec::with_capacity(evaluated.len());
    let mut acc = identity;
    for t in evaluated {
        match t.as_boolean() {
            Some(b) => {
                acc = if identity { acc && b } else { acc || b };
                if b != identity {
                    // short-circuiting constant: false absorbs `and`, true absorbs `or`.
                    return Term::boolean(b);
                }
            }
            None => folded.push(t),
        }
    }
    if folded.is_empty() {
        return Term::boolean(acc);
    }
    rebuild(folded)
}

fn fold_numeric_nary(
    ts: &[Term],
    identity: i64,
    rebuild: fn(Vec<Term>) -> Term,
    fold_i: fn(i64, i64) -> i64,
    fold_f: fn(f64, f64) -> f64,
) -> Term {
    let evaluated: Vec<Term> = ts.iter().map(evaluate).collect();
    if evaluated.iter().all(|t| t.as_integer().is_some()) {
        let acc = evaluated
            .iter()
            .map(|t| t.as_integer().unwrap())
            .fold(identity, fold_i);
        return Term::integer(acc);
    }
    if evaluated.iter().all(|t| t.as_real().is_some() || t.as_integer().is_some()) {
        let acc = evaluated.iter().fold(identity as f64, |acc, t| {
            let v = t.as_real().unwrap_or_else(|| t.as_integer().unwrap() as f64);
            fold_f(acc, v)
        });
        return Term::real(acc);
    }
    rebuild(evaluated)
}

fn fold_numeric_binary(
    l: &Term,
    r: &Term,
    rebuild: fn(Term, Term) -> Term,
    fold_i: fn(i64, i64) -> i64,
    fold_f: fn(f64, f64) -> f64,
) -> Term {
    let l = evaluate(l);
    let r = evaluate(r);
    if let (Some(li), Some(ri)) = (l.as_integer(), r.as_integer()) {
        return Term::integer(fold_i(li, ri));
    }
    if let (Some(lf), Some(rf)) = (numeric_as_f64(&l), numeric_as_f64(&r)) {
        return Term::real(fold_f(lf, rf));
    }
    rebuild(l, r)
}

/// `division` folds like any other numeric binary op, except an integer
/// divisor of zero is left unfolded rather than panicking (§4.4: `evaluate`
/// never raises). Real division by zero is not guarded: IEEE 754 division
/// already totalizes to `inf`/`NaN` rather than trapping.
fn fold_division(l: &Term, r: &Term) -> Term {
    let l = evaluate(l);
    let r = evaluate(r);
    if let (Some(li), Some(ri)) = (l.as_integer(), r.as_integer()) {
        if ri == 0 {
            return Term::division(l, r);
        }
        return Term::integer(li / ri);
    }
    if let (Some(lf), Some(rf)) = (numeric_as_f64(&l), numeric_as_f64(&r)) {
        return Term::real(lf / rf);
    }
    Term::division(l, r)
}

fn fold_relational(
    l: &Term,
    r: &Term,
    rebuild: fn(Term, Term) -> Term,
    cmp_i: fn(&i64, &i64) -> bool,
    cmp_f: fn(&f64, &f64) -> bool,
) -> Term {
    let l = evaluate(l);
    let r = evaluate(r);
    if let (Some(li), Some(ri)) = (l.as_integer(), r.as_integer()) {
        return Term::boolean(cmp_i(&li, &ri));
    }
    if let (Some(lf), Some(rf)) = (numeric_as_f64(&l), numeric_as_f64(&r)) {
        return Term::boolean(cmp_f(&lf, &rf));
    }
    rebuild(l, r)
}

fn numeric_as_f64(t: &Term) -> Option<f64> {
    t.as_real().or_else(|| t.as_integer().map(|i| i as f64))
}

/// Substitutes each `decls[i].name` with `args[i]` inside `body`, respecting
/// shadowing by nested binders (§4.5's resolver does the analogous thing for
/// `object` resolution; β-reduction needs the same shadowing discipline).
pub fn substitute(body: &Term, decls: &[Decl], args: &[Term]) -> Term {
    let mut env: HashMap<Label, Term> = HashMap::new();
    for (d, a) in decls.iter().zip(args) {
        env.insert(d.name, a.clone());
    }
    subst(body, &env)
}

fn subst(t: &Term, env: &HashMap<Label, Term>) -> Term {
    if let Some(label) = t.as_variable() {
        return env.get(&label).cloned().unwrap_or_else(|| t.clone());
    }
    if t.as_boolean().is_some() || t.as_integer().is_some() || t.as_real().is_some() || t.as_object().is_some() {
        return t.clone();
    }
    if let Some(ts) = t.as_equal() {
        return Term::equal(ts.iter().map(|x| subst(x, env)).collect());
    }
    if let Some(ts) = t.as_distinct() {
        return Term::distinct(ts.iter().map(|x| subst(x, env)).collect());
    }
    if let Some((head, args)) = t.as_atom() {
        return Term::atom(subst(head, env), args.iter().map(|x| subst(x, env)).collect());
    }
    if let Some(inner) = t.as_negation() {
        return Term::negation(subst(inner, env));
    }
    if let Some(ts) = t.as_conjunction() {
        return Term::conjunction(ts.iter().map(|x| subst(x, env)).collect());
    }
    if let Some(ts) = t.as_disjunction() {
        return Term::disjunction(ts.iter().map(|x| subst(x, env)).collect());
    }
    if let Some((l, r)) = t.as_implication() {
        return Term::implication(subst(l, env), subst(r, env));
    }
    if let Some((g, then_b, else_b)) = t.as_ite() {
        return Term::ite(subst(g, env), subst(then_b, env), subst(else_b, env));
    }
    if let Some((decls, b)) = t.as_forall() {
        return Term::forall(decls.to_vec(), subst_under_binder(b, decls, env));
    }
    if let Some((decls, b)) = t.as_exists() {
        return Term::exists(decls.to_vec(), subst_under_binder(b, decls, env));
    }
    if let Some((decls, b)) = t.as_lambda() {
        return Term::lambda(decls.to_vec(), subst_under_binder(b, decls, env));
    }
    if let Some(inner) = t.as_tomorrow() {
        return Term::tomorrow(subst(inner, env));
    }
    if let Some(inner) = t.as_w_tomorrow() {
        return Term::w_tomorrow(subst(inner, env));
    }
    if let Some(inner) = t.as_eventually() {
        return Term::eventually(subst(inner, env));
    }
    if let Some(inner) = t.as_always() {
        return Term::always(subst(inner, env));
    }
    if let Some((l, r)) = t.as_until() {
        return Term::until(subst(l, env), subst(r, env));
    }
    if let Some((l, r)) = t.as_release() {
        return Term::release(subst(l, env), subst(r, env));
    }
    if let Some(inner) = t.as_yesterday() {
        return Term::yesterday(subst(inner, env));
    }
    if let Some(inner) = t.as_w_yesterday() {
        return Term::w_yesterday(subst(inner, env));
    }
    if let Some(inner) = t.as_once() {
        return Term::once(subst(inner, env));
    }
    if let Some(inner) = t.as_historically() {
        return Term::historically(subst(inner, env));
    }
    if let Some((l, r)) = t.as_since() {
        return Term::since(subst(l, env), subst(r, env));
    }
    if let Some((l, r)) = t.as_triggered() {
        return Term::triggered(subst(l, env), subst(r, env));
    }
    if let Some(inner) = t.as_minus() {
        return Term::minus(subst(inner, env));
    }
    if let Some(ts) = t.as_sum() {
        return Term::sum(ts.iter().map(|x| subst(x, env)).collect());
    }
    if let Some(ts) = t.as_product() {
        return Term::product(ts.iter().map(|x| subst(x, env)).collect());
    }
    if let Some((l, r)) = t.as_difference() {
        return Term::difference(subst(l, env), subst(r, env));
    }
    if let Some((l, r)) = t.as_division() {
        return Term::division(subst(l, env), subst(r, env));
    }
    if let Some((l, r)) = t.as_less_than() {
        return Term::less_than(subst(l, env), subst(r, env));
    }
    if let Some((l, r)) = t.as_less_than_eq() {
        return Term::less_than_eq(subst(l, env), subst(r, env));
    }
    if let Some((l, r)) = t.as_greater_than() {
        return Term::greater_than(subst(l, env), subst(r, env));
    }
    if let Some((l, r)) = t.as_greater_than_eq() {
        return Term::greater_than_eq(subst(l, env), subst(r, env));
    }
    if let Some((inner, msg)) = t.as_error() {
        return Term::error(subst(inner, env), msg.to_string());
    }
    unreachable!("subst: every Term variant is handled above")
}

fn subst_under_binder(body: &Term, decls: &[Decl], env: &HashMap<Label, Term>) -> Term {
    let mut shadowed = env.clone();
    for d in decls {
        shadowed.remove(&d.name);
    }
    subst(body, &shadowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::ty::Type;

    #[test]
    fn s2_conjunction_and_negation_fold() {
        let c = Term::conjunction(vec![Term::boolean(true), Term::boolean(false)]);
        assert_eq!(evaluate(&c), Term::boolean(false));

        let n = Term::negation(Term::boolean(true));
        assert_eq!(evaluate(&n), Term::boolean(false));
    }

    #[test]
    fn s3_lambda_application_evaluates_via_object() {
        let decls = vec![Decl::new("x", Type::integer())];
        let body = Term::sum(vec![Term::variable("x"), Term::integer(1)]);
        let succ = Entity::with_value(
            crate::Label::new("succ"),
            Type::function(vec![Type::integer()], Type::integer()),
            Term::lambda(decls, body),
        );
        let call = Term::atom(Term::object(succ), vec![Term::integer(3)]);
        assert_eq!(evaluate(&call), Term::integer(4));
    }

    #[test]
    fn evaluator_is_idempotent() {
        let t = Term::conjunction(vec![Term::boolean(true), Term::disjunction(vec![Term::boolean(false)])]);
        let once = evaluate(&t);
        let twice = evaluate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn arithmetic_constant_folding() {
        let t = Term::sum(vec![Term::integer(2), Term::integer(3), Term::integer(4)]);
        assert_eq!(evaluate(&t), Term::integer(9));

        let d = Term::division(Term::real(1.0), Term::real(4.0));
        assert_eq!(evaluate(&d), Term::real(0.25));
    }

    #[test]
    fn integer_division_by_zero_is_left_unfolded_rather_than_panicking() {
        let t = Term::division(Term::integer(1), Term::integer(0));
        assert_eq!(evaluate(&t), t);
    }

    #[test]
    fn real_division_by_zero_folds_to_infinity() {
        let t = Term::division(Term::real(1.0), Term::real(0.0));
        assert_eq!(evaluate(&t), Term::real(f64::INFINITY));
    }

    #[test]
    fn unresolved_operands_are_left_in_place() {
        let t = Term::conjunction(vec![Term::variable("p"), Term::boolean(true)]);
        let r = evaluate(&t);
        assert_eq!(r, Term::variable("p"));
    }

    #[test]
    fn substitution_respects_shadowing_by_inner_binder() {
        let inner = Term::forall(
            vec![Decl::new("x", Type::integer())],
            Term::variable("x"),
        );
        let t = substitute(&inner, &[Decl::new("x", Type::integer())], &[Term::integer(9)]);
        // The bound `x` inside forall shadows the outer substitution, so the
        // body is untouched.
        let (_, body) = t.as_forall().unwrap();
        assert_eq!(body, &Term::variable("x"));
    }
}

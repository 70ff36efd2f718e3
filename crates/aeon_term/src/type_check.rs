//! The type checker (§4.3): `type_of` is total and never raises. Ill-typed
//! terms produce an [`Type::error`] carrying a diagnostic; errors propagate
//! so that the first error subterm becomes the result of any enclosing
//! constructor.

use std::collections::HashMap;

use crate::label::Label;
use crate::term::{Decl, Term};
use crate::ty::Type;

/// Computes the type of `t`. Total: always returns a `Type`, using
/// `Type::error(..)` to carry type errors as data rather than raising.
pub fn type_of(t: &Term) -> Type {
    type_of_in(t, &HashMap::new())
}

/// `type_of`, under a binder-introduced `label -> type` environment (§4.3:
/// a quantifier/lambda body is typed "under an extended environment").
/// `variable(l)` resolves against `env` before falling back to a free-
/// variable error; `object(e)` ignores `env` entirely since it already
/// carries its own entity's type.
fn type_of_in(t: &Term, env: &HashMap<Label, Type>) -> Type {
    if let Some(boolean) = t.as_boolean() {
        let _ = boolean;
        return Type::boolean();
    }
    if t.as_integer().is_some() {
        return Type::integer();
    }
    if t.as_real().is_some() {
        return Type::real();
    }
    if let Some(label) = t.as_variable() {
        if let Some(ty) = env.get(&label) {
            return ty.clone();
        }
        return Type::error(Type::boolean(), format!("unbound free variable `{label}`"));
    }
    if let Some(entity) = t.as_object() {
        return entity.ty().clone();
    }
    if let Some((inner, msg)) = t.as_error() {
        let _ = inner;
        return Type::error(Type::boolean(), msg.to_string());
    }
    if let Some(ts) = t.as_equal() {
        return check_nary_same_type(ts, Type::boolean(), env);
    }
    if let Some(ts) = t.as_distinct() {
        return check_nary_same_type(ts, Type::boolean(), env);
    }
    if let Some((head, args)) = t.as_atom() {
        return check_atom(head, args, env);
    }
    if let Some(inner) = t.as_negation() {
        return check_all_boolean(std::slice::from_ref(inner), env);
    }
    if let Some(ts) = t.as_conjunction() {
        return check_all_boolean(ts, env);
    }
    if let Some(ts) = t.as_disjunction() {
        return check_all_boolean(ts, env);
    }
    if let Some((l, r)) = t.as_implication() {
        return check_all_boolean(&[l.clone(), r.clone()], env);
    }
    if let Some((g, then_b, else_b)) = t.as_ite() {
        return check_ite(g, then_b, else_b, env);
    }
    if let Some((decls, body)) = t.as_forall() {
        return check_quantifier(decls, body, env);
    }
    if let Some((decls, body)) = t.as_exists() {
        return check_quantifier(decls, body, env);
    }
    if let Some((decls, body)) = t.as_lambda() {
        return check_lambda(decls, body, env);
    }
    if let Some(inner) = first_temporal_unary(t) {
        return check_all_boolean(std::slice::from_ref(inner), env);
    }
    if let Some((l, r)) = first_temporal_binary(t) {
        return check_all_boolean(&[l.clone(), r.clone()], env);
    }
    if let Some(inner) = t.as_minus() {
        return check_numeric_unary(inner, env);
    }
    if let Some(ts) = t.as_sum() {
        return check_numeric_nary(ts, env);
    }
    if let Some(ts) = t.as_product() {
        return check_numeric_nary(ts, env);
    }
    if let Some((l, r)) = t.as_difference() {
        return check_numeric_binary(l, r, env);
    }
    if let Some((l, r)) = t.as_division() {
        return check_numeric_binary(l, r, env);
    }
    if let Some((l, r)) = t.as_less_than() {
        return check_relational(l, r, env);
    }
    if let Some((l, r)) = t.as_less_than_eq() {
        return check_relational(l, r, env);
    }
    if let Some((l, r)) = t.as_greater_than() {
        return check_relational(l, r, env);
    }
    if let Some((l, r)) = t.as_greater_than_eq() {
        return check_relational(l, r, env);
    }
    unreachable!("type_of: every Term variant is handled above")
}

fn first_temporal_unary(t: &Term) -> Option<&Term> {
    t.as_tomorrow()
        .or_else(|| t.as_w_tomorrow())
        .or_else(|| t.as_eventually())
        .or_else(|| t.as_always())
        .or_else(|| t.as_yesterday())
        .or_else(|| t.as_w_yesterday())
        .or_else(|| t.as_once())
        .or_else(|| t.as_historically())
}

fn first_temporal_binary(t: &Term) -> Option<(&Term, &Term)> {
    t.as_until()
        .or_else(|| t.as_release())
        .or_else(|| t.as_since())
        .or_else(|| t.as_triggered())
}

fn first_error<'a>(ts: impl IntoIterator<Item = &'a Term>, env: &HashMap<Label, Type>) -> Option<Type> {
    for t in ts {
        let ty = type_of_in(t, env);
        if ty.is_error() {
            return Some(ty);
        }
    }
    None
}

fn check_all_boolean(ts: &[Term], env: &HashMap<Label, Type>) -> Type {
    if let Some(err) = first_error(ts, env) {
        return err;
    }
    for t in ts {
        let ty = type_of_in(t, env);
        if !ty.is_boolean() {
            return Type::error(ty, "expected boolean operand");
        }
    }
    Type::boolean()
}

fn check_nary_same_type(ts: &[Term], result: Type, env: &HashMap<Label, Type>) -> Type {
    if let Some(err) = first_error(ts, env) {
        return err;
    }
    let types: Vec<Type> = ts.iter().map(|t| type_of_in(t, env)).collect();
    if let Some(first) = types.first() {
        for other in &types[1..] {
            if other != first {
                return Type::error(other.clone(), "operands must share a common type");
            }
        }
    }
    result
}

fn check_numeric_unary(t: &Term, env: &HashMap<Label, Type>) -> Type {
    let ty = type_of_in(t, env);
    if ty.is_error() {
        return ty;
    }
    if !ty.is_numeric() {
        return Type::error(ty, "expected a numeric operand");
    }
    ty
}

fn check_numeric_nary(ts: &[Term], env: &HashMap<Label, Type>) -> Type {
    if let Some(err) = first_error(ts, env) {
        return err;
    }
    let types: Vec<Type> = ts.iter().map(|t| type_of_in(t, env)).collect();
    for ty in &types {
        if !ty.is_numeric() {
            return Type::error(ty.clone(), "expected a numeric operand");
        }
    }
    match types.first() {
        Some(first) => {
            for other in &types[1..] {
                if other != first {
                    return Type::error(other.clone(), "arithmetic operands must share a numeric type");
                }
            }
            first.clone()
        }
        None => Type::integer(),
    }
}

fn check_numeric_binary(l: &Term, r: &Term, env: &HashMap<Label, Type>) -> Type {
    check_numeric_nary(&[l.clone(), r.clone()], env)
}

fn check_relational(l: &Term, r: &Term, env: &HashMap<Label, Type>) -> Type {
    let numeric = check_numeric_nary(&[l.clone(), r.clone()], env);
    if numeric.is_error() {
        return numeric;
    }
    Type::boolean()
}

fn check_atom(head: &Term, args: &[Term], env: &HashMap<Label, Type>) -> Type {
    if let Some(err) = first_error(std::iter::once(head).chain(args), env) {
        return err;
    }
    let head_ty = type_of_in(head, env);
    let (params, range) = match head_ty.as_function() {
        Some(pr) => pr,
        None => return Type::error(head_ty, "atom head must have function type"),
    };
    if params.len() != args.len() {
        return Type::error(
            range.clone(),
            format!("arity mismatch: expected {} argument(s), got {}", params.len(), args.len()),
        );
    }
    for (param_ty, arg) in params.iter().zip(args) {
        let arg_ty = type_of_in(arg, env);
        if &arg_ty != param_ty {
            return Type::error(arg_ty, "argument type does not match parameter type");
        }
    }
    range.clone()
}

fn check_ite(guard: &Term, then_branch: &Term, else_branch: &Term, env: &HashMap<Label, Type>) -> Type {
    let guard_ty = type_of_in(guard, env);
    if guard_ty.is_error() {
        return guard_ty;
    }
    if !guard_ty.is_boolean() {
        return Type::error(guard_ty, "ite guard must be boolean");
    }
    let then_ty = type_of_in(then_branch, env);
    if then_ty.is_error() {
        return then_ty;
    }
    let else_ty = type_of_in(else_branch, env);
    if else_ty.is_error() {
        return else_ty;
    }
    if then_ty != else_ty {
        return Type::error(then_ty, "ite branches must share a common type");
    }
    then_ty
}

/// Extends `env` with `decls`, shadowing any outer binding of the same name.
fn extend(env: &HashMap<Label, Type>, decls: &[Decl]) -> HashMap<Label, Type> {
    let mut extended = env.clone();
    for decl in decls {
        extended.insert(decl.name, decl.ty.clone());
    }
    extended
}

fn check_quantifier(decls: &[Decl], body: &Term, env: &HashMap<Label, Type>) -> Type {
    let inner = extend(env, decls);
    let body_ty = type_of_in(body, &inner);
    if body_ty.is_error() {
        return body_ty;
    }
    if !body_ty.is_boolean() {
        return Type::error(body_ty, "quantifier body must be boolean");
    }
    Type::boolean()
}

fn check_lambda(decls: &[Decl], body: &Term, env: &HashMap<Label, Type>) -> Type {
    let inner = extend(env, decls);
    let body_ty = type_of_in(body, &inner);
    let params: Vec<Type> = decls.iter().map(|d| d.ty.clone()).collect();
    Type::function(params, body_ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    #[test]
    fn constants_type_to_their_primitive() {
        assert_eq!(type_of(&Term::integer(1)), Type::integer());
        assert_eq!(type_of(&Term::real(1.0)), Type::real());
        assert_eq!(type_of(&Term::boolean(true)), Type::boolean());
    }

    #[test]
    fn free_variable_is_a_type_error() {
        let ty = type_of(&Term::variable("p"));
        assert!(ty.is_error());
    }

    #[test]
    fn resolved_object_types_to_its_entity_type() {
        let e = Entity::new(crate::Label::new("p"), Type::boolean());
        let t = Term::object(e);
        assert_eq!(type_of(&t), Type::boolean());
    }

    #[test]
    fn s1_conjunction_and_negation_over_resolved_booleans() {
        let p = Entity::new(crate::Label::new("p"), Type::boolean());
        let q = Entity::new(crate::Label::new("q"), Type::boolean());
        let p_t = Term::object(p);
        let q_t = Term::object(q);
        let t = Term::disjunction(vec![
            Term::conjunction(vec![p_t.clone(), q_t]),
            Term::negation(p_t),
        ]);
        assert_eq!(type_of(&t), Type::boolean());
    }

    #[test]
    fn error_propagates_through_conjunction() {
        let t = Term::conjunction(vec![Term::boolean(true), Term::variable("free")]);
        assert!(type_of(&t).is_error());
    }

    #[test]
    fn atom_checks_arity_and_parameter_types() {
        let succ = Entity::new(
            crate::Label::new("succ"),
            Type::function(vec![Type::integer()], Type::integer()),
        );
        let good = Term::atom(Term::object(succ.clone()), vec![Term::integer(3)]);
        assert_eq!(type_of(&good), Type::integer());

        let bad_arity = Term::atom(Term::object(succ.clone()), vec![]);
        assert!(type_of(&bad_arity).is_error());

        let bad_type = Term::atom(Term::object(succ), vec![Term::boolean(true)]);
        assert!(type_of(&bad_type).is_error());
    }

    #[test]
    fn lambda_types_to_a_function_type() {
        let decls = vec![Decl::new("x", Type::integer())];
        let body = Term::variable("x");
        let lam = Term::lambda(decls, body);
        let ty = type_of(&lam);
        // `x` is bound by the lambda's own `decls`, so the body types to the
        // declared parameter type, not a free-variable error.
        let (params, range) = ty.as_function().unwrap();
        assert_eq!(params, &[Type::integer()]);
        assert_eq!(range, &Type::integer());
    }

    #[test]
    fn lambda_body_sees_only_its_own_decls_not_an_outer_binder() {
        // `y` is free inside the lambda body: `decls` only binds `x`.
        let decls = vec![Decl::new("x", Type::integer())];
        let body = Term::variable("y");
        let lam = Term::lambda(decls, body);
        let ty = type_of(&lam);
        let (_, range) = ty.as_function().unwrap();
        assert!(range.is_error());
    }

    #[test]
    fn quantifier_body_resolves_its_bound_variable() {
        let decls = vec![Decl::new("x", Type::integer())];
        let body = Term::less_than(Term::variable("x"), Term::integer(10));
        let t = Term::forall(decls, body);
        assert_eq!(type_of(&t), Type::boolean());
    }

    #[test]
    fn ite_requires_boolean_guard_and_matching_branches() {
        let t = Term::ite(Term::boolean(true), Term::integer(1), Term::integer(2));
        assert_eq!(type_of(&t), Type::integer());

        let mismatched = Term::ite(Term::boolean(true), Term::integer(1), Term::boolean(false));
        assert!(type_of(&mismatched).is_error());
    }

    #[test]
    fn relational_operators_require_matching_numeric_operands() {
        let t = Term::less_than(Term::integer(1), Term::integer(2));
        assert_eq!(type_of(&t), Type::boolean());

        let bad = Term::less_than(Term::integer(1), Term::boolean(true));
        assert!(type_of(&bad).is_error());
    }
}

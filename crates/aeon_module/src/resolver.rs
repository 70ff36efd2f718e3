//! The resolver (§4.5): replaces `variable(label)` terms with `object(entity)`
//! references according to a module's current name resolution map.
//!
//! Replacement traverses bottom-up; because `Term` is hash-consed, subtrees
//! untouched by resolution are returned as the exact same canonical node
//! (structural sharing, no re-allocation). Binder terms (`forall`, `exists`,
//! `lambda`) extend the shadowing only for their own body, matching the
//! resolver's own shadow-on-binder discipline rather than the module's
//! outer-scope shadowing (§4.5 algorithm).

use im::HashMap;

use aeon_term::{Decl, Entity, Label, Term};
use std::sync::Arc;

pub type ResolutionMap = HashMap<Label, Arc<Entity>>;

/// Returns a copy of `t` with every `variable(l)` whose label resolves in
/// `scope` replaced by `object(e)`. Unresolved variables are left as-is.
/// Idempotent: re-resolving an already-resolved term is a no-op (testable
/// property 6, §8), because `object` terms are never themselves rewritten.
pub fn resolved(t: &Term, scope: &ResolutionMap) -> Term {
    if let Some(label) = t.as_variable() {
        return match scope.get(&label) {
            Some(entity) => Term::object(entity.clone()),
            None => t.clone(),
        };
    }
    if t.as_boolean().is_some() || t.as_integer().is_some() || t.as_real().is_some() || t.as_object().is_some() {
        return t.clone();
    }
    if let Some(ts) = t.as_equal() {
        return Term::equal(ts.iter().map(|x| resolved(x, scope)).collect());
    }
    if let Some(ts) = t.as_distinct() {
        return Term::distinct(ts.iter().map(|x| resolved(x, scope)).collect());
    }
    if let Some((head, args)) = t.as_atom() {
        return Term::atom(resolved(head, scope), args.iter().map(|x| resolved(x, scope)).collect());
    }
    if let Some(inner) = t.as_negation() {
        return Term::negation(resolved(inner, scope));
    }
    if let Some(ts) = t.as_conjunction() {
        return Term::conjunction(ts.iter().map(|x| resolved(x, scope)).collect());
    }
    if let Some(ts) = t.as_disjunction() {
        return Term::disjunction(ts.iter().map(|x| resolved(x, scope)).collect());
    }
    if let Some((l, r)) = t.as_implication() {
        return Term::implication(resolved(l, scope), resolved(r, scope));
    }
    if let Some((g, then_b, else_b)) = t.as_ite() {
        return Term::ite(resolved(g, scope), resolved(then_b, scope), resolved(else_b, scope));
    }
    if let Some((decls, body)) = t.as_forall() {
        return Term::forall(decls.to_vec(), resolved_under_binder(body, decls, scope));
    }
    if let Some((decls, body)) = t.as_exists() {
        return Term::exists(decls.to_vec(), resolved_under_binder(body, decls, scope));
    }
    if let Some((decls, body)) = t.as_lambda() {
        return Term::lambda(decls.to_vec(), resolved_under_binder(body, decls, scope));
    }
    if let Some(inner) = t.as_tomorrow() {
        return Term::tomorrow(resolved(inner, scope));
    }
    if let Some(inner) = t.as_w_tomorrow() {
        return Term::w_tomorrow(resolved(inner, scope));
    }
    if let Some(inner) = t.as_eventually() {
        return Term::eventually(resolved(inner, scope));
    }
    if let Some(inner) = t.as_always() {
        return Term::always(resolved(inner, scope));
    }
    if let Some((l, r)) = t.as_until() {
        return Term::until(resolved(l, scope), resolved(r, scope));
    }
    if let Some((l, r)) = t.as_release() {
        return Term::release(resolved(l, scope), resolved(r, scope));
    }
    if let Some(inner) = t.as_yesterday() {
        return Term::yesterday(resolved(inner, scope));
    }
    if let Some(inner) = t.as_w_yesterday() {
        return Term::w_yesterday(resolved(inner, scope));
    }
    if let Some(inner) = t.as_once() {
        return Term::once(resolved(inner, scope));
    }
    if let Some(inner) = t.as_historically() {
        return Term::historically(resolved(inner, scope));
    }
    if let Some((l, r)) = t.as_since() {
        return Term::since(resolved(l, scope), resolved(r, scope));
    }
    if let Some((l, r)) = t.as_triggered() {
        return Term::triggered(resolved(l, scope), resolved(r, scope));
    }
    if let Some(inner) = t.as_minus() {
        return Term::minus(resolved(inner, scope));
    }
    if let Some(ts) = t.as_sum() {
        return Term::sum(ts.iter().map(|x| resolved(x, scope)).collect());
    }
    if let Some(ts) = t.as_product() {
        return Term::product(ts.iter().map(|x| resolved(x, scope)).collect());
    }
    if let Some((l, r)) = t.as_difference() {
        return Term::difference(resolved(l, scope), resolved(r, scope));
    }
    if let Some((l, r)) = t.as_division() {
        return Term::division(resolved(l, scope), resolved(r, scope));
    }
    if let Some((l, r)) = t.as_less_than() {
        return Term::less_than(resolved(l, scope), resolved(r, scope));
    }
    if let Some((l, r)) = t.as_less_than_eq() {
        return Term::less_than_eq(resolved(l, scope), resolved(r, scope));
    }
    if let Some((l, r)) = t.as_greater_than() {
        return Term::greater_than(resolved(l, scope), resolved(r, scope));
    }
    if let Some((l, r)) = t.as_greater_than_eq() {
        return Term::greater_than_eq(resolved(l, scope), resolved(r, scope));
    }
    if let Some((inner, msg)) = t.as_error() {
        return Term::error(resolved(inner, scope), msg.to_string());
    }
    unreachable!("resolved: every Term variant is handled above")
}

fn resolved_under_binder(body: &Term, decls: &[Decl], scope: &ResolutionMap) -> Term {
    let mut shadowed = scope.clone();
    for d in decls {
        shadowed.remove(&d.name);
    }
    resolved(body, &shadowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_term::Type;

    #[test]
    fn resolves_a_declared_variable() {
        let p = Entity::new(Label::new("p"), Type::boolean());
        let mut scope = ResolutionMap::new();
        scope.insert(Label::new("p"), p.clone());
        let resolved_term = resolved(&Term::variable("p"), &scope);
        assert_eq!(resolved_term, Term::object(p));
    }

    #[test]
    fn unresolved_variable_is_left_untouched() {
        let scope = ResolutionMap::new();
        let t = Term::variable("q");
        assert_eq!(resolved(&t, &scope), t);
    }

    #[test]
    fn resolver_is_idempotent() {
        let p = Entity::new(Label::new("p"), Type::boolean());
        let mut scope = ResolutionMap::new();
        scope.insert(Label::new("p"), p);
        let t = Term::conjunction(vec![Term::variable("p"), Term::boolean(true)]);
        let once = resolved(&t, &scope);
        let twice = resolved(&once, &scope);
        assert_eq!(once, twice);
    }

    #[test]
    fn binder_shadows_outer_resolution_for_its_body() {
        let p = Entity::new(Label::new("p"), Type::integer());
        let mut scope = ResolutionMap::new();
        scope.insert(Label::new("p"), p.clone());
        let bound = Term::forall(vec![Decl::new("p", Type::boolean())], Term::variable("p"));
        let resolved_term = resolved(&bound, &scope);
        let (_, body) = resolved_term.as_forall().unwrap();
        // `p` is shadowed by the forall's own decl, so it's left unresolved.
        assert_eq!(body, &Term::variable("p"));
    }
}

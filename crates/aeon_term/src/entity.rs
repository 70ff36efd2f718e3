//! Entities: named, typed, optionally-valued module members (§3.4).
//!
//! An entity is created once its name and type are known; its value may be
//! filled in later (via [`Entity::bind`]) so that a group of mutually
//! recursive entities — a `root` in `allowed` recursion mode — can refer to
//! one another through `object` terms before any of their definitions are
//! written down. This mirrors the original implementation's tied-together
//! storage for a recursive root, realized here with `OnceLock` instead of
//! manual pointer plumbing.

use crate::ty::Type;
use crate::Term;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A named, typed, optionally-valued record (§3.4).
///
/// `value().is_none()` means the entity is a declaration; `Some(t)` means it
/// is a definition whose value type-checks to `ty`.
pub struct Entity {
    id: u64,
    name: crate::Label,
    ty: Type,
    value: OnceLock<Term>,
}

impl Entity {
    /// Creates a declaration (no value yet). Call [`Entity::bind`] to turn
    /// it into a definition, or leave it unset.
    pub fn new(name: crate::Label, ty: Type) -> Arc<Entity> {
        Arc::new(Entity {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name,
            ty,
            value: OnceLock::new(),
        })
    }

    /// Creates a definition outright.
    pub fn with_value(name: crate::Label, ty: Type, value: Term) -> Arc<Entity> {
        let entity = Entity::new(name, ty);
        entity
            .bind(value)
            .expect("freshly created entity cannot already be bound");
        entity
    }

    /// A process-wide unique id, used for identity comparisons and as the
    /// hash-cons key of `object` terms that reference this entity.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> crate::Label {
        self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn value(&self) -> Option<&Term> {
        self.value.get()
    }

    /// Binds this entity's value after construction, supporting mutually
    /// recursive roots. Fails (returning the rejected term) if already bound.
    pub fn bind(&self, value: Term) -> Result<(), Term> {
        self.value.set(value)
    }

    pub fn is_declaration(&self) -> bool {
        self.value.get().is_none()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("is_declaration", &self.is_declaration())
            .finish()
    }
}

// Entities are compared and hashed by identity, not by structure: two
// entities with the same name/type/value are still distinct declarations
// (shadowing relies on this).
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Entity {}

impl std::hash::Hash for Entity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entities_have_distinct_ids() {
        let a = Entity::new(crate::Label::new("a"), Type::boolean());
        let b = Entity::new(crate::Label::new("a"), Type::boolean());
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn declaration_has_no_value() {
        let a = Entity::new(crate::Label::new("p"), Type::boolean());
        assert!(a.is_declaration());
        assert!(a.value().is_none());
    }

    #[test]
    fn binding_turns_declaration_into_definition() {
        let a = Entity::new(crate::Label::new("p"), Type::boolean());
        let t = crate::Term::boolean(true);
        a.bind(t.clone()).unwrap();
        assert!(!a.is_declaration());
        assert_eq!(a.value(), Some(&t));
    }

    #[test]
    fn rebinding_fails_and_returns_the_rejected_term() {
        let a = Entity::new(crate::Label::new("p"), Type::boolean());
        a.bind(crate::Term::boolean(true)).unwrap();
        let rejected = a.bind(crate::Term::boolean(false));
        assert!(rejected.is_err());
    }
}

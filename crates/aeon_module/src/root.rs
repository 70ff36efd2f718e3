//! Roots (§3.5): an ordered set of entities declared/defined atomically,
//! sharing one recursion mode.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use aeon_term::Entity;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// `forbidden`: each entity's value may only refer to entities visible
/// before it in the outer module (non-recursive). `allowed`: every entity in
/// the root may refer to any other entity of the root, plus whatever is
/// visible outside it; a consumer must emit all declarations before any
/// definition (§3.5).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecursionMode {
    Forbidden,
    Allowed,
}

/// A root: an atomically-adopted group of entities (§3.5). Roots are
/// reference-counted so that `object` terms referencing their entities can
/// outlive the module that adopted them.
pub struct Root {
    id: u64,
    mode: RecursionMode,
    entities: Vec<Arc<Entity>>,
}

impl Root {
    pub fn new(mode: RecursionMode, entities: Vec<Arc<Entity>>) -> Arc<Root> {
        Arc::new(Root {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            mode,
            entities,
        })
    }

    /// A singleton root in `forbidden` mode, for `declare`/non-recursive
    /// `define`.
    pub fn singleton(mode: RecursionMode, entity: Arc<Entity>) -> Arc<Root> {
        Root::new(mode, vec![entity])
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mode(&self) -> RecursionMode {
        self.mode
    }

    pub fn entities(&self) -> &[Arc<Entity>] {
        &self.entities
    }

    pub fn find(&self, name: aeon_term::Label) -> Option<&Arc<Entity>> {
        self.entities.iter().find(|e| e.name() == name)
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("entities", &self.entities.iter().map(|e| e.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl PartialEq for Root {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Root {}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_term::Type;

    #[test]
    fn roots_are_identity_compared() {
        let e1 = Entity::new(aeon_term::Label::new("p"), Type::boolean());
        let e2 = Entity::new(aeon_term::Label::new("p"), Type::boolean());
        let r1 = Root::singleton(RecursionMode::Forbidden, e1);
        let r2 = Root::singleton(RecursionMode::Forbidden, e2);
        assert_ne!(*r1, *r2);
        assert_eq!(*r1, *r1.clone());
    }

    #[test]
    fn find_locates_entity_by_name() {
        let e = Entity::new(aeon_term::Label::new("p"), Type::boolean());
        let r = Root::singleton(RecursionMode::Forbidden, e);
        assert!(r.find(aeon_term::Label::new("p")).is_some());
        assert!(r.find(aeon_term::Label::new("q")).is_none());
    }
}

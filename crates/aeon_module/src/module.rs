//! The module (§3.6, §4.5): an ordered, scoped log of `adopt`/`state`
//! actions, with persistent-structure-backed push/pop and a name resolution
//! map built up as roots are adopted.

use std::sync::Arc;

use aeon_term::{type_of, Entity, Label, Term, Type};
use im::Vector;

use crate::consumer::Consumer;
use crate::error::{ModuleError, Result};
use crate::resolver::{self, ResolutionMap};
use crate::root::{RecursionMode, Root};

/// The kind of a top-level statement recorded by [`Module::state`] (§3.6).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StatementKind {
    Init,
    Transition,
    Final,
    Requirement,
}

/// One entry in a module's action log (§3.6): either a root adoption or a
/// top-level statement. Push/pop are *not* represented as actions; they
/// manipulate the whole `(actions, resolution)` pair as a unit (§4.5's
/// lifecycle note on persistent snapshotting).
#[derive(Clone, Debug)]
pub enum Action {
    Adopt(Arc<Root>),
    State(Term, StatementKind),
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Adopt(a), Action::Adopt(b)) => a == b,
            (Action::State(t1, k1), Action::State(t2, k2)) => t1 == t2 && k1 == k2,
            _ => false,
        }
    }
}
impl Eq for Action {}

#[derive(Clone)]
struct Snapshot {
    actions: Vector<Action>,
    resolution: ResolutionMap,
}

/// A value type with copy-on-write internals (§3.6's lifecycle): cloning a
/// `Module` is O(1) plus structural sharing, and `push`/`pop` are O(log n)
/// via [`im`]'s persistent vector and hash map.
#[derive(Clone)]
pub struct Module {
    actions: Vector<Action>,
    resolution: ResolutionMap,
    stack: Vector<Snapshot>,
}

impl Default for Module {
    fn default() -> Self {
        Module::new()
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.actions == other.actions
    }
}
impl Eq for Module {}

impl Module {
    pub fn new() -> Self {
        Module {
            actions: Vector::new(),
            resolution: ResolutionMap::new(),
            stack: Vector::new(),
        }
    }

    pub fn actions(&self) -> &Vector<Action> {
        &self.actions
    }

    pub fn resolution(&self) -> &ResolutionMap {
        &self.resolution
    }

    /// Current push depth (number of outstanding `push()`es not yet popped).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Adopts `root`: appends an `adopt` action and extends the name
    /// resolution map with each of its entities, shadowing any prior entity
    /// of the same name.
    pub fn adopt(&mut self, root: Arc<Root>) {
        for entity in root.entities() {
            self.resolution.insert(entity.name(), entity.clone());
        }
        log::debug!("adopt: root #{} ({} entities)", root.id(), root.entities().len());
        self.actions.push_back(Action::Adopt(root));
    }

    /// `declare(name, type)` (§4.5): adopts a singleton `forbidden`-mode root
    /// with a value-less entity. Re-declaring an already-used name is not an
    /// error; it shadows.
    pub fn declare(&mut self, name: impl Into<Label>, ty: Type) -> Arc<Entity> {
        let entity = Entity::new(name.into(), ty);
        self.adopt(Root::singleton(RecursionMode::Forbidden, entity.clone()));
        entity
    }

    /// `define(name, type, value, mode)` (§4.5): builds an entity bound to
    /// `value` and adopts a singleton root of the given recursion mode.
    /// Errors if `value` does not type-check to `ty`.
    pub fn define(
        &mut self,
        name: impl Into<Label>,
        ty: Type,
        value: Term,
        mode: RecursionMode,
    ) -> Result<Arc<Entity>> {
        let actual = type_of(&value);
        if actual != ty {
            return Err(ModuleError::TypeMismatch { declared: ty, actual });
        }
        let entity = Entity::with_value(name.into(), ty, value);
        self.adopt(Root::singleton(mode, entity.clone()));
        Ok(entity)
    }

    /// Declares a group of mutually-recursive entities atomically (an
    /// `allowed`-mode root with more than one member, §3.5): every entity is
    /// declared first so `build` may reference any of them (including
    /// itself) through the returned scope, then every value is bound before
    /// the root is adopted as a single action.
    pub fn define_recursive_group(
        &mut self,
        specs: Vec<(Label, Type)>,
        build: impl FnOnce(&ResolutionMap) -> Vec<Term>,
    ) -> Result<Arc<Root>> {
        let entities: Vec<Arc<Entity>> = specs
            .into_iter()
            .map(|(name, ty)| Entity::new(name, ty))
            .collect();
        let mut scope = self.resolution.clone();
        for e in &entities {
            scope.insert(e.name(), e.clone());
        }
        let values = build(&scope);
        for (entity, value) in entities.iter().zip(values) {
            let actual = type_of(&value);
            if &actual != entity.ty() {
                return Err(ModuleError::TypeMismatch {
                    declared: entity.ty().clone(),
                    actual,
                });
            }
            entity
                .bind(value)
                .expect("freshly declared entity in a recursive group cannot already be bound");
        }
        let root = Root::new(RecursionMode::Allowed, entities);
        self.adopt(root.clone());
        Ok(root)
    }

    /// `resolved(t)` (§4.5): replaces every `variable(l)` resolvable in the
    /// current scope with `object(e)`.
    pub fn resolved(&self, t: &Term) -> Term {
        resolver::resolved(t, &self.resolution)
    }

    /// `require(t)` (§4.5): type-checks `t` to boolean and records it as a
    /// `requirement` statement.
    pub fn require(&mut self, t: Term) -> Result<()> {
        let ty = type_of(&t);
        if !ty.is_boolean() {
            return Err(ModuleError::RequirementNotBoolean { actual: ty });
        }
        self.actions.push_back(Action::State(t, StatementKind::Requirement));
        Ok(())
    }

    /// Records a top-level statement of the given kind without the
    /// boolean-requirement check `require` performs (used for `init`,
    /// `transition`, and `final` facts, e.g. by the surrogate-encoder
    /// stage, which already knows its own facts type-check).
    pub fn state(&mut self, t: Term, kind: StatementKind) {
        self.actions.push_back(Action::State(t, kind));
    }

    /// `push()` (§4.5): snapshots the whole module state. O(log n) via
    /// structural sharing, not a deep copy.
    pub fn push(&mut self) {
        self.stack.push_back(Snapshot {
            actions: self.actions.clone(),
            resolution: self.resolution.clone(),
        });
        log::debug!("push: depth now {}", self.stack.len());
    }

    /// `pop(n)` (§4.5): restores the snapshot `n` levels above. Errors if
    /// `n` exceeds the current depth.
    pub fn pop(&mut self, n: usize) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        if n > self.stack.len() {
            return Err(ModuleError::PopBeyondDepth {
                requested: n,
                depth: self.stack.len(),
            });
        }
        let mut restored = None;
        for _ in 0..n {
            restored = self.stack.pop_back();
        }
        if let Some(snapshot) = restored {
            self.actions = snapshot.actions;
            self.resolution = snapshot.resolution;
        }
        log::debug!("pop({n}): depth now {}", self.stack.len());
        Ok(())
    }

    /// `replay(base, consumer)` (§4.5): emits to `consumer` the difference
    /// between `base` and `self`.
    ///
    /// This crate resolves the replay protocol's general "longest common
    /// prefix, then inverse the rest" algorithm to the common case the
    /// solver facade (§4.8) actually needs: `self` is either a pure
    /// extension of `base` (the monotonic case — every `check` just adds
    /// more actions since the last one) or `self` is `base` with its most
    /// recent `push`-delimited batch popped off (the speculative
    /// requirement case, testable property 5/S6). In the first case only
    /// new actions are emitted; in the second, a single `consumer.pop(1)`
    /// is emitted to discard the batch before replaying onward. A `base`
    /// that diverges from `self` in any other way (edited history) is
    /// outside what this crate's replay supports, since no caller in this
    /// pipeline produces that shape of divergence.
    pub fn replay<C: Consumer>(&self, base: &Module, consumer: &mut C) -> std::result::Result<(), C::Error> {
        let common = common_prefix_len(&base.actions, &self.actions);
        if common < base.actions.len() {
            consumer.pop(1)?;
        }
        for action in self.actions.iter().skip(common) {
            match action {
                Action::Adopt(root) => consumer.adopt(root.clone())?,
                Action::State(term, kind) => consumer.state(term.clone(), *kind)?,
            }
        }
        Ok(())
    }
}

fn common_prefix_len(a: &Vector<Action>, b: &Vector<Action>) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_term::Type;

    #[test]
    fn declare_then_require_resolved_variable() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let resolved = m.resolved(&Term::variable("p"));
        assert!(m.require(resolved).is_ok());
        assert_eq!(m.actions().len(), 2);
    }

    #[test]
    fn require_rejects_non_boolean() {
        let mut m = Module::new();
        let err = m.require(Term::integer(1)).unwrap_err();
        assert!(matches!(err, ModuleError::RequirementNotBoolean { .. }));
    }

    #[test]
    fn define_rejects_type_mismatch() {
        let mut m = Module::new();
        let err = m
            .define("p", Type::boolean(), Term::integer(1), RecursionMode::Forbidden)
            .unwrap_err();
        assert!(matches!(err, ModuleError::TypeMismatch { .. }));
    }

    #[test]
    fn s6_push_pop_round_trip_discards_pushed_state() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let before = m.clone();
        m.push();
        m.state(Term::boolean(false), StatementKind::Requirement);
        m.pop(1).unwrap();
        assert_eq!(m, before);
    }

    #[test]
    fn pop_beyond_depth_is_an_error() {
        let mut m = Module::new();
        let err = m.pop(1).unwrap_err();
        assert!(matches!(err, ModuleError::PopBeyondDepth { .. }));
    }

    #[test]
    fn later_adoption_shadows_earlier_one_of_the_same_name() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        m.declare("p", Type::integer());
        let resolved = m.resolved(&Term::variable("p"));
        let entity = resolved.as_object().unwrap();
        assert_eq!(entity.ty(), &Type::integer());
    }

    #[test]
    fn replay_of_a_fresh_module_against_an_empty_one_emits_every_action() {
        use crate::consumer::Consumer;

        #[derive(Default)]
        struct Recorder {
            adopts: usize,
            states: usize,
        }
        impl Consumer for Recorder {
            type Error = std::convert::Infallible;
            fn adopt(&mut self, _root: Arc<Root>) -> std::result::Result<(), Self::Error> {
                self.adopts += 1;
                Ok(())
            }
            fn state(&mut self, _term: Term, _kind: StatementKind) -> std::result::Result<(), Self::Error> {
                self.states += 1;
                Ok(())
            }
            fn push(&mut self) -> std::result::Result<(), Self::Error> {
                Ok(())
            }
            fn pop(&mut self, _n: usize) -> std::result::Result<(), Self::Error> {
                Ok(())
            }
        }

        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let resolved = m.resolved(&Term::variable("p"));
        m.require(resolved).unwrap();

        let base = Module::new();
        let mut recorder = Recorder::default();
        m.replay(&base, &mut recorder).unwrap();
        assert_eq!(recorder.adopts, 1);
        assert_eq!(recorder.states, 1);
    }
}

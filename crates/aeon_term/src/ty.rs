//! The type algebra: a small, hash-consed AST of types.
//!
//! Types are structurally compared like terms (§3.3), but the family is
//! small enough that the hash-cons pool is a simple mutex-guarded map rather
//! than anything more elaborate.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, Weak};

#[derive(Debug, Clone)]
enum TypeKind {
    Boolean,
    Integer,
    Real,
    Function(Vec<Type>, Type),
    Error(Type, String),
}

impl PartialEq for TypeKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeKind::Boolean, TypeKind::Boolean) => true,
            (TypeKind::Integer, TypeKind::Integer) => true,
            (TypeKind::Real, TypeKind::Real) => true,
            (TypeKind::Function(ps1, r1), TypeKind::Function(ps2, r2)) => ps1 == ps2 && r1 == r2,
            (TypeKind::Error(t1, m1), TypeKind::Error(t2, m2)) => t1 == t2 && m1 == m2,
            _ => false,
        }
    }
}
impl Eq for TypeKind {}

impl Hash for TypeKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            TypeKind::Boolean | TypeKind::Integer | TypeKind::Real => {}
            TypeKind::Function(ps, r) => {
                ps.hash(state);
                r.hash(state);
            }
            TypeKind::Error(t, m) => {
                t.hash(state);
                m.hash(state);
            }
        }
    }
}

struct TypeNode {
    kind: TypeKind,
}

/// A canonical, hash-consed type handle.
///
/// Equality and hashing are by canonical pointer identity, exactly like
/// [`crate::Term`]; see that type's documentation for the rationale.
#[derive(Clone)]
pub struct Type(Arc<TypeNode>);

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            TypeKind::Boolean => write!(f, "boolean"),
            TypeKind::Integer => write!(f, "integer"),
            TypeKind::Real => write!(f, "real"),
            TypeKind::Function(params, range) => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") -> {range}")
            }
            TypeKind::Error(inner, msg) => write!(f, "error({inner}, {msg:?})"),
        }
    }
}

static POOL: once_cell::sync::Lazy<Mutex<std::collections::HashMap<TypeKindKey, Weak<TypeNode>>>> =
    once_cell::sync::Lazy::new(|| Mutex::new(std::collections::HashMap::new()));

// Wrapper so we can hash/eq by TypeKind contents while storing Weak<TypeNode>
// as the map value (TypeKind itself isn't the map's value type).
#[derive(PartialEq, Eq, Hash)]
struct TypeKindKey(TypeKind);

fn mk(kind: TypeKind) -> Type {
    let key = TypeKindKey(kind);
    let mut pool = POOL.lock().unwrap();
    if let Some(weak) = pool.get(&key) {
        if let Some(arc) = weak.upgrade() {
            return Type(arc);
        }
    }
    let arc = Arc::new(TypeNode {
        kind: key.0.clone(),
    });
    pool.insert(key, Arc::downgrade(&arc));
    Type(arc)
}

impl Type {
    pub fn boolean() -> Type {
        mk(TypeKind::Boolean)
    }
    pub fn integer() -> Type {
        mk(TypeKind::Integer)
    }
    pub fn real() -> Type {
        mk(TypeKind::Real)
    }
    pub fn function(params: Vec<Type>, range: Type) -> Type {
        mk(TypeKind::Function(params, range))
    }
    pub fn error(inner: Type, message: impl Into<String>) -> Type {
        mk(TypeKind::Error(inner, message.into()))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.0.kind, TypeKind::Boolean)
    }
    pub fn is_numeric(&self) -> bool {
        matches!(self.0.kind, TypeKind::Integer | TypeKind::Real)
    }
    pub fn is_error(&self) -> bool {
        matches!(self.0.kind, TypeKind::Error(..))
    }

    /// Returns the `(params, range)` pair if this is a function type.
    pub fn as_function(&self) -> Option<(&[Type], &Type)> {
        match &self.0.kind {
            TypeKind::Function(params, range) => Some((params.as_slice(), range)),
            _ => None,
        }
    }

    /// Returns the `(inner, message)` pair if this is an error type.
    pub fn as_error(&self) -> Option<(&Type, &str)> {
        match &self.0.kind {
            TypeKind::Error(inner, msg) => Some((inner, msg.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_types_are_canonical() {
        assert_eq!(Type::boolean(), Type::boolean());
        assert_eq!(Type::integer(), Type::integer());
        assert_ne!(Type::integer(), Type::real());
    }

    #[test]
    fn function_types_compare_structurally_through_canonicalization() {
        let f1 = Type::function(vec![Type::integer()], Type::boolean());
        let f2 = Type::function(vec![Type::integer()], Type::boolean());
        assert_eq!(f1, f2);

        let f3 = Type::function(vec![Type::real()], Type::boolean());
        assert_ne!(f1, f3);
    }

    #[test]
    fn error_type_carries_message() {
        let e = Type::error(Type::integer(), "bad thing");
        let (inner, msg) = e.as_error().unwrap();
        assert_eq!(inner, &Type::integer());
        assert_eq!(msg, "bad thing");
    }

    #[test]
    fn display_renders_function_arrow() {
        let f = Type::function(vec![Type::integer(), Type::integer()], Type::boolean());
        assert_eq!(f.to_string(), "(integer, integer) -> boolean");
    }
}

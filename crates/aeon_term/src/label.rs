//! Labels: hashable, stringifiable names used throughout the term algebra.
//!
//! A [`Label`] wraps an interned string, a plain integer, or a synthetic
//! identifier minted by the implementation itself (used by the resolver and
//! by pipeline stages that must introduce fresh names deterministically).
//! Two labels compare equal iff their payloads do, and comparison is O(1)
//! regardless of the underlying string length.

use std::fmt;

/// A lightweight handle to an interned string.
///
/// `Symbol`s are `Copy` and compare in O(1) time via integer equality.
/// Use [`Interner::resolve`] to retrieve the original string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A string interner providing O(1) equality comparison via [`Symbol`] handles.
#[derive(Default)]
pub struct Interner {
    map: std::collections::HashMap<String, Symbol>,
    vec: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a string, returning its symbol. Interning the same string
    /// twice returns the same symbol.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let sym = Symbol(self.vec.len() as u32);
        self.vec.push(s.to_string());
        self.map.insert(s.to_string(), sym);
        sym
    }

    /// Returns the string for the given symbol.
    ///
    /// # Panics
    /// Panics if `sym` was not produced by this interner.
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.vec[sym.index()]
    }

    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}

/// A name used to identify a variable, declaration, or entity.
///
/// `Label` is a closed, value-typed sum: an interned string (the common
/// case), a bare integer (convenient for positional or generated names that
/// never need to round-trip through text), or a `Fresh` identifier minted by
/// [`fresh`] for deterministic gensym-style names (used by the surrogate
/// encoder and the resolver's binder handling).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Label {
    Name(Symbol),
    Index(i64),
    Fresh(u64),
}

impl Label {
    /// Interns `s` in the global label table and wraps it as a `Label::Name`.
    pub fn new(s: &str) -> Self {
        Label::Name(intern(s))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Name(sym) => f.write_str(resolve(*sym)),
            Label::Index(i) => write!(f, "#{i}"),
            Label::Fresh(id) => write!(f, "%{id}"),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::new(s)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::new(&s)
    }
}

static INTERNER: once_cell::sync::Lazy<std::sync::Mutex<Interner>> =
    once_cell::sync::Lazy::new(|| std::sync::Mutex::new(Interner::new()));

static FRESH_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Interns `s` in the process-wide label table.
pub fn intern(s: &str) -> Symbol {
    INTERNER.lock().unwrap().intern(s)
}

/// Resolves a symbol back to its string contents.
///
/// The returned string is a fresh `String` (not a borrow) because the
/// process-wide interner is mutex-guarded and cannot hand out a borrow that
/// outlives the lock.
pub fn resolve(sym: Symbol) -> String {
    INTERNER.lock().unwrap().resolve(sym).to_string()
}

/// Mints a fresh label guaranteed distinct from every other label minted by
/// this process, in a deterministic, monotonically increasing sequence.
/// Deterministic in the sense required of pipeline stages (§4.7): calling it
/// `N` times in a row from a fresh process always yields the same sequence.
pub fn fresh() -> Label {
    Label::Fresh(FRESH_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_same_symbol_for_same_string() {
        let mut interner = Interner::new();
        let a = interner.intern("p");
        let b = interner.intern("p");
        assert_eq!(a, b);
    }

    #[test]
    fn intern_returns_different_symbols_for_different_strings() {
        let mut interner = Interner::new();
        let a = interner.intern("p");
        let b = interner.intern("q");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let mut interner = Interner::new();
        let sym = interner.intern("variable-name");
        assert_eq!(interner.resolve(sym), "variable-name");
    }

    #[test]
    fn label_name_equality_follows_string_equality() {
        let l1 = Label::new("x");
        let l2 = Label::new("x");
        let l3 = Label::new("y");
        assert_eq!(l1, l2);
        assert_ne!(l1, l3);
    }

    #[test]
    fn label_display_renders_underlying_string() {
        let l = Label::new("hello");
        assert_eq!(l.to_string(), "hello");
    }

    #[test]
    fn fresh_labels_are_pairwise_distinct() {
        let a = fresh();
        let b = fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn index_label_displays_with_hash_prefix() {
        let l = Label::Index(3);
        assert_eq!(l.to_string(), "#3");
    }
}

//! A textual SMT-LIB2 printer consumer (§6, §10.6: "useful for debugging and
//! golden-file tests without requiring a live Z3 process").
//!
//! [`SmtLibPrinter`] is a leaf, not a wrapper: it doesn't forward to a
//! downstream `Consumer`, it renders every call it receives into an internal
//! text buffer. Entities get `declare-fun` (or, for an `Allowed`-mode root,
//! `define-funs-rec`/`define-fun-rec`, mirroring how the corresponding Z3
//! backend must introduce a group of mutually recursive definitions
//! atomically); `state` calls become `assert`, each commented with which
//! statement kind (init/transition/final/requirement) it came from since
//! plain SMT-LIB2 has no native notion of a trace.

use std::convert::Infallible;
use std::fmt::Write as _;
use std::sync::Arc;

use aeon_module::module::StatementKind;
use aeon_module::{Consumer, RecursionMode, Root};
use aeon_term::{Term, Type};

/// Accumulates `adopt`/`state`/`push`/`pop` calls as SMT-LIB2 source text.
#[derive(Default)]
pub struct SmtLibPrinter {
    buffer: String,
}

impl SmtLibPrinter {
    pub fn new() -> Self {
        SmtLibPrinter { buffer: String::new() }
    }

    /// Consumes the printer, returning the rendered script.
    pub fn into_script(self) -> String {
        self.buffer
    }

    pub fn script(&self) -> &str {
        &self.buffer
    }
}

impl Consumer for SmtLibPrinter {
    type Error = Infallible;

    fn adopt(&mut self, root: Arc<Root>) -> Result<(), Self::Error> {
        match root.mode() {
            RecursionMode::Forbidden => {
                for entity in root.entities() {
                    let _ = writeln!(self.buffer, "(declare-fun {} {})", entity.name(), sort_signature(entity.ty()));
                    if let Some(value) = entity.value() {
                        let _ = writeln!(self.buffer, "(assert (= {} {}))", entity.name(), render(value));
                    }
                }
            }
            RecursionMode::Allowed => {
                let _ = writeln!(self.buffer, "(define-funs-rec");
                let _ = writeln!(self.buffer, "  (");
                for entity in root.entities() {
                    let _ = writeln!(self.buffer, "    ({} {})", entity.name(), sort_signature(entity.ty()));
                }
                let _ = writeln!(self.buffer, "  )");
                let _ = writeln!(self.buffer, "  (");
                for entity in root.entities() {
                    let body = entity
                        .value()
                        .map(render)
                        .unwrap_or_else(|| "true".to_string());
                    let _ = writeln!(self.buffer, "    {body}");
                }
                let _ = writeln!(self.buffer, "  )");
                let _ = writeln!(self.buffer, ")");
            }
        }
        Ok(())
    }

    fn state(&mut self, term: Term, kind: StatementKind) -> Result<(), Self::Error> {
        let tag = match kind {
            StatementKind::Init => "init",
            StatementKind::Transition => "transition",
            StatementKind::Final => "final",
            StatementKind::Requirement => "requirement",
        };
        log::trace!("smtlib: rendering {tag} assertion");
        let _ = writeln!(self.buffer, "(assert {}) ; {tag}", render(&term));
        Ok(())
    }

    fn push(&mut self) -> Result<(), Self::Error> {
        let _ = writeln!(self.buffer, "(push 1)");
        Ok(())
    }

    fn pop(&mut self, n: usize) -> Result<(), Self::Error> {
        let _ = writeln!(self.buffer, "(pop {n})");
        Ok(())
    }
}

/// The SMT-LIB2 sort name for a primitive (non-function) [`Type`].
fn sort_name(ty: &Type) -> &'static str {
    if ty.is_boolean() {
        "Bool"
    } else if ty.as_function().is_some() {
        // Only ever called on a function type's own params/range, which are
        // themselves primitive per this algebra's (non-higher-order) design.
        "Bool"
    } else {
        match ty.to_string().as_str() {
            "real" => "Real",
            _ => "Int",
        }
    }
}

/// The `declare-fun`/`define-fun-rec` signature for an entity's type: its
/// parameter sorts (empty for a constant) followed by its range sort.
fn sort_signature(ty: &Type) -> String {
    if let Some((params, range)) = ty.as_function() {
        let params_rendered: Vec<&str> = params.iter().map(sort_name).collect();
        format!("({}) {}", params_rendered.join(" "), sort_name(range))
    } else {
        format!("() {}", sort_name(ty))
    }
}

fn render(t: &Term) -> String {
    t.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeon_module::{Module, RecursionMode};
    use aeon_term::{Entity, Term, Type};

    #[test]
    fn boolean_requirement_renders_as_an_assert() {
        let mut m = Module::new();
        m.declare("p", Type::boolean());
        let p = m.resolved(&Term::variable("p"));
        m.require(p).unwrap();

        let mut printer = SmtLibPrinter::new();
        m.replay(&Module::new(), &mut printer).unwrap();
        let script = printer.into_script();
        assert!(script.contains("(declare-fun p () Bool)"));
        assert!(script.contains("(assert p) ; requirement"));
    }

    #[test]
    fn recursive_root_renders_as_define_funs_rec() {
        let entity = Entity::new("even".into(), Type::function(vec![Type::integer()], Type::boolean()));
        let root = Root::singleton(RecursionMode::Allowed, entity);

        let mut printer = SmtLibPrinter::new();
        printer.adopt(root).unwrap();
        let script = printer.into_script();
        assert!(script.contains("(define-funs-rec"));
    }

    #[test]
    fn push_and_pop_render_as_smtlib_stack_commands() {
        let mut printer = SmtLibPrinter::new();
        printer.push().unwrap();
        printer.pop(1).unwrap();
        let script = printer.into_script();
        assert!(script.contains("(push 1)"));
        assert!(script.contains("(pop 1)"));
    }
}

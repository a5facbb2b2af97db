//! The error taxonomy of spec.md §7: `Syntax` is the user-facing diagnostic
//! returned from scanner/structural/parse/definition failures; `Bug` is for
//! internal invariant violations, which are always fatal and never flow
//! through a `Result`.
//!
//! Grounded in the teacher's `compiler/syntax.rs`, completed here: that
//! snapshot declares a `Syntax { reason, notes }` struct but its `Display`
//! impl references fields (`self.span`, `self.message`) that don't exist on
//! it — a leftover from an earlier shape, mid-refactor. This `Syntax` keeps
//! the `reason`/`notes` shape and gives it a `Display` impl that matches.

use std::fmt;

use crate::common::span::Span;

/// A user-facing static error: syntax, structural, parse, or definition
/// (spec.md §7's first four kinds). Carries a primary span and message, plus
/// any number of secondary notes pointing at related spans.
#[derive(Debug, PartialEq, Eq)]
pub struct Syntax {
    pub reason: String,
    pub span: Span,
    pub notes: Vec<(Span, String)>,
}

impl Syntax {
    pub fn error(reason: &str, span: &Span) -> Syntax {
        Syntax { reason: reason.to_string(), span: span.clone(), notes: vec![] }
    }

    pub fn with_note(mut self, span: &Span, note: &str) -> Syntax {
        self.notes.push((span.clone(), note.to_string()));
        self
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.span.is_empty() {
            write!(f, "{}", self.span)?;
        }
        writeln!(f, "error: {}", self.reason)?;
        for (span, note) in &self.notes {
            if !span.is_empty() {
                write!(f, "{}", span)?;
            }
            writeln!(f, "note: {}", note)?;
        }
        Ok(())
    }
}

impl std::error::Error for Syntax {}

/// An internal invariant violation (spec.md §7, "Internal errors"). Never
/// returned from a fallible API — constructing one and not immediately
/// panicking with it is itself a bug.
#[derive(Debug)]
pub struct Bug(pub String);

impl Bug {
    pub fn at(where_: &str) -> Bug {
        Bug(format!("internal invariant violated at {where_}"))
    }
}

impl fmt::Display for Bug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "internal error (this is a bug): {}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::source::Source;

    #[test]
    fn error_renders_span_then_message() {
        let source = Source::source("x = \"Hello, world\" -> y + 1");
        let error = Syntax::error(
            "unexpected token '\"Hello, world!\"'",
            &Span::new(&source, 4, 14),
        );
        let rendered = format!("{}", error);
        assert!(rendered.contains("error: unexpected token"));
        assert!(rendered.contains("x = \"Hello, world\" -> y + 1"));
    }
}

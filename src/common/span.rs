use std::fmt::{Display, Formatter, Result};
use std::rc::Rc;

use crate::common::source::Source;
use crate::error::Bug;

/// A `Span` refers to a section of a `Source`, much like a `&str` but
/// carrying a reference to where it came from rather than owning bytes.
/// Spans are paired with other datastructures for error reporting.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Span {
    source: Option<Rc<Source>>,
    offset: usize,
    length: usize,
}

impl Span {
    /// Creates a new `Span` from an offset and a length.
    pub fn new(source: &Rc<Source>, offset: usize, length: usize) -> Span {
        Span { source: Some(Rc::clone(source)), offset, length }
    }

    /// A `Span` that points at a single point in the source.
    pub fn point(source: &Rc<Source>, offset: usize) -> Span {
        Span { source: Some(Rc::clone(source)), offset, length: 1 }
    }

    /// Creates an empty `Span`. Combining an empty span with any other
    /// span just yields the other span.
    pub fn empty() -> Span {
        Span { source: None, offset: 0, length: usize::MAX }
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_none()
    }

    /// Creates a `Span` covering the union of two spans.
    /// ```plain
    /// hello this is cool
    /// ^^^^^              | Span a
    ///            ^^      | Span b
    /// ^^^^^^^^^^^^^       | combined
    /// ```
    pub fn combine(a: &Span, b: &Span) -> Span {
        if a.is_empty() { return b.clone(); }
        if b.is_empty() { return a.clone(); }

        if a.source != b.source {
            panic!("{}", Bug::at("Span::combine: spans from separate sources"));
        }

        let offset = a.offset.min(b.offset);
        let end = (a.offset + a.length).max(b.offset + b.length);
        Span::new(a.source.as_ref().unwrap(), offset, end - offset)
    }

    /// Folds `Span::combine` over a set of spans.
    pub fn join(mut spans: Vec<Span>) -> Span {
        let mut combined = match spans.pop() {
            Some(span) => span,
            None => return Span::empty(),
        };

        while let Some(span) = spans.pop() {
            combined = Span::combine(&combined, &span);
        }

        combined
    }

    /// Returns the literal source text covered by this span.
    pub fn contents(&self) -> String {
        if self.is_empty() { panic!("{}", Bug::at("Span::contents: an empty span has no contents")) }
        let source = self.source.as_ref().unwrap();
        source.contents[self.offset..(self.offset + self.length)].to_string()
    }

    pub fn offset(&self) -> usize { self.offset }
    pub fn length(&self) -> usize { self.length }

    /// Returns ((start_line, start_col), (end_line, end_col)), 0-indexed.
    fn line_indices(&self) -> Option<((usize, usize), (usize, usize))> {
        if self.is_empty() { panic!("{}", Bug::at("Span::line_indices: an empty span has no location")) }

        let contents = &self.source.as_ref().unwrap().contents;
        let last = contents.len().saturating_sub(1);
        let start = self.offset.min(last);
        let end = (self.offset + self.length).saturating_sub(1).max(start).min(last);

        let start_lines: Vec<&str> = contents[..=start].lines().collect();
        let end_lines: Vec<&str> = contents[..=end].lines().collect();

        let start_line = start_lines.len().saturating_sub(1);
        let end_line = end_lines.len().saturating_sub(1);

        let start_col = start_lines.last()?.len().saturating_sub(1);
        let end_col = end_lines.last()?.len().saturating_sub(1);

        Some(((start_line, start_col), (end_line, end_col)))
    }

    /// `(path, line, col)` of the start of this span, 1-indexed, for
    /// `file:line:col` diagnostic headers.
    pub fn location(&self) -> (&std::path::Path, usize, usize) {
        let ((start_line, start_col), _) = self.line_indices().unwrap_or(((0, 0), (0, 0)));
        let source = self.source.as_ref().unwrap();
        (&source.path, start_line + 1, start_col + 1)
    }
}

impl Display for Span {
    /// Renders a caret-annotated excerpt of the source this span covers.
    /// Single-line spans:
    /// ```plain
    /// 12 | x = blatant { error }
    ///    |     ^^^^^^^^^^^^^^^^
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.is_empty() {
            panic!("{}", Bug::at("Span::fmt: can't display an empty span"));
        }

        let source = self.source.as_ref().unwrap();
        let lines: Vec<&str> = source.contents.lines().collect();
        let ((start_line, start_col), (end_line, _)) = self.line_indices().unwrap();

        let readable_end_line = (end_line + 1).to_string();
        let padding = readable_end_line.len();
        let separator = format!("{} |", " ".repeat(padding));

        writeln!(f, "{}:{}:{}", source.path.display(), start_line + 1, start_col + 1)?;
        writeln!(f, "{}", separator)?;

        if start_line == end_line {
            let line = lines.get(end_line).copied().unwrap_or("");
            writeln!(f, "{} | {}", readable_end_line, line)?;
            writeln!(
                f,
                "{} | {}{}",
                " ".repeat(padding),
                " ".repeat(start_col),
                "^".repeat(self.length.max(1)),
            )
        } else {
            let last = lines.len().saturating_sub(1);
            for (i, line) in lines[start_line..=end_line.min(last)].iter().enumerate() {
                let readable = (start_line + i + 1).to_string();
                writeln!(f, "{}{} | {}", " ".repeat(padding - readable.len()), readable, line)?;
            }
            writeln!(f, "{}", separator)
        }
    }
}

/// Pairs a value with the `Span` it was parsed from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Spanned<T> {
    pub item: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(item: T, span: Span) -> Spanned<T> {
        Spanned { item, span }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned::new(f(self.item), self.span)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn combination() {
        let source = Source::source("heck, that's awesome");
        let a = Span::new(&source, 0, 5);
        let b = Span::new(&source, 11, 2);
        assert_eq!(Span::combine(&a, &b), Span::new(&source, 0, 13));
    }

    #[test]
    fn span_and_contents() {
        let source = Source::source("hello, this is some text!");
        let spans = vec![
            Span::new(&source, 0, 8),
            Span::new(&source, 7, 5),
            Span::new(&source, 12, 4),
        ];
        let result = Span::new(&source, 0, 16);
        assert_eq!(Span::join(spans).contents(), result.contents());
    }

    #[test]
    fn empty_combine_is_identity() {
        let source = Source::source("hi");
        let a = Span::new(&source, 0, 2);
        assert_eq!(Span::combine(&Span::empty(), &a), a);
        assert_eq!(Span::combine(&a, &Span::empty()), a);
    }
}

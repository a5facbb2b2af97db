//! Patterns and their source-text compiler (spec.md §4.4).
//!
//! The pattern source language — identifiers, colons, back-tick-prefixed
//! lexemes, `->`, parens, `|` for sums and `,` for products (spec.md §3,
//! §6) — is compiled here by a small hand-written reader over the pattern
//! text directly, in the spirit of `original_source/src/lang/pattern.c`'s
//! `Pattern_from` (which re-lexes the pattern string rather than
//! bootstrapping a full `Lang`). This reader is local to pattern
//! compilation; it is not the crate's scanner, which spec.md §1 explicitly
//! keeps out of scope.

use crate::common::span::Span;
use crate::common::word::{Interner, Word};
use crate::error::Syntax;
use crate::rule::atom::MatchAtom;
use crate::types::{Type, TypeExpr, TypeGraph};

/// Links pattern slot indices (and optionally the return slot) that must
/// share a resolved type (spec.md §4.4, §GLOSSARY).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    pub slots: Vec<usize>,
    pub binds_return: bool,
}

/// A finite sequence of `MatchAtom`s plus a `returns` type expression and
/// any where-clauses linking positional slots (spec.md §3).
#[derive(Debug, Clone)]
pub struct Pattern<'a> {
    pub atoms: Vec<MatchAtom<'a>>,
    pub returns: TypeExpr,
    pub where_clauses: Vec<WhereClause>,
}

impl<'a> Pattern<'a> {
    /// Renders the pattern back to source-template form — e.g.
    /// `` a: Int `+ b: Int -> Int `` — used both for diagnostics and for
    /// spec.md §8 property 6 (round-trip).
    pub fn to_source(&self, types: &TypeGraph<'a>) -> String {
        let mut out = String::new();
        let mut slot_no = 0usize;
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 { out.push(' '); }
            match atom {
                MatchAtom::Lexeme(w) => {
                    out.push('`');
                    out.push_str(w.as_str());
                }
                MatchAtom::Expr { type_expr, optional, repeating } => {
                    slot_no += 1;
                    out.push_str(&format!("s{slot_no}: "));
                    out.push_str(&type_expr_to_source(type_expr, types));
                    if *optional { out.push('?'); }
                    if *repeating { out.push('*'); }
                }
            }
        }
        out.push_str(" -> ");
        out.push_str(&type_expr_to_source(&self.returns, types));
        out
    }
}

fn type_expr_to_source(te: &TypeExpr, types: &TypeGraph) -> String {
    match te {
        TypeExpr::Atom(t) => types.name(*t).to_string(),
        TypeExpr::Sum(xs) => {
            xs.iter().map(|x| type_expr_to_source(x, types)).collect::<Vec<_>>().join(" | ")
        }
        TypeExpr::Product(xs) => {
            xs.iter().map(|x| type_expr_to_source(x, types)).collect::<Vec<_>>().join(" , ")
        }
    }
}

// --- tokenizer for pattern template text -----------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok<'a> {
    Ident(&'a str),
    Backtick(&'a str),
    Colon,
    Arrow,
    Pipe,
    Comma,
    Question,
    Star,
    LParen,
    RParen,
    End,
}

fn tokenize(src: &str) -> Result<Vec<Tok<'_>>, String> {
    let bytes = src.as_bytes();
    let mut i = 0;
    let mut toks = Vec::new();

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_whitespace() { i += 1; continue; }

        match c {
            ':' => { toks.push(Tok::Colon); i += 1; }
            '|' => { toks.push(Tok::Pipe); i += 1; }
            ',' => { toks.push(Tok::Comma); i += 1; }
            '?' => { toks.push(Tok::Question); i += 1; }
            '*' => { toks.push(Tok::Star); i += 1; }
            '(' => { toks.push(Tok::LParen); i += 1; }
            ')' => { toks.push(Tok::RParen); i += 1; }
            '-' if bytes.get(i + 1) == Some(&b'>') => { toks.push(Tok::Arrow); i += 2; }
            '`' => {
                let start = i + 1;
                let mut j = start;
                while j < bytes.len() && !(bytes[j] as char).is_whitespace() { j += 1; }
                if j == start { return Err("bare lexeme escape '`' with nothing following".to_string()); }
                toks.push(Tok::Backtick(&src[start..j]));
                i = j;
            }
            c if c.is_alphanumeric() || c == '_' => {
                let start = i;
                let mut j = i;
                while j < bytes.len() && {
                    let ch = bytes[j] as char;
                    ch.is_alphanumeric() || ch == '_'
                } { j += 1; }
                toks.push(Tok::Ident(&src[start..j]));
                i = j;
            }
            other => return Err(format!("unknown symbol '{other}' in pattern")),
        }
    }

    toks.push(Tok::End);
    Ok(toks)
}

struct Reader<'a> {
    toks: Vec<Tok<'a>>,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn peek(&self) -> &Tok<'a> { &self.toks[self.pos] }

    fn advance(&mut self) -> Tok<'a> {
        let t = self.toks[self.pos].clone();
        if self.pos + 1 < self.toks.len() { self.pos += 1; }
        t
    }
}

/// A leaf type annotation: either a concrete type already defined in the
/// graph, or an as-yet-unbound pattern variable name.
enum Leaf {
    Concrete(Type),
    Variable(String),
}

fn resolve_ident(name: &str, types: &TypeGraph) -> Leaf {
    match types.by_name(name) {
        Some(t) => Leaf::Concrete(t),
        None => Leaf::Variable(name.to_string()),
    }
}

/// If the next token is a bare identifier *not* followed by `|` or `,` (i.e.
/// it isn't part of a larger sum/product), consumes it and resolves it.
/// Otherwise leaves the reader untouched and returns `None`, so the caller
/// can fall back to the full `parse_type_expr`.
///
/// This crate only supports a type *variable* standing for an entire slot's
/// or the return's annotation, not nested inside a compound expression —
/// every leaf of a `|`/`,` expression must already be a concrete type (see
/// DESIGN.md).
fn try_bare_variable(reader: &mut Reader, types: &TypeGraph) -> Option<Leaf> {
    let name = match reader.peek() {
        Tok::Ident(n) => *n,
        _ => return None,
    };
    let save = reader.pos;
    reader.advance();
    match reader.peek() {
        Tok::Pipe | Tok::Comma => {
            reader.pos = save;
            None
        }
        _ => Some(resolve_ident(name, types)),
    }
}

fn parse_type_expr(reader: &mut Reader, types: &TypeGraph, span: &Span) -> Result<TypeExpr, Syntax> {
    parse_sum(reader, types, span)
}

fn parse_sum(reader: &mut Reader, types: &TypeGraph, span: &Span) -> Result<TypeExpr, Syntax> {
    let mut parts = vec![parse_product(reader, types, span)?];
    while matches!(reader.peek(), Tok::Pipe) {
        reader.advance();
        parts.push(parse_product(reader, types, span)?);
    }
    Ok(if parts.len() == 1 { parts.pop().unwrap() } else { TypeExpr::Sum(parts) })
}

fn parse_product(reader: &mut Reader, types: &TypeGraph, span: &Span) -> Result<TypeExpr, Syntax> {
    let mut parts = vec![parse_concrete_atom(reader, types, span)?];
    while matches!(reader.peek(), Tok::Comma) {
        reader.advance();
        parts.push(parse_concrete_atom(reader, types, span)?);
    }
    Ok(if parts.len() == 1 { parts.pop().unwrap() } else { TypeExpr::Product(parts) })
}

fn parse_concrete_atom(reader: &mut Reader, types: &TypeGraph, span: &Span) -> Result<TypeExpr, Syntax> {
    match reader.advance() {
        Tok::Ident(name) => match resolve_ident(name, types) {
            Leaf::Concrete(t) => Ok(TypeExpr::Atom(t)),
            Leaf::Variable(v) => Err(Syntax::error(
                &format!(
                    "unknown type '{v}' (pattern variables may only stand for a whole slot's or the return's annotation, not appear inside a compound type expression)"
                ),
                span,
            )),
        },
        Tok::LParen => {
            let inner = parse_type_expr(reader, types, span)?;
            match reader.advance() {
                Tok::RParen => Ok(inner),
                _ => Err(Syntax::error("expected ')' to close type expression group", span)),
            }
        }
        _ => Err(Syntax::error("expected a type name or '(' in type expression", span)),
    }
}

/// Compiles pattern template text into a `Pattern`.
pub fn compile_pattern<'a>(
    text: &str,
    interner: &'a Interner<'a>,
    types: &TypeGraph<'a>,
    any: Type,
    span: &Span,
) -> Result<Pattern<'a>, Syntax> {
    let toks = tokenize(text).map_err(|e| Syntax::error(&e, span))?;
    let mut reader = Reader { toks, pos: 0 };

    let mut atoms: Vec<MatchAtom<'a>> = Vec::new();
    // variable name -> slot indices that used it bare
    let mut variables: Vec<(String, Vec<usize>)> = Vec::new();

    loop {
        match reader.peek().clone() {
            Tok::Backtick(lxm) => {
                reader.advance();
                atoms.push(MatchAtom::Lexeme(interner.intern(lxm)));
            }
            Tok::Ident(_) => {
                reader.advance(); // slot name, unused beyond diagnostics
                match reader.advance() {
                    Tok::Colon => {}
                    _ => return Err(Syntax::error("expected ':' after slot name", span)),
                }

                let slot_index = atoms.len();
                let type_expr = match try_bare_variable(&mut reader, types) {
                    Some(Leaf::Concrete(t)) => TypeExpr::Atom(t),
                    Some(Leaf::Variable(var)) => {
                        match variables.iter_mut().find(|(n, _)| *n == var) {
                            Some((_, slots)) => slots.push(slot_index),
                            None => variables.push((var, vec![slot_index])),
                        }
                        TypeExpr::Atom(any)
                    }
                    None => parse_type_expr(&mut reader, types, span)?,
                };

                let mut optional = false;
                let mut repeating = false;
                match reader.peek() {
                    Tok::Question => { optional = true; reader.advance(); }
                    Tok::Star => { repeating = true; reader.advance(); }
                    _ => {}
                }

                atoms.push(MatchAtom::Expr { type_expr, optional, repeating });
            }
            Tok::Arrow | Tok::End => break,
            _ => return Err(Syntax::error("expected a lexeme or a slot in pattern", span)),
        }
    }

    match reader.advance() {
        Tok::Arrow => {}
        _ => return Err(Syntax::error("pattern must end with '-> <type>'", span)),
    }

    let mut binds_return_var: Option<String> = None;
    let returns = match try_bare_variable(&mut reader, types) {
        Some(Leaf::Concrete(t)) => TypeExpr::Atom(t),
        Some(Leaf::Variable(var)) => {
            binds_return_var = Some(var);
            TypeExpr::Atom(any)
        }
        None => parse_type_expr(&mut reader, types, span)?,
    };

    if !matches!(reader.peek(), Tok::End) {
        return Err(Syntax::error("unexpected trailing tokens in pattern", span));
    }

    let mut where_clauses = Vec::new();
    for (name, slots) in variables {
        let binds_return = binds_return_var.as_deref() == Some(name.as_str());
        if slots.len() < 2 && !binds_return {
            return Err(Syntax::error(
                &format!("pattern variable '{name}' is only used once; it constrains nothing"),
                span,
            ));
        }
        where_clauses.push(WhereClause { slots, binds_return });
    }

    if let Some(var) = &binds_return_var {
        if !where_clauses.iter().any(|w| w.binds_return) {
            return Err(Syntax::error(
                &format!("return type '{var}' does not match any pattern slot's type variable"),
                span,
            ));
        }
    }

    Ok(Pattern { atoms, returns, where_clauses })
}

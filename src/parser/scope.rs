//! Parser stage 1 and 2 (spec.md §4.5): split the token stream into a tree
//! of nested scopes on `{`/`}`, then classify every remaining leaf as a
//! lexeme, identifier, or literal. The two stages are fused into a single
//! left-to-right pass here (rather than two full traversals) since stage 2
//! only ever needs the scope a leaf already landed in.

use std::rc::Rc;

use crate::common::source::Source;
use crate::common::span::Span;
use crate::common::word::Word;
use crate::construct::token::{Token, TokenKind};
use crate::error::{Bug, Syntax};
use crate::lang::Lang;

/// A classified leaf, ready to be turned into an `Expression::Atom`.
#[derive(Debug, Clone, Copy)]
pub enum Classified<'a> {
    Lexeme(Word<'a>, Token),
    Ident(Word<'a>, Token),
    Literal(Token),
}

/// The scope tree stage 1 builds: leaves are classified tokens, internal
/// nodes are the bodies of `{ ... }` groups.
#[derive(Debug, Clone)]
pub enum ScopeTree<'a> {
    Leaf(Classified<'a>),
    Scope(Vec<ScopeTree<'a>>),
}

/// Builds the scope tree and classifies every leaf against `lang`'s
/// keyword and symbol vocabularies.
pub fn scope_and_classify<'a>(
    tokens: &[Token],
    source: &Rc<Source>,
    lang: &Lang<'a>,
) -> Result<Vec<ScopeTree<'a>>, Syntax> {
    let mut stack: Vec<Vec<ScopeTree<'a>>> = vec![Vec::new()];

    for tok in tokens {
        match tok.kind {
            TokenKind::Symbols => split_symbol_run(tok, source, lang, &mut stack)?,
            TokenKind::Word => {
                let text = tok.text(&source.contents);
                let word = lang.interner.intern(text);
                let classified = if lang.is_keyword(word) {
                    Classified::Lexeme(word, *tok)
                } else {
                    Classified::Ident(word, *tok)
                };
                push(&mut stack, source, tok, ScopeTree::Leaf(classified))?;
            }
            TokenKind::Int | TokenKind::Float | TokenKind::Bool | TokenKind::String => {
                push(&mut stack, source, tok, ScopeTree::Leaf(Classified::Literal(*tok)))?;
            }
            TokenKind::Invalid => {
                return Err(Syntax::error("invalid token reached the parser", &Span::point(source, tok.offset)));
            }
        }
    }

    if stack.len() != 1 {
        return Err(Syntax::error("unmatched '{'", &Span::point(source, source.contents.len())));
    }
    Ok(stack.pop().unwrap())
}

fn push<'a>(
    stack: &mut Vec<Vec<ScopeTree<'a>>>,
    source: &Rc<Source>,
    tok: &Token,
    node: ScopeTree<'a>,
) -> Result<(), Syntax> {
    match stack.last_mut() {
        Some(top) => { top.push(node); Ok(()) }
        None => Err(Syntax::error("unmatched '}'", &Span::point(source, tok.offset))),
    }
}

fn split_symbol_run<'a>(
    tok: &Token,
    source: &Rc<Source>,
    lang: &Lang<'a>,
    stack: &mut Vec<Vec<ScopeTree<'a>>>,
) -> Result<(), Syntax> {
    let text = tok.text(&source.contents);
    let mut pos = 0usize;

    while pos < text.len() {
        let ch = text[pos..].chars().next().unwrap();
        match ch {
            '{' => {
                stack.push(Vec::new());
                pos += ch.len_utf8();
            }
            '}' => {
                let finished = stack.pop().ok_or_else(|| {
                    Syntax::error("unmatched '}'", &Span::point(source, tok.offset + pos))
                })?;
                if stack.is_empty() {
                    return Err(Syntax::error("unmatched '}'", &Span::point(source, tok.offset + pos)));
                }
                stack.last_mut().unwrap().push(ScopeTree::Scope(finished));
                pos += ch.len_utf8();
            }
            _ => {
                let start = pos;
                while pos < text.len() {
                    let c = text[pos..].chars().next().unwrap();
                    if c == '{' || c == '}' { break; }
                    pos += c.len_utf8();
                }
                split_known_symbols(&text[start..pos], tok.offset + start, source, lang, stack)?;
            }
        }
    }

    Ok(())
}

/// Greedily splits a brace-free punctuation run into the longest known
/// symbols in `lang`'s vocabulary (spec.md §4.5 stage 2). An unmatched
/// prefix is a structural error.
fn split_known_symbols<'a>(
    run: &str,
    base_offset: usize,
    source: &Rc<Source>,
    lang: &Lang<'a>,
    stack: &mut Vec<Vec<ScopeTree<'a>>>,
) -> Result<(), Syntax> {
    let mut pos = 0usize;
    while pos < run.len() {
        let remaining = &run[pos..];
        let found = lang.symbols().iter().find(|sym| remaining.starts_with(sym.as_str()));
        match found {
            Some(word) => {
                let len = word.len();
                let tok = Token::new(TokenKind::Symbols, base_offset + pos, len);
                stack
                    .last_mut()
                    .unwrap_or_else(|| panic!("{}", Bug::at("split_known_symbols: scope stack is empty between tokens")))
                    .push(ScopeTree::Leaf(Classified::Lexeme(*word, tok)));
                pos += len;
            }
            None => {
                return Err(Syntax::error(
                    &format!("unknown symbol '{}'", remaining.chars().next().unwrap()),
                    &Span::point(source, base_offset + pos),
                ));
            }
        }
    }
    Ok(())
}

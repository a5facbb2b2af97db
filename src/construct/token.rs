//! The external token stream (spec.md §6): a parallel-array-style
//! representation produced by the scanner (out of scope here) and consumed
//! by the parser. Each token is a kind plus a byte offset and length into
//! the source file; no token text is copied into the token itself.

/// The seven kinds a scanned token can carry. `Invalid` is a scanner error
/// and is never handed to the parser — it exists here only because it's
/// part of the external contract the scanner and parser agree on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Symbols,
    Int,
    Float,
    Bool,
    String,
    Invalid,
}

/// One scanned token: its kind and its byte-offset span into the source.
/// Text is recovered on demand via `Source`/`Span`, not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub length: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize, length: usize) -> Token {
        Token { kind, offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.offset..self.end()]
    }
}

pub type Tokens = Vec<Token>;

//! `MatchAtom`: one element of a `Pattern` (spec.md §3, §4.4) — either a
//! literal lexeme or a typed, possibly optional/repeating expression slot.
//! A tagged variant with exhaustive case analysis, per spec.md §9's
//! "Polymorphism over pattern atoms... no virtual dispatch" design note.

use crate::common::word::Word;
use crate::types::TypeExpr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchAtom<'a> {
    Lexeme(Word<'a>),
    Expr {
        type_expr: TypeExpr,
        optional: bool,
        repeating: bool,
    },
}

impl<'a> MatchAtom<'a> {
    /// Trie-key equality (spec.md §4.4): `Lexeme`s compare by `Word`
    /// equality, `Expr`s by structural `TypeExpr` equality plus equal
    /// `optional`/`repeating` flags.
    pub fn trie_equals(&self, other: &MatchAtom<'a>) -> bool {
        match (self, other) {
            (MatchAtom::Lexeme(a), MatchAtom::Lexeme(b)) => a == b,
            (
                MatchAtom::Expr { type_expr: a, optional: ao, repeating: ar },
                MatchAtom::Expr { type_expr: b, optional: bo, repeating: br },
            ) => a.equals(b) && ao == bo && ar == br,
            _ => false,
        }
    }
}

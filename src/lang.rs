//! `Lang`: a self-contained grammar bundle — rule trie, precedence graph,
//! type lattice, and symbol/keyword vocabulary (spec.md §GLOSSARY, §5).
//!
//! Ownership note: spec.md §5 describes each `Lang` as owning its own
//! arena and intern pool. In safe Rust a struct can't both own an arena and
//! hold references borrowed from it, so the arena and interner are built by
//! the caller and handed to `Lang` by reference; `Lang` owns everything
//! built *on top of* them (the type graph, precedence graph, and rule
//! set). The caller keeps the arena and interner alive for exactly as long
//! as the `Lang` and any AST parsed with it — the same lifetime contract,
//! expressed at the call site instead of inside the struct.

use std::collections::HashSet;

use crate::common::span::Span;
use crate::common::word::{Interner, Word};
use crate::error::Syntax;
use crate::prec::PrecGraph;
use crate::rule::{Builtins, RuleId, Rules};
use crate::types::TypeGraph;

pub struct Lang<'a> {
    pub interner: &'a Interner<'a>,
    pub types: TypeGraph<'a>,
    pub precs: PrecGraph<'a>,
    pub rules: Rules<'a>,
    pub builtins: Builtins,
    /// The reserved root entry used for the body of a `{ ... }` scope
    /// (spec.md §4.4). Every `Lang` gets one, not just the base lang —
    /// braces are core syntax, not something an embedder opts into.
    pub scope_rule: RuleId,
    keywords: HashSet<Word<'a>>,
    // kept sorted longest-first so symbol splitting (spec.md §4.5 stage 2)
    // can greedily try the longest candidate at each position.
    symbols: Vec<Word<'a>>,
}

impl<'a> Lang<'a> {
    pub fn new(interner: &'a Interner<'a>) -> Result<Lang<'a>, Syntax> {
        let span = Span::empty();
        let mut types = TypeGraph::new(interner);
        let builtins = Builtins::install(&mut types, &span)?;
        let precs = PrecGraph::new(interner);
        let mut rules = Rules::new();
        let scope_rule = rules.define_builtin("Scope", interner, &mut types, builtins.any, builtins.rule, &span)?;

        Ok(Lang {
            interner,
            types,
            precs,
            rules,
            builtins,
            scope_rule,
            keywords: HashSet::new(),
            symbols: Vec::new(),
        })
    }

    /// Registers `word` as a keyword — subsequently classified as a
    /// `Lexeme` atom rather than an `Ident` during stage 2 (spec.md §4.5).
    pub fn add_keyword(&mut self, word: &str) {
        self.keywords.insert(self.interner.intern(word));
    }

    pub fn is_keyword(&self, word: Word<'a>) -> bool {
        self.keywords.contains(&word)
    }

    /// Registers `sym` as a known punctuation symbol, keeping `symbols`
    /// sorted longest-first for greedy splitting.
    pub fn add_symbol(&mut self, sym: &str) {
        let word = self.interner.intern(sym);
        if !self.symbols.iter().any(|s| *s == word) {
            self.symbols.push(word);
            self.symbols.sort_by(|a, b| b.len().cmp(&a.len()));
        }
    }

    pub fn symbols(&self) -> &[Word<'a>] {
        &self.symbols
    }
}

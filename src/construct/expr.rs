//! The parser's output tree (spec.md §3's "Expression (AST)"). A tagged
//! enum rather than two loosely related structs, per spec.md §9's
//! "Polymorphism over pattern atoms... a tagged variant with exhaustive
//! case analysis; no virtual dispatch" design note, applied here to the
//! AST node itself.

use crate::error::Bug;
use crate::rule::RuleId;
use crate::types::Type;

/// What an atomic (non-reduced) leaf expression came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    Lexeme,
    Literal,
    Ident,
}

/// A node of the parsed tree. Every node carries an `eval_type` — the type
/// of the value it denotes at runtime — set by the parser for literals and
/// left for semantic analysis (out of scope) to refine further for
/// identifiers. Composite nodes additionally carry the id of the rule that
/// produced them and their reduced children, arena-allocated so the whole
/// tree lives exactly as long as its `Lang` and token stream.
#[derive(Debug, Clone)]
pub enum Expression<'a> {
    Atom {
        ast_type: AtomKind,
        eval_type: Type,
        token_start: usize,
        token_len: usize,
    },
    Composite {
        rule_id: RuleId,
        children: Vec<&'a Expression<'a>>,
        eval_type: Type,
    },
}

impl<'a> Expression<'a> {
    pub fn eval_type(&self) -> Type {
        match self {
            Expression::Atom { eval_type, .. } => *eval_type,
            Expression::Composite { eval_type, .. } => *eval_type,
        }
    }

    pub fn token_span(&self) -> (usize, usize) {
        match self {
            Expression::Atom { token_start, token_len, .. } => (*token_start, *token_len),
            Expression::Composite { children, .. } => {
                let first = children
                    .first()
                    .unwrap_or_else(|| panic!("{}", Bug::at("Expression::token_span: composite has no children")));
                let last = children
                    .last()
                    .unwrap_or_else(|| panic!("{}", Bug::at("Expression::token_span: composite has no children")));
                let (start, _) = first.token_span();
                let (last_start, last_len) = last.token_span();
                (start, last_start + last_len - start)
            }
        }
    }

    pub fn is_lexeme(&self) -> bool {
        matches!(self, Expression::Atom { ast_type: AtomKind::Lexeme, .. })
    }

    pub fn rule_id(&self) -> Option<RuleId> {
        match self {
            Expression::Composite { rule_id, .. } => Some(*rule_id),
            Expression::Atom { .. } => None,
        }
    }

    /// Walks the tree with an explicit stack of (node, child-index) frames
    /// rather than native recursion, per spec.md §9's note on the AST
    /// dumper avoiding unbounded recursion on deeply nested scopes.
    /// `visit` is called once on entry to a node (child-index 0) and once
    /// more after every child, mirroring a pre-order walk with the node's
    /// depth available to the caller for indentation.
    pub fn walk<F: FnMut(&Expression<'a>, usize)>(&'a self, mut visit: F) {
        let mut stack: Vec<(&Expression<'a>, usize)> = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            visit(node, depth);
            if let Expression::Composite { children, .. } = node {
                for child in children.iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }
    }
}

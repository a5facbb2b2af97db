//! Parser stage 3 (spec.md §4.5): greedy longest-match reduction with
//! in-place compaction, plus the precedence-driven rotation that corrects
//! the tree immediately after every composite is built.

use std::rc::Rc;

use crate::common::arena::Arena;
use crate::common::source::Source;
use crate::common::span::Span;
use crate::construct::expr::{AtomKind, Expression};
use crate::construct::token::TokenKind;
use crate::error::{Bug, Syntax};
use crate::lang::Lang;
use crate::parser::scope::{Classified, ScopeTree};
use crate::prec::{Assoc, Comparison, Prec};
use crate::rule::{Input, RuleId};
use crate::types::{Type, TypeExpr};

/// Reduces a full token stream's top-level scope to the single `Expression`
/// the whole file denotes. Unlike a brace-delimited scope (`reduce_nested`),
/// the file itself is never wrapped in a `Scope` composite — it has no
/// enclosing braces to be the body of — so it must reduce to exactly one
/// statement; a source file with top-level `;`-separated statements needs
/// an explicit surrounding `{ ... }` to get a `Scope` value.
pub fn reduce_scope<'a>(
    arena: &'a Arena,
    lang: &Lang<'a>,
    source: &Rc<Source>,
    nodes: Vec<ScopeTree<'a>>,
) -> Result<&'a Expression<'a>, Syntax> {
    let mut statements = reduce_statements(arena, lang, source, nodes)?;
    if statements.len() != 1 {
        return Err(Syntax::error(
            "a top-level source file must reduce to a single expression",
            &Span::empty(),
        ));
    }
    Ok(statements.pop().unwrap())
}

/// Reduces the body of a `{ ... }` scope to a `Scope` composite whose
/// children are its `;`-separated statements in order, `eval_type` equal to
/// the last one's (spec.md §4.4's reserved root entry, SPEC_FULL.md §10's
/// `{ 1 + 2 ; 3 }` → `Scope[Add(1,2), 3]` scenario).
fn reduce_nested<'a>(
    arena: &'a Arena,
    lang: &Lang<'a>,
    source: &Rc<Source>,
    nodes: Vec<ScopeTree<'a>>,
) -> Result<&'a Expression<'a>, Syntax> {
    let children = reduce_statements(arena, lang, source, nodes)?;
    let eval_type = children
        .last()
        .unwrap_or_else(|| panic!("{}", Bug::at("reduce_nested: reduce_statements returned empty on success")))
        .eval_type();
    Ok(arena.alloc(Expression::Composite { rule_id: lang.scope_rule, children, eval_type }))
}

/// Runs the greedy longest-match reduction loop over one scope's direct
/// children (recursing into any nested `{ ... }` first, bottom-up, since an
/// inner scope's value is needed before the outer scope can match it as a
/// sub-expression), then splits the result on top-level `;` lexemes into
/// one fully-reduced expression per statement.
fn reduce_statements<'a>(
    arena: &'a Arena,
    lang: &Lang<'a>,
    source: &Rc<Source>,
    nodes: Vec<ScopeTree<'a>>,
) -> Result<Vec<&'a Expression<'a>>, Syntax> {
    let mut slots: Vec<&'a Expression<'a>> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            ScopeTree::Scope(children) => slots.push(reduce_nested(arena, lang, source, children)?),
            ScopeTree::Leaf(classified) => slots.push(atomize(arena, lang, classified)),
        }
    }

    loop {
        let mut changed = false;
        let mut i = 0;
        while i < slots.len() {
            let inputs: Vec<Input<'a>> = slots[i..].iter().map(|e| to_input(lang, source, e)).collect();
            match best_verified_match(lang, &inputs, &slots[i..]) {
                Some((rule_id, len)) => {
                    let matched: Vec<&'a Expression<'a>> = slots[i..i + len].to_vec();
                    let eval_type = resolve_eval_type(lang, rule_id, &matched);
                    let composite = &*arena.alloc(Expression::Composite { rule_id, children: matched, eval_type });
                    let rotated = rotate(lang, arena, composite);
                    slots.splice(i..i + len, [rotated]);
                    changed = true;
                }
                None => i += 1,
            }
        }
        if !changed {
            break;
        }
    }

    split_on_semicolons(lang, source, slots)
}

/// `;` is never part of any rule pattern, so the reduction loop above
/// leaves it untouched as a standalone lexeme atom marking a statement
/// boundary — this splits on those boundaries and requires each statement
/// to have reduced to exactly one expression.
fn split_on_semicolons<'a>(
    lang: &Lang<'a>,
    source: &Rc<Source>,
    slots: Vec<&'a Expression<'a>>,
) -> Result<Vec<&'a Expression<'a>>, Syntax> {
    let mut out = Vec::new();
    let mut current: Vec<&'a Expression<'a>> = Vec::new();

    for slot in slots {
        if is_semicolon(lang, source, slot) {
            match current.len() {
                1 => out.push(current.pop().unwrap()),
                0 => return Err(Syntax::error("expected an expression before ';'", &Span::empty())),
                _ => return Err(Syntax::error("statement did not reduce to a single expression", &Span::empty())),
            }
        } else {
            current.push(slot);
        }
    }

    match current.len() {
        1 => out.push(current.pop().unwrap()),
        0 if out.is_empty() => return Err(Syntax::error("empty scope", &Span::empty())),
        0 => return Err(Syntax::error("expected an expression after ';'", &Span::empty())),
        _ => return Err(Syntax::error("statement did not reduce to a single expression", &Span::empty())),
    }
    Ok(out)
}

fn is_semicolon<'a>(_lang: &Lang<'a>, source: &Rc<Source>, expr: &Expression<'a>) -> bool {
    match expr {
        Expression::Atom { ast_type: AtomKind::Lexeme, token_start, token_len, .. } => {
            &source.contents[*token_start..*token_start + *token_len] == ";"
        }
        _ => false,
    }
}

/// Tries the trie's candidates best-first, skipping any whose where-clause
/// unification fails — per spec.md §4.5, a unification mismatch silently
/// rejects the match rather than erroring, so reduction falls through to
/// the next-best candidate (and ultimately to "no match" if none verify).
fn best_verified_match<'a>(
    lang: &Lang<'a>,
    inputs: &[Input<'a>],
    slots: &[&'a Expression<'a>],
) -> Option<(RuleId, usize)> {
    for (rule_id, len) in lang.rules.candidates(inputs, &lang.types) {
        if unify_where_clauses(lang, rule_id, &slots[..len]).is_some() {
            return Some((rule_id, len));
        }
    }
    None
}

/// Verifies every where-clause's slots agree on a single type, returning
/// the resolved type for the clause that binds the return type (if any).
/// Where-clauses are only checked when the match is a fixed-length one
/// (no optional/repeating atoms involved) — see DESIGN.md for why a
/// variable-length match skips unification.
fn unify_where_clauses<'a>(lang: &Lang<'a>, rule_id: RuleId, children: &[&'a Expression<'a>]) -> Option<Option<Type>> {
    let rule = lang.rules.get(rule_id);
    if rule.pattern.atoms.len() != children.len() {
        return Some(None);
    }

    let mut bound_return = None;
    for clause in &rule.pattern.where_clauses {
        let mut shared: Option<Type> = None;
        for &slot in &clause.slots {
            let t = children[slot].eval_type();
            match shared {
                None => shared = Some(t),
                Some(s) if s == t => {}
                Some(_) => return None,
            }
        }
        if clause.binds_return {
            bound_return = shared;
        }
    }
    Some(bound_return)
}

fn resolve_eval_type<'a>(lang: &Lang<'a>, rule_id: RuleId, children: &[&'a Expression<'a>]) -> Type {
    let rule = lang.rules.get(rule_id);
    if let Some(Some(t)) = unify_where_clauses(lang, rule_id, children) {
        return t;
    }
    match &rule.pattern.returns {
        TypeExpr::Atom(t) => *t,
        _ => lang.builtins.any,
    }
}

fn to_input<'a>(lang: &Lang<'a>, source: &Rc<Source>, expr: &'a Expression<'a>) -> Input<'a> {
    match expr {
        Expression::Atom { ast_type: AtomKind::Lexeme, token_start, token_len, .. } => {
            let text = &source.contents[*token_start..*token_start + *token_len];
            Input::Lexeme(lang.interner.intern(text))
        }
        _ => Input::Expr(TypeExpr::Atom(expr.eval_type())),
    }
}

fn atomize<'a>(arena: &'a Arena, lang: &Lang<'a>, classified: Classified<'a>) -> &'a Expression<'a> {
    match classified {
        Classified::Lexeme(_, tok) => arena.alloc(Expression::Atom {
            ast_type: AtomKind::Lexeme,
            eval_type: lang.builtins.lexeme,
            token_start: tok.offset,
            token_len: tok.length,
        }),
        Classified::Ident(_, tok) => arena.alloc(Expression::Atom {
            ast_type: AtomKind::Ident,
            eval_type: lang.builtins.ident,
            token_start: tok.offset,
            token_len: tok.length,
        }),
        Classified::Literal(tok) => arena.alloc(Expression::Atom {
            ast_type: AtomKind::Literal,
            eval_type: literal_type(lang, tok.kind),
            token_start: tok.offset,
            token_len: tok.length,
        }),
    }
}

fn literal_type(lang: &Lang, kind: TokenKind) -> Type {
    let name = match kind {
        TokenKind::Int => "Int",
        TokenKind::Float => "Float",
        TokenKind::Bool => "Bool",
        TokenKind::String => "String",
        TokenKind::Word | TokenKind::Symbols | TokenKind::Invalid => {
            panic!("{}", Bug::at("literal_type: only literal token kinds are atomized as Literal"))
        }
    };
    lang.types.by_name(name).unwrap_or(lang.builtins.any)
}

/// `precedes(E, P, D)` from spec.md §4.5: `E` outranks `P` either strictly,
/// or on a precedence tie when `E`'s own associativity matches the
/// rotation direction being attempted.
fn precedes(lang: &Lang, e_prec: Prec, p_prec: Prec, direction: Assoc) -> bool {
    match lang.precs.cmp(e_prec, p_prec) {
        Comparison::Gt => true,
        Comparison::Eq => lang.precs.assoc(e_prec) == direction,
        Comparison::Lt => false,
    }
}

/// Corrects a freshly built composite's precedence against its LHS or RHS
/// child (spec.md §4.5 "Rotation"). Tries RIGHT first, then LEFT; at most
/// one fires. Performs a single-level rotation against the pivot's
/// immediate swap-side child — sufficient for the chains this reduction
/// loop actually builds, since same-precedence runs already nest on the
/// non-swap side by construction (see DESIGN.md).
fn rotate<'a>(lang: &Lang<'a>, arena: &'a Arena, e: &'a Expression<'a>) -> &'a Expression<'a> {
    let e_prec = match e {
        Expression::Composite { rule_id, .. } => lang.rules.get(*rule_id).prec,
        Expression::Atom { .. } => None,
    };
    let Some(e_prec) = e_prec else { return e };

    if let Some(rotated) = try_rotate(lang, arena, e, e_prec, true) {
        return rotated;
    }
    if let Some(rotated) = try_rotate(lang, arena, e, e_prec, false) {
        return rotated;
    }
    e
}

fn try_rotate<'a>(
    lang: &Lang<'a>,
    arena: &'a Arena,
    e: &'a Expression<'a>,
    e_prec: Prec,
    look_right: bool,
) -> Option<&'a Expression<'a>> {
    let Expression::Composite { rule_id: e_rule, children, eval_type } = e else { return None };
    if children.is_empty() {
        return None;
    }
    let pivot_idx = if look_right { 0 } else { children.len() - 1 };
    let pivot = children[pivot_idx];
    let Expression::Composite { rule_id: pivot_rule, children: pivot_children, eval_type: pivot_eval_type } = pivot
    else {
        return None;
    };
    let pivot_prec = lang.rules.get(*pivot_rule).prec?;
    let direction = if look_right { Assoc::Right } else { Assoc::Left };
    if !precedes(lang, e_prec, pivot_prec, direction) {
        return None;
    }

    let swap_idx = if look_right { pivot_children.len() - 1 } else { 0 };
    let swap_target = *pivot_children.get(swap_idx)?;
    if swap_target.is_lexeme() {
        return None;
    }

    let mut new_e_children = children.clone();
    new_e_children[pivot_idx] = swap_target;
    let new_e = arena.alloc(Expression::Composite { rule_id: *e_rule, children: new_e_children, eval_type: *eval_type });

    let mut new_pivot_children = pivot_children.clone();
    new_pivot_children[swap_idx] = new_e;
    Some(arena.alloc(Expression::Composite {
        rule_id: *pivot_rule,
        children: new_pivot_children,
        eval_type: *pivot_eval_type,
    }))
}

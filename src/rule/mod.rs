//! Rules: a name, a pattern, a result type, and (for infix/prefix/postfix
//! forms) a precedence (spec.md §3, §4.4). `Rules` owns the trie that maps
//! atom sequences back to rule ids, plus the name index used when a rule
//! needs to look itself up (e.g. for diagnostics).

pub mod atom;
pub mod pattern;
pub mod trie;

use std::collections::HashMap;

use crate::common::span::Span;
use crate::common::word::{Interner, Word};
use crate::error::Syntax;
use crate::prec::Prec;
use crate::types::{Kind, Type, TypeExpr, TypeGraph};

pub use atom::MatchAtom;
pub use pattern::{Pattern, WhereClause};
pub use trie::{Input, RuleId, RuleTrie};

/// Types that classify every expression regardless of what a particular
/// `Lang` defines, per spec.md §4.2's note that the rule system needs a
/// few types that aren't tied to any one rule: the universal top type used
/// for permissive trie matching and unresolved where-clause variables, and
/// classifiers for the three kinds of leaf token a parse can start from.
/// Grounded in `original_source/src/lang/rules.h`'s small set of built-in
/// `Type`s predating any user definition.
pub struct Builtins {
    pub any: Type,
    pub literal: Type,
    pub lexeme: Type,
    pub ident: Type,
    /// The abstract meta-type every defined rule is registered as a subtype
    /// of, per spec.md §3's "the rule itself is a new Type, a subtype of the
    /// abstract `Rule` meta-type". Grounded in
    /// `original_source/src/lang/rules.c`'s `Rule_define_type`, which calls
    /// `Type_define(names, name, &fun_rule, 1)` for exactly this purpose —
    /// `fun_rule` there is itself declared a subtype of the "any expression"
    /// meta-type (`src/fungus.h`), which is why `rule` here is a subtype of
    /// `any` rather than a root of its own.
    pub rule: Type,
}

impl Builtins {
    pub fn install(types: &mut TypeGraph, span: &Span) -> Result<Builtins, Syntax> {
        let any = types.define_type("Any", Kind::Abstract, &[], span)?;
        let literal = types.define_type("Literal", Kind::Abstract, &[any], span)?;
        let lexeme = types.define_type("Lexeme", Kind::Abstract, &[any], span)?;
        let ident = types.define_type("Ident", Kind::Abstract, &[any], span)?;
        let rule = types.define_type("Rule", Kind::Abstract, &[any], span)?;
        Ok(Builtins { any, literal, lexeme, ident, rule })
    }
}

/// A single rule definition: its name (for diagnostics and lookup), its
/// matching pattern, and — for operator-style rules — the precedence it
/// participates in (spec.md §3's "every composite rule names a single
/// precedence"). `rule_type` is the rule's own `Type`, a subtype of
/// `Builtins::rule` — every defined rule is also a type, per spec.md §3.
pub struct Rule<'a> {
    pub name: Word<'a>,
    pub pattern: Pattern<'a>,
    pub prec: Option<Prec>,
    pub rule_type: Type,
}

/// The full set of rules known to a `Lang`: the name index plus the trie
/// used to drive matching during reduction (spec.md §4.4, §4.5).
pub struct Rules<'a> {
    entries: Vec<Rule<'a>>,
    by_name: HashMap<Word<'a>, RuleId>,
    trie: RuleTrie<'a>,
}

impl<'a> Rules<'a> {
    pub fn new() -> Rules<'a> {
        Rules { entries: Vec::new(), by_name: HashMap::new(), trie: RuleTrie::new() }
    }

    /// Compiles `pattern_text` and registers the resulting rule under
    /// `name`, threading it into the trie. Rejects a duplicate name — a
    /// rule's pattern may happen to collide with another's in the trie
    /// (that's resolved at match time by length then insertion order), but
    /// its name must be unique so diagnostics and lookups stay unambiguous.
    pub fn define_rule(
        &mut self,
        name: &str,
        pattern_text: &str,
        prec: Option<Prec>,
        interner: &'a Interner<'a>,
        types: &mut TypeGraph<'a>,
        any: Type,
        rule_meta: Type,
        span: &Span,
    ) -> Result<RuleId, Syntax> {
        let word = interner.intern(name);
        if self.by_name.contains_key(&word) {
            return Err(Syntax::error(&format!("rule '{name}' is already defined"), span));
        }

        let compiled = pattern::compile_pattern(pattern_text, interner, types, any, span)?;
        let rule_type = types.define_type(name, Kind::Concrete, &[rule_meta], span)?;
        let id = RuleId(self.entries.len());
        self.trie.insert(&compiled.atoms, id);
        self.entries.push(Rule { name: word, pattern: compiled, prec, rule_type });
        self.by_name.insert(word, id);
        Ok(id)
    }

    /// Registers a rule with no compiled pattern and never threads it into
    /// the trie — used for reserved entries the root needs a `RuleId` for
    /// without ever discovering them through matching, such as the rule
    /// trie root's designated `Scope` terminal (spec.md §4.4's "the root
    /// has a designated reserved Scope entry used for body-of-braces").
    /// The trie's fixed-arity matching model has no natural way to express
    /// a `;`-separated variadic body, so the parser builds `Scope`
    /// composites directly once reduction converges (see DESIGN.md) — this
    /// still gives that composite a real, name-addressable `RuleId`.
    pub fn define_builtin(
        &mut self,
        name: &str,
        interner: &'a Interner<'a>,
        types: &mut TypeGraph<'a>,
        any: Type,
        rule_meta: Type,
        span: &Span,
    ) -> Result<RuleId, Syntax> {
        let word = interner.intern(name);
        let rule_type = types.define_type(name, Kind::Concrete, &[rule_meta], span)?;
        let id = RuleId(self.entries.len());
        let pattern = Pattern { atoms: Vec::new(), returns: TypeExpr::Atom(any), where_clauses: Vec::new() };
        self.entries.push(Rule { name: word, pattern, prec: None, rule_type });
        self.by_name.insert(word, id);
        Ok(id)
    }

    pub fn by_name(&self, name: &str, interner: &'a Interner<'a>) -> Option<RuleId> {
        self.by_name.get(&interner.intern(name)).copied()
    }

    pub fn get(&self, id: RuleId) -> &Rule<'a> {
        &self.entries[id.0]
    }

    pub fn try_match(&self, input: &[Input<'a>], types: &TypeGraph) -> Option<(RuleId, usize)> {
        self.trie.try_match(input, types)
    }

    pub fn candidates(&self, input: &[Input<'a>], types: &TypeGraph) -> Vec<(RuleId, usize)> {
        self.trie.candidates(input, types)
    }
}

impl<'a> Default for Rules<'a> {
    fn default() -> Rules<'a> {
        Rules::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::arena::Arena;
    use crate::prec::{Assoc, PrecGraph};

    #[test]
    fn define_and_match_an_infix_rule() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let span = Span::empty();
        let mut types = TypeGraph::new(&interner);
        let builtins = Builtins::install(&mut types, &span).unwrap();
        let int = types.define_type("Int", Kind::Concrete, &[builtins.any], &span).unwrap();

        let mut precs = PrecGraph::new(&interner);
        let add = precs.define_prec("Add", Assoc::Left, &[], &[], &span).unwrap();

        let mut rules = Rules::new();
        let id = rules
            .define_rule(
                "Add", "a: Int `+ b: Int -> Int", Some(add), &interner, &mut types, builtins.any, builtins.rule,
                &span,
            )
            .unwrap();

        let input = vec![
            Input::Expr(crate::types::TypeExpr::Atom(int)),
            Input::Lexeme(interner.intern("+")),
            Input::Expr(crate::types::TypeExpr::Atom(int)),
        ];
        assert_eq!(rules.try_match(&input, &types), Some((id, 3)));
        assert_eq!(rules.get(id).prec, Some(add));
    }

    #[test]
    fn duplicate_rule_name_rejected() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let span = Span::empty();
        let mut types = TypeGraph::new(&interner);
        let builtins = Builtins::install(&mut types, &span).unwrap();
        types.define_type("Int", Kind::Concrete, &[builtins.any], &span).unwrap();

        let mut rules = Rules::new();
        rules
            .define_rule("Lit", "a: Int -> Int", None, &interner, &mut types, builtins.any, builtins.rule, &span)
            .unwrap();
        let result =
            rules.define_rule("Lit", "a: Int -> Int", None, &interner, &mut types, builtins.any, builtins.rule, &span);
        assert!(result.is_err());
    }
}

//! Spec property 3: trie match monotonicity — inserting more patterns
//! never causes a previously succeeding match on a fixed input to fail; it
//! may only lengthen the match or change the winning rule under the
//! documented tie-break (longest match, then insertion order).

use fungus::common::arena::Arena;
use fungus::common::span::Span;
use fungus::common::word::Interner;
use fungus::rule::{Input, RuleId, RuleTrie};
use fungus::rule::atom::MatchAtom;
use fungus::types::{Kind, TypeExpr, TypeGraph};

#[test]
fn inserting_a_longer_rule_only_ever_lengthens_or_preserves_the_match() {
    let arena = Arena::new();
    let interner = Interner::new(&arena);
    let span = Span::empty();
    let mut types = TypeGraph::new(&interner);
    let int = types.define_type("Int", Kind::Concrete, &[], &span).unwrap();

    let slot = MatchAtom::Expr { type_expr: TypeExpr::Atom(int), optional: false, repeating: false };
    let plus = MatchAtom::Lexeme(interner.intern("+"));

    let mut trie = RuleTrie::new();
    trie.insert(&[slot.clone()], RuleId(0));

    let input = vec![
        Input::Expr(TypeExpr::Atom(int)),
        Input::Lexeme(interner.intern("+")),
        Input::Expr(TypeExpr::Atom(int)),
    ];

    let before = trie.try_match(&input, &types).expect("a bare slot always matches a leading expr");
    assert_eq!(before, (RuleId(0), 1));

    trie.insert(&[slot.clone(), plus, slot], RuleId(1));
    let after = trie.try_match(&input, &types).expect("adding a rule cannot remove a previously successful match");

    // the new, longer rule wins outright; the old match length (1) is still
    // reachable as a shorter candidate, just no longer the winner.
    assert_eq!(after, (RuleId(1), 3));
    assert!(after.1 >= before.1);
    assert!(trie.candidates(&input, &types).iter().any(|&(rule, len)| rule == RuleId(0) && len == before.1));
}

#[test]
fn inserting_an_unrelated_rule_never_changes_an_existing_match() {
    let arena = Arena::new();
    let interner = Interner::new(&arena);
    let span = Span::empty();
    let mut types = TypeGraph::new(&interner);
    let int = types.define_type("Int", Kind::Concrete, &[], &span).unwrap();
    let string = types.define_type("String", Kind::Concrete, &[], &span).unwrap();

    let int_slot = MatchAtom::Expr { type_expr: TypeExpr::Atom(int), optional: false, repeating: false };
    let string_slot = MatchAtom::Expr { type_expr: TypeExpr::Atom(string), optional: false, repeating: false };
    let bang = MatchAtom::Lexeme(interner.intern("!"));

    let mut trie = RuleTrie::new();
    trie.insert(&[int_slot.clone(), bang.clone()], RuleId(0));

    let input = vec![Input::Expr(TypeExpr::Atom(int)), Input::Lexeme(interner.intern("!"))];
    let before = trie.try_match(&input, &types).unwrap();

    trie.insert(&[string_slot, bang], RuleId(1));
    let after = trie.try_match(&input, &types).unwrap();

    assert_eq!(before, after);
}

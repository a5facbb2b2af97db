//! The rule trie (spec.md §4.4): rules are indexed by the sequence of
//! `MatchAtom`s in their pattern, sharing structure the way a classic
//! string trie shares prefixes. An optional atom contributes a second,
//! direct edge set skipping over it; a repeating atom contributes a
//! self-edge on its own child so further instances can be consumed before
//! continuing. Grounded in `original_source/src/lang/rules.c`'s
//! `place_rule_r`, which recurses one atom at a time and recurses an extra
//! time at the same trie position when the atom is optional.

use crate::rule::atom::MatchAtom;
use crate::types::{TypeExpr, TypeGraph};

/// Opaque handle identifying a rule to the trie; `rule/mod.rs` maps this
/// back to a full `Rule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(pub usize);

/// One element of the sequence being matched against the trie: either a
/// literal lexeme token, or an already-reduced expression's result type.
#[derive(Debug, Clone)]
pub enum Input<'a> {
    Lexeme(crate::common::word::Word<'a>),
    Expr(TypeExpr),
}

struct Node<'a> {
    edges: Vec<(MatchAtom<'a>, usize)>,
    // the rule terminating here, plus its insertion order for tie-breaking
    // equal-length matches (spec.md §4.4: "ties broken by insertion order").
    terminal: Option<(RuleId, usize)>,
}

impl<'a> Node<'a> {
    fn new() -> Node<'a> {
        Node { edges: Vec::new(), terminal: None }
    }
}

pub struct RuleTrie<'a> {
    nodes: Vec<Node<'a>>,
    next_order: usize,
}

impl<'a> RuleTrie<'a> {
    pub fn new() -> RuleTrie<'a> {
        RuleTrie { nodes: vec![Node::new()], next_order: 0 }
    }

    fn find_or_add_edge(&mut self, node: usize, atom: &MatchAtom<'a>) -> usize {
        if let Some((_, target)) = self.nodes[node].edges.iter().find(|(a, _)| a.trie_equals(atom)) {
            return *target;
        }
        let child = self.nodes.len();
        self.nodes.push(Node::new());
        self.nodes[node].edges.push((atom.clone(), child));
        child
    }

    fn ensure_self_edge(&mut self, node: usize, atom: &MatchAtom<'a>) {
        if !self.nodes[node].edges.iter().any(|(a, target)| *target == node && a.trie_equals(atom)) {
            self.nodes[node].edges.push((atom.clone(), node));
        }
    }

    /// Inserts a rule's full atom sequence, returning the insertion-order
    /// index recorded at its terminal node (used for tie-breaking).
    pub fn insert(&mut self, atoms: &[MatchAtom<'a>], rule: RuleId) {
        let order = self.next_order;
        self.next_order += 1;
        self.insert_from(atoms, rule, order, 0);
    }

    fn insert_from(&mut self, atoms: &[MatchAtom<'a>], rule: RuleId, order: usize, node: usize) {
        match atoms.split_first() {
            None => {
                if self.nodes[node].terminal.is_none() {
                    self.nodes[node].terminal = Some((rule, order));
                }
            }
            Some((atom, rest)) => {
                if let MatchAtom::Expr { optional: true, .. } = atom {
                    // skip edge: the rest of the pattern is also reachable
                    // directly from this node, without consuming `atom`.
                    self.insert_from(rest, rule, order, node);
                }
                let child = self.find_or_add_edge(node, atom);
                if let MatchAtom::Expr { repeating: true, .. } = atom {
                    self.ensure_self_edge(child, atom);
                }
                self.insert_from(rest, rule, order, child);
            }
        }
    }

    /// Finds the longest match starting at the root, trying every
    /// optional/repeating branch the trie encodes. Ties are broken by
    /// insertion order (earliest-defined rule wins).
    pub fn try_match(&self, input: &[Input<'a>], graph: &TypeGraph) -> Option<(RuleId, usize)> {
        self.candidates(input, graph).into_iter().next()
    }

    /// Every terminal reachable from the root over `input`, best match
    /// first (longest, then earliest insertion order). A caller that needs
    /// to reject the best candidate post-hoc (e.g. a where-clause
    /// unification failure, spec.md §4.5: "on mismatch, the match is
    /// rejected... the parser simply moves on to try another rule") walks
    /// this list instead of trusting `try_match`'s single answer.
    pub fn candidates(&self, input: &[Input<'a>], graph: &TypeGraph) -> Vec<(RuleId, usize)> {
        let mut hits = Vec::new();
        self.walk(0, input, graph, 0, &mut hits);
        hits.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(len, _order, rule)| (rule, len)).collect()
    }

    fn walk(
        &self,
        node: usize,
        input: &[Input<'a>],
        graph: &TypeGraph,
        consumed: usize,
        out: &mut Vec<(usize, usize, RuleId)>,
    ) {
        if let Some((rule, order)) = self.nodes[node].terminal {
            out.push((consumed, order, rule));
        }
        let Some((head, rest)) = input.split_first() else { return };
        for (atom, target) in &self.nodes[node].edges {
            if accepts(atom, head, graph) {
                self.walk(*target, rest, graph, consumed + 1, out);
            }
        }
    }
}

fn accepts(atom: &MatchAtom, input: &Input, graph: &TypeGraph) -> bool {
    match (atom, input) {
        (MatchAtom::Lexeme(a), Input::Lexeme(b)) => a == b,
        (MatchAtom::Expr { type_expr, .. }, Input::Expr(actual)) => actual.matches(graph, type_expr),
        _ => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::arena::Arena;
    use crate::common::span::Span;
    use crate::common::word::Interner;
    use crate::types::Kind;

    fn setup<'a>(interner: &'a Interner<'a>) -> (TypeGraph<'a>, crate::types::Type) {
        let mut g = TypeGraph::new(interner);
        let span = Span::empty();
        let int = g.define_type("Int", Kind::Concrete, &[], &span).unwrap();
        (g, int)
    }

    #[test]
    fn exact_sequence_matches() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let (g, int) = setup(&interner);

        let mut trie = RuleTrie::new();
        let plus = MatchAtom::Lexeme(interner.intern("+"));
        let slot = MatchAtom::Expr { type_expr: TypeExpr::Atom(int), optional: false, repeating: false };
        trie.insert(&[slot.clone(), plus.clone(), slot.clone()], RuleId(0));

        let input = vec![Input::Expr(TypeExpr::Atom(int)), Input::Lexeme(interner.intern("+")), Input::Expr(TypeExpr::Atom(int))];
        let result = trie.try_match(&input, &g);
        assert_eq!(result, Some((RuleId(0), 3)));
    }

    #[test]
    fn optional_atom_is_skippable() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let (g, int) = setup(&interner);

        let mut trie = RuleTrie::new();
        let minus = MatchAtom::Lexeme(interner.intern("-"));
        let slot = MatchAtom::Expr { type_expr: TypeExpr::Atom(int), optional: true, repeating: false };
        trie.insert(&[slot, minus.clone()], RuleId(1));

        let with_operand = vec![Input::Expr(TypeExpr::Atom(int)), Input::Lexeme(interner.intern("-"))];
        assert_eq!(trie.try_match(&with_operand, &g), Some((RuleId(1), 2)));

        let without_operand = vec![Input::Lexeme(interner.intern("-"))];
        assert_eq!(trie.try_match(&without_operand, &g), Some((RuleId(1), 1)));
    }

    #[test]
    fn repeating_atom_consumes_multiple() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let (g, int) = setup(&interner);

        let mut trie = RuleTrie::new();
        let slot = MatchAtom::Expr { type_expr: TypeExpr::Atom(int), optional: false, repeating: true };
        trie.insert(&[slot], RuleId(2));

        let input = vec![Input::Expr(TypeExpr::Atom(int)); 4];
        assert_eq!(trie.try_match(&input, &g), Some((RuleId(2), 4)));
    }

    #[test]
    fn longest_match_wins_over_shorter_prefix_rule() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let (g, int) = setup(&interner);

        let mut trie = RuleTrie::new();
        let slot = MatchAtom::Expr { type_expr: TypeExpr::Atom(int), optional: false, repeating: false };
        let plus = MatchAtom::Lexeme(interner.intern("+"));
        trie.insert(&[slot.clone()], RuleId(10));
        trie.insert(&[slot.clone(), plus.clone(), slot.clone()], RuleId(11));

        let input = vec![Input::Expr(TypeExpr::Atom(int)), Input::Lexeme(interner.intern("+")), Input::Expr(TypeExpr::Atom(int))];
        assert_eq!(trie.try_match(&input, &g), Some((RuleId(11), 3)));
    }

    #[test]
    fn insertion_order_breaks_length_ties() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let (g, int) = setup(&interner);

        let mut trie = RuleTrie::new();
        let plus = MatchAtom::Lexeme(interner.intern("+"));
        let dash = MatchAtom::Lexeme(interner.intern("+")); // same lexeme, two rules sharing a prefix-length
        let slot = MatchAtom::Expr { type_expr: TypeExpr::Atom(int), optional: true, repeating: false };
        // first rule: optional slot then '+' (len without slot = 1)
        trie.insert(&[slot.clone(), plus.clone()], RuleId(0));
        // second rule is just '+' alone, registered after
        trie.insert(&[dash], RuleId(1));

        let input = vec![Input::Lexeme(interner.intern("+"))];
        // both reach a terminal after consuming exactly 1 token; rule 0 was inserted first
        assert_eq!(trie.try_match(&input, &g), Some((RuleId(0), 1)));
    }
}

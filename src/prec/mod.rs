//! The precedence DAG (spec.md §3, §4.3). Grounded in
//! `original_source/src/lang/precedence.c`: a flat array of entries, each
//! with a name, associativity, and an `above` set; `Prec_cmp` walks
//! `above`-reachability to answer `GT`/`LT`/`EQ`, and `Prec_define` rejects
//! any definition that would close a cycle before it's committed.

use std::collections::HashMap;

use crate::common::span::Span;
use crate::common::word::{Interner, Word};
use crate::error::Syntax;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Eq,
    Gt,
}

/// An opaque handle into a `PrecGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prec(pub usize);

struct Entry<'a> {
    name: Word<'a>,
    assoc: Assoc,
    above: Vec<Prec>,
}

/// The precedence graph. `above[i]` lists the precedences that `i` is
/// directly reported to dominate; `cmp` walks this reachability relation.
pub struct PrecGraph<'a> {
    interner: &'a Interner<'a>,
    entries: Vec<Entry<'a>>,
    by_name: HashMap<Word<'a>, Prec>,
}

impl<'a> PrecGraph<'a> {
    pub fn new(interner: &'a Interner<'a>) -> PrecGraph<'a> {
        PrecGraph { interner, entries: Vec::new(), by_name: HashMap::new() }
    }

    fn reaches(&self, from: Prec, to: Prec) -> bool {
        if from == to { return true; }
        self.entries[from.0]
            .above
            .iter()
            .any(|&next| self.reaches(next, to))
    }

    /// Defines a new precedence, optionally dominating (`above`) and/or
    /// dominated-by (`below`) existing precedences. Both directions are
    /// cycle-checked before the node is linked in, matching
    /// `original_source`'s `PG_higher_than` guard in `Prec_define`.
    pub fn define_prec(
        &mut self,
        name: &str,
        assoc: Assoc,
        above: &[Prec],
        below: &[Prec],
        span: &Span,
    ) -> Result<Prec, Syntax> {
        let word = self.interner.intern(name);
        if self.by_name.contains_key(&word) {
            return Err(Syntax::error(&format!("precedence '{name}' is already defined"), span));
        }

        for &p in above.iter().chain(below.iter()) {
            if p.0 >= self.entries.len() {
                return Err(Syntax::error(
                    &format!("precedence referenced by '{name}' is not defined in this graph"),
                    span,
                ));
            }
        }

        // A `below` link means `handle` ends up in `p`'s `above` set, i.e.
        // `handle` dominates `p`. Reject if `p` already (transitively)
        // dominates `handle` — that would close a cycle.
        let handle = Prec(self.entries.len());
        self.entries.push(Entry { name: word, assoc, above: above.to_vec() });
        self.by_name.insert(word, handle);

        for &p in below {
            if self.reaches(p, handle) {
                // undo: pop what we just pushed so the graph stays
                // consistent with "definition errors abort the offending
                // API call and return a rejection; the graph remains in
                // its pre-call state" (spec.md §7).
                self.entries.pop();
                self.by_name.remove(&word);
                return Err(Syntax::error(
                    &format!("circular precedence definition involving '{name}'"),
                    span,
                ));
            }
        }

        for &p in below {
            self.entries[p.0].above.push(handle);
        }

        Ok(handle)
    }

    pub fn by_name(&self, name: &str) -> Option<Prec> {
        let word = self.interner.intern(name);
        self.by_name.get(&word).copied()
    }

    pub fn name(&self, p: Prec) -> Word<'a> {
        self.entries[p.0].name
    }

    pub fn assoc(&self, p: Prec) -> Assoc {
        self.entries[p.0].assoc
    }

    /// `cmp(a, b)`: `Gt` if `a` dominates `b`, `Lt` if `b` dominates `a`,
    /// `Eq` otherwise (including when neither is reachable from the other —
    /// spec.md's Open Question (b), resolved in SPEC_FULL.md §3).
    pub fn cmp(&self, a: Prec, b: Prec) -> Comparison {
        if a == b { return Comparison::Eq; }
        if self.reaches(a, b) { return Comparison::Gt; }
        if self.reaches(b, a) { return Comparison::Lt; }
        Comparison::Eq
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::arena::Arena;

    #[test]
    fn eq_is_reflexive_and_cmp_is_antisymmetric() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = PrecGraph::new(&interner);
        let span = Span::empty();

        let add = g.define_prec("Add", Assoc::Left, &[], &[], &span).unwrap();
        let mul = g.define_prec("Mul", Assoc::Left, &[add], &[], &span).unwrap();

        assert_eq!(g.cmp(add, add), Comparison::Eq);
        assert_eq!(g.cmp(mul, add), Comparison::Gt);
        assert_eq!(g.cmp(add, mul), Comparison::Lt);
    }

    #[test]
    fn unrelated_precedences_compare_eq() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = PrecGraph::new(&interner);
        let span = Span::empty();

        let a = g.define_prec("A", Assoc::Left, &[], &[], &span).unwrap();
        let b = g.define_prec("B", Assoc::Left, &[], &[], &span).unwrap();
        assert_eq!(g.cmp(a, b), Comparison::Eq);
    }

    #[test]
    fn cycle_via_below_is_rejected() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = PrecGraph::new(&interner);
        let span = Span::empty();

        let low = g.define_prec("Low", Assoc::Left, &[], &[], &span).unwrap();
        let high = g.define_prec("High", Assoc::Left, &[low], &[], &span).unwrap();

        // defining a node below `low` but above `high` would close a cycle:
        // high > low, and the new node would need low > new > high.
        let result = g.define_prec("Cyclic", Assoc::Left, &[high], &[low], &span);
        assert!(result.is_err());
        // graph must be unchanged after the rejected call
        assert!(g.by_name("Cyclic").is_none());
    }

    #[test]
    fn below_link_establishes_domination() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = PrecGraph::new(&interner);
        let span = Span::empty();

        let atom = g.define_prec("Atom", Assoc::Left, &[], &[], &span).unwrap();
        let call = g.define_prec("Call", Assoc::Left, &[], &[atom], &span).unwrap();

        assert_eq!(g.cmp(call, atom), Comparison::Gt);
    }
}

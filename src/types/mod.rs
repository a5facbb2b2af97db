//! The type lattice (spec.md §3, §4.2): a graph of named types supporting
//! subtype queries, plus the compound `TypeExpr` patterns match against.
//!
//! Grounded in `original_source/src/types.c`/`types.h` and
//! `src/sema/types.c` for the subtype-closure approach, and in the
//! teacher's `common/type_.rs` for the idea of a flat enum of builtin
//! datatypes (generalized here into a graph since spec.md needs
//! user-definable types, not a fixed enum).

pub mod expr;

use std::collections::HashMap;

use crate::common::word::{Interner, Word};
use crate::error::Syntax;
use crate::common::span::Span;

pub use expr::TypeExpr;

/// Whether a type can be instantiated (`Concrete`) or only appear in
/// patterns as a classifier (`Abstract`), per spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Concrete,
    Abstract,
}

/// An opaque handle into a `TypeGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Type(pub usize);

struct Entry<'a> {
    name: Word<'a>,
    kind: Kind,
    supers: Vec<Type>,
    // transitive closure of `supers`, including `self`, computed once at
    // definition time (spec.md §4.2's "cached per type as a bitset").
    ancestors: Vec<bool>,
}

/// The type graph itself. Each `TypeGraph` owns its own arena-backed word
/// interner; definitions are append-only and the supertype closure is
/// computed once per type and never mutated afterwards.
pub struct TypeGraph<'a> {
    interner: &'a Interner<'a>,
    entries: Vec<Entry<'a>>,
    by_name: HashMap<Word<'a>, Type>,
}

impl<'a> TypeGraph<'a> {
    pub fn new(interner: &'a Interner<'a>) -> TypeGraph<'a> {
        TypeGraph { interner, entries: Vec::new(), by_name: HashMap::new() }
    }

    /// Defines a new type. `supers` must already be defined in this graph —
    /// since a type can only reference handles that already exist, the
    /// supertype relation is acyclic by construction (spec.md §4.2's
    /// "Definition order is significant" invariant).
    pub fn define_type(
        &mut self,
        name: &str,
        kind: Kind,
        supers: &[Type],
        span: &Span,
    ) -> Result<Type, Syntax> {
        let word = self.interner.intern(name);

        if self.by_name.contains_key(&word) {
            return Err(Syntax::error(
                &format!("type '{name}' is already defined"),
                span,
            ));
        }

        for &s in supers {
            if s.0 >= self.entries.len() {
                return Err(Syntax::error(
                    &format!("supertype of '{name}' is not defined in this graph"),
                    span,
                ));
            }
        }

        let handle = Type(self.entries.len());

        let mut ancestors = vec![false; self.entries.len() + 1];
        ancestors[handle.0] = true;
        for &s in supers {
            ancestors[s.0] = true;
            let super_ancestors = &self.entries[s.0].ancestors;
            for (i, &is_ancestor) in super_ancestors.iter().enumerate() {
                if is_ancestor {
                    ancestors[i] = true;
                }
            }
        }
        // grow all previously-recorded ancestor sets by one slot so indexing
        // stays aligned as the graph grows.
        for entry in &mut self.entries {
            entry.ancestors.push(false);
        }

        self.entries.push(Entry { name: word, kind, supers: supers.to_vec(), ancestors });
        self.by_name.insert(word, handle);

        Ok(handle)
    }

    pub fn by_name(&self, name: &str) -> Option<Type> {
        let word = self.interner.intern(name);
        self.by_name.get(&word).copied()
    }

    pub fn name(&self, t: Type) -> Word<'a> {
        self.entries[t.0].name
    }

    pub fn kind(&self, t: Type) -> Kind {
        self.entries[t.0].kind
    }

    pub fn direct_supers(&self, t: Type) -> &[Type] {
        &self.entries[t.0].supers
    }

    /// `is_a(t, u)`: is `u` in the transitive, reflexive supertype closure
    /// of `t`? O(1) after the one-time closure computation at define time.
    pub fn is_a(&self, t: Type, u: Type) -> bool {
        self.entries[t.0].ancestors.get(u.0).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::arena::Arena;

    #[test]
    fn reflexive_and_transitive() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = TypeGraph::new(&interner);
        let span = Span::empty();

        let animal = g.define_type("Animal", Kind::Abstract, &[], &span).unwrap();
        let dog = g.define_type("Dog", Kind::Concrete, &[animal], &span).unwrap();
        let puppy = g.define_type("Puppy", Kind::Concrete, &[dog], &span).unwrap();

        assert!(g.is_a(puppy, puppy));
        assert!(g.is_a(puppy, dog));
        assert!(g.is_a(puppy, animal));
        assert!(!g.is_a(animal, dog));
        assert!(!g.is_a(dog, puppy));
    }

    #[test]
    fn duplicate_name_rejected() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = TypeGraph::new(&interner);
        let span = Span::empty();

        g.define_type("Int", Kind::Concrete, &[], &span).unwrap();
        assert!(g.define_type("Int", Kind::Concrete, &[], &span).is_err());
    }

    #[test]
    fn unknown_supertype_rejected() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = TypeGraph::new(&interner);
        let span = Span::empty();

        let bogus = Type(99);
        assert!(g.define_type("Int", Kind::Concrete, &[bogus], &span).is_err());
    }

    #[test]
    fn diamond_inheritance() {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = TypeGraph::new(&interner);
        let span = Span::empty();

        let top = g.define_type("Top", Kind::Abstract, &[], &span).unwrap();
        let left = g.define_type("Left", Kind::Abstract, &[top], &span).unwrap();
        let right = g.define_type("Right", Kind::Abstract, &[top], &span).unwrap();
        let bottom = g.define_type("Bottom", Kind::Concrete, &[left, right], &span).unwrap();

        assert!(g.is_a(bottom, left));
        assert!(g.is_a(bottom, right));
        assert!(g.is_a(bottom, top));
    }
}

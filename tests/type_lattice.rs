//! Spec property 1: type lattice soundness — `is_a` is reflexive and
//! transitive, and a graph built purely from append-only `define_type`
//! calls (each naming only already-defined supertypes) can never close a
//! non-trivial cycle.

use fungus::common::arena::Arena;
use fungus::common::span::Span;
use fungus::common::word::Interner;
use fungus::types::{Kind, TypeGraph};

use proptest::prelude::*;

#[test]
fn every_type_is_a_of_itself() {
    let arena = Arena::new();
    let interner = Interner::new(&arena);
    let mut g = TypeGraph::new(&interner);
    let span = Span::empty();

    let any = g.define_type("Any", Kind::Abstract, &[], &span).unwrap();
    let int = g.define_type("Int", Kind::Concrete, &[any], &span).unwrap();

    assert!(g.is_a(any, any));
    assert!(g.is_a(int, int));
}

#[test]
fn is_a_is_transitive_through_a_chain() {
    let arena = Arena::new();
    let interner = Interner::new(&arena);
    let mut g = TypeGraph::new(&interner);
    let span = Span::empty();

    let a = g.define_type("A", Kind::Abstract, &[], &span).unwrap();
    let b = g.define_type("B", Kind::Abstract, &[a], &span).unwrap();
    let c = g.define_type("C", Kind::Concrete, &[b], &span).unwrap();

    assert!(g.is_a(c, b));
    assert!(g.is_a(b, a));
    assert!(g.is_a(c, a));
    assert!(!g.is_a(a, c));
}

proptest! {
    /// Builds a random chain of N types, each supertyped by the previous
    /// one, and checks that `is_a` agrees with the chain's total order in
    /// both directions (descendant→ancestor holds, ancestor→descendant
    /// doesn't) — a property-based stand-in for "no defined type satisfies
    /// `is_a(t, t)` via a non-trivial path", since a chain can never close a
    /// cycle by construction (every supertype named must already exist).
    #[test]
    fn random_chains_respect_ancestor_order(depth in 1usize..12) {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = TypeGraph::new(&interner);
        let span = Span::empty();

        let mut chain = Vec::with_capacity(depth);
        let mut supers: Vec<fungus::types::Type> = Vec::new();
        for i in 0..depth {
            let name = format!("T{i}");
            let t = g.define_type(&name, Kind::Abstract, &supers, &span).unwrap();
            chain.push(t);
            supers = vec![t];
        }

        for i in 0..chain.len() {
            for j in 0..chain.len() {
                if i >= j {
                    prop_assert!(g.is_a(chain[i], chain[j]));
                } else {
                    prop_assert!(!g.is_a(chain[i], chain[j]));
                }
            }
        }
    }
}

//! Spec property 2: the precedence DAG — `cmp` is antisymmetric
//! (`cmp(a,b) = Gt ⇔ cmp(b,a) = Lt`), reflexive-equal, and a definition
//! that would close a cycle through `above`/`below` is rejected without
//! mutating the graph.

use fungus::common::arena::Arena;
use fungus::common::span::Span;
use fungus::common::word::Interner;
use fungus::prec::{Assoc, Comparison, PrecGraph};

use proptest::prelude::*;

#[test]
fn cmp_is_reflexive() {
    let arena = Arena::new();
    let interner = Interner::new(&arena);
    let mut g = PrecGraph::new(&interner);
    let span = Span::empty();
    let p = g.define_prec("P", Assoc::Left, &[], &[], &span).unwrap();
    assert_eq!(g.cmp(p, p), Comparison::Eq);
}

#[test]
fn closing_a_cycle_leaves_the_graph_unchanged() {
    let arena = Arena::new();
    let interner = Interner::new(&arena);
    let mut g = PrecGraph::new(&interner);
    let span = Span::empty();

    let low = g.define_prec("Low", Assoc::Left, &[], &[], &span).unwrap();
    let mid = g.define_prec("Mid", Assoc::Left, &[low], &[], &span).unwrap();
    let high = g.define_prec("High", Assoc::Left, &[mid], &[], &span).unwrap();

    // a node placed above `high` but below `low` would need low > new > high,
    // but high already > low, closing a cycle.
    let before = (g.cmp(high, low), g.cmp(low, mid), g.cmp(mid, high));
    let result = g.define_prec("Cyclic", Assoc::Left, &[high], &[low], &span);
    assert!(result.is_err());
    assert!(g.by_name("Cyclic").is_none());
    assert_eq!(before, (g.cmp(high, low), g.cmp(low, mid), g.cmp(mid, high)));
}

proptest! {
    /// A randomly built chain of precedences (each `above` the previous)
    /// must satisfy antisymmetry pairwise: whenever `cmp(a, b) = Gt`,
    /// `cmp(b, a) = Lt`, and vice versa.
    #[test]
    fn chain_comparisons_are_antisymmetric(depth in 1usize..12) {
        let arena = Arena::new();
        let interner = Interner::new(&arena);
        let mut g = PrecGraph::new(&interner);
        let span = Span::empty();

        let mut chain = Vec::with_capacity(depth);
        let mut above: Vec<fungus::prec::Prec> = Vec::new();
        for i in 0..depth {
            let name = format!("P{i}");
            let p = g.define_prec(&name, Assoc::Left, &above, &[], &span).unwrap();
            chain.push(p);
            above = vec![p];
        }

        for &a in &chain {
            for &b in &chain {
                let ab = g.cmp(a, b);
                let ba = g.cmp(b, a);
                match ab {
                    Comparison::Gt => prop_assert_eq!(ba, Comparison::Lt),
                    Comparison::Lt => prop_assert_eq!(ba, Comparison::Gt),
                    Comparison::Eq => prop_assert_eq!(ba, Comparison::Eq),
                }
            }
        }
    }
}

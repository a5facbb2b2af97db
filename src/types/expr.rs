//! `TypeExpr`: the tree of atoms/sums/products that patterns match against
//! (spec.md §3). Resolved in `SPEC_FULL.md` §3: `Sum` compares as an
//! order-independent set, `Product` position-by-position — the equality
//! used as the rule trie's structural key (spec.md §4.4).

use super::{Type, TypeGraph};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum TypeExpr {
    Atom(Type),
    // recursive variants are excluded from generation, the same way the
    // teacher's own `Lit::Label(usize, Box<Lit>)` is skipped in
    // `passerine-common/src/lit.rs` — an unbounded derived strategy for a
    // self-referential enum recurses without a depth limit.
    #[proptest(skip)]
    Sum(Vec<TypeExpr>),
    #[proptest(skip)]
    Product(Vec<TypeExpr>),
}

impl TypeExpr {
    /// `is_a(self, target)` generalized to `TypeExpr` on both sides
    /// (spec.md §3's three clauses, extended so a product-shaped actual
    /// value can satisfy a product-shaped target, per spec.md §3's "t
    /// itself is a product with matching arity and pointwise subtyping").
    pub fn matches(&self, graph: &TypeGraph, target: &TypeExpr) -> bool {
        match target {
            TypeExpr::Atom(u) => match self {
                TypeExpr::Atom(t) => graph.is_a(*t, *u),
                _ => false,
            },
            TypeExpr::Sum(xs) => xs.iter().any(|x| self.matches(graph, x)),
            TypeExpr::Product(ys) => match self {
                TypeExpr::Product(xs) => {
                    xs.len() == ys.len()
                        && xs.iter().zip(ys).all(|(x, y)| x.matches(graph, y))
                }
                _ => false,
            },
        }
    }

    /// Structural equality used as the rule trie's key for two `Expr`
    /// `MatchAtom`s (spec.md §4.4): `Sum` is set-equality (order
    /// independent), `Product` is pointwise (order dependent, arity must
    /// match), `Atom` is handle equality.
    pub fn equals(&self, other: &TypeExpr) -> bool {
        match (self, other) {
            (TypeExpr::Atom(a), TypeExpr::Atom(b)) => a == b,
            (TypeExpr::Sum(a), TypeExpr::Sum(b)) => {
                a.len() == b.len()
                    && a.iter().all(|x| b.iter().any(|y| x.equals(y)))
                    && b.iter().all(|y| a.iter().any(|x| x.equals(y)))
            }
            (TypeExpr::Product(a), TypeExpr::Product(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
            }
            _ => false,
        }
    }
}

//! # fungus
//!
//! The core of Fungus, an extensible-grammar language: a precedence DAG, a
//! rule trie, precedence/associativity-driven tree rearrangement, and the
//! type lattice rule patterns match against. Scanning, IR lowering, code
//! generation, and an interactive driver loop are deliberately out of
//! scope — this crate owns the grammar machinery a host language builds on
//! top of, not a full language implementation.
//!
//! ## Overview
//!
//! A [`lang::Lang`] bundles everything one extensible grammar needs: a
//! [`types::TypeGraph`] (the subtype lattice), a [`prec::PrecGraph`] (the
//! precedence DAG), and a [`rule::Rules`] (the rule trie). An embedder
//! builds one with [`types::TypeGraph::define_type`],
//! [`prec::PrecGraph::define_prec`], and [`rule::Rules::define_rule`] calls
//! — see [`base::fungus_lang`] for a complete worked example wiring up
//! arithmetic over `Int`/`Float`/`Bool`/`String`.
//!
//! Parsing a token stream against a `Lang` is [`parser::parse`]: it scopes
//! and classifies the token stream (`parser::scope`), then greedily
//! reduces it against the rule trie with precedence-driven rotation
//! (`parser::reduce`), producing a single [`construct::expr::Expression`].
//!
//! ## Errors
//!
//! Fallible APIs return [`error::Syntax`] — a primary span, a message, and
//! any number of secondary notes. [`error::Bug`] marks an internal
//! invariant violation; it is never returned from a `Result`, only ever
//! passed to `panic!`.

pub mod base;
pub mod common;
pub mod construct;
pub mod error;
pub mod lang;
pub mod parser;
pub mod prec;
pub mod rule;
pub mod scan;
pub mod types;

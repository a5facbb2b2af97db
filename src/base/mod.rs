//! The "base Fungus lang" bootstrap (SPEC_FULL.md §10): a `Lang` wired with
//! `Int`/`Float`/`Bool`/`String` types and the arithmetic rules spec.md §8's
//! scenarios exercise. This isn't a core module so much as the crate's own
//! first caller of one — the CLI driver and the integration tests both
//! build a `Lang` the same way any embedder would, through `Lang::new` plus
//! ordinary `define_type`/`define_prec`/`define_rule` calls.

use crate::common::span::Span;
use crate::common::word::Interner;
use crate::error::Syntax;
use crate::lang::Lang;
use crate::prec::Assoc;
use crate::types::Kind;

/// Builds the base lang: arithmetic over `Int`/`Float`/`Bool`/`String`,
/// parenthesised grouping, and the usual precedence chain. `T` in every
/// rule pattern below is an unresolved pattern identifier — shared across a
/// rule's operand slots and its return type via a where-clause — not the
/// sum type `Int | Float`. SPEC_FULL.md §10 explains why that distinction
/// is exactly what makes `1 + 2.0` fail to reduce: independently-typed
/// slots would accept either side being `Int` or `Float` on its own, but a
/// shared variable only resolves when both sides land on the *same* type.
pub fn fungus_lang<'a>(interner: &'a Interner<'a>) -> Result<Lang<'a>, Syntax> {
    let span = Span::empty();
    let mut lang = Lang::new(interner)?;
    let any = lang.builtins.any;

    lang.types.define_type("Int", Kind::Concrete, &[any], &span)?;
    lang.types.define_type("Float", Kind::Concrete, &[any], &span)?;
    lang.types.define_type("Bool", Kind::Concrete, &[any], &span)?;
    lang.types.define_type("String", Kind::Concrete, &[any], &span)?;

    let assign = lang.precs.define_prec("Assign", Assoc::Left, &[], &[], &span)?;
    let add_sub = lang.precs.define_prec("AddSub", Assoc::Left, &[assign], &[], &span)?;
    let mul_div_rem = lang.precs.define_prec("MulDivRem", Assoc::Left, &[add_sub], &[], &span)?;
    let pow = lang.precs.define_prec("Pow", Assoc::Right, &[mul_div_rem], &[], &span)?;
    lang.precs.define_prec("Atom", Assoc::Left, &[pow], &[], &span)?;

    for (name, pattern, prec) in [
        ("Add", "a: T `+ b: T -> T", add_sub),
        ("Sub", "a: T `- b: T -> T", add_sub),
        ("Mul", "a: T `* b: T -> T", mul_div_rem),
        ("Div", "a: T `/ b: T -> T", mul_div_rem),
        ("Rem", "a: T `% b: T -> T", mul_div_rem),
        ("Pow", "a: T `** b: T -> T", pow),
    ] {
        let rule_meta = lang.builtins.rule;
        lang.rules.define_rule(name, pattern, Some(prec), interner, &mut lang.types, any, rule_meta, &span)?;
    }
    // no precedence — rotation skips a pivot whose rule has none, so a
    // parenthesised group never gets rearranged into its surroundings.
    let rule_meta = lang.builtins.rule;
    lang.rules.define_rule("Parens", "`( a: T `) -> T", None, interner, &mut lang.types, any, rule_meta, &span)?;

    for sym in ["**", "+", "-", "*", "/", "%", "(", ")", ";"] {
        lang.add_symbol(sym);
    }

    Ok(lang)
}

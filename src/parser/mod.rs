//! The two-stage parser (spec.md §4.5): scope-tree construction, then
//! greedy longest-match reduction with rotation. `parse` is the single
//! entry point a caller needs; `scope` and `reduce` hold the two stages.

pub mod reduce;
pub mod scope;

use std::rc::Rc;

use crate::common::arena::Arena;
use crate::common::source::Source;
use crate::construct::expr::Expression;
use crate::construct::token::Token;
use crate::error::Syntax;
use crate::lang::Lang;

/// Parses a full token stream against `lang`, producing the single root
/// `Expression` the whole file reduces to.
pub fn parse<'a>(
    arena: &'a Arena,
    lang: &Lang<'a>,
    source: &Rc<Source>,
    tokens: &[Token],
) -> Result<&'a Expression<'a>, Syntax> {
    let tree = scope::scope_and_classify(tokens, source, lang)?;
    reduce::reduce_scope(arena, lang, source, tree)
}

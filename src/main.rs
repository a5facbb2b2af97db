//! The `fungus` CLI driver (spec.md §6): parses a file (or standard input,
//! read until a blank line) against the base Fungus lang and either prints
//! the resulting `Expression` tree with ANSI-coloured indentation, or a
//! `file:line:col` diagnostic on failure. Exit codes follow spec.md §6:
//! `0` success, `1` a user-facing parse/definition error, `>=2` an
//! internal invariant violation (surfaced as a panic — `Bug` is always
//! fatal and never flows through a `Result`, per spec.md §7 — which the
//! default Rust panic handler already exits with a non-zero code well
//! above 2).

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use colored::Colorize;

use fungus::base;
use fungus::common::arena::Arena;
use fungus::common::source::Source;
use fungus::common::word::Interner;
use fungus::construct::expr::{AtomKind, Expression};
use fungus::lang::Lang;
use fungus::parser;
use fungus::scan;

#[derive(Parser)]
#[command(name = "fungus", about = "Parses a Fungus source file and prints its rule-trie-reduced AST")]
struct Cli {
    /// Source file to parse. Reads from standard input (until a blank line) when omitted.
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let source = match load(cli.path) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(1);
        }
    };

    let arena = Arena::new();
    let interner = Interner::new(&arena);
    let lang = match base::fungus_lang(&interner) {
        Ok(lang) => lang,
        Err(err) => {
            eprint!("{err}");
            return ExitCode::from(1);
        }
    };

    let tokens = scan::scan(&source.contents);
    match parser::parse(&arena, &lang, &source, &tokens) {
        Ok(expr) => {
            dump(&lang, &source, expr);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{err}");
            ExitCode::from(1)
        }
    }
}

/// Loads source text from a path, or from standard input one line at a
/// time until a blank line (spec.md §6) when no path was given.
fn load(path: Option<PathBuf>) -> Result<Rc<Source>, String> {
    match path {
        Some(path) => {
            Source::path(&path).map_err(|e| format!("could not read '{}': {e}", path.display()))
        }
        None => {
            let mut lines = Vec::new();
            for line in io::stdin().lines() {
                let line = line.map_err(|e| e.to_string())?;
                if line.is_empty() {
                    break;
                }
                lines.push(line);
            }
            Ok(Source::source(&lines.join("\n")))
        }
    }
}

/// Pretty-prints an `Expression` tree: rule names in one colour, and
/// lexemes/literals/idents in three others, indented by depth.
fn dump(lang: &Lang, source: &Source, expr: &Expression) {
    expr.walk(|node, depth| {
        let indent = "  ".repeat(depth);
        match node {
            Expression::Composite { rule_id, .. } => {
                let name = lang.rules.get(*rule_id).name.as_str();
                println!("{indent}{}", name.blue().bold());
            }
            Expression::Atom { ast_type, token_start, token_len, .. } => {
                let text = &source.contents[*token_start..*token_start + *token_len];
                let rendered = match ast_type {
                    AtomKind::Lexeme => text.green(),
                    AtomKind::Literal => text.yellow(),
                    AtomKind::Ident => text.magenta(),
                };
                println!("{indent}{rendered}");
            }
        }
    });
}

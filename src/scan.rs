//! A minimal scanner bridging raw source text to the token stream the
//! parser consumes (spec.md §6's external contract). Scanning proper is
//! explicitly out of this crate's scope (spec.md §1, "Scanning... remain
//! external collaborators") — this exists only so the CLI driver and the
//! integration tests have a token stream to hand the parser, without
//! reaching for a scanner crate neither example repo in this pack pulls in
//! for the purpose. It recognises the handful of lexical shapes the base
//! lang's rules and literals need: words, decimal integers and floats,
//! `true`/`false` as `Bool` literals, double-quoted strings, and runs of
//! punctuation left for stage 2 of the parser to split into symbols.

use crate::construct::token::{Token, TokenKind, Tokens};

pub fn scan(source: &str) -> Tokens {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = source[i..].chars().next().unwrap();
        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }
        if c.is_ascii_digit() {
            i = scan_number(source, i, &mut tokens);
            continue;
        }
        if c.is_ascii_alphabetic() || c == '_' {
            i = scan_word(source, i, &mut tokens);
            continue;
        }
        if c == '"' {
            i = scan_string(source, i, &mut tokens);
            continue;
        }
        i = scan_symbols(source, i, &mut tokens);
    }

    tokens
}

fn scan_number(source: &str, start: usize, tokens: &mut Vec<Token>) -> usize {
    let bytes = source.as_bytes();
    let mut i = start;
    while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
        i += 1;
    }
    let mut kind = TokenKind::Int;
    if i < bytes.len() && bytes[i] as char == '.' && i + 1 < bytes.len() && (bytes[i + 1] as char).is_ascii_digit() {
        kind = TokenKind::Float;
        i += 1;
        while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
            i += 1;
        }
    }
    tokens.push(Token::new(kind, start, i - start));
    i
}

fn scan_word(source: &str, start: usize, tokens: &mut Vec<Token>) -> usize {
    let bytes = source.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        let ch = bytes[i] as char;
        if ch.is_ascii_alphanumeric() || ch == '_' {
            i += 1;
        } else {
            break;
        }
    }
    let text = &source[start..i];
    let kind = if text == "true" || text == "false" { TokenKind::Bool } else { TokenKind::Word };
    tokens.push(Token::new(kind, start, i - start));
    i
}

fn scan_string(source: &str, start: usize, tokens: &mut Vec<Token>) -> usize {
    let bytes = source.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() && bytes[i] as char != '"' {
        if bytes[i] as char == '\\' && i + 1 < bytes.len() {
            i += 1;
        }
        i += 1;
    }
    if i < bytes.len() {
        i += 1; // closing quote
    }
    tokens.push(Token::new(TokenKind::String, start, i - start));
    i
}

fn scan_symbols(source: &str, start: usize, tokens: &mut Vec<Token>) -> usize {
    let mut i = start;
    while i < source.len() {
        let ch = source[i..].chars().next().unwrap();
        if ch.is_whitespace() || ch.is_ascii_alphanumeric() || ch == '_' || ch == '"' {
            break;
        }
        i += ch.len_utf8();
    }
    if i == start {
        // a lone byte the loop above refused to classify any other way;
        // consume it as a one-character symbol run rather than looping.
        i += source[start..].chars().next().unwrap().len_utf8();
    }
    tokens.push(Token::new(TokenKind::Symbols, start, i - start));
    i
}

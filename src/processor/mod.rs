//! The functional core: tokenize, clean, parse.
//!
//! Each stage consumes an immutable value and hands the next one a fresh
//! one. The first diagnostic aborts the whole run.
pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod script_parser;

pub use ast::Document;
pub use diagnostics::ParseError;

use lexer::Token;
use log::debug;

/// Raw text to the clean token sequence the parser expects.
pub fn lex(source: &str) -> Vec<Token> {
    let raw = lexer::tokenize(source);
    debug!("tokenized {} bytes into {} raw tokens", source.len(), raw.len());
    let tokens = lexer::clean(raw);
    debug!("{} tokens after cleanup", tokens.len());
    tokens
}

/// Runs every stage and returns the finished document.
pub fn run(source: &str) -> Result<Document, ParseError> {
    let tokens = lex(source);
    script_parser::parse(&tokens)
}

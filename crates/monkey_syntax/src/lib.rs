#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;
mod utils;

pub mod ast;
pub mod token;

pub use lexer::Lexer;
pub use parser::{ParseError, ParseResult, Parser};

use ast::Program;
use token::Token;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

/// Lexes a whole source, excluding the final `Eof` token.
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    Parser::new(Lexer::new(source)).parse()
}

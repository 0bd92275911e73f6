
mod expr;

use monkey_diagnostic::span::Span;
use monkey_diagnostic::{Diagnostic, IntoDiagnostic, Snippet};

use crate::ast::*;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

#[derive(thiserror::Error, serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    #[error("no prefix parse function for {kind}")]
    NoPrefixParseFn { kind: TokenKind, span: Span },

    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String, span: Span },

    #[error("expression nested too deeply")]
    TooDeep { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::NoPrefixParseFn { span, .. }
            | ParseError::InvalidInteger { span, .. }
            | ParseError::TooDeep { span } => *span,
        }
    }

    fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. } => {
                format!("expected {} here", expected.token_name())
            }
            ParseError::NoPrefixParseFn { kind, .. } => {
                format!("{} cannot start an expression", kind.token_name())
            }
            ParseError::InvalidInteger { .. } => "integer does not fit in 64 bits".to_owned(),
            ParseError::TooDeep { .. } => {
                format!("more than {MAX_DEPTH} levels of nesting")
            }
        }
    }
}

impl IntoDiagnostic for ParseError {
    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error()
            .with_snippet(Snippet::primary(self.label(), self.span()))
            .with_message(self.to_string())
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Nesting limit for syntax trees. Every expression, every block and every
/// folded infix operator counts as one level.
const MAX_DEPTH: usize = 256;

/// Where error recovery left the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resync {
    /// On the last token of the failed statement.
    NextStatement,
    /// On the `}` closing the enclosing block.
    BlockEnd,
}

/// Recursive-descent statement parser driving a Pratt expression parser.
///
/// The parser looks at exactly two tokens: `current`, the token being
/// parsed, and `peek`, the one after it. Errors are collected rather than
/// returned, so a single pass reports every independent problem.
///
/// Input nested past a fixed depth is reported as [`ParseError::TooDeep`]
/// rather than built, so every tree it returns is shallow enough to walk
/// recursively.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    errors: Vec<ParseError>,
    depth: usize,

    current: Token,
    peek: Token,
}

impl<'src> Parser<'src> {
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        Self {
            lexer,
            errors: vec![],
            depth: 0,

            current,
            peek,
        }
    }

    pub fn parse(mut self) -> (Program, Vec<ParseError>) {
        let program = self.parse_program();
        (program, self.errors)
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while !self.current.is(TokenKind::Eof) {
            // a stray `}` at the top level is just skipped
            if let Ok(statement) = self.parse_statement_or_recover() {
                statements.push(statement);
            }
            self.next_token();
        }

        Program { statements }
    }

    fn parse_statement_or_recover(&mut self) -> Result<Stmt, Resync> {
        self.parse_or_recover(Self::parse_statement, Self::synchronize)
    }

    // leaves `current` on the last token of the statement
    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> ParseResult<Stmt> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = Ident::new(self.current.clone());

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expr()?;
        self.eat_peek(TokenKind::Semicolon);

        Ok(Stmt::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> ParseResult<Stmt> {
        let token = self.current.clone();
        self.next_token();

        let value = self.parse_expr()?;
        self.eat_peek(TokenKind::Semicolon);

        Ok(Stmt::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Stmt> {
        let token = self.current.clone();

        let expr = self.parse_expr()?;
        self.eat_peek(TokenKind::Semicolon);

        Ok(Stmt::Expr { token, expr })
    }

    /// Parses `{ ... }` starting on the `{`, leaving `current` on the `}`.
    fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(Self::parse_block_inner)
    }

    fn parse_block_inner(&mut self) -> ParseResult<Block> {
        let token = self.current.clone();
        self.next_token();

        let mut statements = vec![];
        while !self.current.is(TokenKind::RBrace) {
            if self.current.is(TokenKind::Eof) {
                return Err(self.error_expected(TokenKind::RBrace, &self.current));
            }

            match self.parse_statement_or_recover() {
                Ok(statement) => statements.push(statement),
                Err(Resync::BlockEnd) => break,
                Err(Resync::NextStatement) => {}
            }

            self.next_token();
        }

        Ok(Block { token, statements })
    }

    /// Runs `parse` one level deeper, restoring the depth afterwards whether
    /// or not it succeeded.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let depth = self.depth;
        let result = self.descend().and_then(|()| parse(self));
        self.depth = depth;
        result
    }

    fn descend(&mut self) -> ParseResult<()> {
        self.depth += 1;

        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                span: self.current.span,
            });
        }

        Ok(())
    }

    fn parse_or_recover<T, R>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
        recover: impl FnOnce(&mut Self) -> R,
    ) -> Result<T, R> {
        parse(self).map_err(|err| {
            self.report(err);
            recover(self)
        })
    }

    /// Skips the rest of a failed statement.
    ///
    /// Stops with `current` on the terminating `;`, on a `}` that closes the
    /// enclosing block, or just before such a `}`, so that the caller's usual
    /// advance lands on the next statement.
    fn synchronize(&mut self) -> Resync {
        let mut brace_depth = 0usize;

        loop {
            match self.current.kind {
                TokenKind::Eof => return Resync::NextStatement,
                TokenKind::Semicolon if brace_depth == 0 => return Resync::NextStatement,
                TokenKind::RBrace if brace_depth == 0 => return Resync::BlockEnd,
                TokenKind::LBrace => brace_depth += 1,
                TokenKind::RBrace => brace_depth -= 1,
                _ => {}
            }

            if (brace_depth == 0 && self.peek.is(TokenKind::RBrace))
                || self.peek.is(TokenKind::Eof)
            {
                return Resync::NextStatement;
            }

            self.next_token();
        }
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Advances only if the next token is of the given kind.
    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek.is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(self.error_expected(kind, &self.peek))
        }
    }

    fn eat_peek(&mut self, kind: TokenKind) -> bool {
        let matches = self.peek.is(kind);
        if matches {
            self.next_token();
        }
        matches
    }

    fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    fn error_expected(&self, expected: TokenKind, found: &Token) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: found.kind,
            span: found.span,
        }
    }
}

use super::{ParseError, ParseResult, Parser};
use crate::ast::*;
use crate::token::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Prec {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

type PrefixParseFn<'src> = fn(&mut Parser<'src>) -> ParseResult<Expr>;
type InfixParseFn<'src> = fn(&mut Parser<'src>, Expr) -> ParseResult<Expr>;

fn prefix_op(kind: TokenKind) -> Option<PrefixOp> {
    match kind {
        TokenKind::Bang => Some(PrefixOp::Bang),
        TokenKind::Minus => Some(PrefixOp::Negate),
        _ => None,
    }
}

fn infix_op(kind: TokenKind) -> Option<InfixOp> {
    match kind {
        TokenKind::Plus => Some(InfixOp::Add),
        TokenKind::Minus => Some(InfixOp::Sub),
        TokenKind::Asterisk => Some(InfixOp::Mul),
        TokenKind::Slash => Some(InfixOp::Div),
        TokenKind::Lt => Some(InfixOp::Lt),
        TokenKind::Gt => Some(InfixOp::Gt),
        TokenKind::Eq => Some(InfixOp::Eq),
        TokenKind::NotEq => Some(InfixOp::NotEq),
        _ => None,
    }
}

impl<'src> Parser<'src> {
    fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixParseFn<'src>> {
        let parse: PrefixParseFn<'src> = match kind {
            TokenKind::Ident => Self::parse_identifier,
            TokenKind::Int => Self::parse_integer,
            TokenKind::True | TokenKind::False => Self::parse_boolean,
            TokenKind::Bang | TokenKind::Minus => Self::parse_prefix,
            TokenKind::LParen => Self::parse_grouped,
            TokenKind::If => Self::parse_if,
            TokenKind::Function => Self::parse_function,
            _ => return None,
        };

        Some(parse)
    }

    fn infix_parse_fn(kind: TokenKind) -> Option<(Prec, InfixParseFn<'src>)> {
        let entry: (Prec, InfixParseFn<'src>) = match kind {
            TokenKind::Eq | TokenKind::NotEq => (Prec::Equals, Self::parse_infix),
            TokenKind::Lt | TokenKind::Gt => (Prec::LessGreater, Self::parse_infix),
            TokenKind::Plus | TokenKind::Minus => (Prec::Sum, Self::parse_infix),
            TokenKind::Asterisk | TokenKind::Slash => (Prec::Product, Self::parse_infix),
            TokenKind::LParen => (Prec::Call, Self::parse_call),
            _ => return None,
        };

        Some(entry)
    }

    fn precedence_of(kind: TokenKind) -> Prec {
        Self::infix_parse_fn(kind).map_or(Prec::Lowest, |(prec, _)| prec)
    }

    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_prec(Prec::Lowest)
    }

    /// Parses an expression starting on `current`, folding in infix
    /// operators that bind tighter than `prec`. Leaves `current` on the last
    /// token of the expression.
    fn parse_prec(&mut self, prec: Prec) -> ParseResult<Expr> {
        self.nested(|this| this.parse_prec_inner(prec))
    }

    fn parse_prec_inner(&mut self, prec: Prec) -> ParseResult<Expr> {
        let Some(prefix) = Self::prefix_parse_fn(self.current.kind) else {
            return Err(ParseError::NoPrefixParseFn {
                kind: self.current.kind,
                span: self.current.span,
            });
        };

        let mut expr = prefix(self)?;

        while !self.peek.is(TokenKind::Semicolon) {
            let Some((op_prec, infix)) = Self::infix_parse_fn(self.peek.kind) else {
                break;
            };

            // equal precedence stops here, so operators associate to the left
            if op_prec <= prec {
                break;
            }

            self.next_token();

            // a left-associative chain grows the tree one level per operator
            self.descend()?;
            expr = infix(self, expr)?;
        }

        Ok(expr)
    }

    fn parse_identifier(&mut self) -> ParseResult<Expr> {
        let ident = Ident::new(self.current.clone());
        Ok(Expr::new(ExprKind::Ident(ident), self.current.clone()))
    }

    fn parse_integer(&mut self) -> ParseResult<Expr> {
        let token = self.current.clone();

        let n = token
            .literal
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger {
                literal: token.literal.clone(),
                span: token.span,
            })?;

        Ok(Expr::new(ExprKind::Integer(n), token))
    }

    fn parse_boolean(&mut self) -> ParseResult<Expr> {
        let value = self.current.is(TokenKind::True);
        Ok(Expr::new(ExprKind::Bool(value), self.current.clone()))
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let token = self.current.clone();
        let op = prefix_op(token.kind).ok_or(ParseError::NoPrefixParseFn {
            kind: token.kind,
            span: token.span,
        })?;

        self.next_token();
        let operand = self.parse_prec(Prec::Prefix)?;

        Ok(Expr::new(
            ExprKind::Prefix {
                op,
                operand: Box::new(operand),
            },
            token,
        ))
    }

    fn parse_grouped(&mut self) -> ParseResult<Expr> {
        self.next_token();

        let expr = self.parse_expr()?;
        self.expect_peek(TokenKind::RParen)?;

        Ok(expr)
    }

    fn parse_if(&mut self) -> ParseResult<Expr> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expr()?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block()?;

        let alternative = if self.eat_peek(TokenKind::Else) {
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Expr::new(
            ExprKind::If {
                condition: Box::new(condition),
                consequence,
                alternative,
            },
            token,
        ))
    }

    fn parse_function(&mut self) -> ParseResult<Expr> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_parameters()?;

        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Ok(Expr::new(ExprKind::Function { parameters, body }, token))
    }

    fn parse_parameters(&mut self) -> ParseResult<Vec<Ident>> {
        let mut parameters = vec![];

        if self.eat_peek(TokenKind::RParen) {
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(Ident::new(self.current.clone()));

        while self.eat_peek(TokenKind::Comma) {
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(Ident::new(self.current.clone()));
        }

        self.expect_peek(TokenKind::RParen)?;

        Ok(parameters)
    }

    fn parse_infix(&mut self, lhs: Expr) -> ParseResult<Expr> {
        let token = self.current.clone();
        let op = infix_op(token.kind).ok_or(ParseError::NoPrefixParseFn {
            kind: token.kind,
            span: token.span,
        })?;

        let prec = Self::precedence_of(token.kind);
        self.next_token();
        let rhs = self.parse_prec(prec)?;

        Ok(Expr::new(
            ExprKind::Infix {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            token,
        ))
    }

    fn parse_call(&mut self, function: Expr) -> ParseResult<Expr> {
        let token = self.current.clone();
        let arguments = self.parse_arguments()?;

        Ok(Expr::new(
            ExprKind::Call {
                function: Box::new(function),
                arguments,
            },
            token,
        ))
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut arguments = vec![];

        if self.eat_peek(TokenKind::RParen) {
            return Ok(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expr()?);

        while self.eat_peek(TokenKind::Comma) {
            self.next_token();
            arguments.push(self.parse_expr()?);
        }

        self.expect_peek(TokenKind::RParen)?;

        Ok(arguments)
    }
}

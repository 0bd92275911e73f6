use std::fmt;

use crate::token::Token;
use crate::{Node, NodeCopy};

/// Common accessors for syntax tree nodes.
pub trait AstNode: fmt::Display {
    /// The token that introduced this node.
    fn token(&self) -> &Token;

    fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

#[derive(Node!, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", |statement| statement.token_literal())
    }
}

#[derive(Node!)]
pub enum Stmt {
    Let {
        token: Token,
        name: Ident,
        value: Expr,
    },
    Return {
        token: Token,
        value: Expr,
    },
    Expr {
        token: Token,
        expr: Expr,
    },
}

/// A braced statement list, the body of an `if` branch or a function literal.
#[derive(Node!)]
pub struct Block {
    /// The opening `{`.
    pub token: Token,
    pub statements: Vec<Stmt>,
}

#[derive(Node!)]
pub struct Ident {
    pub token: Token,
    pub value: String,
}

impl Ident {
    pub fn new(token: Token) -> Self {
        let value = token.literal.clone();
        Self { token, value }
    }
}

#[derive(Node!)]
pub struct Expr {
    pub token: Token,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind, token: Token) -> Self {
        Self { token, kind }
    }
}

#[derive(Node!)]
pub enum ExprKind {
    Ident(Ident),
    Integer(i64),
    Bool(bool),

    Prefix {
        op: PrefixOp,
        operand: Box<Expr>,
    },

    Infix {
        op: InfixOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },

    Function {
        parameters: Vec<Ident>,
        body: Block,
    },

    Call {
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

#[derive(NodeCopy!)]
pub enum PrefixOp {
    Bang,
    Negate,
}

impl PrefixOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOp::Bang => "!",
            PrefixOp::Negate => "-",
        }
    }
}

#[derive(NodeCopy!)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Gt,
    Eq,
    NotEq,
}

impl InfixOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        }
    }
}

impl AstNode for Stmt {
    fn token(&self) -> &Token {
        match self {
            Stmt::Let { token, .. } | Stmt::Return { token, .. } | Stmt::Expr { token, .. } => {
                token
            }
        }
    }
}

impl AstNode for Block {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl AstNode for Ident {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl AstNode for Expr {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.statements.iter().try_for_each(|stmt| write!(f, "{stmt}"))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value, .. } => write!(f, "let {name} = {value};"),
            Stmt::Return { value, .. } => write!(f, "return {value};"),
            Stmt::Expr { expr, .. } => write!(f, "{expr}"),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for stmt in &self.statements {
            write!(f, " {stmt}")?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Ident(ident) => write!(f, "{ident}"),
            ExprKind::Integer(n) => write!(f, "{n}"),
            ExprKind::Bool(b) => write!(f, "{b}"),

            ExprKind::Prefix { op, operand } => write!(f, "({}{operand})", op.as_str()),
            ExprKind::Infix { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.as_str()),

            ExprKind::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            }

            ExprKind::Function { parameters, body } => {
                write!(f, "fn(")?;
                write_comma_separated(f, parameters)?;
                write!(f, ") {body}")
            }

            ExprKind::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_comma_separated(f, arguments)?;
                write!(f, ")")
            }
        }
    }
}

fn write_comma_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

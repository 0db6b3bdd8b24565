//! AST (Abstract Syntax Tree) definitions for the front end.
//!
//! Three disjoint sums — [`Decl`], [`Stmt`], [`Expr`] — with every child
//! edge exclusively owned (`Box`/`Vec`) and absent children encoded as
//! `Option`, never as sentinel nodes. Dropping a root releases its whole
//! subtree.

use super::token::Token;

/// A top-level or block-level declaration.
///
/// Statements satisfy the declaration slot because blocks accept either.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    Fun {
        name: Token,
        params: Vec<Token>,
        /// Always a [`Stmt::Block`]; the parser constructs it directly from
        /// the function body braces.
        body: Box<Stmt>,
    },
    Stmt(Stmt),
}

/// One arm of a `switch`. `value` is `None` for the `default` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub value: Option<Expr>,
    pub body: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Expression statement. `expr` is `None` for the empty statement `;`,
    /// which consumers must tolerate.
    Expr {
        expr: Option<Expr>,
    },
    Print {
        expr: Option<Expr>,
    },
    Return {
        value: Option<Expr>,
    },
    Break,
    Continue,
    Block {
        items: Vec<Decl>,
    },
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    For {
        init: Option<Box<Decl>>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    Switch {
        cond: Expr,
        cases: Vec<SwitchCase>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal, `true`/`false`/`nil`, or an identifier.
    Primary {
        value: Token,
    },
    /// A parenthesized expression.
    Grouping {
        inner: Box<Expr>,
    },
    Unary {
        op: Token,
        right: Box<Expr>,
    },
    /// Arithmetic, bitwise, comparison, equality and shift operators.
    /// Never `&&` or `||` — those build [`Expr::Logical`].
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    /// Exclusively `&&` and `||`.
    Logical {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    /// `target` is an identifier primary or a postfix chain; anything else
    /// is reported as an error but the node is still constructed.
    Assignment {
        target: Box<Expr>,
        op: Token,
        value: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// A base expression with one or more postfix tails in source order,
    /// e.g. `a(b)[c].d++`.
    Postfix {
        base: Box<Expr>,
        tails: Vec<PostfixTail>,
    },
}

/// One unit of a postfix chain: the operator token plus its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PostfixTail {
    pub op: Token,
    pub payload: TailPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TailPayload {
    /// `( args )` — arguments parse at assignment level.
    Call(Vec<Expr>),
    /// `[ index ]`
    Index(Box<Expr>),
    /// `. member` — the member name wrapped as an identifier primary.
    Member(Box<Expr>),
    /// `++` / `--` — no payload.
    Step,
}

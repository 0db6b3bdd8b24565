//! Main parser coordinator.
//!
//! This module provides the [`Parser`] struct and its core infrastructure:
//! the token cursor, the [`ParseError`] diagnostic, and panic-mode
//! recovery. The grammar rules are split across sibling modules using
//! `impl Parser` blocks:
//! - `declarations`: `var`/`fun` declarations and the declaration loop
//! - `statements`: statement dispatch and the individual statement forms
//! - `expressions`: the precedence ladder, postfix chains and primaries
//!
//! # Error recovery
//!
//! A rule that cannot make progress returns `Err(ParseError)`; `?`
//! propagates the signal up to [`Parser::declaration`], which records
//! nothing for the failed declaration, calls [`Parser::synchronize`] to
//! skip to a statement boundary, and resumes. The diagnostics themselves
//! are collected when the error value is created, so dropping the signal
//! never loses a message.

use super::ast::Decl;
use super::token::{Token, TokenKind};
use std::fmt;

/// Parser error type.
///
/// Doubles as the panic-mode unwind signal: raising one aborts the
/// enclosing declaration. The fields describe the token the parser was
/// looking at.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub lexeme: String,
    pub at_end: bool,
}

impl ParseError {
    fn new(token: &Token, message: &str) -> Self {
        Self {
            message: message.to_string(),
            line: token.line,
            lexeme: token.lexeme.clone(),
            at_end: token.kind == TokenKind::Eof,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.at_end {
            write!(f, "[Line {}] Error at end: {}", self.line, self.message)
        } else {
            write!(
                f,
                "[Line {}] Error at '{}': {}",
                self.line, self.lexeme, self.message
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser over a lexed token sequence.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    /// The token sequence must be terminated by an `END_OF_FILE` token,
    /// which the lexer guarantees.
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(
            tokens.last().map(|t| t.kind) == Some(TokenKind::Eof),
            "token stream must end with END_OF_FILE"
        );
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the whole program: declarations until end of file.
    ///
    /// Declarations that fail to parse are dropped from the output; the
    /// recorded diagnostics and [`Parser::had_error`] tell the caller the
    /// AST may be shorter than the source suggests.
    pub fn parse(&mut self) -> Vec<Decl> {
        let mut declarations = Vec::new();

        while !self.is_at_end() {
            if let Some(decl) = self.declaration() {
                declarations.push(decl);
            }
        }

        declarations
    }

    /// Sticky error flag: true once any parse error has been reported.
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    // ===== Cursor helpers =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// Consume the current token. The cursor never moves past the
    /// `END_OF_FILE` token.
    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().kind == kind
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it has any of the given kinds.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    pub(crate) fn consume(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(self.error(self.peek().clone(), message))
    }

    /// Record a diagnostic and build the unwind signal for it.
    ///
    /// Callers either `return Err(..)` the signal to abandon the current
    /// declaration, or drop it to keep parsing (invalid assignment
    /// targets).
    pub(crate) fn error(&mut self, token: Token, message: &str) -> ParseError {
        let err = ParseError::new(&token, message);
        self.errors.push(err.clone());
        err
    }

    /// Skip tokens until a likely statement boundary: just past a `;`, or
    /// just before a keyword that starts a new declaration or statement.
    pub(crate) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenKind::Var
                | TokenKind::Fun
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Switch
                | TokenKind::Return => return,
                _ => {}
            }

            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::ast::{Decl, Expr, Stmt};
    use super::super::lexer::Lexer;
    use super::super::token::{Literal, TokenKind};
    use super::*;

    fn parse(source: &str) -> (Vec<Decl>, Vec<ParseError>) {
        let (tokens, lex_errors) = Lexer::new(source).scan_tokens();
        assert!(lex_errors.is_empty(), "unexpected lex errors: {:?}", lex_errors);
        let mut parser = Parser::new(tokens);
        let ast = parser.parse();
        (ast, parser.errors().to_vec())
    }

    fn parse_ok(source: &str) -> Vec<Decl> {
        let (ast, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
        ast
    }

    fn number(expr: &Expr) -> f64 {
        match expr {
            Expr::Primary { value } => match value.literal {
                Some(Literal::Number(n)) => n,
                _ => panic!("expected number primary, got {:?}", expr),
            },
            _ => panic!("expected primary, got {:?}", expr),
        }
    }

    #[test]
    fn test_var_declaration_with_precedence() {
        // var x = 1 + 2 * 3;  →  Binary(1, +, Binary(2, *, 3))
        let ast = parse_ok("var x = 1 + 2 * 3;");
        assert_eq!(ast.len(), 1);

        let (name, initializer) = match &ast[0] {
            Decl::Var { name, initializer } => (name, initializer),
            other => panic!("expected var declaration, got {:?}", other),
        };
        assert_eq!(name.lexeme, "x");

        let (left, op, right) = match initializer.as_ref().unwrap() {
            Expr::Binary { left, op, right } => (left, op, right),
            other => panic!("expected binary initializer, got {:?}", other),
        };
        assert_eq!(op.kind, TokenKind::Plus);
        assert_eq!(number(left), 1.0);
        match right.as_ref() {
            Expr::Binary { left, op, right } => {
                assert_eq!(op.kind, TokenKind::Star);
                assert_eq!(number(left), 2.0);
                assert_eq!(number(right), 3.0);
            }
            other => panic!("expected nested binary, got {:?}", other),
        }
    }

    #[test]
    fn test_fun_declaration() {
        let ast = parse_ok("fun f(a,b){ return a+b; }");
        assert_eq!(ast.len(), 1);

        let (name, params, body) = match &ast[0] {
            Decl::Fun { name, params, body } => (name, params, body),
            other => panic!("expected fun declaration, got {:?}", other),
        };
        assert_eq!(name.lexeme, "f");
        let param_names: Vec<&str> = params.iter().map(|p| p.lexeme.as_str()).collect();
        assert_eq!(param_names, vec!["a", "b"]);

        let items = match body.as_ref() {
            Stmt::Block { items } => items,
            other => panic!("expected block body, got {:?}", other),
        };
        assert_eq!(items.len(), 1);
        match &items[0] {
            Decl::Stmt(Stmt::Return { value: Some(Expr::Binary { op, .. }) }) => {
                assert_eq!(op.kind, TokenKind::Plus);
            }
            other => panic!("expected return of a binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_if_statement() {
        let ast = parse_ok("if (x > 0) print x; else print -x;");
        let (cond, then_branch, else_branch) = match &ast[0] {
            Decl::Stmt(Stmt::If {
                cond,
                then_branch,
                else_branch,
            }) => (cond, then_branch, else_branch),
            other => panic!("expected if statement, got {:?}", other),
        };

        match cond {
            Expr::Binary { op, .. } => assert_eq!(op.kind, TokenKind::Greater),
            other => panic!("expected binary condition, got {:?}", other),
        }
        assert!(matches!(then_branch.as_ref(), Stmt::Print { expr: Some(_) }));
        match else_branch.as_deref() {
            Some(Stmt::Print {
                expr: Some(Expr::Unary { op, .. }),
            }) => assert_eq!(op.kind, TokenKind::Minus),
            other => panic!("expected print of a unary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_chained_assignment_is_right_associative() {
        // a = b = c;  →  Assignment(a, =, Assignment(b, =, c))
        let ast = parse_ok("a = b = c;");
        let expr = match &ast[0] {
            Decl::Stmt(Stmt::Expr { expr: Some(expr) }) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        };

        let (target, value) = match expr {
            Expr::Assignment { target, op, value } => {
                assert_eq!(op.kind, TokenKind::Equal);
                (target, value)
            }
            other => panic!("expected assignment, got {:?}", other),
        };
        assert!(matches!(
            target.as_ref(),
            Expr::Primary { value } if value.lexeme == "a"
        ));
        assert!(matches!(value.as_ref(), Expr::Assignment { .. }));
    }

    #[test]
    fn test_empty_statement() {
        let ast = parse_ok(";");
        assert!(matches!(&ast[0], Decl::Stmt(Stmt::Expr { expr: None })));
    }

    #[test]
    fn test_error_sets_flag_and_drops_declaration() {
        // 1 + ;  →  "Expect expression." at ';', empty output, flag set.
        let (ast, errors) = parse("1 + ;");
        assert!(ast.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expect expression.");
        assert_eq!(errors[0].to_string(), "[Line 1] Error at ';': Expect expression.");
    }

    #[test]
    fn test_error_at_end_of_file() {
        let (_, errors) = parse("var x = ");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[Line 1] Error at end: Expect expression.");
    }

    #[test]
    fn test_recovery_does_not_cascade() {
        // The malformed first declaration is dropped; the second parses.
        let (ast, errors) = parse("var = 1;\nvar y = 2;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expect variable name.");
        assert_eq!(ast.len(), 1);
        match &ast[0] {
            Decl::Var { name, .. } => assert_eq!(name.lexeme, "y"),
            other => panic!("expected var declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_recovery_at_declaration_keyword() {
        // The unclosed grouping dies at `y`; synchronize skips it and stops
        // just before the `var` keyword on the next line.
        let (ast, errors) = parse("var x = (1 y\nvar z = 2;");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Expect ')' after expression.");
        assert_eq!(ast.len(), 1);
        match &ast[0] {
            Decl::Var { name, .. } => assert_eq!(name.lexeme, "z"),
            other => panic!("expected var declaration, got {:?}", other),
        }
    }
}

//! Declaration parsing implementation.
//!
//! Grammar:
//!
//! ```text
//! declaration ::= var_decl | fun_decl | statement
//! var_decl    ::= "var" IDENTIFIER ( "=" expression )? ";"
//! fun_decl    ::= "fun" IDENTIFIER "(" parameters? ")" block
//! parameters  ::= IDENTIFIER ( "," IDENTIFIER )*
//! ```
//!
//! `declaration` is also the recovery boundary: a parse error anywhere in a
//! declaration unwinds to here, the failed declaration is dropped, and the
//! parser resynchronizes.

use crate::parser::ast::Decl;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

/// Parameter lists are capped; the 256th parameter is a parse error.
const MAX_PARAMETERS: usize = 255;

impl Parser {
    /// Parse one declaration, or recover and return `None` if it fails.
    pub(crate) fn declaration(&mut self) -> Option<Decl> {
        let result = if self.matches(TokenKind::Var) {
            self.var_declaration()
        } else if self.matches(TokenKind::Fun) {
            self.fun_declaration()
        } else {
            // Anything else is a statement; statements satisfy the
            // declaration slot.
            self.statement().map(Decl::Stmt)
        };

        match result {
            Ok(decl) => Some(decl),
            Err(_) => {
                self.synchronize();
                None
            }
        }
    }

    /// `var` has been consumed.
    pub(crate) fn var_declaration(&mut self) -> Result<Decl, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = if self.matches(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;

        Ok(Decl::Var { name, initializer })
    }

    /// `fun` has been consumed.
    pub(crate) fn fun_declaration(&mut self) -> Result<Decl, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect function name.")?;
        self.consume(TokenKind::LeftParen, "Expect '(' after function name.")?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_PARAMETERS {
                    return Err(self.error(
                        self.peek().clone(),
                        "Cannot have more than 255 parameters.",
                    ));
                }
                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.")?);
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before function body.")?;
        let body = self.block_statement()?;

        Ok(Decl::Fun {
            name,
            params,
            body: Box::new(body),
        })
    }
}

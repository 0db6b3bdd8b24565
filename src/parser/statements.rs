//! Statement parsing implementation.
//!
//! Grammar:
//!
//! ```text
//! statement ::= block | if_stmt | while_stmt | do_while_stmt | for_stmt
//!             | switch_stmt | break_stmt | continue_stmt | return_stmt
//!             | print_stmt | ";" | expr_stmt
//! ```
//!
//! All simple statements end with `;`. A lone `;` is an empty expression
//! statement.

use crate::parser::ast::{Decl, Stmt, SwitchCase};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::TokenKind;

impl Parser {
    /// Dispatch on the next token.
    pub(crate) fn statement(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().kind {
            TokenKind::LeftBrace => {
                self.advance();
                self.block_statement()
            }
            TokenKind::If => {
                self.advance();
                self.if_statement()
            }
            TokenKind::For => {
                self.advance();
                self.for_statement()
            }
            TokenKind::While => {
                self.advance();
                self.while_statement()
            }
            TokenKind::Do => {
                self.advance();
                self.do_while_statement()
            }
            TokenKind::Switch => {
                self.advance();
                self.switch_statement()
            }
            TokenKind::Break => {
                self.advance();
                self.consume(TokenKind::Semicolon, "Expect ';' after 'break'.")?;
                Ok(Stmt::Break)
            }
            TokenKind::Continue => {
                self.advance();
                self.consume(TokenKind::Semicolon, "Expect ';' after 'continue'.")?;
                Ok(Stmt::Continue)
            }
            TokenKind::Return => {
                self.advance();
                self.return_statement()
            }
            TokenKind::Print => {
                self.advance();
                self.print_statement()
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(Stmt::Expr { expr: None }) // empty statement
            }
            _ => self.expr_statement(),
        }
    }

    /// `{` has been consumed; parses declarations up to the closing `}`.
    ///
    /// Items that fail to parse are recovered inside [`Parser::declaration`]
    /// and simply omitted, so one bad statement does not lose the block.
    pub(crate) fn block_statement(&mut self) -> Result<Stmt, ParseError> {
        let mut items = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(decl) = self.declaration() {
                items.push(decl);
            }
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(Stmt::Block { items })
    }

    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = self.statement()?;
        let else_branch = if self.matches(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after while condition.")?;

        let body = self.statement()?;

        Ok(Stmt::While {
            cond,
            body: Box::new(body),
        })
    }

    fn do_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let body = self.statement()?;

        self.consume(TokenKind::While, "Expect 'while' after do body.")?;
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after do-while condition.")?;
        self.consume(TokenKind::Semicolon, "Expect ';' after do-while condition.")?;

        Ok(Stmt::DoWhile {
            body: Box::new(body),
            cond,
        })
    }

    /// Any of the three header clauses may be empty. The initializer is a
    /// `var` declaration or an expression statement; both consume their own
    /// trailing `;`.
    fn for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let init = if self.matches(TokenKind::Semicolon) {
            None
        } else if self.matches(TokenKind::Var) {
            Some(Box::new(self.var_declaration()?))
        } else {
            let expr = self.expression()?;
            self.consume(TokenKind::Semicolon, "Expect ';' after loop initializer.")?;
            Some(Box::new(Decl::Stmt(Stmt::Expr { expr: Some(expr) })))
        };

        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let step = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let body = self.statement()?;

        Ok(Stmt::For {
            init,
            cond,
            step,
            body: Box::new(body),
        })
    }

    /// Cases are kept in source order. Multiple `default` arms are accepted
    /// here; rejecting them is semantic analysis.
    fn switch_statement(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'switch'.")?;
        let cond = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after switch condition.")?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before switch body.")?;

        let mut cases = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            let value = if self.matches(TokenKind::Case) {
                let value = self.expression()?;
                self.consume(TokenKind::Colon, "Expect ':' after case value.")?;
                Some(value)
            } else if self.matches(TokenKind::Default) {
                self.consume(TokenKind::Colon, "Expect ':' after 'default'.")?;
                None
            } else {
                return Err(self.error(
                    self.peek().clone(),
                    "Expect 'case' or 'default' in switch body.",
                ));
            };

            // Case items run until the next case, default, or the closing
            // brace.
            let mut body = Vec::new();
            while !self.check(TokenKind::Case)
                && !self.check(TokenKind::Default)
                && !self.check(TokenKind::RightBrace)
                && !self.is_at_end()
            {
                if let Some(item) = self.declaration() {
                    body.push(item);
                }
            }

            cases.push(SwitchCase { value, body });
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after switch body.")?;

        Ok(Stmt::Switch { cond, cases })
    }

    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;

        Ok(Stmt::Return { value })
    }

    fn print_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;

        Ok(Stmt::Print { expr })
    }

    fn expr_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;

        Ok(Stmt::Expr { expr: Some(expr) })
    }
}

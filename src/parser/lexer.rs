//! Lexer (tokenizer) for the language.
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. The lexer never aborts: lexical errors are collected and
//! scanning continues, so a broken file still yields the best-effort token
//! stream the parser needs for its own recovery.

use super::token::{Literal, Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;

/// Lexer error type.
///
/// `line` is 1-based, `col` a 0-based byte offset within that line.
#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Line {}, Col {}] Error: {}",
            self.line, self.col, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Single-pass scanner over the source bytes.
///
/// `start` marks the first byte of the lexeme being scanned and `current`
/// the cursor. `line_start` is the byte offset of the first byte of the
/// current line; token columns are offsets from it.
pub struct Lexer<'a> {
    source: &'a str,
    keywords: FxHashMap<&'static str, TokenKind>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    start: usize,
    current: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            keywords: keyword_table(),
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Tokenize the entire input.
    ///
    /// Always returns a token sequence terminated by exactly one
    /// `END_OF_FILE` token, along with every lexical error encountered.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<LexError>) {
        while !self.is_at_end() {
            self.scan_token();
        }

        let col = self.current.saturating_sub(self.line_start);
        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            None,
            self.line,
            col,
            col,
        ));

        (self.tokens, self.errors)
    }

    fn scan_token(&mut self) {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return;
        }

        let c = self.advance();

        if is_alpha(c) {
            self.scan_identifier();
        } else if is_digit(c) {
            self.scan_number();
        } else {
            match c {
                b'"' => self.scan_string(),
                b'(' | b')' | b'{' | b'}' | b'[' | b']' | b',' | b'.' | b';' | b':' | b'?'
                | b'+' | b'-' | b'*' | b'/' | b'%' | b'!' | b'=' | b'>' | b'<' | b'&' | b'|'
                | b'^' | b'~' => self.scan_operator_or_symbol(c),
                _ => {
                    self.error_at_start(format!("Unexpected character: '{}'.", c as char));
                }
            }
        }
    }

    fn scan_identifier(&mut self) {
        while is_alpha_numeric(self.peek()) {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        let kind = self
            .keywords
            .get(text)
            .copied()
            .unwrap_or(TokenKind::Identifier);

        let literal = match kind {
            TokenKind::True => Some(Literal::Bool(true)),
            TokenKind::False => Some(Literal::Bool(false)),
            _ => None,
        };

        self.add_token_literal(kind, literal);
    }

    fn scan_number(&mut self) {
        while is_digit(self.peek()) {
            self.advance();
        }

        // Fractional part only when a digit follows the dot: `1.` is a
        // NUMBER token followed by a DOT token.
        if self.peek() == b'.' && is_digit(self.peek_next()) {
            self.advance();
            while is_digit(self.peek()) {
                self.advance();
            }
        }

        if self.peek() == b'e' || self.peek() == b'E' {
            self.advance();
            if self.peek() == b'+' || self.peek() == b'-' {
                self.advance();
            }
            if !is_digit(self.peek()) {
                self.error_at_start("Expected digit after exponent marker.".to_string());
            }
            while is_digit(self.peek()) {
                self.advance();
            }
        }

        // A NUMBER token is emitted even when the lexeme does not parse
        // (malformed exponent); the literal is simply absent.
        let literal = self.source[self.start..self.current]
            .parse::<f64>()
            .ok()
            .map(Literal::Number);
        self.add_token_literal(TokenKind::Number, literal);
    }

    fn scan_string(&mut self) {
        let open_line = self.line;
        let open_col = self.start.saturating_sub(self.line_start);

        // No escape sequences: a backslash is an ordinary string byte.
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
                self.line_start = self.current + 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.report(open_line, open_col, "Unterminated string literal.".to_string());
            return;
        }

        self.advance(); // closing quote

        let value = self.source[self.start + 1..self.current - 1].to_string();
        self.add_token_literal(TokenKind::String, Some(Literal::Str(value)));
    }

    fn scan_operator_or_symbol(&mut self, first: u8) {
        let kind = match first {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'?' => TokenKind::Question,
            b'~' => TokenKind::Tilde,

            b'+' => {
                if self.match_byte(b'=') {
                    TokenKind::PlusEqual
                } else if self.match_byte(b'+') {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                }
            }
            b'-' => {
                if self.match_byte(b'=') {
                    TokenKind::MinusEqual
                } else if self.match_byte(b'-') {
                    TokenKind::MinusMinus
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => {
                if self.match_byte(b'=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }
            b'/' => {
                if self.match_byte(b'=') {
                    TokenKind::SlashEqual
                } else {
                    TokenKind::Slash
                }
            }
            b'%' => {
                if self.match_byte(b'=') {
                    TokenKind::PercentEqual
                } else {
                    TokenKind::Percent
                }
            }
            b'!' => {
                if self.match_byte(b'=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                }
            }
            b'=' => {
                if self.match_byte(b'=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            b'<' => {
                if self.match_byte(b'=') {
                    TokenKind::LessEqual
                } else if self.match_byte(b'<') {
                    if self.match_byte(b'=') {
                        TokenKind::ShiftLeftEqual
                    } else {
                        TokenKind::ShiftLeft
                    }
                } else {
                    TokenKind::Less
                }
            }
            b'>' => {
                if self.match_byte(b'=') {
                    TokenKind::GreaterEqual
                } else if self.match_byte(b'>') {
                    if self.match_byte(b'=') {
                        TokenKind::ShiftRightEqual
                    } else {
                        TokenKind::ShiftRight
                    }
                } else {
                    TokenKind::Greater
                }
            }
            b'&' => {
                if self.match_byte(b'=') {
                    TokenKind::AmpEqual
                } else if self.match_byte(b'&') {
                    TokenKind::AmpAmp
                } else {
                    TokenKind::Amp
                }
            }
            b'|' => {
                if self.match_byte(b'=') {
                    TokenKind::PipeEqual
                } else if self.match_byte(b'|') {
                    TokenKind::PipePipe
                } else {
                    TokenKind::Pipe
                }
            }
            b'^' => {
                if self.match_byte(b'=') {
                    TokenKind::CaretEqual
                } else {
                    TokenKind::Caret
                }
            }
            _ => unreachable!("scan_operator_or_symbol called on non-operator byte"),
        };

        self.add_token(kind);
    }

    /// Skip whitespace and comments.
    ///
    /// Newlines inside block comments bump the line counter like any other
    /// newline. Block comments do not nest.
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\r' | b'\t' => {
                    self.advance();
                }
                b'\n' => {
                    self.line += 1;
                    self.line_start = self.current + 1;
                    self.advance();
                }
                b'/' => {
                    if self.peek_next() == b'/' {
                        while self.peek() != b'\n' && !self.is_at_end() {
                            self.advance();
                        }
                    } else if self.peek_next() == b'*' {
                        self.skip_block_comment();
                    } else {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let open_line = self.line;
        let open_col = self.current.saturating_sub(self.line_start);
        self.advance(); // '/'
        self.advance(); // '*'

        while !(self.peek() == b'*' && self.peek_next() == b'/') && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
                self.line_start = self.current + 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.report(open_line, open_col, "Unterminated block comment.".to_string());
        } else {
            self.advance(); // '*'
            self.advance(); // '/'
        }
    }

    // ===== Cursor helpers =====

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> u8 {
        let c = self.source.as_bytes()[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            return 0;
        }
        self.source.as_bytes()[self.current]
    }

    fn peek_next(&self) -> u8 {
        if self.current + 1 >= self.source.len() {
            return 0;
        }
        self.source.as_bytes()[self.current + 1]
    }

    fn match_byte(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.source.as_bytes()[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    // ===== Token creation =====

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_literal(kind, None);
    }

    fn add_token_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme = self.source[self.start..self.current].to_string();
        // saturating: a string literal spanning lines starts before the
        // current line_start; its columns clamp at 0.
        let col_start = self.start.saturating_sub(self.line_start);
        let col_end = self.current.saturating_sub(self.line_start);
        self.tokens
            .push(Token::new(kind, lexeme, literal, self.line, col_start, col_end));
    }

    // ===== Error reporting =====

    fn report(&mut self, line: usize, col: usize, message: String) {
        self.errors.push(LexError { message, line, col });
    }

    fn error_at_start(&mut self, message: String) {
        let col = self.start.saturating_sub(self.line_start);
        self.report(self.line, col, message);
    }
}

fn keyword_table() -> FxHashMap<&'static str, TokenKind> {
    let mut keywords = FxHashMap::default();
    keywords.insert("var", TokenKind::Var);
    keywords.insert("fun", TokenKind::Fun);
    keywords.insert("return", TokenKind::Return);
    keywords.insert("if", TokenKind::If);
    keywords.insert("else", TokenKind::Else);
    keywords.insert("for", TokenKind::For);
    keywords.insert("while", TokenKind::While);
    keywords.insert("do", TokenKind::Do);
    keywords.insert("switch", TokenKind::Switch);
    keywords.insert("case", TokenKind::Case);
    keywords.insert("default", TokenKind::Default);
    keywords.insert("break", TokenKind::Break);
    keywords.insert("continue", TokenKind::Continue);
    keywords.insert("true", TokenKind::True);
    keywords.insert("false", TokenKind::False);
    keywords.insert("nil", TokenKind::Nil);
    keywords.insert("print", TokenKind::Print);
    keywords
}

fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_alpha_numeric(c: u8) -> bool {
    is_alpha(c) || is_digit(c)
}

//! # Introduction
//!
//! astdot parses a small C-family scripting language and renders the
//! resulting abstract syntax tree as a Graphviz DOT graph for visual
//! inspection.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → DotPrinter → DOT text
//! ```
//!
//! 1. [`parser::lexer`] — tokenises the source; lexical errors are
//!    collected and scanning continues.
//! 2. [`parser::parse`] — recursive-descent parser with panic-mode
//!    recovery; a broken declaration is dropped and parsing resumes at the
//!    next statement boundary.
//! 3. [`parser::ast`] / [`parser::visitor`] — the tree and its traversal
//!    surface; consumers implement one handler per node kind.
//! 4. [`dot`] — the bundled consumer: one graph node per AST node, one
//!    labeled edge per parent→child relationship.
//!
//! Everything is synchronous and single-threaded; each stage runs to
//! completion before the next starts.

pub mod dot;
pub mod parser;

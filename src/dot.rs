//! Graphviz DOT rendering of the AST.
//!
//! An [`AstVisitor`] consumer: one graph node per AST node with a readable
//! label, one edge per parent→child relationship, role labels
//! (`Condition`, `Then`, `Body`, …) on edges where the child's position is
//! not obvious. Renders into a `String`; feed the result to `dot -Tpng`.

use crate::parser::ast::{Decl, Expr, PostfixTail, Stmt, SwitchCase, TailPayload};
use crate::parser::token::{Literal, Token, TokenKind};
use crate::parser::visitor::{walk_decl, walk_expr, walk_stmt, AstVisitor};

/// Stateful DOT emitter.
///
/// Two pieces of state drive the layout: a monotonically increasing node-id
/// counter and a stack of parent ids. [`DotPrinter::with_parent`] scopes
/// the stack so every push is released. A pending label slot lets a parent
/// annotate the edge to its next child with a role.
pub struct DotPrinter {
    out: String,
    next_id: usize,
    parents: Vec<String>,
    pending_label: Option<String>,
}

impl DotPrinter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            next_id: 0,
            parents: Vec::new(),
            pending_label: None,
        }
    }

    /// Render a whole program under a synthetic root node.
    pub fn print(mut self, program: &[Decl]) -> String {
        self.out.push_str("digraph AST {\n");
        self.out.push_str("    rankdir=TB;\n");

        let root = self.node("PROGRAM ROOT");
        self.with_parent(root, |p| {
            for decl in program {
                walk_decl(p, decl);
            }
        });

        self.out.push_str("}\n");
        self.out
    }

    // ===== DOT generation helpers =====

    fn new_id(&mut self) -> String {
        let id = format!("N{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a node and the edge from the current parent (if any), consuming
    /// the pending edge label. Returns the node id.
    fn node(&mut self, label: &str) -> String {
        let id = self.new_id();
        self.out
            .push_str(&format!("    {} [label=\"{}\"];\n", id, escape(label)));

        let pending = self.pending_label.take();
        if let Some(parent) = self.parents.last() {
            match pending {
                Some(role) => self.out.push_str(&format!(
                    "    {} -> {} [label=\"{}\"];\n",
                    parent, id, role
                )),
                None => self.out.push_str(&format!("    {} -> {};\n", parent, id)),
            }
        }

        id
    }

    /// Label the edge to the next emitted node with a role.
    fn edge_label(&mut self, role: &str) {
        self.pending_label = Some(role.to_string());
    }

    /// Run `f` with `id` on top of the parent stack; the pop is guaranteed
    /// on every exit path.
    fn with_parent(&mut self, id: String, f: impl FnOnce(&mut Self)) {
        self.parents.push(id);
        f(self);
        self.parents.pop();
    }

    fn primary_label(value: &Token) -> String {
        match (&value.kind, &value.literal) {
            // Show the decoded string value quoted, not the raw lexeme.
            (TokenKind::String, Some(Literal::Str(s))) => format!("LIT: \"{}\"", s),
            _ => format!("LIT: {}", value.lexeme),
        }
    }

    fn print_case(&mut self, case: &SwitchCase, index: usize) {
        self.edge_label(&format!("Case {}", index));
        let id = self.node(if case.value.is_some() { "CASE" } else { "DEFAULT" });

        self.with_parent(id, |p| {
            if let Some(value) = &case.value {
                walk_expr(p, value);
            }

            p.edge_label("Body");
            let body_id = p.node("Case Body");
            p.with_parent(body_id, |p| {
                for item in &case.body {
                    walk_decl(p, item);
                }
            });
        });
    }

    fn print_tail(&mut self, tail: &PostfixTail, index: usize) {
        let id = self.node(&format!("Tail {}: {}", index, tail.op.lexeme));

        self.with_parent(id, |p| match &tail.payload {
            TailPayload::Call(arguments) => {
                for argument in arguments {
                    p.edge_label("Arg");
                    walk_expr(p, argument);
                }
            }
            TailPayload::Index(index_expr) => {
                p.edge_label("Index");
                walk_expr(p, index_expr);
            }
            TailPayload::Member(member) => {
                p.edge_label("Member");
                walk_expr(p, member);
            }
            TailPayload::Step => {}
        });
    }
}

impl Default for DotPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Double every `"` so the label survives DOT quoting.
fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}

impl AstVisitor for DotPrinter {
    // ===== Declarations =====

    fn visit_var_decl(&mut self, name: &Token, initializer: Option<&Expr>) {
        let id = self.node(&format!("VAR: {}", name.lexeme));
        self.with_parent(id, |p| {
            if let Some(init) = initializer {
                p.edge_label("Initializer");
                walk_expr(p, init);
            }
        });
    }

    fn visit_fun_decl(&mut self, name: &Token, params: &[Token], body: &Stmt) {
        let param_names: Vec<&str> = params.iter().map(|p| p.lexeme.as_str()).collect();
        let label = format!("FUN: {} (Params: {})", name.lexeme, param_names.join(","));

        let id = self.node(&label);
        self.with_parent(id, |p| walk_stmt(p, body));
    }

    // ===== Statements =====

    fn visit_expr_stmt(&mut self, expr: Option<&Expr>) {
        let id = self.node("Expr Stmt");
        self.with_parent(id, |p| match expr {
            Some(expr) => walk_expr(p, expr),
            None => {
                p.node("No Expression");
            }
        });
    }

    fn visit_print_stmt(&mut self, expr: Option<&Expr>) {
        let id = self.node("PRINT");
        self.with_parent(id, |p| match expr {
            Some(expr) => walk_expr(p, expr),
            None => {
                p.node("No Expression");
            }
        });
    }

    fn visit_return_stmt(&mut self, value: Option<&Expr>) {
        let id = self.node("RETURN");
        self.with_parent(id, |p| match value {
            Some(value) => walk_expr(p, value),
            None => {
                p.node("No Value");
            }
        });
    }

    fn visit_break_stmt(&mut self) {
        self.node("BREAK");
    }

    fn visit_continue_stmt(&mut self) {
        self.node("CONTINUE");
    }

    fn visit_block_stmt(&mut self, items: &[Decl]) {
        let id = self.node("BLOCK {}");
        self.with_parent(id, |p| {
            for item in items {
                walk_decl(p, item);
            }
        });
    }

    fn visit_if_stmt(&mut self, cond: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>) {
        let id = self.node("IF");
        self.with_parent(id, |p| {
            p.edge_label("Condition");
            walk_expr(p, cond);

            p.edge_label("Then");
            walk_stmt(p, then_branch);

            if let Some(else_branch) = else_branch {
                p.edge_label("Else");
                walk_stmt(p, else_branch);
            }
        });
    }

    fn visit_while_stmt(&mut self, cond: &Expr, body: &Stmt) {
        let id = self.node("WHILE");
        self.with_parent(id, |p| {
            p.edge_label("Condition");
            walk_expr(p, cond);
            p.edge_label("Body");
            walk_stmt(p, body);
        });
    }

    fn visit_do_while_stmt(&mut self, body: &Stmt, cond: &Expr) {
        let id = self.node("DO-WHILE");
        self.with_parent(id, |p| {
            p.edge_label("Body");
            walk_stmt(p, body);
            p.edge_label("Condition");
            walk_expr(p, cond);
        });
    }

    fn visit_for_stmt(
        &mut self,
        init: Option<&Decl>,
        cond: Option<&Expr>,
        step: Option<&Expr>,
        body: &Stmt,
    ) {
        let id = self.node("FOR");
        self.with_parent(id, |p| {
            if let Some(init) = init {
                p.edge_label("Init");
                walk_decl(p, init);
            }
            if let Some(cond) = cond {
                p.edge_label("Cond");
                walk_expr(p, cond);
            }
            if let Some(step) = step {
                p.edge_label("Inc");
                walk_expr(p, step);
            }
            p.edge_label("Body");
            walk_stmt(p, body);
        });
    }

    fn visit_switch_stmt(&mut self, cond: &Expr, cases: &[SwitchCase]) {
        let id = self.node("SWITCH");
        self.with_parent(id, |p| {
            p.edge_label("Condition");
            walk_expr(p, cond);

            for (i, case) in cases.iter().enumerate() {
                p.print_case(case, i + 1);
            }
        });
    }

    // ===== Expressions =====

    fn visit_primary_expr(&mut self, value: &Token) {
        self.node(&Self::primary_label(value));
    }

    fn visit_grouping_expr(&mut self, inner: &Expr) {
        let id = self.node("GROUPING ()");
        self.with_parent(id, |p| {
            p.edge_label("Expression");
            walk_expr(p, inner);
        });
    }

    fn visit_unary_expr(&mut self, op: &Token, right: &Expr) {
        let id = self.node(&format!("Unary: {}", op.lexeme));
        self.with_parent(id, |p| walk_expr(p, right));
    }

    fn visit_binary_expr(&mut self, left: &Expr, op: &Token, right: &Expr) {
        let id = self.node(&format!("Binary: {}", op.lexeme));
        self.with_parent(id, |p| {
            p.edge_label("Left");
            walk_expr(p, left);
            p.edge_label("Right");
            walk_expr(p, right);
        });
    }

    fn visit_logical_expr(&mut self, left: &Expr, op: &Token, right: &Expr) {
        let id = self.node(&format!("Logical: {}", op.lexeme));
        self.with_parent(id, |p| {
            p.edge_label("Left");
            walk_expr(p, left);
            p.edge_label("Right");
            walk_expr(p, right);
        });
    }

    fn visit_assignment_expr(&mut self, target: &Expr, op: &Token, value: &Expr) {
        let id = self.node(&format!("Assign: {}", op.lexeme));
        self.with_parent(id, |p| {
            p.edge_label("Target");
            walk_expr(p, target);
            p.edge_label("Value");
            walk_expr(p, value);
        });
    }

    fn visit_conditional_expr(&mut self, cond: &Expr, then_expr: &Expr, else_expr: &Expr) {
        let id = self.node("Ternary ?:");
        self.with_parent(id, |p| {
            p.edge_label("Condition");
            walk_expr(p, cond);
            p.edge_label("Then");
            walk_expr(p, then_expr);
            p.edge_label("Else");
            walk_expr(p, else_expr);
        });
    }

    fn visit_postfix_expr(&mut self, base: &Expr, tails: &[PostfixTail]) {
        let id = self.node("POSTFIX");
        self.with_parent(id, |p| {
            p.edge_label("Base");
            walk_expr(p, base);

            for (i, tail) in tails.iter().enumerate() {
                p.print_tail(tail, i + 1);
            }
        });
    }
}

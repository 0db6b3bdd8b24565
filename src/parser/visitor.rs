//! Visitor surface for AST nodes.
//!
//! One handler per concrete node kind; the `walk_*` functions perform the
//! dispatch with a single match and call exactly one handler per node.
//! Handlers drive recursion into children themselves (through the walk
//! functions), so a consumer can interleave its own work with child visits.
//! [`SwitchCase`] and [`PostfixTail`] are not node kinds; they are handed
//! to the switch and postfix handlers whole.

use super::ast::{Decl, Expr, PostfixTail, Stmt, SwitchCase};
use super::token::Token;

pub trait AstVisitor: Sized {
    // Declarations
    fn visit_var_decl(&mut self, name: &Token, initializer: Option<&Expr>);
    fn visit_fun_decl(&mut self, name: &Token, params: &[Token], body: &Stmt);

    // Statements
    fn visit_expr_stmt(&mut self, expr: Option<&Expr>);
    fn visit_print_stmt(&mut self, expr: Option<&Expr>);
    fn visit_return_stmt(&mut self, value: Option<&Expr>);
    fn visit_break_stmt(&mut self);
    fn visit_continue_stmt(&mut self);
    fn visit_block_stmt(&mut self, items: &[Decl]);
    fn visit_if_stmt(&mut self, cond: &Expr, then_branch: &Stmt, else_branch: Option<&Stmt>);
    fn visit_while_stmt(&mut self, cond: &Expr, body: &Stmt);
    fn visit_do_while_stmt(&mut self, body: &Stmt, cond: &Expr);
    fn visit_for_stmt(
        &mut self,
        init: Option<&Decl>,
        cond: Option<&Expr>,
        step: Option<&Expr>,
        body: &Stmt,
    );
    fn visit_switch_stmt(&mut self, cond: &Expr, cases: &[SwitchCase]);

    // Expressions
    fn visit_primary_expr(&mut self, value: &Token);
    fn visit_grouping_expr(&mut self, inner: &Expr);
    fn visit_unary_expr(&mut self, op: &Token, right: &Expr);
    fn visit_binary_expr(&mut self, left: &Expr, op: &Token, right: &Expr);
    fn visit_logical_expr(&mut self, left: &Expr, op: &Token, right: &Expr);
    fn visit_assignment_expr(&mut self, target: &Expr, op: &Token, value: &Expr);
    fn visit_conditional_expr(&mut self, cond: &Expr, then_expr: &Expr, else_expr: &Expr);
    fn visit_postfix_expr(&mut self, base: &Expr, tails: &[PostfixTail]);
}

pub fn walk_decl<V: AstVisitor>(visitor: &mut V, decl: &Decl) {
    match decl {
        Decl::Var { name, initializer } => visitor.visit_var_decl(name, initializer.as_ref()),
        Decl::Fun { name, params, body } => visitor.visit_fun_decl(name, params, body),
        Decl::Stmt(stmt) => walk_stmt(visitor, stmt),
    }
}

pub fn walk_stmt<V: AstVisitor>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr { expr } => visitor.visit_expr_stmt(expr.as_ref()),
        Stmt::Print { expr } => visitor.visit_print_stmt(expr.as_ref()),
        Stmt::Return { value } => visitor.visit_return_stmt(value.as_ref()),
        Stmt::Break => visitor.visit_break_stmt(),
        Stmt::Continue => visitor.visit_continue_stmt(),
        Stmt::Block { items } => visitor.visit_block_stmt(items),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => visitor.visit_if_stmt(cond, then_branch, else_branch.as_deref()),
        Stmt::While { cond, body } => visitor.visit_while_stmt(cond, body),
        Stmt::DoWhile { body, cond } => visitor.visit_do_while_stmt(body, cond),
        Stmt::For {
            init,
            cond,
            step,
            body,
        } => visitor.visit_for_stmt(init.as_deref(), cond.as_ref(), step.as_ref(), body),
        Stmt::Switch { cond, cases } => visitor.visit_switch_stmt(cond, cases),
    }
}

pub fn walk_expr<V: AstVisitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Primary { value } => visitor.visit_primary_expr(value),
        Expr::Grouping { inner } => visitor.visit_grouping_expr(inner),
        Expr::Unary { op, right } => visitor.visit_unary_expr(op, right),
        Expr::Binary { left, op, right } => visitor.visit_binary_expr(left, op, right),
        Expr::Logical { left, op, right } => visitor.visit_logical_expr(left, op, right),
        Expr::Assignment { target, op, value } => {
            visitor.visit_assignment_expr(target, op, value)
        }
        Expr::Conditional {
            cond,
            then_expr,
            else_expr,
        } => visitor.visit_conditional_expr(cond, then_expr, else_expr),
        Expr::Postfix { base, tails } => visitor.visit_postfix_expr(base, tails),
    }
}

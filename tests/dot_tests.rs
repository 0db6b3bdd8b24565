// Tests for the DOT rendering of the AST.

use astdot::dot::DotPrinter;
use astdot::parser::ast::Decl;
use astdot::parser::lexer::Lexer;
use astdot::parser::parse::Parser;

fn parse(source: &str) -> (Vec<Decl>, bool) {
    let (tokens, lex_errors) = Lexer::new(source).scan_tokens();
    let mut parser = Parser::new(tokens);
    let ast = parser.parse();
    (ast, parser.had_error() || !lex_errors.is_empty())
}

fn render(source: &str) -> String {
    let (ast, had_error) = parse(source);
    assert!(!had_error, "unexpected errors for {:?}", source);
    DotPrinter::new().print(&ast)
}

#[test]
fn renders_a_var_declaration_exactly() {
    let dot = render("var x = 1;");
    let expected = "\
digraph AST {
    rankdir=TB;
    N0 [label=\"PROGRAM ROOT\"];
    N1 [label=\"VAR: x\"];
    N0 -> N1;
    N2 [label=\"LIT: 1\"];
    N1 -> N2 [label=\"Initializer\"];
}
";
    assert_eq!(dot, expected);
}

#[test]
fn header_and_trailer() {
    let dot = render("");
    assert!(dot.starts_with("digraph AST {\n    rankdir=TB;\n"));
    assert!(dot.ends_with("}\n"));
    // An empty program still has the synthetic root.
    assert!(dot.contains("N0 [label=\"PROGRAM ROOT\"];"));
}

#[test]
fn node_ids_are_sequential_in_emission_order() {
    let dot = render("var a = 1; var b = 2;");
    for id in ["N0", "N1", "N2", "N3", "N4"] {
        assert!(
            dot.contains(&format!("{} [label=", id)),
            "missing node {} in:\n{}",
            id,
            dot
        );
    }
    assert!(!dot.contains("N5 [label="));
}

#[test]
fn quotes_in_labels_are_escaped() {
    let dot = render("print \"hi\";");
    // The string literal label carries quotes, doubled for DOT.
    assert!(dot.contains("[label=\"LIT: \\\"hi\\\"\"];"), "got:\n{}", dot);
}

#[test]
fn function_label_lists_parameters() {
    let dot = render("fun add(a, b) { return a + b; }");
    assert!(dot.contains("[label=\"FUN: add (Params: a,b)\"];"));
    assert!(dot.contains("[label=\"BLOCK {}\"];"));
    assert!(dot.contains("[label=\"RETURN\"];"));
    assert!(dot.contains("[label=\"Binary: +\"];"));
    assert!(dot.contains("[label=\"Left\"]"));
    assert!(dot.contains("[label=\"Right\"]"));
}

#[test]
fn control_flow_labels() {
    let dot = render("if (x) print x; else print y;");
    assert!(dot.contains("[label=\"IF\"];"));
    assert!(dot.contains("[label=\"Condition\"]"));
    assert!(dot.contains("[label=\"Then\"]"));
    assert!(dot.contains("[label=\"Else\"]"));

    let dot = render("do x = x + 1; while (x < 3);");
    assert!(dot.contains("[label=\"DO-WHILE\"];"));

    let dot = render("for (var i = 0; i < 3; i = i + 1) print i;");
    assert!(dot.contains("[label=\"FOR\"];"));
    assert!(dot.contains("[label=\"Init\"]"));
    assert!(dot.contains("[label=\"Cond\"]"));
    assert!(dot.contains("[label=\"Inc\"]"));
    assert!(dot.contains("[label=\"Body\"]"));
}

#[test]
fn switch_rendering() {
    let dot = render("switch (x) { case 1: print 1; default: print 0; }");
    assert!(dot.contains("[label=\"SWITCH\"];"));
    assert!(dot.contains("[label=\"CASE\"];"));
    assert!(dot.contains("[label=\"DEFAULT\"];"));
    assert!(dot.contains("[label=\"Case Body\"];"));
    assert!(dot.contains("[label=\"Case 1\"]"));
    assert!(dot.contains("[label=\"Case 2\"]"));
}

#[test]
fn postfix_rendering() {
    let dot = render("a(1)[2].b++;");
    assert!(dot.contains("[label=\"POSTFIX\"];"));
    assert!(dot.contains("[label=\"Base\"]"));
    assert!(dot.contains("[label=\"Tail 1: (\"];"));
    assert!(dot.contains("[label=\"Tail 2: [\"];"));
    assert!(dot.contains("[label=\"Tail 3: .\"];"));
    assert!(dot.contains("[label=\"Tail 4: ++\"];"));
    assert!(dot.contains("[label=\"Arg\"]"));
    assert!(dot.contains("[label=\"Index\"]"));
    assert!(dot.contains("[label=\"Member\"]"));
}

#[test]
fn ternary_and_logical_labels() {
    let dot = render("x = a ? b : c && d;");
    assert!(dot.contains("[label=\"Assign: =\"];"));
    assert!(dot.contains("[label=\"Ternary ?:\"];"));
    assert!(dot.contains("[label=\"Logical: &&\"];"));
    assert!(!dot.contains("[label=\"GROUPING ()\"];"));
}

#[test]
fn empty_statement_is_tolerated() {
    let dot = render(";");
    assert!(dot.contains("[label=\"Expr Stmt\"];"));
    assert!(dot.contains("[label=\"No Expression\"];"));
}

#[test]
fn missing_print_and_return_operands_are_tolerated() {
    let dot = render("print;");
    assert!(dot.contains("[label=\"PRINT\"];"));
    assert!(dot.contains("[label=\"No Expression\"];"));

    let dot = render("fun f() { return; }");
    assert!(dot.contains("[label=\"RETURN\"];"));
    assert!(dot.contains("[label=\"No Value\"];"));
}

#[test]
fn partial_ast_after_errors_still_renders() {
    // The malformed declaration is dropped; the rest renders fine.
    let (ast, had_error) = parse("var = 1;\nvar ok = 2;");
    assert!(had_error);
    let dot = DotPrinter::new().print(&ast);
    assert!(dot.starts_with("digraph AST {"));
    assert!(dot.contains("[label=\"VAR: ok\"];"));
    assert!(dot.ends_with("}\n"));
}

#[test]
fn every_edge_points_at_an_emitted_node() {
    let source = "\
fun f(a) {
    if (a > 0) { print a; } else print -a;
    while (a) a = a - 1;
    switch (a) { case 1: break; default: continue; }
    return f(a)[0].b++ ? (a) : nil;
}
";
    let dot = render(source);

    let mut declared = std::collections::HashSet::new();
    let mut referenced = Vec::new();
    for line in dot.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("N") {
            if line.contains("->") {
                // Edge: "Na -> Nb;" or "Na -> Nb [label=...];"
                let mut parts = line.split_whitespace();
                let from = parts.next().unwrap();
                parts.next(); // "->"
                let to = parts.next().unwrap().trim_end_matches(';');
                referenced.push(from.to_string());
                referenced.push(to.to_string());
            } else {
                // Node: "Nk [label=...];"
                let id = format!("N{}", rest.split_whitespace().next().unwrap());
                declared.insert(id);
            }
        }
    }

    assert!(!referenced.is_empty());
    for id in referenced {
        assert!(declared.contains(&id), "edge references undeclared node {}", id);
    }
}

// astdot: parse a script and render its AST as a Graphviz DOT graph.

mod dot;
mod parser;

use std::fs;
use std::process;

use dot::DotPrinter;
use parser::lexer::Lexer;
use parser::parse::Parser;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("astdot");

    let mut dump_tokens = false;
    let mut paths: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "--tokens" => dump_tokens = true,
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() || paths.len() > 2 {
        eprintln!("Usage: {} [--tokens] <source-file> [output.dot]", program_name);
        eprintln!();
        eprintln!("Reads a script, writes a Graphviz rendering of its AST");
        eprintln!("(default output: ast.dot), and reports any syntax errors.");
        eprintln!();
        eprintln!("To turn the output into an image:");
        eprintln!("  dot -Tpng ast.dot -o ast.png");
        process::exit(1);
    }

    let input_path = paths[0];
    let output_path = paths.get(1).copied().unwrap_or("ast.dot");

    let source = match fs::read_to_string(input_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: Could not read input file '{}': {}", input_path, err);
            process::exit(1);
        }
    };

    let (tokens, lex_errors) = Lexer::new(&source).scan_tokens();
    for err in &lex_errors {
        eprintln!("{}", err);
    }

    if dump_tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let mut parser = Parser::new(tokens);
    let ast = parser.parse();
    for err in parser.errors() {
        eprintln!("{}", err);
    }

    if parser.had_error() || !lex_errors.is_empty() {
        eprintln!("Warning: syntax errors encountered; the rendered AST may be incomplete.");
    }

    let dot_text = DotPrinter::new().print(&ast);
    if let Err(err) = fs::write(output_path, dot_text) {
        eprintln!("Error: Could not write output file '{}': {}", output_path, err);
        process::exit(1);
    }

    println!("DOT graph saved to: {}", output_path);
}

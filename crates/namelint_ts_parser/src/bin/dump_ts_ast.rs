//! Dumps the tree-sitter CST of a TypeScript file, with field names.
//!
//! Usage:
//!   cat widget.ts | cargo run --bin dump_ts_ast
//!   cat view.tsx | cargo run --bin dump_ts_ast -- --tsx
//!
//! Each line is `field: kind [row:col-row:col] "leaf text"`; useful when
//! extending the lowering pass in `namelint_ast`.

use namelint_ts_parser::{Dialect, TsParser};
use std::io::{self, Read};
use tree_sitter::TreeCursor;

const PREVIEW_CHARS: usize = 40;

fn main() {
    let dialect = if std::env::args().any(|arg| arg == "--tsx") {
        Dialect::Tsx
    } else {
        Dialect::TypeScript
    };

    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        eprintln!("Error reading stdin: {e}");
        std::process::exit(1);
    }

    if source.trim().is_empty() {
        eprintln!("Error: no input. Usage: cat widget.ts | dump_ts_ast [--tsx]");
        std::process::exit(1);
    }

    let mut parser = TsParser::new();
    let Some(result) = parser.parse_with(&source, dialect) else {
        eprintln!("Error: failed to parse TypeScript source");
        std::process::exit(1);
    };

    let mut cursor = result.tree.walk();
    print_subtree(&mut cursor, &source, 0);
}

fn print_subtree(cursor: &mut TreeCursor, source: &str, depth: usize) {
    let node = cursor.node();
    let start = node.start_position();
    let end = node.end_position();
    let field = cursor
        .field_name()
        .map(|name| format!("{name}: "))
        .unwrap_or_default();

    let mut line = format!(
        "{}{}{} [{}:{}-{}:{}]",
        "  ".repeat(depth),
        field,
        node.kind(),
        start.row + 1,
        start.column,
        end.row + 1,
        end.column
    );

    if node.child_count() == 0 {
        let preview: String = node
            .utf8_text(source.as_bytes())
            .unwrap_or("")
            .chars()
            .take(PREVIEW_CHARS)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        line.push_str(&format!(" \"{preview}\""));
    }
    println!("{line}");

    if cursor.goto_first_child() {
        loop {
            print_subtree(cursor, source, depth + 1);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

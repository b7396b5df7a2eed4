//! Test utilities for linting TypeScript snippets end to end.
//!
//! Sources go through the same path the CLI uses: tree-sitter parse,
//! lowering, one [`Program`] for all files, then the configured [`Linter`].

#![allow(dead_code)]

use namelint_ast::{Program, lower};
use namelint_config::Config;
use namelint_diagnostics::Diagnostic;
use namelint_linter::Linter;
use namelint_source_file::{LineIndex, SourceCode};

/// A diagnostic resolved to a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line: usize,
    pub column: usize,
    pub rule: &'static str,
    pub message: String,
    pub fix: Option<String>,
}

impl Finding {
    pub fn at(line: usize, column: usize, rule: &'static str, message: &str) -> Self {
        Self {
            line,
            column,
            rule,
            message: message.to_string(),
            fix: None,
        }
    }

    pub fn with_fix(mut self, fix: &str) -> Self {
        self.fix = Some(fix.to_string());
        self
    }
}

pub fn config(text: &str) -> Config {
    Config::parse(text).unwrap()
}

/// Lints every file and returns the raw diagnostics of the file at `target`.
pub fn diagnostics(files: &[(&str, &str)], target: usize, config: &Config) -> Vec<Diagnostic> {
    let linter = Linter::from_config(config).unwrap();
    let program = Program::new(
        files
            .iter()
            .map(|(file_name, source)| lower(file_name, source).unwrap())
            .collect(),
    );
    let (file, _) = program
        .files()
        .find(|(file, _)| file.index() == target)
        .unwrap();
    linter.check(&program, file)
}

/// Lints `files` and reports the findings of the file at `target`.
pub fn lint_files(files: &[(&str, &str)], target: usize, config_text: &str) -> Vec<Finding> {
    let source = files[target].1;
    findings(source, &diagnostics(files, target, &config(config_text)))
}

/// Lints a single file.
pub fn lint_source(file_name: &str, source: &str, config_text: &str) -> Vec<Finding> {
    lint_files(&[(file_name, source)], 0, config_text)
}

pub fn findings(source: &str, diagnostics: &[Diagnostic]) -> Vec<Finding> {
    let index = LineIndex::from_source_text(source);
    let code = SourceCode::new(source, &index);
    diagnostics
        .iter()
        .map(|diagnostic| {
            let location = code.line_column(diagnostic.range.start());
            Finding {
                line: location.line.get(),
                column: location.column.get(),
                rule: diagnostic.rule.unwrap_or_default(),
                message: diagnostic.message().to_string(),
                fix: diagnostic
                    .replacement()
                    .and_then(|edit| edit.content())
                    .map(str::to_string),
            }
        })
        .collect()
}

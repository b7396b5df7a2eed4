//! TypeScript parsing on top of tree-sitter.

use tree_sitter::{Language, Parser, Tree};

/// Grammar flavour to parse with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Picks the dialect from a file name: `.tsx` parses as TSX, everything else as TypeScript.
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.ends_with(".tsx") {
            Self::Tsx
        } else {
            Self::TypeScript
        }
    }

    fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Result of parsing a source file.
pub struct ParseResult {
    pub tree: Tree,
    pub dialect: Dialect,
}

impl ParseResult {
    /// Whether tree-sitter had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// A reusable TypeScript parser.
pub struct TsParser {
    parser: Parser,
    dialect: Option<Dialect>,
}

impl TsParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            dialect: None,
        }
    }

    /// Parse TypeScript source code.
    pub fn parse(&mut self, source: &str) -> Option<ParseResult> {
        self.parse_with(source, Dialect::TypeScript)
    }

    /// Parse with an explicit dialect.
    pub fn parse_with(&mut self, source: &str, dialect: Dialect) -> Option<ParseResult> {
        if self.dialect != Some(dialect) {
            self.parser.set_language(&dialect.language()).ok()?;
            self.dialect = Some(dialect);
        }
        let tree = self.parser.parse(source, None)?;
        Some(ParseResult { tree, dialect })
    }
}

impl Default for TsParser {
    fn default() -> Self {
        Self::new()
    }
}

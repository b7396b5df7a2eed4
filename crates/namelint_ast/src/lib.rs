//! Typed declaration tree for TypeScript sources.
//!
//! [`lower`] turns tree-sitter output into a [`SourceTree`]: an arena of
//! [`NodeKind`] nodes with parent back-references. A [`Program`] binds many
//! trees together and answers the [`TypeChecker`] queries the rules need.

pub mod lower;
mod node;
mod program;
mod tree;

pub use lower::{LowerError, lower, lower_with};
pub use node::{
    ExportDeclaration, HeritageClause, HeritageToken, Initializer, KeywordType, Modifier,
    Modifiers, ModuleSpecifier, Name, NameKind, NodeId, NodeKind, PropertyAccess, Receiver,
    SyntaxKind, TypeAnnotation, TypeDeclaration, TypeReference, VariableDeclarator,
    VariableStatement,
};
pub use program::{DeclRef, FileId, Program, TypeCategory, TypeChecker};
pub use tree::{NodeRef, SourceTree, SourceTreeBuilder, TreeError, TreeWalker};

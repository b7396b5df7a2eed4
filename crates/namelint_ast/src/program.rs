//! Cross-file symbol lookup for heritage and type queries.

use std::collections::{HashMap, HashSet};

use crate::node::{
    Initializer, KeywordType, NodeId, NodeKind, TypeAnnotation, TypeReference, VariableDeclarator,
};
use crate::tree::SourceTree;

/// Index of a file inside a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declaration node in some file of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclRef {
    pub file: FileId,
    pub node: NodeId,
}

/// Coarse type of a variable as seen by the type checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    String,
    Number,
    BigInt,
    Boolean,
    Symbol,
    Enum,
    /// A string, number or boolean literal type.
    Literal,
    Void,
    Undefined,
    Null,
    Other,
}

impl TypeCategory {
    pub fn is_primitive(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Symbol resolution and type queries over a set of files.
pub trait TypeChecker: Sync {
    fn tree(&self, file: FileId) -> Option<&SourceTree>;

    /// Declarations the reference resolves to, in declaration order.
    fn resolve_type_reference(&self, file: FileId, reference: &TypeReference) -> Vec<DeclRef>;

    fn type_category(&self, file: FileId, declarator: &VariableDeclarator) -> TypeCategory;
}

/// A name-based binder over all parsed files.
///
/// Classes, interfaces and enums are indexed by their simple name. Module
/// scoping is not modelled: two files declaring `class Base` both answer a
/// lookup for `Base`, in file order.
pub struct Program {
    files: Vec<SourceTree>,
    types: HashMap<String, Vec<DeclRef>>,
    enums: HashSet<String>,
}

impl Program {
    pub fn new(files: Vec<SourceTree>) -> Self {
        let mut types: HashMap<String, Vec<DeclRef>> = HashMap::new();
        let mut enums = HashSet::new();

        for (index, tree) in files.iter().enumerate() {
            let Ok(raw) = u32::try_from(index) else {
                tracing::warn!(file = tree.file_name(), "too many files, skipping from symbol index");
                break;
            };
            let file = FileId(raw);
            for node in tree.walk() {
                match node.kind() {
                    NodeKind::ClassDeclaration(decl) | NodeKind::InterfaceDeclaration(decl) => {
                        if let Some(name) = &decl.name {
                            types.entry(name.text.clone()).or_default().push(DeclRef {
                                file,
                                node: node.id(),
                            });
                        }
                    }
                    NodeKind::EnumDeclaration(name) => {
                        enums.insert(name.text.clone());
                    }
                    _ => {}
                }
            }
        }

        tracing::debug!(
            files = files.len(),
            types = types.len(),
            enums = enums.len(),
            "built program symbol index"
        );

        Self {
            files,
            types,
            enums,
        }
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &SourceTree)> + '_ {
        self.files
            .iter()
            .enumerate()
            .filter_map(|(index, tree)| Some((FileId(u32::try_from(index).ok()?), tree)))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn into_files(self) -> Vec<SourceTree> {
        self.files
    }

    fn is_enum(&self, name: &str) -> bool {
        let simple = name.rsplit('.').next().unwrap_or(name);
        self.enums.contains(simple)
    }

    fn annotation_category(&self, annotation: &TypeAnnotation) -> TypeCategory {
        match annotation {
            TypeAnnotation::Keyword(keyword) => match keyword {
                KeywordType::String => TypeCategory::String,
                KeywordType::Number => TypeCategory::Number,
                KeywordType::BigInt => TypeCategory::BigInt,
                KeywordType::Boolean => TypeCategory::Boolean,
                KeywordType::Symbol => TypeCategory::Symbol,
                KeywordType::Void => TypeCategory::Void,
                KeywordType::Undefined => TypeCategory::Undefined,
                KeywordType::Null => TypeCategory::Null,
                KeywordType::Any
                | KeywordType::Unknown
                | KeywordType::Never
                | KeywordType::Object => TypeCategory::Other,
            },
            TypeAnnotation::Literal => TypeCategory::Literal,
            TypeAnnotation::Reference(name) if self.is_enum(name) => TypeCategory::Enum,
            TypeAnnotation::Reference(_) | TypeAnnotation::Other => TypeCategory::Other,
            TypeAnnotation::Union(members) => {
                let categories: Vec<_> = members.iter().map(|m| self.annotation_category(m)).collect();
                match categories.as_slice() {
                    [single] => *single,
                    all if !all.is_empty() && all.iter().all(|c| c.is_primitive()) => {
                        TypeCategory::Literal
                    }
                    _ => TypeCategory::Other,
                }
            }
        }
    }

    fn initializer_category(&self, initializer: &Initializer) -> TypeCategory {
        match initializer {
            Initializer::StringLiteral | Initializer::TemplateLiteral => TypeCategory::String,
            Initializer::NumericLiteral => TypeCategory::Number,
            Initializer::BigIntLiteral => TypeCategory::BigInt,
            Initializer::BooleanLiteral => TypeCategory::Boolean,
            Initializer::Null => TypeCategory::Null,
            Initializer::Undefined => TypeCategory::Undefined,
            Initializer::Void => TypeCategory::Void,
            Initializer::SymbolCall => TypeCategory::Symbol,
            Initializer::MemberAccess { object, .. } if self.is_enum(object) => TypeCategory::Enum,
            Initializer::MemberAccess { .. } | Initializer::Identifier(_) | Initializer::Other => {
                TypeCategory::Other
            }
        }
    }
}

impl TypeChecker for Program {
    fn tree(&self, file: FileId) -> Option<&SourceTree> {
        self.files.get(file.index())
    }

    fn resolve_type_reference(&self, file: FileId, reference: &TypeReference) -> Vec<DeclRef> {
        let resolved = self
            .types
            .get(reference.simple_name())
            .cloned()
            .unwrap_or_default();
        if resolved.is_empty() {
            tracing::trace!(
                file = file.index(),
                name = reference.name.as_str(),
                "unresolved heritage type"
            );
        }
        resolved
    }

    fn type_category(&self, _file: FileId, declarator: &VariableDeclarator) -> TypeCategory {
        if let Some(annotation) = &declarator.type_annotation {
            return self.annotation_category(annotation);
        }
        declarator
            .initializer
            .as_ref()
            .map_or(TypeCategory::Other, |init| self.initializer_category(init))
    }
}

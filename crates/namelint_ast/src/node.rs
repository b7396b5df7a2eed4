//! Node kinds and the payloads they carry.

use namelint_text_size::{Ranged, TextRange};

/// Index of a node inside its [`SourceTree`](crate::SourceTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: Self = Self(0);

    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a name was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    Identifier,
    /// `#field`
    PrivateIdentifier,
    /// `'quoted'`
    StringLiteral,
    NumericLiteral,
    /// `[expr]`
    Computed,
    /// `{ a, b }` or `[a, b]` in a binding position.
    BindingPattern,
}

/// The name token of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub text: String,
    pub range: TextRange,
    pub kind: NameKind,
}

impl Name {
    pub fn identifier(text: impl Into<String>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range,
            kind: NameKind::Identifier,
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == NameKind::Identifier
    }
}

impl Ranged for Name {
    fn range(&self) -> TextRange {
        self.range
    }
}

/// A declaration modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Static,
    Readonly,
    Abstract,
    Override,
    Async,
    Declare,
    Export,
    Default,
    Const,
}

impl Modifier {
    pub fn is_access(self) -> bool {
        matches!(self, Self::Public | Self::Private | Self::Protected)
    }
}

/// Modifiers in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    pub fn new(modifiers: Vec<Modifier>) -> Self {
        Self(modifiers)
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn push(&mut self, modifier: Modifier) {
        if !self.contains(modifier) {
            self.0.push(modifier);
        }
    }

    /// The last access keyword written, if any.
    pub fn access(&self) -> Option<Modifier> {
        self.0.iter().rev().copied().find(|m| m.is_access())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut modifiers = Self::default();
        for modifier in iter {
            modifiers.push(modifier);
        }
        modifiers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeritageToken {
    Extends,
    Implements,
}

/// A type named in an `extends`/`implements` list, e.g. `Base` or `ns.Base`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// Entity name without type arguments.
    pub name: String,
    pub range: TextRange,
}

impl TypeReference {
    /// The right-most segment of a qualified name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeritageClause {
    pub token: HeritageToken,
    pub types: Vec<TypeReference>,
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDeclaration {
    /// `None` for anonymous class expressions.
    pub name: Option<Name>,
    pub heritage: Vec<HeritageClause>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    This,
    Super,
    Other,
}

/// `<receiver>.<name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAccess {
    pub receiver: Receiver,
    pub name: Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordType {
    String,
    Number,
    BigInt,
    Boolean,
    Symbol,
    Void,
    Undefined,
    Null,
    Any,
    Unknown,
    Never,
    Object,
}

/// A declared type, reduced to what type queries need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeAnnotation {
    Keyword(KeywordType),
    /// `"a"`, `1`, `true`, template literal types.
    Literal,
    /// A named type, e.g. `Color` or `ns.Color`.
    Reference(String),
    Union(Vec<TypeAnnotation>),
    Other,
}

/// A variable initializer, reduced to what type queries need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initializer {
    StringLiteral,
    TemplateLiteral,
    NumericLiteral,
    BigIntLiteral,
    BooleanLiteral,
    Null,
    Undefined,
    /// `void expr`
    Void,
    /// `Symbol(...)`
    SymbolCall,
    /// `object.property`, e.g. an enum member.
    MemberAccess { object: String, property: String },
    Identifier(String),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclarator {
    pub name: Name,
    pub type_annotation: Option<TypeAnnotation>,
    pub initializer: Option<Initializer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableStatement {
    /// Declared with `const`.
    pub is_const: bool,
    pub declarators: Vec<VariableDeclarator>,
}

/// A quoted module path in an import or export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpecifier {
    /// The path without quotes.
    pub value: String,
    pub quote: char,
    /// Covers the quotes.
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDeclaration {
    pub specifier: Option<ModuleSpecifier>,
    /// `export * from` or `export * as ns from`.
    pub is_star: bool,
}

/// What a node is. Constructs the rules never inspect are [`NodeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, is_macro::Is)]
pub enum NodeKind {
    SourceFile,
    ClassDeclaration(TypeDeclaration),
    InterfaceDeclaration(TypeDeclaration),
    ObjectLiteral,
    TypeLiteral,
    MethodDeclaration(Name),
    MethodSignature(Name),
    PropertyDeclaration(Name),
    PropertySignature(Name),
    GetAccessor(Name),
    SetAccessor(Name),
    Constructor,
    Parameter(Name),
    PropertyAccess(PropertyAccess),
    VariableStatement(VariableStatement),
    FunctionDeclaration(Name),
    EnumDeclaration(Name),
    TypeAliasDeclaration(Name),
    ModuleDeclaration(Name),
    ModuleBlock,
    ImportDeclaration(Option<ModuleSpecifier>),
    ExportDeclaration(ExportDeclaration),
    TypeParameter(Name),
    Block,
    Other,
}

/// Payload-free discriminant of [`NodeKind`], used for rule dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    SourceFile,
    ClassDeclaration,
    InterfaceDeclaration,
    ObjectLiteral,
    TypeLiteral,
    MethodDeclaration,
    MethodSignature,
    PropertyDeclaration,
    PropertySignature,
    GetAccessor,
    SetAccessor,
    Constructor,
    Parameter,
    PropertyAccess,
    VariableStatement,
    FunctionDeclaration,
    EnumDeclaration,
    TypeAliasDeclaration,
    ModuleDeclaration,
    ModuleBlock,
    ImportDeclaration,
    ExportDeclaration,
    TypeParameter,
    Block,
    Other,
}

impl NodeKind {
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            Self::SourceFile => SyntaxKind::SourceFile,
            Self::ClassDeclaration(_) => SyntaxKind::ClassDeclaration,
            Self::InterfaceDeclaration(_) => SyntaxKind::InterfaceDeclaration,
            Self::ObjectLiteral => SyntaxKind::ObjectLiteral,
            Self::TypeLiteral => SyntaxKind::TypeLiteral,
            Self::MethodDeclaration(_) => SyntaxKind::MethodDeclaration,
            Self::MethodSignature(_) => SyntaxKind::MethodSignature,
            Self::PropertyDeclaration(_) => SyntaxKind::PropertyDeclaration,
            Self::PropertySignature(_) => SyntaxKind::PropertySignature,
            Self::GetAccessor(_) => SyntaxKind::GetAccessor,
            Self::SetAccessor(_) => SyntaxKind::SetAccessor,
            Self::Constructor => SyntaxKind::Constructor,
            Self::Parameter(_) => SyntaxKind::Parameter,
            Self::PropertyAccess(_) => SyntaxKind::PropertyAccess,
            Self::VariableStatement(_) => SyntaxKind::VariableStatement,
            Self::FunctionDeclaration(_) => SyntaxKind::FunctionDeclaration,
            Self::EnumDeclaration(_) => SyntaxKind::EnumDeclaration,
            Self::TypeAliasDeclaration(_) => SyntaxKind::TypeAliasDeclaration,
            Self::ModuleDeclaration(_) => SyntaxKind::ModuleDeclaration,
            Self::ModuleBlock => SyntaxKind::ModuleBlock,
            Self::ImportDeclaration(_) => SyntaxKind::ImportDeclaration,
            Self::ExportDeclaration(_) => SyntaxKind::ExportDeclaration,
            Self::TypeParameter(_) => SyntaxKind::TypeParameter,
            Self::Block => SyntaxKind::Block,
            Self::Other => SyntaxKind::Other,
        }
    }

    /// The declared name, for kinds that declare exactly one name.
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::ClassDeclaration(decl) | Self::InterfaceDeclaration(decl) => decl.name.as_ref(),
            Self::MethodDeclaration(name)
            | Self::MethodSignature(name)
            | Self::PropertyDeclaration(name)
            | Self::PropertySignature(name)
            | Self::GetAccessor(name)
            | Self::SetAccessor(name)
            | Self::Parameter(name)
            | Self::FunctionDeclaration(name)
            | Self::EnumDeclaration(name)
            | Self::TypeAliasDeclaration(name)
            | Self::ModuleDeclaration(name)
            | Self::TypeParameter(name) => Some(name),
            Self::PropertyAccess(access) => Some(&access.name),
            Self::SourceFile
            | Self::ObjectLiteral
            | Self::TypeLiteral
            | Self::Constructor
            | Self::VariableStatement(_)
            | Self::ModuleBlock
            | Self::ImportDeclaration(_)
            | Self::ExportDeclaration(_)
            | Self::Block
            | Self::Other => None,
        }
    }

    /// Class or interface payload.
    pub fn type_declaration(&self) -> Option<&TypeDeclaration> {
        match self {
            Self::ClassDeclaration(decl) | Self::InterfaceDeclaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// Whether this kind can be a member of a class, interface or literal.
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            Self::MethodDeclaration(_)
                | Self::MethodSignature(_)
                | Self::PropertyDeclaration(_)
                | Self::PropertySignature(_)
                | Self::GetAccessor(_)
                | Self::SetAccessor(_)
                | Self::Constructor
        )
    }

    /// Whether this kind is a `get`/`set` accessor.
    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::GetAccessor(_) | Self::SetAccessor(_))
    }

    /// Every range carried in the payload, for span validation.
    pub(crate) fn payload_ranges(&self) -> Vec<TextRange> {
        let mut ranges: Vec<TextRange> = self.name().map(|n| n.range).into_iter().collect();
        match self {
            Self::ClassDeclaration(decl) | Self::InterfaceDeclaration(decl) => {
                ranges.extend(
                    decl.heritage
                        .iter()
                        .flat_map(|clause| clause.types.iter().map(|t| t.range)),
                );
            }
            Self::VariableStatement(statement) => {
                ranges.extend(statement.declarators.iter().map(|d| d.name.range));
            }
            Self::ImportDeclaration(Some(specifier)) => ranges.push(specifier.range),
            Self::ExportDeclaration(ExportDeclaration {
                specifier: Some(specifier),
                ..
            }) => ranges.push(specifier.range),
            _ => {}
        }
        ranges
    }
}

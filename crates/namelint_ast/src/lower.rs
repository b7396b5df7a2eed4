//! Lowering of the tree-sitter TypeScript CST onto [`SourceTree`].
//!
//! Statement lists (`program`, blocks, namespace bodies) produce one node per
//! statement, with [`NodeKind::Other`] standing in for statements the rules
//! never inspect. Inside expressions and types only recognised constructs
//! produce nodes; everything else is walked through transparently so that
//! nested classes, literals and property accesses still appear in the tree.

use namelint_text_size::{TextRange, TextSize};
use namelint_ts_parser::{Dialect, TsParser};
use thiserror::Error;
use tree_sitter::Node;

use crate::node::{
    ExportDeclaration, HeritageClause, HeritageToken, Initializer, KeywordType, Modifier,
    Modifiers, ModuleSpecifier, Name, NameKind, NodeKind, PropertyAccess, Receiver,
    TypeAnnotation, TypeDeclaration, TypeReference, VariableDeclarator, VariableStatement,
};
use crate::tree::{SourceTree, SourceTreeBuilder, TreeError};

#[derive(Debug, Error)]
pub enum LowerError {
    #[error("{file_name}: source text of {len} bytes is too large")]
    TooLarge { file_name: String, len: usize },
    #[error("{file_name}: tree-sitter did not produce a syntax tree")]
    Parse { file_name: String },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Parses `source` and lowers it into a [`SourceTree`].
pub fn lower(file_name: &str, source: &str) -> Result<SourceTree, LowerError> {
    let mut parser = TsParser::new();
    lower_with(&mut parser, file_name, source)
}

/// Like [`lower`], reusing an existing parser.
pub fn lower_with(
    parser: &mut TsParser,
    file_name: &str,
    source: &str,
) -> Result<SourceTree, LowerError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LowerError::TooLarge {
            file_name: file_name.to_string(),
            len: source.len(),
        });
    }

    let parsed = parser
        .parse_with(source, Dialect::from_file_name(file_name))
        .ok_or_else(|| LowerError::Parse {
            file_name: file_name.to_string(),
        })?;
    if parsed.has_errors() {
        tracing::debug!(file = file_name, "syntax errors recovered while parsing");
    }

    let mut lowerer = Lowerer {
        source,
        builder: SourceTreeBuilder::new(file_name, source),
    };
    for statement in named_children(parsed.tree.root_node()) {
        lowerer.statement(statement);
    }
    Ok(lowerer.builder.finish()?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Class,
    Interface,
    TypeLiteral,
    Object,
}

struct Lowerer<'src> {
    source: &'src str,
    builder: SourceTreeBuilder,
}

impl Lowerer<'_> {
    fn text(&self, node: Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    fn statement(&mut self, node: Node<'_>) {
        if node.is_extra() || node.kind() == "comment" {
            return;
        }
        if node.kind() == "expression_statement" {
            if let Some(module) = named_children(node)
                .into_iter()
                .find(|child| child.kind() == "internal_module")
            {
                self.module(module, Modifiers::default(), range(node));
                return;
            }
        }
        if !self.known(node, Modifiers::default(), None) {
            self.builder
                .start_node(NodeKind::Other, range(node), Modifiers::default());
            self.visit_children(node, None);
            self.builder.finish_node();
        }
    }

    fn visit(&mut self, node: Node<'_>) {
        if !self.known(node, Modifiers::default(), None) {
            self.visit_children(node, None);
        }
    }

    /// Visits every named child except `skip`.
    fn visit_children(&mut self, node: Node<'_>, skip: Option<Node<'_>>) {
        for child in named_children(node) {
            if skip.is_some_and(|skip| skip.id() == child.id()) {
                continue;
            }
            self.visit(child);
        }
    }

    /// Lowers constructs that map onto a [`NodeKind`]; returns false for the rest.
    ///
    /// `outer` is the span of a wrapping `export`/`declare` statement.
    fn known(&mut self, node: Node<'_>, modifiers: Modifiers, outer: Option<TextRange>) -> bool {
        let span = outer.unwrap_or_else(|| range(node));
        match node.kind() {
            "class_declaration" | "abstract_class_declaration" | "class" => {
                let mut modifiers = modifiers;
                if node.kind() == "abstract_class_declaration" {
                    modifiers.push(Modifier::Abstract);
                }
                self.class(node, modifiers, span);
            }
            "interface_declaration" => self.interface(node, modifiers, span),
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                self.named_declaration(node, NodeKind::FunctionDeclaration, modifiers, span);
            }
            "enum_declaration" => {
                self.named_declaration(node, NodeKind::EnumDeclaration, modifiers, span);
            }
            "type_alias_declaration" => {
                self.named_declaration(node, NodeKind::TypeAliasDeclaration, modifiers, span);
            }
            "internal_module" | "module" => self.module(node, modifiers, span),
            "lexical_declaration" | "variable_declaration" => {
                self.variable_statement(node, modifiers, span);
            }
            "import_statement" => self.import(node, span),
            "export_statement" => self.export(node),
            "ambient_declaration" => self.ambient(node, modifiers, span),
            "statement_block" => {
                self.builder.start_node(NodeKind::Block, span, modifiers);
                for statement in named_children(node) {
                    self.statement(statement);
                }
                self.builder.finish_node();
            }
            "object" => self.members_node(node, NodeKind::ObjectLiteral, Container::Object),
            "object_type" => self.members_node(node, NodeKind::TypeLiteral, Container::TypeLiteral),
            "formal_parameters" => self.parameters(node),
            "type_parameters" => self.type_parameters(node),
            "member_expression" => self.property_access(node),
            _ => return false,
        }
        true
    }

    fn class(&mut self, node: Node<'_>, modifiers: Modifiers, span: TextRange) {
        let name_node = node.child_by_field_name("name");
        let heritage = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "class_heritage")
            .map(|clauses| self.class_heritage(clauses))
            .unwrap_or_default();
        let declaration = TypeDeclaration {
            name: name_node.map(|name| self.name(name)),
            heritage,
        };

        self.builder
            .start_node(NodeKind::ClassDeclaration(declaration), span, modifiers);
        for child in named_children(node) {
            match child.kind() {
                "class_heritage" => {}
                "class_body" => self.members(child, Container::Class),
                _ if name_node.is_some_and(|name| name.id() == child.id()) => {}
                _ => self.visit(child),
            }
        }
        self.builder.finish_node();
    }

    fn class_heritage(&self, node: Node<'_>) -> Vec<HeritageClause> {
        let mut clauses = Vec::new();
        for clause in named_children(node) {
            match clause.kind() {
                "extends_clause" => {
                    let values = field_children(clause, "value");
                    let types = if values.is_empty() {
                        named_children(clause)
                            .into_iter()
                            .filter(|child| child.kind() != "type_arguments")
                            .collect()
                    } else {
                        values
                    };
                    clauses.push(HeritageClause {
                        token: HeritageToken::Extends,
                        types: types.into_iter().map(|t| self.type_reference(t)).collect(),
                    });
                }
                "implements_clause" => clauses.push(HeritageClause {
                    token: HeritageToken::Implements,
                    types: named_children(clause)
                        .into_iter()
                        .map(|t| self.type_reference(t))
                        .collect(),
                }),
                _ => {}
            }
        }
        clauses
    }

    fn interface(&mut self, node: Node<'_>, modifiers: Modifiers, span: TextRange) {
        let name_node = node.child_by_field_name("name");
        let heritage = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "extends_type_clause")
            .map(|clause| {
                let types = field_children(clause, "type");
                let types = if types.is_empty() {
                    named_children(clause)
                } else {
                    types
                };
                HeritageClause {
                    token: HeritageToken::Extends,
                    types: types.into_iter().map(|t| self.type_reference(t)).collect(),
                }
            })
            .collect();
        let declaration = TypeDeclaration {
            name: name_node.map(|name| self.name(name)),
            heritage,
        };

        self.builder
            .start_node(NodeKind::InterfaceDeclaration(declaration), span, modifiers);
        for child in named_children(node) {
            match child.kind() {
                "extends_type_clause" => {}
                "interface_body" | "object_type" => self.members(child, Container::Interface),
                _ if name_node.is_some_and(|name| name.id() == child.id()) => {}
                _ => self.visit(child),
            }
        }
        self.builder.finish_node();
    }

    fn type_reference(&self, node: Node<'_>) -> TypeReference {
        let target = match node.kind() {
            "generic_type" => node.child_by_field_name("name").unwrap_or(node),
            _ => node,
        };
        TypeReference {
            name: self
                .text(target)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
            range: range(target),
        }
    }

    fn members_node(&mut self, node: Node<'_>, kind: NodeKind, container: Container) {
        self.builder
            .start_node(kind, range(node), Modifiers::default());
        self.members(node, container);
        self.builder.finish_node();
    }

    fn members(&mut self, body: Node<'_>, container: Container) {
        for member in named_children(body) {
            match member.kind() {
                "method_definition" | "method_signature" | "abstract_method_signature" => {
                    self.method(member, container);
                }
                "public_field_definition" => self.property(member, PropertyForm::Declaration),
                "property_signature" => self.property(member, PropertyForm::Signature),
                _ => self.visit(member),
            }
        }
    }

    fn method(&mut self, node: Node<'_>, container: Container) {
        let Some(name_node) = node.child_by_field_name("name") else {
            self.visit_children(node, None);
            return;
        };
        let name = self.name(name_node);
        let mut modifiers = self.modifiers(node);
        if node.kind() == "abstract_method_signature" {
            modifiers.push(Modifier::Abstract);
        }

        let accessor = children(node)
            .into_iter()
            .filter(|child| !child.is_named())
            .find_map(|child| match child.kind() {
                "get" => Some(true),
                "set" => Some(false),
                _ => None,
            });

        let kind = match accessor {
            Some(true) => NodeKind::GetAccessor(name),
            Some(false) => NodeKind::SetAccessor(name),
            None if container == Container::Class
                && node.kind() == "method_definition"
                && name.is_identifier()
                && name.text == "constructor" =>
            {
                NodeKind::Constructor
            }
            None => match container {
                Container::Class | Container::Object => NodeKind::MethodDeclaration(name),
                Container::Interface | Container::TypeLiteral => NodeKind::MethodSignature(name),
            },
        };

        self.builder.start_node(kind, range(node), modifiers);
        self.visit_children(node, Some(name_node));
        self.builder.finish_node();
    }

    fn property(&mut self, node: Node<'_>, form: PropertyForm) {
        let Some(name_node) = node.child_by_field_name("name") else {
            self.visit_children(node, None);
            return;
        };
        let name = self.name(name_node);
        let kind = match form {
            PropertyForm::Declaration => NodeKind::PropertyDeclaration(name),
            PropertyForm::Signature => NodeKind::PropertySignature(name),
        };
        let modifiers = self.modifiers(node);

        self.builder.start_node(kind, range(node), modifiers);
        self.visit_children(node, Some(name_node));
        self.builder.finish_node();
    }

    fn parameters(&mut self, node: Node<'_>) {
        for parameter in named_children(node) {
            if !matches!(parameter.kind(), "required_parameter" | "optional_parameter") {
                self.visit(parameter);
                continue;
            }
            let Some(pattern) = parameter.child_by_field_name("pattern") else {
                self.visit_children(parameter, None);
                continue;
            };
            if pattern.kind() == "this" {
                self.visit_children(parameter, Some(pattern));
                continue;
            }

            let name = self.name(pattern);
            let modifiers = self.modifiers(parameter);
            self.builder
                .start_node(NodeKind::Parameter(name), range(parameter), modifiers);
            self.visit_children(parameter, Some(pattern));
            self.builder.finish_node();
        }
    }

    fn type_parameters(&mut self, node: Node<'_>) {
        for parameter in named_children(node) {
            let name_node = match parameter.kind() {
                "type_parameter" => parameter.child_by_field_name("name"),
                _ => None,
            };
            let Some(name_node) = name_node else {
                self.visit(parameter);
                continue;
            };
            let name = self.name(name_node);
            self.builder.start_node(
                NodeKind::TypeParameter(name),
                range(parameter),
                Modifiers::default(),
            );
            self.visit_children(parameter, Some(name_node));
            self.builder.finish_node();
        }
    }

    fn named_declaration(
        &mut self,
        node: Node<'_>,
        kind: fn(Name) -> NodeKind,
        modifiers: Modifiers,
        span: TextRange,
    ) {
        let Some(name_node) = node.child_by_field_name("name") else {
            self.builder.start_node(NodeKind::Other, span, modifiers);
            self.visit_children(node, None);
            self.builder.finish_node();
            return;
        };
        let name = self.name(name_node);
        self.builder.start_node(kind(name), span, modifiers);
        self.visit_children(node, Some(name_node));
        self.builder.finish_node();
    }

    fn module(&mut self, node: Node<'_>, modifiers: Modifiers, span: TextRange) {
        let Some(name_node) = node.child_by_field_name("name") else {
            self.builder.start_node(NodeKind::Other, span, modifiers);
            self.visit_children(node, None);
            self.builder.finish_node();
            return;
        };
        let name = self.name(name_node);
        self.builder
            .start_node(NodeKind::ModuleDeclaration(name), span, modifiers);
        if let Some(body) = node.child_by_field_name("body") {
            self.module_block(body);
        }
        self.builder.finish_node();
    }

    fn module_block(&mut self, body: Node<'_>) {
        self.builder
            .start_node(NodeKind::ModuleBlock, range(body), Modifiers::default());
        for statement in named_children(body) {
            self.statement(statement);
        }
        self.builder.finish_node();
    }

    fn ambient(&mut self, node: Node<'_>, modifiers: Modifiers, span: TextRange) {
        let mut modifiers = modifiers;
        modifiers.push(Modifier::Declare);

        let global = children(node)
            .into_iter()
            .find(|child| !child.is_named() && child.kind() == "global");
        if let Some(global) = global {
            let name = Name::identifier(self.text(global), range(global));
            self.builder
                .start_node(NodeKind::ModuleDeclaration(name), span, modifiers);
            if let Some(body) = named_children(node)
                .into_iter()
                .find(|child| child.kind() == "statement_block")
            {
                self.module_block(body);
            }
            self.builder.finish_node();
            return;
        }

        let lowered = named_children(node)
            .into_iter()
            .next()
            .is_some_and(|declaration| self.known(declaration, modifiers.clone(), Some(span)));
        if !lowered {
            self.builder.start_node(NodeKind::Other, span, modifiers);
            self.visit_children(node, None);
            self.builder.finish_node();
        }
    }

    fn export(&mut self, node: Node<'_>) {
        let span = range(node);
        let is_default = children(node)
            .into_iter()
            .any(|child| !child.is_named() && child.kind() == "default");
        let mut modifiers = Modifiers::new(vec![Modifier::Export]);
        if is_default {
            modifiers.push(Modifier::Default);
        }

        if let Some(declaration) = node.child_by_field_name("declaration") {
            if !self.known(declaration, modifiers.clone(), Some(span)) {
                self.builder.start_node(NodeKind::Other, span, modifiers);
                self.visit(declaration);
                self.builder.finish_node();
            }
            return;
        }

        let source = node.child_by_field_name("source");
        let has_clause = named_children(node)
            .into_iter()
            .any(|child| matches!(child.kind(), "export_clause" | "namespace_export"));
        let is_star = children(node).into_iter().any(|child| {
            child.kind() == "namespace_export" || (!child.is_named() && child.kind() == "*")
        });

        if node.child_by_field_name("value").is_none() && (source.is_some() || has_clause || is_star) {
            let declaration = ExportDeclaration {
                specifier: source.map(|source| self.module_specifier(source)),
                is_star,
            };
            self.builder.leaf(
                NodeKind::ExportDeclaration(declaration),
                span,
                Modifiers::default(),
            );
            return;
        }

        self.builder.start_node(NodeKind::Other, span, modifiers);
        self.visit_children(node, None);
        self.builder.finish_node();
    }

    fn import(&mut self, node: Node<'_>, span: TextRange) {
        let source = node.child_by_field_name("source").or_else(|| {
            named_children(node)
                .into_iter()
                .find(|child| child.kind() == "import_require_clause")
                .and_then(|clause| clause.child_by_field_name("source"))
        });
        let specifier = source
            .filter(|source| source.kind() == "string")
            .map(|source| self.module_specifier(source));
        self.builder.leaf(
            NodeKind::ImportDeclaration(specifier),
            span,
            Modifiers::default(),
        );
    }

    fn module_specifier(&self, node: Node<'_>) -> ModuleSpecifier {
        let text = self.text(node);
        let mut chars = text.chars();
        let quote = chars.next().filter(|c| matches!(c, '"' | '\'' | '`'));
        let value = match quote {
            Some(quote) => text
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
                .unwrap_or_default(),
            None => text,
        };
        ModuleSpecifier {
            value: value.to_string(),
            quote: quote.unwrap_or('"'),
            range: range(node),
        }
    }

    fn variable_statement(&mut self, node: Node<'_>, modifiers: Modifiers, span: TextRange) {
        let keyword = node
            .child_by_field_name("kind")
            .or_else(|| children(node).into_iter().next())
            .map(|keyword| self.text(keyword))
            .unwrap_or_default();
        let is_const = keyword == "const";
        let mut modifiers = modifiers;
        if is_const {
            modifiers.push(Modifier::Const);
        }

        let declarators: Vec<_> = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "variable_declarator")
            .collect();
        let statement = VariableStatement {
            is_const,
            declarators: declarators
                .iter()
                .filter_map(|declarator| self.declarator(*declarator))
                .collect(),
        };

        self.builder
            .start_node(NodeKind::VariableStatement(statement), span, modifiers);
        for declarator in declarators {
            self.visit_children(declarator, declarator.child_by_field_name("name"));
        }
        self.builder.finish_node();
    }

    fn declarator(&self, node: Node<'_>) -> Option<VariableDeclarator> {
        let name = self.name(node.child_by_field_name("name")?);
        let type_annotation = node
            .child_by_field_name("type")
            .map(|annotation| self.type_annotation(annotation));
        let initializer = node
            .child_by_field_name("value")
            .map(|value| self.initializer(value));
        Some(VariableDeclarator {
            name,
            type_annotation,
            initializer,
        })
    }

    fn type_annotation(&self, node: Node<'_>) -> TypeAnnotation {
        match node.kind() {
            "type_annotation" | "parenthesized_type" => named_children(node)
                .into_iter()
                .next()
                .map_or(TypeAnnotation::Other, |inner| self.type_annotation(inner)),
            "predefined_type" => keyword_type(self.text(node))
                .map_or(TypeAnnotation::Other, TypeAnnotation::Keyword),
            "literal_type" => match named_children(node).first().map(Node::kind) {
                Some("null") => TypeAnnotation::Keyword(KeywordType::Null),
                Some("undefined") => TypeAnnotation::Keyword(KeywordType::Undefined),
                _ => TypeAnnotation::Literal,
            },
            "template_literal_type" | "string" | "number" | "true" | "false" => {
                TypeAnnotation::Literal
            }
            "null" => TypeAnnotation::Keyword(KeywordType::Null),
            "undefined" => TypeAnnotation::Keyword(KeywordType::Undefined),
            "type_identifier" | "nested_type_identifier" => {
                let name: String = self
                    .text(node)
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                keyword_type(&name).map_or(TypeAnnotation::Reference(name), TypeAnnotation::Keyword)
            }
            "generic_type" => TypeAnnotation::Reference(self.type_reference(node).name),
            "union_type" => {
                let mut members = Vec::new();
                self.flatten_union(node, &mut members);
                TypeAnnotation::Union(members)
            }
            _ => TypeAnnotation::Other,
        }
    }

    fn flatten_union(&self, node: Node<'_>, members: &mut Vec<TypeAnnotation>) {
        for child in named_children(node) {
            if child.kind() == "union_type" {
                self.flatten_union(child, members);
            } else {
                members.push(self.type_annotation(child));
            }
        }
    }

    fn initializer(&self, node: Node<'_>) -> Initializer {
        match node.kind() {
            "string" => Initializer::StringLiteral,
            "template_string" => Initializer::TemplateLiteral,
            "number" => self.number(node),
            "true" | "false" => Initializer::BooleanLiteral,
            "null" => Initializer::Null,
            "undefined" => Initializer::Undefined,
            "identifier" => Initializer::Identifier(self.text(node).to_string()),
            "unary_expression" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|operator| self.text(operator))
                    .unwrap_or_default();
                let argument = node.child_by_field_name("argument");
                match (operator, argument) {
                    ("void", _) => Initializer::Void,
                    ("-" | "+" | "~", Some(argument)) if argument.kind() == "number" => {
                        self.number(argument)
                    }
                    _ => Initializer::Other,
                }
            }
            "call_expression" => match node.child_by_field_name("function") {
                Some(function) if self.text(function) == "Symbol" => Initializer::SymbolCall,
                _ => Initializer::Other,
            },
            "member_expression" => {
                match (
                    node.child_by_field_name("object"),
                    node.child_by_field_name("property"),
                ) {
                    (Some(object), Some(property)) => Initializer::MemberAccess {
                        object: self.text(object).to_string(),
                        property: self.text(property).to_string(),
                    },
                    _ => Initializer::Other,
                }
            }
            "parenthesized_expression" => named_children(node)
                .into_iter()
                .next()
                .map_or(Initializer::Other, |inner| self.initializer(inner)),
            _ => Initializer::Other,
        }
    }

    fn number(&self, node: Node<'_>) -> Initializer {
        if self.text(node).ends_with('n') {
            Initializer::BigIntLiteral
        } else {
            Initializer::NumericLiteral
        }
    }

    fn property_access(&mut self, node: Node<'_>) {
        let object = node.child_by_field_name("object");
        let Some(property) = node
            .child_by_field_name("property")
            .filter(|p| matches!(p.kind(), "property_identifier" | "private_property_identifier"))
        else {
            self.visit_children(node, None);
            return;
        };

        let receiver = match object.map(|object| object.kind()) {
            Some("this") => Receiver::This,
            Some("super") => Receiver::Super,
            _ => Receiver::Other,
        };
        let access = PropertyAccess {
            receiver,
            name: self.name(property),
        };
        self.builder.start_node(
            NodeKind::PropertyAccess(access),
            range(node),
            Modifiers::default(),
        );
        if let Some(object) = object {
            self.visit(object);
        }
        self.builder.finish_node();
    }

    fn name(&self, node: Node<'_>) -> Name {
        let kind = match node.kind() {
            "identifier"
            | "property_identifier"
            | "type_identifier"
            | "shorthand_property_identifier"
            | "nested_identifier" => NameKind::Identifier,
            "private_property_identifier" => NameKind::PrivateIdentifier,
            "string" => NameKind::StringLiteral,
            "number" => NameKind::NumericLiteral,
            "object_pattern" | "array_pattern" | "rest_pattern" | "assignment_pattern" => {
                NameKind::BindingPattern
            }
            _ => NameKind::Computed,
        };
        Name {
            text: self.text(node).to_string(),
            range: range(node),
            kind,
        }
    }

    fn modifiers(&self, node: Node<'_>) -> Modifiers {
        let mut modifiers = Modifiers::default();
        for child in children(node) {
            let modifier = match child.kind() {
                "accessibility_modifier" => match self.text(child) {
                    "public" => Modifier::Public,
                    "private" => Modifier::Private,
                    "protected" => Modifier::Protected,
                    _ => continue,
                },
                "override_modifier" => Modifier::Override,
                _ if child.is_named() => continue,
                "static" => Modifier::Static,
                "readonly" => Modifier::Readonly,
                "abstract" => Modifier::Abstract,
                "async" => Modifier::Async,
                "declare" => Modifier::Declare,
                _ => continue,
            };
            modifiers.push(modifier);
        }
        modifiers
    }
}

#[derive(Debug, Clone, Copy)]
enum PropertyForm {
    Declaration,
    Signature,
}

fn keyword_type(text: &str) -> Option<KeywordType> {
    Some(match text {
        "string" => KeywordType::String,
        "number" => KeywordType::Number,
        "bigint" => KeywordType::BigInt,
        "boolean" => KeywordType::Boolean,
        "symbol" | "unique symbol" => KeywordType::Symbol,
        "void" => KeywordType::Void,
        "undefined" => KeywordType::Undefined,
        "null" => KeywordType::Null,
        "any" => KeywordType::Any,
        "unknown" => KeywordType::Unknown,
        "never" => KeywordType::Never,
        "object" => KeywordType::Object,
        _ => return None,
    })
}

fn range(node: Node<'_>) -> TextRange {
    TextRange::new(offset(node.start_byte()), offset(node.end_byte()))
}

fn offset(byte: usize) -> TextSize {
    TextSize::try_from(byte).unwrap_or(TextSize::new(u32::MAX))
}

fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn field_children<'tree>(node: Node<'tree>, field: &str) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SyntaxKind;
    use crate::tree::NodeRef;

    fn kinds(tree: &SourceTree) -> Vec<SyntaxKind> {
        tree.walk().map(NodeRef::syntax_kind).collect()
    }

    fn find<'a>(tree: &'a SourceTree, kind: SyntaxKind) -> Vec<NodeRef<'a>> {
        tree.walk().filter(|node| node.syntax_kind() == kind).collect()
    }

    #[test]
    fn test_class_members_and_heritage() {
        let source = r"
class Widget extends Base implements Renderable, ns.Sized<number> {
    private _size: number = 0;
    public static readonly Count = 1;
    constructor(private readonly service: Service, label: string) {}
    get size(): number { return this._size; }
    set size(value: number) { this._size = value; }
    protected render(): void {}
}
";
        let tree = lower("widget.ts", source).unwrap();
        let class = find(&tree, SyntaxKind::ClassDeclaration)[0];
        let declaration = class.kind().type_declaration().unwrap();
        assert_eq!(declaration.name.as_ref().unwrap().text, "Widget");

        let heritage: Vec<_> = declaration
            .heritage
            .iter()
            .map(|clause| {
                (
                    clause.token,
                    clause.types.iter().map(|t| t.name.clone()).collect::<Vec<_>>(),
                )
            })
            .collect();
        assert_eq!(
            heritage,
            vec![
                (HeritageToken::Extends, vec!["Base".to_string()]),
                (
                    HeritageToken::Implements,
                    vec!["Renderable".to_string(), "ns.Sized".to_string()]
                ),
            ]
        );

        let members: Vec<_> = class
            .children()
            .filter(|child| child.kind().is_member())
            .map(NodeRef::syntax_kind)
            .collect();
        assert_eq!(
            members,
            vec![
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::PropertyDeclaration,
                SyntaxKind::Constructor,
                SyntaxKind::GetAccessor,
                SyntaxKind::SetAccessor,
                SyntaxKind::MethodDeclaration,
            ]
        );

        let count = find(&tree, SyntaxKind::PropertyDeclaration)[1];
        assert!(count.modifiers().contains(Modifier::Static));
        assert!(count.modifiers().contains(Modifier::Readonly));
        assert_eq!(count.modifiers().access(), Some(Modifier::Public));

        let parameters = find(&tree, SyntaxKind::Parameter);
        let service = parameters[0];
        assert_eq!(service.kind().name().unwrap().text, "service");
        assert_eq!(service.modifiers().access(), Some(Modifier::Private));
        assert_eq!(service.parent().unwrap().syntax_kind(), SyntaxKind::Constructor);

        let accesses = find(&tree, SyntaxKind::PropertyAccess);
        assert_eq!(accesses.len(), 2);
        assert!(accesses.iter().all(|access| matches!(
            access.kind(),
            NodeKind::PropertyAccess(PropertyAccess { receiver: Receiver::This, name }) if name.text == "_size"
        )));
    }

    #[test]
    fn test_interface_and_type_literal() {
        let source = r"
interface Shape extends Base, Other {
    area(): number;
    readonly Name: string;
}
type Options = { Verbose: boolean };
";
        let tree = lower("shape.ts", source).unwrap();
        let interface = find(&tree, SyntaxKind::InterfaceDeclaration)[0];
        let declaration = interface.kind().type_declaration().unwrap();
        assert_eq!(declaration.heritage.len(), 1);
        assert_eq!(declaration.heritage[0].types.len(), 2);

        let members: Vec<_> = interface.children().map(NodeRef::syntax_kind).collect();
        assert_eq!(
            members,
            vec![SyntaxKind::MethodSignature, SyntaxKind::PropertySignature]
        );

        let literal = find(&tree, SyntaxKind::TypeLiteral)[0];
        assert_eq!(
            literal.parent().unwrap().syntax_kind(),
            SyntaxKind::TypeAliasDeclaration
        );
        assert_eq!(
            literal.children().next().unwrap().syntax_kind(),
            SyntaxKind::PropertySignature
        );
    }

    #[test]
    fn test_const_statements() {
        let source = r#"
export const MAX_SIZE = 10;
const label: string | null = "a", big = 10n, neg = -1;
let counter = 0;
function run() { const inner = 1; }
"#;
        let tree = lower("consts.ts", source).unwrap();
        let statements = find(&tree, SyntaxKind::VariableStatement);
        assert_eq!(statements.len(), 4);

        let exported = statements[0];
        assert!(exported.modifiers().contains(Modifier::Export));
        assert_eq!(exported.parent().unwrap().syntax_kind(), SyntaxKind::SourceFile);
        assert!(exported.text().starts_with("export const"));

        let NodeKind::VariableStatement(multi) = statements[1].kind() else {
            panic!("expected a variable statement");
        };
        assert!(multi.is_const);
        assert_eq!(multi.declarators.len(), 3);
        assert_eq!(
            multi.declarators[0].type_annotation,
            Some(TypeAnnotation::Union(vec![
                TypeAnnotation::Keyword(KeywordType::String),
                TypeAnnotation::Keyword(KeywordType::Null),
            ]))
        );
        assert_eq!(multi.declarators[1].initializer, Some(Initializer::BigIntLiteral));
        assert_eq!(multi.declarators[2].initializer, Some(Initializer::NumericLiteral));

        let NodeKind::VariableStatement(mutable) = statements[2].kind() else {
            panic!("expected a variable statement");
        };
        assert!(!mutable.is_const);

        assert_eq!(statements[3].parent().unwrap().syntax_kind(), SyntaxKind::Block);
    }

    #[test]
    fn test_namespaces() {
        let source = r"
namespace Outer {
    export const A = 1;
    function helper() {}
    export namespace Inner {
        class Hidden {}
    }
}
declare global {
    interface Window {}
}
";
        let tree = lower("ns.ts", source).unwrap();
        let modules = find(&tree, SyntaxKind::ModuleDeclaration);
        let names: Vec<_> = modules
            .iter()
            .map(|module| module.kind().name().unwrap().text.clone())
            .collect();
        assert_eq!(names, vec!["Outer", "Inner", "global"]);
        assert!(modules[1].modifiers().contains(Modifier::Export));
        assert!(modules[2].modifiers().contains(Modifier::Declare));

        let outer_block = modules[0].children().next().unwrap();
        assert_eq!(outer_block.syntax_kind(), SyntaxKind::ModuleBlock);
        let statements: Vec<_> = outer_block.children().map(NodeRef::syntax_kind).collect();
        assert_eq!(
            statements,
            vec![
                SyntaxKind::VariableStatement,
                SyntaxKind::FunctionDeclaration,
                SyntaxKind::ModuleDeclaration,
            ]
        );
    }

    #[test]
    fn test_import_and_export_specifiers() {
        let source = r#"import { Button } from '../app/components/button/button';
export * from "./shared";
export { Icon } from "./icon";
export { local };
"#;
        let tree = lower("app/view.ts", source).unwrap();

        let import = find(&tree, SyntaxKind::ImportDeclaration)[0];
        let NodeKind::ImportDeclaration(Some(specifier)) = import.kind() else {
            panic!("expected an import specifier");
        };
        assert_eq!(specifier.value, "../app/components/button/button");
        assert_eq!(specifier.quote, '\'');
        assert_eq!(
            &source[specifier.range],
            "'../app/components/button/button'"
        );

        let exports: Vec<_> = find(&tree, SyntaxKind::ExportDeclaration)
            .into_iter()
            .map(|node| match node.kind() {
                NodeKind::ExportDeclaration(export) => (
                    export.specifier.as_ref().map(|s| s.value.clone()),
                    export.is_star,
                ),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            exports,
            vec![
                (Some("./shared".to_string()), true),
                (Some("./icon".to_string()), false),
                (None, false),
            ]
        );
    }

    #[test]
    fn test_type_parameters() {
        let source = "function map<TIn, result>(value: TIn): result { return value as any; }";
        let tree = lower("map.ts", source).unwrap();
        let names: Vec<_> = find(&tree, SyntaxKind::TypeParameter)
            .iter()
            .map(|node| node.kind().name().unwrap().text.clone())
            .collect();
        assert_eq!(names, vec!["TIn", "result"]);
    }

    #[test]
    fn test_object_literal_accessors() {
        let source = "const store = { get value() { return 1; }, load() {}, key: 1 };";
        let tree = lower("store.ts", source).unwrap();
        let literal = find(&tree, SyntaxKind::ObjectLiteral)[0];
        let members: Vec<_> = literal.children().map(NodeRef::syntax_kind).collect();
        assert_eq!(
            members,
            vec![SyntaxKind::GetAccessor, SyntaxKind::MethodDeclaration]
        );
    }

    #[test]
    fn test_declaration_file_and_unknown_statements() {
        let tree = lower("lib.d.ts", "declare const VERSION: string;\nif (a) { b(); }\n").unwrap();
        assert!(tree.is_declaration_file());
        assert_eq!(
            kinds(&tree),
            vec![
                SyntaxKind::SourceFile,
                SyntaxKind::VariableStatement,
                SyntaxKind::Other,
                SyntaxKind::Block,
                SyntaxKind::Other,
            ]
        );
    }
}

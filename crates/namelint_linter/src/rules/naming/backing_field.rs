//! BackingField rule - private `_name` fields belong to their accessors.
//!
//! A backing field is a private field (or private parameter property) named
//! `_` plus a camel-case name. It may only be read or written inside a
//! `get`/`set` accessor, and that accessor must carry the field's name.
//!
//! The rule runs once per file and tracks the enclosing classes and
//! accessors on a stack while walking down the tree.

use std::collections::HashSet;

use namelint_ast::{Modifier, Name, NodeId, NodeKind, NodeRef, PropertyAccess, Receiver, SyntaxKind};
use namelint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use namelint_text_size::Ranged;

use crate::case::{CaseFormat, PrefixMode, is_correct_format, transform};
use crate::classify::is_parameter_property;
use crate::{CheckContext, FromConfig, OptionsError, Properties, Rule};

const BACKING_FIELD_PREFIX: char = '_';

const RELEVANT_KINDS: &[SyntaxKind] = &[SyntaxKind::SourceFile];

#[derive(Debug, Clone, Default)]
pub struct BackingField;

impl FromConfig for BackingField {
    const MODULE_NAME: &'static str = "backing-field";

    fn from_config(_properties: &Properties) -> Result<Self, OptionsError> {
        Ok(Self)
    }
}

/// Violation for a backing field touched outside an accessor.
#[derive(Debug, Clone)]
pub struct BackingFieldOutsideAccessor;

impl Violation for BackingFieldOutsideAccessor {
    fn message(&self) -> String {
        "Backing field can only be used in GetAccessor and SetAccessor.".to_string()
    }
}

/// Violation for an accessor not named after the field it wraps.
#[derive(Debug, Clone)]
pub struct AccessorNameMismatch {
    pub accessor: String,
    pub field: String,
    pub expected: String,
}

impl Violation for AccessorNameMismatch {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

    fn message(&self) -> String {
        format!(
            "Accessor \"{}\" must be named after its backing field \"{}\" (\"{}\").",
            self.accessor, self.field, self.expected
        )
    }

    fn fix_title(&self) -> Option<String> {
        Some(format!("Rename accessor to `{}`", self.expected))
    }
}

impl Rule for BackingField {
    fn name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [SyntaxKind] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: NodeRef) -> Vec<Diagnostic> {
        if ctx.tree().is_declaration_file() {
            return vec![];
        }
        let mut visitor = BackingFieldVisitor::default();
        visitor.visit(node);
        visitor.diagnostics
    }
}

enum Frame<'a> {
    Class { private_fields: HashSet<&'a str> },
    Accessor { id: NodeId, name: &'a Name },
    /// Method or accessor of an object literal; `this` is the literal.
    LiteralMember,
}

#[derive(Default)]
struct BackingFieldVisitor<'a> {
    frames: Vec<Frame<'a>>,
    /// Accessors already reported, so each gets one rename.
    renamed: HashSet<NodeId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> BackingFieldVisitor<'a> {
    fn visit(&mut self, node: NodeRef<'a>) {
        let in_literal = node.parent().is_some_and(|parent| parent.kind().is_object_literal());
        let frame = match node.kind() {
            NodeKind::MethodDeclaration(_) | NodeKind::GetAccessor(_) | NodeKind::SetAccessor(_)
                if in_literal =>
            {
                Some(Frame::LiteralMember)
            }
            NodeKind::ClassDeclaration(_) => Some(Frame::Class {
                private_fields: private_fields(node),
            }),
            NodeKind::GetAccessor(name) | NodeKind::SetAccessor(name) => Some(Frame::Accessor {
                id: node.id(),
                name,
            }),
            NodeKind::PropertyAccess(access) => {
                self.check_access(node, access);
                None
            }
            _ => None,
        };

        let pushed = frame.is_some();
        self.frames.extend(frame);
        for child in node.children() {
            self.visit(child);
        }
        if pushed {
            self.frames.pop();
        }
    }

    fn check_access(&mut self, node: NodeRef<'a>, access: &'a PropertyAccess) {
        if access.receiver != Receiver::This || !access.name.is_identifier() {
            return;
        }
        let field = access.name.text.as_str();
        let Some(stripped) = backing_name(field) else {
            return;
        };

        let mut accessor = None;
        let mut owner_fields = None;
        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Accessor { id, name } => {
                    accessor.get_or_insert((*id, *name));
                }
                Frame::Class { private_fields } => {
                    owner_fields = Some(private_fields);
                    break;
                }
                Frame::LiteralMember => break,
            }
        }
        if !owner_fields.is_some_and(|fields| fields.contains(field)) {
            return;
        }

        let Some((id, accessor_name)) = accessor else {
            self.diagnostics
                .push(Diagnostic::new(BackingFieldOutsideAccessor, node.range()));
            return;
        };

        if !accessor_name.is_identifier()
            || transform(CaseFormat::CamelCase, &accessor_name.text, PrefixMode::None) == stripped
            || !self.renamed.insert(id)
        {
            return;
        }
        let fix = Fix::unsafe_edit(Edit::range_replacement(
            stripped.to_string(),
            accessor_name.range,
        ));
        self.diagnostics.push(
            Diagnostic::new(
                AccessorNameMismatch {
                    accessor: accessor_name.text.clone(),
                    field: field.to_string(),
                    expected: stripped.to_string(),
                },
                accessor_name.range,
            )
            .with_fix(fix),
        );
    }
}

/// `_fooBar` -> `fooBar`; `None` for names that are not backing-field shaped.
fn backing_name(field: &str) -> Option<&str> {
    field
        .strip_prefix(BACKING_FIELD_PREFIX)
        .filter(|rest| !rest.is_empty() && is_correct_format(CaseFormat::CamelCase, rest, PrefixMode::None))
}

/// Private fields declared directly by `class`, including constructor parameter properties.
fn private_fields<'a>(class: NodeRef<'a>) -> HashSet<&'a str> {
    let mut fields = HashSet::new();
    for member in class.children() {
        match member.kind() {
            NodeKind::PropertyDeclaration(name)
                if member.modifiers().access() == Some(Modifier::Private) =>
            {
                fields.insert(name.text.as_str());
            }
            NodeKind::Constructor => {
                for parameter in member.children() {
                    if let NodeKind::Parameter(name) = parameter.kind() {
                        if is_parameter_property(parameter)
                            && parameter.modifiers().access() == Some(Modifier::Private)
                        {
                            fields.insert(name.text.as_str());
                        }
                    }
                }
            }
            _ => {}
        }
    }
    fields
}

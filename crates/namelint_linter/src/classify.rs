//! Member classification by kind, visibility and static-ness.

use namelint_ast::{Modifier, NodeKind, NodeRef};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Also the visibility of members written without an access keyword.
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    fn from_modifier(modifier: Modifier) -> Option<Self> {
        match modifier {
            Modifier::Public => Some(Self::Public),
            Modifier::Private => Some(Self::Private),
            Modifier::Protected => Some(Self::Protected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Property,
    Getter,
    Setter,
}

/// The lookup key for a member's format rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub is_static: bool,
}

/// Classifies a member declaration. Constructor parameter properties count
/// as properties; anything that is not a named member yields `None`.
pub fn classify(node: NodeRef) -> Option<Classification> {
    let kind = match node.kind() {
        NodeKind::MethodDeclaration(_) | NodeKind::MethodSignature(_) => MemberKind::Method,
        NodeKind::PropertyDeclaration(_) | NodeKind::PropertySignature(_) => MemberKind::Property,
        NodeKind::Parameter(_) if is_parameter_property(node) => MemberKind::Property,
        NodeKind::GetAccessor(_) => MemberKind::Getter,
        NodeKind::SetAccessor(_) => MemberKind::Setter,
        _ => return None,
    };
    let modifiers = node.modifiers();

    Some(Classification {
        kind,
        visibility: modifiers
            .access()
            .and_then(Visibility::from_modifier)
            .unwrap_or_default(),
        is_static: modifiers.contains(Modifier::Static),
    })
}

/// A constructor parameter that also declares a property (`private x`, `readonly y`).
pub fn is_parameter_property(node: NodeRef) -> bool {
    node.kind().is_parameter()
        && node.parent().is_some_and(|parent| parent.kind().is_constructor())
        && (node.modifiers().access().is_some() || node.modifiers().contains(Modifier::Readonly))
}

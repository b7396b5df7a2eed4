//! ExportedNamespaceMembers rule implementation.
//!
//! Every declaration inside a `namespace`/`module` body must be exported.

use namelint_ast::{Modifier, NodeKind, NodeRef, SyntaxKind};
use namelint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use namelint_text_size::Ranged;

use crate::{CheckContext, FromConfig, OptionsError, Properties, Rule};

const RELEVANT_KINDS: &[SyntaxKind] = &[SyntaxKind::ModuleDeclaration];

#[derive(Debug, Clone, Default)]
pub struct ExportedNamespaceMembers;

impl FromConfig for ExportedNamespaceMembers {
    const MODULE_NAME: &'static str = "exported-namespace-members";

    fn from_config(_properties: &Properties) -> Result<Self, OptionsError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone)]
pub struct NamespaceMemberNotExported;

impl Violation for NamespaceMemberNotExported {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

    fn message(&self) -> String {
        "All module members must be exported.".to_string()
    }

    fn fix_title(&self) -> Option<String> {
        Some("Add `export`".to_string())
    }
}

impl Rule for ExportedNamespaceMembers {
    fn name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [SyntaxKind] {
        RELEVANT_KINDS
    }

    fn check(&self, _ctx: &CheckContext, node: NodeRef) -> Vec<Diagnostic> {
        // `declare global { }` augments the global scope; nothing there can be exported.
        if is_global_augmentation(node) {
            return vec![];
        }

        node.children()
            .filter(|child| child.kind().is_module_block())
            .flat_map(NodeRef::children)
            .filter(|statement| is_declaration(statement.kind()))
            .filter(|statement| !statement.modifiers().contains(Modifier::Export))
            .map(|statement| {
                let fix = Fix::safe_edit(Edit::insertion("export ".to_string(), statement.start()));
                Diagnostic::new(NamespaceMemberNotExported, statement.range()).with_fix(fix)
            })
            .collect()
    }
}

fn is_global_augmentation(node: NodeRef) -> bool {
    node.modifiers().contains(Modifier::Declare)
        && node.kind().name().is_some_and(|name| name.text == "global")
}

fn is_declaration(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::ClassDeclaration(_)
            | NodeKind::InterfaceDeclaration(_)
            | NodeKind::FunctionDeclaration(_)
            | NodeKind::EnumDeclaration(_)
            | NodeKind::TypeAliasDeclaration(_)
            | NodeKind::VariableStatement(_)
            | NodeKind::ModuleDeclaration(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check_rule;
    use namelint_diagnostics::{Applicability, apply_fixes};

    fn check_source(source: &str) -> Vec<Diagnostic> {
        check_rule(&ExportedNamespaceMembers, "shapes.ts", source)
    }

    #[test]
    fn test_exported_members_pass() {
        let source = "namespace Shapes { export class Circle {} export const PI = 3.14; export function area() {} }";
        assert!(check_source(source).is_empty());
    }

    #[test]
    fn test_unexported_members() {
        let source = "namespace Shapes {\n    class Circle {}\n    export interface Shape {}\n    type Kind = string;\n    let count = 0;\n}\n";
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 3);
        assert!(
            diagnostics
                .iter()
                .all(|d| d.message() == "All module members must be exported.")
        );
        assert_eq!(&source[diagnostics[0].range.to_std()], "class Circle {}");

        let fixed = apply_fixes(source, &diagnostics, Applicability::Safe);
        assert_eq!(
            fixed.output,
            "namespace Shapes {\n    export class Circle {}\n    export interface Shape {}\n    export type Kind = string;\n    export let count = 0;\n}\n"
        );
    }

    #[test]
    fn test_nested_namespaces() {
        let source = "namespace Outer { namespace Inner { function helper() {} } }";
        let diagnostics = check_source(source);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(&source[diagnostics[0].range.to_std()], "namespace Inner { function helper() {} }");
        assert_eq!(&source[diagnostics[1].range.to_std()], "function helper() {}");
    }

    #[test]
    fn test_global_augmentation_and_statements_are_skipped() {
        let source = "declare global { interface Window { app: string; } }\nnamespace Boot { console.log('ready'); }";
        assert!(check_source(source).is_empty());
    }
}

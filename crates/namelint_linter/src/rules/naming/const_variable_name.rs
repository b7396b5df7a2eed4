//! ConstVariableName rule implementation.
//!
//! File-level and namespace-level `const` variables must be in constant case.

use namelint_ast::{NodeKind, NodeRef, SyntaxKind};
use namelint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use serde::Deserialize;

use crate::case::{CaseFormat, PrefixMode, transform};
use crate::{CheckContext, FromConfig, OptionsError, Properties, Rule};

const RELEVANT_KINDS: &[SyntaxKind] = &[SyntaxKind::VariableStatement];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConstVariableName {
    /// Skip variables whose type is not a primitive, literal or enum.
    only_primitive_types: bool,
}

impl FromConfig for ConstVariableName {
    const MODULE_NAME: &'static str = "const-variable-name";

    fn from_config(properties: &Properties) -> Result<Self, OptionsError> {
        properties.options(Self::MODULE_NAME)
    }
}

#[derive(Debug, Clone)]
pub struct ConstVariableNotConstantCase {
    pub expected: String,
}

impl Violation for ConstVariableNotConstantCase {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

    fn message(&self) -> String {
        "Const variables in source file or in module declaration must have (constant-case) format"
            .to_string()
    }

    fn fix_title(&self) -> Option<String> {
        Some(format!("Rename to `{}`", self.expected))
    }
}

impl Rule for ConstVariableName {
    fn name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [SyntaxKind] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: NodeRef) -> Vec<Diagnostic> {
        let NodeKind::VariableStatement(statement) = node.kind() else {
            return vec![];
        };
        if !statement.is_const || !is_file_or_namespace_level(node) {
            return vec![];
        }

        let mut diagnostics = vec![];
        for declarator in &statement.declarators {
            let name = &declarator.name;
            if !name.is_identifier() {
                continue;
            }
            if self.only_primitive_types
                && !ctx.checker().type_category(ctx.file(), declarator).is_primitive()
            {
                continue;
            }

            let expected = transform(CaseFormat::ConstantCase, &name.text, PrefixMode::None);
            if expected != name.text {
                let fix = Fix::unsafe_edit(Edit::range_replacement(expected.clone(), name.range));
                diagnostics.push(
                    Diagnostic::new(ConstVariableNotConstantCase { expected }, name.range).with_fix(fix),
                );
            }
        }
        diagnostics
    }
}

fn is_file_or_namespace_level(statement: NodeRef) -> bool {
    let Some(parent) = statement.parent() else {
        return false;
    };
    match parent.kind() {
        NodeKind::SourceFile => true,
        NodeKind::ModuleBlock => parent
            .parent()
            .is_some_and(|module| module.kind().is_module_declaration()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_rule, rule_value};

    fn check_source(source: &str, options: &str) -> Vec<Diagnostic> {
        let value = rule_value(options);
        let config = namelint_config::Config::default();
        let rule = ConstVariableName::from_config(&Properties::new(&value, &config)).unwrap();
        check_rule(&rule, "consts.ts", source)
    }

    fn fixes(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics
            .iter()
            .filter_map(|d| d.replacement().and_then(|edit| edit.content()))
            .collect()
    }

    #[test]
    fn test_file_scope() {
        let diagnostics = check_source(
            "const MAX_SIZE = 10;\nconst maxSize = 10;\nexport const defaultName = 'x';",
            "true",
        );
        assert_eq!(fixes(&diagnostics), vec!["MAX_SIZE", "DEFAULT_NAME"]);
        assert_eq!(
            diagnostics[0].message(),
            "Const variables in source file or in module declaration must have (constant-case) format"
        );
    }

    #[test]
    fn test_nested_scopes_are_ignored() {
        let diagnostics = check_source(
            "function run() { const maxSize = 10; }\nclass A { m() { const localValue = 1; } }",
            "true",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_let_and_var_are_ignored() {
        let diagnostics = check_source("let counter = 0;\nvar legacyValue = 1;", "true");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_namespace_scope() {
        let diagnostics = check_source(
            "namespace Config { export const timeoutMs = 5; namespace Inner { const retryCount = 3; } }",
            "true",
        );
        assert_eq!(fixes(&diagnostics), vec!["TIMEOUT_MS", "RETRY_COUNT"]);
    }

    #[test]
    fn test_only_primitive_types() {
        let source = r"
enum Color { Red }
const maxSize = 10;
const defaultColor = Color.Red;
const handlers = { click: () => {} };
const apiUrl: string | undefined = undefined;
const service: Service = createService();
";
        let diagnostics = check_source(source, "[true, \"only-primitive-types\"]");
        assert_eq!(fixes(&diagnostics), vec!["MAX_SIZE", "DEFAULT_COLOR", "API_URL"]);

        let all = check_source(source, "true");
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_destructuring_is_skipped() {
        let diagnostics = check_source("const { someValue } = load();", "true");
        assert!(diagnostics.is_empty());
    }
}

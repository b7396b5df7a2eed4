//! ClassMembersName rule implementation.
//!
//! Checks the case style of class, interface and type literal members
//! against an ordered table of format rules. Object literal members are not
//! checked.

use namelint_ast::{Modifier, NodeRef, SyntaxKind};
use namelint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};

use crate::case::{CaseFormat, transform};
use crate::classify::{classify, is_parameter_property};
use crate::heritage::declares_member;
use crate::options::ResolvedOptions;
use crate::{CheckContext, FromConfig, OptionsError, Properties, Rule};

const RELEVANT_KINDS: &[SyntaxKind] = &[
    SyntaxKind::MethodDeclaration,
    SyntaxKind::MethodSignature,
    SyntaxKind::PropertyDeclaration,
    SyntaxKind::PropertySignature,
    SyntaxKind::GetAccessor,
    SyntaxKind::SetAccessor,
    SyntaxKind::Parameter,
];

#[derive(Debug, Clone)]
pub struct ClassMembersName {
    options: ResolvedOptions,
}

impl FromConfig for ClassMembersName {
    const MODULE_NAME: &'static str = "class-members-name";

    fn from_config(properties: &Properties) -> Result<Self, OptionsError> {
        Ok(Self {
            options: ResolvedOptions::from_value(Self::MODULE_NAME, properties.value())?,
        })
    }
}

/// Violation for a member name not in its required format.
#[derive(Debug, Clone)]
pub struct MemberNameFormat {
    pub name: String,
    pub format: CaseFormat,
    pub expected: String,
}

impl Violation for MemberNameFormat {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

    fn message(&self) -> String {
        format!(
            "Declaration \"{}\" format is not correct ({}).",
            self.name, self.format
        )
    }

    fn fix_title(&self) -> Option<String> {
        Some(format!("Rename to `{}`", self.expected))
    }
}

impl Rule for ClassMembersName {
    fn name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [SyntaxKind] {
        RELEVANT_KINDS
    }

    fn check(&self, ctx: &CheckContext, node: NodeRef) -> Vec<Diagnostic> {
        let Some(name) = node.kind().name() else {
            return vec![];
        };
        if !name.is_identifier() {
            return vec![];
        }

        // Only `private` parameter properties; the owner is the constructor's class.
        let owner = if node.kind().is_parameter() {
            if !is_parameter_property(node) || node.modifiers().access() != Some(Modifier::Private) {
                return vec![];
            }
            node.parent().and_then(NodeRef::parent)
        } else {
            node.parent()
        };
        if owner.is_some_and(|owner| owner.kind().is_object_literal()) {
            return vec![];
        }

        if let Some(owner_name) = owner
            .and_then(|owner| owner.kind().type_declaration())
            .and_then(|decl| decl.name.as_ref())
        {
            if self.options.ignores_parent(&owner_name.text) {
                return vec![];
            }
        }

        let Some(key) = classify(node) else {
            return vec![];
        };
        let Some(resolved) = self.options.resolve(&key) else {
            return vec![];
        };

        if !self.options.skip_origin_checking {
            if let Some(owner) = owner {
                if declares_member(
                    ctx.checker(),
                    ctx.file(),
                    owner,
                    &name.text,
                    self.options.heritage_search,
                ) {
                    tracing::trace!(member = name.text.as_str(), "inherited, not checked");
                    return vec![];
                }
            }
        }

        let expected = transform(resolved.format, &name.text, resolved.prefix);
        if expected == name.text {
            return vec![];
        }

        let fix = Fix::unsafe_edit(Edit::range_replacement(expected.clone(), name.range));
        vec![
            Diagnostic::new(
                MemberNameFormat {
                    name: name.text.clone(),
                    format: resolved.format,
                    expected,
                },
                name.range,
            )
            .with_fix(fix),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_rule, rule_value};

    fn check_source(source: &str, options: &str) -> Vec<Diagnostic> {
        let value = rule_value(options);
        let config = namelint_config::Config::default();
        let rule = ClassMembersName::from_config(&Properties::new(&value, &config)).unwrap();
        check_rule(&rule, "members.ts", source)
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(Diagnostic::message).collect()
    }

    #[test]
    fn test_object_literal_members_are_skipped() {
        let source = "const handlers = { On_Click() {}, get Some_Value() { return 1; }, Plain_Key: 1 };\nclass View { On_Click() {} }";
        assert_eq!(
            messages(&check_source(source, "true")),
            vec!["Declaration \"On_Click\" format is not correct (camel-case)."]
        );
    }

    #[test]
    fn test_default_is_camel_case() {
        let diagnostics = check_source(
            "class Store { load_items() {} Count = 0; get Size() { return 0; } ok() {} }",
            "true",
        );
        assert_eq!(
            messages(&diagnostics),
            vec![
                "Declaration \"load_items\" format is not correct (camel-case).",
                "Declaration \"Count\" format is not correct (camel-case).",
                "Declaration \"Size\" format is not correct (camel-case).",
            ]
        );
        assert_eq!(diagnostics[0].replacement().unwrap().content(), Some("loadItems"));
    }

    #[test]
    fn test_rule_table_resolution() {
        let diagnostics = check_source(
            "class Worker { private doThing() {} do_thing() {} private keep_it() {} }",
            r#"[true, "camel-case", [{ kind = "method", modifier = "private", format = "snake-case" }]]"#,
        );
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].replacement().unwrap().content(), Some("do_thing"));
        assert_eq!(diagnostics[1].replacement().unwrap().content(), Some("doThing"));
    }

    #[test]
    fn test_inherited_names_are_exempt() {
        let source = "interface Renderable { render(): void; }\n\
                      class View implements Renderable { render() {} Render_Bad() {} }";
        let diagnostics = check_source(source, r#"[true, "pascal-case"]"#);
        assert_eq!(
            messages(&diagnostics),
            vec![
                "Declaration \"render\" format is not correct (pascal-case).",
                "Declaration \"Render_Bad\" format is not correct (pascal-case).",
            ]
        );
        // the first one is the interface's own declaration
        assert!(diagnostics[0].range.start() < diagnostics[1].range.start());
        assert_eq!(diagnostics[1].replacement().unwrap().content(), Some("RenderBad"));
    }

    #[test]
    fn test_skip_origin_checking() {
        let source = "interface Renderable { render(): void; }\n\
                      class View implements Renderable { render() {} }";
        let diagnostics = check_source(source, r#"[true, "pascal-case", "skip-origin-checking"]"#);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_private_parameter_properties_only() {
        let diagnostics = check_source(
            "class Api { constructor(private Http_Client: Client, public Base_Url: string, plain_arg: number) {} }",
            "true",
        );
        assert_eq!(
            messages(&diagnostics),
            vec!["Declaration \"Http_Client\" format is not correct (camel-case)."]
        );
    }

    #[test]
    fn test_leading_underscore_and_prefixes() {
        let source = "class Model { private _cache_map = 1; $store_ref = 2; }";
        let diagnostics = check_source(
            source,
            r#"[true, "camel-case", [
                { kind = "property", modifier = "private", format = "camel-case", leadingUnderscore = true },
                { kind = "property", format = "camel-case", allowedPrefixes = ["$"] },
            ]]"#,
        );
        let fixes: Vec<_> = diagnostics
            .iter()
            .filter_map(|d| d.replacement().and_then(|edit| edit.content()))
            .collect();
        assert_eq!(fixes, vec!["_cacheMap", "$storeRef"]);
    }

    #[test]
    fn test_ignored_parent_suffix_and_unchecked_names() {
        let diagnostics = check_source(
            "interface ButtonProps { On_Click(): void; }\nclass Button { 'Quoted_Name' = 1; #Hidden_Field = 2; }",
            r#"{ default-format = "camel-case", ignore-parent-suffixes = ["Props"] }"#,
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_no_default_leaves_unmatched_members_alone() {
        let diagnostics = check_source(
            "class Store { Load_Items() {} Count_Total = 0; }",
            r#"[true, [{ kind = "property", format = "pascal-case" }]]"#,
        );
        assert_eq!(
            messages(&diagnostics),
            vec!["Declaration \"Count_Total\" format is not correct (pascal-case)."]
        );
    }
}

//! TypeParameterName rule implementation.
//!
//! Generic type parameters must start with a prefix (`T` by default)
//! followed by a character that is not lowercase: `TItem`, `TKey`, `T1`.

use namelint_ast::{NodeRef, SyntaxKind};
use namelint_diagnostics::{Diagnostic, Edit, Fix, FixAvailability, Violation};
use serde::Deserialize;

use crate::case::{CaseFormat, PrefixMode, transform};
use crate::{CheckContext, FromConfig, OptionsError, Properties, Rule};

const DEFAULT_PREFIX: &str = "T";

const RELEVANT_KINDS: &[SyntaxKind] = &[SyntaxKind::TypeParameter];

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeParameterName {
    prefix: String,
}

impl Default for TypeParameterName {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl FromConfig for TypeParameterName {
    const MODULE_NAME: &'static str = "type-parameter-name";

    fn from_config(properties: &Properties) -> Result<Self, OptionsError> {
        properties.options(Self::MODULE_NAME)
    }
}

#[derive(Debug, Clone)]
pub struct TypeParameterMissingPrefix {
    pub prefix: String,
    pub expected: String,
}

impl Violation for TypeParameterMissingPrefix {
    const FIX_AVAILABILITY: FixAvailability = FixAvailability::Always;

    fn message(&self) -> String {
        format!(
            "Type parameter's name must start with \"{}\" prefix.",
            self.prefix
        )
    }

    fn fix_title(&self) -> Option<String> {
        Some(format!("Rename to `{}`", self.expected))
    }
}

impl TypeParameterName {
    fn has_prefix(&self, name: &str) -> bool {
        name.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.chars().next())
            .is_some_and(|next| !next.is_lowercase())
    }
}

impl Rule for TypeParameterName {
    fn name(&self) -> &'static str {
        Self::MODULE_NAME
    }

    fn relevant_kinds(&self) -> &'static [SyntaxKind] {
        RELEVANT_KINDS
    }

    fn check(&self, _ctx: &CheckContext, node: NodeRef) -> Vec<Diagnostic> {
        let Some(name) = node.kind().name() else {
            return vec![];
        };
        if self.has_prefix(&name.text) {
            return vec![];
        }

        let expected = format!(
            "{}{}",
            self.prefix,
            transform(CaseFormat::PascalCase, &name.text, PrefixMode::None)
        );
        let fix = Fix::unsafe_edit(Edit::range_replacement(expected.clone(), name.range));
        vec![
            Diagnostic::new(
                TypeParameterMissingPrefix {
                    prefix: self.prefix.clone(),
                    expected,
                },
                name.range,
            )
            .with_fix(fix),
        ]
    }
}

//! Naming-convention rules for TypeScript.
//!
//! A [`Rule`] inspects one [`NodeRef`] at a time and returns [`Diagnostic`]s.
//! The [`Linter`] walks a file once per rule, handing each rule only the node
//! kinds it declared relevant.

pub mod case;
pub mod classify;
pub mod heritage;
pub mod options;
mod registry;
pub mod rules;
#[cfg(test)]
mod test_support;

use namelint_ast::{FileId, NodeRef, SourceTree, SyntaxKind, TypeChecker};
use namelint_config::Config;
use namelint_diagnostics::Diagnostic;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use registry::RuleRegistry;

/// Rule options that could not be understood.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("rule `{rule}`: {source}")]
    Invalid {
        rule: &'static str,
        #[source]
        source: toml::de::Error,
    },
    #[error("rule `{rule}`: unknown option `{token}`")]
    UnknownToken { rule: &'static str, token: String },
    #[error("rule `{rule}`: format rule #{index} sets both `leadingUnderscore` and `allowedPrefixes`")]
    ConflictingPrefixes { rule: &'static str, index: usize },
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

/// Raw options of one rule plus the shared settings.
#[derive(Debug, Clone, Copy)]
pub struct Properties<'a> {
    value: &'a toml::Value,
    config: &'a Config,
}

impl<'a> Properties<'a> {
    pub fn new(value: &'a toml::Value, config: &'a Config) -> Self {
        Self { value, config }
    }

    pub fn value(&self) -> &'a toml::Value {
        self.value
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Deserializes keyed options.
    ///
    /// `true` yields the defaults. In an argument list a string token `"flag"`
    /// means `flag = true` and an inline table is merged in; a leading boolean
    /// is the enable switch.
    pub fn options<T: DeserializeOwned + Default>(&self, rule: &'static str) -> Result<T, OptionsError> {
        let mut table = toml::Table::new();
        match self.value {
            toml::Value::Table(options) => table.extend(options.clone()),
            toml::Value::Array(arguments) => {
                for argument in arguments.iter().skip_while(|arg| arg.is_bool()) {
                    match argument {
                        toml::Value::String(flag) => {
                            table.insert(flag.clone(), toml::Value::Boolean(true));
                        }
                        toml::Value::Table(options) => table.extend(options.clone()),
                        other => {
                            return Err(OptionsError::UnknownToken {
                                rule,
                                token: other.to_string(),
                            });
                        }
                    }
                }
            }
            _ => return Ok(T::default()),
        }
        table.remove("enabled");
        if table.is_empty() {
            return Ok(T::default());
        }
        toml::Value::Table(table)
            .try_into::<T>()
            .map_err(|source| OptionsError::Invalid { rule, source })
    }
}

/// Rules that can be built from configuration.
pub trait FromConfig: Sized {
    /// The key under `[rules]`.
    const MODULE_NAME: &'static str;

    fn from_config(properties: &Properties) -> Result<Self, OptionsError>;
}

/// Per-file state shared by every rule invocation.
pub struct CheckContext<'a> {
    tree: &'a SourceTree,
    file: FileId,
    checker: &'a dyn TypeChecker,
}

impl<'a> CheckContext<'a> {
    pub fn new(tree: &'a SourceTree, file: FileId, checker: &'a dyn TypeChecker) -> Self {
        Self {
            tree,
            file,
            checker,
        }
    }

    pub fn tree(&self) -> &'a SourceTree {
        self.tree
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn checker(&self) -> &'a dyn TypeChecker {
        self.checker
    }

    pub fn source(&self) -> &'a str {
        self.tree.text()
    }
}

pub trait Rule: Send + Sync {
    /// The rule's configuration key, e.g. `class-members-name`.
    fn name(&self) -> &'static str;

    /// Node kinds passed to [`Rule::check`]. Empty means every node.
    fn relevant_kinds(&self) -> &'static [SyntaxKind] {
        &[]
    }

    fn check(&self, ctx: &CheckContext, node: NodeRef) -> Vec<Diagnostic>;
}

/// Runs a set of rules over files of a program.
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Builds the rules enabled in `config`.
    pub fn from_config(config: &Config) -> Result<Self, OptionsError> {
        RuleRegistry::builtin().build(config).map(Self::new)
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Lints one file, returning diagnostics ordered by position.
    pub fn check(&self, checker: &dyn TypeChecker, file: FileId) -> Vec<Diagnostic> {
        let Some(tree) = checker.tree(file) else {
            tracing::warn!(file = file.index(), "file is not part of the program");
            return vec![];
        };
        let ctx = CheckContext::new(tree, file, checker);
        tracing::debug!(file = tree.file_name(), rules = self.rules.len(), "linting");

        let mut diagnostics = Vec::new();
        for rule in &self.rules {
            let kinds = rule.relevant_kinds();
            for node in tree.walk() {
                if !kinds.is_empty() && !kinds.contains(&node.syntax_kind()) {
                    continue;
                }
                diagnostics.extend(
                    rule.check(&ctx, node)
                        .into_iter()
                        .map(|diagnostic| diagnostic.with_rule(rule.name())),
                );
            }
        }

        diagnostics.sort_by(|a, b| {
            a.range
                .start()
                .cmp(&b.range.start())
                .then_with(|| a.rule.cmp(&b.rule))
        });
        tracing::debug!(
            file = tree.file_name(),
            diagnostics = diagnostics.len(),
            "linted"
        );
        diagnostics
    }
}

//! Helpers shared by rule unit tests.

use namelint_ast::{Program, lower};
use namelint_diagnostics::Diagnostic;

use crate::{CheckContext, Rule};

/// Parses `source`, then runs `rule` over every relevant node in position order.
pub(crate) fn check_rule(rule: &dyn Rule, file_name: &str, source: &str) -> Vec<Diagnostic> {
    check_files(rule, &[(file_name, source)], 0)
}

/// Like [`check_rule`] over several files; only `target` is checked.
pub(crate) fn check_files(rule: &dyn Rule, files: &[(&str, &str)], target: usize) -> Vec<Diagnostic> {
    let program = Program::new(
        files
            .iter()
            .map(|(file_name, source)| lower(file_name, source).unwrap())
            .collect(),
    );
    let (file, tree) = program
        .files()
        .find(|(file, _)| file.index() == target)
        .unwrap();
    let ctx = CheckContext::new(tree, file, &program);

    let kinds = rule.relevant_kinds();
    let mut diagnostics: Vec<Diagnostic> = tree
        .walk()
        .filter(|node| kinds.is_empty() || kinds.contains(&node.syntax_kind()))
        .flat_map(|node| rule.check(&ctx, node))
        .collect();
    diagnostics.sort_by_key(|diagnostic| diagnostic.range.start());
    diagnostics
}

/// Parses a TOML value written as the right-hand side of `rule = ...`.
pub(crate) fn rule_value(value: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("rule = {value}"))
        .unwrap()
        .remove("rule")
        .unwrap()
}

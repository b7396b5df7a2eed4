//! Options of the `class-members-name` rule.
//!
//! Accepted shapes, all under `[rules]`:
//!
//! ```toml
//! class-members-name = true
//! class-members-name = [true, "pascal-case", "skip-origin-checking", [{ kind = "method", format = "camel-case" }]]
//! class-members-name = { default-format = "camel-case", ignore-parent-suffixes = ["Props"] }
//! ```

use serde::Deserialize;

use crate::OptionsError;
use crate::case::{CaseFormat, PrefixMode};
use crate::classify::{Classification, MemberKind, Visibility};
use crate::heritage::HeritageSearch;

const SKIP_ORIGIN_CHECKING: &str = "skip-origin-checking";

/// One entry of the format table. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatRule {
    pub kind: Option<MemberKind>,
    pub modifier: Option<Visibility>,
    #[serde(rename = "isStatic")]
    pub is_static: Option<bool>,
    /// Unset means any name is accepted.
    pub format: Option<CaseFormat>,
    #[serde(rename = "leadingUnderscore")]
    pub leading_underscore: Option<bool>,
    #[serde(rename = "allowedPrefixes")]
    pub allowed_prefixes: Option<Vec<String>>,
}

impl FormatRule {
    pub fn matches(&self, key: &Classification) -> bool {
        self.kind.is_none_or(|kind| kind == key.kind)
            && self.modifier.is_none_or(|modifier| modifier == key.visibility)
            && self.is_static.is_none_or(|is_static| is_static == key.is_static)
    }

    fn prefix_mode(&self) -> PrefixMode<'_> {
        if self.leading_underscore == Some(true) {
            PrefixMode::LeadingUnderscore
        } else if let Some(prefixes) = &self.allowed_prefixes {
            PrefixMode::Allowed(prefixes)
        } else {
            PrefixMode::None
        }
    }
}

/// The format a member must follow, as picked by [`ResolvedOptions::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub format: CaseFormat,
    pub prefix: PrefixMode<'a>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct StructuredOptions {
    default_format: Option<CaseFormat>,
    skip_origin_checking: bool,
    heritage_search: HeritageSearch,
    ignore_parent_suffixes: Vec<String>,
    formats: Vec<FormatRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub default_format: Option<CaseFormat>,
    pub skip_origin_checking: bool,
    pub heritage_search: HeritageSearch,
    pub rules: Vec<FormatRule>,
    pub ignore_parent_suffixes: Vec<String>,
}

impl ResolvedOptions {
    /// Interprets a raw rule value. An empty argument list means camel-case
    /// for everything.
    pub fn from_value(rule: &'static str, value: &toml::Value) -> Result<Self, OptionsError> {
        let table = match value {
            toml::Value::Table(options) => {
                let mut options = options.clone();
                options.remove("enabled");
                options
            }
            toml::Value::Array(arguments) => arguments_table(rule, arguments)?,
            _ => toml::Table::new(),
        };

        if table.is_empty() {
            return Ok(Self {
                default_format: Some(CaseFormat::CamelCase),
                ..Self::default()
            });
        }

        let structured: StructuredOptions = toml::Value::Table(table)
            .try_into()
            .map_err(|source| OptionsError::Invalid { rule, source })?;

        if let Some(index) = structured
            .formats
            .iter()
            .position(|format| format.leading_underscore == Some(true) && format.allowed_prefixes.is_some())
        {
            return Err(OptionsError::ConflictingPrefixes { rule, index });
        }

        Ok(Self {
            default_format: structured.default_format,
            skip_origin_checking: structured.skip_origin_checking,
            heritage_search: structured.heritage_search,
            rules: structured.formats,
            ignore_parent_suffixes: structured.ignore_parent_suffixes,
        })
    }

    /// The first matching table entry, else the default format. `None` leaves
    /// the member unchecked.
    pub fn resolve(&self, key: &Classification) -> Option<Resolved<'_>> {
        if let Some(rule) = self.rules.iter().find(|rule| rule.matches(key)) {
            return Some(Resolved {
                format: rule.format.unwrap_or(CaseFormat::None),
                prefix: rule.prefix_mode(),
            });
        }
        self.default_format.map(|format| Resolved {
            format,
            prefix: PrefixMode::None,
        })
    }

    pub fn ignores_parent(&self, parent_name: &str) -> bool {
        self.ignore_parent_suffixes
            .iter()
            .any(|suffix| parent_name.ends_with(suffix.as_str()))
    }
}

/// Folds a tslint-style argument list into the structured form.
fn arguments_table(rule: &'static str, arguments: &[toml::Value]) -> Result<toml::Table, OptionsError> {
    let mut table = toml::Table::new();
    for argument in arguments.iter().skip_while(|argument| argument.is_bool()) {
        match argument {
            toml::Value::String(token) if token == SKIP_ORIGIN_CHECKING => {
                table.insert(SKIP_ORIGIN_CHECKING.to_string(), toml::Value::Boolean(true));
            }
            toml::Value::String(token) if token.parse::<CaseFormat>().is_ok() => {
                if !table.contains_key("default-format") {
                    table.insert("default-format".to_string(), argument.clone());
                }
            }
            toml::Value::Array(_) => {
                if !table.contains_key("formats") {
                    table.insert("formats".to_string(), argument.clone());
                }
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
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: &str) -> Result<ResolvedOptions, OptionsError> {
        let value = toml::from_str::<toml::Table>(&format!("rule = {value}"))
            .unwrap()
            .remove("rule")
            .unwrap();
        ResolvedOptions::from_value("class-members-name", &value)
    }

    fn key(kind: MemberKind, visibility: Visibility, is_static: bool) -> Classification {
        Classification {
            kind,
            visibility,
            is_static,
        }
    }

    #[test]
    fn test_enabled_without_arguments_is_camel_case() {
        for value in ["true", "[true]", "{ enabled = true }"] {
            let options = parse(value).unwrap();
            assert_eq!(options.default_format, Some(CaseFormat::CamelCase), "{value}");
            assert!(!options.skip_origin_checking);
        }
    }

    #[test]
    fn test_argument_list() {
        let options = parse(
            r#"[true, "pascal-case", "skip-origin-checking", "snake-case", [{ kind = "method", modifier = "private", format = "snake-case" }]]"#,
        )
        .unwrap();
        assert_eq!(options.default_format, Some(CaseFormat::PascalCase));
        assert!(options.skip_origin_checking);
        assert_eq!(options.rules.len(), 1);
        assert_eq!(options.rules[0].kind, Some(MemberKind::Method));
    }

    #[test]
    fn test_arguments_without_format_leave_default_unset() {
        let options = parse(r#"[true, [{ kind = "property", format = "camel-case" }]]"#).unwrap();
        assert_eq!(options.default_format, None);
        let getter = key(MemberKind::Getter, Visibility::Public, false);
        assert_eq!(options.resolve(&getter), None);
    }

    #[test]
    fn test_structured_table() {
        let options = parse(
            r#"{ default-format = "camel-case", heritage-search = "exhaustive", ignore-parent-suffixes = ["Props"], formats = [{ kind = "property", isStatic = true, format = "constant-case" }] }"#,
        )
        .unwrap();
        assert_eq!(options.heritage_search, HeritageSearch::Exhaustive);
        assert!(options.ignores_parent("ButtonProps"));
        assert!(!options.ignores_parent("Button"));
        let resolved = options
            .resolve(&key(MemberKind::Property, Visibility::Private, true))
            .unwrap();
        assert_eq!(resolved.format, CaseFormat::ConstantCase);
    }

    #[test]
    fn test_first_match_wins() {
        let options = parse(
            r#"[true, "camel-case", [
                { kind = "method", modifier = "private", format = "snake-case" },
                { kind = "method", format = "pascal-case" },
                { kind = "property", leadingUnderscore = true, format = "camel-case" },
                { kind = "getter" },
            ]]"#,
        )
        .unwrap();

        let private_method = options
            .resolve(&key(MemberKind::Method, Visibility::Private, false))
            .unwrap();
        assert_eq!(private_method.format, CaseFormat::SnakeCase);

        let public_method = options
            .resolve(&key(MemberKind::Method, Visibility::Public, true))
            .unwrap();
        assert_eq!(public_method.format, CaseFormat::PascalCase);

        let property = options
            .resolve(&key(MemberKind::Property, Visibility::Protected, false))
            .unwrap();
        assert_eq!(property.prefix, PrefixMode::LeadingUnderscore);

        let getter = options
            .resolve(&key(MemberKind::Getter, Visibility::Public, false))
            .unwrap();
        assert_eq!(getter.format, CaseFormat::None);

        let setter = options
            .resolve(&key(MemberKind::Setter, Visibility::Public, false))
            .unwrap();
        assert_eq!(setter.format, CaseFormat::CamelCase);
        assert_eq!(setter.prefix, PrefixMode::None);
    }

    #[test]
    fn test_conflicting_prefix_modes() {
        let error = parse(
            r#"[true, [{ kind = "method" }, { kind = "property", leadingUnderscore = true, allowedPrefixes = ["$"] }]]"#,
        )
        .unwrap_err();
        assert!(matches!(error, OptionsError::ConflictingPrefixes { index: 1, .. }));
    }

    #[test]
    fn test_bad_tokens() {
        assert!(matches!(
            parse(r#"[true, "kebab-case"]"#),
            Err(OptionsError::UnknownToken { .. })
        ));
        assert!(matches!(
            parse(r#"[true, [{ kind = "field" }]]"#),
            Err(OptionsError::Invalid { .. })
        ));
    }
}

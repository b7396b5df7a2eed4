//! `namelint.toml` loading.
//!
//! ```toml
//! [settings]
//! components-root = "app/components"
//! project-root = "."
//!
//! [rules]
//! backing-field = true
//! class-members-name = [true, "camel-case", "skip-origin-checking"]
//! const-variable-name = { only-primitive-types = true }
//! ```
//!
//! Rule values are kept as raw [`toml::Value`]s; each rule interprets its own
//! options.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "namelint.toml";

const DEFAULT_COMPONENTS_ROOT: &str = "app/components";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("rule `{rule}` must be a boolean, an argument list or a table")]
    InvalidRuleValue { rule: String },
    #[error("settings.components-root must not be empty")]
    EmptyComponentsRoot,
}

/// The `[settings]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Directory tree treated as the component module root.
    pub components_root: String,
    /// Base directory for non-relative import specifiers.
    pub project_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            components_root: DEFAULT_COMPONENTS_ROOT.to_string(),
            project_root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    rules: Option<BTreeMap<String, toml::Value>>,
}

/// A loaded configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub settings: Settings,
    /// `None` when the file has no `[rules]` table.
    rules: Option<BTreeMap<String, toml::Value>>,
    /// Directory the config was loaded from; relative paths resolve against it.
    base_dir: PathBuf,
}

impl Config {
    /// Parses configuration text. Relative paths resolve against the current directory.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;

        let components_root = raw
            .settings
            .components_root
            .trim()
            .trim_end_matches('/')
            .to_string();
        if components_root.is_empty() {
            return Err(ConfigError::EmptyComponentsRoot);
        }

        if let Some(rules) = &raw.rules {
            for (rule, value) in rules {
                if !matches!(
                    value,
                    toml::Value::Boolean(_) | toml::Value::Array(_) | toml::Value::Table(_)
                ) {
                    return Err(ConfigError::InvalidRuleValue { rule: rule.clone() });
                }
            }
        }

        Ok(Self {
            settings: Settings {
                components_root,
                project_root: raw.settings.project_root,
            },
            rules: raw.rules,
            base_dir: PathBuf::new(),
        })
    }

    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        tracing::debug!(
            path = %path.display(),
            rules = config.rules.as_ref().map_or(0, BTreeMap::len),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Whether the file configured any rules at all.
    pub fn has_rules_table(&self) -> bool {
        self.rules.is_some()
    }

    /// Every configured rule, including disabled ones, by name.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &toml::Value)> {
        self.rules
            .iter()
            .flatten()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Configured rules that are not switched off with `false` or `[false, ...]`.
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &toml::Value)> {
        self.rules().filter(|(_, value)| is_enabled(value))
    }

    pub fn set_rule(&mut self, name: impl Into<String>, value: toml::Value) {
        self.rules
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value);
    }

    /// `settings.project-root` resolved against the config file's directory.
    pub fn project_root(&self) -> PathBuf {
        if self.settings.project_root.is_absolute() {
            self.settings.project_root.clone()
        } else {
            self.base_dir.join(&self.settings.project_root)
        }
    }

    pub fn components_root(&self) -> &str {
        &self.settings.components_root
    }
}

fn is_enabled(value: &toml::Value) -> bool {
    match value {
        toml::Value::Boolean(enabled) => *enabled,
        toml::Value::Array(arguments) => !matches!(arguments.first(), Some(toml::Value::Boolean(false))),
        toml::Value::Table(table) => !matches!(table.get("enabled"), Some(toml::Value::Boolean(false))),
        _ => false,
    }
}

/// Finds `namelint.toml` in `start` or the closest ancestor.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

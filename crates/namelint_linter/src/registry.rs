//! Name-to-constructor table of the built-in rules.

use std::collections::BTreeMap;

use namelint_config::Config;

use crate::rules::imports::ImportComponents;
use crate::rules::modules::ExportedNamespaceMembers;
use crate::rules::naming::{BackingField, ClassMembersName, ConstVariableName, TypeParameterName};
use crate::{FromConfig, OptionsError, Properties, Rule};

type RuleBuilder = fn(&Properties) -> Result<Box<dyn Rule>, OptionsError>;

fn builder<R: FromConfig + Rule + 'static>(properties: &Properties) -> Result<Box<dyn Rule>, OptionsError> {
    Ok(Box::new(R::from_config(properties)?))
}

pub struct RuleRegistry {
    builders: BTreeMap<&'static str, RuleBuilder>,
}

impl RuleRegistry {
    pub fn builtin() -> Self {
        let mut registry = Self {
            builders: BTreeMap::new(),
        };
        registry.register::<BackingField>();
        registry.register::<ClassMembersName>();
        registry.register::<ConstVariableName>();
        registry.register::<ExportedNamespaceMembers>();
        registry.register::<ImportComponents>();
        registry.register::<TypeParameterName>();
        registry
    }

    fn register<R: FromConfig + Rule + 'static>(&mut self) {
        self.builders.insert(R::MODULE_NAME, builder::<R>);
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builders.keys().copied()
    }

    /// Builds the rules `config` enables. Without a `[rules]` table every
    /// built-in rule runs with its defaults.
    pub fn build(&self, config: &Config) -> Result<Vec<Box<dyn Rule>>, OptionsError> {
        for (name, _) in config.rules() {
            if !self.builders.contains_key(name) {
                return Err(OptionsError::UnknownRule(name.to_string()));
            }
        }

        let enabled_by_default = toml::Value::Boolean(true);
        let selected: Vec<(&str, &toml::Value)> = if config.has_rules_table() {
            config.enabled_rules().collect()
        } else {
            self.names().map(|name| (name, &enabled_by_default)).collect()
        };

        let mut rules = Vec::with_capacity(selected.len());
        for (name, value) in selected {
            let Some(build) = self.builders.get(name) else {
                continue;
            };
            rules.push(build(&Properties::new(value, config))?);
            tracing::debug!(rule = name, "enabled rule");
        }
        Ok(rules)
    }
}

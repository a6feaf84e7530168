//! Ordered collection of rules with per-rule enable flags

use std::collections::HashMap;

use crate::config::Config;
use crate::error::ConfigError;
use crate::models::Severity;
use crate::rules::{self, base::LintRule, PARSE_ERROR_RULE_ID};

struct RegisteredRule {
    rule: Box<dyn LintRule>,
    enabled: bool,
    severity: Option<Severity>,
}

/// An enabled rule and its configured severity override
pub struct ActiveRule<'a> {
    pub rule: &'a dyn LintRule,
    pub severity_override: Option<Severity>,
}

impl ActiveRule<'_> {
    /// Severity the rule's findings are reported with by default
    pub fn severity(&self) -> Severity {
        self.severity_override
            .unwrap_or_else(|| self.rule.default_severity())
    }
}

/// Rules keyed by id, kept in registration order.
///
/// Built once at startup; the checker only ever reads it.
#[derive(Default)]
pub struct RuleRegistry {
    entries: Vec<RegisteredRule>,
    index: HashMap<String, usize>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule, all enabled
    pub fn with_default_rules(config: &Config) -> Self {
        let mut registry = Self::new();
        for rule in rules::get_all_rules_with_config(config) {
            // Built-in ids are unique and never reserved
            if let Err(e) = registry.register(rule) {
                tracing::error!("Skipping built-in rule: {}", e);
            }
        }
        registry
    }

    /// Build the registry for a run: enable only `enabled` when given, then
    /// apply severity overrides from the config
    pub fn from_config(config: &Config, enabled: Option<&[String]>) -> Result<Self, ConfigError> {
        let mut registry = Self::with_default_rules(config);

        if let Some(enabled) = enabled {
            if let Some(unknown) = enabled.iter().find(|id| !registry.contains(id)) {
                return Err(ConfigError::UnknownRule(unknown.clone()));
            }
            for id in registry.rule_ids() {
                if !enabled.contains(&id) {
                    registry.disable(&id)?;
                }
            }
        }

        for (id, rule_config) in &config.rules {
            if !registry.contains(id) {
                return Err(ConfigError::UnknownRule(id.clone()));
            }
            if let Some(severity) = rule_config.severity {
                registry.set_severity(id, severity)?;
            }
        }

        Ok(registry)
    }

    /// Add a rule, enabled. Fails without modifying the registry when the id
    /// is taken or reserved.
    pub fn register(&mut self, rule: Box<dyn LintRule>) -> Result<(), ConfigError> {
        let id = rule.rule_id().to_string();
        if id == PARSE_ERROR_RULE_ID {
            return Err(ConfigError::ReservedRuleId(id));
        }
        if self.index.contains_key(&id) {
            return Err(ConfigError::DuplicateRule(id));
        }
        self.index.insert(id, self.entries.len());
        self.entries.push(RegisteredRule {
            rule,
            enabled: true,
            severity: None,
        });
        Ok(())
    }

    pub fn enable(&mut self, id: &str) -> Result<(), ConfigError> {
        self.entry_mut(id)?.enabled = true;
        Ok(())
    }

    pub fn disable(&mut self, id: &str) -> Result<(), ConfigError> {
        self.entry_mut(id)?.enabled = false;
        Ok(())
    }

    pub fn set_severity(&mut self, id: &str, severity: Severity) -> Result<(), ConfigError> {
        self.entry_mut(id)?.severity = Some(severity);
        Ok(())
    }

    pub fn disable_all(&mut self) {
        for entry in &mut self.entries {
            entry.enabled = false;
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Severity findings of `id` are reported with, after any override
    pub fn severity(&self, id: &str) -> Option<Severity> {
        self.index.get(id).map(|&idx| {
            let entry = &self.entries[idx];
            entry
                .severity
                .unwrap_or_else(|| entry.rule.default_severity())
        })
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.index
            .get(id)
            .is_some_and(|&idx| self.entries[idx].enabled)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All rule ids in registration order
    pub fn rule_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.rule.rule_id().to_string())
            .collect()
    }

    /// All rules in registration order, enabled or not
    pub fn rules(&self) -> impl Iterator<Item = &dyn LintRule> {
        self.entries.iter().map(|e| e.rule.as_ref())
    }

    /// Enabled rules in registration order
    pub fn enabled_rules(&self) -> Vec<ActiveRule<'_>> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| ActiveRule {
                rule: e.rule.as_ref(),
                severity_override: e.severity,
            })
            .collect()
    }

    fn entry_mut(&mut self, id: &str) -> Result<&mut RegisteredRule, ConfigError> {
        let idx = *self
            .index
            .get(id)
            .ok_or_else(|| ConfigError::UnknownRule(id.to_string()))?;
        Ok(&mut self.entries[idx])
    }
}

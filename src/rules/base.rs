use crate::models::{Finding, RuleContext, Severity};

/// Base trait for all linting rules.
///
/// Rules are stateless: the same unit always yields the same findings, and a
/// single instance is shared by every worker thread.
pub trait LintRule: Send + Sync {
    /// The unique identifier for this rule (e.g., "no-wildcard-import")
    fn rule_id(&self) -> &str;

    /// Get the rule description
    fn description(&self) -> &str;

    /// Severity used when the configuration does not override it
    fn default_severity(&self) -> Severity {
        Severity::Warn
    }

    /// Perform the lint check on one syntax unit
    fn check(&self, context: &RuleContext) -> Vec<Finding>;
}

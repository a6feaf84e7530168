//! no-field-injection: Spring beans take their collaborators through the constructor

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;
use crate::utils::java_patterns::FIELD_INJECTION_ANNOTATIONS;

pub const RULE_ID: &str = "no-field-injection";

pub struct NoFieldInjectionRule;

impl NoFieldInjectionRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for NoFieldInjectionRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Inject dependencies through the constructor, not with annotated fields"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (_, field) in context.unit.fields() {
            let Some(annotation) = FIELD_INJECTION_ANNOTATIONS
                .iter()
                .find_map(|name| field.modifiers.annotation(name))
            else {
                continue;
            };
            findings.push(context.finding(
                RULE_ID,
                self.default_severity(),
                annotation.position.line,
                annotation.position.column,
                format!(
                    "field `{}` uses @{} injection; use constructor injection instead",
                    field.name, annotation.name
                ),
            ));
        }

        findings
    }
}

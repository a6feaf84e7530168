//! method-naming: methods use lowerCamelCase
//!
//! Test methods are skipped; `should_fail_when_empty` style names are an
//! accepted convention there.

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;
use crate::utils::java_patterns::is_lower_camel_case;

pub const RULE_ID: &str = "method-naming";

const TEST_ANNOTATIONS: &[&str] = &["Test", "ParameterizedTest", "RepeatedTest", "TestFactory"];

pub struct MethodNamingRule;

impl MethodNamingRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for MethodNamingRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Method names must be lowerCamelCase"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        context
            .unit
            .methods()
            .map(|(_, method)| method)
            .filter(|method| {
                !method.is_constructor
                    && !TEST_ANNOTATIONS
                        .iter()
                        .any(|a| method.modifiers.has_annotation(a))
                    && !is_lower_camel_case(&method.name)
            })
            .map(|method| {
                context.finding(
                    RULE_ID,
                    self.default_severity(),
                    method.position.line,
                    method.position.column,
                    format!("method `{}` should be lowerCamelCase", method.name),
                )
            })
            .collect()
    }
}

//! type-naming: classes, interfaces, enums and records use UpperCamelCase

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;
use crate::utils::java_patterns::is_upper_camel_case;

pub const RULE_ID: &str = "type-naming";

pub struct TypeNamingRule;

impl TypeNamingRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for TypeNamingRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Type names must be UpperCamelCase"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        context
            .unit
            .types
            .iter()
            .filter(|decl| !is_upper_camel_case(&decl.name))
            .map(|decl| {
                context.finding(
                    RULE_ID,
                    self.default_severity(),
                    decl.position.line,
                    decl.position.column,
                    format!("type `{}` should be UpperCamelCase", decl.name),
                )
            })
            .collect()
    }
}

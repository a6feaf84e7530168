//! constant-naming: `static final` constants use UPPER_SNAKE_CASE
//!
//! Only primitive, boxed and `String` constants are checked; a `static final`
//! collection or service reference is not a constant in the naming sense.

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;
use crate::utils::java_patterns::{is_constant_case, is_constant_type};

pub const RULE_ID: &str = "constant-naming";

pub struct ConstantNamingRule;

impl ConstantNamingRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for ConstantNamingRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "static final constants must be named in UPPER_SNAKE_CASE"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        context
            .unit
            .fields()
            .map(|(_, field)| field)
            .filter(|field| {
                field.modifiers.is_static()
                    && field.modifiers.is_final()
                    && is_constant_type(&field.type_name)
                    && field.name != "serialVersionUID"
                    && !is_constant_case(&field.name)
            })
            .map(|field| {
                context.finding(
                    RULE_ID,
                    self.default_severity(),
                    field.position.line,
                    field.position.column,
                    format!("constant `{}` should be UPPER_SNAKE_CASE", field.name),
                )
            })
            .collect()
    }
}

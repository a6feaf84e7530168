//! optional-return: prefer `Optional<T>` over nullable return values
//!
//! Flags methods with a reference return type that either contain
//! `return null;` or are annotated `@Nullable`.

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;
use crate::utils::java_patterns::is_optional_type;

pub const RULE_ID: &str = "optional-return";

const PRIMITIVES: &[&str] = &[
    "void", "byte", "short", "int", "long", "float", "double", "boolean", "char",
];

pub struct OptionalReturnRule;

impl OptionalReturnRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for OptionalReturnRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Methods that may return nothing must return Optional instead of null"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (_, method) in context.unit.methods() {
            let Some(return_type) = method.return_type.as_deref() else {
                continue;
            };
            if PRIMITIVES.contains(&return_type) || is_optional_type(return_type) {
                continue;
            }

            let reason = if method.modifiers.has_annotation("Nullable") {
                "is annotated @Nullable"
            } else if method.returns_null {
                "returns null"
            } else {
                continue;
            };

            findings.push(context.finding(
                RULE_ID,
                self.default_severity(),
                method.position.line,
                method.position.column,
                format!(
                    "method `{}` {}; return Optional<{}> instead",
                    method.name, reason, return_type
                ),
            ));
        }

        findings
    }
}

//! no-lombok-data: prefer `@Value` or explicit accessors over `@Data`
//!
//! `@Data` generates setters for every field, which works against immutable
//! value objects.

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;

pub const RULE_ID: &str = "no-lombok-data";

pub struct NoLombokDataRule;

impl NoLombokDataRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for NoLombokDataRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Use @Value or @Getter instead of Lombok @Data"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        context
            .unit
            .types
            .iter()
            .filter_map(|decl| {
                let annotation = decl.modifiers.annotation("Data")?;
                Some(context.finding(
                    RULE_ID,
                    self.default_severity(),
                    annotation.position.line,
                    annotation.position.column,
                    format!(
                        "`{}` uses @Data, which generates setters; prefer @Value or @Getter",
                        decl.name
                    ),
                ))
            })
            .collect()
    }
}

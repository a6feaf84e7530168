//! static-date-format: `SimpleDateFormat` is not thread-safe and must not be shared
//!
//! A `static` formatter is shared by every thread that touches the class.
//! Use `DateTimeFormatter` or a local instance instead.

use crate::models::{Finding, RuleContext, Severity};
use crate::rules::base::LintRule;
use crate::utils::java_patterns::{is_date_format_type, simple_type_name};

pub const RULE_ID: &str = "static-date-format";

pub struct StaticDateFormatRule;

impl StaticDateFormatRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for StaticDateFormatRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "DateFormat instances must not be stored in static fields"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        context
            .unit
            .fields()
            .map(|(_, field)| field)
            .filter(|field| field.modifiers.is_static() && is_date_format_type(&field.type_name))
            .map(|field| {
                context.finding(
                    RULE_ID,
                    self.default_severity(),
                    field.position.line,
                    field.position.column,
                    format!(
                        "static {} `{}` is not thread-safe; use DateTimeFormatter",
                        simple_type_name(&field.type_name),
                        field.name
                    ),
                )
            })
            .collect()
    }
}

//! logger-declaration: loggers are `private static final`

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;
use crate::syntax::TypeKind;
use crate::utils::java_patterns::is_logger_type;

pub const RULE_ID: &str = "logger-declaration";

pub struct LoggerDeclarationRule;

impl LoggerDeclarationRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for LoggerDeclarationRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Logger fields must be declared private static final"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        context
            .unit
            .fields()
            .filter(|(decl, field)| {
                decl.kind != TypeKind::Interface && is_logger_type(&field.type_name)
            })
            .filter_map(|(_, field)| {
                let missing: Vec<&str> = ["private", "static", "final"]
                    .into_iter()
                    .filter(|keyword| !field.modifiers.has(keyword))
                    .collect();
                if missing.is_empty() {
                    return None;
                }
                Some(context.finding(
                    RULE_ID,
                    self.default_severity(),
                    field.position.line,
                    field.position.column,
                    format!(
                        "logger `{}` should be private static final (missing: {})",
                        field.name,
                        missing.join(", ")
                    ),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxUnit;

    fn check(source: &str) -> Vec<Finding> {
        let unit = SyntaxUnit::parse("Test.java", source).unwrap();
        LoggerDeclarationRule::new().check(&RuleContext::new(&unit))
    }

    #[test]
    fn test_flags_instance_logger() {
        let findings = check(
            "class A { protected Logger log = LoggerFactory.getLogger(A.class); }",
        );
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("private, static, final"));
    }

    #[test]
    fn test_flags_non_final_logger() {
        let findings = check(
            "class A { private static org.slf4j.Logger LOG = LoggerFactory.getLogger(A.class); }",
        );
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("missing: final"));
    }

    #[test]
    fn test_proper_logger_ok() {
        let findings = check(
            "class A { private static final Logger log = LoggerFactory.getLogger(A.class); }",
        );
        assert!(findings.is_empty());
    }
}

//! no-system-out: log through a logger, not the console
//!
//! Flags `System.out.*` and `System.err.*` calls and `printStackTrace()`.

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;

pub const RULE_ID: &str = "no-system-out";

pub struct NoSystemOutRule;

impl NoSystemOutRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for NoSystemOutRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Use a logger instead of System.out, System.err or printStackTrace"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        context
            .unit
            .calls
            .iter()
            .filter_map(|call| {
                let receiver = call.receiver.as_deref().unwrap_or("");
                let message = match (receiver, call.name.as_str()) {
                    ("System.out" | "System.err", name) => {
                        format!("`{}.{}` bypasses logging; use a logger", receiver, name)
                    }
                    (_, "printStackTrace") => {
                        "`printStackTrace()` bypasses logging; log the exception instead"
                            .to_string()
                    }
                    _ => return None,
                };
                Some(context.finding(
                    RULE_ID,
                    self.default_severity(),
                    call.position.line,
                    call.position.column,
                    message,
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
        NoSystemOutRule::new().check(&RuleContext::new(&unit))
    }

    #[test]
    fn test_flags_console_output() {
        let findings = check(
            r#"
class A {
    void f() {
        System.out.println("hi");
        System.err.printf("%s", 1);
        try { g(); } catch (Exception e) { e.printStackTrace(); }
    }
}
"#,
        );
        assert_eq!(findings.len(), 3);
        assert!(findings[0].message.contains("System.out.println"));
        assert!(findings[1].message.contains("System.err.printf"));
        assert!(findings[2].message.contains("printStackTrace"));
    }

    #[test]
    fn test_logger_calls_ok() {
        let findings = check(r#"class A { void f() { log.info("hi"); System.exit(0); } }"#);
        assert!(findings.is_empty());
    }
}

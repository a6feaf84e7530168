//! no-wildcard-import: every imported type is named explicitly
//!
//! `import java.util.*;` hides where a type comes from and breaks when a new
//! class with a clashing name shows up in one of the packages.

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;

pub const RULE_ID: &str = "no-wildcard-import";

pub struct NoWildcardImportRule;

impl NoWildcardImportRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for NoWildcardImportRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Imports must name each type explicitly instead of using `.*`"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        context
            .unit
            .imports
            .iter()
            .filter(|import| import.is_wildcard)
            .map(|import| {
                let kind = if import.is_static { "static import" } else { "import" };
                context.finding(
                    RULE_ID,
                    self.default_severity(),
                    import.position.line,
                    import.position.column,
                    format!(
                        "wildcard {} `{}.*`; import the names you use explicitly",
                        kind, import.path
                    ),
                )
            })
            .collect()
    }
}

//! line-length: source lines stay within the configured width
//!
//! `package` and `import` lines are exempt. Width counts characters.

use crate::config::RuleConfig;
use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;

pub const RULE_ID: &str = "line-length";

pub const DEFAULT_MAX_LINE_LENGTH: usize = 120;

pub struct LineLengthRule {
    max_line_length: usize,
}

impl LineLengthRule {
    pub fn new() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }

    pub fn with_max(max_line_length: usize) -> Self {
        Self { max_line_length }
    }

    pub fn with_config(config: Option<&RuleConfig>) -> Self {
        match config.and_then(|cfg| cfg.max_line_length) {
            Some(max) => Self::with_max(max),
            None => Self::new(),
        }
    }
}

impl LintRule for LineLengthRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Lines must not exceed the maximum line length"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (idx, line) in context.unit.source.lines().enumerate() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("import ") || trimmed.starts_with("package ") {
                continue;
            }
            let width = line.chars().count();
            if width > self.max_line_length {
                findings.push(context.finding(
                    RULE_ID,
                    self.default_severity(),
                    idx + 1,
                    self.max_line_length + 1,
                    format!(
                        "line is {} characters long; the limit is {}",
                        width, self.max_line_length
                    ),
                ));
            }
        }

        findings
    }
}

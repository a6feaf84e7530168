use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use crate::syntax::SyntaxUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warn => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// 1-based position of a finding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub location: Location,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    /// Report ordering: file, line, column, rule id, then message as a tie-breaker
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.location
            .file
            .cmp(&other.location.file)
            .then(self.location.line.cmp(&other.location.line))
            .then(self.location.column.cmp(&other.location.column))
            .then(self.rule_id.cmp(&other.rule_id))
            .then(self.message.cmp(&other.message))
    }
}

/// Result of one full check pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub findings: Vec<Finding>,
    pub passed: bool,
    pub files_checked: usize,
}

impl CheckReport {
    /// Sorts the findings and derives `passed` from them
    pub fn new(mut findings: Vec<Finding>, files_checked: usize) -> Self {
        findings.sort_by(Finding::report_order);
        let passed = !findings.iter().any(|f| f.severity == Severity::Error);
        Self {
            findings,
            passed,
            files_checked,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Context passed to each rule for checking
pub struct RuleContext<'a> {
    pub unit: &'a SyntaxUnit,
}

impl<'a> RuleContext<'a> {
    pub fn new(unit: &'a SyntaxUnit) -> Self {
        Self { unit }
    }

    /// Builds a finding in this unit's file
    pub fn finding(
        &self,
        rule_id: &str,
        severity: Severity,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Finding {
        Finding {
            rule_id: rule_id.to_string(),
            location: Location::new(self.unit.path.clone(), line, column),
            message: message.into(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(file: &str, line: usize, column: usize, rule_id: &str, severity: Severity) -> Finding {
        Finding {
            rule_id: rule_id.to_string(),
            location: Location::new(file, line, column),
            message: String::new(),
            severity,
        }
    }

    #[test]
    fn test_report_sorts_findings() {
        let report = CheckReport::new(
            vec![
                finding("b.java", 1, 1, "type-naming", Severity::Warn),
                finding("a.java", 3, 1, "final-field", Severity::Warn),
                finding("a.java", 3, 1, "constant-naming", Severity::Warn),
                finding("a.java", 1, 9, "no-system-out", Severity::Warn),
            ],
            2,
        );

        let order: Vec<_> = report
            .findings
            .iter()
            .map(|f| (f.location.file.to_str().unwrap(), f.location.line, f.rule_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.java", 1, "no-system-out"),
                ("a.java", 3, "constant-naming"),
                ("a.java", 3, "final-field"),
                ("b.java", 1, "type-naming"),
            ]
        );
        assert!(report.passed);
    }

    #[test]
    fn test_error_fails_report() {
        let report = CheckReport::new(
            vec![finding("a.java", 1, 1, "static-date-format", Severity::Error)],
            1,
        );
        assert!(!report.passed);
        assert_eq!(report.count(Severity::Error), 1);
        assert_eq!(report.count(Severity::Warn), 0);
    }

    #[test]
    fn test_empty_report_passes() {
        let report = CheckReport::new(Vec::new(), 0);
        assert!(report.passed);
        assert!(report.findings.is_empty());
    }
}

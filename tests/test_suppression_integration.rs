use convention_linter::config::Config;
use convention_linter::{lint_path, LinterOptions, RuleRegistry};
use std::fs;
use tempfile::TempDir;

fn lint_source(content: &str, enabled: &[&str]) -> convention_linter::CheckReport {
    let dir = TempDir::new().unwrap();
    let file_path = dir.path().join("Sample.java");
    fs::write(&file_path, content).unwrap();

    let enabled: Vec<String> = enabled.iter().map(|id| (*id).to_string()).collect();
    let registry = RuleRegistry::from_config(&Config::default(), Some(&enabled)).unwrap();
    lint_path(&file_path, &registry, &LinterOptions::default()).unwrap()
}

#[test]
fn test_bare_marker_suppresses_all_rules_on_line() {
    let content = r#"
import java.util.*; // lint-ignore
class Sample {}
"#;
    let report = lint_source(content, &["no-wildcard-import"]);
    assert_eq!(report.findings.len(), 0, "Bare lint-ignore should suppress everything");
}

#[test]
fn test_named_rule_is_suppressed_others_kept() {
    let content = r#"
class Sample {
    void run() {
        System.out.println("x"); // lint-ignore: no-system-out
        System.err.println("y"); // lint-ignore: line-length
    }
}
"#;
    let report = lint_source(content, &["no-system-out", "line-length"]);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].rule_id, "no-system-out");
    assert_eq!(report.findings[0].location.line, 5);
}

#[test]
fn test_multiple_rules_in_one_directive() {
    let content = r#"
class Sample {
    public static final int maxSize = 3; // lint-ignore: constant-naming, final-field
    static final String badName = "x";
}
"#;
    let report = lint_source(content, &["constant-naming"]);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].location.line, 4);
}

#[test]
fn test_directive_only_covers_its_own_line() {
    let content = r#"
// lint-ignore
import java.util.*;
class Sample {}
"#;
    let report = lint_source(content, &["no-wildcard-import"]);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].location.line, 3);
}

#[test]
fn test_parse_errors_are_never_suppressed() {
    let content = "class Sample { // lint-ignore\n";
    let report = lint_source(content, &["no-wildcard-import"]);
    assert_eq!(report.findings.len(), 1);
    assert!(!report.passed);
}

use convention_linter::config::Config;
use convention_linter::error::ConfigError;
use convention_linter::models::{Finding, RuleContext, Severity};
use convention_linter::rules::base::LintRule;
use convention_linter::rules::PARSE_ERROR_RULE_ID;
use convention_linter::{lint_path, LinterOptions, RuleRegistry};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn only(ids: &[&str]) -> RuleRegistry {
    let enabled: Vec<String> = ids.iter().map(|id| (*id).to_string()).collect();
    RuleRegistry::from_config(&Config::default(), Some(&enabled)).unwrap()
}

#[test]
fn test_wildcard_import_gives_one_warning() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.java", "import java.util.*;\n\nclass A {}\n");

    let report = lint_path(dir.path(), &only(&["no-wildcard-import"]), &LinterOptions::default()).unwrap();

    assert_eq!(report.findings.len(), 1);
    let finding = &report.findings[0];
    assert_eq!(finding.rule_id, "no-wildcard-import");
    assert_eq!(finding.severity, Severity::Warn);
    assert_eq!(finding.location.line, 1);
    assert!(report.passed);
}

#[test]
fn test_explicit_import_gives_no_findings() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.java", "import java.util.List;\n\nclass A {}\n");

    let report = lint_path(dir.path(), &only(&["no-wildcard-import"]), &LinterOptions::default()).unwrap();
    assert!(report.findings.is_empty());
    assert!(report.passed);
}

#[test]
fn test_clean_code_passes() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "OrderService.java",
        r#"package com.example.orders;

import java.util.List;
import org.slf4j.Logger;
import org.slf4j.LoggerFactory;

public class OrderService {
    private static final Logger LOGGER = LoggerFactory.getLogger(OrderService.class);
    private static final int MAX_ITEMS = 50;

    private final OrderRepository repository;

    public OrderService(OrderRepository repository) {
        this.repository = repository;
    }

    public List<Order> findOpenOrders() {
        LOGGER.info("Loading open orders");
        return repository.findOpen(MAX_ITEMS);
    }
}
"#,
    );

    let registry = RuleRegistry::with_default_rules(&Config::default());
    let report = lint_path(dir.path(), &registry, &LinterOptions::default()).unwrap();
    assert_eq!(report.findings, Vec::<Finding>::new());
    assert!(report.passed);
    assert_eq!(report.files_checked, 1);
}

#[test]
fn test_disabling_every_rule_passes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Bad.java", "import java.util.*;\nclass bad { static java.text.SimpleDateFormat f; }\n");
    write(dir.path(), "Broken.java", "class Broken {\n");

    let mut registry = RuleRegistry::with_default_rules(&Config::default());
    registry.disable_all();
    let report = lint_path(dir.path(), &registry, &LinterOptions::default()).unwrap();

    assert!(report.passed);
    assert!(report.findings.is_empty());
}

#[test]
fn test_parse_error_does_not_hide_other_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.java", "import java.util.*;\nclass A {}\n");
    write(dir.path(), "Broken.java", "class Broken {\n  void f( {\n");

    let report = lint_path(dir.path(), &only(&["no-wildcard-import"]), &LinterOptions::default()).unwrap();

    let parse_errors: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.rule_id == PARSE_ERROR_RULE_ID)
        .collect();
    assert_eq!(parse_errors.len(), 1);
    assert!(parse_errors[0].location.file.ends_with("Broken.java"));
    assert_eq!(parse_errors[0].severity, Severity::Error);

    assert!(report
        .findings
        .iter()
        .any(|f| f.rule_id == "no-wildcard-import" && f.location.file.ends_with("A.java")));
    assert!(!report.passed);
    assert_eq!(report.files_checked, 2);
}

#[test]
fn test_check_is_deterministic() {
    let dir = TempDir::new().unwrap();
    for i in 0..12 {
        write(
            dir.path(),
            &format!("Widget{i}.java"),
            "import java.util.*;\npublic class Widget {\n    private int count = 0;\n    public void Run() { System.out.println(count); }\n}\n",
        );
    }

    let registry = RuleRegistry::with_default_rules(&Config::default());
    let first = lint_path(dir.path(), &registry, &LinterOptions { threads: 1, ..Default::default() }).unwrap();
    let second = lint_path(dir.path(), &registry, &LinterOptions { threads: 8, ..Default::default() }).unwrap();

    assert!(!first.findings.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_findings_are_sorted() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "B.java", "import java.io.*;\nclass B {}\n");
    write(dir.path(), "A.java", "import java.util.*;\nimport java.io.*;\nclass A {}\n");

    let report = lint_path(dir.path(), &only(&["no-wildcard-import"]), &LinterOptions::default()).unwrap();
    let order: Vec<_> = report
        .findings
        .iter()
        .map(|f| {
            (
                f.location.file.file_name().unwrap().to_string_lossy().into_owned(),
                f.location.line,
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ("A.java".to_string(), 1),
            ("A.java".to_string(), 2),
            ("B.java".to_string(), 1),
        ]
    );
}

struct CustomRule;

impl LintRule for CustomRule {
    fn rule_id(&self) -> &str {
        "no-wildcard-import"
    }

    fn description(&self) -> &str {
        "clashes with a built-in rule"
    }

    fn check(&self, _context: &RuleContext) -> Vec<Finding> {
        Vec::new()
    }
}

#[test]
fn test_duplicate_registration_leaves_registry_unchanged() {
    let mut registry = RuleRegistry::with_default_rules(&Config::default());
    let before = registry.rule_ids();

    let err = registry.register(Box::new(CustomRule)).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateRule(_)));
    assert_eq!(registry.rule_ids(), before);

    // The built-in rule still reports
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.java", "import java.util.*;\nclass A {}\n");
    let report = lint_path(dir.path(), &registry, &LinterOptions::default()).unwrap();
    assert!(report.findings.iter().any(|f| f.rule_id == "no-wildcard-import"));
}

#[test]
fn test_deeply_nested_expression_is_checked() {
    let dir = TempDir::new().unwrap();
    let chain = vec!["\"a\""; 20_000].join(" + ");
    write(
        dir.path(),
        "Banner.java",
        &format!("class Banner {{\n    private static final String S = {chain};\n}}\n"),
    );

    let registry = RuleRegistry::with_default_rules(&Config::default());
    let report = lint_path(dir.path(), &registry, &LinterOptions::default()).unwrap();

    assert_eq!(report.files_checked, 1);
    assert!(report.findings.iter().all(|f| f.rule_id != PARSE_ERROR_RULE_ID));
    // The long line itself is the only finding
    let rules: Vec<_> = report.findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert_eq!(rules, vec!["line-length"]);
}

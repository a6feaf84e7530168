use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use convention_linter::config::{find_config_file, load_config, merge_config, Config};
use convention_linter::models::{CheckReport, Finding, Severity};
use convention_linter::{lint_paths, CancellationToken, LinterOptions, RuleRegistry};

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Terminal,
    Json,
    Github,
}

/// Exit codes used by the linter
mod exit_codes {
    pub const SUCCESS: i32 = 0; // No ERROR findings
    pub const VIOLATIONS_FOUND: i32 = 1; // At least one ERROR finding
    pub const INTERNAL_ERROR: i32 = 2; // Config error, missing path, cancellation
}

#[derive(Parser, Debug)]
#[command(
    name = "convention-linter",
    author,
    version,
    about = "Convention linter - Check Java sources against team coding conventions",
    long_about = "Convention linter - Check Java sources against team coding conventions.\n\nIf no paths are provided, the current directory is checked recursively."
)]
struct Args {
    /// Paths to analyze (files or directories)
    ///
    /// Examples: convention-linter (current dir), convention-linter src/main/java
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Path to configuration file (.convention-lint.toml)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output format
    ///
    /// Example: -f json (for CI/CD), -f github (for GitHub Actions)
    #[arg(
        short = 'f',
        long = "output-format",
        value_enum,
        default_value = "terminal"
    )]
    output_format: OutputFormat,

    /// Disable specific rules (can be used multiple times)
    ///
    /// Example: -d line-length -d final-field
    #[arg(short = 'd', long = "disable")]
    disable: Vec<String>,

    /// Enable only specific rules (can be used multiple times, ALL for every rule)
    ///
    /// Example: -e no-wildcard-import -e type-naming
    #[arg(short = 'e', long = "enable")]
    enable: Vec<String>,

    /// Number of threads to use (0 = auto)
    #[arg(short = 'j', long = "threads", default_value = "0")]
    threads: usize,

    /// Skip paths matching pattern (in addition to the config excludes)
    #[arg(long = "skip")]
    skip: Vec<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,

    /// List available rules and exit
    #[arg(long = "list-rules")]
    list_rules: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { args.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let code = match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::INTERNAL_ERROR
        }
    };
    process::exit(code);
}

fn resolve_config(args: &Args) -> Result<Option<Config>> {
    if let Some(path) = &args.config {
        return Ok(Some(load_config(path)?));
    }

    let start_path = &args.paths[0];
    let abs_path = start_path
        .canonicalize()
        .unwrap_or_else(|_| start_path.clone());
    debug!("Searching for config from: {}", abs_path.display());

    match find_config_file(&abs_path) {
        Some(path) => Ok(Some(load_config(&path)?)),
        None => {
            debug!("No config file found, using defaults");
            Ok(None)
        }
    }
}

fn run(args: &Args) -> Result<i32> {
    let start = Instant::now();
    let use_color = !args.no_color;

    let config = resolve_config(args)?;
    let (enable_rules, skip_patterns) =
        merge_config(config.as_ref(), &args.enable, &args.disable, &args.skip);
    debug!("Exclude patterns: {:?}", skip_patterns);

    let default_config = Config::default();
    let registry = RuleRegistry::from_config(
        config.as_ref().unwrap_or(&default_config),
        enable_rules.as_deref(),
    )
    .context("invalid rule configuration")?;

    if args.list_rules {
        list_rules(&registry);
        return Ok(exit_codes::SUCCESS);
    }

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }

    let options = LinterOptions {
        threads: args.threads,
        skip_patterns,
        cancel,
    };

    let report = lint_paths(&args.paths, &registry, &options)?;

    match args.output_format {
        OutputFormat::Terminal => report_terminal(&report, use_color),
        OutputFormat::Json => report_json(&report)?,
        OutputFormat::Github => report_github(&report),
    }

    show_statistics(&report, start.elapsed().as_secs_f64(), use_color);

    Ok(if report.passed {
        exit_codes::SUCCESS
    } else {
        exit_codes::VIOLATIONS_FOUND
    })
}

fn list_rules(registry: &RuleRegistry) {
    for rule in registry.rules() {
        let id = rule.rule_id();
        let state = if registry.is_enabled(id) { "" } else { " (disabled)" };
        println!(
            "{:<20} {:<8} {}{}",
            id,
            registry
                .severity(id)
                .unwrap_or_else(|| rule.default_severity())
                .to_string(),
            rule.description(),
            state
        );
    }
}

fn show_statistics(report: &CheckReport, elapsed_secs: f64, use_color: bool) {
    let errors = report.count(Severity::Error);
    let warnings = report.count(Severity::Warn);

    let mut rule_counts: HashMap<&str, usize> = HashMap::new();
    for finding in &report.findings {
        *rule_counts.entry(finding.rule_id.as_str()).or_insert(0) += 1;
    }

    eprintln!("\n{}", "=".repeat(60));

    if report.findings.is_empty() {
        if use_color {
            eprintln!("\x1b[32m✓ No issues found!\x1b[0m");
        } else {
            eprintln!("✓ No issues found!");
        }
    } else {
        eprintln!("Linting Summary");
        eprintln!("{}", "-".repeat(60));
        eprintln!("Total findings: {}", report.findings.len());
        if use_color {
            eprintln!("  \x1b[31mErrors: {}\x1b[0m", errors);
            eprintln!("  \x1b[33mWarnings: {}\x1b[0m", warnings);
        } else {
            eprintln!("  Errors: {}", errors);
            eprintln!("  Warnings: {}", warnings);
        }

        eprintln!("\nFindings by rule:");
        let mut sorted_rules: Vec<_> = rule_counts.into_iter().collect();
        sorted_rules.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        for (rule, count) in sorted_rules.iter().take(10) {
            eprintln!("  {}: {}", rule, count);
        }
        if sorted_rules.len() > 10 {
            eprintln!("  ... and {} more rules", sorted_rules.len() - 10);
        }
    }

    eprintln!("\nPerformance:");
    eprintln!("  Files analyzed: {}", report.files_checked);
    eprintln!("  Time: {:.2}s", elapsed_secs);
    eprintln!("{}", "=".repeat(60));
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn report_terminal(report: &CheckReport, use_color: bool) {
    let mut by_file: BTreeMap<&Path, Vec<&Finding>> = BTreeMap::new();
    for finding in &report.findings {
        by_file
            .entry(finding.location.file.as_path())
            .or_default()
            .push(finding);
    }

    for (file_idx, (file, findings)) in by_file.iter().enumerate() {
        if file_idx > 0 {
            println!();
        }

        let errors = findings.iter().filter(|f| f.severity == Severity::Error).count();
        let warnings = findings.len() - errors;

        if use_color {
            println!(
                "\x1b[1;4m{}\x1b[0m (\x1b[31m{} error{}\x1b[0m, \x1b[33m{} warning{}\x1b[0m)",
                file.display(),
                errors,
                plural(errors),
                warnings,
                plural(warnings)
            );
        } else {
            println!(
                "{} ({} error{}, {} warning{})",
                file.display(),
                errors,
                plural(errors),
                warnings,
                plural(warnings)
            );
        }

        for finding in findings {
            let location = &finding.location;
            if use_color {
                let color = match finding.severity {
                    Severity::Error => "31",
                    Severity::Warn => "33",
                };
                println!(
                    "  {}:{}: \x1b[{}m{}\x1b[0m: {}",
                    location.line, location.column, color, finding.rule_id, finding.message
                );
            } else {
                println!(
                    "  {}:{}: {}: {}",
                    location.line, location.column, finding.rule_id, finding.message
                );
            }
        }
    }
}

fn report_json(report: &CheckReport) -> Result<()> {
    use serde_json::json;

    let findings: Vec<_> = report
        .findings
        .iter()
        .map(|f| {
            json!({
                "file": f.location.file,
                "line": f.location.line,
                "column": f.location.column,
                "rule": f.rule_id,
                "message": f.message,
                "severity": f.severity,
            })
        })
        .collect();

    let output = json!({
        "findings": findings,
        "count": findings.len(),
        "files_checked": report.files_checked,
        "passed": report.passed,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn report_github(report: &CheckReport) {
    // GitHub Actions annotation format
    for finding in &report.findings {
        let level = match finding.severity {
            Severity::Error => "error",
            Severity::Warn => "warning",
        };

        // ::error file=App.java,line=1,col=5,title=RULE::message
        println!(
            "::{} file={},line={},col={},title={}::{}",
            level,
            finding.location.file.display(),
            finding.location.line,
            finding.location.column,
            finding.rule_id,
            finding.message
        );
    }
}

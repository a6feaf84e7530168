//! Checker engine: runs every enabled rule over every syntax unit
//!
//! A pass never stops because of one bad file or one faulty rule. Parse
//! failures and rule panics turn into ERROR findings; only cancellation
//! ends a pass without a report.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{CheckError, ParseError};
use crate::models::{CheckReport, Finding, Location, RuleContext, Severity};
use crate::registry::{ActiveRule, RuleRegistry};
use crate::rules::PARSE_ERROR_RULE_ID;
use crate::suppression::{is_finding_suppressed, parse_suppressions};
use crate::syntax::SyntaxUnit;

/// Shared flag used to stop a running pass
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Output of the reading phase: parsed units plus files that failed to parse
#[derive(Debug, Default)]
pub struct SourceSet {
    pub units: Vec<SyntaxUnit>,
    pub failures: Vec<ParseError>,
}

impl SourceSet {
    pub fn from_units(units: Vec<SyntaxUnit>) -> Self {
        Self {
            units,
            failures: Vec::new(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.units.len() + self.failures.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Worker threads (0 = available parallelism)
    pub threads: usize,
    pub cancel: CancellationToken,
}

pub(crate) fn worker_pool(threads: usize) -> Result<rayon::ThreadPool, CheckError> {
    Ok(rayon::ThreadPoolBuilder::new().num_threads(threads).build()?)
}

/// Check a set of sources against the enabled rules of `registry`
pub fn check(
    sources: &SourceSet,
    registry: &RuleRegistry,
    options: &CheckOptions,
) -> Result<CheckReport, CheckError> {
    let pool = worker_pool(options.threads)?;
    pool.install(|| evaluate(sources, registry, &options.cancel))
}

/// Evaluation phase; runs on the current rayon pool
pub(crate) fn evaluate(
    sources: &SourceSet,
    registry: &RuleRegistry,
    cancel: &CancellationToken,
) -> Result<CheckReport, CheckError> {
    let active = registry.enabled_rules();
    if active.is_empty() {
        debug!("No rules enabled, nothing to check");
        return Ok(CheckReport::new(Vec::new(), sources.file_count()));
    }

    debug!(
        "Checking {} units with {} rules",
        sources.units.len(),
        active.len()
    );

    // Append-only until the join below
    let buffer = Mutex::new(
        sources
            .failures
            .iter()
            .map(parse_failure_finding)
            .collect::<Vec<_>>(),
    );

    sources.units.par_iter().try_for_each(|unit| {
        if cancel.is_cancelled() {
            return Err(CheckError::Cancelled);
        }
        let findings = evaluate_unit(unit, &active);
        buffer.lock().extend(findings);
        Ok(())
    })?;

    Ok(CheckReport::new(buffer.into_inner(), sources.file_count()))
}

/// Run every active rule on one unit, applying suppressions and overrides
fn evaluate_unit(unit: &SyntaxUnit, active: &[ActiveRule<'_>]) -> Vec<Finding> {
    let context = RuleContext::new(unit);
    let directives = parse_suppressions(&unit.comments);
    let mut findings = Vec::new();

    for entry in active {
        let rule_id = entry.rule.rule_id();
        match panic::catch_unwind(AssertUnwindSafe(|| entry.rule.check(&context))) {
            Ok(rule_findings) => {
                findings.extend(
                    rule_findings
                        .into_iter()
                        .filter(|f| {
                            !is_finding_suppressed(f.location.line, &f.rule_id, &directives)
                        })
                        .map(|mut f| {
                            if let Some(severity) = entry.severity_override {
                                f.severity = severity;
                            }
                            f
                        }),
                );
            }
            Err(payload) => {
                let reason = panic_payload_to_string(payload.as_ref());
                warn!(
                    "Rule {} failed on {}: {}",
                    rule_id,
                    unit.path.display(),
                    reason
                );
                findings.push(Finding {
                    rule_id: rule_id.to_string(),
                    location: Location::new(unit.path.clone(), 1, 1),
                    message: format!("rule `{}` failed on this file: {}", rule_id, reason),
                    severity: Severity::Error,
                });
            }
        }
    }

    findings
}

fn parse_failure_finding(error: &ParseError) -> Finding {
    let (line, column) = error.position();
    Finding {
        rule_id: PARSE_ERROR_RULE_ID.to_string(),
        location: Location::new(error.path().clone(), line, column),
        message: error.to_string(),
        severity: Severity::Error,
    }
}

fn panic_payload_to_string(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

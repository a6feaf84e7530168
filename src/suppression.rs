//! Support for `// lint-ignore` comments that suppress findings
//!
//! Supports the following formats, trailing a source line:
//! - `// lint-ignore` - suppress all findings on this line
//! - `// lint-ignore: final-field` - suppress one rule on this line
//! - `// lint-ignore: final-field, constant-naming` - suppress several rules

use std::collections::HashSet;

use crate::syntax::Comment;

const MARKER: &str = "lint-ignore";

/// Parsed suppression directive
#[derive(Debug, Clone)]
pub struct SuppressDirective {
    /// Line number (1-based)
    pub line: usize,
    /// Rule IDs to suppress (empty means suppress all)
    pub rule_ids: HashSet<String>,
}

/// Collect directives from the line comments of a unit
pub fn parse_suppressions(comments: &[Comment]) -> Vec<SuppressDirective> {
    comments
        .iter()
        .filter_map(|comment| {
            parse_comment(&comment.text).map(|rule_ids| SuppressDirective {
                line: comment.line,
                rule_ids,
            })
        })
        .collect()
}

/// Parse a single `//` comment; `None` when it is not a directive
fn parse_comment(comment: &str) -> Option<HashSet<String>> {
    let body = comment.trim_start_matches('/').trim_start();
    let is_directive = body
        .get(..MARKER.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MARKER));
    if !is_directive {
        return None;
    }

    let rest = body.get(MARKER.len()..).unwrap_or("").trim_start();
    let Some(rules_part) = rest.strip_prefix(':') else {
        // Bare marker, possibly followed by an explanation
        return Some(HashSet::new());
    };

    // Take each comma separated id up to the first whitespace
    Some(
        rules_part
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.split_whitespace().next())
            .map(str::to_string)
            .collect(),
    )
}

/// Check if a finding at a specific line is suppressed
pub fn is_finding_suppressed(line: usize, rule_id: &str, directives: &[SuppressDirective]) -> bool {
    directives.iter().any(|directive| {
        directive.line == line
            && (directive.rule_ids.is_empty() || directive.rule_ids.contains(rule_id))
    })
}

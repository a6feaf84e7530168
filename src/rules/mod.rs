//! Built-in convention rules

pub mod base;

// Individual rule implementations
pub mod constant_naming;
pub mod final_field;
pub mod line_length;
pub mod logger_declaration;
pub mod method_naming;
pub mod no_field_injection;
pub mod no_lombok_data;
pub mod no_system_out;
pub mod no_wildcard_import;
pub mod optional_return;
pub mod static_date_format;
pub mod type_naming;

use crate::config::Config;
use base::LintRule;

/// Rule id carried by findings for files that could not be parsed.
/// No registered rule may use it.
pub const PARSE_ERROR_RULE_ID: &str = "parse-error";

/// Get all available rules with default options
pub fn get_all_rules() -> Vec<Box<dyn LintRule>> {
    get_all_rules_with_config(&Config::default())
}

/// Get all available rules, reading per-rule options from `config`
pub fn get_all_rules_with_config(config: &Config) -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(no_wildcard_import::NoWildcardImportRule::new()),
        Box::new(final_field::FinalFieldRule::new()),
        Box::new(optional_return::OptionalReturnRule::new()),
        Box::new(no_system_out::NoSystemOutRule::new()),
        Box::new(logger_declaration::LoggerDeclarationRule::new()),
        Box::new(no_field_injection::NoFieldInjectionRule::new()),
        Box::new(constant_naming::ConstantNamingRule::new()),
        Box::new(type_naming::TypeNamingRule::new()),
        Box::new(method_naming::MethodNamingRule::new()),
        Box::new(no_lombok_data::NoLombokDataRule::new()),
        Box::new(static_date_format::StaticDateFormatRule::new()),
        Box::new(line_length::LineLengthRule::with_config(
            config.rules.get(line_length::RULE_ID),
        )),
    ]
}

/// Get all available rule IDs
pub fn get_all_rule_ids() -> Vec<String> {
    get_all_rules()
        .into_iter()
        .map(|rule| rule.rule_id().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_rules_loaded() {
        let ids = get_all_rule_ids();
        assert_eq!(ids.len(), 12);
        assert!(ids.contains(&"no-wildcard-import".to_string()));
        assert!(ids.contains(&"final-field".to_string()));
        assert!(ids.contains(&"static-date-format".to_string()));
    }

    #[test]
    fn test_rule_ids_unique_and_not_reserved() {
        let ids = get_all_rule_ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(!ids.iter().any(|id| id == PARSE_ERROR_RULE_ID));
    }

    #[test]
    fn test_descriptions_present() {
        for rule in get_all_rules() {
            assert!(!rule.description().is_empty(), "{} has no description", rule.rule_id());
        }
    }
}

//! final-field: fields that are never reassigned are declared `final`
//!
//! A field is flagged only when `final` would compile: it gets exactly one
//! value, from its declarator or from the initializers allowed to assign it
//! (constructors and instance blocks for instance fields, `static {}` blocks
//! for static ones), and nothing else in the type writes it. Writes from
//! methods, lambdas, anonymous classes and nested types all count. Lombok
//! classes that generate setters and `volatile` fields are skipped.

use crate::models::{Finding, RuleContext};
use crate::rules::base::LintRule;
use crate::syntax::{FieldDecl, TypeDecl, TypeKind};
use crate::utils::java_patterns::{FIELD_INJECTION_ANNOTATIONS, SETTER_GENERATING_ANNOTATIONS};

pub const RULE_ID: &str = "final-field";

pub struct FinalFieldRule;

impl FinalFieldRule {
    pub fn new() -> Self {
        Self
    }

    fn type_is_exempt(decl: &TypeDecl) -> bool {
        !matches!(decl.kind, TypeKind::Class | TypeKind::Enum)
            // @Value already makes every field final
            || decl.modifiers.has_annotation("Value")
            || SETTER_GENERATING_ANNOTATIONS
                .iter()
                .any(|a| decl.modifiers.has_annotation(a))
    }

    fn field_is_exempt(field: &FieldDecl) -> bool {
        field.modifiers.is_final()
            || field.modifiers.has("volatile")
            || SETTER_GENERATING_ANNOTATIONS
                .iter()
                .chain(FIELD_INJECTION_ANNOTATIONS)
                .any(|a| field.modifiers.has_annotation(a))
    }
}

impl LintRule for FinalFieldRule {
    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn description(&self) -> &str {
        "Fields that are never reassigned must be declared final"
    }

    fn check(&self, context: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for decl in context.unit.types.iter().filter(|t| !Self::type_is_exempt(t)) {
            for field in decl.fields.iter().filter(|f| !Self::field_is_exempt(f)) {
                if !decl.initializes(field) || decl.reassigns(field) {
                    continue;
                }
                findings.push(context.finding(
                    RULE_ID,
                    self.default_severity(),
                    field.position.line,
                    field.position.column,
                    format!(
                        "field `{}` in `{}` is never reassigned; declare it final",
                        field.name, decl.name
                    ),
                ));
            }
        }

        findings
    }
}

//! Validation engine for hierarchy specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`HierarchySpec`](super::spec::HierarchySpec) and collects every
//! diagnostic into a [`ValidationReport`]. It never short-circuits on the
//! first error, so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust
//! use label_hierarchy::pipeline::spec::HierarchySpec;
//! use label_hierarchy::pipeline::validation::ValidationEngine;
//!
//! let spec = HierarchySpec::from_json(r#"{ "v": 1 }"#).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! assert!(report.is_valid());
//! ```

use std::collections::HashMap;

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::SpecError;
use super::spec::{HierarchySpec, SPEC_VERSION};
use crate::nlp::stopwords::StopwordFilter;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: a [`SpecError`] with a severity.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: SpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: SpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: SpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All error messages joined with `"; "`
    pub fn summary(&self) -> String {
        self.errors()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`HierarchySpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync`.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"runtime_limits"`).
    fn name(&self) -> &str;

    fn validate(&self, spec: &HierarchySpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`HierarchySpec`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(StopwordLanguageRule));
        engine.add_rule(Box::new(StopwordConflictRule));
        engine.add_rule(Box::new(RuntimeLimitsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &HierarchySpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Spec version must be supported ─────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &HierarchySpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            SpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("spec version {} is not supported", spec.v),
            )
            .with_hint(format!("Set \"v\" to {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Stopword language should have a bundled list ───────────────────────

struct StopwordLanguageRule;

impl ValidationRule for StopwordLanguageRule {
    fn name(&self) -> &str {
        "stopword_language"
    }

    fn validate(&self, spec: &HierarchySpec) -> Vec<ValidationDiagnostic> {
        let language = &spec.stopwords.language;
        if StopwordFilter::is_supported_language(language) {
            return vec![];
        }
        vec![ValidationDiagnostic::warning(
            SpecError::new(
                ErrorCode::UnknownLanguage,
                "/stopwords/language",
                format!("no stopword list for \"{language}\"; English is used"),
            )
            .with_hint("Use a language code such as en, de, fr, es, it, pt or nl"),
        )]
    }
}

// ─── 3. A word cannot be both added and removed ────────────────────────────

struct StopwordConflictRule;

impl ValidationRule for StopwordConflictRule {
    fn name(&self) -> &str {
        "stopword_conflict"
    }

    fn validate(&self, spec: &HierarchySpec) -> Vec<ValidationDiagnostic> {
        let fold = |w: &String| {
            if spec.stopwords.case_sensitive {
                w.clone()
            } else {
                w.to_lowercase()
            }
        };
        let removed: Vec<String> = spec.stopwords.remove.iter().map(fold).collect();

        spec.stopwords
            .extra
            .iter()
            .filter(|w| removed.contains(&fold(*w)))
            .map(|w| {
                ValidationDiagnostic::warning(
                    SpecError::new(
                        ErrorCode::ConflictingStopwords,
                        "/stopwords/remove",
                        format!("\"{w}\" is both added and removed; removal wins"),
                    )
                    .with_hint("Drop the word from one of the two lists"),
                )
            })
            .collect()
    }
}

// ─── 4. Runtime limits must be positive when set ────────────────────────────

struct RuntimeLimitsRule;

impl ValidationRule for RuntimeLimitsRule {
    fn name(&self) -> &str {
        "runtime_limits"
    }

    fn validate(&self, spec: &HierarchySpec) -> Vec<ValidationDiagnostic> {
        let checks: &[(&str, Option<usize>)] = &[
            ("max_labels", spec.runtime.max_labels),
            ("max_ngrams", spec.runtime.max_ngrams),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == Some(0))
            .map(|&(field, _)| {
                ValidationDiagnostic::error(
                    SpecError::new(
                        ErrorCode::LimitExceeded,
                        format!("/runtime/{field}"),
                        format!("{field} must be greater than 0"),
                    )
                    .with_hint(format!(
                        "Remove {field} to disable the limit, or set it to a positive value"
                    )),
                )
            })
            .collect()
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    SpecError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &HierarchySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &spec.unknown_fields, spec.strict));
        out.extend(Self::check_unknowns(
            "/stopwords",
            &spec.stopwords.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/runtime",
            &spec.runtime.unknown_fields,
            spec.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

//! Validation engine for job specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`JobSpec`](super::spec::JobSpec) and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so
//! users see all problems at once.
//!
//! ```rust
//! use recipe_graph::pipeline::spec::JobSpec;
//! use recipe_graph::pipeline::validation::ValidationEngine;
//!
//! let json = r#"{ "v": 1, "network": { "min_pairing_strength": 0 } }"#;
//! let spec = JobSpec::from_json(json).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! assert!(report.has_errors());
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::spec::*;

// ─── Codes ──────────────────────────────────────────────────────────────────

/// Stable machine-readable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    UnsupportedVersion,
    InvalidThreshold,
    InvalidSampleSize,
    InvalidDelimiter,
    InvalidOverride,
    EmptyKeywordList,
    UnknownField,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::InvalidThreshold => "invalid_threshold",
            Self::InvalidSampleSize => "invalid_sample_size",
            Self::InvalidDelimiter => "invalid_delimiter",
            Self::InvalidOverride => "invalid_override",
            Self::EmptyKeywordList => "empty_keyword_list",
            Self::UnknownField => "unknown_field",
        }
    }
}

// ─── Issue ──────────────────────────────────────────────────────────────────

/// A problem found in a spec, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecIssue {
    pub code: IssueCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SpecIssue {
    pub fn new(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for SpecIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.as_str(), self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub issue: SpecIssue,
}

impl ValidationDiagnostic {
    pub fn error(issue: SpecIssue) -> Self {
        Self {
            severity: Severity::Error,
            issue,
        }
    }

    pub fn warning(issue: SpecIssue) -> Self {
        Self {
            severity: Severity::Warning,
            issue,
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
    pub fn errors(&self) -> impl Iterator<Item = &SpecIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.issue)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &SpecIssue> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.issue)
    }

    /// Returns `true` if any diagnostic is an error.
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
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`JobSpec`] and returns zero or
/// more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"thresholds"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &JobSpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`JobSpec`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine with every built-in rule.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(ThresholdRule));
        engine.add_rule(Box::new(SampleSizeRule));
        engine.add_rule(Box::new(DelimiterRule));
        engine.add_rule(Box::new(LexiconRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule and collect all diagnostics.
    pub fn validate(&self, spec: &JobSpec) -> ValidationReport {
        let diagnostics = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(spec))
            .collect();
        ValidationReport { diagnostics }
    }
}

// ─── 1. Version ─────────────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &JobSpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return Vec::new();
        }
        vec![ValidationDiagnostic::error(
            SpecIssue::new(
                IssueCode::UnsupportedVersion,
                "/v",
                format!("unsupported spec version {}", spec.v),
            )
            .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Thresholds ──────────────────────────────────────────────────────────

struct ThresholdRule;

impl ValidationRule for ThresholdRule {
    fn name(&self) -> &str {
        "thresholds"
    }

    fn validate(&self, spec: &JobSpec) -> Vec<ValidationDiagnostic> {
        let checks = [
            ("min_node_popularity", spec.network.min_node_popularity),
            ("min_pairing_strength", spec.network.min_pairing_strength),
        ];
        checks
            .into_iter()
            .filter(|(_, value)| *value == Some(0))
            .map(|(field, _)| {
                ValidationDiagnostic::error(
                    SpecIssue::new(
                        IssueCode::InvalidThreshold,
                        format!("/network/{field}"),
                        format!("{field} must be at least 1"),
                    )
                    .with_hint("A threshold of 0 admits ingredients seen in no recipe"),
                )
            })
            .collect()
    }
}

// ─── 3. Sample size ─────────────────────────────────────────────────────────

struct SampleSizeRule;

impl ValidationRule for SampleSizeRule {
    fn name(&self) -> &str {
        "sample_size"
    }

    fn validate(&self, spec: &JobSpec) -> Vec<ValidationDiagnostic> {
        if spec.filter.max_recipes != Some(0) {
            return Vec::new();
        }
        vec![ValidationDiagnostic::error(SpecIssue::new(
            IssueCode::InvalidSampleSize,
            "/filter/max_recipes",
            "max_recipes must be at least 1",
        ))]
    }
}

// ─── 4. Delimiter ───────────────────────────────────────────────────────────

struct DelimiterRule;

impl ValidationRule for DelimiterRule {
    fn name(&self) -> &str {
        "delimiter"
    }

    fn validate(&self, spec: &JobSpec) -> Vec<ValidationDiagnostic> {
        let d = spec.input.delimiter.as_bytes();
        if d.len() == 1 && d[0].is_ascii() {
            return Vec::new();
        }
        vec![ValidationDiagnostic::error(
            SpecIssue::new(
                IssueCode::InvalidDelimiter,
                "/input/delimiter",
                format!("delimiter {:?} is not a single ASCII character", spec.input.delimiter),
            )
            .with_hint("Use e.g. \";\" or \",\""),
        )]
    }
}

// ─── 5. Lexicon ─────────────────────────────────────────────────────────────

struct LexiconRule;

impl ValidationRule for LexiconRule {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn validate(&self, spec: &JobSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        for (i, rule) in spec.lexicon.overrides.iter().flatten().enumerate() {
            let path = format!("/lexicon/overrides/{i}");
            if rule.contains.is_empty() {
                out.push(ValidationDiagnostic::error(
                    SpecIssue::new(
                        IssueCode::InvalidOverride,
                        format!("{path}/contains"),
                        "empty match substring would rewrite every ingredient",
                    ),
                ));
            }
            if rule.label.len() < 2 {
                out.push(ValidationDiagnostic::warning(
                    SpecIssue::new(
                        IssueCode::InvalidOverride,
                        format!("{path}/label"),
                        format!("label {:?} is too short and will be discarded", rule.label),
                    )
                    .with_hint("Canonical names need at least two characters"),
                ));
            }
        }

        let keyword_lists = [
            ("pantry", &spec.lexicon.pantry),
            ("produce", &spec.lexicon.produce),
        ];
        for (field, list) in keyword_lists {
            if list.as_ref().is_some_and(|l| l.is_empty()) {
                out.push(ValidationDiagnostic::warning(SpecIssue::new(
                    IssueCode::EmptyKeywordList,
                    format!("/lexicon/{field}"),
                    format!("empty {field} list puts no ingredient in that group"),
                )));
            }
        }

        out
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    /// Collect unknown-field diagnostics at the given JSON pointer `path`
    /// from the extra fields captured by `#[serde(flatten)]`.
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
                    SpecIssue::new(
                        IssueCode::UnknownField,
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

    fn validate(&self, spec: &JobSpec) -> Vec<ValidationDiagnostic> {
        let sections = [
            ("", &spec.unknown_fields),
            ("/input", &spec.input.unknown_fields),
            ("/input/columns", &spec.input.columns.unknown_fields),
            ("/filter", &spec.filter.unknown_fields),
            ("/network", &spec.network.unknown_fields),
            ("/lexicon", &spec.lexicon.unknown_fields),
            ("/timeline", &spec.timeline.unknown_fields),
            ("/output", &spec.output.unknown_fields),
        ];
        sections
            .into_iter()
            .flat_map(|(path, unknowns)| Self::check_unknowns(path, unknowns, spec.strict))
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

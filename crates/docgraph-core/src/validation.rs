//! Frontmatter validation system.
//!
//! Provides validators for documentation frontmatter. The [`Validator`] trait
//! allows custom rules to be combined with the built-in schema checks through
//! [`CompositeValidator`].

use crate::config::MetadataConfig;
use crate::models::{DocumentCategory, DocumentStatus, Frontmatter};
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Matches `major.minor.patch`
static SEMVER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").unwrap());

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational message (not a problem)
    Info,
    /// Warning (should be addressed but not critical)
    Warning,
    /// Error (should be fixed)
    Error,
}

impl Severity {
    /// Check if this severity is considered a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// What kind of rule an issue violates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// A field is missing
    Required,
    /// A field has the wrong value type
    Type,
    /// A value is not in the accepted format or set
    Format,
    /// A length or count is out of bounds
    Range,
}

/// A validation issue found in frontmatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Frontmatter key the issue refers to
    pub field: String,
    pub kind: IssueKind,
    /// Human-readable message
    pub message: String,
    /// Suggested fix (optional)
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue
    pub fn new(
        severity: Severity,
        field: impl Into<String>,
        kind: IssueKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            field: field.into(),
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Shorthand for an error-level issue
    pub fn error(field: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, field, kind, message)
    }

    /// Shorthand for a warning-level issue
    pub fn warning(field: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, field, kind, message)
    }

    /// Set a suggested fix
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Result of validating frontmatter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether validation passed (no errors)
    pub passed: bool,
    /// All issues found
    pub issues: Vec<ValidationIssue>,
    /// Summary counts by severity
    pub summary: ValidationSummary,
}

/// Summary of validation results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub info_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
}

impl ValidationReport {
    /// Create a new validation report
    pub fn new() -> Self {
        Self {
            passed: true,
            issues: Vec::new(),
            summary: ValidationSummary::default(),
        }
    }

    /// Add an issue to the report
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Info => self.summary.info_count += 1,
            Severity::Warning => self.summary.warning_count += 1,
            Severity::Error => {
                self.summary.error_count += 1;
                self.passed = false;
            }
        }

        self.issues.push(issue);
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        for issue in other.issues {
            self.add_issue(issue);
        }
    }

    /// Get issues by severity
    pub fn issues_by_severity(&self, severity: Severity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    /// Errors only
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues_by_severity(Severity::Error)
    }

    /// Warnings only
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues_by_severity(Severity::Warning)
    }

    /// Check if there are any failures
    pub fn has_failures(&self) -> bool {
        !self.passed
    }

    /// Whether any issue refers to `field`
    pub fn has_issue_for(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }

    /// Total issue count
    pub fn total_issues(&self) -> usize {
        self.issues.len()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for frontmatter validators
pub trait Validator {
    /// Validate frontmatter and return a report
    fn validate(&self, frontmatter: &Frontmatter) -> ValidationReport;

    /// Name of this validator
    fn name(&self) -> &str;
}

/// Checks frontmatter against the documentation metadata schema
#[derive(Debug, Clone, Default)]
pub struct MetadataValidator {
    config: MetadataConfig,
}

impl MetadataValidator {
    /// Create a validator with the given schema limits
    pub fn new(config: MetadataConfig) -> Self {
        Self { config }
    }

    /// Schema limits in use
    pub fn config(&self) -> &MetadataConfig {
        &self.config
    }

    fn check_title(&self, frontmatter: &Frontmatter, report: &mut ValidationReport) {
        let title = match frontmatter.get("title") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.trim()),
            Some(_) => {
                report.add_issue(ValidationIssue::error(
                    "title",
                    IssueKind::Type,
                    "Title must be a string",
                ));
                return;
            }
        };

        match title {
            None | Some("") => report.add_issue(
                ValidationIssue::error("title", IssueKind::Required, "Title is required")
                    .with_suggestion("Add 'title:' to frontmatter"),
            ),
            Some(title) => {
                let len = title.chars().count();
                if len < self.config.title_min_length {
                    report.add_issue(ValidationIssue::error(
                        "title",
                        IssueKind::Range,
                        format!(
                            "Title must be at least {} characters",
                            self.config.title_min_length
                        ),
                    ));
                }
                if len > self.config.title_max_length {
                    report.add_issue(ValidationIssue::error(
                        "title",
                        IssueKind::Range,
                        format!(
                            "Title must not exceed {} characters",
                            self.config.title_max_length
                        ),
                    ));
                }
            }
        }
    }

    fn check_category(&self, frontmatter: &Frontmatter, report: &mut ValidationReport) {
        match frontmatter.get("category") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) if DocumentCategory::is_known(s) => {}
            Some(_) => {
                let known: Vec<&str> = DocumentCategory::ALL.iter().map(|c| c.as_str()).collect();
                report.add_issue(ValidationIssue::error(
                    "category",
                    IssueKind::Format,
                    format!("Invalid category. Must be one of: {}", known.join(", ")),
                ));
            }
        }
    }

    fn check_description(&self, frontmatter: &Frontmatter, report: &mut ValidationReport) {
        match frontmatter.get("description") {
            Some(Value::String(s)) if !s.trim().is_empty() => {
                if s.chars().count() > self.config.description_max_length {
                    report.add_issue(ValidationIssue::error(
                        "description",
                        IssueKind::Range,
                        format!(
                            "Description must not exceed {} characters",
                            self.config.description_max_length
                        ),
                    ));
                }
            }
            Some(Value::String(_)) | None | Some(Value::Null) => report.add_issue(
                ValidationIssue::warning(
                    "description",
                    IssueKind::Required,
                    "Adding a description is recommended",
                ),
            ),
            Some(_) => report.add_issue(ValidationIssue::error(
                "description",
                IssueKind::Type,
                "Description must be a string",
            )),
        }
    }

    fn check_tags(&self, frontmatter: &Frontmatter, report: &mut ValidationReport) {
        let count = match frontmatter.get("tags") {
            None | Some(Value::Null) => 0,
            Some(Value::String(s)) => usize::from(!s.trim().is_empty()),
            Some(Value::Array(items)) => {
                for (idx, tag) in items.iter().enumerate() {
                    if !tag.is_string() {
                        report.add_issue(ValidationIssue::warning(
                            "tags",
                            IssueKind::Type,
                            format!("Tag at index {} is not a string", idx),
                        ));
                    }
                }
                items.len()
            }
            Some(_) => {
                report.add_issue(ValidationIssue::error(
                    "tags",
                    IssueKind::Type,
                    "Tags must be a list",
                ));
                return;
            }
        };

        if count == 0 {
            report.add_issue(ValidationIssue::warning(
                "tags",
                IssueKind::Required,
                "Adding tags is recommended for better search",
            ));
        } else if count > self.config.max_tags {
            report.add_issue(ValidationIssue::error(
                "tags",
                IssueKind::Range,
                format!("There can be at most {} tags", self.config.max_tags),
            ));
        }
    }

    fn check_status(&self, frontmatter: &Frontmatter, report: &mut ValidationReport) {
        match frontmatter.get("status") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) if DocumentStatus::parse(s).is_some() => {}
            Some(_) => {
                let known: Vec<&str> = DocumentStatus::ALL.iter().map(|s| s.as_str()).collect();
                report.add_issue(ValidationIssue::error(
                    "status",
                    IssueKind::Format,
                    format!("Invalid status. Must be one of: {}", known.join(", ")),
                ));
            }
        }
    }

    fn check_author(&self, frontmatter: &Frontmatter, report: &mut ValidationReport) {
        if frontmatter.get_str("author").is_none() {
            report.add_issue(ValidationIssue::warning(
                "author",
                IssueKind::Required,
                "Specifying an author is recommended",
            ));
        }
    }

    fn check_version(&self, frontmatter: &Frontmatter, report: &mut ValidationReport) {
        let version = match frontmatter.get("version") {
            None | Some(Value::Null) => return,
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => other.to_string(),
        };

        if !SEMVER.is_match(&version) {
            report.add_issue(
                ValidationIssue::error(
                    "version",
                    IssueKind::Format,
                    "Version must follow semver format",
                )
                .with_suggestion("Use MAJOR.MINOR.PATCH, e.g. 1.0.0"),
            );
        }
    }

    fn check_date(&self, frontmatter: &Frontmatter, report: &mut ValidationReport) {
        match frontmatter.get("date") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) if is_valid_date(s) => {}
            Some(_) => report.add_issue(
                ValidationIssue::error("date", IssueKind::Format, "Invalid date")
                    .with_suggestion("Use ISO format (YYYY-MM-DD)"),
            ),
        }
    }
}

/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps
pub fn is_valid_date(value: &str) -> bool {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

impl Validator for MetadataValidator {
    fn validate(&self, frontmatter: &Frontmatter) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.check_title(frontmatter, &mut report);
        self.check_category(frontmatter, &mut report);
        self.check_description(frontmatter, &mut report);
        self.check_tags(frontmatter, &mut report);
        self.check_status(frontmatter, &mut report);
        self.check_version(frontmatter, &mut report);
        self.check_date(frontmatter, &mut report);
        self.check_author(frontmatter, &mut report);

        report
    }

    fn name(&self) -> &str {
        "MetadataValidator"
    }
}

/// Requires a configurable set of keys to be present and non-empty
#[derive(Debug, Clone, Default)]
pub struct RequiredFieldsValidator {
    required_fields: BTreeSet<String>,
}

impl RequiredFieldsValidator {
    /// Create a validator with no required fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a specific field to be present
    pub fn require_field(mut self, field: impl Into<String>) -> Self {
        self.required_fields.insert(field.into());
        self
    }
}

impl Validator for RequiredFieldsValidator {
    fn validate(&self, frontmatter: &Frontmatter) -> ValidationReport {
        let mut report = ValidationReport::new();

        for field in &self.required_fields {
            let present = match frontmatter.get(field) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Array(items)) => !items.is_empty(),
                Some(_) => true,
            };

            if !present {
                report.add_issue(
                    ValidationIssue::error(
                        field.as_str(),
                        IssueKind::Required,
                        format!("Missing required field: {}", field),
                    )
                    .with_suggestion(format!("Add '{}:' to frontmatter", field)),
                );
            }
        }

        report
    }

    fn name(&self) -> &str {
        "RequiredFieldsValidator"
    }
}

/// Composite validator that runs multiple validators
pub struct CompositeValidator {
    validators: Vec<Box<dyn Validator>>,
}

impl CompositeValidator {
    /// Create a new composite validator
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Add a validator
    pub fn add_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Schema validation with the given limits
    pub fn default_rules(config: MetadataConfig) -> Self {
        Self::new().add_validator(Box::new(MetadataValidator::new(config)))
    }
}

impl Default for CompositeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for CompositeValidator {
    fn validate(&self, frontmatter: &Frontmatter) -> ValidationReport {
        let mut report = ValidationReport::new();

        for validator in &self.validators {
            report.merge(validator.validate(frontmatter));
        }

        report
    }

    fn name(&self) -> &str {
        "CompositeValidator"
    }
}

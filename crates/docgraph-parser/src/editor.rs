//! Frontmatter editing: merge a patch into a document, normalize, validate.

use crate::frontmatter::{parse_frontmatter, render_document};
use docgraph_core::{
    Frontmatter, MetadataConfig, MetadataValidator, Result, ValidationReport, Validator,
    autofix_at,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of editing one document's frontmatter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataUpdate {
    /// Document content after the edit (the original when rejected)
    pub content: String,
    /// Frontmatter that was validated
    pub frontmatter: Frontmatter,
    pub report: ValidationReport,
    /// Whether `content` carries the new frontmatter
    pub applied: bool,
}

/// Per-document outcome of a bulk edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUpdateResult {
    pub path: String,
    pub success: bool,
    pub content: String,
    pub report: Option<ValidationReport>,
    pub error: Option<String>,
}

/// Applies frontmatter patches to markdown documents
#[derive(Debug, Clone, Default)]
pub struct MetadataEditor {
    config: MetadataConfig,
    validator: MetadataValidator,
}

impl MetadataEditor {
    /// Create an editor with the given schema and editing rules
    pub fn new(config: MetadataConfig) -> Self {
        Self {
            validator: MetadataValidator::new(config.clone()),
            config,
        }
    }

    /// Merge `patch` into the document's frontmatter.
    pub fn update(&self, original: &str, patch: &Frontmatter) -> Result<MetadataUpdate> {
        self.update_at(original, patch, Utc::now())
    }

    /// Same as [`update`](Self::update) with an explicit timestamp for autofix.
    ///
    /// In strict mode a patch that leaves validation errors is rejected and the
    /// original content is returned untouched.
    pub fn update_at(
        &self,
        original: &str,
        patch: &Frontmatter,
        now: DateTime<Utc>,
    ) -> Result<MetadataUpdate> {
        let (existing, body) = parse_frontmatter(original);
        let mut frontmatter = existing.unwrap_or_default();
        frontmatter.merge(patch);

        if self.config.autofix {
            frontmatter = autofix_at(&frontmatter, now);
        }

        let report = self.validator.validate(&frontmatter);

        if self.config.strict_mode && report.has_failures() {
            log::debug!(
                "Rejected metadata update with {} error(s)",
                report.summary.error_count
            );
            return Ok(MetadataUpdate {
                content: original.to_string(),
                frontmatter,
                report,
                applied: false,
            });
        }

        let content = render_document(&frontmatter, body)?;
        Ok(MetadataUpdate {
            content,
            frontmatter,
            report,
            applied: true,
        })
    }

    /// Apply one patch to many `(path, content)` documents.
    pub fn bulk_update<P, C>(&self, documents: &[(P, C)], patch: &Frontmatter) -> Vec<BulkUpdateResult>
    where
        P: AsRef<str>,
        C: AsRef<str>,
    {
        let now = Utc::now();
        let results: Vec<BulkUpdateResult> = documents
            .iter()
            .map(|(path, content)| {
                let path = path.as_ref().to_string();
                match self.update_at(content.as_ref(), patch, now) {
                    Ok(update) => BulkUpdateResult {
                        path,
                        success: update.applied,
                        content: update.content,
                        report: Some(update.report),
                        error: None,
                    },
                    Err(e) => BulkUpdateResult {
                        path,
                        success: false,
                        content: content.as_ref().to_string(),
                        report: None,
                        error: Some(e.to_string()),
                    },
                }
            })
            .collect();

        let succeeded = results.iter().filter(|r| r.success).count();
        log::info!(
            "Bulk metadata update: {}/{} documents updated",
            succeeded,
            results.len()
        );
        results
    }
}

//! Starter frontmatter for new documents.
//!
//! A [`TemplateRegistry`] ships with one template per common document kind
//! (roadmap, guide, api, tutorial, best-practices). Creating a document merges
//! caller overrides over the template, normalizes the result with autofix and
//! renders it with a short placeholder body.

use crate::frontmatter::render_document;
use chrono::{DateTime, Utc};
use docgraph_core::{DocumentCategory, Error, Frontmatter, Result, autofix_at};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Placeholder line at the end of a generated body
pub const BODY_PLACEHOLDER: &str = "<!-- Write your content here -->";

/// Named starting point for a document's frontmatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: DocumentCategory,
    pub metadata: Frontmatter,
}

impl MetadataTemplate {
    fn starter(
        id: &str,
        name: &str,
        description: &str,
        category: DocumentCategory,
        title: &str,
        summary: &str,
        tags: [&str; 2],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            metadata: Frontmatter::new()
                .with("title", title)
                .with("description", summary)
                .with("category", category.as_str())
                .with("tags", json!(tags))
                .with("status", "draft")
                .with("version", "1.0.0"),
        }
    }
}

/// Templates in registration order
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<MetadataTemplate>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Registry holding the built-in templates
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for template in default_templates() {
            registry.register(template);
        }
        registry
    }

    /// Registry with no templates
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Add a template, replacing any existing one with the same id in place
    pub fn register(&mut self, template: MetadataTemplate) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    /// Template by id
    pub fn get(&self, id: &str) -> Option<&MetadataTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Every template
    pub fn all(&self) -> &[MetadataTemplate] {
        &self.templates
    }

    /// Templates of one category
    pub fn by_category(&self, category: DocumentCategory) -> Vec<&MetadataTemplate> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Render a new document from template `id` with `overrides` applied
    pub fn create(&self, id: &str, overrides: &Frontmatter) -> Result<String> {
        self.create_at(id, overrides, Utc::now())
    }

    /// Same as [`create`](Self::create) as of `now`.
    ///
    /// `date` is always set to the day of `now`, whatever the overrides say.
    pub fn create_at(
        &self,
        id: &str,
        overrides: &Frontmatter,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let template = self.get(id).ok_or_else(|| Error::template_not_found(id))?;

        let mut frontmatter = template.metadata.clone();
        frontmatter.merge(overrides);
        frontmatter.data.insert(
            "date".to_string(),
            Value::String(now.format("%Y-%m-%d").to_string()),
        );
        let frontmatter = autofix_at(&frontmatter, now);

        let title = frontmatter.get_str("title").unwrap_or(template.name.as_str());
        let mut body = format!("# {}\n\n", title);
        if let Some(description) = frontmatter.get_str("description") {
            body.push_str(description);
            body.push_str("\n\n");
        }
        body.push_str(BODY_PLACEHOLDER);
        body.push('\n');

        log::debug!("Created document from template {}", id);
        render_document(&frontmatter, &body)
    }
}

fn default_templates() -> Vec<MetadataTemplate> {
    vec![
        MetadataTemplate::starter(
            "roadmap",
            "Roadmap Document",
            "Template for roadmap documents",
            DocumentCategory::Roadmap,
            "New Roadmap",
            "Roadmap overview",
            ["roadmap", "planning"],
        ),
        MetadataTemplate::starter(
            "guide",
            "Guide Document",
            "Template for guides",
            DocumentCategory::Guide,
            "New Guide",
            "Guide overview",
            ["guide", "tutorial"],
        ),
        MetadataTemplate::starter(
            "api",
            "API Documentation",
            "Template for API documentation",
            DocumentCategory::Api,
            "API Documentation",
            "API reference",
            ["api", "reference"],
        ),
        MetadataTemplate::starter(
            "tutorial",
            "Tutorial",
            "Template for step-by-step tutorials",
            DocumentCategory::Tutorial,
            "New Tutorial",
            "Step-by-step tutorial",
            ["tutorial", "learning"],
        ),
        MetadataTemplate::starter(
            "best-practices",
            "Best Practices",
            "Template for best practice documents",
            DocumentCategory::BestPractices,
            "Best Practices",
            "Best practices and recommendations",
            ["best-practices", "standards"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse_frontmatter;
    use chrono::TimeZone;
    use docgraph_core::{MetadataValidator, Validator};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_default_templates() {
        let registry = TemplateRegistry::new();
        let ids: Vec<&str> = registry.all().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["roadmap", "guide", "api", "tutorial", "best-practices"]);

        let api = registry.get("api").unwrap();
        assert_eq!(api.category, DocumentCategory::Api);
        assert_eq!(api.metadata.tags(), vec!["api", "reference"]);
        assert!(registry.get("cookbook").is_none());
    }

    #[test]
    fn test_templates_by_category() {
        let registry = TemplateRegistry::new();
        let guides = registry.by_category(DocumentCategory::Guide);
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].id, "guide");
        assert!(registry.by_category(DocumentCategory::Other).is_empty());
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = TemplateRegistry::new();
        let mut custom = registry.get("guide").unwrap().clone();
        custom.name = "House Guide".to_string();
        registry.register(custom);

        assert_eq!(registry.all().len(), 5);
        assert_eq!(registry.all()[1].name, "House Guide");
    }

    #[test]
    fn test_create_from_template() {
        let overrides = Frontmatter::new()
            .with("title", "  hooks in depth ")
            .with("tags", json!(["React", "hooks", "react"]))
            .with("date", "2001-01-01");

        let content = TemplateRegistry::new()
            .create_at("guide", &overrides, now())
            .unwrap();
        let (fm, body) = parse_frontmatter(&content);
        let fm = fm.unwrap();

        assert_eq!(fm.get_str("title"), Some("Hooks in depth"));
        assert_eq!(fm.get_str("category"), Some("guide"));
        assert_eq!(fm.get_str("description"), Some("Guide overview"));
        assert_eq!(fm.tags(), vec!["react", "hooks"]);
        assert_eq!(fm.get_str("date"), Some("2024-05-17"));
        assert_eq!(fm.get_str("status"), Some("draft"));
        assert_eq!(fm.get_str("lastModified"), Some("2024-05-17T08:30:00.000Z"));
        assert_eq!(
            body,
            "# Hooks in depth\n\nGuide overview\n\n<!-- Write your content here -->\n"
        );

        assert!(!MetadataValidator::default().validate(&fm).has_failures());
    }

    #[test]
    fn test_create_without_description() {
        let overrides = Frontmatter::new().with("description", "");
        let content = TemplateRegistry::new()
            .create_at("roadmap", &overrides, now())
            .unwrap();
        let (_, body) = parse_frontmatter(&content);
        assert_eq!(body, "# New Roadmap\n\n<!-- Write your content here -->\n");
    }

    #[test]
    fn test_create_unknown_template() {
        let err = TemplateRegistry::new()
            .create("cookbook", &Frontmatter::new())
            .unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { ref id } if id == "cookbook"));
    }
}

//! Core data models for documentation sets.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Lenient**: Unknown categories and malformed tags degrade to defaults
//! - **Type-Safe**: Enums replace magic strings

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Classification of a document, used for color coding and filtering.
///
/// Parsing, deserialization and validation share one rule: names are trimmed
/// and case-insensitive, and anything outside the known set is
/// [`DocumentCategory::Other`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum DocumentCategory {
    Roadmap,
    Guide,
    Api,
    Tutorial,
    BestPractices,
    Documentation,
    Architecture,
    Reference,
    /// Catch-all for missing or unrecognized categories
    #[default]
    Other,
}

impl DocumentCategory {
    /// Every category, in display order
    pub const ALL: [DocumentCategory; 9] = [
        Self::Roadmap,
        Self::Guide,
        Self::Api,
        Self::Tutorial,
        Self::BestPractices,
        Self::Documentation,
        Self::Architecture,
        Self::Reference,
        Self::Other,
    ];

    /// Parse a category name, falling back to `Other` for anything unknown.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "roadmap" => Self::Roadmap,
            "guide" => Self::Guide,
            "api" => Self::Api,
            "tutorial" => Self::Tutorial,
            "best-practices" | "best_practices" => Self::BestPractices,
            "documentation" => Self::Documentation,
            "architecture" => Self::Architecture,
            "reference" => Self::Reference,
            _ => Self::Other,
        }
    }

    /// Whether `value` names a category, `other` included (used by validation)
    pub fn is_known(value: &str) -> bool {
        Self::parse(value) != Self::Other || value.trim().eq_ignore_ascii_case("other")
    }

    /// Canonical kebab-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roadmap => "roadmap",
            Self::Guide => "guide",
            Self::Api => "api",
            Self::Tutorial => "tutorial",
            Self::BestPractices => "best-practices",
            Self::Documentation => "documentation",
            Self::Architecture => "architecture",
            Self::Reference => "reference",
            Self::Other => "other",
        }
    }

    /// Display color used by graph renderers
    pub fn color(&self) -> &'static str {
        match self {
            Self::Roadmap => "#3b82f6",
            Self::Guide => "#10b981",
            Self::Api => "#f59e0b",
            Self::Tutorial => "#8b5cf6",
            Self::BestPractices => "#ec4899",
            Self::Documentation => "#06b6d4",
            Self::Architecture => "#ef4444",
            Self::Reference => "#14b8a6",
            Self::Other => "#6b7280",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DocumentCategory {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for DocumentCategory {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// Editorial status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Review,
    Published,
    Archived,
}

impl DocumentStatus {
    /// Every status, in lifecycle order
    pub const ALL: [DocumentStatus; 4] = [
        Self::Draft,
        Self::Review,
        Self::Published,
        Self::Archived,
    ];

    /// Parse a status name; unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "review" => Some(Self::Review),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw YAML frontmatter, kept as JSON values so unknown keys survive edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub data: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// Create empty frontmatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Get a non-empty string value by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Extract tags from frontmatter
    pub fn tags(&self) -> Vec<String> {
        match self.data.get("tags") {
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            Some(Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => vec![],
        }
    }

    /// Overlay every key of `patch` onto this frontmatter
    pub fn merge(&mut self, patch: &Frontmatter) {
        for (key, value) in &patch.data {
            self.data.insert(key.clone(), value.clone());
        }
    }

    /// Whether there are no keys
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Typed, lenient view of a document's frontmatter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: DocumentCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub version: Option<String>,
    pub status: Option<DocumentStatus>,
    pub last_modified: Option<String>,
}

impl DocumentMetadata {
    /// Create metadata with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Build metadata from raw frontmatter.
    ///
    /// Never fails: a missing title uses `fallback_title`, an unknown category
    /// becomes `Other`, an unknown status is dropped and non-string tags are
    /// ignored.
    pub fn from_frontmatter(frontmatter: &Frontmatter, fallback_title: &str) -> Self {
        let owned = |key: &str| frontmatter.get_str(key).map(|s| s.trim().to_string());
        // YAML dates and versions may come through as non-strings
        let scalar = |key: &str| match frontmatter.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Self {
            title: owned("title").unwrap_or_else(|| fallback_title.to_string()),
            description: owned("description"),
            category: frontmatter
                .get_str("category")
                .map(DocumentCategory::parse)
                .unwrap_or_default(),
            tags: frontmatter.tags(),
            author: owned("author"),
            date: scalar("date"),
            version: scalar("version"),
            status: frontmatter.get_str("status").and_then(DocumentStatus::parse),
            last_modified: owned("lastModified"),
        }
    }
}

/// A documentation file loaded for graph analysis.
///
/// `id` must be unique within a collection; loaders use the document path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub path: String,
    pub metadata: DocumentMetadata,
    /// Markdown body without frontmatter
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// Create a document whose path equals its id
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: id.clone(),
            id,
            metadata: DocumentMetadata::new(title),
            content: String::new(),
        }
    }

    /// Set the path (defaults to the id)
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: DocumentCategory) -> Self {
        self.metadata.category = category;
        self
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the markdown body
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Display title
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Category
    pub fn category(&self) -> DocumentCategory {
        self.metadata.category
    }

    /// Tags, trimmed, with empty entries skipped
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.metadata
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }
}

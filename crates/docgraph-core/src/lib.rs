//! # docgraph Core
//!
//! Core data models, error types, and configuration for building document
//! relationship graphs from markdown documentation sets.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Type-Driven Design**: Closed enums replace loosely typed strings
//! - **Lenient Input**: Unknown categories and malformed tags degrade to defaults
//! - **Zero Panic in Libraries**: Fallible operations return `Result<T, Error>`
//! - **Builder Pattern for Complex Types**: Configuration structs use builders
//!
//! ## Core Modules
//!
//! - [`models`] - Documents, metadata, categories and raw frontmatter
//! - [`error`] - Error type and Result alias
//! - [`config`] - Graph, metadata and scanning configuration
//! - [`validation`] - Frontmatter schema validation
//! - [`autofix`] - Frontmatter normalization
//! - [`diff`] - Frontmatter version comparison
//! - [`stats`] - Metadata coverage statistics
//!
//! ## Usage Examples
//!
//! ### Working with Documents
//!
//! ```
//! use docgraph_core::prelude::*;
//!
//! let doc = Document::new("/guides/setup.md", "Setup")
//!     .with_category(DocumentCategory::Guide)
//!     .with_tags(["install", "setup"])
//!     .with_content("See [[configuration]] next.");
//!
//! assert_eq!(doc.category().color(), "#10b981");
//! ```
//!
//! ### Validating Frontmatter
//!
//! ```
//! use docgraph_core::prelude::*;
//!
//! let fm = Frontmatter::new().with("title", "Setup").with("category", "cookbook");
//! let report = MetadataValidator::default().validate(&fm);
//! assert!(report.has_failures());
//! ```

pub mod autofix;
pub mod config;
pub mod diff;
pub mod error;
pub mod models;
pub mod stats;
pub mod validation;

pub use autofix::{autofix, autofix_at};
pub use config::*;
pub use diff::{ChangeKind, DiffEntry, DiffStats, MetadataDiff, diff_metadata, unified_diff};
pub use error::{Error, Result};
pub use models::*;
pub use stats::{MetadataStats, MissingMetadata, TagCount};
pub use validation::{
    CompositeValidator, IssueKind, MetadataValidator, RequiredFieldsValidator, Severity,
    ValidationIssue, ValidationReport, ValidationSummary, Validator,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{DocGraphConfig, GraphConfig, MetadataConfig, ScanConfig};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Document, DocumentCategory, DocumentMetadata, DocumentStatus, Frontmatter,
    };
    pub use crate::validation::{
        CompositeValidator, MetadataValidator, Severity, ValidationIssue, ValidationReport,
        Validator,
    };
}

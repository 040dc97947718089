//! # docgraph Parser
//!
//! Markdown document loading built on `pulldown-cmark`.
//!
//! This crate provides:
//! - YAML frontmatter splitting, lenient parsing and re-rendering
//! - Reference extraction: `[[wikilinks]]`, `![[embeds]]` and `[text](doc.md)` links
//! - **Code block awareness**: references inside code blocks/inline code are excluded
//! - Directory scanning into [`Document`](docgraph_core::Document)s
//! - Frontmatter editing with autofix and validation
//! - Keyword-based tag suggestions
//! - Starter templates for new documents
//!
//! ## Architecture
//!
//! Reference extraction is two-phase:
//!
//! ### Phase 1: pulldown-cmark pass
//! - Builds excluded ranges (code blocks, inline code)
//!
//! ### Phase 2: Regex pass
//! - Matches wikilinks and markdown links
//! - **Skips excluded ranges** to avoid matching inside code
//!
//! ## Quick Start
//!
//! ```
//! use docgraph_parser::{extract_references, parse_document};
//!
//! let raw = "---\ntitle: Setup\ncategory: guide\n---\n\nRead [[ROADMAP]] and [api](docs/api.md).\n\n`[[not-a-link]]`";
//!
//! let doc = parse_document("/setup.md", raw);
//! assert_eq!(doc.title(), "Setup");
//!
//! let refs = extract_references(&doc.content);
//! assert_eq!(refs.wikilinks.len(), 1);
//! assert_eq!(refs.markdown_links[0].target, "docs/api.md");
//! ```

pub mod document;
pub mod editor;
pub mod frontmatter;
pub mod references;
pub mod suggest;
pub mod templates;

pub use document::{DocumentScanner, ScanResult, parse_document, read_frontmatter};
pub use editor::{BulkUpdateResult, MetadataEditor, MetadataUpdate};
pub use frontmatter::{parse_frontmatter, parse_yaml, render_document, split_frontmatter};
pub use references::{Reference, ReferenceKind, References, extract_references};
pub use suggest::{MAX_SUGGESTIONS, TAG_VOCABULARY, suggest_tags};
pub use templates::{BODY_PLACEHOLDER, MetadataTemplate, TemplateRegistry};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{DocumentScanner, ScanResult, parse_document};
    pub use crate::editor::MetadataEditor;
    pub use crate::references::{Reference, ReferenceKind, References, extract_references};
    pub use crate::templates::TemplateRegistry;
    pub use docgraph_core::prelude::*;
}

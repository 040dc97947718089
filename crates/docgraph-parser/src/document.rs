//! Turning markdown files into [`Document`]s.

use crate::frontmatter::parse_frontmatter;
use docgraph_core::{Document, DocumentCategory, DocumentMetadata, Error, Frontmatter, Result, ScanConfig};
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path};
use std::time::Instant;
use walkdir::WalkDir;

/// Build a document from its path and raw file content.
///
/// The title comes from frontmatter, then the first level-1 heading, then
/// the file stem. Missing or malformed frontmatter is not an error.
pub fn parse_document(path: &str, raw: &str) -> Document {
    let (frontmatter, body) = parse_frontmatter(raw);
    let frontmatter = frontmatter.unwrap_or_default();

    let fallback_title = first_heading(body).unwrap_or_else(|| file_stem(path).to_string());
    let metadata = DocumentMetadata::from_frontmatter(&frontmatter, &fallback_title);

    Document {
        id: path.to_string(),
        path: path.to_string(),
        metadata,
        content: body.to_string(),
    }
}

/// Raw frontmatter of a file, empty when absent or malformed
pub fn read_frontmatter(raw: &str) -> Frontmatter {
    parse_frontmatter(raw).0.unwrap_or_default()
}

fn file_stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

fn first_heading(body: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut text = String::new();

    for event in Parser::new_ext(body, Options::empty()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                in_h1 = true;
                text.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let title = text.trim();
                if !title.is_empty() {
                    return Some(title.to_string());
                }
                in_h1 = false;
            }
            Event::Text(t) | Event::Code(t) if in_h1 => text.push_str(&t),
            _ => {}
        }
    }

    None
}

/// Result of scanning a documentation directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Documents sorted by id
    pub documents: Vec<Document>,
    pub total_count: usize,
    pub category_counts: BTreeMap<DocumentCategory, usize>,
    /// Files that matched but could not be loaded
    pub skipped: Vec<String>,
    pub scan_time_ms: u64,
}

/// Walks a directory tree and loads every markdown document in it
#[derive(Debug, Clone, Default)]
pub struct DocumentScanner {
    config: ScanConfig,
}

impl DocumentScanner {
    /// Create a scanner with the given settings
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan `root`. Document ids are `/`-prefixed paths relative to it.
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        if !root.exists() {
            return Err(Error::file_not_found(root));
        }
        if !root.is_dir() {
            return Err(Error::invalid_path(format!(
                "Not a directory: {}",
                root.display()
            )));
        }

        let started = Instant::now();
        let mut documents = Vec::new();
        let mut skipped = Vec::new();

        let walker = WalkDir::new(root).follow_links(false).into_iter();
        let entries = walker.filter_entry(|entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.config.is_excluded(name))
        });

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.config.is_allowed(entry.path()) {
                continue;
            }

            let Some(id) = document_id(root, entry.path()) else {
                continue;
            };

            match self.load(entry.path()) {
                Ok(raw) => documents.push(parse_document(&id, &raw)),
                Err(e) => {
                    log::warn!("Skipping {}: {}", id, e);
                    skipped.push(id);
                }
            }
        }

        documents.sort_by(|a, b| a.id.cmp(&b.id));

        let mut category_counts = BTreeMap::new();
        for doc in &documents {
            *category_counts.entry(doc.category()).or_insert(0) += 1;
        }

        let scan_time_ms = started.elapsed().as_millis() as u64;
        log::debug!(
            "Scanned {} documents under {} in {}ms",
            documents.len(),
            root.display(),
            scan_time_ms
        );

        Ok(ScanResult {
            total_count: documents.len(),
            documents,
            category_counts,
            skipped,
            scan_time_ms,
        })
    }

    fn load(&self, path: &Path) -> Result<String> {
        let size = std::fs::metadata(path)?.len();
        if size > self.config.max_file_size {
            return Err(Error::other(format!(
                "file too large ({} bytes, max {} bytes)",
                size, self.config.max_file_size
            )));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

/// `/`-separated path relative to `root`, with a leading slash
fn document_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut id = String::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            id.push('/');
            id.push_str(part.to_str()?);
        }
    }
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_document_with_frontmatter() {
        let raw = "---\ntitle: Roadmap 2025\ncategory: roadmap\ntags: [planning, q1]\n---\n# Ignored\n\nSee [[guide]].";
        let doc = parse_document("/ROADMAP.md", raw);

        assert_eq!(doc.id, "/ROADMAP.md");
        assert_eq!(doc.title(), "Roadmap 2025");
        assert_eq!(doc.category(), DocumentCategory::Roadmap);
        assert_eq!(doc.metadata.tags, vec!["planning", "q1"]);
        assert_eq!(doc.content, "# Ignored\n\nSee [[guide]].");
    }

    #[test]
    fn test_title_falls_back_to_heading_then_stem() {
        let doc = parse_document("/docs/setup.md", "Intro\n\n# Setting `up`\n\n# Second");
        assert_eq!(doc.title(), "Setting up");

        let doc = parse_document("/docs/setup.md", "no headings here");
        assert_eq!(doc.title(), "setup");
        assert_eq!(doc.category(), DocumentCategory::Other);
    }

    #[test]
    fn test_malformed_frontmatter_degrades() {
        let doc = parse_document("/x.md", "---\ntags: [oops\n---\n# X Title");
        assert_eq!(doc.title(), "X Title");
        assert!(doc.metadata.tags.is_empty());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("/a/b/GUIDE.md"), "GUIDE");
        assert_eq!(file_stem("README"), "README");
        assert_eq!(file_stem("dir\\win.md"), "win");
    }

    #[test]
    fn test_scan_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("guides")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();

        fs::write(root.join("ROADMAP.md"), "---\ncategory: roadmap\n---\n# Roadmap").unwrap();
        fs::write(root.join("guides/setup.md"), "# Setup\n[[ROADMAP]]").unwrap();
        fs::write(root.join("notes.txt"), "not markdown").unwrap();
        fs::write(root.join("node_modules/pkg/README.md"), "# Vendored").unwrap();

        let result = DocumentScanner::default().scan(root).unwrap();
        let ids: Vec<&str> = result.documents.iter().map(|d| d.id.as_str()).collect();

        assert_eq!(ids, vec!["/ROADMAP.md", "/guides/setup.md"]);
        assert_eq!(result.total_count, 2);
        assert_eq!(result.category_counts[&DocumentCategory::Roadmap], 1);
        assert_eq!(result.category_counts[&DocumentCategory::Other], 1);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_scan_skips_oversized_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big.md"), "x".repeat(64)).unwrap();
        fs::write(temp.path().join("small.md"), "# Small").unwrap();

        let config = ScanConfig {
            max_file_size: 32,
            ..Default::default()
        };
        let result = DocumentScanner::new(config).scan(temp.path()).unwrap();

        assert_eq!(result.total_count, 1);
        assert_eq!(result.skipped, vec!["/big.md"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = DocumentScanner::default()
            .scan(&temp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));

        let file = temp.path().join("file.md");
        fs::write(&file, "x").unwrap();
        let err = DocumentScanner::default().scan(&file).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }
}

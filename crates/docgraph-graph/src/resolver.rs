//! Reference resolution against a document collection.

use docgraph_core::{Document, GraphConfig};
use docgraph_parser::{ReferenceKind, extract_references};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves reference targets to document positions.
///
/// Lookup order: normalized path, then path tail (targets with `/`) or file
/// stem (bare names), then title. Ties go to the earliest document.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    /// Normalized id/path to document index
    path_index: HashMap<String, usize>,
    /// Lowercased file stem to document index
    stem_index: HashMap<String, usize>,
    /// Lowercased title to document index
    title_index: HashMap<String, usize>,
    /// Normalized path segments per document, for tail matching
    segments: Vec<Vec<String>>,
}

impl LinkResolver {
    /// Index `documents`. Title lookup is only built when `by_title` is set.
    pub fn new(documents: &[Document], by_title: bool) -> Self {
        let mut path_index = HashMap::new();
        let mut stem_index = HashMap::new();
        let mut title_index = HashMap::new();
        let mut segments = Vec::with_capacity(documents.len());

        for (idx, doc) in documents.iter().enumerate() {
            let id = normalize_target(&doc.id);
            let path = normalize_target(&doc.path);

            for key in [&id, &path] {
                if !key.is_empty() {
                    path_index.entry(key.clone()).or_insert(idx);
                }
            }

            if let Some(stem) = path.rsplit('/').next().filter(|s| !s.is_empty()) {
                stem_index.entry(stem.to_string()).or_insert(idx);
            }

            if by_title {
                let title = doc.title().trim().to_lowercase();
                if !title.is_empty() {
                    title_index.entry(title).or_insert(idx);
                }
            }

            segments.push(path.split('/').map(str::to_string).collect());
        }

        Self {
            path_index,
            stem_index,
            title_index,
            segments,
        }
    }

    /// Index of the document `target` refers to
    pub fn resolve(&self, target: &str) -> Option<usize> {
        let normalized = normalize_target(target);
        if normalized.is_empty() {
            return None;
        }

        if let Some(&idx) = self.path_index.get(&normalized) {
            return Some(idx);
        }

        let by_location = if normalized.contains('/') {
            let tail: Vec<&str> = normalized.split('/').collect();
            self.segments.iter().position(|segs| {
                segs.len() >= tail.len() && segs[segs.len() - tail.len()..] == tail[..]
            })
        } else {
            self.stem_index.get(&normalized).copied()
        };

        by_location.or_else(|| self.title_index.get(&target.trim().to_lowercase()).copied())
    }
}

/// Lowercase, `/`-separated, without relative prefixes, leading slash or `.md`
pub fn normalize_target(target: &str) -> String {
    let mut s = target.trim().replace('\\', "/");

    loop {
        if let Some(rest) = s.strip_prefix("./") {
            s = rest.to_string();
        } else if let Some(rest) = s.strip_prefix("../") {
            s = rest.to_string();
        } else if let Some(rest) = s.strip_prefix('/') {
            s = rest.to_string();
        } else {
            break;
        }
    }

    let mut s = s.to_lowercase();
    if s.ends_with(".md") {
        s.truncate(s.len() - 3);
    }
    s.trim_end_matches('/').to_string()
}

/// A reference that resolves to no document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    /// Id of the document containing the reference
    pub source: String,
    /// Reference target as written
    pub reference: String,
    pub kind: ReferenceKind,
}

/// Every unresolvable reference, in document then reference order.
///
/// Markdown links are skipped when `include_markdown_links` is off, matching
/// what the graph builder would consider.
pub fn dangling_references(documents: &[Document], config: &GraphConfig) -> Vec<DanglingReference> {
    let resolver = LinkResolver::new(documents, config.resolve_by_title);
    let mut dangling = Vec::new();

    for doc in documents {
        let refs = extract_references(&doc.content);
        for reference in refs.iter() {
            if reference.kind == ReferenceKind::Markdown && !config.include_markdown_links {
                continue;
            }
            if resolver.resolve(&reference.target).is_none() {
                dangling.push(DanglingReference {
                    source: doc.id.clone(),
                    reference: reference.target.clone(),
                    kind: reference.kind,
                });
            }
        }
    }

    if !dangling.is_empty() {
        log::debug!("Found {} dangling references", dangling.len());
    }
    dangling
}

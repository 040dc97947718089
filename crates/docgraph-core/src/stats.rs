//! Aggregate metadata statistics over a document collection.

use crate::models::{Document, DocumentCategory, DocumentStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// How often a tag is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Number of documents missing each optional field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingMetadata {
    pub description: usize,
    pub tags: usize,
    pub author: usize,
    pub date: usize,
    pub status: usize,
}

/// Metadata coverage for a documentation set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataStats {
    pub total_documents: usize,
    pub by_category: BTreeMap<DocumentCategory, usize>,
    pub by_status: BTreeMap<DocumentStatus, usize>,
    pub by_author: BTreeMap<String, usize>,
    pub top_tags: Vec<TagCount>,
    pub missing_metadata: MissingMetadata,
}

/// Number of entries in [`MetadataStats::top_tags`]
pub const TOP_TAGS_LIMIT: usize = 10;

impl MetadataStats {
    /// Compute statistics; tag ranking is by count descending, then tag name.
    ///
    /// A tag counts once per document that carries it.
    pub fn collect(documents: &[Document]) -> Self {
        let mut stats = Self {
            total_documents: documents.len(),
            ..Default::default()
        };
        let mut tag_counts: HashMap<&str, usize> = HashMap::new();

        for doc in documents {
            let meta = &doc.metadata;

            *stats.by_category.entry(meta.category).or_default() += 1;

            match meta.status {
                Some(status) => *stats.by_status.entry(status).or_default() += 1,
                None => stats.missing_metadata.status += 1,
            }

            match meta.author.as_deref() {
                Some(author) => *stats.by_author.entry(author.to_string()).or_default() += 1,
                None => stats.missing_metadata.author += 1,
            }

            let tags: BTreeSet<&str> = doc.tags().collect();
            if tags.is_empty() {
                stats.missing_metadata.tags += 1;
            }
            for tag in tags {
                *tag_counts.entry(tag).or_default() += 1;
            }

            if meta.description.is_none() {
                stats.missing_metadata.description += 1;
            }
            if meta.date.is_none() {
                stats.missing_metadata.date += 1;
            }
        }

        let mut top: Vec<TagCount> = tag_counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        top.truncate(TOP_TAGS_LIMIT);
        stats.top_tags = top;

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection() {
        let stats = MetadataStats::collect(&[]);
        assert_eq!(stats.total_documents, 0);
        assert!(stats.top_tags.is_empty());
        assert_eq!(stats.missing_metadata, MissingMetadata::default());
    }

    #[test]
    fn test_counts_and_missing_fields() {
        let mut a = Document::new("/a.md", "A")
            .with_category(DocumentCategory::Guide)
            .with_tags(["rust", "graph"]);
        a.metadata.author = Some("ana".to_string());
        a.metadata.status = Some(DocumentStatus::Published);

        let b = Document::new("/b.md", "B")
            .with_category(DocumentCategory::Guide)
            .with_tags(["rust"]);
        let c = Document::new("/c.md", "C");

        let stats = MetadataStats::collect(&[a, b, c]);

        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.by_category[&DocumentCategory::Guide], 2);
        assert_eq!(stats.by_category[&DocumentCategory::Other], 1);
        assert_eq!(stats.by_status[&DocumentStatus::Published], 1);
        assert_eq!(stats.by_author["ana"], 1);
        assert_eq!(stats.missing_metadata.author, 2);
        assert_eq!(stats.missing_metadata.status, 2);
        assert_eq!(stats.missing_metadata.tags, 1);
        assert_eq!(stats.missing_metadata.description, 3);
        assert_eq!(
            stats.top_tags,
            vec![
                TagCount { tag: "rust".into(), count: 2 },
                TagCount { tag: "graph".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_repeated_tag_counts_once_per_document() {
        let docs = vec![
            Document::new("/a.md", "A").with_tags(["x", "x", " x ", "y"]),
            Document::new("/b.md", "B").with_tags(["x"]),
        ];

        let stats = MetadataStats::collect(&docs);
        assert_eq!(
            stats.top_tags,
            vec![
                TagCount { tag: "x".into(), count: 2 },
                TagCount { tag: "y".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_top_tags_truncated_with_name_tiebreak() {
        let docs: Vec<Document> = (0..12)
            .map(|i| Document::new(format!("/{}.md", i), "T").with_tags([format!("tag{:02}", i)]))
            .collect();

        let stats = MetadataStats::collect(&docs);
        assert_eq!(stats.top_tags.len(), TOP_TAGS_LIMIT);
        assert_eq!(stats.top_tags[0].tag, "tag00");
        assert_eq!(stats.top_tags[9].tag, "tag09");
    }
}

//! Outbound reference extraction: `[[wikilinks]]` and `[text](doc.md)` links.
//!
//! Uses a two-phase approach:
//! - pulldown-cmark pass collecting code blocks and inline code spans
//! - regex pass for references, skipping anything inside those ranges

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::LazyLock;

/// Wikilink or embed: [[target]], [[target|display]], ![[target]]
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Markdown link to a markdown file: [text](path.md) or [text](path.md#section).
/// The path may contain spaces but not line breaks.
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[([^\]]+)\]\(([^)\r\n]+?\.md)(#[^)\s]*)?\)").unwrap());

/// How a reference was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Wikilink,
    Markdown,
}

/// A reference found in document content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    /// Target with display text and heading/block anchors removed
    pub target: String,
    /// Byte offset of the reference in the content
    pub offset: usize,
}

/// All references of a document, grouped by syntax
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References {
    pub wikilinks: Vec<Reference>,
    pub markdown_links: Vec<Reference>,
}

impl References {
    /// Wikilinks first, then markdown links, each in document order
    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.wikilinks.iter().chain(self.markdown_links.iter())
    }

    /// Total number of references
    pub fn len(&self) -> usize {
        self.wikilinks.len() + self.markdown_links.len()
    }

    /// Whether no references were found
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Byte ranges where reference syntax must not be interpreted
#[derive(Debug, Default)]
struct ExcludedRanges {
    ranges: Vec<Range<usize>>,
}

impl ExcludedRanges {
    fn collect(content: &str) -> Self {
        let mut excluded = Self::default();
        let mut code_block_start = None;

        let parser = Parser::new_ext(content, Options::empty());
        for (event, range) in parser.into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(_)) => code_block_start = Some(range.start),
                Event::End(TagEnd::CodeBlock) => {
                    let start = code_block_start.take().unwrap_or(range.start);
                    excluded.ranges.push(start..range.end);
                }
                Event::Code(_) => excluded.ranges.push(range),
                _ => {}
            }
        }

        excluded.ranges.sort_by_key(|r| r.start);
        excluded
    }

    fn contains(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        idx > 0 && offset < self.ranges[idx - 1].end
    }
}

/// Extract every reference, ignoring code blocks and inline code.
pub fn extract_references(content: &str) -> References {
    let mut refs = References::default();
    let has_wikilink = content.contains("[[");
    let has_markdown = content.contains("](");
    if !has_wikilink && !has_markdown {
        return refs;
    }

    let excluded = ExcludedRanges::collect(content);

    if has_wikilink {
        for caps in WIKILINK.captures_iter(content) {
            let (Some(full), Some(raw)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if excluded.contains(full.start()) {
                continue;
            }
            if let Some(target) = clean_wikilink_target(raw.as_str()) {
                refs.wikilinks.push(Reference {
                    kind: ReferenceKind::Wikilink,
                    target,
                    offset: full.start(),
                });
            }
        }
    }

    if has_markdown {
        for caps in MARKDOWN_LINK.captures_iter(content) {
            let (Some(full), Some(url)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            // Images and external URLs are not document references
            let is_image = full.start() > 0 && content.as_bytes()[full.start() - 1] == b'!';
            if is_image || excluded.contains(full.start()) || url.as_str().contains("://") {
                continue;
            }
            refs.markdown_links.push(Reference {
                kind: ReferenceKind::Markdown,
                target: url.as_str().trim().to_string(),
                offset: full.start(),
            });
        }
    }

    refs
}

/// Strip `|display` and `#heading`/`#^block` parts; empty targets yield `None`.
fn clean_wikilink_target(raw: &str) -> Option<String> {
    let target = raw.split('|').next().unwrap_or(raw);
    let target = target.split('#').next().unwrap_or(target).trim();
    (!target.is_empty()).then(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(refs: &[Reference]) -> Vec<&str> {
        refs.iter().map(|r| r.target.as_str()).collect()
    }

    #[test]
    fn test_simple_wikilinks() {
        let refs = extract_references("See [[Note1]] and [[folder/Note2]]");
        assert_eq!(targets(&refs.wikilinks), vec!["Note1", "folder/Note2"]);
        assert_eq!(refs.wikilinks[0].offset, 4);
    }

    #[test]
    fn test_wikilink_display_and_anchor_stripped() {
        let refs = extract_references("[[Note|Shown]] [[Other#Heading]] [[Third#^block|x]]");
        assert_eq!(targets(&refs.wikilinks), vec!["Note", "Other", "Third"]);
    }

    #[test]
    fn test_embeds_count_as_wikilinks() {
        let refs = extract_references("![[Diagram]]");
        assert_eq!(targets(&refs.wikilinks), vec!["Diagram"]);
    }

    #[test]
    fn test_same_document_anchor_skipped() {
        let refs = extract_references("[[#Local heading]]");
        assert!(refs.wikilinks.is_empty());
    }

    #[test]
    fn test_markdown_links() {
        let content = "[Roadmap](./ROADMAP.md), [api](docs/API.MD#auth), [site](https://x.io/a.md), [img](pic.png)";
        let refs = extract_references(content);
        assert_eq!(targets(&refs.markdown_links), vec!["./ROADMAP.md", "docs/API.MD"]);
    }

    #[test]
    fn test_markdown_link_path_with_spaces() {
        let content = "[x](my doc.md) [y](guides/Getting Started.md#install) [z](broken\nline.md)";
        let refs = extract_references(content);
        assert_eq!(
            targets(&refs.markdown_links),
            vec!["my doc.md", "guides/Getting Started.md"]
        );
    }

    #[test]
    fn test_image_to_markdown_file_skipped() {
        let refs = extract_references("![preview](preview.md)");
        assert!(refs.markdown_links.is_empty());
    }

    #[test]
    fn test_references_in_code_are_ignored() {
        let content = "Real [[Link]]\n\n```\n[[InFence]]\n[x](fenced.md)\n```\n\nInline `[[InCode]]` and [[After]]\n";
        let refs = extract_references(content);
        assert_eq!(targets(&refs.wikilinks), vec!["Link", "After"]);
        assert!(refs.markdown_links.is_empty());
    }

    #[test]
    fn test_iteration_order_and_len() {
        let refs = extract_references("[a](a.md) [[b]]");
        let all: Vec<&str> = refs.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(all, vec!["b", "a.md"]);
        assert_eq!(refs.len(), 2);
        assert!(extract_references("plain text").is_empty());
    }
}

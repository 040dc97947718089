//! Graph shapes consumed by force-directed renderers.

use docgraph_core::DocumentCategory;
use serde::{Deserialize, Serialize};

/// One node per document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    /// Display name (the document title)
    pub name: String,
    pub path: String,
    pub category: DocumentCategory,
    /// Display color of the category
    pub color: String,
    pub tags: Vec<String>,
    /// Render size, monotonic in `connections`
    pub val: f64,
    /// Number of incident links
    pub connections: usize,
    pub is_orphan: bool,
}

/// Why two documents are linked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LinkKind {
    /// `[[target]]` reference
    Wikilink,
    /// `[text](target.md)` reference
    Markdown,
    /// Inferred from tags both documents carry
    #[serde(rename = "tag", rename_all = "camelCase")]
    SharedTag { shared_tag_count: u32 },
}

impl LinkKind {
    /// Whether the link was written in a document rather than inferred
    pub fn is_explicit(&self) -> bool {
        !matches!(self, LinkKind::SharedTag { .. })
    }

    /// Renderer type name
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Wikilink => "wikilink",
            LinkKind::Markdown => "markdown",
            LinkKind::SharedTag { .. } => "tag",
        }
    }
}

/// Edge between two node ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub kind: LinkKind,
    /// Reference count for explicit links, shared tag count for tag links
    pub value: u32,
}

impl GraphLink {
    /// Create a link
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: LinkKind, value: u32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            value,
        }
    }

    /// Whether `id` is either endpoint
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

/// Nodes plus links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node with the given id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Links incident to `id`
    pub fn links_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphLink> + 'a {
        self.links.iter().filter(move |l| l.touches(id))
    }
}

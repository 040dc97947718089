//! Documents to graph: nodes, explicit reference links and shared-tag links.

use crate::model::{GraphData, GraphLink, GraphNode, LinkKind};
use crate::resolver::LinkResolver;
use docgraph_core::{Document, GraphConfig};
use docgraph_parser::{ReferenceKind, extract_references};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Accumulated explicit references for one directed pair
#[derive(Debug, Default, Clone, Copy)]
struct ExplicitEdge {
    count: u32,
    has_wikilink: bool,
}

/// Builds [`GraphData`] from a document collection
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: GraphConfig,
}

impl GraphBuilder {
    /// Create a builder with the given settings
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Build the graph. Never fails; unresolvable references are dropped.
    pub fn build(&self, documents: &[Document]) -> GraphData {
        if documents.is_empty() {
            return GraphData::default();
        }

        let explicit = self.explicit_edges(documents);
        let linked_pairs: HashSet<(usize, usize)> = explicit
            .keys()
            .map(|&(a, b)| (a.min(b), a.max(b)))
            .collect();

        let mut edges: Vec<(usize, usize, LinkKind, u32)> = explicit
            .into_iter()
            .map(|((source, target), edge)| {
                let kind = if edge.has_wikilink {
                    LinkKind::Wikilink
                } else {
                    LinkKind::Markdown
                };
                (source, target, kind, edge.count)
            })
            .collect();

        if self.config.include_tag_links {
            for ((a, b), shared) in shared_tag_pairs(documents) {
                if linked_pairs.contains(&(a, b)) {
                    continue;
                }
                let kind = LinkKind::SharedTag {
                    shared_tag_count: shared,
                };
                edges.push((a, b, kind, shared));
            }
        }

        let mut connections = vec![0usize; documents.len()];
        for &(source, target, _, _) in &edges {
            connections[source] += 1;
            connections[target] += 1;
        }

        let nodes = documents
            .iter()
            .zip(&connections)
            .map(|(doc, &count)| self.node(doc, count))
            .collect();

        let links: Vec<GraphLink> = edges
            .into_iter()
            .map(|(source, target, kind, value)| {
                GraphLink::new(&documents[source].id, &documents[target].id, kind, value)
            })
            .collect();

        log::debug!(
            "Built graph with {} nodes and {} links",
            documents.len(),
            links.len()
        );

        GraphData { nodes, links }
    }

    fn node(&self, doc: &Document, connections: usize) -> GraphNode {
        let category = doc.category();
        GraphNode {
            id: doc.id.clone(),
            name: doc.title().to_string(),
            path: doc.path.clone(),
            category,
            color: category.color().to_string(),
            tags: doc.tags().map(str::to_string).collect(),
            val: self.config.node_size(connections),
            connections,
            is_orphan: connections == 0,
        }
    }

    /// Directed (source, target) pairs from written references, keyed by position
    fn explicit_edges(&self, documents: &[Document]) -> BTreeMap<(usize, usize), ExplicitEdge> {
        let resolver = LinkResolver::new(documents, self.config.resolve_by_title);
        let mut edges: BTreeMap<(usize, usize), ExplicitEdge> = BTreeMap::new();

        for (source, doc) in documents.iter().enumerate() {
            let refs = extract_references(&doc.content);
            for reference in refs.iter() {
                let is_wikilink = reference.kind == ReferenceKind::Wikilink;
                if !is_wikilink && !self.config.include_markdown_links {
                    continue;
                }

                let Some(target) = resolver.resolve(&reference.target) else {
                    log::trace!("Unresolved reference {} in {}", reference.target, doc.id);
                    continue;
                };
                if target == source {
                    continue;
                }

                let edge = edges.entry((source, target)).or_default();
                edge.count += 1;
                edge.has_wikilink |= is_wikilink;
            }
        }

        edges
    }
}

/// Number of distinct shared tags per unordered pair `(lower, higher)`
fn shared_tag_pairs(documents: &[Document]) -> BTreeMap<(usize, usize), u32> {
    let mut by_tag: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, doc) in documents.iter().enumerate() {
        let tags: BTreeSet<&str> = doc.tags().collect();
        for tag in tags {
            by_tag.entry(tag).or_default().push(idx);
        }
    }

    let mut pairs: BTreeMap<(usize, usize), u32> = BTreeMap::new();
    for holders in by_tag.values() {
        for (i, &a) in holders.iter().enumerate() {
            for &b in &holders[i + 1..] {
                *pairs.entry((a, b)).or_default() += 1;
            }
        }
    }
    pairs
}

/// Build a graph with default settings
pub fn build_graph(documents: &[Document]) -> GraphData {
    GraphBuilder::default().build(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgraph_core::DocumentCategory;

    fn doc(id: &str, tags: &[&str], content: &str) -> Document {
        Document::new(id, id.trim_start_matches('/').trim_end_matches(".md"))
            .with_tags(tags.iter().copied())
            .with_content(content)
    }

    #[test]
    fn test_shared_tag_scenario() {
        let docs = vec![
            doc("/a.md", &["react"], ""),
            doc("/b.md", &["react"], ""),
            doc("/c.md", &[], ""),
        ];
        let graph = build_graph(&docs);

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(
            graph.links,
            vec![GraphLink::new(
                "/a.md",
                "/b.md",
                LinkKind::SharedTag { shared_tag_count: 1 },
                1
            )]
        );
        assert!(graph.nodes[2].is_orphan);
        assert_eq!(graph.nodes[0].connections, 1);
    }

    #[test]
    fn test_wikilink_takes_precedence_over_tags() {
        let docs = vec![
            doc("/a.md", &["react", "hooks"], "See [[b]]"),
            doc("/b.md", &["react", "hooks"], ""),
        ];
        let graph = build_graph(&docs);

        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].kind, LinkKind::Wikilink);
        assert_eq!(graph.links[0].source, "/a.md");
    }

    #[test]
    fn test_repeated_references_increment_value() {
        let docs = vec![
            doc("/a.md", &[], "[[b]] again [[b|B]] and [B](b.md)"),
            doc("/b.md", &[], ""),
        ];
        let graph = build_graph(&docs);

        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].value, 3);
        assert_eq!(graph.links[0].kind, LinkKind::Wikilink);
    }

    #[test]
    fn test_markdown_only_links() {
        let docs = vec![doc("/a.md", &[], "[B](./b.md)"), doc("/b.md", &[], "")];
        let graph = build_graph(&docs);
        assert_eq!(graph.links[0].kind, LinkKind::Markdown);

        let builder = GraphBuilder::new(GraphConfig {
            include_markdown_links: false,
            ..Default::default()
        });
        assert!(builder.build(&docs).links.is_empty());
    }

    #[test]
    fn test_mutual_references_are_two_links() {
        let docs = vec![doc("/a.md", &["x"], "[[b]]"), doc("/b.md", &["x"], "[[a]]")];
        let graph = build_graph(&docs);

        assert_eq!(graph.links.len(), 2);
        assert!(graph.nodes.iter().all(|n| n.connections == 2));
    }

    #[test]
    fn test_self_and_dangling_references_ignored() {
        let docs = vec![doc("/a.md", &[], "[[a]] [[missing]] [x](a.md)")];
        let graph = build_graph(&docs);

        assert!(graph.links.is_empty());
        assert!(graph.nodes[0].is_orphan);
        assert_eq!(graph.nodes[0].val, 1.0);
    }

    #[test]
    fn test_shared_tag_count_and_order() {
        let docs = vec![
            doc("/c.md", &["x", "y", "z"], ""),
            doc("/a.md", &["y", "x", "x"], ""),
        ];
        let graph = build_graph(&docs);

        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].source, "/c.md");
        assert_eq!(graph.links[0].value, 2);
        assert_eq!(
            graph.links[0].kind,
            LinkKind::SharedTag { shared_tag_count: 2 }
        );
    }

    #[test]
    fn test_tag_links_disabled() {
        let docs = vec![doc("/a.md", &["x"], ""), doc("/b.md", &["x"], "")];
        let builder = GraphBuilder::new(GraphConfig {
            include_tag_links: false,
            ..Default::default()
        });
        let graph = builder.build(&docs);
        assert!(graph.links.is_empty());
        assert!(graph.nodes.iter().all(|n| n.is_orphan));
    }

    #[test]
    fn test_node_fields() {
        let docs = vec![
            Document::new("/r.md", "Roadmap")
                .with_category(DocumentCategory::Roadmap)
                .with_tags(["plan"])
                .with_content("[[g]] [[g2]]"),
            Document::new("/g.md", "G"),
            Document::new("/g2.md", "G2"),
        ];
        let graph = build_graph(&docs);
        let node = &graph.nodes[0];

        assert_eq!(node.name, "Roadmap");
        assert_eq!(node.color, "#3b82f6");
        assert_eq!(node.tags, vec!["plan"]);
        assert_eq!(node.connections, 2);
        assert!((node.val - 2f64.sqrt() * 3.0).abs() < 1e-9);
        assert!(graph.nodes[1].val < node.val);
    }

    #[test]
    fn test_links_reference_existing_nodes() {
        let docs = vec![
            doc("/a.md", &["t"], "[[b]] [[c]] [[zzz]]"),
            doc("/b.md", &["t"], "[[a]]"),
            doc("/c.md", &["t", "u"], ""),
            doc("/d.md", &["u"], "[[d]]"),
        ];
        let graph = build_graph(&docs);
        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

        for link in &graph.links {
            assert!(ids.contains(link.source.as_str()));
            assert!(ids.contains(link.target.as_str()));
            assert_ne!(link.source, link.target);
        }
        let total: usize = graph.nodes.iter().map(|n| n.connections).sum();
        assert_eq!(total, graph.links.len() * 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(build_graph(&[]), GraphData::default());
    }

    #[test]
    fn test_build_is_deterministic() {
        let docs = vec![
            doc("/a.md", &["t", "u"], "[[c]]"),
            doc("/b.md", &["t"], ""),
            doc("/c.md", &["u"], ""),
        ];
        assert_eq!(build_graph(&docs), build_graph(&docs));
    }
}

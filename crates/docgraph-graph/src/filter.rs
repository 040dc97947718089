//! Narrowing a graph by category, tag, orphan status and name.

use crate::model::{GraphData, GraphNode};
use docgraph_core::DocumentCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Filter criteria. All set criteria must hold; empty sets do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphFilter {
    pub categories: BTreeSet<DocumentCategory>,
    /// A node matches if it carries any of these
    pub tags: BTreeSet<String>,
    pub orphans_only: bool,
    /// Case-insensitive substring of the node name
    pub search_term: Option<String>,
}

impl GraphFilter {
    /// Filter that keeps everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept `category`
    pub fn with_category(mut self, category: DocumentCategory) -> Self {
        self.categories.insert(category);
        self
    }

    /// Also accept nodes tagged `tag`
    pub fn with_tag(mut self, tag: impl AsRef<str>) -> Self {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() {
            self.tags.insert(tag.to_string());
        }
        self
    }

    /// Keep only orphaned nodes
    pub fn orphans_only(mut self, orphans_only: bool) -> Self {
        self.orphans_only = orphans_only;
        self
    }

    /// Keep nodes whose name contains `term`
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Whether this filter keeps every node
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.tags.is_empty()
            && !self.orphans_only
            && self.search_needle().is_none()
    }

    /// Whether `node` passes every criterion
    pub fn matches(&self, node: &GraphNode) -> bool {
        self.matches_with(node, self.search_needle().as_deref())
    }

    /// Apply the filter, returning a new graph
    pub fn apply(&self, graph: &GraphData) -> GraphData {
        if self.is_empty() {
            return graph.clone();
        }

        let needle = self.search_needle();
        let nodes: Vec<GraphNode> = graph
            .nodes
            .iter()
            .filter(|node| self.matches_with(node, needle.as_deref()))
            .cloned()
            .collect();

        let kept: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let links = graph
            .links
            .iter()
            .filter(|l| kept.contains(l.source.as_str()) && kept.contains(l.target.as_str()))
            .cloned()
            .collect();

        log::debug!(
            "Filter kept {}/{} nodes",
            nodes.len(),
            graph.nodes.len()
        );

        GraphData { nodes, links }
    }

    fn search_needle(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_with(&self, node: &GraphNode, needle: Option<&str>) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&node.category) {
            return false;
        }

        if !self.tags.is_empty() && !node.tags.iter().any(|t| self.tags.contains(t.trim())) {
            return false;
        }

        if self.orphans_only && !node.is_orphan {
            return false;
        }

        match needle {
            Some(needle) => node.name.to_lowercase().contains(needle),
            None => true,
        }
    }
}

/// Apply `filter` to `graph`
pub fn filter_graph(graph: &GraphData, filter: &GraphFilter) -> GraphData {
    filter.apply(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use docgraph_core::Document;

    fn sample() -> GraphData {
        let docs = vec![
            Document::new("/roadmap.md", "Product Roadmap")
                .with_category(DocumentCategory::Roadmap)
                .with_tags(["planning"])
                .with_content("[[hooks]]"),
            Document::new("/hooks.md", "React Hooks Guide")
                .with_category(DocumentCategory::Guide)
                .with_tags(["react"]),
            Document::new("/state.md", "State Guide")
                .with_category(DocumentCategory::Guide)
                .with_tags(["react"]),
            Document::new("/notes.md", "Loose Notes"),
        ];
        build_graph(&docs)
    }

    fn ids(graph: &GraphData) -> Vec<&str> {
        graph.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let graph = sample();
        let filter = GraphFilter::new().with_search("   ");
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&graph), graph);
    }

    #[test]
    fn test_category_filter_drops_dangling_links() {
        let graph = sample();
        let filtered = filter_graph(&graph, &GraphFilter::new().with_category(DocumentCategory::Guide));

        assert_eq!(ids(&filtered), vec!["/hooks.md", "/state.md"]);
        assert_eq!(filtered.links.len(), 1);
        assert!(filtered.links.iter().all(|l| l.source != "/roadmap.md"));
    }

    #[test]
    fn test_tags_match_any() {
        let graph = sample();
        let filter = GraphFilter::new().with_tag("planning").with_tag(" react ");
        assert_eq!(ids(&filter.apply(&graph)).len(), 3);
    }

    #[test]
    fn test_orphans_only() {
        let graph = sample();
        let filtered = GraphFilter::new().orphans_only(true).apply(&graph);

        assert_eq!(ids(&filtered), vec!["/notes.md"]);
        assert!(filtered.links.is_empty());
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let graph = sample();
        let filtered = GraphFilter::new().with_search("  GUIDE ").apply(&graph);
        assert_eq!(ids(&filtered), vec!["/hooks.md", "/state.md"]);
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let graph = sample();
        let filter = GraphFilter::new()
            .with_category(DocumentCategory::Guide)
            .with_search("hooks");
        assert_eq!(ids(&filter.apply(&graph)), vec!["/hooks.md"]);

        let filter = GraphFilter::new()
            .with_category(DocumentCategory::Roadmap)
            .orphans_only(true);
        assert!(filter.apply(&graph).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_and_pure() {
        let graph = sample();
        let before = graph.clone();
        let filter = GraphFilter::new().with_tag("react");

        let once = filter.apply(&graph);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(graph, before);
    }

    #[test]
    fn test_filters_are_idempotent_and_never_grow() {
        let graph = sample();
        let filters = vec![
            GraphFilter::new(),
            GraphFilter::new().with_category(DocumentCategory::Guide),
            GraphFilter::new()
                .with_category(DocumentCategory::Roadmap)
                .with_category(DocumentCategory::Other),
            GraphFilter::new().with_tag("react"),
            GraphFilter::new().with_tag("planning").with_tag("missing"),
            GraphFilter::new().orphans_only(true),
            GraphFilter::new().with_search("guide"),
            GraphFilter::new().with_search("no such name"),
            GraphFilter::new()
                .with_category(DocumentCategory::Guide)
                .with_tag("react")
                .with_search("state"),
            GraphFilter::new().with_tag("react").orphans_only(true),
        ];

        for filter in &filters {
            let once = filter.apply(&graph);
            assert_eq!(filter.apply(&once), once, "not idempotent: {:?}", filter);
            assert!(once.nodes.len() <= graph.nodes.len());
            assert!(once.links.len() <= graph.links.len());

            let narrower = filter.clone().with_search("o");
            assert!(narrower.apply(&graph).nodes.len() <= once.nodes.len());
            let narrower = filter.clone().orphans_only(true);
            assert!(narrower.apply(&graph).nodes.len() <= once.nodes.len());
        }
    }

    #[test]
    fn test_deserialize_partial_filter() {
        let filter: GraphFilter = serde_json::from_str(r#"{"orphansOnly": true}"#).unwrap();
        assert!(filter.orphans_only);
        assert!(filter.categories.is_empty());
    }
}

//! Connectivity metrics over a (possibly filtered) graph.

use crate::model::GraphData;
use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Default length of [`GraphMetrics::most_connected`]
pub const DEFAULT_MOST_CONNECTED_LIMIT: usize = 10;

/// Entry of the most-connected ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedNode {
    pub id: String,
    pub name: String,
    pub connections: usize,
}

/// Summary statistics about a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetrics {
    pub total_nodes: usize,
    pub total_links: usize,
    pub orphaned_docs: usize,
    /// Mean incident links per node, rounded to 2 decimals
    pub avg_connections: f64,
    pub most_connected: Vec<ConnectedNode>,
    /// Distinct categories present
    pub categories: usize,
    /// Connected components, isolated nodes included
    pub components: usize,
}

impl Default for GraphMetrics {
    fn default() -> Self {
        Self {
            total_nodes: 0,
            total_links: 0,
            orphaned_docs: 0,
            avg_connections: 0.0,
            most_connected: Vec::new(),
            categories: 0,
            components: 0,
        }
    }
}

impl GraphMetrics {
    /// Log a one-line summary at info level
    pub fn log_summary(&self) {
        log::info!(
            "Graph: {} nodes, {} links, {} orphaned, {:.2} avg connections, {} components",
            self.total_nodes,
            self.total_links,
            self.orphaned_docs,
            self.avg_connections,
            self.components
        );
    }
}

/// Metrics with the default most-connected limit
pub fn calculate_metrics(graph: &GraphData) -> GraphMetrics {
    calculate_metrics_with_limit(graph, DEFAULT_MOST_CONNECTED_LIMIT)
}

/// Metrics keeping at most `limit` entries in `most_connected`.
///
/// Connection counts come from the links present in `graph`, not from the
/// nodes' stored counts, so a filtered graph is measured as its own sub-graph.
pub fn calculate_metrics_with_limit(graph: &GraphData, limit: usize) -> GraphMetrics {
    if graph.nodes.is_empty() {
        return GraphMetrics::default();
    }

    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(graph.nodes.len());
    for (idx, node) in graph.nodes.iter().enumerate() {
        positions.entry(node.id.as_str()).or_insert(idx);
    }

    let mut undirected = UnGraph::<(), ()>::with_capacity(graph.nodes.len(), graph.links.len());
    let indices: Vec<_> = graph.nodes.iter().map(|_| undirected.add_node(())).collect();

    let mut connections = vec![0usize; graph.nodes.len()];
    for link in &graph.links {
        let (Some(&source), Some(&target)) = (
            positions.get(link.source.as_str()),
            positions.get(link.target.as_str()),
        ) else {
            continue;
        };
        connections[source] += 1;
        connections[target] += 1;
        undirected.add_edge(indices[source], indices[target], ());
    }

    let total: usize = connections.iter().sum();
    let avg_connections = round2(total as f64 / graph.nodes.len() as f64);

    let mut ranked: Vec<ConnectedNode> = graph
        .nodes
        .iter()
        .zip(&connections)
        .filter(|&(_, &count)| count > 0)
        .map(|(node, &count)| ConnectedNode {
            id: node.id.clone(),
            name: node.name.clone(),
            connections: count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.connections
            .cmp(&a.connections)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.truncate(limit);

    let categories: BTreeSet<_> = graph.nodes.iter().map(|n| n.category).collect();

    GraphMetrics {
        total_nodes: graph.nodes.len(),
        total_links: graph.links.len(),
        orphaned_docs: graph.nodes.iter().filter(|n| n.is_orphan).count(),
        avg_connections,
        most_connected: ranked,
        categories: categories.len(),
        components: connected_components(&undirected),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use crate::model::{GraphLink, GraphNode, LinkKind};
    use docgraph_core::{Document, DocumentCategory};

    fn node(id: &str, name: &str) -> GraphNode {
        GraphNode {
            id: id.into(),
            name: name.into(),
            path: id.into(),
            category: DocumentCategory::Other,
            color: DocumentCategory::Other.color().into(),
            tags: vec![],
            val: 1.0,
            connections: 0,
            is_orphan: false,
        }
    }

    fn link(source: &str, target: &str) -> GraphLink {
        GraphLink::new(source, target, LinkKind::Wikilink, 1)
    }

    #[test]
    fn test_empty_graph() {
        let metrics = calculate_metrics(&build_graph(&[]));
        assert_eq!(metrics.total_nodes, 0);
        assert_eq!(metrics.total_links, 0);
        assert_eq!(metrics.orphaned_docs, 0);
        assert_eq!(metrics.avg_connections, 0.0);
        assert!(metrics.most_connected.is_empty());
        assert_eq!(metrics.components, 0);
    }

    #[test]
    fn test_shared_tag_scenario() {
        let docs = vec![
            Document::new("/a.md", "A").with_tags(["react"]),
            Document::new("/b.md", "B").with_tags(["react"]),
            Document::new("/c.md", "C"),
        ];
        let metrics = calculate_metrics(&build_graph(&docs));

        assert_eq!(metrics.total_nodes, 3);
        assert_eq!(metrics.total_links, 1);
        assert_eq!(metrics.orphaned_docs, 1);
        assert_eq!(metrics.avg_connections, 0.67);
        assert_eq!(metrics.components, 2);
        assert_eq!(metrics.categories, 1);
        let ranked: Vec<&str> = metrics.most_connected.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(ranked, vec!["A", "B"]);
    }

    #[test]
    fn test_ranking_ties_and_limit() {
        let graph = GraphData {
            nodes: vec![
                node("/hub.md", "Hub"),
                node("/z.md", "Zeta"),
                node("/a2.md", "Alpha"),
                node("/a1.md", "Alpha"),
                node("/lonely.md", "Lonely"),
            ],
            links: vec![
                link("/hub.md", "/z.md"),
                link("/hub.md", "/a2.md"),
                link("/hub.md", "/a1.md"),
            ],
        };

        let metrics = calculate_metrics_with_limit(&graph, 3);
        let ranked: Vec<&str> = metrics.most_connected.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ranked, vec!["/hub.md", "/a1.md", "/a2.md"]);
        assert_eq!(metrics.most_connected[0].connections, 3);

        assert!(calculate_metrics_with_limit(&graph, 0).most_connected.is_empty());
    }

    #[test]
    fn test_connections_recomputed_from_links() {
        let mut a = node("/a.md", "A");
        a.connections = 7;
        let graph = GraphData {
            nodes: vec![a, node("/b.md", "B")],
            links: vec![link("/a.md", "/b.md"), link("/a.md", "/gone.md")],
        };

        let metrics = calculate_metrics(&graph);
        assert_eq!(metrics.total_links, 2);
        assert_eq!(metrics.avg_connections, 1.0);
        assert_eq!(metrics.most_connected[0].connections, 1);
        assert_eq!(metrics.components, 1);
    }

    #[test]
    fn test_avg_rounding() {
        let graph = GraphData {
            nodes: vec![node("/a.md", "A"), node("/b.md", "B"), node("/c.md", "C")],
            links: vec![link("/a.md", "/b.md"), link("/b.md", "/c.md")],
        };
        // 4 / 3 = 1.333...
        assert_eq!(calculate_metrics(&graph).avg_connections, 1.33);
    }

    #[test]
    fn test_serialization_is_camel_case() {
        let value = serde_json::to_value(GraphMetrics::default()).unwrap();
        assert!(value.get("avgConnections").is_some());
        assert!(value.get("mostConnected").is_some());
    }
}

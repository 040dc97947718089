//! Export in the node/link shape force-directed graph renderers consume.

use crate::model::{GraphData, GraphLink, GraphNode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceGraphNode {
    pub id: String,
    pub name: String,
    pub val: f64,
    pub color: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_orphan: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceGraphLink {
    pub source: String,
    pub target: String,
    pub value: u32,
    #[serde(rename = "type")]
    pub link_type: String,
}

/// `{nodes, links}` document for the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceGraph {
    pub nodes: Vec<ForceGraphNode>,
    pub links: Vec<ForceGraphLink>,
}

impl From<&GraphNode> for ForceGraphNode {
    fn from(node: &GraphNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            val: node.val,
            color: node.color.clone(),
            category: node.category.as_str().to_string(),
            tags: node.tags.clone(),
            is_orphan: node.is_orphan,
        }
    }
}

impl From<&GraphLink> for ForceGraphLink {
    fn from(link: &GraphLink) -> Self {
        Self {
            source: link.source.clone(),
            target: link.target.clone(),
            value: link.value,
            link_type: link.kind.as_str().to_string(),
        }
    }
}

/// Convert a graph to the renderer shape
pub fn to_force_graph(graph: &GraphData) -> ForceGraph {
    ForceGraph {
        nodes: graph.nodes.iter().map(ForceGraphNode::from).collect(),
        links: graph.links.iter().map(ForceGraphLink::from).collect(),
    }
}

/// Renderer JSON, pretty-printed
pub fn to_force_graph_json(graph: &GraphData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_force_graph(graph))
}

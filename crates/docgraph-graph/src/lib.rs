//! # Document Relationship Graph
//!
//! Turns a collection of markdown documents into a graph for force-directed
//! rendering, with `petgraph` used for connectivity analysis.
//!
//! Provides:
//! - Reference resolution (paths, path tails, file stems, titles)
//! - Graph construction from wikilinks, markdown links and shared tags
//! - Connectivity metrics and most-connected ranking
//! - Filtering by category, tag, orphan status and name
//! - Fingerprint-keyed caching of built and filtered graphs
//! - Dangling reference detection
//! - Export to the renderer's JSON shape
//!
//! ## Quick Start
//!
//! ```
//! use docgraph_graph::{GraphFilter, build_graph, calculate_metrics};
//! use docgraph_core::{Document, DocumentCategory};
//!
//! let docs = vec![
//!     Document::new("/a.md", "A").with_tags(["react"]),
//!     Document::new("/b.md", "B").with_tags(["react"]),
//!     Document::new("/c.md", "C").with_category(DocumentCategory::Guide),
//! ];
//!
//! let graph = build_graph(&docs);
//! let metrics = calculate_metrics(&graph);
//! assert_eq!(metrics.total_links, 1);
//! assert_eq!(metrics.avg_connections, 0.67);
//!
//! let orphans = GraphFilter::new().orphans_only(true).apply(&graph);
//! assert_eq!(orphans.nodes[0].id, "/c.md");
//! ```
//!
//! ## Core Concepts
//!
//! ### Nodes and Links
//! - **Nodes**: one per document, in input order
//! - **Explicit links**: directed, one per (source, target) pair, `value`
//!   counts repeated references
//! - **Shared-tag links**: one per unordered pair with common tags and no
//!   explicit link between them
//!
//! ### Orphans
//!
//! A node is orphaned when no link touches it in either direction.
//!
//! ## Modules
//!
//! - [`model`] - Node, link and graph types
//! - [`resolver`] - Reference resolution and dangling references
//! - [`builder`] - Graph construction
//! - [`metrics`] - Graph statistics
//! - [`filter`] - Graph filtering
//! - [`cache`] - Graph cache
//! - [`export`] - Renderer JSON
//!
//! ## Performance Characteristics
//!
//! - Graph construction: O(n + r + t·k²) for n documents, r references and
//!   k documents per tag
//! - Metrics: O(n log n + m)
//! - Filtering: O(n + m)

pub mod builder;
pub mod cache;
pub mod export;
pub mod filter;
pub mod metrics;
pub mod model;
pub mod resolver;

pub use builder::{GraphBuilder, build_graph};
pub use cache::{CacheStats, GraphCache};
pub use export::{ForceGraph, ForceGraphLink, ForceGraphNode, to_force_graph, to_force_graph_json};
pub use filter::{GraphFilter, filter_graph};
pub use metrics::{
    ConnectedNode, DEFAULT_MOST_CONNECTED_LIMIT, GraphMetrics, calculate_metrics,
    calculate_metrics_with_limit,
};
pub use model::{GraphData, GraphLink, GraphNode, LinkKind};
pub use resolver::{DanglingReference, LinkResolver, dangling_references, normalize_target};

pub mod prelude {
    pub use crate::builder::{GraphBuilder, build_graph};
    pub use crate::filter::GraphFilter;
    pub use crate::metrics::{GraphMetrics, calculate_metrics};
    pub use crate::model::{GraphData, GraphLink, GraphNode, LinkKind};
    pub use docgraph_core::prelude::*;
}

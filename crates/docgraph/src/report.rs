//! Whole-directory reports combining scanning, graph and metadata checks.

use docgraph_core::{
    DocGraphConfig, Document, MetadataStats, MetadataValidator, Result, ValidationReport,
    Validator,
};
use docgraph_graph::{
    DanglingReference, GraphBuilder, GraphData, GraphFilter, GraphMetrics,
    calculate_metrics_with_limit, dangling_references,
};
use docgraph_parser::{DocumentScanner, read_frontmatter, suggest_tags};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A scanned documentation directory
#[derive(Debug, Clone)]
pub struct DocSet {
    pub root: PathBuf,
    pub config: DocGraphConfig,
    pub documents: Vec<Document>,
}

/// Graph and metadata statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub graph: GraphMetrics,
    pub metadata: MetadataStats,
}

/// Validation outcome of one document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentValidation {
    pub path: String,
    pub report: ValidationReport,
    /// Tags worth adding, from the document body
    pub suggested_tags: Vec<String>,
}

impl DocSet {
    /// Scan `root` using `config.scan`
    pub fn load(root: &Path, config: DocGraphConfig) -> Result<Self> {
        let scan = DocumentScanner::new(config.scan.clone()).scan(root)?;
        log::info!(
            "Loaded {} documents from {} in {}ms",
            scan.total_count,
            root.display(),
            scan.scan_time_ms
        );
        Ok(Self {
            root: root.to_path_buf(),
            config,
            documents: scan.documents,
        })
    }

    /// Full graph, then `filter`
    pub fn graph(&self, filter: &GraphFilter) -> GraphData {
        let graph = GraphBuilder::new(self.config.graph.clone()).build(&self.documents);
        filter.apply(&graph)
    }

    /// Metrics of the filtered graph plus metadata statistics of all documents
    pub fn stats(&self, filter: &GraphFilter, top: Option<usize>) -> StatsReport {
        let limit = top.unwrap_or(self.config.graph.most_connected_limit);
        StatsReport {
            graph: calculate_metrics_with_limit(&self.graph(filter), limit),
            metadata: MetadataStats::collect(&self.documents),
        }
    }

    /// Unresolvable references
    pub fn dangling(&self) -> Vec<DanglingReference> {
        dangling_references(&self.documents, &self.config.graph)
    }

    /// Validate the frontmatter of every document, re-reading it from disk
    pub fn validate(&self) -> Result<Vec<DocumentValidation>> {
        let validator = MetadataValidator::new(self.config.metadata.clone());
        let mut results = Vec::with_capacity(self.documents.len());

        for doc in &self.documents {
            let file = self.root.join(doc.path.trim_start_matches('/'));
            let raw = std::fs::read_to_string(&file)?;
            let frontmatter = read_frontmatter(&raw);
            let report = validator.validate(&frontmatter);
            let suggested_tags = suggest_tags(&doc.content, doc.metadata.tags.as_slice());

            if report.has_failures() {
                log::warn!(
                    "{}: {} metadata error(s)",
                    doc.path,
                    report.summary.error_count
                );
            }

            results.push(DocumentValidation {
                path: doc.path.clone(),
                report,
                suggested_tags,
            });
        }

        Ok(results)
    }
}

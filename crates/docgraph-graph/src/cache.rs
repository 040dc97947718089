//! Caller-owned memoization of built and filtered graphs.
//!
//! Entries are keyed by a SHA-256 fingerprint of everything that affects the
//! result: document ids, paths, metadata and content plus the graph settings.
//! Filtered graphs are keyed by the graph fingerprint and the filter.

use crate::builder::GraphBuilder;
use crate::filter::GraphFilter;
use crate::model::GraphData;
use dashmap::DashMap;
use docgraph_core::{Document, GraphConfig};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hit/miss counters and entry counts.
///
/// `hits` and `misses` cover both whole-graph and filtered lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub graphs: usize,
    pub filtered: usize,
}

/// Thread-safe graph cache
#[derive(Debug, Default)]
pub struct GraphCache {
    graphs: DashMap<String, Arc<GraphData>>,
    filtered: DashMap<(String, String), Arc<GraphData>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GraphCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint of a document collection under `config`
    pub fn fingerprint(documents: &[Document], config: &GraphConfig) -> String {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(config).unwrap_or_default());
        for doc in documents {
            hasher.update(serde_json::to_vec(doc).unwrap_or_default());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    fn filter_key(filter: &GraphFilter) -> String {
        let hash = Sha256::digest(serde_json::to_vec(filter).unwrap_or_default());
        format!("{:x}", hash)
    }

    /// Cached graph for `documents`, building it on a miss.
    ///
    /// Returns the fingerprint alongside the graph for use with
    /// [`get_or_filter`](Self::get_or_filter) and [`invalidate`](Self::invalidate).
    pub fn get_or_build(
        &self,
        builder: &GraphBuilder,
        documents: &[Document],
    ) -> (String, Arc<GraphData>) {
        let key = Self::fingerprint(documents, builder.config());

        if let Some(graph) = self.graphs.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return (key, Arc::clone(graph.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let graph = Arc::new(builder.build(documents));
        self.graphs.insert(key.clone(), Arc::clone(&graph));
        (key, graph)
    }

    /// Cached result of filtering the graph with fingerprint `fingerprint`.
    ///
    /// Returns `None` when that graph is not cached.
    pub fn get_or_filter(&self, fingerprint: &str, filter: &GraphFilter) -> Option<Arc<GraphData>> {
        let graph = Arc::clone(self.graphs.get(fingerprint)?.value());
        let key = (fingerprint.to_string(), Self::filter_key(filter));

        if let Some(filtered) = self.filtered.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(Arc::clone(filtered.value()));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let filtered = Arc::new(filter.apply(&graph));
        self.filtered.insert(key, Arc::clone(&filtered));
        Some(filtered)
    }

    /// Drop a graph and every filtered view of it
    pub fn invalidate(&self, fingerprint: &str) -> bool {
        let removed = self.graphs.remove(fingerprint).is_some();
        self.filtered.retain(|(graph, _), _| graph != fingerprint);
        if removed {
            log::debug!("Invalidated cached graph {}", &fingerprint[..fingerprint.len().min(12)]);
        }
        removed
    }

    /// Drop every entry; counters are kept
    pub fn clear(&self) {
        self.graphs.clear();
        self.filtered.clear();
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            graphs: self.graphs.len(),
            filtered: self.filtered.len(),
        }
    }
}

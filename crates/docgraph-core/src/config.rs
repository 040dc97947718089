//! Configuration types for graph construction, metadata handling and scanning.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Settings for building and summarizing document graphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum node size, so unconnected nodes stay visible
    pub node_base_size: f64,
    /// Multiplier applied to the square root of a node's connection count
    pub node_size_scale: f64,
    /// Emit edges between documents that share tags
    pub include_tag_links: bool,
    /// Treat `[text](doc.md)` references as explicit links
    pub include_markdown_links: bool,
    /// Fall back to matching references against document titles
    pub resolve_by_title: bool,
    /// Default length of the most-connected ranking
    pub most_connected_limit: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_base_size: 1.0,
            node_size_scale: 3.0,
            include_tag_links: true,
            include_markdown_links: true,
            resolve_by_title: true,
            most_connected_limit: 10,
        }
    }
}

impl GraphConfig {
    /// Create a new graph config with builder
    pub fn builder() -> GraphConfigBuilder {
        GraphConfigBuilder::new()
    }

    /// Validate the graph configuration
    pub fn validate(&self) -> Result<()> {
        if !self.node_base_size.is_finite() || self.node_base_size <= 0.0 {
            return Err(Error::config_error(format!(
                "node_base_size must be a positive number, got {}",
                self.node_base_size
            )));
        }

        if !self.node_size_scale.is_finite() || self.node_size_scale < 0.0 {
            return Err(Error::config_error(format!(
                "node_size_scale must be a non-negative number, got {}",
                self.node_size_scale
            )));
        }

        Ok(())
    }

    /// Node size for a given connection count: monotonic and never below
    /// `node_base_size`.
    pub fn node_size(&self, connections: usize) -> f64 {
        let scaled = (connections as f64).sqrt() * self.node_size_scale;
        scaled.max(self.node_base_size)
    }
}

/// Builder for GraphConfig
pub struct GraphConfigBuilder {
    config: GraphConfig,
}

impl GraphConfigBuilder {
    /// Create a new builder seeded with defaults
    pub fn new() -> Self {
        Self {
            config: GraphConfig::default(),
        }
    }

    /// Set the minimum node size
    pub fn node_base_size(mut self, size: f64) -> Self {
        self.config.node_base_size = size;
        self
    }

    /// Set the node size multiplier
    pub fn node_size_scale(mut self, scale: f64) -> Self {
        self.config.node_size_scale = scale;
        self
    }

    /// Enable or disable shared-tag edges
    pub fn include_tag_links(mut self, include: bool) -> Self {
        self.config.include_tag_links = include;
        self
    }

    /// Enable or disable markdown-link edges
    pub fn include_markdown_links(mut self, include: bool) -> Self {
        self.config.include_markdown_links = include;
        self
    }

    /// Enable or disable title-based reference resolution
    pub fn resolve_by_title(mut self, resolve: bool) -> Self {
        self.config.resolve_by_title = resolve;
        self
    }

    /// Set the default most-connected ranking length
    pub fn most_connected_limit(mut self, limit: usize) -> Self {
        self.config.most_connected_limit = limit;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<GraphConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for GraphConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frontmatter schema limits and editing behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub title_min_length: usize,
    pub title_max_length: usize,
    pub description_max_length: usize,
    pub max_tags: usize,
    /// Refuse to rewrite documents whose metadata has validation errors
    pub strict_mode: bool,
    /// Normalize metadata before validating and saving
    pub autofix: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            title_min_length: 3,
            title_max_length: 100,
            description_max_length: 500,
            max_tags: 10,
            strict_mode: false,
            autofix: true,
        }
    }
}

impl MetadataConfig {
    /// Validate the metadata configuration
    pub fn validate(&self) -> Result<()> {
        if self.title_min_length > self.title_max_length {
            return Err(Error::config_error(format!(
                "title_min_length ({}) exceeds title_max_length ({})",
                self.title_min_length, self.title_max_length
            )));
        }
        Ok(())
    }
}

/// Directory scanning settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub max_file_size: u64,
    pub allowed_extensions: HashSet<String>,
    /// Path components that prune the walk
    pub excluded_paths: HashSet<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10MB
            allowed_extensions: [".md", ".markdown"].iter().map(|s| s.to_string()).collect(),
            excluded_paths: [".git", ".obsidian", "node_modules", "target", ".DS_Store"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ScanConfig {
    /// Whether a path has one of the allowed extensions
    pub fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }

    /// Whether a single path component is excluded
    pub fn is_excluded(&self, component: &str) -> bool {
        self.excluded_paths.contains(component)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocGraphConfig {
    pub graph: GraphConfig,
    pub metadata: MetadataConfig,
    pub scan: ScanConfig,
}

impl DocGraphConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.graph.validate()?;
        self.metadata.validate()?;
        Ok(())
    }

    /// Load configuration from a YAML file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as YAML
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, yaml).map_err(|e| {
            Error::config_error(format!("Failed to save config to {}: {}", path.display(), e))
        })
    }
}

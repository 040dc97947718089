//! Layered configuration: defaults, optional file, `DOCGRAPH__*` environment.

use docgraph_core::{DocGraphConfig, Error, Result};
use std::path::Path;

/// Environment variable prefix, e.g. `DOCGRAPH__GRAPH__NODE_SIZE_SCALE=4`
pub const ENV_PREFIX: &str = "DOCGRAPH";

/// Load settings from defaults, then `file` (YAML, TOML or JSON by
/// extension), then the environment.
pub fn load_settings(file: Option<&Path>) -> Result<DocGraphConfig> {
    let defaults = config::Config::try_from(&DocGraphConfig::default())
        .map_err(|e| Error::config_error(format!("Invalid defaults: {}", e)))?;

    let mut builder = config::Config::builder().add_source(defaults);

    if let Some(path) = file {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        log::debug!("Loading settings from {}", path.display());
        builder = builder.add_source(config::File::from(path));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let settings: DocGraphConfig = builder
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| Error::config_error(e.to_string()))?;

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.graph.node_size_scale, 3.0);
        assert!(settings.scan.allowed_extensions.contains(".md"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docgraph.yaml");
        fs::write(
            &path,
            "graph:\n  include_tag_links: false\n  most_connected_limit: 3\nmetadata:\n  strict_mode: true\n",
        )
        .unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        assert!(!settings.graph.include_tag_links);
        assert_eq!(settings.graph.most_connected_limit, 3);
        assert!(settings.metadata.strict_mode);
        assert_eq!(settings.graph.node_base_size, 1.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_settings(Some(&temp.path().join("nope.yaml"))).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docgraph.yaml");
        fs::write(&path, "graph:\n  node_base_size: -1.0\n").unwrap();

        let err = load_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::ConfigError { .. }));
    }
}

//! Frontmatter extraction: ---\nYAML\n---

use docgraph_core::{Frontmatter, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Matches YAML frontmatter: --- ... --- at the very start of the document,
/// plus at most one blank line after the closing fence
static FRONTMATTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\x{feff}?---[ \t]*\r?\n(?:([\s\S]*?)\r?\n)?---[ \t]*(?:\r?\n(?:[ \t]*\r?\n)?|$)")
        .unwrap()
});

/// Split a document into its raw frontmatter block and body.
///
/// Returns `(None, content)` when there is no well-formed leading block.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    match FRONTMATTER_PATTERN.captures(content) {
        Some(caps) => {
            let yaml = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (Some(yaml), &content[end..])
        }
        None => (None, content),
    }
}

/// Parse the YAML text of a frontmatter block.
///
/// Lenient: malformed YAML or a non-mapping document yields `None`.
pub fn parse_yaml(yaml: &str) -> Option<Frontmatter> {
    if yaml.trim().is_empty() {
        return Some(Frontmatter::new());
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Object(map)) => Some(Frontmatter {
            data: map.into_iter().collect(),
        }),
        Ok(_) => {
            log::warn!("Frontmatter is not a mapping, ignoring it");
            None
        }
        Err(e) => {
            log::warn!("Malformed frontmatter ignored: {}", e);
            None
        }
    }
}

/// Split and parse in one step: `(frontmatter, body)`
pub fn parse_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    match split_frontmatter(content) {
        (Some(yaml), body) => (parse_yaml(yaml), body),
        (None, body) => (None, body),
    }
}

/// Serialize frontmatter and body back into a markdown document.
pub fn render_document(frontmatter: &Frontmatter, body: &str) -> Result<String> {
    if frontmatter.is_empty() {
        return Ok(body.to_string());
    }

    let yaml = serde_yaml::to_string(&frontmatter.data)?;
    let body = body.trim_start_matches(['\r', '\n']);
    Ok(format!("---\n{}---\n\n{}", yaml, body))
}

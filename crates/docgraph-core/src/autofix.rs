//! Metadata normalization applied before validating and saving frontmatter.

use crate::models::Frontmatter;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashSet;

/// Normalize frontmatter using the current time.
pub fn autofix(frontmatter: &Frontmatter) -> Frontmatter {
    autofix_at(frontmatter, Utc::now())
}

/// Normalize frontmatter as of `now`.
///
/// - trims `title`, `description` and `author`
/// - upper-cases the first letter of the title
/// - lowercases, trims and de-duplicates tags, dropping empty ones
/// - defaults `date` to `now` (`YYYY-MM-DD`) and `status` to `draft`
/// - sets `lastModified` to `now`
pub fn autofix_at(frontmatter: &Frontmatter, now: DateTime<Utc>) -> Frontmatter {
    let mut fixed = frontmatter.clone();

    for key in ["title", "description", "author"] {
        if let Some(Value::String(s)) = fixed.data.get_mut(key) {
            *s = s.trim().to_string();
        }
    }

    if let Some(Value::String(title)) = fixed.data.get_mut("title") {
        *title = capitalize_first(title);
    }

    let normalized_tags = match fixed.data.get("tags") {
        Some(Value::Array(items)) => Some(normalize_tags(items.iter().filter_map(Value::as_str))),
        Some(Value::String(s)) => Some(normalize_tags(std::iter::once(s.as_str()))),
        _ => None,
    };
    if let Some(tags) = normalized_tags {
        fixed.data.insert(
            "tags".to_string(),
            Value::Array(tags.into_iter().map(Value::String).collect()),
        );
    }

    if is_blank(fixed.data.get("date")) {
        fixed.data.insert(
            "date".to_string(),
            Value::String(now.format("%Y-%m-%d").to_string()),
        );
    }

    if is_blank(fixed.data.get("status")) {
        fixed
            .data
            .insert("status".to_string(), Value::String("draft".to_string()));
    }

    fixed.data.insert(
        "lastModified".to_string(),
        Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    fixed
}

fn normalize_tags<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

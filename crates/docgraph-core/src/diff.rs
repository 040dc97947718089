//! Key-level and line-level comparison of two frontmatter versions.

use crate::error::Result;
use crate::models::Frontmatter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use similar::TextDiff;
use std::collections::BTreeSet;

/// How a single frontmatter key changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
    Unchanged,
}

/// One key of a metadata diff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub key: String,
    pub change: ChangeKind,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

/// Counts per change kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub total: usize,
}

/// Key-by-key comparison, entries sorted by key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDiff {
    pub entries: Vec<DiffEntry>,
    pub stats: DiffStats,
}

impl MetadataDiff {
    /// Whether anything was added, removed or modified
    pub fn has_changes(&self) -> bool {
        self.stats.added + self.stats.removed + self.stats.modified > 0
    }

    /// Entries with a given change kind
    pub fn entries_with(&self, change: ChangeKind) -> impl Iterator<Item = &DiffEntry> {
        self.entries.iter().filter(move |e| e.change == change)
    }
}

/// Compare two frontmatter versions. `before` is `None` for a new document.
///
/// A `null` value is treated the same as an absent key.
pub fn diff_metadata(before: Option<&Frontmatter>, after: &Frontmatter) -> MetadataDiff {
    let present = |fm: Option<&Frontmatter>, key: &str| -> Option<Value> {
        fm.and_then(|fm| fm.get(key))
            .filter(|v| !v.is_null())
            .cloned()
    };

    let keys: BTreeSet<&String> = before
        .into_iter()
        .flat_map(|fm| fm.data.keys())
        .chain(after.data.keys())
        .collect();

    let mut diff = MetadataDiff::default();
    for key in keys {
        let old = present(before, key);
        let new = present(Some(after), key);

        let change = match (&old, &new) {
            (None, None) => ChangeKind::Unchanged,
            (None, Some(_)) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Removed,
            (Some(a), Some(b)) if a == b => ChangeKind::Unchanged,
            (Some(_), Some(_)) => ChangeKind::Modified,
        };

        match change {
            ChangeKind::Added => diff.stats.added += 1,
            ChangeKind::Removed => diff.stats.removed += 1,
            ChangeKind::Modified => diff.stats.modified += 1,
            ChangeKind::Unchanged => diff.stats.unchanged += 1,
        }
        diff.stats.total += 1;

        diff.entries.push(DiffEntry {
            key: key.clone(),
            change,
            before: old,
            after: new,
        });
    }

    diff
}

/// Render both versions as YAML and produce a unified line diff.
pub fn unified_diff(before: Option<&Frontmatter>, after: &Frontmatter) -> Result<String> {
    let old = match before {
        Some(fm) if !fm.is_empty() => serde_yaml::to_string(&fm.data)?,
        _ => String::new(),
    };
    let new = if after.is_empty() {
        String::new()
    } else {
        serde_yaml::to_string(&after.data)?
    };

    let lines = TextDiff::from_lines(old.as_str(), new.as_str());
    let rendered = lines
        .unified_diff()
        .context_radius(3)
        .header("before", "after")
        .to_string();
    Ok(rendered)
}

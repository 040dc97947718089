//! Keyword-based tag suggestions.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 5;

/// Vocabulary that may be suggested, in priority order
pub const TAG_VOCABULARY: &[&str] = &[
    "react",
    "typescript",
    "javascript",
    "node",
    "api",
    "frontend",
    "backend",
    "database",
    "testing",
    "deployment",
    "optimization",
    "security",
    "performance",
    "tutorial",
    "guide",
    "documentation",
    "roadmap",
    "planning",
    "architecture",
    "design",
    "ux",
    "ui",
    "components",
    "hooks",
    "state",
    "routing",
    "authentication",
];

static KEYWORD_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    TAG_VOCABULARY
        .iter()
        .map(|kw| (*kw, Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw))).unwrap()))
        .collect()
});

/// Suggest tags whose keyword appears as a whole word in `content` and that
/// are not already among `existing` (compared case-insensitively).
pub fn suggest_tags<S: AsRef<str>>(content: &str, existing: &[S]) -> Vec<String> {
    let existing: HashSet<String> = existing
        .iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .collect();

    KEYWORD_PATTERNS
        .iter()
        .filter(|(kw, _)| !existing.contains(*kw))
        .filter(|(_, pattern)| pattern.is_match(content))
        .map(|(kw, _)| kw.to_string())
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggests_matching_keywords() {
        let content = "This Guide covers React hooks and API testing.";
        let tags = suggest_tags(content, &[] as &[&str]);
        assert_eq!(tags, vec!["react", "api", "testing", "guide", "hooks"]);
    }

    #[test]
    fn test_skips_existing_tags() {
        let tags = suggest_tags("React and TypeScript", &["REACT"]);
        assert_eq!(tags, vec!["typescript"]);
    }

    #[test]
    fn test_whole_words_only() {
        assert!(suggest_tags("build a guideline", &[] as &[&str]).is_empty());
    }

    #[test]
    fn test_at_most_five() {
        let content = "react typescript javascript node api frontend backend";
        assert_eq!(suggest_tags(content, &[] as &[&str]).len(), MAX_SUGGESTIONS);
    }
}

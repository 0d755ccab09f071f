//! Search query parsing.
//!
//! Turns the free-text catalog search box into structured [`SearchCriteria`].
//!
//! Supported syntax:
//! - `k=1,3,4`      kind numbers
//! - `content:text` content contains text
//! - `content=json` content is a non-empty JSON object/array
//! - `content!=json` content exists and is not JSON
//! - `tags:imeta`   serialized tags contain text
//! - `pubkey:abc`   pubkey contains text
//! - anything else  general search across the event and kind metadata

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Structured criteria parsed from one search query.
///
/// At most one of `content`, `content_is_json` and `content_is_not_json` is
/// set. `kind`, when set, is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<BTreeSet<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_is_json: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_is_not_json: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<String>,
}

impl SearchCriteria {
    /// Number of populated fields.
    pub fn field_count(&self) -> usize {
        [
            self.kind.is_some(),
            self.content.is_some(),
            self.content_is_json.is_some(),
            self.content_is_not_json.is_some(),
            self.tags.is_some(),
            self.pubkey.is_some(),
            self.general.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// True when no field is populated (matches everything).
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// True when the kind filter is the only populated field.
    pub fn is_kind_only(&self) -> bool {
        self.kind.is_some() && self.field_count() == 1
    }
}

static KIND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bk=([0-9,]+)\b").expect("kind regex should compile"));

static CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcontent:(\S+)").expect("content regex should compile"));

static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btags:(\S+)").expect("tags regex should compile"));

static PUBKEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bpubkey:(\S+)").expect("pubkey regex should compile"));

static CONTENT_JSON_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bcontent=json\b").expect("content=json regex should compile")
});

static CONTENT_NOT_JSON_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bcontent!=json\b").expect("content!=json regex should compile")
});

/// Parse a search query into criteria. Never fails.
///
/// Matched tokens are stripped from the query (first occurrence, using the
/// pattern that matched them) and whatever text remains becomes the
/// `general` term. Detection of `content=json` / `content!=json` is
/// case-insensitive while stripping is not, so `CONTENT=JSON` also ends up in
/// `general`.
pub fn parse_search_query(query: &str) -> SearchCriteria {
    let mut criteria = SearchCriteria::default();
    let trimmed = query.trim();

    if trimmed.is_empty() {
        return criteria;
    }

    let mut matched: Vec<&Regex> = Vec::with_capacity(4);

    if let Some(caps) = KIND_RE.captures(trimmed) {
        matched.push(&KIND_RE);
        let kinds: BTreeSet<u64> = caps[1]
            .split(',')
            .filter_map(|k| k.trim().parse().ok())
            .collect();
        if !kinds.is_empty() {
            criteria.kind = Some(kinds);
        }
    }

    let lowered = trimmed.to_lowercase();
    if lowered.contains("content=json") {
        matched.push(&CONTENT_JSON_TOKEN_RE);
        criteria.content_is_json = Some(true);
    } else if lowered.contains("content!=json") {
        matched.push(&CONTENT_NOT_JSON_TOKEN_RE);
        criteria.content_is_not_json = Some(true);
    } else if let Some(caps) = CONTENT_RE.captures(trimmed) {
        matched.push(&CONTENT_RE);
        criteria.content = Some(caps[1].to_string());
    }

    if let Some(caps) = TAGS_RE.captures(trimmed) {
        matched.push(&TAGS_RE);
        criteria.tags = Some(caps[1].to_string());
    }

    if let Some(caps) = PUBKEY_RE.captures(trimmed) {
        matched.push(&PUBKEY_RE);
        criteria.pubkey = Some(caps[1].to_string());
    }

    let mut remaining = trimmed.to_string();
    for re in matched {
        remaining = re.replace(&remaining, "").into_owned();
    }

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        criteria.general = Some(remaining.to_string());
    }

    criteria
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(values: &[u64]) -> Option<BTreeSet<u64>> {
        Some(values.iter().copied().collect())
    }

    #[test]
    fn test_empty_query_has_no_criteria() {
        let criteria = parse_search_query("");
        assert!(criteria.is_empty());
        assert_eq!(criteria, SearchCriteria::default());
    }

    #[test]
    fn test_whitespace_query_has_no_criteria() {
        assert!(parse_search_query("   \t ").is_empty());
    }

    #[test]
    fn test_kind_list() {
        let criteria = parse_search_query("k=1,2,3");
        assert_eq!(criteria.kind, kinds(&[1, 2, 3]));
        assert!(criteria.is_kind_only());
    }

    #[test]
    fn test_kind_list_with_surrounding_text() {
        for query in ["profile k=1,2,3", "k=1,2,3 notes", "a k=1,2,3 b", "  k=3,2,1  "] {
            assert_eq!(parse_search_query(query).kind, kinds(&[1, 2, 3]), "{query}");
        }
    }

    #[test]
    fn test_kind_list_drops_malformed_pieces() {
        let criteria = parse_search_query("k=1,x");
        assert_eq!(criteria.kind, kinds(&[1]));
        // "x" is not part of the kind token and stays as general text
        assert_eq!(criteria.general.as_deref(), Some("x"));
    }

    #[test]
    fn test_kind_list_with_empty_pieces() {
        assert_eq!(parse_search_query("k=1,,3").kind, kinds(&[1, 3]));
    }

    #[test]
    fn test_kind_token_without_numbers_leaves_kind_unset() {
        let criteria = parse_search_query("k=, notes");
        assert!(criteria.kind.is_none());
    }

    #[test]
    fn test_kind_token_requires_word_boundary() {
        let criteria = parse_search_query("pk=1");
        assert!(criteria.kind.is_none());
        assert_eq!(criteria.general.as_deref(), Some("pk=1"));
    }

    #[test]
    fn test_content_is_json() {
        let criteria = parse_search_query("content=json");
        assert_eq!(criteria.content_is_json, Some(true));
        assert!(criteria.content_is_not_json.is_none());
        assert!(criteria.content.is_none());
        assert!(criteria.general.is_none());
    }

    #[test]
    fn test_content_is_json_case_insensitive_detection() {
        let criteria = parse_search_query("CONTENT=JSON");
        assert_eq!(criteria.content_is_json, Some(true));
        // Stripping is case-sensitive, so the token survives as general text
        assert_eq!(criteria.general.as_deref(), Some("CONTENT=JSON"));
    }

    #[test]
    fn test_content_is_not_json() {
        let criteria = parse_search_query("content!=json k=0");
        assert_eq!(criteria.content_is_not_json, Some(true));
        assert!(criteria.content_is_json.is_none());
        assert_eq!(criteria.kind, kinds(&[0]));
        assert!(criteria.general.is_none());
    }

    #[test]
    fn test_content_substring() {
        let criteria = parse_search_query("content:hello");
        assert_eq!(criteria.content.as_deref(), Some("hello"));
        assert!(criteria.general.is_none());
    }

    #[test]
    fn test_content_json_wins_over_content_substring() {
        let criteria = parse_search_query("content=json content:foo");
        assert_eq!(criteria.content_is_json, Some(true));
        assert!(criteria.content.is_none());
        // content:foo was never matched, so it is not stripped and leaks into
        // the general term. Kept as-is; see DESIGN.md.
        assert_eq!(criteria.general.as_deref(), Some("content:foo"));
    }

    #[test]
    fn test_tags_and_pubkey() {
        let criteria = parse_search_query("tags:imeta pubkey:ABC123");
        assert_eq!(criteria.tags.as_deref(), Some("imeta"));
        assert_eq!(criteria.pubkey.as_deref(), Some("ABC123"));
        assert!(criteria.general.is_none());
        assert_eq!(criteria.field_count(), 2);
    }

    #[test]
    fn test_general_remainder() {
        let criteria = parse_search_query("  zap receipt  ");
        assert_eq!(criteria.general.as_deref(), Some("zap receipt"));
        assert_eq!(criteria.field_count(), 1);
    }

    #[test]
    fn test_general_keeps_inner_spacing_after_stripping() {
        let criteria = parse_search_query("long k=30023 form");
        assert_eq!(criteria.kind, kinds(&[30023]));
        assert_eq!(criteria.general.as_deref(), Some("long  form"));
    }

    #[test]
    fn test_only_first_occurrence_is_stripped() {
        let criteria = parse_search_query("tags:a tags:b");
        assert_eq!(criteria.tags.as_deref(), Some("a"));
        assert_eq!(criteria.general.as_deref(), Some("tags:b"));
    }

    #[test]
    fn test_kind_only_is_false_with_other_fields() {
        assert!(!parse_search_query("k=1 hello").is_kind_only());
        assert!(!parse_search_query("hello").is_kind_only());
    }
}

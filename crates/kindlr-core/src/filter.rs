//! Filter evaluation over kind metadata and sample events.
//!
//! Everything here is pure: results are recomputed whenever the query or the
//! sample list changes.

use serde::Serialize;

use crate::event::SampleEvent;
use crate::json::is_json_content;
use crate::kinds::{KindDescriptor, KindRegistry};
use crate::search::SearchCriteria;

/// Fields searched by the `general` term, in serialization order.
#[derive(Serialize)]
struct GeneralView<'a> {
    id: &'a str,
    pubkey: &'a str,
    content: &'a str,
    tags: &'a [Vec<String>],
    sig: &'a str,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Decide whether a kind matches the criteria.
///
/// With no events the decision is made on metadata alone (only the `general`
/// term is considered there). With events, a kind matches when any event
/// passes [`filter_event`] or the metadata matches.
pub fn filter_kind(
    descriptor: &KindDescriptor,
    criteria: &SearchCriteria,
    events: &[SampleEvent],
) -> bool {
    if criteria.is_empty() {
        return true;
    }

    if let Some(kinds) = &criteria.kind {
        if !kinds.contains(&u64::from(descriptor.kind)) {
            return false;
        }
        if criteria.is_kind_only() {
            return true;
        }
    }

    if events.is_empty() {
        return matches_kind_metadata(descriptor, criteria);
    }

    events.iter().any(|event| filter_event(event, criteria))
        || matches_kind_metadata(descriptor, criteria)
}

/// Metadata-only match on the `general` term.
///
/// Searches the name, both descriptions, `kind<N>` and the bare number.
pub fn matches_kind_metadata(descriptor: &KindDescriptor, criteria: &SearchCriteria) -> bool {
    let Some(general) = &criteria.general else {
        return false;
    };
    let needle = general.to_lowercase();

    let number = descriptor.kind.to_string();
    let tagged = format!("kind{number}");

    [
        descriptor.name,
        descriptor.description,
        descriptor.short_description,
        tagged.as_str(),
        number.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Decide whether one event satisfies every populated criterion.
pub fn filter_event(event: &SampleEvent, criteria: &SearchCriteria) -> bool {
    if let Some(kinds) = &criteria.kind
        && !kinds.contains(&u64::from(event.kind))
    {
        return false;
    }

    if let Some(content) = &criteria.content
        && (event.content.is_empty() || !contains_ignore_case(&event.content, content))
    {
        return false;
    }

    if criteria.content_is_json.is_some() && !is_json_content(&event.content) {
        return false;
    }

    if criteria.content_is_not_json.is_some()
        && (event.content.is_empty() || is_json_content(&event.content))
    {
        return false;
    }

    if let Some(tags) = &criteria.tags {
        let serialized = serde_json::to_string(&event.tags).unwrap_or_default();
        if !contains_ignore_case(&serialized, tags) {
            return false;
        }
    }

    if let Some(pubkey) = &criteria.pubkey
        && !contains_ignore_case(&event.pubkey, pubkey)
    {
        return false;
    }

    if let Some(general) = &criteria.general {
        let view = GeneralView {
            id: &event.id,
            pubkey: &event.pubkey,
            content: &event.content,
            tags: &event.tags,
            sig: &event.sig,
        };
        let serialized = serde_json::to_string(&view).unwrap_or_default();
        if !contains_ignore_case(&serialized, general) {
            return false;
        }
    }

    true
}

/// True when criteria are empty, there are no events, or any event matches.
pub fn has_matching_events(events: &[SampleEvent], criteria: &SearchCriteria) -> bool {
    if criteria.is_empty() || events.is_empty() {
        return true;
    }
    events.iter().any(|event| filter_event(event, criteria))
}

/// Matching descriptors in registry order.
///
/// `samples` borrows the cached events for a kind; kinds without samples are
/// matched on metadata.
pub fn filter_catalog<'r, 's, F>(
    registry: &'r KindRegistry,
    criteria: &SearchCriteria,
    mut samples: F,
) -> Vec<&'r KindDescriptor>
where
    F: FnMut(u16) -> &'s [SampleEvent],
{
    registry
        .descriptors()
        .iter()
        .filter(|descriptor| filter_kind(descriptor, criteria, samples(descriptor.kind)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::parse_search_query;

    fn event(kind: u16, pubkey: &str, content: &str) -> SampleEvent {
        SampleEvent {
            id: "e".repeat(64),
            pubkey: pubkey.to_string(),
            created_at: 1_700_000_000,
            kind,
            tags: vec![
                vec!["t".to_string(), "Nostr".to_string()],
                vec!["imeta".to_string(), "url https://x.test/a.png".to_string()],
            ],
            content: content.to_string(),
            sig: "f".repeat(128),
        }
    }

    fn registry() -> KindRegistry {
        KindRegistry::builtin().unwrap()
    }

    fn descriptor(kind: u16) -> KindDescriptor {
        *registry().lookup(kind).unwrap()
    }

    #[test]
    fn test_empty_criteria_matches_every_kind() {
        let criteria = parse_search_query("");
        let registry = registry();
        for d in registry.descriptors() {
            assert!(filter_kind(d, &criteria, &[]));
            assert!(filter_kind(d, &criteria, &[event(99, "abc", "x")]));
        }
    }

    #[test]
    fn test_kind_only_ignores_events() {
        let criteria = parse_search_query("k=1");
        let unrelated = [event(7, "abc", "+")];

        assert!(filter_kind(&descriptor(1), &criteria, &[]));
        assert!(filter_kind(&descriptor(1), &criteria, &unrelated));
        assert!(!filter_kind(&descriptor(0), &criteria, &[]));
        assert!(!filter_kind(&descriptor(3), &criteria, &unrelated));
    }

    #[test]
    fn test_kind_zero_with_no_events() {
        let criteria = parse_search_query("k=0");
        assert!(filter_kind(&descriptor(0), &criteria, &[]));
    }

    #[test]
    fn test_kind_mismatch_short_circuits_before_general() {
        let criteria = parse_search_query("k=1 metadata");
        assert!(!filter_kind(&descriptor(0), &criteria, &[]));
    }

    #[test]
    fn test_content_is_json_end_to_end() {
        let criteria = parse_search_query("content=json");
        let d = descriptor(1);
        let json_event = event(1, "abc", r#"{"a":1}"#);
        let text_event = event(1, "abc", "hello");

        assert!(filter_event(&json_event, &criteria));
        assert!(!filter_event(&text_event, &criteria));
        assert!(filter_kind(&d, &criteria, &[json_event.clone(), text_event.clone()]));
        assert!(filter_kind(&d, &criteria, &[json_event]));
        assert!(!filter_kind(&d, &criteria, &[text_event]));
    }

    #[test]
    fn test_content_is_json_rejects_empty_and_primitive_content() {
        let criteria = SearchCriteria {
            content_is_json: Some(true),
            ..Default::default()
        };
        for content in ["{}", "[]", "42", ""] {
            assert!(!filter_event(&event(1, "abc", content), &criteria), "{content:?}");
        }
        assert!(filter_event(&event(1, "abc", "[1,2]"), &criteria));
    }

    #[test]
    fn test_json_and_not_json_are_exclusive() {
        let json = SearchCriteria {
            content_is_json: Some(true),
            ..Default::default()
        };
        let not_json = SearchCriteria {
            content_is_not_json: Some(true),
            ..Default::default()
        };
        for content in [r#"{"a":1}"#, "[1]", "{}", "[]", "42", "", "hello", "{broken"] {
            let e = event(1, "abc", content);
            assert!(
                !(filter_event(&e, &json) && filter_event(&e, &not_json)),
                "{content:?}"
            );
        }
    }

    #[test]
    fn test_not_json_requires_content() {
        let criteria = parse_search_query("content!=json");
        assert!(!filter_event(&event(1, "abc", ""), &criteria));
        assert!(filter_event(&event(1, "abc", "hello"), &criteria));
        assert!(filter_event(&event(1, "abc", "{}"), &criteria));
        assert!(!filter_event(&event(1, "abc", r#"{"a":1}"#), &criteria));
    }

    #[test]
    fn test_content_substring_case_insensitive() {
        let criteria = parse_search_query("content:HELLO");
        assert!(filter_event(&event(1, "abc", "well hello there"), &criteria));
        assert!(!filter_event(&event(1, "abc", "goodbye"), &criteria));
        assert!(!filter_event(&event(1, "abc", ""), &criteria));
    }

    #[test]
    fn test_pubkey_substring_case_insensitive() {
        let criteria = parse_search_query("pubkey:abc123");
        assert!(filter_event(&event(1, "abc123def", "x"), &criteria));
        assert!(filter_event(&event(1, "ABC123DEF", "x"), &criteria));
        assert!(!filter_event(&event(1, "def", "x"), &criteria));
        assert!(filter_kind(&descriptor(1), &criteria, &[event(1, "abc123def", "x")]));
    }

    #[test]
    fn test_tags_searches_serialized_tags() {
        assert!(filter_event(&event(1, "abc", "x"), &parse_search_query("tags:imeta")));
        assert!(filter_event(&event(1, "abc", "x"), &parse_search_query("tags:nostr")));
        // Serialized form includes JSON punctuation
        assert!(filter_event(&event(1, "abc", "x"), &parse_search_query(r#"tags:["t","#)));
        assert!(!filter_event(&event(1, "abc", "x"), &parse_search_query("tags:zap")));
    }

    #[test]
    fn test_general_searches_event_fields_but_not_kind_or_timestamp() {
        let e = event(1, "abc", "Good Morning");
        assert!(filter_event(&e, &parse_search_query("morning")));
        assert!(filter_event(&e, &parse_search_query("ffff")));
        assert!(filter_event(&e, &parse_search_query("\"pubkey\":\"abc\"")));
        assert!(!filter_event(&e, &parse_search_query("1700000000")));
        assert!(!filter_event(&e, &parse_search_query("created_at")));
    }

    #[test]
    fn test_filter_event_requires_all_fields() {
        let criteria = parse_search_query("k=1 pubkey:abc content:hello");
        assert!(filter_event(&event(1, "abc", "hello"), &criteria));
        assert!(!filter_event(&event(2, "abc", "hello"), &criteria));
        assert!(!filter_event(&event(1, "xyz", "hello"), &criteria));
        assert!(!filter_event(&event(1, "abc", "bye"), &criteria));
    }

    #[test]
    fn test_metadata_fallback_without_events() {
        let d = descriptor(3);
        assert!(filter_kind(&d, &parse_search_query("follow"), &[]));
        assert!(filter_kind(&d, &parse_search_query("KIND3"), &[]));
        assert!(filter_kind(&d, &parse_search_query("3"), &[]));
        assert!(!filter_kind(&d, &parse_search_query("zap"), &[]));
    }

    #[test]
    fn test_metadata_fallback_ignores_non_general_fields() {
        let d = descriptor(1);
        assert!(!filter_kind(&d, &parse_search_query("content:hello"), &[]));
        assert!(!filter_kind(&d, &parse_search_query("pubkey:abc"), &[]));
    }

    #[test]
    fn test_metadata_match_wins_over_non_matching_events() {
        // A kind whose name matches stays visible even when no sample does.
        let d = descriptor(3);
        let criteria = parse_search_query("follow");
        let events = [event(3, "abc", "nothing relevant")];
        assert!(!has_matching_events(&events, &criteria));
        assert!(filter_kind(&d, &criteria, &events));
    }

    #[test]
    fn test_has_matching_events() {
        let criteria = parse_search_query("content:hello");
        assert!(has_matching_events(&[], &criteria));
        assert!(has_matching_events(&[event(1, "abc", "x")], &SearchCriteria::default()));
        assert!(has_matching_events(
            &[event(1, "abc", "x"), event(1, "abc", "hello")],
            &criteria
        ));
        assert!(!has_matching_events(&[event(1, "abc", "x")], &criteria));
    }

    #[test]
    fn test_filter_catalog_preserves_registry_order() {
        let registry = registry();
        let criteria = parse_search_query("k=3,0,1");
        let kinds: Vec<u16> = filter_catalog(&registry, &criteria, |_| &[])
            .into_iter()
            .map(|d| d.kind)
            .collect();
        assert_eq!(kinds, vec![0, 1, 3]);
    }

    #[test]
    fn test_filter_catalog_uses_samples() {
        let registry = registry();
        let criteria = parse_search_query("content:gm");
        let notes = vec![event(1, "abc", "gm nostr")];
        let matched = filter_catalog(&registry, &criteria, |kind| {
            if kind == 1 { notes.as_slice() } else { &[] }
        });
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].kind, 1);
    }

    #[test]
    fn test_filter_catalog_empty_query_returns_everything() {
        let registry = registry();
        let matched = filter_catalog(&registry, &SearchCriteria::default(), |_| &[]);
        assert_eq!(matched.len(), registry.len());
    }
}

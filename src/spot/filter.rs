//! Comment filtering and tag suggestions
//!
//! Pure functions over the flat spot list. Filtering narrows the list shown
//! on the map; suggestions always reflect the full corpus so the top tags
//! stay stable while the user types.

use super::Spot;
use crate::constants::limits::MAX_SUGGESTIONS;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A tag with its occurrence count across the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSuggestion {
    pub tag: String,
    pub count: usize,
}

/// Filter spots by comment substring, case-insensitively
///
/// A `None` or empty filter returns the whole list (as a new vector). An
/// empty result is valid, not an error.
pub fn filter(spots: &[Spot], active_filter: Option<&str>) -> Vec<Spot> {
    let needle = match active_filter {
        Some(f) if !f.is_empty() => f.to_lowercase(),
        _ => return spots.to_vec(),
    };

    spots
        .iter()
        .filter(|s| s.comment.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Count non-empty trimmed comments and return the top tags
///
/// Sorted descending by count; ties keep first-seen order; truncated to the
/// top 3. Computed over the unfiltered list.
pub fn suggestions(all_spots: &[Spot]) -> Vec<TagSuggestion> {
    let mut ordered: Vec<TagSuggestion> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for spot in all_spots {
        let tag = spot.comment.trim();
        if tag.is_empty() {
            continue;
        }
        match index.get(tag) {
            Some(&i) => ordered[i].count += 1,
            None => {
                index.insert(tag.to_string(), ordered.len());
                ordered.push(TagSuggestion {
                    tag: tag.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order on equal counts
    ordered.sort_by(|a, b| b.count.cmp(&a.count));
    ordered.truncate(MAX_SUGGESTIONS);
    ordered
}

/// Narrow suggestions by the user's in-progress input, case-insensitively
pub fn match_suggestions(suggestions: &[TagSuggestion], typed: &str) -> Vec<TagSuggestion> {
    if typed.is_empty() {
        return suggestions.to_vec();
    }
    let needle = typed.to_lowercase();
    suggestions
        .iter()
        .filter(|s| s.tag.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spot::tests_support::spot_at;

    fn corpus() -> Vec<Spot> {
        vec![
            spot_at("1", 10.0, 20.0, "cafe"),
            spot_at("2", 10.0, 20.0, "cafe"),
            spot_at("3", 30.0, 40.0, "bar"),
            spot_at("4", 50.0, 60.0, "Viewpoint"),
            spot_at("5", 51.0, 61.0, ""),
        ]
    }

    #[test]
    fn test_no_filter_returns_all() {
        let spots = corpus();
        assert_eq!(filter(&spots, None).len(), spots.len());
        assert_eq!(filter(&spots, Some("")).len(), spots.len());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let spots = corpus();
        let hits = filter(&spots, Some("CAFE"));
        assert_eq!(hits.len(), 2);
        let hits = filter(&spots, Some("viewp"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "4");
    }

    #[test]
    fn test_filter_zero_matches_is_empty_not_error() {
        let spots = corpus();
        assert!(filter(&spots, Some("onsen")).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let spots = corpus();
        let once = filter(&spots, Some("ca"));
        let twice = filter(&once, Some("ca"));
        assert_eq!(
            once.iter().map(|s| &s.id).collect::<Vec<_>>(),
            twice.iter().map(|s| &s.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_suggestions_scenario() {
        let spots = vec![
            spot_at("1", 10.0, 20.0, "cafe"),
            spot_at("2", 10.0, 20.0, "cafe"),
            spot_at("3", 30.0, 40.0, "bar"),
        ];
        let sugg = suggestions(&spots);
        assert_eq!(
            sugg,
            vec![
                TagSuggestion { tag: "cafe".to_string(), count: 2 },
                TagSuggestion { tag: "bar".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_suggestions_cap_and_tie_order() {
        let spots = vec![
            spot_at("1", 0.0, 0.0, "bar"),
            spot_at("2", 0.0, 1.0, "cafe"),
            spot_at("3", 0.0, 2.0, "park"),
            spot_at("4", 0.0, 3.0, "pier"),
            spot_at("5", 0.0, 4.0, "pier"),
        ];
        let sugg = suggestions(&spots);
        assert_eq!(sugg.len(), 3);
        assert_eq!(sugg[0].tag, "pier");
        // bar/cafe/park all count 1; first seen wins the remaining slots
        assert_eq!(sugg[1].tag, "bar");
        assert_eq!(sugg[2].tag, "cafe");
    }

    #[test]
    fn test_suggestions_trim_and_skip_empty() {
        let spots = vec![
            spot_at("1", 0.0, 0.0, "  cafe  "),
            spot_at("2", 0.0, 1.0, "cafe"),
            spot_at("3", 0.0, 2.0, "   "),
        ];
        let sugg = suggestions(&spots);
        assert_eq!(sugg.len(), 1);
        assert_eq!(sugg[0], TagSuggestion { tag: "cafe".to_string(), count: 2 });
    }

    #[test]
    fn test_suggestions_empty_corpus() {
        assert!(suggestions(&[]).is_empty());
    }

    #[test]
    fn test_match_suggestions() {
        let sugg = vec![
            TagSuggestion { tag: "cafe".to_string(), count: 3 },
            TagSuggestion { tag: "car park".to_string(), count: 2 },
            TagSuggestion { tag: "bar".to_string(), count: 1 },
        ];
        let hits = match_suggestions(&sugg, "CA");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].tag, "cafe");
        assert_eq!(hits[1].tag, "car park");

        assert_eq!(match_suggestions(&sugg, "").len(), 3);
        assert!(match_suggestions(&sugg, "onsen").is_empty());
    }
}

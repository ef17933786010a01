use crate::core::index::GuestIndex;
use crate::core::normalize::normalize;
use crate::domain::model::{IndexEntry, Suggestion};
use std::cmp::Ordering;

/// Suggestions returned per query.
pub const MAX_SUGGESTIONS: usize = 12;
/// Minimum similarity for the whole-index fuzzy fallback.
pub const FUZZY_FALLBACK_THRESHOLD: f64 = 0.45;
/// Weight applied to the prefix-match bonus.
const PREFIX_BONUS_WEIGHT: f64 = 2.0;

/// Ranks guest-group names against a partial, possibly typo-laden query.
///
/// Pure function of (query, index). Queries shorter than 2 normalized
/// characters return no suggestions. Entries containing every query token as
/// a substring are scored by prefix bonus plus fuzzy similarity; when no
/// entry contains all tokens, any entry similar enough to the whole query is
/// offered instead.
pub fn suggest(query: &str, index: &GuestIndex) -> Vec<Suggestion> {
    let normalized_query = normalize(query);
    if normalized_query.chars().count() < 2 {
        return Vec::new();
    }

    let tokens: Vec<&str> = normalized_query.split(' ').collect();

    let mut scored: Vec<(f64, &IndexEntry)> = index
        .entries()
        .iter()
        .filter(|entry| {
            tokens
                .iter()
                .all(|token| entry.normalized_name.contains(token))
        })
        .map(|entry| (score(&normalized_query, entry), entry))
        .collect();

    if scored.is_empty() {
        scored = index
            .entries()
            .iter()
            .filter_map(|entry| {
                let ratio =
                    strsim::normalized_levenshtein(&normalized_query, &entry.normalized_name);
                (ratio >= FUZZY_FALLBACK_THRESHOLD).then_some((ratio, entry))
            })
            .collect();
    }

    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.1.raw_name
                    .to_lowercase()
                    .cmp(&b.1.raw_name.to_lowercase())
            })
    });
    scored.truncate(MAX_SUGGESTIONS);

    scored
        .into_iter()
        .map(|(_, entry)| Suggestion {
            nombre: entry.raw_name.clone(),
            max_boletos: index.ceiling(&entry.raw_name),
        })
        .collect()
}

fn score(normalized_query: &str, entry: &IndexEntry) -> f64 {
    let prefix_bonus = if entry.normalized_name.starts_with(normalized_query) {
        1.0
    } else {
        0.0
    };
    prefix_bonus * PREFIX_BONUS_WEIGHT
        + strsim::normalized_levenshtein(normalized_query, &entry.normalized_name)
}

//! Fuzzy name resolution.
//!
//! Names arrive from users ("great tusk"), URLs ("great-tusk") and other
//! tables (Showdown ids like "greattusk"). Resolution is case-insensitive and
//! tolerates small misspellings using normalized Levenshtein similarity.

use std::collections::BTreeMap;

use strsim::normalized_levenshtein;

/// Minimum similarity (0.0 to 1.0) for a fuzzy match to be accepted.
pub const SIMILARITY_CUTOFF: f64 = 0.6;

/// Similarity ratio between two strings; 1.0 means identical.
///
/// Edit distance over the longer length. This is stricter on prefixes than a
/// matching-blocks ratio: `"great"` vs `"great tusk"` scores 0.5, so bare
/// prefixes of long names fall under the cutoff while misspellings of the full
/// name still resolve.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Resolve `query` to one of `candidates`.
///
/// An exact case-insensitive hit wins outright, so resolving a canonical name
/// returns it unchanged. Otherwise the most similar candidate is returned if
/// it clears [`SIMILARITY_CUTOFF`]. Equal scores go to the candidate whose
/// lowercase form sorts first.
pub fn resolve<I, S>(query: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // lowercase -> original; later duplicates overwrite earlier ones
    let lookup: BTreeMap<String, String> = candidates
        .into_iter()
        .map(|c| (c.as_ref().to_lowercase(), c.as_ref().to_string()))
        .collect();

    let query = query.to_lowercase();
    if let Some(exact) = lookup.get(&query) {
        return Some(exact.clone());
    }

    let mut best: Option<(&String, f64)> = None;
    for (lower, original) in &lookup {
        let score = similarity(&query, lower);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((original, score));
        }
    }

    best.filter(|(_, score)| *score >= SIMILARITY_CUTOFF)
        .map(|(original, _)| original.clone())
}

/// Showdown-style id: lowercase ASCII letters and digits only.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_case_insensitive() {
        assert_eq!(
            resolve("pikachu", ["Pikachu", "Raichu"]),
            Some("Pikachu".to_string())
        );
    }

    #[test]
    fn test_resolve_misspelling() {
        assert_eq!(resolve("pikachuu", ["Pikachu"]), Some("Pikachu".to_string()));
        assert_eq!(
            resolve("kingambt", ["Kingambit", "Gholdengo"]),
            Some("Kingambit".to_string())
        );
    }

    #[test]
    fn test_resolve_rejects_distant() {
        assert_eq!(resolve("zzz", ["Pikachu"]), None);
    }

    #[test]
    fn test_resolve_empty_candidates() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(resolve("pikachu", &empty), None);
    }

    #[test]
    fn test_resolve_idempotent() {
        let names = ["Great Tusk", "Iron Valiant", "Landorus-Therian"];
        for name in names {
            assert_eq!(resolve(name, names), Some(name.to_string()));
        }
    }

    #[test]
    fn test_resolve_space_for_dash() {
        assert_eq!(
            resolve("landorus therian", ["Landorus-Therian", "Landorus"]),
            Some("Landorus-Therian".to_string())
        );
    }

    #[test]
    fn test_to_id() {
        assert_eq!(to_id("Great Tusk"), "greattusk");
        assert_eq!(to_id("Mr. Mime-Galar"), "mrmimegalar");
        assert_eq!(to_id("Farfetch’d"), "farfetchd");
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_bare_prefix_below_cutoff() {
        assert_eq!(similarity("great", "great tusk"), 0.5);
        assert_eq!(resolve("great", ["Great Tusk"]), None);
        assert_eq!(resolve("great tsuk", ["Great Tusk"]), Some("Great Tusk".to_string()));
    }
}

//! Title similarity scoring.
//!
//! A smooth edit-distance ratio with boosted floors for two near-certain
//! signals: whole-word containment and token-subset containment. "Onizuka" vs
//! "Great Teacher Onizuka" has a poor raw ratio but is almost certainly the
//! same show; the floors encode that without giving up the smooth metric for
//! genuinely ambiguous pairs.

/// Floor for a candidate occurring in the variant as a whole word.
const WHOLE_WORD_FLOOR: f64 = 0.85;

/// Floor for every candidate token being present in the variant's token set.
const TOKEN_SUBSET_FLOOR: f64 = 0.80;

/// Normalized similarity between a candidate name and a catalog title variant.
///
/// Returns a value in `[0.0, 1.0]`; 1.0 exactly when the two are equal after
/// trimming and lowercasing. Pure: identical inputs always yield the identical
/// score.
pub fn score(candidate: &str, variant: &str) -> f64 {
    let candidate = candidate.trim().to_lowercase();
    let variant = variant.trim().to_lowercase();

    if candidate == variant {
        return 1.0;
    }

    let base = strsim::normalized_levenshtein(&candidate, &variant);
    if candidate.is_empty() {
        return base;
    }

    if contains_whole_word(&variant, &candidate) {
        return base.max(WHOLE_WORD_FLOOR);
    }
    if token_subset(&candidate, &variant) {
        return base.max(TOKEN_SUBSET_FLOOR);
    }

    base
}

/// Whether `needle` occurs in `haystack` delimited by word boundaries.
fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();

        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }

        // Advance one char past this occurrence, staying on a char boundary.
        start = begin
            + haystack[begin..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
    }
    false
}

/// Whether every whitespace-delimited token of `candidate` appears in
/// `variant`'s token set.
fn token_subset(candidate: &str, variant: &str) -> bool {
    let variant_tokens: std::collections::HashSet<&str> =
        variant.split_whitespace().collect();
    let mut tokens = candidate.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(|t| variant_tokens.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(score("Great Teacher Onizuka", "Great Teacher Onizuka"), 1.0);
    }

    #[test]
    fn equal_after_normalization_scores_one() {
        assert_eq!(score("  great teacher onizuka ", "Great Teacher Onizuka"), 1.0);
    }

    #[test]
    fn whole_word_containment_hits_the_floor() {
        // Raw edit-distance ratio here is well under 0.5.
        let s = score("Onizuka", "Great Teacher Onizuka");
        assert!(s >= 0.85, "got {s}");
    }

    #[test]
    fn partial_word_is_not_whole_word() {
        // "oni" is a substring of "onizuka" but not word-delimited.
        let s = score("oni", "Great Teacher Onizuka");
        assert!(s < 0.85, "got {s}");
    }

    #[test]
    fn token_subset_hits_the_floor() {
        // Reordered tokens: not a substring, but every token is present.
        let s = score("onizuka teacher", "Great Teacher Onizuka");
        assert!(s >= 0.80, "got {s}");
    }

    #[test]
    fn disjoint_strings_score_low() {
        let s = score("abc", "xyz");
        assert_eq!(s, 0.0);
    }

    #[test]
    fn empty_candidate_gets_no_boost() {
        assert_eq!(score("", ""), 1.0);
        assert_eq!(score("", "Great Teacher Onizuka"), 0.0);
    }

    #[test]
    fn score_is_deterministic() {
        let a = score("Shingeki no Kyojin 3", "Shingeki no Kyojin Season 3");
        let b = score("Shingeki no Kyojin 3", "Shingeki no Kyojin Season 3");
        assert_eq!(a, b);
    }

    #[test]
    fn boost_keeps_higher_base_ratio() {
        // Near-identical strings where the smooth ratio already beats the
        // token-subset floor; the floor must not drag the score down.
        let s = score("shingeki no kyojin", "shingeki no kyojin 2");
        assert!(s > 0.85, "got {s}");
    }
}

//! # Text Normalizer
//! Expands informal contractions to standard English before sentiment
//! scoring, e.g. "i don't like it" → "i do not like it", so the negation
//! handling in the scorer sees the bare `not` token.
//!
//! Matching is whole-token and case-insensitive; unmatched tokens pass
//! through unchanged and the result is rejoined with single spaces.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const CONTRACTIONS: &[(&str, &str)] = &[
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("can't", "can not"),
    ("couldn't", "could not"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("shouldn't", "should not"),
    ("isn't", "is not"),
    ("wasn't", "was not"),
    ("aren't", "are not"),
    ("weren't", "were not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("hadn't", "had not"),
    ("mustn't", "must not"),
    ("mightn't", "might not"),
    ("needn't", "need not"),
    ("shan't", "shall not"),
    ("ain't", "is not"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("i'd", "i would"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("they're", "they are"),
    ("we're", "we are"),
    ("you're", "you are"),
];

static EXPANSIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CONTRACTIONS.iter().copied().collect());

/// Expand contractions in free text. Pure and total: text without any known
/// contraction comes back with only its whitespace collapsed.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            let lowered = token.to_lowercase();
            EXPANSIONS
                .get(lowered.as_str())
                .copied()
                .unwrap_or(token)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_negation_contractions() {
        assert_eq!(normalize("i don't like it"), "i do not like it");
        assert_eq!(normalize("she wasn't rude"), "she was not rude");
    }

    #[test]
    fn match_is_case_insensitive_but_others_keep_case() {
        assert_eq!(normalize("I DON'T like it"), "I do not like it");
    }

    #[test]
    fn unmatched_text_passes_through() {
        assert_eq!(normalize("a very good doctor"), "a very good doctor");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(normalize("  good \t doctor \n"), "good doctor");
    }
}

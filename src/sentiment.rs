//! # Sentiment Scorer
//! Lexicon-based polarity scoring for review text.
//!
//! The analyzer re-keys the lexicon by word stem at construction (a pure
//! build step; the source lexicon is never mutated). Scoring looks a token
//! up raw first and falls back to its stem, so both "care" and "caring" hit
//! the same entry. The final score is the mean contribution per token, not
//! per hit.
//!
//! Negation is sticky: once a negation word appears, the sign of every later
//! lexicon hit in the scan stays inverted. A second negation word re-assigns
//! the inversion rather than cancelling it.

use crate::error::{RecommendError, Result};
use crate::lexicon::Lexicon;
use crate::normalize::normalize;
use crate::stemmer::stem;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    /// Lexicon re-keyed by stem.
    vocabulary: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl SentimentAnalyzer {
    /// Build an analyzer over the given lexicon.
    pub fn new(lexicon: &Lexicon) -> Self {
        let vocabulary = lexicon.words().map(|(word, w)| (stem(word), w)).collect();
        let negations = lexicon.negations().map(str::to_owned).collect();
        Self {
            vocabulary,
            negations,
        }
    }

    /// Analyzer over the embedded default lexicon.
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin())
    }

    /// Score a non-empty token sequence. Tokens are case-folded; negation
    /// words contribute nothing themselves but invert the sign of every
    /// later hit. The result is `sum / token_count`.
    ///
    /// Fails with `InvalidInput` on an empty sequence (the mean would divide
    /// by zero); callers must guarantee non-empty input.
    pub fn score<I, S>(&self, tokens: I) -> Result<f64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut negator = 1.0f64;
        let mut sum = 0.0f64;
        let mut count = 0usize;

        for token in tokens {
            count += 1;
            let lowered = token.as_ref().to_lowercase();

            if self.negations.contains(&lowered) {
                negator = -1.0;
                continue;
            }

            let hit = self
                .vocabulary
                .get(&lowered)
                .copied()
                .or_else(|| self.vocabulary.get(&stem(&lowered)).copied());
            if let Some(weight) = hit {
                sum += negator * weight;
            }
        }

        if count == 0 {
            return Err(RecommendError::InvalidInput(
                "cannot score an empty token sequence".into(),
            ));
        }
        Ok(sum / count as f64)
    }

    /// Normalize free text (contraction expansion) and score its
    /// whitespace-separated tokens.
    pub fn score_text(&self, text: &str) -> Result<f64> {
        let expanded = normalize(text);
        self.score(expanded.split_whitespace())
    }
}

/// Human-readable polarity band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    StronglyPositive,
    Positive,
    Neutral,
    Negative,
    StronglyNegative,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.5 {
            Self::StronglyPositive
        } else if score > 0.0 {
            Self::Positive
        } else if score == 0.0 {
            Self::Neutral
        } else if score > -0.5 {
            Self::Negative
        } else {
            Self::StronglyNegative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StronglyPositive => "Strongly Positive",
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::StronglyNegative => "Strongly Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SentimentAnalyzer {
        SentimentAnalyzer::builtin()
    }

    #[test]
    fn single_known_word_scores_its_weight() {
        let score = analyzer().score(["good"]).unwrap();
        assert!((score - 3.0).abs() < 1e-12);
    }

    #[test]
    fn mean_is_per_token_not_per_hit() {
        // "and" misses the lexicon but still counts in the divisor.
        let score = analyzer().score(["good", "and", "friendly"]).unwrap();
        assert!((score - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_sequence_is_invalid_input() {
        let err = analyzer().score(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidInput(_)));
    }

    #[test]
    fn negation_inverts_the_following_hit() {
        let a = analyzer();
        let plain = a.score(["good"]).unwrap();
        let negated = a.score(["not", "good"]).unwrap();
        assert!((plain - 3.0).abs() < 1e-12);
        assert!((negated - (-3.0 / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn negation_is_sticky_across_the_scan() {
        // The negator stays -1 after "not": both hits are inverted.
        let score = analyzer().score(["not", "good", "great"]).unwrap();
        assert!((score - (-6.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn double_negation_does_not_cancel() {
        // A second negation word re-assigns -1 rather than flipping back.
        let score = analyzer().score(["not", "never", "good"]).unwrap();
        assert!((score - (-3.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn stem_fallback_resolves_inflected_words() {
        // "caring" is found through its stem "care".
        let score = analyzer().score(["caring"]).unwrap();
        assert!((score - 2.0).abs() < 1e-12);
    }

    #[test]
    fn scoring_is_case_insensitive() {
        let a = analyzer();
        assert_eq!(a.score(["GOOD"]).unwrap(), a.score(["good"]).unwrap());
    }

    #[test]
    fn score_text_expands_contractions_first() {
        // "i don't like it" -> [i, do, not, like, it]; like(+2) inverted.
        let score = analyzer().score_text("i don't like it").unwrap();
        assert!((score - (-2.0 / 5.0)).abs() < 1e-12);
    }

    #[test]
    fn labels_cover_all_bands() {
        assert_eq!(
            SentimentLabel::from_score(1.2),
            SentimentLabel::StronglyPositive
        );
        assert_eq!(SentimentLabel::from_score(0.3), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.3), SentimentLabel::Negative);
        assert_eq!(
            SentimentLabel::from_score(-0.8),
            SentimentLabel::StronglyNegative
        );
    }
}

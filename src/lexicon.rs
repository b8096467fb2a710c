//! # Review Lexicon
//! Static word → polarity-weight map plus the negation word set.
//!
//! - The built-in lexicon ships embedded in the binary and is parsed once,
//!   process-wide, behind a `Lazy`.
//! - A `Lexicon` is immutable after construction; the analyzer receives it
//!   explicitly instead of reading hidden global state.
//! - Weights are signed reals, roughly in `[-5.0, 5.0]`.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Words that flip the sign of later lexicon hits in a token scan.
pub const DEFAULT_NEGATIONS: &[&str] = &[
    "no", "not", "never", "neither", "nor", "none", "nobody", "nothing", "nowhere", "cannot",
    "without",
];

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../review_lexicon.json");
    Lexicon::from_json_str(raw, DEFAULT_NEGATIONS).expect("valid built-in review lexicon")
});

/// Immutable polarity lexicon. Keys are stored lower-case and unique.
#[derive(Debug, Clone)]
pub struct Lexicon {
    weights: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from explicit entries. Keys are lower-cased; a later
    /// duplicate key overwrites an earlier one.
    pub fn new<I, S>(weights: I, negations: &[&str]) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            weights: weights
                .into_iter()
                .map(|(w, v)| (w.into().to_lowercase(), v))
                .collect(),
            negations: negations.iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    /// Parse a flat `{"word": weight}` JSON object.
    pub fn from_json_str(raw: &str, negations: &[&str]) -> anyhow::Result<Self> {
        let weights: HashMap<String, f64> = serde_json::from_str(raw)?;
        Ok(Self::new(weights, negations))
    }

    /// Load a custom lexicon from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P, negations: &[&str]) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow::anyhow!("failed to read lexicon at {}: {}", path.as_ref().display(), e)
        })?;
        Self::from_json_str(&raw, negations)
    }

    /// The embedded default lexicon, parsed once per process.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Polarity weight for an exact (lower-case) word, if present.
    pub fn weight(&self, word: &str) -> Option<f64> {
        self.weights.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    /// Iterate over all `(word, weight)` entries.
    pub fn words(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(w, &v)| (w.as_str(), v))
    }

    pub fn negations(&self) -> impl Iterator<Item = &str> {
        self.negations.iter().map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

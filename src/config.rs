//! # Recommender Configuration
//! Tunables for the ranking pipeline, loaded from TOML with per-field
//! defaults. Path comes from `RECOMMENDER_CONFIG_PATH` (default
//! `config/recommender.toml`); a missing or unreadable file falls back to
//! the built-in defaults so the core stays usable without any config.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/recommender.toml";
pub const ENV_CONFIG_PATH: &str = "RECOMMENDER_CONFIG_PATH";

pub const DEFAULT_TOP_SIMILAR_USERS: usize = 3;
pub const DEFAULT_TOP_DOCTORS: usize = 5;
pub const DEFAULT_FALLBACK_MIN_AVG_RATING: f64 = 3.0;
pub const DEFAULT_FALLBACK_MIN_AVG_POLARITY: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommenderConfig {
    /// How many similar users feed the personalized tier.
    #[serde(default = "default_top_similar_users")]
    pub top_similar_users: usize,
    /// Length of the recommendation list (both tiers).
    #[serde(default = "default_top_doctors")]
    pub top_doctors: usize,
    /// Fallback gate: aggregate rating must be strictly above this.
    #[serde(default = "default_fallback_min_avg_rating")]
    pub fallback_min_avg_rating: f64,
    /// Fallback gate: aggregate polarity must be at least this.
    #[serde(default = "default_fallback_min_avg_polarity")]
    pub fallback_min_avg_polarity: f64,
}

fn default_top_similar_users() -> usize {
    DEFAULT_TOP_SIMILAR_USERS
}
fn default_top_doctors() -> usize {
    DEFAULT_TOP_DOCTORS
}
fn default_fallback_min_avg_rating() -> f64 {
    DEFAULT_FALLBACK_MIN_AVG_RATING
}
fn default_fallback_min_avg_polarity() -> f64 {
    DEFAULT_FALLBACK_MIN_AVG_POLARITY
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_similar_users: DEFAULT_TOP_SIMILAR_USERS,
            top_doctors: DEFAULT_TOP_DOCTORS,
            fallback_min_avg_rating: DEFAULT_FALLBACK_MIN_AVG_RATING,
            fallback_min_avg_polarity: DEFAULT_FALLBACK_MIN_AVG_POLARITY,
        }
    }
}

impl RecommenderConfig {
    /// Parse from a TOML string; list lengths are clamped to at least 1.
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let mut cfg: Self = toml::from_str(raw)?;
        cfg.clamp();
        Ok(cfg)
    }

    /// Load from `RECOMMENDER_CONFIG_PATH` or the default path, falling back
    /// to defaults when the file is missing or malformed.
    pub fn load() -> Self {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        match fs::read_to_string(&path) {
            Ok(raw) => Self::from_toml_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "bad recommender config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    fn clamp(&mut self) {
        self.top_similar_users = self.top_similar_users.max(1);
        self.top_doctors = self.top_doctors.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_policy() {
        let cfg = RecommenderConfig::default();
        assert_eq!(cfg.top_similar_users, 3);
        assert_eq!(cfg.top_doctors, 5);
        assert_eq!(cfg.fallback_min_avg_rating, 3.0);
        assert_eq!(cfg.fallback_min_avg_polarity, 0.0);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = RecommenderConfig::from_toml_str("top_doctors = 10").unwrap();
        assert_eq!(cfg.top_doctors, 10);
        assert_eq!(cfg.top_similar_users, 3);
    }

    #[test]
    fn zero_list_lengths_are_clamped() {
        let cfg =
            RecommenderConfig::from_toml_str("top_doctors = 0\ntop_similar_users = 0").unwrap();
        assert_eq!(cfg.top_doctors, 1);
        assert_eq!(cfg.top_similar_users, 1);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(RecommenderConfig::from_toml_str("top_doctors = 'many'").is_err());
    }
}

//! # Review Intake
//! The single write path of the core: validate the rating domain, derive the
//! polarity score from the review text exactly once, and hand the finished
//! record to the store. Polarity is never recomputed after this point.

use std::sync::Arc;

use tracing::info;

use crate::error::{RecommendError, Result};
use crate::sentiment::SentimentAnalyzer;
use crate::store::{DoctorId, NewReview, ReviewStore, UserId};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub struct ReviewIntake {
    analyzer: SentimentAnalyzer,
    store: Arc<dyn ReviewStore>,
}

impl ReviewIntake {
    pub fn new(analyzer: SentimentAnalyzer, store: Arc<dyn ReviewStore>) -> Self {
        Self { analyzer, store }
    }

    /// Score and persist a review. Returns the polarity stored with it.
    ///
    /// Fails with `InvalidInput` when the rating leaves the 1–5 domain or
    /// the text has no tokens to score.
    pub async fn submit_review(
        &self,
        author: UserId,
        doctor: DoctorId,
        rating: i32,
        text: &str,
    ) -> Result<f64> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(RecommendError::InvalidInput(format!(
                "rating {rating} outside {MIN_RATING}..={MAX_RATING}"
            )));
        }

        let polarity = self.analyzer.score_text(text)?;
        self.store
            .save_review(NewReview {
                author_user_id: author,
                doctor_id: doctor,
                rating,
                text: text.to_string(),
                polarity,
            })
            .await?;

        info!(author, doctor, rating, polarity, "review stored");
        Ok(polarity)
    }
}

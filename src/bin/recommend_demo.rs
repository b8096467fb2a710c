//! Demo that seeds a small clinic fixture in memory and runs both tiers of
//! the recommendation pipeline (stdout/log only).

use std::sync::Arc;

use doctor_recommender::{
    DoctorRankingEngine, DoctorSummary, MemoryStore, RecommenderConfig, ReviewIntake,
    SentimentAnalyzer, SentimentLabel,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let store = Arc::new(MemoryStore::new());
    for (id, name, dept) in [
        (10, "Dr. Adams", "Cardiology"),
        (20, "Dr. Baker", "Dermatology"),
        (30, "Dr. Chen", "Neurology"),
        (40, "Dr. Diaz", "Pediatrics"),
    ] {
        store.add_doctor(DoctorSummary {
            id,
            name: name.into(),
            department: Some(dept.into()),
        });
    }

    let intake = ReviewIntake::new(SentimentAnalyzer::builtin(), Arc::clone(&store) as Arc<_>);
    let seed = [
        (1, 10, 5, "great doctor"),
        (1, 20, 4, "good and friendly"),
        (2, 10, 5, "excellent and caring"),
        (2, 30, 4, "good experience"),
        (3, 40, 2, "rude staff"),
        (3, 30, 5, "wonderful and helpful"),
    ];
    for (author, doctor, rating, text) in seed {
        let polarity = intake.submit_review(author, doctor, rating, text).await?;
        println!(
            "review by user {author} on doctor {doctor}: {text:?} -> polarity {polarity:.2} ({})",
            SentimentLabel::from_score(polarity)
        );
    }

    let engine = DoctorRankingEngine::new(store, RecommenderConfig::load());

    // User 1 has reviews: personalized tier.
    let personalized = engine.recommend(1).await?;
    let doctors = engine.hydrate(personalized.doctor_ids()).await?;
    println!("user 1 -> {personalized:?}");
    for d in doctors {
        println!("  {} ({})", d.name, d.department.unwrap_or_default());
    }

    // User 99 has no reviews: global fallback tier.
    let fallback = engine.recommend(99).await?;
    println!("user 99 -> {fallback:?}");

    println!("recommend-demo done");
    Ok(())
}

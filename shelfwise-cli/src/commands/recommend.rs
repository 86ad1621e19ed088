//! Recommend command implementation

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use shelfwise_core::{
    request_recommendations, BookStore, LlmRecommender, RecommendationOutcome, Settings,
};
use std::time::Duration;

/// Ask the configured model for books similar to the list
pub async fn recommend(store: &BookStore, settings: &Settings) -> Result<()> {
    let recommender =
        LlmRecommender::new(&settings.llm).context("Failed to build recommendation client")?;
    let books = store.list();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Finding recommendations...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = request_recommendations(&books, &recommender).await;
    spinner.finish_and_clear();

    match &outcome {
        RecommendationOutcome::Found { recommendations } => {
            println!("Recommended for you:");
            for title in recommendations {
                println!("  - {}", title);
            }
        }
        other if other.is_error() => bail!("{}", other.message()),
        other => println!("{}", other.message()),
    }

    Ok(())
}

//! Application state

use anyhow::{Context, Result};
use shelfwise_core::storage::JsonRepository;
use shelfwise_core::{BookStore, LlmRecommender, Notice, Recommender, Settings};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The one store for this process; writers hold the lock for the whole
    /// mutation including its write-through
    pub store: Arc<RwLock<BookStore>>,

    /// Backend for recommendation requests
    pub recommender: Arc<dyn Recommender>,

    /// Set while a recommendation request is outstanding
    recommending: Arc<AtomicBool>,
}

impl AppState {
    /// Create application state from settings
    pub async fn new(settings: &Settings) -> Result<Self> {
        tokio::fs::create_dir_all(&settings.storage_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to create storage directory {}",
                    settings.storage_path.display()
                )
            })?;

        let repository = Arc::new(JsonRepository::local(&settings.storage_path));
        let store = BookStore::open(repository).await;
        if let Some(notice) = store.load_notice() {
            tracing::warn!("{}", notice.message());
        }
        tracing::info!(
            "Loaded {} books from {}",
            store.len(),
            settings.storage_path.display()
        );

        let recommender = LlmRecommender::new(&settings.llm)
            .context("Failed to build recommendation client")?;

        Ok(Self::with_parts(store, Arc::new(recommender)))
    }

    /// Assemble state from an opened store and any recommender
    pub fn with_parts(store: BookStore, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            recommender,
            recommending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to store notices
    pub async fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.store.read().await.subscribe()
    }

    /// Claim the single recommendation slot. `None` while another request is
    /// still outstanding; the slot is released when the guard drops.
    pub fn begin_recommendation(&self) -> Option<RecommendationGuard> {
        self.recommending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RecommendationGuard(self.recommending.clone()))
    }
}

pub struct RecommendationGuard(Arc<AtomicBool>);

impl Drop for RecommendationGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

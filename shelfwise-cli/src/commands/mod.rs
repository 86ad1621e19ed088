//! CLI command implementations

mod add;
mod delete;
mod edit;
mod list;
mod recommend;

pub use add::add;
pub use delete::delete;
pub use edit::{progress, update};
pub use list::{genres, list, show};
pub use recommend::recommend;

use anyhow::{Context, Result};
use shelfwise_core::storage::JsonRepository;
use shelfwise_core::{BookStore, Notice, Settings};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Open the store under the configured data directory
pub async fn open_store(settings: &Settings) -> Result<BookStore> {
    tokio::fs::create_dir_all(&settings.storage_path)
        .await
        .with_context(|| {
            format!(
                "Failed to create data directory {}",
                settings.storage_path.display()
            )
        })?;

    let store = BookStore::open(Arc::new(JsonRepository::local(&settings.storage_path))).await;
    if let Some(notice) = store.load_notice() {
        print_notice(notice);
    }
    tracing::debug!(
        "Opened {} books from {}",
        store.len(),
        settings.storage_path.display()
    );
    Ok(store)
}

/// Print every notice queued on `rx`
fn drain_notices(rx: &mut broadcast::Receiver<Notice>) {
    while let Ok(notice) = rx.try_recv() {
        print_notice(&notice);
    }
}

fn print_notice(notice: &Notice) {
    if notice.is_error() {
        eprintln!("{}: {}", notice.title(), notice.message());
    } else {
        println!("{}", notice.message());
    }
}

//! Update and progress commands

use super::drain_notices;
use anyhow::{bail, Result};
use shelfwise_core::{BookStore, BookUpdate};

/// Apply a partial update to a book
pub async fn update(store: &mut BookStore, id: &str, update: BookUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update; pass at least one field");
    }

    let mut notices = store.subscribe();
    if store.update(id, update).await?.is_none() {
        bail!("No book with id {}", id);
    }
    drain_notices(&mut notices);
    Ok(())
}

/// Record the page reached in a book being read
pub async fn progress(
    store: &mut BookStore,
    id: &str,
    current_page: u32,
    total_pages: Option<u32>,
) -> Result<()> {
    let mut notices = store.subscribe();
    let Some(book) = store.update_progress(id, current_page, total_pages).await? else {
        bail!("No book with id {}", id);
    };
    drain_notices(&mut notices);

    if let Some(progress) = book.progress() {
        if progress.total_pages().is_some() {
            println!("{:.0}% read", progress.percent());
        }
    }
    Ok(())
}

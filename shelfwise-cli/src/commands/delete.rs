//! Delete command implementation

use super::drain_notices;
use anyhow::{bail, Result};
use shelfwise_core::BookStore;

/// Remove a book from the list
pub async fn delete(store: &mut BookStore, id: &str) -> Result<()> {
    let mut notices = store.subscribe();
    let removed = store.delete(id).await;
    drain_notices(&mut notices);

    if removed.is_none() {
        bail!("No book with id {}", id);
    }
    Ok(())
}

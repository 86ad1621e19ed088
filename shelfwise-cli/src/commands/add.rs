//! Add command implementation

use super::drain_notices;
use anyhow::Result;
use shelfwise_core::{BookStore, NewBook};

/// Add a book and print its id
pub async fn add(store: &mut BookStore, new_book: NewBook) -> Result<()> {
    let mut notices = store.subscribe();
    let book = store.add(new_book).await?;
    drain_notices(&mut notices);
    println!("id: {}", book.id);
    Ok(())
}

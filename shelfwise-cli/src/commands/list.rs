//! Read-only commands: list, show, genres

use anyhow::{Context, Result};
use shelfwise_core::{Book, BookFilter, BookStore};

/// List books matching `filter`, newest first
pub fn list(store: &BookStore, filter: &BookFilter, json: bool) -> Result<()> {
    let books = store.filter(filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No books found.");
        return Ok(());
    }

    for book in &books {
        println!("{}", summary_line(book));
    }
    println!("\n{} book(s)", books.len());

    Ok(())
}

/// Show every field of one book
pub fn show(store: &BookStore, id: &str, json: bool) -> Result<()> {
    let book = store
        .get(id)
        .with_context(|| format!("No book with id {}", id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(book)?);
        return Ok(());
    }

    println!("Title:    {}", book.title);
    println!("Author:   {}", book.author);
    println!("Genre:    {}", book.genre);
    println!("Status:   {}", book.status().label());
    if let Some(progress) = book.progress() {
        match progress.total_pages() {
            Some(total) => println!(
                "Progress: page {} of {} ({:.0}%)",
                progress.current_page(),
                total,
                progress.percent()
            ),
            None => println!("Progress: page {}", progress.current_page()),
        }
    }
    if let Some(cover) = &book.cover_image {
        println!("Cover:    {}", cover);
    }
    println!("Added:    {}", book.added_date.format("%Y-%m-%d %H:%M"));
    println!("Id:       {}", book.id);

    Ok(())
}

/// Print the distinct genres, sorted
pub fn genres(store: &BookStore) -> Result<()> {
    for genre in store.genres() {
        println!("{}", genre);
    }
    Ok(())
}

fn summary_line(book: &Book) -> String {
    let progress = match book.progress() {
        Some(progress) => match progress.total_pages() {
            Some(total) => format!(" [{}/{}]", progress.current_page(), total),
            None => format!(" [p. {}]", progress.current_page()),
        },
        None => String::new(),
    };
    format!(
        "{}  {} by {} ({}) - {}{}",
        book.id,
        book.title,
        book.author,
        book.genre,
        book.status().label(),
        progress
    )
}

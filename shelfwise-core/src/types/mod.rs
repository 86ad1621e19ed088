//! Core types for the reading list

mod book;
mod filter;
mod shelf;

pub use book::{Book, BookUpdate, NewBook, AUTHOR_MAX_LEN, GENRE_MAX_LEN, TITLE_MAX_LEN};
pub use filter::BookFilter;
pub use shelf::{Progress, Shelf, Status};

//! ShelfWise CLI - Command-line interface for a personal reading list

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shelfwise_core::{Settings, Status};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse a reading status (`to-read`, `reading`, `finished`)
fn parse_status(s: &str) -> Result<Status, String> {
    s.parse().map_err(|e: shelfwise_core::ValidationError| e.to_string())
}

#[derive(Parser)]
#[command(name = "shelfwise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the book list
    #[arg(long, global = true, env = "SHELFWISE_STORAGE_PATH")]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book to the list
    Add {
        title: String,

        #[arg(short, long)]
        author: String,

        #[arg(short, long)]
        genre: String,

        /// to-read, reading or finished
        #[arg(short, long, default_value = "to-read", value_parser = parse_status)]
        status: Status,

        /// Cover image URL
        #[arg(long)]
        cover: Option<String>,

        /// Current page (reading only)
        #[arg(long)]
        current: Option<u32>,

        /// Total pages (reading only)
        #[arg(long)]
        total: Option<u32>,
    },

    /// List books, most recently added first
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,

        /// Exact genre
        #[arg(long)]
        genre: Option<String>,

        /// Search titles and authors
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one book
    Show {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change fields of a book
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,

        /// Cover image URL
        #[arg(long, conflicts_with = "clear_cover")]
        cover: Option<String>,

        /// Remove the cover image
        #[arg(long)]
        clear_cover: bool,

        #[arg(long)]
        current: Option<u32>,

        #[arg(long)]
        total: Option<u32>,
    },

    /// Record reading progress
    Progress {
        id: String,

        /// Page reached
        #[arg(long)]
        current: u32,

        /// Total pages, if it changed
        #[arg(long)]
        total: Option<u32>,
    },

    /// Remove a book
    Delete { id: String },

    /// List the genres in use
    Genres,

    /// Ask for recommendations based on the list
    Recommend,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "shelfwise_cli=debug,shelfwise_core=debug"
    } else {
        "shelfwise_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut settings = Settings::from_env();
    if let Some(dir) = cli.data_dir {
        settings.storage_path = dir;
    }

    let mut store = commands::open_store(&settings).await?;

    match cli.command {
        Commands::Add {
            title,
            author,
            genre,
            status,
            cover,
            current,
            total,
        } => {
            let mut new_book = shelfwise_core::NewBook::new(title, author, genre)
                .with_status(status)
                .with_pages(current, total);
            new_book.cover_image = cover;
            commands::add(&mut store, new_book).await
        }

        Commands::List {
            status,
            genre,
            search,
            json,
        } => {
            let filter = shelfwise_core::BookFilter {
                status,
                genre,
                search,
            };
            commands::list(&store, &filter, json)
        }

        Commands::Show { id, json } => commands::show(&store, &id, json),

        Commands::Update {
            id,
            title,
            author,
            genre,
            status,
            cover,
            clear_cover,
            current,
            total,
        } => {
            let update = shelfwise_core::BookUpdate {
                title,
                author,
                genre,
                status,
                cover_image: if clear_cover { Some(None) } else { cover.map(Some) },
                current_page: current,
                total_pages: total.map(Some),
            };
            commands::update(&mut store, &id, update).await
        }

        Commands::Progress { id, current, total } => {
            commands::progress(&mut store, &id, current, total).await
        }

        Commands::Delete { id } => commands::delete(&mut store, &id).await,

        Commands::Genres => commands::genres(&store),

        Commands::Recommend => commands::recommend(&store, &settings).await,
    }
}

//! User-facing notifications emitted by the book store

use serde::Serialize;

/// Something the user should be told about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    BookAdded { id: String, title: String },
    BookUpdated { id: String, title: String },
    BookDeleted { id: String, title: String },
    ProgressUpdated { id: String, title: String },
    LoadFailed { reason: String },
    SaveFailed { reason: String },
}

impl Notice {
    /// Short heading, e.g. for a toast title or SSE event name
    pub fn title(&self) -> &'static str {
        match self {
            Notice::BookAdded { .. } => "Book Added",
            Notice::BookUpdated { .. } => "Book Updated",
            Notice::BookDeleted { .. } => "Book Deleted",
            Notice::ProgressUpdated { .. } => "Progress Updated",
            Notice::LoadFailed { .. } | Notice::SaveFailed { .. } => "Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::BookAdded { title, .. } => {
                format!("\"{}\" has been added to your list.", title)
            }
            Notice::BookUpdated { title, .. } => format!("\"{}\" has been updated.", title),
            Notice::BookDeleted { title, .. } => format!("\"{}\" has been removed.", title),
            Notice::ProgressUpdated { title, .. } => format!("Progress for \"{}\" saved.", title),
            Notice::LoadFailed { .. } => "Could not load books from storage.".to_string(),
            Notice::SaveFailed { .. } => "Could not save books to storage.".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::LoadFailed { .. } | Notice::SaveFailed { .. })
    }

    /// Machine-readable event name
    pub fn kind(&self) -> &'static str {
        match self {
            Notice::BookAdded { .. } => "book_added",
            Notice::BookUpdated { .. } => "book_updated",
            Notice::BookDeleted { .. } => "book_deleted",
            Notice::ProgressUpdated { .. } => "progress_updated",
            Notice::LoadFailed { .. } => "load_failed",
            Notice::SaveFailed { .. } => "save_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_title() {
        let notice = Notice::BookAdded {
            id: "1".to_string(),
            title: "Dune".to_string(),
        };
        assert_eq!(notice.message(), "\"Dune\" has been added to your list.");
        assert!(!notice.is_error());

        let notice = Notice::SaveFailed {
            reason: "disk full".to_string(),
        };
        assert!(notice.is_error());
        assert_eq!(notice.title(), "Error");
    }

    #[test]
    fn test_serialized_kind_matches() {
        let notice = Notice::BookDeleted {
            id: "1".to_string(),
            title: "Emma".to_string(),
        };
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["kind"], notice.kind());
        assert_eq!(json["title"], "Emma");
    }
}

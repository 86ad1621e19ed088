//! Reading status and page progress

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a book sits on the reading list, without progress data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    ToRead,
    Reading,
    Finished,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::ToRead, Status::Reading, Status::Finished];

    /// Wire/storage spelling (`to-read`, `reading`, `finished`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ToRead => "to-read",
            Status::Reading => "reading",
            Status::Finished => "finished",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Status::ToRead => "Want to Read",
            Status::Reading => "Currently Reading",
            Status::Finished => "Finished",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// Page progress for a book that is currently being read
///
/// Construct through [`Progress::new`], which enforces `1 <= total` and
/// `current <= total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default)]
    current_page: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_pages: Option<u32>,
}

impl Progress {
    pub fn new(current_page: u32, total_pages: Option<u32>) -> Result<Self, ValidationError> {
        match total_pages {
            Some(0) => Err(ValidationError::ZeroTotalPages),
            Some(total) if current_page > total => Err(ValidationError::PageOutOfRange {
                current: current_page,
                total,
            }),
            _ => Ok(Self {
                current_page,
                total_pages,
            }),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Percentage read, or 0 when the total is unknown
    pub fn percent(&self) -> f64 {
        match self.total_pages {
            Some(total) if total > 0 => f64::from(self.current_page) / f64::from(total) * 100.0,
            _ => 0.0,
        }
    }
}

/// Status together with the data that only exists in that status.
///
/// Serialized inline into the book record as `status` plus optional
/// `currentPage` / `totalPages` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Shelf {
    #[default]
    ToRead,
    Reading(Progress),
    Finished,
}

impl Shelf {
    /// Build a shelf from loose form-style input.
    ///
    /// Reading books default to page 0; page input for any other status is
    /// dropped.
    pub fn from_parts(
        status: Status,
        current_page: Option<u32>,
        total_pages: Option<u32>,
    ) -> Result<Self, ValidationError> {
        match status {
            Status::ToRead => Ok(Shelf::ToRead),
            Status::Finished => Ok(Shelf::Finished),
            Status::Reading => Ok(Shelf::Reading(Progress::new(
                current_page.unwrap_or(0),
                total_pages,
            )?)),
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Shelf::ToRead => Status::ToRead,
            Shelf::Reading(_) => Status::Reading,
            Shelf::Finished => Status::Finished,
        }
    }

    pub fn progress(&self) -> Option<&Progress> {
        match self {
            Shelf::Reading(progress) => Some(progress),
            _ => None,
        }
    }
}

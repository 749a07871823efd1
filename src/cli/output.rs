//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::HydratedNote;
use crate::notebook::TagUsage;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain IDs, one per line
    Ids,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
}

impl From<&HydratedNote> for NoteListing {
    fn from(note: &HydratedNote) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            tags: note.tags().iter().map(|t| t.label().to_string()).collect(),
        }
    }
}

/// A tag with optional count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl TagListing {
    pub fn new(usage: &TagUsage, with_count: bool) -> Self {
        Self {
            id: usage.tag().id().to_string(),
            label: usage.tag().label().to_string(),
            count: with_count.then_some(usage.count()),
        }
    }
}

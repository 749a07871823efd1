//! Tag type for categorizing notes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named label usable to categorize notes.
///
/// Tags live in a flat vocabulary and are referenced from notes by `id`.
/// The `id` never changes after creation; only the `label` is editable.
///
/// Labels are not required to be unique, and no validation is applied to
/// either field. Two tags with the same label are distinct tags.
///
/// # Examples
///
/// ```
/// use tagnote::domain::Tag;
///
/// let tag = Tag::new("t1", "work");
/// assert_eq!(tag.id(), "t1");
/// assert_eq!(tag.label(), "work");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    id: String,
    label: String,
}

impl Tag {
    /// Creates a tag from an already generated id and a label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Returns the tag's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the tag's display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns a copy of this tag with a different label and the same id.
    pub fn relabeled(&self, label: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            label: label.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

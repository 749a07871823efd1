//! Note records: the persisted raw form, the mutation payload, and the
//! hydrated read model.

use crate::domain::Tag;
use serde::{Deserialize, Serialize};

/// A note as persisted under the `NOTES` key.
///
/// Tags are referenced by id only. An id in `tag_ids` may no longer exist in
/// the tag vocabulary (for example after the tag was deleted); such dangling
/// references are kept as-is and skipped when the note is hydrated.
///
/// Serializes to `{"id", "title", "markdown", "tagIds"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNote {
    id: String,
    title: String,
    markdown: String,
    tag_ids: Vec<String>,
}

impl RawNote {
    /// Creates a raw note from its parts.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        markdown: impl Into<String>,
        tag_ids: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            markdown: markdown.into(),
            tag_ids,
        }
    }

    /// Builds the raw form of `data` under the given id.
    ///
    /// Tag objects are projected to their ids; the tags themselves are not
    /// checked against any vocabulary.
    pub fn from_data(id: impl Into<String>, data: NoteData) -> Self {
        let tag_ids = data.tags.iter().map(|t| t.id().to_string()).collect();
        Self::new(id, data.title, data.markdown, tag_ids)
    }

    /// Returns a copy with title, body and tag ids replaced by `data`.
    ///
    /// Tag ids are overwritten wholesale: tags absent from `data` are dropped.
    pub fn with_data(&self, data: NoteData) -> Self {
        Self::from_data(self.id.clone(), data)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Returns the referenced tag ids, including dangling ones.
    pub fn tag_ids(&self) -> &[String] {
        &self.tag_ids
    }
}

/// The payload of a create or update request: a hydrated note without an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteData {
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

impl NoteData {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
            tags,
        }
    }
}

/// A note with its tag ids resolved against the current tag vocabulary.
///
/// Derived from a [`RawNote`] and the tag collection; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HydratedNote {
    id: String,
    title: String,
    markdown: String,
    tags: Vec<Tag>,
}

impl HydratedNote {
    pub(crate) fn new(raw: &RawNote, tags: Vec<Tag>) -> Self {
        Self {
            id: raw.id.clone(),
            title: raw.title.clone(),
            markdown: raw.markdown.clone(),
            tags,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Returns the resolved tags, in the order of the note's tag ids.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns true if one of the resolved tags has the given id.
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t.id() == tag_id)
    }

    /// Converts back into a mutation payload, e.g. to re-submit on edit.
    pub fn to_data(&self) -> NoteData {
        NoteData::new(self.title.clone(), self.markdown.clone(), self.tags.clone())
    }
}

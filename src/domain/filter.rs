//! Browse filter over hydrated notes.

use crate::domain::HydratedNote;

/// Selects notes by title substring and by tags.
///
/// A note matches when both hold:
/// - its title contains `title` case-insensitively (no query matches all)
/// - every id in `tag_ids` is among its resolved tags (AND logic)
///
/// The filter runs on hydrated notes, so a tag that has been deleted from
/// the vocabulary never matches even if a note still references it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub title: Option<String>,
    pub tag_ids: Vec<String>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, query: impl Into<String>) -> Self {
        self.title = Some(query.into());
        self
    }

    pub fn tag(mut self, tag_id: impl Into<String>) -> Self {
        self.tag_ids.push(tag_id.into());
        self
    }

    /// Returns true if the filter selects everything.
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().is_none_or(|q| q.trim().is_empty()) && self.tag_ids.is_empty()
    }

    pub fn matches(&self, note: &HydratedNote) -> bool {
        self.matches_title(note) && self.tag_ids.iter().all(|id| note.has_tag(id))
    }

    fn matches_title(&self, note: &HydratedNote) -> bool {
        match self.title.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => note
                .title()
                .to_lowercase()
                .contains(&query.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawNote, Tag, hydrate_note};

    fn hydrated(title: &str, tag_ids: &[&str], vocab: &[Tag]) -> HydratedNote {
        let raw = RawNote::new(
            "n1",
            title,
            "",
            tag_ids.iter().map(|s| s.to_string()).collect(),
        );
        hydrate_note(&raw, vocab)
    }

    fn vocab() -> Vec<Tag> {
        vec![Tag::new("t1", "work"), Tag::new("t2", "home")]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = NoteFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&hydrated("Anything", &[], &vocab())));
    }

    #[test]
    fn blank_title_query_is_empty() {
        assert!(NoteFilter::new().title("   ").is_empty());
    }

    #[test]
    fn title_match_is_case_insensitive_substring() {
        let filter = NoteFilter::new().title("PLAN");
        assert!(filter.matches(&hydrated("Weekly planning", &[], &vocab())));
        assert!(!filter.matches(&hydrated("Groceries", &[], &vocab())));
    }

    #[test]
    fn tags_use_and_logic() {
        let filter = NoteFilter::new().tag("t1").tag("t2");
        assert!(filter.matches(&hydrated("A", &["t2", "t1"], &vocab())));
        assert!(!filter.matches(&hydrated("A", &["t1"], &vocab())));
    }

    #[test]
    fn deleted_tag_never_matches() {
        let filter = NoteFilter::new().tag("t1");
        let without_t1 = vec![Tag::new("t2", "home")];
        assert!(!filter.matches(&hydrated("A", &["t1"], &without_t1)));
    }

    #[test]
    fn title_and_tags_combine() {
        let filter = NoteFilter::new().title("plan").tag("t1");
        assert!(filter.matches(&hydrated("Plan", &["t1"], &vocab())));
        assert!(!filter.matches(&hydrated("Plan", &["t2"], &vocab())));
        assert!(!filter.matches(&hydrated("Other", &["t1"], &vocab())));
    }
}

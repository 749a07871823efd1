//! Derivation of hydrated notes from raw notes and the tag vocabulary.

use std::collections::{HashMap, HashSet};

use crate::domain::{HydratedNote, RawNote, Tag};

/// Resolves one note's tag ids against `tags`.
///
/// Resolved tags follow the order of the note's `tag_ids`. Ids with no
/// matching tag are skipped, a repeated id resolves once, and when the
/// vocabulary holds several tags with the same id the first one is used.
pub fn hydrate_note(note: &RawNote, tags: &[Tag]) -> HydratedNote {
    let by_id = index_tags(tags);
    hydrate_with(note, &by_id)
}

/// Hydrates every note, preserving note order.
///
/// This is a pure function of its inputs; callers re-run it whenever either
/// collection changes.
pub fn derive_hydrated(notes: &[RawNote], tags: &[Tag]) -> Vec<HydratedNote> {
    let by_id = index_tags(tags);
    notes.iter().map(|n| hydrate_with(n, &by_id)).collect()
}

fn index_tags(tags: &[Tag]) -> HashMap<&str, &Tag> {
    let mut by_id = HashMap::with_capacity(tags.len());
    for tag in tags {
        by_id.entry(tag.id()).or_insert(tag);
    }
    by_id
}

fn hydrate_with(note: &RawNote, by_id: &HashMap<&str, &Tag>) -> HydratedNote {
    let mut seen = HashSet::new();
    let resolved = note
        .tag_ids()
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| by_id.get(id.as_str()).map(|t| (*t).clone()))
        .collect();
    HydratedNote::new(note, resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(id: &str, tag_ids: &[&str]) -> RawNote {
        RawNote::new(
            id,
            format!("title {id}"),
            "body",
            tag_ids.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn ids(h: &HydratedNote) -> Vec<&str> {
        h.tags().iter().map(|t| t.id()).collect()
    }

    #[test]
    fn note_without_tags_hydrates_to_empty() {
        let h = hydrate_note(&note("n1", &[]), &[Tag::new("t1", "work")]);
        assert!(h.tags().is_empty());
    }

    #[test]
    fn follows_tag_id_order_not_vocabulary_order() {
        let tags = vec![
            Tag::new("t1", "a"),
            Tag::new("t2", "b"),
            Tag::new("t3", "c"),
        ];
        let h = hydrate_note(&note("n1", &["t3", "t1"]), &tags);
        assert_eq!(ids(&h), vec!["t3", "t1"]);
    }

    #[test]
    fn dangling_ids_are_skipped() {
        let tags = vec![Tag::new("t1", "a")];
        let h = hydrate_note(&note("n1", &["gone", "t1", "also-gone"]), &tags);
        assert_eq!(ids(&h), vec!["t1"]);
    }

    #[test]
    fn all_dangling_yields_empty_not_error() {
        let h = hydrate_note(&note("n1", &["t1"]), &[]);
        assert!(h.tags().is_empty());
        assert_eq!(h.title(), "title n1");
    }

    #[test]
    fn repeated_tag_id_resolves_once() {
        let tags = vec![Tag::new("t1", "a")];
        let h = hydrate_note(&note("n1", &["t1", "t1"]), &tags);
        assert_eq!(ids(&h), vec!["t1"]);
    }

    #[test]
    fn duplicate_vocabulary_id_uses_first_tag() {
        let tags = vec![Tag::new("t1", "first"), Tag::new("t1", "second")];
        let h = hydrate_note(&note("n1", &["t1"]), &tags);
        assert_eq!(h.tags(), [Tag::new("t1", "first")]);
    }

    #[test]
    fn resolved_tags_carry_current_labels() {
        let n = note("n1", &["t1"]);
        let before = hydrate_note(&n, &[Tag::new("t1", "work")]);
        let after = hydrate_note(&n, &[Tag::new("t1", "job")]);
        assert_eq!(before.tags()[0].label(), "work");
        assert_eq!(after.tags()[0].label(), "job");
    }

    #[test]
    fn derive_preserves_note_order_and_fields() {
        let notes = vec![note("n2", &["t1"]), note("n1", &[])];
        let tags = vec![Tag::new("t1", "work")];
        let hydrated = derive_hydrated(&notes, &tags);
        let note_ids: Vec<_> = hydrated.iter().map(|h| h.id()).collect();
        assert_eq!(note_ids, vec!["n2", "n1"]);
        assert_eq!(hydrated[0].markdown(), "body");
        assert_eq!(ids(&hydrated[0]), vec!["t1"]);
    }

    #[test]
    fn resolved_ids_are_intersection_in_tag_id_order() {
        let tags = vec![
            Tag::new("a", "A"),
            Tag::new("b", "B"),
            Tag::new("c", "C"),
        ];
        let n = note("n1", &["c", "x", "a", "y", "b"]);
        let h = hydrate_note(&n, &tags);
        let expected: Vec<&str> = n
            .tag_ids()
            .iter()
            .map(String::as_str)
            .filter(|id| tags.iter().any(|t| t.id() == *id))
            .collect();
        assert_eq!(ids(&h), expected);
    }
}

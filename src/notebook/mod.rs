//! Note/tag repository: owns both collections and writes them through to a
//! key/value store on every mutation.


use std::cell::OnceCell;
use tracing::{debug, info};

use crate::domain::{
    HydratedNote, IdGenerator, NoteData, NoteFilter, RawNote, Tag, UlidGenerator, derive_hydrated,
};
use crate::store::{CorruptPolicy, KeyValueStore, Persisted, StoreResult};

/// Store key of the raw note collection.
pub const NOTES_KEY: &str = "NOTES";

/// Store key of the tag vocabulary.
pub const TAGS_KEY: &str = "TAGS";

/// A tag together with the number of notes referencing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUsage {
    tag: Tag,
    count: usize,
}

impl TagUsage {
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// The note/tag repository.
///
/// Holds `notes` (raw form, tags referenced by id) and `tags` (the flat
/// vocabulary). Every mutation rewrites the affected collection in full to
/// the store before returning; a failed write leaves the in-memory
/// collection as it was.
///
/// Operations targeting an unknown id are no-ops over the collection (they
/// still write it through) and report `false`. Deleting a tag never touches
/// notes: their `tag_ids` keep the dangling id, which hydration skips.
///
/// # Examples
///
/// ```
/// use tagnote::domain::{NoteData, SequentialIdGenerator, Tag};
/// use tagnote::notebook::Notebook;
/// use tagnote::store::{CorruptPolicy, MemoryStore};
///
/// let mut notebook = Notebook::open(
///     MemoryStore::new(),
///     SequentialIdGenerator::new("n"),
///     CorruptPolicy::Fail,
/// )
/// .unwrap();
///
/// let work = Tag::new("t1", "work");
/// notebook.add_tag(work.clone()).unwrap();
/// notebook
///     .create_note(NoteData::new("Plan", "Do X", vec![work]))
///     .unwrap();
///
/// notebook.delete_tag("t1").unwrap();
/// assert_eq!(notebook.notes()[0].tag_ids(), ["t1".to_string()]);
/// assert!(notebook.hydrated()[0].tags().is_empty());
/// ```
#[derive(Debug)]
pub struct Notebook<S, G = UlidGenerator> {
    store: S,
    ids: G,
    notes: Persisted<Vec<RawNote>>,
    tags: Persisted<Vec<Tag>>,
    hydrated: OnceCell<Vec<HydratedNote>>,
}

impl<S: KeyValueStore, G: IdGenerator> Notebook<S, G> {
    /// Loads both collections from `store`, defaulting to empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` if a stored collection cannot be parsed
    /// and `policy` is [`CorruptPolicy::Fail`], or any store error.
    pub fn open(mut store: S, ids: G, policy: CorruptPolicy) -> StoreResult<Self> {
        let notes = Persisted::load(&mut store, NOTES_KEY, Vec::new(), policy)?;
        let tags = Persisted::load(&mut store, TAGS_KEY, Vec::new(), policy)?;
        debug!(
            notes = notes.get().len(),
            tags = tags.get().len(),
            "opened notebook"
        );
        Ok(Self {
            store,
            ids,
            notes,
            tags,
            hydrated: OnceCell::new(),
        })
    }

    // ===========================================
    // Read models
    // ===========================================

    /// Returns the raw notes in insertion order.
    pub fn notes(&self) -> &[RawNote] {
        self.notes.get()
    }

    /// Returns the tag vocabulary in insertion order.
    pub fn tags(&self) -> &[Tag] {
        self.tags.get()
    }

    /// Returns the first tag with the given id.
    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags().iter().find(|t| t.id() == id)
    }

    /// Returns every note with its tags resolved.
    ///
    /// The result is computed on first access after a mutation and reused
    /// until the next mutation.
    pub fn hydrated(&self) -> &[HydratedNote] {
        self.hydrated
            .get_or_init(|| derive_hydrated(self.notes.get(), self.tags.get()))
    }

    /// Returns one hydrated note by id.
    pub fn note(&self, id: &str) -> Option<&HydratedNote> {
        self.hydrated().iter().find(|n| n.id() == id)
    }

    /// Returns the hydrated notes selected by `filter`.
    pub fn filtered(&self, filter: &NoteFilter) -> Vec<&HydratedNote> {
        self.hydrated()
            .iter()
            .filter(|n| filter.matches(n))
            .collect()
    }

    /// Returns each vocabulary tag with the number of notes referencing it.
    pub fn tag_usage(&self) -> Vec<TagUsage> {
        self.tags()
            .iter()
            .map(|tag| TagUsage {
                tag: tag.clone(),
                count: self.referencing_notes(tag.id()),
            })
            .collect()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the notebook, returning the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    // ===========================================
    // Note mutations
    // ===========================================

    /// Appends a new note built from `data` and returns its id.
    ///
    /// The tags in `data` are stored by id only and are not checked against
    /// the vocabulary.
    pub fn create_note(&mut self, data: NoteData) -> StoreResult<String> {
        let id = self.ids.new_id();
        let note = RawNote::from_data(id.clone(), data);
        self.notes.update(&mut self.store, |prev| {
            let mut next = prev.clone();
            next.push(note);
            next
        })?;
        self.invalidate();
        debug!(id = %id, "created note");
        Ok(id)
    }

    /// Replaces the title, body and tags of the note with `id`.
    ///
    /// Tags are overwritten, not merged. Returns `false` if no note has `id`.
    pub fn update_note(&mut self, id: &str, data: NoteData) -> StoreResult<bool> {
        let found = self.notes().iter().any(|n| n.id() == id);
        self.notes.update(&mut self.store, |prev| {
            prev.iter()
                .map(|n| {
                    if n.id() == id {
                        n.with_data(data.clone())
                    } else {
                        n.clone()
                    }
                })
                .collect()
        })?;
        self.invalidate();
        debug!(id, found, "updated note");
        Ok(found)
    }

    /// Removes the note with `id`. Returns `false` if no note has `id`.
    pub fn delete_note(&mut self, id: &str) -> StoreResult<bool> {
        let found = self.notes().iter().any(|n| n.id() == id);
        self.notes.update(&mut self.store, |prev| {
            prev.iter().filter(|n| n.id() != id).cloned().collect()
        })?;
        self.invalidate();
        debug!(id, found, "deleted note");
        Ok(found)
    }

    // ===========================================
    // Tag mutations
    // ===========================================

    /// Appends `tag` to the vocabulary without any uniqueness check.
    pub fn add_tag(&mut self, tag: Tag) -> StoreResult<()> {
        debug!(id = tag.id(), label = tag.label(), "adding tag");
        self.tags.update(&mut self.store, |prev| {
            let mut next = prev.clone();
            next.push(tag);
            next
        })?;
        self.invalidate();
        Ok(())
    }

    /// Generates an id for a new tag with `label` and adds it.
    pub fn create_tag(&mut self, label: impl Into<String>) -> StoreResult<Tag> {
        let tag = Tag::new(self.ids.new_id(), label);
        self.add_tag(tag.clone())?;
        Ok(tag)
    }

    /// Resolves each label to the first tag carrying exactly that label,
    /// creating tags for labels not yet in the vocabulary.
    ///
    /// Labels are trimmed; blank labels are ignored and a label given twice
    /// yields one tag.
    pub fn find_or_create_tags<I, L>(&mut self, labels: I) -> StoreResult<Vec<Tag>>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut resolved: Vec<Tag> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            let tag = match self.tags().iter().find(|t| t.label() == label) {
                Some(existing) => existing.clone(),
                None => self.create_tag(label)?,
            };
            if !resolved.iter().any(|t| t.id() == tag.id()) {
                resolved.push(tag);
            }
        }
        Ok(resolved)
    }

    /// Changes the label of the tag with `id`; its id and every note are left
    /// untouched. Returns `false` if no tag has `id`.
    pub fn rename_tag(&mut self, id: &str, label: &str) -> StoreResult<bool> {
        let found = self.tag(id).is_some();
        self.tags.update(&mut self.store, |prev| {
            prev.iter()
                .map(|t| {
                    if t.id() == id {
                        t.relabeled(label)
                    } else {
                        t.clone()
                    }
                })
                .collect()
        })?;
        self.invalidate();
        debug!(id, label, found, "renamed tag");
        Ok(found)
    }

    /// Removes the tag with `id` from the vocabulary.
    ///
    /// Notes referencing it keep the id in their `tag_ids`. Returns `false`
    /// if no tag has `id`.
    pub fn delete_tag(&mut self, id: &str) -> StoreResult<bool> {
        let found = self.tag(id).is_some();
        self.tags.update(&mut self.store, |prev| {
            prev.iter().filter(|t| t.id() != id).cloned().collect()
        })?;
        self.invalidate();

        let dangling = self.referencing_notes(id);
        if found && dangling > 0 {
            info!(id, notes = dangling, "deleted tag is still referenced by notes");
        }
        Ok(found)
    }

    fn referencing_notes(&self, tag_id: &str) -> usize {
        self.notes()
            .iter()
            .filter(|n| n.tag_ids().iter().any(|t| t == tag_id))
            .count()
    }

    fn invalidate(&mut self) {
        self.hydrated.take();
    }
}

//! Note and tag resolution from user-supplied identifiers.

use anyhow::{Result, bail};

use crate::domain::{HydratedNote, IdGenerator, Tag};
use crate::notebook::Notebook;
use crate::store::KeyValueStore;

/// Minimum length for an identifier to be tried as an ID prefix.
const MIN_PREFIX_LEN: usize = 4;

/// Result of resolving an identifier.
#[derive(Debug)]
pub enum ResolveResult<'a, T> {
    /// Exactly one item matched.
    Unique(&'a T),
    /// Multiple items matched (ambiguous).
    Ambiguous(Vec<&'a T>),
    /// Nothing matched.
    NotFound,
}

/// Resolves a note identifier.
///
/// Resolution order:
/// 1. Exact ID match
/// 2. ID prefix match (a single prefix match wins immediately)
/// 3. Exact title match
pub fn resolve_note<'a, S, G>(
    notebook: &'a Notebook<S, G>,
    identifier: &str,
) -> ResolveResult<'a, HydratedNote>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    resolve(
        notebook.hydrated(),
        identifier.trim(),
        |n| n.id(),
        |n| n.title(),
    )
}

/// Resolves a tag identifier: exact ID, then ID prefix, then exact label.
pub fn resolve_tag<'a, S, G>(
    notebook: &'a Notebook<S, G>,
    identifier: &str,
) -> ResolveResult<'a, Tag>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    resolve(notebook.tags(), identifier.trim(), |t| t.id(), |t| t.label())
}

fn resolve<'a, T>(
    items: &'a [T],
    identifier: &str,
    id_of: impl Fn(&T) -> &str,
    name_of: impl Fn(&T) -> &str,
) -> ResolveResult<'a, T> {
    if identifier.is_empty() {
        return ResolveResult::NotFound;
    }

    if let Some(exact) = items.iter().find(|i| id_of(*i) == identifier) {
        return ResolveResult::Unique(exact);
    }

    let mut candidates: Vec<&T> = Vec::new();

    if identifier.len() >= MIN_PREFIX_LEN {
        let by_prefix: Vec<&T> = items
            .iter()
            .filter(|i| id_of(*i).starts_with(identifier))
            .collect();
        if let [only] = by_prefix.as_slice() {
            return ResolveResult::Unique(*only);
        }
        candidates.extend(by_prefix);
    }

    candidates.extend(items.iter().filter(|i| name_of(*i) == identifier));

    // Deduplicate by ID, keeping first occurrence
    let mut seen = std::collections::HashSet::new();
    candidates.retain(|c| seen.insert(id_of(*c).to_string()));

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates[0]),
        _ => ResolveResult::Ambiguous(candidates),
    }
}

/// Resolves a note or fails with a message listing the candidates.
pub(crate) fn require_note<'a, S, G>(
    notebook: &'a Notebook<S, G>,
    identifier: &str,
) -> Result<&'a HydratedNote>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    match resolve_note(notebook, identifier) {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::NotFound => bail!("note not found: {}", identifier),
        ResolveResult::Ambiguous(notes) => {
            let lines: Vec<String> = notes
                .iter()
                .map(|n| format!("  {} - {}", n.id(), n.title()))
                .collect();
            bail!(
                "ambiguous: '{}' matches {} notes:\n{}\nUse the ID to specify which note you mean.",
                identifier,
                notes.len(),
                lines.join("\n")
            )
        }
    }
}

/// Resolves a tag or fails with a message listing the candidates.
pub(crate) fn require_tag<'a, S, G>(
    notebook: &'a Notebook<S, G>,
    identifier: &str,
) -> Result<&'a Tag>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    match resolve_tag(notebook, identifier) {
        ResolveResult::Unique(tag) => Ok(tag),
        ResolveResult::NotFound => bail!("tag not found: {}", identifier),
        ResolveResult::Ambiguous(tags) => {
            let lines: Vec<String> = tags
                .iter()
                .map(|t| format!("  {} - {}", t.id(), t.label()))
                .collect();
            bail!(
                "ambiguous: '{}' matches {} tags:\n{}\nUse the ID to specify which tag you mean.",
                identifier,
                tags.len(),
                lines.join("\n")
            )
        }
    }
}

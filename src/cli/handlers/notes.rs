//! Note command handlers (new, ls, show, edit, rm).

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::resolve::{require_note, require_tag};
use super::{edit_text, open_notebook, short_id, truncate_str};
use crate::cli::config::Config;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::cli::{EditArgs, ListArgs, NewArgs, RemoveArgs, ShowArgs};
use crate::domain::{IdGenerator, NoteData, NoteFilter};
use crate::notebook::Notebook;
use crate::store::KeyValueStore;

/// How an edit treats the note's tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagChange {
    /// Re-submit the tags the note currently resolves to.
    Keep,
    /// Replace with these labels (unknown labels are created).
    Replace(Vec<String>),
    /// Remove every tag.
    Clear,
}

/// Requested changes to an existing note. `None` keeps the current value.
#[derive(Debug, Clone)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub markdown: Option<String>,
    pub tags: TagChange,
}

impl TagChange {
    pub fn from_args(labels: &[String], clear: bool) -> Self {
        if clear {
            TagChange::Clear
        } else if labels.is_empty() {
            TagChange::Keep
        } else {
            TagChange::Replace(labels.to_vec())
        }
    }
}

fn validate_title(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        bail!("title cannot be empty");
    }
    Ok(trimmed)
}

/// Creates a note, resolving tag labels to existing tags or creating them.
///
/// Returns the new note's id.
///
/// # Errors
///
/// Returns an error if the title is blank or a write fails.
pub fn create_note<S, G>(
    notebook: &mut Notebook<S, G>,
    title: &str,
    markdown: &str,
    labels: &[String],
) -> Result<String>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    let title = validate_title(title)?;
    let tags = notebook
        .find_or_create_tags(labels)
        .with_context(|| "failed to save tags")?;
    let id = notebook
        .create_note(NoteData::new(title, markdown, tags))
        .with_context(|| "failed to save note")?;
    Ok(id)
}

/// Applies `changes` to the note with `id`.
///
/// The update is a full overwrite: with [`TagChange::Keep`] the tags the
/// note currently resolves to are written back, which also drops ids of
/// tags that no longer exist.
pub fn edit_note<S, G>(notebook: &mut Notebook<S, G>, id: &str, changes: NoteChanges) -> Result<()>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    let Some(current) = notebook.note(id) else {
        bail!("note not found: {}", id);
    };
    let mut data = current.to_data();

    if let Some(title) = &changes.title {
        data.title = validate_title(title)?.to_string();
    }
    if let Some(markdown) = changes.markdown {
        data.markdown = markdown;
    }
    data.tags = match changes.tags {
        TagChange::Keep => data.tags,
        TagChange::Clear => Vec::new(),
        TagChange::Replace(labels) => notebook
            .find_or_create_tags(&labels)
            .with_context(|| "failed to save tags")?,
    };

    notebook
        .update_note(id, data)
        .with_context(|| "failed to save note")?;
    Ok(())
}

/// Builds a browse filter from a title query and tag identifiers.
pub fn build_filter<S, G>(
    notebook: &Notebook<S, G>,
    title: Option<&str>,
    tags: &[String],
) -> Result<NoteFilter>
where
    S: KeyValueStore,
    G: IdGenerator,
{
    let mut filter = NoteFilter::new();
    if let Some(query) = title {
        filter = filter.title(query);
    }
    for identifier in tags {
        let tag = require_tag(notebook, identifier)?;
        filter = filter.tag(tag.id());
    }
    Ok(filter)
}

/// Renders markdown to HTML.
pub fn render_html(markdown: &str) -> String {
    let parser = pulldown_cmark::Parser::new_ext(markdown, pulldown_cmark::Options::all());
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

pub fn handle_new(args: &NewArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let mut notebook = open_notebook(data_dir, config)?;

    let markdown = if args.edit {
        edit_text(&args.markdown, config)?
    } else {
        args.markdown.clone()
    };

    let id = create_note(&mut notebook, &args.title, &markdown, &args.tags)?;
    let note = notebook
        .note(&id)
        .with_context(|| format!("created note {} is missing", id))?;

    println!("Created: {} [{}]", note.title(), short_id(note.id()));
    if !note.tags().is_empty() {
        let labels: Vec<_> = note.tags().iter().map(|t| t.label()).collect();
        println!("  tags: {}", labels.join(", "));
    }
    Ok(())
}

pub fn handle_list(args: &ListArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let notebook = open_notebook(data_dir, config)?;
    let filter = build_filter(&notebook, args.title.as_deref(), &args.tags)?;
    let notes = notebook.filtered(&filter);

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                for note in &notes {
                    let tags = if note.tags().is_empty() {
                        String::new()
                    } else {
                        let labels: Vec<_> = note.tags().iter().map(|t| t.label()).collect();
                        format!("  [{}]", labels.join(", "))
                    };
                    println!(
                        "{}  {}{}",
                        short_id(note.id()),
                        truncate_str(note.title(), 60),
                        tags
                    );
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(|n| NoteListing::from(*n)).collect();
            let out = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Ids => {
            for note in &notes {
                println!("{}", note.id());
            }
        }
    }
    Ok(())
}

pub fn handle_show(args: &ShowArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let notebook = open_notebook(data_dir, config)?;
    let note = require_note(&notebook, &args.note)?;

    if args.html {
        print!("{}", render_html(note.markdown()));
        return Ok(());
    }

    match args.format.unwrap_or_default() {
        OutputFormat::Human => {
            println!("# {}", note.title());
            println!();
            println!("ID: {}", note.id());
            if !note.tags().is_empty() {
                let labels: Vec<_> = note.tags().iter().map(|t| t.label()).collect();
                println!("Tags: {}", labels.join(", "));
            }
            println!();
            if !note.markdown().is_empty() {
                println!("{}", note.markdown());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(note))?);
        }
        OutputFormat::Ids => println!("{}", note.id()),
    }
    Ok(())
}

pub fn handle_edit(args: &EditArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let mut notebook = open_notebook(data_dir, config)?;
    let (id, current_markdown) = {
        let note = require_note(&notebook, &args.note)?;
        (note.id().to_string(), note.markdown().to_string())
    };

    let markdown = if args.edit {
        Some(edit_text(&current_markdown, config)?)
    } else {
        args.markdown.clone()
    };

    let changes = NoteChanges {
        title: args.title.clone(),
        markdown,
        tags: TagChange::from_args(&args.tags, args.clear_tags),
    };
    edit_note(&mut notebook, &id, changes)?;

    if let Some(note) = notebook.note(&id) {
        println!("Updated: {} [{}]", note.title(), short_id(note.id()));
    }
    Ok(())
}

pub fn handle_remove(args: &RemoveArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let mut notebook = open_notebook(data_dir, config)?;
    let (id, title) = {
        let note = require_note(&notebook, &args.note)?;
        (note.id().to_string(), note.title().to_string())
    };

    notebook
        .delete_note(&id)
        .with_context(|| "failed to save notes")?;

    println!("Deleted: {} [{}]", title, short_id(&id));
    Ok(())
}

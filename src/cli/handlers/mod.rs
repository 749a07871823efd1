//! Command handlers for the CLI.

mod notes;
mod resolve;
mod tags;


use anyhow::{Context, Result, bail};
use clap::CommandFactory;
use std::io::{Read, Write as IoWrite};
use std::path::Path;
use std::process::Command;

use crate::cli::config::Config;
use crate::cli::{Cli, CompletionsArgs};
use crate::domain::UlidGenerator;
use crate::infra::FileStore;
use crate::notebook::Notebook;
use crate::store::StoreError;

// Re-export public items
pub use notes::{
    NoteChanges, TagChange, build_filter, create_note, edit_note, handle_edit, handle_list,
    handle_new, handle_remove, handle_show, render_html,
};
pub use resolve::{ResolveResult, resolve_note, resolve_tag};
pub use tags::{handle_tag, handle_tags};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the notebook stored in `data_dir`.
pub(crate) fn open_notebook(data_dir: &Path, config: &Config) -> Result<Notebook<FileStore>> {
    let store = FileStore::open(data_dir)
        .with_context(|| format!("failed to open data directory {}", data_dir.display()))?;

    match Notebook::open(store, UlidGenerator, config.on_corrupt) {
        Ok(notebook) => Ok(notebook),
        Err(err @ StoreError::Corrupt { .. }) => Err(anyhow::Error::new(err).context(format!(
            "failed to load notes from {}; set on_corrupt = \"quarantine\" in {} to move the damaged data aside",
            data_dir.display(),
            Config::config_path().display()
        ))),
        Err(err) => Err(anyhow::Error::new(err)
            .context(format!("failed to load notes from {}", data_dir.display()))),
    }
}

/// Length of the ID prefix shown in human-readable output: the 10-character
/// ULID timestamp plus 4 random characters.
const SHORT_ID_LEN: usize = 14;

/// Returns the leading characters of an id for display.
pub(crate) fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Opens a file in the user's configured editor.
pub(crate) fn open_in_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = config.editor();

    // Parse editor command (may include args like "code --wait")
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

/// Lets the user edit `initial` in their editor and returns the result.
pub(crate) fn edit_text(initial: &str, config: &Config) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("tagnote-")
        .suffix(".md")
        .tempfile()
        .with_context(|| "failed to create temporary file for editing")?;
    file.write_all(initial.as_bytes())
        .with_context(|| "failed to write temporary file for editing")?;

    open_in_editor(file.path(), config)?;

    let mut edited = String::new();
    std::fs::File::open(file.path())
        .and_then(|mut f| f.read_to_string(&mut edited))
        .with_context(|| "failed to read edited text")?;
    Ok(edited)
}

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "tagnote", &mut std::io::stdout());
    Ok(())
}

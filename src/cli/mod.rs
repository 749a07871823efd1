//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// tagnote - markdown notes organized with tags
#[derive(Parser, Debug)]
#[command(name = "tagnote", version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding NOTES.json and TAGS.json (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// List notes, optionally filtered by title and tags
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note
    Show(ShowArgs),

    /// Change a note's title, body or tags
    Edit(EditArgs),

    /// Delete a note
    #[command(name = "rm")]
    Remove(RemoveArgs),

    /// List all tags
    Tags(TagsArgs),

    /// Manage the tag vocabulary
    #[command(subcommand)]
    Tag(TagCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    pub title: String,

    /// Markdown body
    #[arg(short, long, default_value = "")]
    pub markdown: String,

    /// Tag label (can be specified multiple times; unknown labels are created)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Write the body in your editor
    #[arg(short, long)]
    pub edit: bool,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only notes whose title contains this text (case-insensitive)
    #[arg(long)]
    pub title: Option<String>,

    /// Only notes carrying this tag (can be specified multiple times; AND logic)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID, ID prefix or exact title
    pub note: String,

    /// Render the body as HTML
    #[arg(long, conflicts_with = "format")]
    pub html: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID, ID prefix or exact title
    pub note: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New markdown body
    #[arg(short, long)]
    pub markdown: Option<String>,

    /// Replace the note's tags with these labels (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Remove all tags from the note
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,

    /// Edit the body in your editor
    #[arg(short, long, conflicts_with = "markdown")]
    pub edit: bool,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Note ID, ID prefix or exact title
    pub note: String,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Show note counts for each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Tag vocabulary subcommands
#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Add a tag to the vocabulary
    Add(TagAddArgs),

    /// Rename a tag (notes using it pick up the new label)
    Rename(TagRenameArgs),

    /// Delete a tag (notes keep working, the tag just disappears from them)
    #[command(name = "rm")]
    Remove(TagRemoveArgs),
}

/// Arguments for the `tag add` command
#[derive(Parser, Debug)]
pub struct TagAddArgs {
    /// Label of the new tag
    pub label: String,
}

/// Arguments for the `tag rename` command
#[derive(Parser, Debug)]
pub struct TagRenameArgs {
    /// Tag ID, ID prefix or label
    pub tag: String,

    /// New label
    pub label: String,
}

/// Arguments for the `tag rm` command
#[derive(Parser, Debug)]
pub struct TagRemoveArgs {
    /// Tag ID, ID prefix or label
    pub tag: String,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

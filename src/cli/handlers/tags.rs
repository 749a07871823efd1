//! Tag command handlers (tags, tag add/rename/rm).

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::open_notebook;
use super::resolve::require_tag;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat, TagListing};
use crate::cli::{TagAddArgs, TagCommand, TagRemoveArgs, TagRenameArgs, TagsArgs};

fn validate_label(label: &str) -> Result<&str> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        bail!("tag label cannot be empty");
    }
    Ok(trimmed)
}

pub fn handle_tags(args: &TagsArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let notebook = open_notebook(data_dir, config)?;
    let usage = notebook.tag_usage();

    match args.format {
        OutputFormat::Human => {
            if usage.is_empty() {
                println!("No tags found.");
            } else {
                for u in &usage {
                    if args.counts {
                        println!("{} ({})", u.tag().label(), u.count());
                    } else {
                        println!("{}", u.tag().label());
                    }
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TagListing> = usage
                .iter()
                .map(|u| TagListing::new(u, args.counts))
                .collect();
            let out = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Ids => {
            for u in &usage {
                println!("{}", u.tag().id());
            }
        }
    }
    Ok(())
}

pub fn handle_tag(command: &TagCommand, data_dir: &Path, config: &Config) -> Result<()> {
    match command {
        TagCommand::Add(args) => handle_tag_add(args, data_dir, config),
        TagCommand::Rename(args) => handle_tag_rename(args, data_dir, config),
        TagCommand::Remove(args) => handle_tag_remove(args, data_dir, config),
    }
}

fn handle_tag_add(args: &TagAddArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let label = validate_label(&args.label)?;
    let mut notebook = open_notebook(data_dir, config)?;

    let tag = notebook
        .create_tag(label)
        .with_context(|| "failed to save tags")?;

    println!("Added tag: {} [{}]", tag.label(), tag.id());
    Ok(())
}

fn handle_tag_rename(args: &TagRenameArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let label = validate_label(&args.label)?;
    let mut notebook = open_notebook(data_dir, config)?;
    let tag = require_tag(&notebook, &args.tag)?.clone();

    notebook
        .rename_tag(tag.id(), label)
        .with_context(|| "failed to save tags")?;

    println!("Renamed tag: {} -> {}", tag.label(), label);
    Ok(())
}

fn handle_tag_remove(args: &TagRemoveArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let mut notebook = open_notebook(data_dir, config)?;
    let tag = require_tag(&notebook, &args.tag)?.clone();
    let count = notebook
        .tag_usage()
        .iter()
        .find(|u| u.tag().id() == tag.id())
        .map_or(0, |u| u.count());

    notebook
        .delete_tag(tag.id())
        .with_context(|| "failed to save tags")?;

    println!("Deleted tag: {}", tag.label());
    if count > 0 {
        println!("  {} note(s) still reference this tag", count);
    }
    Ok(())
}

//! tagnote - markdown notes organized with tags

pub mod cli;
pub mod domain;
pub mod infra;
pub mod notebook;
pub mod store;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_completions, handle_edit, handle_list, handle_new, handle_remove, handle_show,
        handle_tag, handle_tags,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    infra::init_tracing(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_ref());

    match &cli.command {
        Command::New(args) => handle_new(args, &data_dir, &config),
        Command::List(args) => handle_list(args, &data_dir, &config),
        Command::Show(args) => handle_show(args, &data_dir, &config),
        Command::Edit(args) => handle_edit(args, &data_dir, &config),
        Command::Remove(args) => handle_remove(args, &data_dir, &config),
        Command::Tags(args) => handle_tags(args, &data_dir, &config),
        Command::Tag(command) => handle_tag(command, &data_dir, &config),
        Command::Completions(args) => handle_completions(args),
    }
}

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{BookmarkCommands, Cli, Commands, ConfigCommands};

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Play { file, speed, start } => commands::play::handle(&file, speed, start),
        Commands::Dump { file, at } => commands::dump::handle(&file, at),
        Commands::Analyze { file } => commands::analyze::handle(&file),
        Commands::Upload { file, url } => commands::upload::handle(&file, url.as_deref()),
        Commands::Bookmarks { file, command } => match command {
            BookmarkCommands::List => commands::bookmarks::handle_list(&file),
            BookmarkCommands::Add { name, at } => {
                commands::bookmarks::handle_add(&file, &name, at)
            }
            BookmarkCommands::Remove { id } => commands::bookmarks::handle_remove(&file, &id),
            BookmarkCommands::Clear => commands::bookmarks::handle_clear(&file),
        },
        Commands::Config(command) => match command {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or(default_level.into()))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

//! CLI Module
//!
//! Read-only access to the stored snippets without opening the popup.

pub mod commands;

use crate::config::Config;
use crate::models::{FileStore, SnippetRepository};
use anyhow::Context;
use colored::Colorize;
use std::error::Error;
use std::io::{self, Write};

/// Executes CLI commands based on the provided arguments
pub fn execute_cli(args: &[String], config: &Config) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(command) = args.first() else {
        print_help(&mut out)?;
        return Ok(());
    };

    match command.as_str() {
        "list" | "ls" => {
            let snippets = open_repository(config)?.load()?;
            commands::list_snippets(&mut out, &snippets, args.get(1).map(String::as_str))?;
        }
        "languages" | "langs" => {
            let snippets = open_repository(config)?.load()?;
            commands::list_languages(&mut out, &snippets)?;
        }
        "show" | "view" | "cat" => {
            let Some(title) = args.get(1) else {
                writeln!(out, "{}  Error: Missing snippet title", "┃".bright_magenta())?;
                writeln!(
                    out,
                    "{}  Usage: snipcase show <TITLE> [LANGUAGE]",
                    "┃".bright_magenta()
                )?;
                return Ok(());
            };
            let snippets = open_repository(config)?.load()?;
            commands::show_snippet(&mut out, &snippets, title, args.get(2).map(String::as_str))?;
        }
        "help" | "--help" | "-h" => print_help(&mut out)?,
        other => {
            writeln!(out, "{}  Unknown command: {}", "┃".bright_magenta(), other)?;
            print_help(&mut out)?;
        }
    }

    Ok(())
}

fn open_repository(config: &Config) -> anyhow::Result<SnippetRepository> {
    let path = config.storage_file()?;
    let store = FileStore::open(&path, config.quota())
        .with_context(|| format!("Failed to open storage at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "cli opened storage");
    Ok(SnippetRepository::new(Box::new(store)))
}

/// Prints the help message with available commands
fn print_help(out: &mut impl Write) -> io::Result<()> {
    let margin = "┃".bright_magenta();

    writeln!(out, "{}  {}", margin, "SNIPCASE - SNIPPET POPUP".bold())?;
    writeln!(out, "{}  {}", margin, "USAGE:".bright_yellow())?;
    writeln!(out, "{}  snipcase [COMMAND] [ARGS]", margin)?;
    writeln!(out, "{}  {}", margin, "COMMANDS:".bright_yellow())?;

    for (usage, description) in [
        ("list, ls [LANGUAGE]", "List snippets, optionally for one language"),
        ("languages, langs", "List languages with snippet counts"),
        ("show <TITLE> [LANGUAGE]", "Display a snippet (partial title works)"),
        ("help", "Display this help message"),
    ] {
        writeln!(
            out,
            "{}  {:<27} {}",
            margin,
            usage.bright_white(),
            description
        )?;
    }

    writeln!(out, "{}  {}", margin, "TIP:".bright_green())?;
    writeln!(
        out,
        "{}  Run with no arguments to open the popup",
        margin
    )?;
    Ok(())
}

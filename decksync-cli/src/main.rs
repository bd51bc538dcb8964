//! decksync — bulk-import CSV records into a note-management service.
//!
//! # Usage
//!
//! ```text
//! decksync --path cards.csv --deck Spanish --note Basic
//! decksync --path cards.csv --deck Spanish --note Basic --dry-run
//! decksync --path cards.csv --deck Spanish --note Basic --url http://localhost:8765
//! ```
//!
//! Progress prints as `[+]` lines, per-record warnings as `[W]`, and any
//! fatal error as a single `[E]` diagnostic on stderr with exit code 1.
//! Set `RUST_LOG` for `tracing` detail beyond the console output.

mod import;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use decksync_connect::{ConnectError, DEFAULT_SERVICE_URL};
use decksync_core::{DeckName, NoteTypeName};

use import::ImportArgs;

/// Import a local CSV file into a note-management service.
#[derive(Parser, Debug)]
#[command(name = "decksync", version, about)]
struct Cli {
    /// Path of the local CSV file.
    #[arg(short, long)]
    path: PathBuf,

    /// Name of the deck to import the sheet into.
    #[arg(short, long)]
    deck: String,

    /// Note type of the imported records.
    #[arg(short, long)]
    note: String,

    /// Note service endpoint.
    #[arg(long, default_value = DEFAULT_SERVICE_URL)]
    url: String,

    /// Classify and resolve only; change no remote state.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let args = ImportArgs {
        path: cli.path,
        deck: DeckName::from(cli.deck),
        note_type: NoteTypeName::from(cli.note),
        url: cli.url,
        dry_run: cli.dry_run,
    };
    if let Err(err) = import::run(args) {
        report_fatal(&err);
        process::exit(1);
    }
}

fn report_fatal(err: &anyhow::Error) {
    if let Some(ConnectError::Transport { url, .. }) = err.downcast_ref::<ConnectError>() {
        eprintln!(
            "{} Failed to connect to the note service at {url}, make sure it is running",
            "[E]".red()
        );
        return;
    }
    eprintln!("{} {err:#}", "[E]".red());
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

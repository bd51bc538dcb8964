//! The import sequence: parse, classify, create, resolve, reconcile, sync.
//!
//! This is glue: it sequences the pipeline phases, prints progress before
//! each mutating step, and turns per-record anomalies into `[W]` lines.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use decksync_connect::NoteService;
use decksync_core::{parser, DeckName, NoteRecord, NoteTypeName};
use decksync_import::{classify, reconcile, resolve, Anomaly, AnomalyKind};

pub struct ImportArgs {
    pub path: PathBuf,
    pub deck: DeckName,
    pub note_type: NoteTypeName,
    pub url: String,
    pub dry_run: bool,
}

pub fn run(args: ImportArgs) -> Result<()> {
    // Absolute path up front; also our existence check.
    let csv_path = args
        .path
        .canonicalize()
        .with_context(|| format!("cannot access input file {}", args.path.display()))?;

    // Parse before the first remote call: a malformed file must never
    // leave the service partially mutated.
    let notes = parser::read_records(&csv_path, &args.deck, &args.note_type)
        .with_context(|| format!("failed to parse {}", csv_path.display()))?;

    let service = NoteService::connect(args.url);

    if args.dry_run {
        return dry_run(&service, notes);
    }

    // The remote treats an existing deck as a no-op.
    service
        .create_deck(&args.deck)
        .context("failed to create the deck")?;

    let partition = classify::classify(&service, notes)?;
    println!(
        "{} Adding {} new notes and updating {} existing notes",
        "[+]".green(),
        partition.to_create.len(),
        partition.to_update.len()
    );

    if let Err(err) = service.add_notes(&partition.to_create) {
        // Dump the batch so a rejected create can be diagnosed.
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&partition.to_create).unwrap_or_default()
        );
        return Err(err).context("failed to create new notes");
    }

    let resolution = resolve::resolve(&service, partition.to_update)?;
    report_skipped(&resolution.skipped);

    let synced = reconcile::apply_updates(&service, resolution.resolved)?;

    println!("{} Removing deleted tags from notes", "[+]".green());
    reconcile::remove_stale_tags(&service, &synced)?;

    println!("{} Syncing", "[+]".green());
    service.sync().context("failed to sync the service")?;

    Ok(())
}

/// Classify and resolve without mutating anything remote.
fn dry_run(service: &NoteService, notes: Vec<NoteRecord>) -> Result<()> {
    let partition = classify::classify(service, notes)?;
    println!(
        "{} [dry-run] Would add {} new notes and update {} existing notes",
        "[+]".green(),
        partition.to_create.len(),
        partition.to_update.len()
    );

    let resolution = resolve::resolve(service, partition.to_update)?;
    report_skipped(&resolution.skipped);
    println!(
        "{} [dry-run] {} existing notes resolved; nothing was changed",
        "[+]".green(),
        resolution.resolved.len()
    );
    Ok(())
}

fn report_skipped(skipped: &[Anomaly]) {
    for anomaly in skipped {
        match anomaly.kind {
            AnomalyKind::NoMatch => println!(
                "{} Did not find any results for note with id \"{}\", skipping. \
                 This is likely a bug, please report it",
                "[W]".yellow(),
                anomaly.id_value
            ),
            AnomalyKind::MultipleMatches => println!(
                "{} Duplicate notes are not supported, skipping note with id \"{}\"",
                "[W]".yellow(),
                anomaly.id_value
            ),
        }
    }
}

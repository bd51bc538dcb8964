//! Remote identity resolution for existing records.
//!
//! Each updatable record is located by a deck-scoped exact lookup on its
//! `id` field, all lookups batched into a single multi-call. A lookup that
//! matches zero or multiple notes is an anomaly: the record is skipped with
//! a warning and the run continues.

use decksync_connect::{api, BatchEnvelope, Command, NoteService};
use decksync_core::{DeckName, NoteId, NoteRecord};

use crate::error::ImportError;

/// A record paired with its resolved remote identity.
///
/// Pairing the identity directly with the record keeps the downstream
/// phases free of positional bookkeeping across parallel lists.
#[derive(Debug, Clone)]
pub struct ResolvedNote {
    pub id: NoteId,
    pub record: NoteRecord,
}

/// Why a record was excluded from the update pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// The lookup matched nothing.
    NoMatch,
    /// The lookup matched more than one note.
    MultipleMatches,
}

/// A record skipped during resolution. Non-fatal; the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub id_value: String,
    pub kind: AnomalyKind,
}

/// Result of resolving the update partition. Both lists preserve the
/// relative input order.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub resolved: Vec<ResolvedNote>,
    pub skipped: Vec<Anomaly>,
}

/// Deck-scoped exact lookup for one record id.
///
/// Embedded quotes are escaped so the query stays well-formed.
pub fn lookup_query(deck: &DeckName, id_value: &str) -> String {
    let escaped = id_value.replace('"', "\\\"");
    format!("deck:\"{deck}\" \"id:{escaped}\"")
}

/// Map every updatable record to its remote identity.
pub fn resolve(
    service: &NoteService,
    to_update: Vec<NoteRecord>,
) -> Result<Resolution, ImportError> {
    let mut batch = BatchEnvelope::new();
    let mut keyed = Vec::with_capacity(to_update.len());
    for record in to_update {
        let id_value = record
            .id_value()
            .ok_or(ImportError::MissingIdField)?
            .to_owned();
        batch.push(Command::FindNotes {
            query: lookup_query(&record.deck_name, &id_value),
        });
        keyed.push((record, id_value));
    }
    if batch.is_empty() {
        return Ok(Resolution::default());
    }

    let results = service.call_batch(&batch)?;

    let mut resolution = Resolution::default();
    for ((record, id_value), result) in keyed.into_iter().zip(results) {
        let matches: Vec<NoteId> = api::decode("findNotes result", result)?;
        match matches.as_slice() {
            [] => {
                tracing::warn!(id = %id_value, "lookup matched no notes, skipping record");
                resolution.skipped.push(Anomaly {
                    id_value,
                    kind: AnomalyKind::NoMatch,
                });
            }
            [id] => resolution.resolved.push(ResolvedNote { id: *id, record }),
            _ => {
                tracing::warn!(
                    id = %id_value,
                    matches = matches.len(),
                    "lookup matched multiple notes, skipping record"
                );
                resolution.skipped.push(Anomaly {
                    id_value,
                    kind: AnomalyKind::MultipleMatches,
                });
            }
        }
    }
    Ok(resolution)
}

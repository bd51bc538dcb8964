//! Field updates and exact tag-state synchronization.
//!
//! The update pass submits one shared batch carrying, per resolved record,
//! a field update, an info fetch, and (when the record declares tags) an
//! add-tags request. The service already applies the declared tags there;
//! what remains is stripping remote tags the input no longer declares,
//! computed as a set difference against the fetched info.

use std::collections::BTreeSet;

use decksync_connect::{api, BatchEnvelope, Command, NoteInfo, NoteService, NoteUpdate};
use decksync_core::join_tags;

use crate::error::ImportError;
use crate::resolve::ResolvedNote;

/// A resolved record paired with the tag set the service currently holds
/// for it.
#[derive(Debug, Clone)]
pub struct SyncedNote {
    pub resolved: ResolvedNote,
    pub remote_tags: BTreeSet<String>,
}

/// Push field updates and learn each note's current remote tags.
///
/// Only the info-fetch slots of the batch carry data; update and add-tags
/// slots come back as null acknowledgements and are discarded. The
/// surviving info results must pair one-to-one with the resolved records —
/// a mismatch means an update could land on the wrong note, so it aborts
/// the process rather than being papered over.
pub fn apply_updates(
    service: &NoteService,
    resolved: Vec<ResolvedNote>,
) -> Result<Vec<SyncedNote>, ImportError> {
    if resolved.is_empty() {
        return Ok(Vec::new());
    }

    let mut batch = BatchEnvelope::new();
    for note in &resolved {
        batch.push(Command::UpdateNoteFields {
            note: NoteUpdate {
                id: note.id,
                record: note.record.clone(),
            },
        });
        batch.push(Command::NotesInfo {
            notes: vec![note.id],
        });
        if note.record.desired_tags().is_some() {
            batch.push(Command::AddTags {
                notes: vec![note.id],
                tags: note.record.joined_tags(),
            });
        }
    }

    let results = service.call_batch(&batch)?;
    let mut infos: Vec<Vec<NoteInfo>> = Vec::new();
    for result in results {
        if result.is_null() {
            continue;
        }
        infos.push(api::decode("notesInfo result", result)?);
    }

    assert_eq!(
        infos.len(),
        resolved.len(),
        "info results misaligned with resolved records"
    );

    let mut synced = Vec::with_capacity(resolved.len());
    for (note, info) in resolved.into_iter().zip(infos) {
        assert_eq!(
            info.len(),
            1,
            "info fetch for note {} returned {} entries",
            note.id,
            info.len()
        );
        let remote = info.into_iter().next().expect("exactly one info entry");
        synced.push(SyncedNote {
            resolved: note,
            remote_tags: remote.tags,
        });
    }
    Ok(synced)
}

/// Tags to strip: held remotely but no longer desired.
pub fn stale_tags(remote: &BTreeSet<String>, desired: &BTreeSet<String>) -> BTreeSet<String> {
    remote.difference(desired).cloned().collect()
}

/// Strip remote tags that the input no longer declares.
///
/// Records without declared tags are left untouched — an absent tags
/// column never means "clear all tags". All removals go out as one batch;
/// an empty batch is skipped. Returns the number of notes that had tags
/// removed.
pub fn remove_stale_tags(
    service: &NoteService,
    synced: &[SyncedNote],
) -> Result<usize, ImportError> {
    let mut batch = BatchEnvelope::new();
    for note in synced {
        let Some(desired) = note.resolved.record.desired_tags() else {
            continue;
        };
        let stale = stale_tags(&note.remote_tags, desired);
        if stale.is_empty() {
            continue;
        }
        tracing::debug!(id = %note.resolved.id, tags = %join_tags(&stale), "removing stale tags");
        batch.push(Command::RemoveTags {
            notes: vec![note.resolved.id],
            tags: join_tags(&stale),
        });
    }
    if batch.is_empty() {
        return Ok(0);
    }
    let removed = batch.len();
    service.call_batch(&batch)?;
    Ok(removed)
}

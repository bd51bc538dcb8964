//! New-vs-existing classification.

use decksync_connect::NoteService;
use decksync_core::NoteRecord;

use crate::error::ImportError;

/// Outcome of classification.
///
/// Every input record lands in exactly one partition; relative order within
/// each partition matches the input order.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub to_create: Vec<NoteRecord>,
    pub to_update: Vec<NoteRecord>,
}

/// Split `notes` by asking the service which ones it would accept as new.
///
/// One existence-check call covers all records. Not retried: a transport or
/// protocol failure here aborts the run.
pub fn classify(service: &NoteService, notes: Vec<NoteRecord>) -> Result<Partition, ImportError> {
    let addable = service.can_add_notes(&notes)?;
    let mut partition = Partition::default();
    for (note, can_add) in notes.into_iter().zip(addable) {
        if can_add {
            partition.to_create.push(note);
        } else {
            partition.to_update.push(note);
        }
    }
    tracing::debug!(
        new = partition.to_create.len(),
        existing = partition.to_update.len(),
        "classified records"
    );
    Ok(partition)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testkit::{record_with_id, ScriptedTransport};

    use super::*;

    #[test]
    fn partition_is_total_disjoint_and_order_preserving() {
        let transport = ScriptedTransport::new();
        transport.enqueue_ok(json!([true, false, true, false]));
        let service = transport.service();

        let notes = vec![
            record_with_id("1", None),
            record_with_id("2", None),
            record_with_id("3", None),
            record_with_id("4", None),
        ];
        let partition = classify(&service, notes).unwrap();

        let created: Vec<_> = partition
            .to_create
            .iter()
            .map(|n| n.id_value().unwrap())
            .collect();
        let updated: Vec<_> = partition
            .to_update
            .iter()
            .map(|n| n.id_value().unwrap())
            .collect();
        assert_eq!(created, ["1", "3"]);
        assert_eq!(updated, ["2", "4"]);
    }

    #[test]
    fn flag_count_mismatch_aborts() {
        let transport = ScriptedTransport::new();
        transport.enqueue_ok(json!([true]));
        let service = transport.service();

        let notes = vec![record_with_id("1", None), record_with_id("2", None)];
        let err = classify(&service, notes).unwrap_err();
        assert!(err.to_string().contains("canAddNotes"));
    }

    #[test]
    fn empty_input_partitions_to_nothing() {
        let transport = ScriptedTransport::new();
        transport.enqueue_ok(json!([]));
        let service = transport.service();

        let partition = classify(&service, Vec::new()).unwrap();
        assert!(partition.to_create.is_empty());
        assert!(partition.to_update.is_empty());
    }
}

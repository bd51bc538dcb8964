//! Typed request and response envelopes for the note-service protocol.
//!
//! Every request serializes as `{"action": ..., "params": {...}, "version": 6}`;
//! every response is exactly `{"error": ..., "result": ...}`. The set of
//! actions is closed: anything the service can be asked to do appears as a
//! [`Command`] variant, so a malformed request cannot be constructed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use decksync_core::{DeckName, NoteId, NoteRecord};

use crate::error::ConnectError;

/// Protocol version stamped on every outgoing request, including each
/// sub-request of a batch.
pub const PROTOCOL_VERSION: u32 = 6;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// One remote action with its parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", content = "params", rename_all = "camelCase")]
pub enum Command {
    /// Create the deck if absent; an existing deck is left untouched.
    CreateDeck { deck: DeckName },
    /// One addability flag per note, in note order.
    CanAddNotes { notes: Vec<NoteRecord> },
    AddNotes { notes: Vec<NoteRecord> },
    FindNotes { query: String },
    UpdateNoteFields { note: NoteUpdate },
    NotesInfo { notes: Vec<NoteId> },
    AddTags { notes: Vec<NoteId>, tags: String },
    RemoveTags { notes: Vec<NoteId>, tags: String },
    /// Full service-wide sync; no parameters.
    Sync {},
}

impl Command {
    /// Wire name of the action, for logs and diagnostics.
    pub fn action(&self) -> &'static str {
        match self {
            Command::CreateDeck { .. } => "createDeck",
            Command::CanAddNotes { .. } => "canAddNotes",
            Command::AddNotes { .. } => "addNotes",
            Command::FindNotes { .. } => "findNotes",
            Command::UpdateNoteFields { .. } => "updateNoteFields",
            Command::NotesInfo { .. } => "notesInfo",
            Command::AddTags { .. } => "addTags",
            Command::RemoveTags { .. } => "removeTags",
            Command::Sync {} => "sync",
        }
    }

    /// Serialize with the protocol version stamped on.
    pub(crate) fn to_versioned_value(&self) -> Result<Value, ConnectError> {
        let mut value = serde_json::to_value(self).map_err(|err| {
            ConnectError::Protocol(format!(
                "failed to encode {} request: {err}",
                self.action()
            ))
        })?;
        if let Value::Object(request) = &mut value {
            request.insert("version".to_owned(), Value::from(PROTOCOL_VERSION));
        }
        Ok(value)
    }
}

/// `updateNoteFields` payload: the note shape plus its remote identity.
#[derive(Debug, Clone, Serialize)]
pub struct NoteUpdate {
    pub id: NoteId,
    #[serde(flatten)]
    pub record: NoteRecord,
}

/// Ordered sequence of commands submitted as a single `multi` call.
///
/// Order is load-bearing: the service answers with one result per request,
/// in request order, and callers pair results positionally.
#[derive(Debug, Clone, Default)]
pub struct BatchEnvelope {
    requests: Vec<Command>,
}

impl BatchEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.requests.push(command);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn requests(&self) -> &[Command] {
        &self.requests
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Subset of a `notesInfo` result element the reconciler consumes. The
/// service sends more fields; they are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteInfo {
    #[serde(rename = "noteId")]
    pub note_id: NoteId,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

/// Unwrap one `{error, result}` response envelope.
///
/// The envelope must be an object with exactly those two fields. A non-null
/// `error` is a remote-reported failure; anything else off-contract is a
/// protocol violation.
pub(crate) fn unwrap_envelope(response: Value) -> Result<Value, ConnectError> {
    let Value::Object(mut envelope) = response else {
        return Err(ConnectError::Protocol(
            "response envelope is not an object".to_owned(),
        ));
    };
    if envelope.len() != 2 {
        return Err(ConnectError::Protocol(format!(
            "response envelope has {} fields, expected exactly error and result",
            envelope.len()
        )));
    }
    if !envelope.contains_key("error") {
        return Err(ConnectError::Protocol(
            "response envelope is missing the required error field".to_owned(),
        ));
    }
    let Some(result) = envelope.remove("result") else {
        return Err(ConnectError::Protocol(
            "response envelope is missing the required result field".to_owned(),
        ));
    };
    match envelope.remove("error") {
        Some(Value::Null) => Ok(result),
        Some(Value::String(message)) => Err(ConnectError::Remote(message)),
        _ => Err(ConnectError::Protocol(
            "error field is neither null nor a string".to_owned(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use decksync_core::MatchOptions;

    use super::*;

    fn sample_record() -> NoteRecord {
        NoteRecord {
            deck_name: DeckName::from("Deck"),
            model_name: decksync_core::NoteTypeName::from("Basic"),
            fields: BTreeMap::from([("id".to_owned(), "7".to_owned())]),
            tags: None,
            options: MatchOptions::default(),
        }
    }

    #[test]
    fn commands_carry_action_params_and_version() {
        let value = Command::CreateDeck {
            deck: DeckName::from("Spanish"),
        }
        .to_versioned_value()
        .unwrap();
        assert_eq!(
            value,
            json!({ "action": "createDeck", "params": { "deck": "Spanish" }, "version": 6 })
        );
    }

    #[test]
    fn sync_has_empty_params() {
        let value = Command::Sync {}.to_versioned_value().unwrap();
        assert_eq!(value, json!({ "action": "sync", "params": {}, "version": 6 }));
    }

    #[test]
    fn tag_commands_join_ids_and_tags() {
        let value = Command::AddTags {
            notes: vec![NoteId(5)],
            tags: "a b".to_owned(),
        }
        .to_versioned_value()
        .unwrap();
        assert_eq!(
            value,
            json!({ "action": "addTags", "params": { "notes": [5], "tags": "a b" }, "version": 6 })
        );
    }

    #[test]
    fn note_update_flattens_the_record_beside_its_id() {
        let value = serde_json::to_value(NoteUpdate {
            id: NoteId(9),
            record: sample_record(),
        })
        .unwrap();
        assert_eq!(value["id"], json!(9));
        assert_eq!(value["deckName"], json!("Deck"));
        assert_eq!(value["fields"]["id"], json!("7"));
    }

    #[test]
    fn action_names_match_the_wire() {
        assert_eq!(Command::AddNotes { notes: vec![] }.action(), "addNotes");
        assert_eq!(Command::Sync {}.action(), "sync");
    }

    #[test]
    fn unwrap_returns_the_result_payload() {
        let result = unwrap_envelope(json!({ "error": null, "result": [1, 2] })).unwrap();
        assert_eq!(result, json!([1, 2]));
    }

    #[test]
    fn unwrap_surfaces_remote_errors() {
        let err = unwrap_envelope(json!({ "error": "model not found", "result": null }))
            .unwrap_err();
        assert!(matches!(err, ConnectError::Remote(ref m) if m == "model not found"));
    }

    #[test]
    fn unwrap_rejects_missing_error_field() {
        let err = unwrap_envelope(json!({ "result": null, "extra": 1 })).unwrap_err();
        assert!(matches!(err, ConnectError::Protocol(_)));
    }

    #[test]
    fn unwrap_rejects_missing_result_field() {
        let err = unwrap_envelope(json!({ "error": null, "other": 1 })).unwrap_err();
        assert!(matches!(err, ConnectError::Protocol(_)));
    }

    #[test]
    fn unwrap_rejects_extra_fields() {
        let err =
            unwrap_envelope(json!({ "error": null, "result": null, "extra": true })).unwrap_err();
        assert!(matches!(err, ConnectError::Protocol(_)));
    }

    #[test]
    fn unwrap_rejects_non_objects() {
        let err = unwrap_envelope(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ConnectError::Protocol(_)));
    }

    #[test]
    fn note_info_ignores_unknown_fields() {
        let info: NoteInfo = serde_json::from_value(json!({
            "noteId": 31,
            "tags": ["a", "b"],
            "fields": { "Front": { "value": "hola", "order": 0 } },
            "modelName": "Basic",
        }))
        .unwrap();
        assert_eq!(info.note_id, NoteId(31));
        assert_eq!(info.tags.len(), 2);
    }
}

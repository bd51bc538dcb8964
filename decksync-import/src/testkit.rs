//! Scripted transport and record fixtures for pipeline tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use serde_json::{json, Value};

use decksync_connect::{ConnectError, NoteService, Transport};
use decksync_core::{DeckName, MatchOptions, NoteRecord, NoteTypeName};

#[derive(Default)]
struct Script {
    responses: RefCell<VecDeque<Value>>,
    requests: RefCell<Vec<Value>>,
}

/// Transport that replays canned responses in order and records every
/// outgoing payload. Cloning shares the underlying script, so tests keep a
/// handle for assertions after handing one clone to the service.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<Script>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response envelope.
    pub fn enqueue(&self, response: Value) {
        self.script.responses.borrow_mut().push_back(response);
    }

    /// Queue a successful envelope around `result`.
    pub fn enqueue_ok(&self, result: Value) {
        self.enqueue(json!({ "error": null, "result": result }));
    }

    /// Queue a successful `multi` response whose sub-results are `results`.
    pub fn enqueue_multi(&self, results: Vec<Value>) {
        let inner: Vec<Value> = results
            .into_iter()
            .map(|result| json!({ "error": null, "result": result }))
            .collect();
        self.enqueue_ok(Value::Array(inner));
    }

    /// A service wired to this transport.
    pub fn service(&self) -> NoteService {
        NoteService::with_transport(Box::new(self.clone()))
    }

    /// Every payload sent so far.
    pub fn requests(&self) -> Vec<Value> {
        self.script.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn exchange(&self, payload: &Value) -> Result<Value, ConnectError> {
        self.script.requests.borrow_mut().push(payload.clone());
        self.script
            .responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ConnectError::Transport {
                url: "scripted".to_owned(),
                detail: "no scripted response left".to_owned(),
            })
    }
}

/// A record in deck `Deck`, note type `Basic`, with the given `id` field.
pub fn record_with_id(id_value: &str, tags: Option<&[&str]>) -> NoteRecord {
    NoteRecord {
        deck_name: DeckName::from("Deck"),
        model_name: NoteTypeName::from("Basic"),
        fields: BTreeMap::from([
            ("id".to_owned(), id_value.to_owned()),
            ("Front".to_owned(), format!("front of {id_value}")),
        ]),
        tags: tags.map(|t| t.iter().map(|s| (*s).to_owned()).collect()),
        options: MatchOptions::default(),
    }
}

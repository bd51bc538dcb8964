//! Typed wrappers over the remote capability contract.
//!
//! Result payload shapes are validated here, once, at the boundary; the
//! pipeline above never touches raw envelopes for these calls.

use serde::de::DeserializeOwned;
use serde_json::Value;

use decksync_core::{DeckName, NoteRecord};

use crate::client::NoteService;
use crate::envelope::Command;
use crate::error::ConnectError;

/// Decode a result payload into `T`, labelling shape violations.
pub fn decode<T: DeserializeOwned>(what: &str, value: Value) -> Result<T, ConnectError> {
    serde_json::from_value(value)
        .map_err(|err| ConnectError::Protocol(format!("unexpected {what} shape: {err}")))
}

impl NoteService {
    /// Create the deck if it does not exist yet. Idempotent on the remote
    /// side; an existing deck is never overwritten.
    pub fn create_deck(&self, deck: &DeckName) -> Result<(), ConnectError> {
        self.call(&Command::CreateDeck { deck: deck.clone() })?;
        Ok(())
    }

    /// Ask which of `notes` the service would accept as new.
    ///
    /// Returns one flag per note, in note order.
    pub fn can_add_notes(&self, notes: &[NoteRecord]) -> Result<Vec<bool>, ConnectError> {
        let result = self.call(&Command::CanAddNotes {
            notes: notes.to_vec(),
        })?;
        let flags: Vec<bool> = decode("canAddNotes result", result)?;
        if flags.len() != notes.len() {
            return Err(ConnectError::Protocol(format!(
                "canAddNotes returned {} flags for {} notes",
                flags.len(),
                notes.len()
            )));
        }
        Ok(flags)
    }

    /// Create every note in one call.
    pub fn add_notes(&self, notes: &[NoteRecord]) -> Result<(), ConnectError> {
        self.call(&Command::AddNotes {
            notes: notes.to_vec(),
        })?;
        Ok(())
    }

    /// Trigger a full service-wide sync.
    pub fn sync(&self) -> Result<(), ConnectError> {
        self.call(&Command::Sync {})?;
        Ok(())
    }
}

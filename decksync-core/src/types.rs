//! Domain types for decksync records.
//!
//! [`NoteRecord`] is serialized directly as the wire payload the note
//! service expects (`deckName` / `modelName` casing via serde renames), so
//! there is exactly one definition of the record shape.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field name that uniquely identifies a record within its deck.
pub const ID_FIELD: &str = "id";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed deck (container) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckName(pub String);

impl fmt::Display for DeckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for DeckName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeckName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed note-type (record schema) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteTypeName(pub String);

impl fmt::Display for NoteTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NoteTypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NoteTypeName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque identity the service assigns to a stored note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Duplicate-matching policy attached to every record.
///
/// Fixed for all imports: exact duplicates are rejected, scoped to the
/// target deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: String,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            allow_duplicate: false,
            duplicate_scope: "deck".to_owned(),
        }
    }
}

/// One logical record parsed from a non-header input row.
///
/// `tags` is `None` when the input declares no tags column at all; an
/// empty set means the column was present but blank. Only a declared,
/// non-empty set participates in tag reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub deck_name: DeckName,
    pub model_name: NoteTypeName,
    pub fields: BTreeMap<String, String>,
    pub tags: Option<BTreeSet<String>>,
    pub options: MatchOptions,
}

impl NoteRecord {
    /// Value of the `id` field, when present.
    pub fn id_value(&self) -> Option<&str> {
        self.fields.get(ID_FIELD).map(String::as_str)
    }

    /// The declared tag set, only when it is non-empty.
    pub fn desired_tags(&self) -> Option<&BTreeSet<String>> {
        self.tags.as_ref().filter(|tags| !tags.is_empty())
    }

    /// Declared tags in canonical space-joined form.
    pub fn joined_tags(&self) -> String {
        self.tags.as_ref().map(join_tags).unwrap_or_default()
    }
}

/// Canonical space-joined form of a tag set.
pub fn join_tags(tags: &BTreeSet<String>) -> String {
    tags.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

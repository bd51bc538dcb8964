//! CSV record parser.
//!
//! The first row of the input declares the [`Schema`]; every subsequent row
//! becomes one [`NoteRecord`], in file order. A column whose header is
//! `tags` (case-insensitive) is split on whitespace into the record's tag
//! set; every other column is stored as a field under its literal header
//! name.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::ParseError;
use crate::types::{DeckName, MatchOptions, NoteRecord, NoteTypeName, ID_FIELD};

const TAGS_COLUMN: &str = "tags";

/// Ordered column-index → field-name mapping, built from the header row.
///
/// Read-only after construction. The header must declare an `id` column
/// (exact name); `id` is how existing records are located remotely, so a
/// file without it can never be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn from_header(header: &csv::StringRecord) -> Result<Self, ParseError> {
        let columns: Vec<String> = header.iter().map(str::to_owned).collect();
        if !columns.iter().any(|name| name == ID_FIELD) {
            return Err(ParseError::MissingIdColumn);
        }
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Build one record from a row already validated to match the schema
    /// width.
    fn record_from_row(
        &self,
        row: &csv::StringRecord,
        deck: &DeckName,
        note_type: &NoteTypeName,
    ) -> NoteRecord {
        let mut fields = BTreeMap::new();
        let mut tags = None;
        for (index, value) in row.iter().enumerate() {
            let name = &self.columns[index];
            if name.eq_ignore_ascii_case(TAGS_COLUMN) {
                let set: BTreeSet<String> =
                    value.split_whitespace().map(str::to_owned).collect();
                tags = Some(set);
            } else {
                fields.insert(name.clone(), value.to_owned());
            }
        }
        NoteRecord {
            deck_name: deck.clone(),
            model_name: note_type.clone(),
            fields,
            tags,
            options: MatchOptions::default(),
        }
    }
}

/// Parse `path` into records targeting `deck` with note type `note_type`.
///
/// The Nth non-header row produces the Nth record. Any row that does not
/// fit the header columns aborts the whole parse; partial imports from a
/// malformed file are never attempted.
pub fn read_records(
    path: &Path,
    deck: &DeckName,
    note_type: &NoteTypeName,
) -> Result<Vec<NoteRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let header = reader
        .headers()
        .map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let schema = Schema::from_header(&header)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|source| ParseError::MalformedRecord {
            record: index + 1,
            source,
        })?;
        records.push(schema.record_from_row(&row, deck, note_type));
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! # decksync-core
//!
//! Domain types and the record parser.
//!
//! Public API surface:
//! - [`types`] — newtypes and the [`NoteRecord`] wire shape
//! - [`parser`] — [`read_records`]: CSV file → ordered records
//! - [`error`] — [`ParseError`]

pub mod error;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use parser::{read_records, Schema};
pub use types::{join_tags, DeckName, MatchOptions, NoteId, NoteRecord, NoteTypeName, ID_FIELD};

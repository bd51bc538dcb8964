//! Error types for decksync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while parsing an input file.
///
/// Every variant is fatal: parsing happens before any remote call, so a
/// failed parse guarantees the service was never touched.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be opened or read, with annotated path.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The header row does not declare an `id` column.
    #[error("header row does not declare an \"id\" column")]
    MissingIdColumn,

    /// A data row could not be resolved against the header columns.
    #[error("record {record} does not fit the declared columns: {source}")]
    MalformedRecord {
        /// 1-based data record number (the header is not counted).
        record: usize,
        #[source]
        source: csv::Error,
    },
}

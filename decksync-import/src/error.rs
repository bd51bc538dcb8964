//! Error types for decksync-import.

use thiserror::Error;

use decksync_connect::ConnectError;

/// All errors that can arise from the import pipeline.
///
/// Gateway failures pass through unchanged; nothing here retries. Internal
/// pairing violations between records and batched results are defects, not
/// errors — those assert and abort rather than surfacing as a variant.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// A record reached the resolver without an `id` field. The parser
    /// guarantees the column exists, so this indicates a caller bypassing
    /// it.
    #[error("note record is missing the required \"id\" field")]
    MissingIdField,
}

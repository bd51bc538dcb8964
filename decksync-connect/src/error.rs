//! Error types for decksync-connect.

use thiserror::Error;

/// All errors that can arise from talking to the note service.
///
/// None of these are retried: a transport or protocol failure is terminal
/// for the whole run, and a remote-reported error for a batch surfaces at
/// the first offending element.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The endpoint could not be reached.
    #[error("failed to reach the note service at {url}: {detail}")]
    Transport { url: String, detail: String },

    /// The response violated the `{error, result}` envelope contract.
    #[error("note service protocol violation: {0}")]
    Protocol(String),

    /// The service accepted the call but reported a logical error.
    #[error("note service reported an error: {0}")]
    Remote(String),
}

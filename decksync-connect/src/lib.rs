//! # decksync-connect
//!
//! Blocking RPC gateway for the note-management service.
//!
//! [`NoteService`] issues single actions via [`NoteService::call`] and
//! batched multi-calls via [`NoteService::call_batch`]; both unwrap the
//! two-field `{error, result}` response envelope uniformly. The wire
//! vocabulary lives in [`envelope`]; typed single-call wrappers in [`api`].

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;

pub use client::{HttpTransport, NoteService, Transport, DEFAULT_SERVICE_URL};
pub use envelope::{BatchEnvelope, Command, NoteInfo, NoteUpdate, PROTOCOL_VERSION};
pub use error::ConnectError;

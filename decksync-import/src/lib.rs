//! # decksync-import
//!
//! The reconciliation pipeline: classify input records as new vs existing,
//! resolve existing records to their remote identities, then reconcile
//! fields and tag state against the service.
//!
//! Phases are plain functions over a [`decksync_connect::NoteService`];
//! the caller sequences them (classify → resolve → apply → remove) and
//! owns all console output.

pub mod classify;
pub mod error;
pub mod reconcile;
pub mod resolve;

#[cfg(test)]
mod testkit;

pub use classify::{classify, Partition};
pub use error::ImportError;
pub use reconcile::{apply_updates, remove_stale_tags, stale_tags, SyncedNote};
pub use resolve::{lookup_query, resolve, Anomaly, AnomalyKind, Resolution, ResolvedNote};

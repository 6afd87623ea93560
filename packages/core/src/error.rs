//! Error types for the tree engine.
//!
//! Most of what can go wrong with stored data is recovered from quietly: a
//! missing path reads as null, an unreadable listing counts as empty. What
//! remains is the backend failing to do I/O.

use jsondb_flat_store::FlatStoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Store(#[from] FlatStoreError),

    #[error("An error occurred while encoding the entry at {path}: {message}")]
    Encode { path: String, message: String },
}

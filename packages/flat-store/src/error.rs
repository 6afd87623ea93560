//! Error types for the flat layer.
//!
//! Errors at this level are transport-focused. A missing key is not an error
//! (reads return `Ok(None)`); neither is a value the tree engine cannot make
//! sense of - that belongs in higher layers.

/// Errors at the flat key/value layer.
#[derive(thiserror::Error, Debug)]
pub enum FlatStoreError {
    /// Generic I/O or transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The persisted store file could not be (de)serialized.
    #[error("store file serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The location a store was asked to live at cannot hold one.
    #[error("An error occurred trying to use the store location {path}: {message}")]
    LocationInvalid {
        path: std::path::PathBuf,
        message: String,
    },
}

//! jsondb core: nested documents on a flat key/value store.
//!
//! This layer gives a flat `FlatStore` the shape of a tiny filesystem:
//! - Paths: segments joined by a reserved delimiter, array elements as `[i]`
//! - Leaves: one scalar literal stored under its path
//! - Directories: a sorted list of child paths stored under the parent's path
//! - KindTags: a `TYPE:` side entry saying which of the two a path holds
//!
//! Writing a [`Document`] decomposes it into leaves and directories; reading
//! rebuilds it, deciding array versus object from the children's names;
//! deleting unlists a node and removes ancestors left empty.
//!
//! Nothing here is transactional or safe to share between concurrent
//! writers: a `put` is a sequence of plain backend writes.
//!
//! # Example
//!
//! ```rust
//! use jsondb_core::{Document, JsonDb, Mode};
//! use jsondb_flat_store::InMemoryFlatStore;
//! use serde_json::json;
//!
//! let mut db = JsonDb::new("settings", Mode::WR, InMemoryFlatStore::new());
//! db.put_json("audio", &json!({"volume": 7, "muted": false})).unwrap();
//!
//! // The flat store now holds one entry per node plus its kind tag.
//! assert!(db.store().contains_key("settings\\audio\\volume"));
//! assert_eq!(db.get("audio\\volume").unwrap(), Document::from(7i64));
//! ```

mod db;
mod directory;
mod document;
mod eraser;
mod error;
mod kind;
pub mod path;
mod reader;
mod writer;

pub use db::{JsonDb, Mode};
pub use directory::DirBatch;
pub use document::Document;
pub use error::Error;
pub use kind::{kind_of, Kind, Property};
pub use path::{make_array, make_path, DELIMITER};

// Re-export the backend contract for convenience
pub use jsondb_flat_store::{FlatStore, FlatStoreError};

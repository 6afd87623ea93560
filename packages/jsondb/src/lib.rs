//! jsondb: nested JSON-like documents persisted into a flat string-keyed store.
//!
//! Documents are decomposed into one entry per node, so any backend that can
//! get, set and delete strings by key can hold them.
//!
//! ```rust
//! use jsondb::{Document, InMemoryFlatStore, JsonDb, Mode};
//! use serde_json::json;
//!
//! let mut db = JsonDb::new("root", Mode::WR, InMemoryFlatStore::new());
//! db.put_json("a", &json!({"x": 1, "y": [10, 20]})).unwrap();
//! db.del("a\\x").unwrap();
//!
//! assert_eq!(db.root().unwrap(), Document::from(json!({"a": {"y": [10, 20]}})));
//! ```

pub use jsondb_core::*;
pub use jsondb_flat_store::{InMemoryFlatStore, JsonFileFlatStore};

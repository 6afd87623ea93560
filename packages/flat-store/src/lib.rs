//! Flat key/value backends for jsondb.
//!
//! This is the narrow waist under the jsondb tree engine. Everything at this
//! level is a flat string key mapped to a string value - no nesting, no
//! ordering, no notion of directories. The tree engine in `jsondb-core` builds
//! paths, directories and leaves on top of these four operations.
//!
//! Use this layer for:
//! - Plugging jsondb onto an existing preferences/settings store
//! - Inspecting the raw flat layout a document was decomposed into
//!
//! # Example
//!
//! ```rust
//! use jsondb_flat_store::{FlatStore, FlatStoreError, InMemoryFlatStore};
//!
//! fn remember(store: &mut dyn FlatStore, name: &str) -> Result<(), FlatStoreError> {
//!     store.set_string("user", name)?;
//!     store.save()
//! }
//!
//! let mut store = InMemoryFlatStore::new();
//! remember(&mut store, "\"Alice\"").unwrap();
//! assert_eq!(store.get_string("user").unwrap().as_deref(), Some("\"Alice\""));
//! ```

mod error;
pub mod in_memory;
pub mod json_file;
mod traits;

pub use error::FlatStoreError;
pub use in_memory::InMemoryFlatStore;
pub use json_file::JsonFileFlatStore;
pub use traits::FlatStore;

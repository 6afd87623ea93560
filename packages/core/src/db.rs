//! The `JsonDb` facade: a namespace of documents over one flat store.

use jsondb_flat_store::FlatStore;
use serde_json::Value as JsonValue;

use crate::directory::DirBatch;
use crate::document::Document;
use crate::kind::{self, Kind, Property};
use crate::{eraser, path, reader, writer, Error};

/// Access mode requested when opening a [`JsonDb`].
///
/// The mode is recorded and reported back but nothing checks it: writes go
/// through under `Mode::R` as well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    R = 0x01,
    W = 0x02,
    WR = 0x03,
}

impl Mode {
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn can_read(self) -> bool {
        self.bits() & Mode::R.bits() != 0
    }

    pub fn can_write(self) -> bool {
        self.bits() & Mode::W.bits() != 0
    }
}

/// Nested documents stored under one namespace root of a flat store.
///
/// Every path handed to this type is relative to the namespace: `get("a")`
/// reads `namespace\a`.
///
/// # Example
///
/// ```rust
/// use jsondb_core::{Document, JsonDb, Mode};
/// use jsondb_flat_store::InMemoryFlatStore;
/// use serde_json::json;
///
/// let mut db = JsonDb::new("app", Mode::WR, InMemoryFlatStore::new());
/// db.put_json("a", &json!({"x": 1, "y": [10, 20]})).unwrap();
/// assert_eq!(db.get("a").unwrap(), Document::from(json!({"x": 1, "y": [10, 20]})));
///
/// db.del("a\\x").unwrap();
/// db.del("a\\y").unwrap();
/// assert_eq!(db.get("a").unwrap(), Document::Null);
/// ```
pub struct JsonDb<S> {
    namespace: String,
    mode: Mode,
    store: S,
}

impl<S: FlatStore> JsonDb<S> {
    pub fn new(namespace: impl Into<String>, mode: Mode, store: S) -> Self {
        Self {
            namespace: namespace.into(),
            mode,
            store,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The full flat path of `relative` inside this namespace.
    pub fn full_path(&self, relative: &str) -> String {
        path::make_path(&self.namespace, relative)
    }

    /// Join a child segment onto a parent path.
    pub fn make_path(&self, parent: &str, child: &str) -> String {
        path::make_path(parent, child)
    }

    /// Build the path of array element `index` under `parent`.
    pub fn make_array(&self, parent: &str, index: usize) -> String {
        path::make_array(parent, index)
    }

    /// Read the whole namespace as one document.
    pub fn root(&mut self) -> Result<Document, Error> {
        reader::get_document(&mut self.store, &self.namespace)
    }

    /// Read the document at `path`. Missing paths read as `Null`.
    pub fn get(&mut self, path: &str) -> Result<Document, Error> {
        let full = self.full_path(path);
        reader::get_document(&mut self.store, &full)
    }

    /// Read a side property tagged on `path`, `Null` when there is none.
    pub fn get_property(&mut self, path: &str, property: Property) -> Result<Document, Error> {
        let key = property.key_for(&self.full_path(path));
        let raw = match self.store.get_string(&key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(Document::Null),
        };

        match serde_json::from_str::<JsonValue>(&raw) {
            Ok(value) => Ok(Document::from(value)),
            Err(err) => {
                log::warn!("Property {} is unreadable: {}", key, err);
                Ok(Document::Null)
            }
        }
    }

    /// What is stored at `path`: a Directory, a Leaf, or nothing.
    pub fn kind_of(&mut self, path: &str) -> Result<Kind, Error> {
        let full = self.full_path(path);
        kind::kind_of(&mut self.store, None, &full)
    }

    /// Write `document` under `key`, merging into whatever is already there.
    ///
    /// Every Directory touched is written once at the end, followed by a
    /// single `save()`. `key` is registered directly under the namespace
    /// root as one segment.
    pub fn put(&mut self, key: &str, document: &Document) -> Result<(), Error> {
        let full = self.full_path(key);
        log::debug!("Putting {}", full);

        let mut batch = DirBatch::new();
        batch.register(&mut self.store, &self.namespace, &full)?;
        writer::put_document(&mut self.store, &mut batch, &full, document)?;
        batch.flush(&mut self.store)?;
        Ok(())
    }

    /// `put` for a plain JSON value.
    pub fn put_json(&mut self, key: &str, value: &JsonValue) -> Result<(), Error> {
        self.put(key, &Document::from(value.clone()))
    }

    /// Delete the node at `path` and any ancestors left without children.
    ///
    /// Only the node's own entry goes: if it was a Directory, the entries
    /// below it stay in the store, unlisted.
    pub fn del(&mut self, path: &str) -> Result<(), Error> {
        let full = self.full_path(path);
        log::debug!("Deleting {}", full);

        eraser::remove(&mut self.store, &full)?;
        self.store.save()?;
        Ok(())
    }

    /// Delete the namespace root's own entry and nothing else.
    ///
    /// Like `del`, this does not reach the entries below it, and unlike `del`
    /// it never walks above the namespace.
    pub fn clear(&mut self) -> Result<(), Error> {
        log::debug!("Clearing {}", self.namespace);

        eraser::delete_header(&mut self.store, &self.namespace)?;
        self.store.save()?;
        Ok(())
    }
}

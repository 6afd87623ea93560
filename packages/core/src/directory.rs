//! Directory listings and the per-write batch that accumulates them.
//!
//! A Directory is stored under its own path as a JSON array of full child
//! paths, kept sorted and free of duplicates. During a `put` every listing
//! touched is held in a [`DirBatch`] and written once, when the batch is
//! flushed.

use std::collections::BTreeMap;

use jsondb_flat_store::FlatStore;

use crate::kind::{self, Kind};
use crate::Error;

/// Pending Directory mutations for one write.
///
/// A batch is created at the start of a `put`, threaded through the
/// decomposition, and consumed by [`DirBatch::flush`]. Nothing in it is
/// visible to the store until then.
#[derive(Debug, Default)]
pub struct DirBatch {
    pending: BTreeMap<String, Vec<String>>,
}

impl DirBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a listing for `path` is waiting to be flushed.
    pub fn contains(&self, path: &str) -> bool {
        self.pending.contains_key(path)
    }

    /// The pending listing for `parent`, if it has been loaded.
    pub fn children(&self, parent: &str) -> Option<&[String]> {
        self.pending.get(parent).map(Vec::as_slice)
    }

    /// Number of listings waiting to be flushed.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Make sure a listing for `parent` is pending, loading it from `store`
    /// the first time.
    ///
    /// Whatever is stored under `parent` that does not read as a listing
    /// (nothing, a leaf, garbage, a failed read) starts out as an empty one.
    pub fn open<S: FlatStore + ?Sized>(&mut self, store: &mut S, parent: &str) -> &mut Vec<String> {
        self.pending
            .entry(parent.to_string())
            .or_insert_with(|| load_or_empty(store, parent))
    }

    /// Add `child` to the listing of `parent`, keeping it sorted.
    ///
    /// Returns `false` when `child` was already listed.
    pub fn register<S: FlatStore + ?Sized>(
        &mut self,
        store: &mut S,
        parent: &str,
        child: &str,
    ) -> Result<bool, Error> {
        let listing = self.open(store, parent);
        match listing.binary_search_by(|entry| entry.as_str().cmp(child)) {
            Ok(_) => Ok(false),
            Err(i) => {
                listing.insert(i, child.to_string());
                Ok(true)
            }
        }
    }

    /// Drop the pending listing for `path` without writing it.
    pub(crate) fn forget(&mut self, path: &str) -> Option<Vec<String>> {
        self.pending.remove(path)
    }

    /// Write every pending listing, tag each as a Directory, and ask the
    /// store to make the batch durable.
    ///
    /// The writes are not atomic as a group: if one fails, listings before it
    /// have already been written and are not rolled back.
    pub fn flush<S: FlatStore + ?Sized>(self, store: &mut S) -> Result<usize, Error> {
        let count = self.pending.len();
        for (parent, children) in &self.pending {
            write_listing(store, parent, children)?;
        }
        store.save()?;

        log::debug!("Flushed {} directories", count);
        Ok(count)
    }
}

fn load_or_empty<S: FlatStore + ?Sized>(store: &mut S, parent: &str) -> Vec<String> {
    match store.get_string(parent) {
        Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(listing) => listing,
            Err(err) => {
                log::debug!("{} does not hold a listing ({}), starting empty", parent, err);
                Vec::new()
            }
        },
        Ok(_) => Vec::new(),
        Err(err) => {
            log::warn!("Reading listing of {} failed ({}), starting empty", parent, err);
            Vec::new()
        }
    }
}

/// Read the stored listing for `path`.
///
/// `None` when nothing is stored or the stored value is not a listing.
pub(crate) fn read_listing<S: FlatStore + ?Sized>(
    store: &mut S,
    path: &str,
) -> Result<Option<Vec<String>>, Error> {
    let raw = match store.get_string(path)? {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(listing) => Ok(Some(listing)),
        Err(err) => {
            log::warn!("Listing of {} is unreadable: {}", path, err);
            Ok(None)
        }
    }
}

/// Store `children` as the listing of `path` and tag it a Directory.
pub(crate) fn write_listing<S: FlatStore + ?Sized>(
    store: &mut S,
    path: &str,
    children: &[String],
) -> Result<(), Error> {
    let encoded = serde_json::to_string(children).map_err(|err| Error::Encode {
        path: path.to_string(),
        message: err.to_string(),
    })?;
    log::debug!("Writing directory {} ({} children)", path, children.len());
    store.set_string(path, &encoded)?;
    kind::tag(store, path, Kind::Dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsondb_flat_store::InMemoryFlatStore;

    fn stored_listing(store: &mut InMemoryFlatStore, path: &str) -> Vec<String> {
        read_listing(store, path).unwrap().unwrap()
    }

    #[test]
    fn register_keeps_listing_sorted() {
        let mut store = InMemoryFlatStore::new();
        let mut batch = DirBatch::new();

        for child in ["root\\c", "root\\a", "root\\b"] {
            assert!(batch.register(&mut store, "root", child).unwrap());
        }

        assert_eq!(
            batch.children("root").unwrap(),
            &["root\\a", "root\\b", "root\\c"]
        );
    }

    #[test]
    fn register_is_idempotent() {
        let mut store = InMemoryFlatStore::new();
        let mut batch = DirBatch::new();

        assert!(batch.register(&mut store, "root", "root\\a").unwrap());
        assert!(!batch.register(&mut store, "root", "root\\a").unwrap());

        assert_eq!(batch.children("root").unwrap().len(), 1);
    }

    #[test]
    fn nothing_is_written_before_flush() {
        let mut store = InMemoryFlatStore::new();
        let mut batch = DirBatch::new();

        batch.register(&mut store, "root", "root\\a").unwrap();

        assert!(store.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn flush_writes_listing_and_tag_then_saves_once() {
        let mut store = InMemoryFlatStore::new();
        let mut batch = DirBatch::new();

        batch.register(&mut store, "root", "root\\x").unwrap();
        batch.register(&mut store, "root", "root\\y").unwrap();
        batch.register(&mut store, "root\\y", "root\\y\\[0]").unwrap();

        assert_eq!(batch.flush(&mut store).unwrap(), 2);
        assert_eq!(store.save_count(), 1);

        assert_eq!(stored_listing(&mut store, "root"), vec!["root\\x", "root\\y"]);
        assert_eq!(stored_listing(&mut store, "root\\y"), vec!["root\\y\\[0]"]);
        assert_eq!(
            store.entries().get("TYPE:root").map(String::as_str),
            Some("100")
        );
    }

    #[test]
    fn existing_listing_is_extended() {
        let mut store = InMemoryFlatStore::new();
        write_listing(&mut store, "root", &["root\\b".to_string()]).unwrap();

        let mut batch = DirBatch::new();
        batch.register(&mut store, "root", "root\\a").unwrap();
        batch.register(&mut store, "root", "root\\b").unwrap();
        batch.flush(&mut store).unwrap();

        assert_eq!(stored_listing(&mut store, "root"), vec!["root\\a", "root\\b"]);
    }

    #[test]
    fn corrupt_listing_starts_empty() {
        let mut store = InMemoryFlatStore::new();
        store.set_string("root", "[not json").unwrap();

        let mut batch = DirBatch::new();
        batch.register(&mut store, "root", "root\\a").unwrap();

        assert_eq!(batch.children("root").unwrap(), &["root\\a"]);
    }

    #[test]
    fn leaf_under_parent_path_starts_empty() {
        let mut store = InMemoryFlatStore::new();
        store.set_string("root\\a", "42").unwrap();

        let mut batch = DirBatch::new();
        batch.register(&mut store, "root\\a", "root\\a\\b").unwrap();
        batch.flush(&mut store).unwrap();

        assert_eq!(stored_listing(&mut store, "root\\a"), vec!["root\\a\\b"]);
    }

    #[test]
    fn open_creates_empty_listing() {
        let mut store = InMemoryFlatStore::new();
        let mut batch = DirBatch::new();

        assert!(batch.open(&mut store, "root\\empty").is_empty());
        batch.flush(&mut store).unwrap();

        assert_eq!(stored_listing(&mut store, "root\\empty"), Vec::<String>::new());
    }

    #[test]
    fn forget_drops_pending_listing() {
        let mut store = InMemoryFlatStore::new();
        let mut batch = DirBatch::new();

        batch.register(&mut store, "root", "root\\a").unwrap();
        assert!(batch.forget("root").is_some());
        assert!(batch.is_empty());

        batch.flush(&mut store).unwrap();
        assert!(!store.contains_key("root"));
    }

    #[test]
    fn read_listing_of_missing_path_is_none() {
        let mut store = InMemoryFlatStore::new();
        assert_eq!(read_listing(&mut store, "root").unwrap(), None);

        store.set_string("root", "").unwrap();
        assert_eq!(read_listing(&mut store, "root").unwrap(), None);
    }
}

//! In-memory flat store.

use std::collections::BTreeMap;

use crate::{FlatStore, FlatStoreError};

/// A flat store held entirely in memory.
///
/// Keys are kept in an ordered map so dumps of the raw layout are stable.
/// `save()` has nothing to make durable; it only counts how often it was
/// asked to, which lets callers check the once-per-batch contract.
///
/// # Example
///
/// ```rust
/// use jsondb_flat_store::{FlatStore, InMemoryFlatStore};
///
/// let mut store = InMemoryFlatStore::new();
/// store.set_string("name", "\"Alice\"").unwrap();
/// assert!(store.contains_key("name"));
/// assert_eq!(store.save_count(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryFlatStore {
    data: BTreeMap<String, String>,
    saves: usize,
}

impl InMemoryFlatStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial entries.
    pub fn with_data(data: BTreeMap<String, String>) -> Self {
        Self { data, saves: 0 }
    }

    /// All keys currently stored, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Borrow the raw entries.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of times `save()` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl FlatStore for InMemoryFlatStore {
    fn get_string(&mut self, key: &str) -> Result<Option<String>, FlatStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), FlatStoreError> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_key(&mut self, key: &str) -> Result<(), FlatStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn save(&mut self) -> Result<(), FlatStoreError> {
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_set_get() {
        let mut store = InMemoryFlatStore::new();

        store.set_string("foo", "\"bar\"").unwrap();

        assert_eq!(store.get_string("foo").unwrap().as_deref(), Some("\"bar\""));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn read_nonexistent_returns_none() {
        let mut store = InMemoryFlatStore::new();
        assert_eq!(store.get_string("nonexistent").unwrap(), None);
    }

    #[test]
    fn overwrite_works() {
        let mut store = InMemoryFlatStore::new();

        store.set_string("value", "1").unwrap();
        store.set_string("value", "2").unwrap();

        assert_eq!(store.get_string("value").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_missing_key_is_noop() {
        let mut store = InMemoryFlatStore::new();
        store.set_string("kept", "true").unwrap();

        store.delete_key("missing").unwrap();
        store.delete_key("kept").unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let mut store = InMemoryFlatStore::new();
        store.set_string("b", "1").unwrap();
        store.set_string("a", "2").unwrap();
        store.set_string("TYPE:a", "111").unwrap();

        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(keys, vec!["TYPE:a", "a", "b"]);
    }

    #[test]
    fn save_is_counted() {
        let mut store = InMemoryFlatStore::new();
        store.save().unwrap();
        store.save().unwrap();
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn with_data_constructor() {
        let mut data = BTreeMap::new();
        data.insert("key".to_string(), "\"value\"".to_string());

        let mut store = InMemoryFlatStore::with_data(data);

        assert!(store.contains_key("key"));
        assert_eq!(store.get_string("key").unwrap().as_deref(), Some("\"value\""));
    }
}

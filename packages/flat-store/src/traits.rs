//! The backend contract.

use crate::FlatStoreError;

/// A flat, durable, string-keyed key/value store.
///
/// This is the whole capability jsondb needs from a persistence layer. Keys
/// live in one global namespace; the store has no idea that some keys are
/// "paths" or that some values are "directories".
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn FlatStore>`.
pub trait FlatStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under `key` (not an error condition).
    /// * `Ok(Some(value))` - The stored value. Callers treat an empty string
    ///   the same as `None`.
    /// * `Err(FlatStoreError)` - A transport or system error occurred.
    fn get_string(&mut self, key: &str) -> Result<Option<String>, FlatStoreError>;

    /// Store `value` under `key`, replacing whatever was there.
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), FlatStoreError>;

    /// Remove `key`. Removing a missing key is a no-op.
    fn delete_key(&mut self, key: &str) -> Result<(), FlatStoreError>;

    /// Make every mutation so far durable.
    ///
    /// jsondb calls this once per top-level write batch.
    fn save(&mut self) -> Result<(), FlatStoreError>;
}

// Blanket implementations for references and boxes

impl<T: FlatStore + ?Sized> FlatStore for &mut T {
    fn get_string(&mut self, key: &str) -> Result<Option<String>, FlatStoreError> {
        (*self).get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), FlatStoreError> {
        (*self).set_string(key, value)
    }

    fn delete_key(&mut self, key: &str) -> Result<(), FlatStoreError> {
        (*self).delete_key(key)
    }

    fn save(&mut self) -> Result<(), FlatStoreError> {
        (*self).save()
    }
}

impl<T: FlatStore + ?Sized> FlatStore for Box<T> {
    fn get_string(&mut self, key: &str) -> Result<Option<String>, FlatStoreError> {
        self.as_mut().get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), FlatStoreError> {
        self.as_mut().set_string(key, value)
    }

    fn delete_key(&mut self, key: &str) -> Result<(), FlatStoreError> {
        self.as_mut().delete_key(key)
    }

    fn save(&mut self) -> Result<(), FlatStoreError> {
        self.as_mut().save()
    }
}

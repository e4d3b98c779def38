//! Durable key-value storage abstraction.
//!
//! The portal persists its session through a flat string-to-string store with
//! the same contract as browser local storage. Implementations live here
//! (`MemoryStorage`) and in the infrastructure crate (file-backed).

mod memory;

pub use memory::MemoryStorage;

use crate::error::Result;

/// A flat, string-keyed durable store.
///
/// Every method may fail (quota exceeded, storage disabled, IO error); callers
/// in this crate treat a failure as an aborted mutation and never panic on it.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

//! The key/value interface defaults are persisted through.

use fieldkit_mirror::Value;

use crate::Result;

/// A key/value store for persisted field values.
///
/// Keys look like `Person.name`. Stores decide their own durability and
/// locking; nothing here is transactional.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn DefaultsStore>`.
pub trait DefaultsStore {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under the key.
    /// * `Ok(Some(value))` - The stored value.
    /// * `Err(Error)` - The store could not be read.
    fn get(&mut self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

// Blanket implementations for references and boxes

impl<T: DefaultsStore + ?Sized> DefaultsStore for &mut T {
    fn get(&mut self, key: &str) -> Result<Option<Value>> {
        (*self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (*self).set(key, value)
    }
}

impl<T: DefaultsStore + ?Sized> DefaultsStore for Box<T> {
    fn get(&mut self, key: &str) -> Result<Option<Value>> {
        self.as_mut().get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.as_mut().set(key, value)
    }
}

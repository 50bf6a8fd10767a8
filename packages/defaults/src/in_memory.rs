//! In-memory defaults store.

use std::collections::BTreeMap;

use fieldkit_mirror::Value;

use crate::{DefaultsStore, Result};

/// A defaults store backed by a `BTreeMap`.
///
/// # Example
///
/// ```rust
/// use fieldkit_defaults::{DefaultsStore, InMemoryDefaults};
/// use fieldkit_mirror::Value;
///
/// let mut store = InMemoryDefaults::new();
/// store.set("Person.name", Value::from("Alice")).unwrap();
/// assert_eq!(store.get("Person.name").unwrap(), Some(Value::from("Alice")));
/// assert_eq!(store.get("Person.age").unwrap(), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryDefaults {
    entries: BTreeMap<String, Value>,
}

impl InMemoryDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }
}

impl DefaultsStore for InMemoryDefaults {
    fn get(&mut self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        log::trace!("Setting default {}", key);
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

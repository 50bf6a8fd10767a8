//! Defaults store persisted as a single JSON object file.

use std::fs;
use std::path::{Path, PathBuf};

use fieldkit_mirror::{from_json, to_json, Value};
use serde_json::{Map, Value as JsonValue};

use crate::{DefaultsStore, Error, Result};

/// A defaults store kept in one JSON file.
///
/// The whole file is read on open and rewritten on every `set`. Values go
/// through JSON, so record type names are not preserved: a stored record
/// comes back as a keyed collection, which field writes accept. JSON has no
/// literal for non-finite floats; they are stored as `"NaN"`, `"inf"` and
/// `"-inf"` and read back into float fields.
pub struct JsonFileDefaults {
    path: PathBuf,
    entries: Map<String, JsonValue>,
}

impl JsonFileDefaults {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            log::debug!("Reading {}...", path.display());
            let text = fs::read_to_string(&path)?;
            match serde_json::from_str::<JsonValue>(&text)? {
                JsonValue::Object(map) => map,
                _ => return Err(Error::NotAnObject { path }),
            }
        } else {
            Map::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) -> Result<()> {
        log::debug!("Writing {}...", self.path.display());
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl DefaultsStore for JsonFileDefaults {
    fn get(&mut self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned().map(from_json))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        log::trace!("Setting default {}", key);
        self.entries.insert(key.to_string(), to_json(&value)?);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileDefaults::open(dir.path().join("defaults.json")).unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_reopening() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.json");

        let mut store = JsonFileDefaults::open(&path).unwrap();
        store.set("Person.name", Value::from("Alice")).unwrap();
        store.set("Person.age", Value::from(30u32)).unwrap();
        assert!(path.exists());

        let mut reopened = JsonFileDefaults::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(
            reopened.get("Person.name").unwrap(),
            Some(Value::from("Alice"))
        );
        assert_eq!(
            reopened.get("Person.age").unwrap(),
            Some(Value::from(30i64))
        );
        assert_eq!(reopened.get("Person.email").unwrap(), None);
    }

    #[test]
    fn non_object_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            JsonFileDefaults::open(&path),
            Err(Error::NotAnObject { .. })
        ));
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(JsonFileDefaults::open(&path), Err(Error::Json(_))));
    }

    #[test]
    fn non_finite_floats_are_stored_as_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.json");

        let mut store = JsonFileDefaults::open(&path).unwrap();
        store.set("Range.low", Value::from(f64::NEG_INFINITY)).unwrap();
        store.set("Range.high", Value::from(f64::INFINITY)).unwrap();
        store.set("Range.mid", Value::from(f64::NAN)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"-inf\""));
        assert!(text.contains("\"NaN\""));

        let mut reopened = JsonFileDefaults::open(&path).unwrap();
        assert_eq!(reopened.get("Range.high").unwrap(), Some(Value::from("inf")));
    }
}

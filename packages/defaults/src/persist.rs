//! Saving and loading a value's named fields.

use fieldkit_mirror::{snapshot, FieldWrite, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{DefaultsStore, Result};

/// Key layout for persisted fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Namespace prepended to every key, for sharing one store between
    /// several independent sets of defaults.
    pub suite: Option<String>,
}

impl DefaultsConfig {
    pub fn with_suite(suite: impl Into<String>) -> Self {
        Self {
            suite: Some(suite.into()),
        }
    }

    /// `{type_name}.{label}`, or `{suite}.{type_name}.{label}`.
    pub fn key(&self, type_name: &str, label: &str) -> String {
        match &self.suite {
            Some(suite) => format!("{}.{}.{}", suite, type_name, label),
            None => format!("{}.{}", type_name, label),
        }
    }
}

fn named_fields(value: Value) -> Vec<(String, Value)> {
    value
        .into_children()
        .into_iter()
        .filter_map(|c| c.label.map(|label| (label, c.value)))
        .collect()
}

/// Store every named field of `v` under `{type_name}.{label}`.
///
/// Not transactional: a failure part-way leaves earlier fields stored.
pub fn save<T, S>(v: &T, store: &mut S) -> Result<()>
where
    T: Serialize + ?Sized,
    S: DefaultsStore + ?Sized,
{
    save_with(v, store, &DefaultsConfig::default())
}

pub fn save_with<T, S>(v: &T, store: &mut S, config: &DefaultsConfig) -> Result<()>
where
    T: Serialize + ?Sized,
    S: DefaultsStore + ?Sized,
{
    let value = snapshot(v);
    let type_name = value.type_name();
    for (label, field) in named_fields(value) {
        store.set(&config.key(&type_name, &label), field)?;
    }
    Ok(())
}

/// Default-construct a `T` and fill in every field found in `store`.
///
/// ```rust
/// use fieldkit_defaults::{load, save, InMemoryDefaults};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
/// struct Settings { theme: String, font_size: u8 }
///
/// let mut store = InMemoryDefaults::new();
/// save(&Settings { theme: "dark".into(), font_size: 14 }, &mut store).unwrap();
/// let loaded: Settings = load(&mut store).unwrap();
/// assert_eq!(loaded, Settings { theme: "dark".into(), font_size: 14 });
/// ```
pub fn load<T, S>(store: &mut S) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
    S: DefaultsStore + ?Sized,
{
    load_with(store, &DefaultsConfig::default())
}

pub fn load_with<T, S>(store: &mut S, config: &DefaultsConfig) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
    S: DefaultsStore + ?Sized,
{
    let mut target = T::default();
    let value = snapshot(&target);
    let type_name = value.type_name();

    let mut found = Vec::new();
    for (label, _) in named_fields(value) {
        if let Some(stored) = store.get(&config.key(&type_name, &label))? {
            found.push((label, stored));
        }
    }

    target.write_fields(found.iter().map(|(label, v)| (label.as_str(), v)))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryDefaults;
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Person {
        name: String,
        age: u32,
        active: bool,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Pet {
        name: String,
    }

    fn alice() -> Person {
        Person {
            name: "Alice".into(),
            age: 30,
            active: true,
        }
    }

    #[test]
    fn save_uses_type_prefixed_keys() {
        let mut store = InMemoryDefaults::new();
        save(&alice(), &mut store).unwrap();
        assert_eq!(
            store.keys().collect::<Vec<_>>(),
            vec!["Person.active", "Person.age", "Person.name"]
        );
    }

    #[test]
    fn round_trip() {
        let mut store = InMemoryDefaults::new();
        save(&alice(), &mut store).unwrap();
        let loaded: Person = load(&mut store).unwrap();
        assert_eq!(loaded, alice());
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let mut store = InMemoryDefaults::new();
        store.set("Person.name", Value::from("Bob")).unwrap();
        let loaded: Person = load(&mut store).unwrap();
        assert_eq!(
            loaded,
            Person {
                name: "Bob".into(),
                ..Person::default()
            }
        );
    }

    #[test]
    fn types_share_a_store_without_clashing() {
        let mut store = InMemoryDefaults::new();
        save(&alice(), &mut store).unwrap();
        save(&Pet { name: "Rex".into() }, &mut store).unwrap();
        let pet: Pet = load(&mut store).unwrap();
        let person: Person = load(&mut store).unwrap();
        assert_eq!(pet.name, "Rex");
        assert_eq!(person.name, "Alice");
    }

    #[test]
    fn suites_namespace_keys() {
        let config = DefaultsConfig::with_suite("test");
        let mut store = InMemoryDefaults::new();
        save_with(&alice(), &mut store, &config).unwrap();
        assert!(store.keys().all(|k| k.starts_with("test.Person.")));

        let plain: Person = load(&mut store).unwrap();
        assert_eq!(plain, Person::default());
        let scoped: Person = load_with(&mut store, &config).unwrap();
        assert_eq!(scoped, alice());
    }

    #[test]
    fn mistyped_stored_value_is_an_error() {
        let mut store = InMemoryDefaults::new();
        store.set("Person.age", Value::from("thirty")).unwrap();
        assert!(load::<Person, _>(&mut store).is_err());
    }

    #[test]
    fn non_finite_floats_round_trip() {
        #[derive(Debug, Default, Serialize, Deserialize)]
        struct Calibration {
            offset: f64,
            limit: f64,
        }
        let mut store = InMemoryDefaults::new();
        save(
            &Calibration {
                offset: f64::NAN,
                limit: f64::INFINITY,
            },
            &mut store,
        )
        .unwrap();
        let loaded: Calibration = load(&mut store).unwrap();
        assert!(loaded.offset.is_nan());
        assert_eq!(loaded.limit, f64::INFINITY);
    }
}

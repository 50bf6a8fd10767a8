//! Deep copy and initialisation from another value's fields.

use std::collections::BTreeSet;

use fieldkit_mirror::{from_value, snapshot, DisplayKind, FieldWrite, Result, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn labelled_children(value: Value) -> Vec<(String, Value)> {
    value
        .into_children()
        .into_iter()
        .filter_map(|c| c.label.map(|label| (label, c.value)))
        .collect()
}

/// Duplicate a value through its fields.
///
/// A record is default-constructed and every named field is written back
/// from an owned snapshot, so nested structure is duplicated rather than
/// shared. Values of other shapes are rebuilt from their snapshot whole.
pub fn deep_copy<T>(v: &T) -> Result<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    let value = snapshot(v);
    if value.kind() != DisplayKind::Record {
        return from_value(&value);
    }

    let fields = labelled_children(value);
    let mut copy = T::default();
    copy.write_fields(fields.iter().map(|(label, v)| (label.as_str(), v)))?;
    Ok(copy)
}

/// Build a `T` from the same-named fields of any serializable source.
///
/// Starts from `T::default()`; source fields `T` does not declare are
/// ignored, and fields the source lacks keep their default.
///
/// ```rust
/// use fieldkit_ops::init_from;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct Row { name: String, age: u32, extra: bool }
///
/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
/// struct Person { name: String, age: u32, email: String }
///
/// let row = Row { name: "Alice".into(), age: 30, extra: true };
/// let p: Person = init_from(&row).unwrap();
/// assert_eq!(p, Person { name: "Alice".into(), age: 30, email: String::new() });
/// ```
pub fn init_from<S, T>(source: &S) -> Result<T>
where
    S: Serialize + ?Sized,
    T: Default + Serialize + DeserializeOwned,
{
    let mut target = T::default();
    let declared: BTreeSet<String> = labelled_children(snapshot(&target))
        .into_iter()
        .map(|(label, _)| label)
        .collect();

    let fields: Vec<(String, Value)> = labelled_children(snapshot(source))
        .into_iter()
        .filter(|(label, _)| declared.contains(label))
        .collect();
    target.write_fields(fields.iter().map(|(label, v)| (label.as_str(), v)))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::reflective_equals;
    use crate::structure::to_dot_dict;
    use fieldkit_mirror::{Error, Tracked};
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Address {
        city: String,
        zip: u32,
    }

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    struct Customer {
        name: String,
        address: Address,
        tags: Vec<String>,
        email: Tracked<String>,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Meters(f64);

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Strict {
        age: u32,
    }

    fn jane() -> Customer {
        Customer {
            name: "Jane".into(),
            address: Address {
                city: "Paris".into(),
                zip: 12345,
            },
            tags: vec!["vip".into()],
            email: Tracked::new("jane@example.com".into()),
        }
    }

    #[test]
    fn deep_copy_duplicates_nested_records() {
        let original = jane();
        let copy = deep_copy(&original).unwrap();
        assert_eq!(copy, original);
        assert_eq!(to_dot_dict(&copy, ""), to_dot_dict(&original, ""));
        assert!(reflective_equals(&copy.address, &original.address));
    }

    #[test]
    fn deep_copy_of_non_records() {
        assert_eq!(deep_copy(&Meters(1.5)).unwrap(), Meters(1.5));
        assert_eq!(deep_copy(&vec![1, 2]).unwrap(), vec![1, 2]);
    }

    #[test]
    fn init_from_copies_shared_labels() {
        let address: Address = init_from(&jane()).unwrap();
        assert_eq!(address, Address::default());

        let copy: Customer = init_from(&jane().address).unwrap();
        assert_eq!(copy.address, Address::default());

        #[derive(Serialize)]
        struct Form {
            name: &'static str,
            unrelated: bool,
        }
        let c: Customer = init_from(&Form {
            name: "Ann",
            unrelated: true,
        })
        .unwrap();
        assert_eq!(c.name, "Ann");
    }

    #[test]
    fn init_from_rejects_wrong_shapes() {
        #[derive(Serialize)]
        struct Loose {
            age: &'static str,
        }
        let err = init_from::<_, Strict>(&Loose { age: "old" }).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn non_finite_and_unit_fields_are_copied() {
        #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
        struct Marker;
        #[derive(Debug, Default, Serialize, Deserialize)]
        struct Sensor {
            marker: Marker,
            value: f64,
            floor: f64,
        }
        let copy = deep_copy(&Sensor {
            marker: Marker,
            value: f64::NAN,
            floor: f64::NEG_INFINITY,
        })
        .unwrap();
        assert_eq!(copy.marker, Marker);
        assert!(copy.value.is_nan());
        assert_eq!(copy.floor, f64::NEG_INFINITY);
    }
}

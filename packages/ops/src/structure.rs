//! Structural operators: dictionaries and dotted flattening.

use std::collections::BTreeMap;

use fieldkit_mirror::{snapshot, Value};
use serde::Serialize;

/// Immediate named children as a label to value map.
///
/// Absent when any immediate child has no label.
pub fn to_dict<T: Serialize + ?Sized>(v: &T) -> Option<BTreeMap<String, Value>> {
    let mut dict = BTreeMap::new();
    for child in snapshot(v).into_children() {
        dict.insert(child.label?, child.value);
    }
    Some(dict)
}

/// Immediate named children as a map, skipping unlabelled ones.
pub fn labeled_fields<T: Serialize + ?Sized>(v: &T) -> BTreeMap<String, Value> {
    snapshot(v)
        .into_children()
        .into_iter()
        .filter_map(|c| c.label.map(|label| (label, c.value)))
        .collect()
}

/// Flatten a value into dotted paths to its leaves.
///
/// A value without children is a leaf stored under `prefix`. Otherwise each
/// labelled child is flattened under `prefix.label` (or `label` when the
/// prefix is empty). Unlabelled children are skipped; on key collisions the
/// last write wins.
///
/// ```rust
/// use fieldkit_ops::to_dot_dict;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Address { city: String }
/// #[derive(Serialize)]
/// struct Customer { name: String, address: Address }
///
/// let c = Customer { name: "Jane".into(), address: Address { city: "Paris".into() } };
/// let flat = to_dot_dict(&c, "");
/// assert_eq!(flat["address.city"].to_string(), "Paris");
/// ```
pub fn to_dot_dict<T: Serialize + ?Sized>(v: &T, prefix: &str) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    flatten_into(snapshot(v), prefix.to_string(), &mut out);
    out
}

fn flatten_into(value: Value, prefix: String, out: &mut BTreeMap<String, Value>) {
    if !value.has_children() {
        out.insert(prefix, value.into_peeled());
        return;
    }
    for child in value.into_children() {
        let Some(label) = child.label else {
            continue;
        };
        let key = if prefix.is_empty() {
            label
        } else {
            format!("{}.{}", prefix, label)
        };
        flatten_into(child.value, key, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    #[derive(Serialize)]
    struct Address {
        city: String,
        zip: u32,
    }

    #[derive(Serialize)]
    struct Customer {
        name: String,
        address: Address,
    }

    #[derive(Serialize)]
    struct Tagged {
        id: u8,
        tags: Vec<String>,
        none: Vec<String>,
    }

    fn jane() -> Customer {
        Customer {
            name: "Jane".into(),
            address: Address {
                city: "Paris".into(),
                zip: 12345,
            },
        }
    }

    #[test]
    fn to_dict_of_record() {
        let dict = to_dict(&jane()).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict["name"], Value::from("Jane"));
        assert_eq!(dict["address"].type_name(), "Address");
    }

    #[test]
    fn to_dict_fails_on_unlabelled_children() {
        assert_eq!(to_dict(&(1, 2)), None);
        assert_eq!(to_dict(&5), Some(BTreeMap::new()));
    }

    #[test]
    fn labeled_fields_skips_positions() {
        assert!(labeled_fields(&(1, 2)).is_empty());
        assert_eq!(labeled_fields(&jane()).len(), 2);
    }

    #[test]
    fn dot_dict_flattens_nested_records() {
        let expected: BTreeMap<String, Value> = btree! {
            "name".to_string() => Value::from("Jane"),
            "address.city".to_string() => Value::from("Paris"),
            "address.zip".to_string() => Value::from(12345u32),
        };
        assert_eq!(to_dot_dict(&jane(), ""), expected);
    }

    #[test]
    fn dot_dict_honours_prefix() {
        let flat = to_dot_dict(&jane(), "customer");
        assert!(flat.contains_key("customer.address.zip"));
        assert_eq!(to_dot_dict(&7, "n"), btree! { "n".to_string() => Value::from(7) });
    }

    #[test]
    fn dot_dict_skips_collection_elements() {
        let t = Tagged {
            id: 1,
            tags: vec!["a".into()],
            none: vec![],
        };
        let flat = to_dot_dict(&t, "");
        assert_eq!(flat.len(), 2);
        assert!(flat.contains_key("id"));
        assert_eq!(flat["none"], Value::Seq(vec![]));
    }
}

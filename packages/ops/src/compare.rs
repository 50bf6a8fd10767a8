//! Comparison operators.
//!
//! All comparisons are textual: two values are equal when they render the
//! same. `1` and `1.0` differ; a set whose iteration order changed may too.

use std::collections::BTreeMap;

use fieldkit_mirror::{snapshot, Scalar, Value};
use serde::Serialize;

fn changed_fields<T: Serialize + ?Sized>(old: &T, new: &T) -> Vec<(String, Value)> {
    snapshot(old)
        .into_children()
        .into_iter()
        .zip(snapshot(new).into_children())
        .filter_map(|(o, n)| {
            let label = o.label?;
            (o.value.to_string() != n.value.to_string()).then_some((label, n.value))
        })
        .collect()
}

/// Labels whose values changed, mapped to the new value.
///
/// Children are paired by position; unlabelled children contribute nothing.
pub fn diff<T: Serialize + ?Sized>(old: &T, new: &T) -> BTreeMap<String, Value> {
    changed_fields(old, new).into_iter().collect()
}

/// Like [`diff`], as a sequence in declaration order.
pub fn patch<T: Serialize + ?Sized>(old: &T, new: &T) -> Vec<(String, Value)> {
    changed_fields(old, new)
}

/// Same child count and pairwise equal renderings. Labels are not compared.
pub fn reflective_equals<A, B>(a: &A, b: &B) -> bool
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    let left = snapshot(a).into_children();
    let right = snapshot(b).into_children();
    left.len() == right.len()
        && left
            .iter()
            .zip(&right)
            .all(|(l, r)| l.value.to_string() == r.value.to_string())
}

/// Case-insensitive substring search over every value reachable from `v`.
///
/// Strings are searched as-is, other leaves through their rendering, and
/// containers recursively through their children.
pub fn deep_search<T: Serialize + ?Sized>(v: &T, query: &str) -> bool {
    let query = query.to_lowercase();
    matches_value(&snapshot(v), &query)
}

fn matches_value(value: &Value, query: &str) -> bool {
    match value.peeled() {
        Value::Scalar(Scalar::Str(s)) => s.to_lowercase().contains(query),
        Value::Scalar(_) | Value::Opaque(_) => value.to_string().to_lowercase().contains(query),
        Value::Variant { variant, .. } if variant.to_lowercase().contains(query) => true,
        container => container
            .children()
            .iter()
            .any(|c| matches_value(&c.value, query)),
    }
}

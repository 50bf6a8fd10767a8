//! Type predicates and field accessors.
//!
//! Thin queries over a value's mirror. Every lookup searches immediate
//! children only and returns the first match.

use std::collections::BTreeSet;

use fieldkit_mirror::{
    ancestry, display_kind, introspect, snapshot, type_name_of, Child, DisplayKind, Layered,
    Value,
};
use serde::Serialize;

pub fn is_record<T: Serialize + ?Sized>(v: &T) -> bool {
    display_kind(v) == DisplayKind::Record
}

pub fn is_sum<T: Serialize + ?Sized>(v: &T) -> bool {
    display_kind(v) == DisplayKind::Sum
}

pub fn is_optional<T: Serialize + ?Sized>(v: &T) -> bool {
    display_kind(v) == DisplayKind::Optional
}

pub fn is_tuple<T: Serialize + ?Sized>(v: &T) -> bool {
    display_kind(v) == DisplayKind::Tuple
}

pub fn is_keyed_collection<T: Serialize + ?Sized>(v: &T) -> bool {
    display_kind(v) == DisplayKind::KeyedCollection
}

pub fn is_collection<T: Serialize + ?Sized>(v: &T) -> bool {
    display_kind(v) == DisplayKind::Collection
}

/// Unwrap one level of optional.
///
/// Non-optional values come back as `(true, Some(v))`, an empty optional as
/// `(false, None)`. Nested optionals are not unwrapped further.
pub fn unwrap_optional<T: Serialize + ?Sized>(v: &T) -> (bool, Option<Value>) {
    match snapshot(v).into_peeled() {
        Value::Optional(None) => (false, None),
        Value::Optional(Some(inner)) => (true, Some(*inner)),
        other => (true, Some(other)),
    }
}

/// Value of the first immediate child labelled `label`.
pub fn field_value<T: Serialize + ?Sized>(v: &T, label: &str) -> Option<Value> {
    value_where(v, |l| l == label)
}

/// Runtime type name of the field labelled `label`.
pub fn field_type<T: Serialize + ?Sized>(v: &T, label: &str) -> Option<String> {
    field_value(v, label).map(|value| value.type_name())
}

/// Value of the first immediate child whose label satisfies `predicate`.
pub fn value_where<T, P>(v: &T, predicate: P) -> Option<Value>
where
    T: Serialize + ?Sized,
    P: Fn(&str) -> bool,
{
    children(v)
        .into_iter()
        .find(|c| c.label().is_some_and(&predicate))
        .map(|c| c.value)
}

pub fn child_at<T: Serialize + ?Sized>(v: &T, index: usize) -> Option<Value> {
    children(v).into_iter().nth(index).map(|c| c.value)
}

/// Label of the child at `index`; absent when out of bounds or unlabelled.
pub fn label_at<T: Serialize + ?Sized>(v: &T, index: usize) -> Option<String> {
    children(v).into_iter().nth(index).and_then(|c| c.label)
}

pub fn children<T: Serialize + ?Sized>(v: &T) -> Vec<Child> {
    snapshot(v).into_children()
}

/// Labels of the labelled immediate children, in declaration order.
pub fn labels<T: Serialize + ?Sized>(v: &T) -> Vec<String> {
    children(v).into_iter().filter_map(|c| c.label).collect()
}

pub fn values<T: Serialize + ?Sized>(v: &T) -> Vec<Value> {
    children(v).into_iter().map(|c| c.value).collect()
}

pub fn property_count<T: Serialize + ?Sized>(v: &T) -> usize {
    snapshot(v).child_count()
}

/// Elements of an anonymous tuple or tuple struct; `None` for other shapes.
pub fn tuple_elements<T: Serialize + ?Sized>(v: &T) -> Option<Vec<Value>> {
    let value = snapshot(v);
    if value.kind() != DisplayKind::Tuple {
        return None;
    }
    Some(value.into_children().into_iter().map(|c| c.value).collect())
}

/// Labels across every layer of a value's ancestry, first-seen order,
/// without duplicates.
pub fn all_labels_in_ancestry(v: &dyn Layered) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut labels = Vec::new();
    for layer in ancestry(v) {
        for label in layer.labels() {
            if seen.insert(label.to_string()) {
                labels.push(label.to_string());
            }
        }
    }
    labels
}

pub fn all_values_in_ancestry(v: &dyn Layered) -> Vec<Value> {
    all_children_in_ancestry(v)
        .into_iter()
        .map(|c| c.value)
        .collect()
}

pub fn all_children_in_ancestry(v: &dyn Layered) -> Vec<Child> {
    ancestry(v)
        .into_iter()
        .flat_map(|layer| layer.into_children())
        .collect()
}

/// Name of the type the value was reflected from.
///
/// For enum values this is the enum's name; see [`fieldkit_mirror::Mirror::variant`]
/// for the active case.
pub fn subject_type_name<T: Serialize + ?Sized>(v: &T) -> String {
    introspect(v).type_name().to_string()
}

/// Static type name of `T` with module paths stripped.
pub fn type_name<T: ?Sized>(_v: &T) -> String {
    type_name_of::<T>()
}

/// Type name of the layer a value is composed on.
pub fn super_type_name(v: &dyn Layered) -> Option<String> {
    v.parent_layer()
        .map(|parent| introspect(parent).type_name().to_string())
}

/// Labels of a default-constructed `T`, joined by `", "`.
pub fn columns<T: Default + Serialize>() -> String {
    labels(&T::default()).join(", ")
}

/// Label to default value, for every named field of `T`.
pub fn property_defaults<T: Default + Serialize>() -> Vec<(String, Value)> {
    children(&T::default())
        .into_iter()
        .filter_map(|c| c.label.map(|label| (label, c.value)))
        .collect()
}

//! Sorting by a named field.

use std::cmp::Ordering;

use fieldkit_mirror::{Scalar, Value};
use serde::Serialize;

use crate::access::field_value;

/// Stable in-place sort of `xs` by the field labelled `label`.
///
/// Two keys compare only when both are present scalars of the same type and
/// are ordered with respect to each other. Every other pair counts as equal
/// and keeps its relative order.
///
/// ```rust
/// use fieldkit_ops::sort_by_field;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Person { name: &'static str, age: u32 }
///
/// let mut people = vec![Person { name: "B", age: 40 }, Person { name: "A", age: 30 }];
/// sort_by_field(&mut people, "age");
/// assert_eq!(people[0].name, "A");
/// ```
pub fn sort_by_field<T: Serialize>(xs: &mut [T], label: &str) {
    let keys: Vec<Option<Scalar>> = xs
        .iter()
        .map(|x| {
            field_value(x, label)
                .map(Value::into_peeled)
                .and_then(|v| match v {
                    Value::Scalar(s) => Some(s),
                    _ => None,
                })
        })
        .collect();

    let order = stable_order(&keys);
    apply_order(xs, order);
}

fn compare_keys(a: &Option<Scalar>, b: &Option<Scalar>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Indices of `keys` in stably sorted order.
///
/// A bottom-up merge sort over indices. It only ever asks "is right strictly
/// less than left", so an inconsistent order degrades the result instead of
/// panicking.
fn stable_order(keys: &[Option<Scalar>]) -> Vec<usize> {
    let n = keys.len();
    let mut order: Vec<usize> = (0..n).collect();
    let mut buffer = Vec::with_capacity(n);
    let mut width = 1;
    while width < n {
        buffer.clear();
        let mut start = 0;
        while start < n {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            let (mut i, mut j) = (start, mid);
            while i < mid && j < end {
                if compare_keys(&keys[order[j]], &keys[order[i]]) == Ordering::Less {
                    buffer.push(order[j]);
                    j += 1;
                } else {
                    buffer.push(order[i]);
                    i += 1;
                }
            }
            buffer.extend_from_slice(&order[i..mid]);
            buffer.extend_from_slice(&order[j..end]);
            start = end;
        }
        std::mem::swap(&mut order, &mut buffer);
        width *= 2;
    }
    order
}

/// Rearrange `xs` so that position `i` holds the element that was at
/// `order[i]`.
///
/// Walks each cycle of the permutation once, so every element moves at most
/// once.
fn apply_order<T>(xs: &mut [T], order: Vec<usize>) {
    let mut placed = vec![false; order.len()];
    for start in 0..order.len() {
        if placed[start] {
            continue;
        }
        let mut i = start;
        loop {
            placed[i] = true;
            let src = order[i];
            if src == start {
                break;
            }
            // Position src holds the element that started this cycle.
            xs.swap(i, src);
            i = src;
        }
    }
}

/// Sort-by-field as a method on slices.
pub trait SortByField {
    fn sort_by_field(&mut self, label: &str);
}

impl<T: Serialize> SortByField for [T] {
    fn sort_by_field(&mut self, label: &str) {
        sort_by_field(self, label)
    }
}

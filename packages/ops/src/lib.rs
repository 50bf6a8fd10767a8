//! fieldkit ops: generic operators over the Field Introspection Protocol
//!
//! Every operator here takes any `serde::Serialize` value, reads its mirror
//! and produces text, a structure, or a new value:
//! - [`access`]: kind predicates, field lookup by label or position, ancestry
//! - [`text`]: `describe`, `stable_describe`, `query_string`, CSV
//! - [`structure`]: label maps and dotted flattening
//! - [`compare`]: textual diff, patch, equality and deep search
//! - [`sort`], [`copy`], [`fuzz`]: sorting by field, deep copy, random fixtures
//! - [`tracked`], [`tree`], [`wire`]: marker-driven helpers
//!
//! # Example
//!
//! ```rust
//! use fieldkit_ops::{diff, query_string, stable_describe};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Person { name: String, age: u32 }
//!
//! let alice = Person { name: "Alice".into(), age: 30 };
//! assert_eq!(query_string(&alice), "name=Alice&age=30");
//! assert_eq!(stable_describe(&alice), "age=30\nname=Alice");
//!
//! let older = Person { name: "Alice".into(), age: 31 };
//! assert_eq!(diff(&alice, &older).len(), 1);
//! ```

pub mod access;
pub mod compare;
pub mod copy;
pub mod fuzz;
pub mod sort;
pub mod structure;
pub mod text;
pub mod tracked;
pub mod tree;
pub mod wire;

pub use access::{
    all_children_in_ancestry, all_labels_in_ancestry, all_values_in_ancestry, child_at, children,
    columns, field_type, field_value, is_collection, is_keyed_collection, is_optional, is_record,
    is_sum, is_tuple, label_at, labels, property_count, property_defaults, subject_type_name,
    super_type_name, tuple_elements, type_name, unwrap_optional, value_where, values,
};
pub use compare::{deep_search, diff, patch, reflective_equals};
pub use copy::{deep_copy, init_from};
pub use fuzz::{fuzz, fuzz_with, FuzzConfig};
pub use sort::{sort_by_field, SortByField};
pub use structure::{labeled_fields, to_dict, to_dot_dict};
pub use text::{describe, query_string, stable_describe, textual, to_csv, CsvTable};
pub use tracked::gather_tracked;
pub use tree::{dot_graph, dot_graph_with, tree_dfs, tree_levels, TreeLike};
pub use wire::{auto_wire, Container, Injectable, SimpleContainer, WireType};

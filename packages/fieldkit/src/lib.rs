//! fieldkit: runtime structural introspection for any serde value.
//!
//! fieldkit enumerates a value's named fields in declaration order and runs
//! generic operators over them, so debug output, CSV and query strings,
//! change detection, form-field tracking, wiring and tree walks need no
//! per-type boilerplate.
//!
//! The crates, leaves first:
//! - `fieldkit-mirror`: the Field Introspection Protocol (`introspect`,
//!   `Value`, `Mirror`, `FieldWrite`, `Tracked`)
//! - `fieldkit-ops`: the operators
//! - `fieldkit-defaults`: persistence of named fields in a key/value store

pub use fieldkit_defaults as defaults;
pub use fieldkit_mirror as mirror;
pub use fieldkit_ops as ops;

pub use fieldkit_mirror::{
    ancestry, display_kind, from_value, introspect, snapshot, Child, DisplayKind, Error,
    FieldPath, FieldWrite, Layered, Mirror, Result, Scalar, Tracked, Value,
};

pub use fieldkit_ops::{
    auto_wire, deep_copy, deep_search, describe, diff, dot_graph, dot_graph_with, field_value,
    fuzz, fuzz_with, gather_tracked, init_from, patch, query_string, reflective_equals,
    sort_by_field, stable_describe, textual, to_csv, to_dict, to_dot_dict, tree_dfs, tree_levels,
    Container, CsvTable, FuzzConfig, Injectable, SimpleContainer, SortByField, TreeLike, WireType,
};

pub use fieldkit_defaults::{DefaultsConfig, DefaultsStore, InMemoryDefaults, JsonFileDefaults};

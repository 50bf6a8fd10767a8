//! fieldkit mirror: the Field Introspection Protocol
//!
//! Every operator in fieldkit works on one primitive, the [`Mirror`] of a
//! value: its display kind plus its ordered, optionally labelled children.
//! This layer derives mirrors from `serde::Serialize`:
//! - `Value`: owned structural snapshot (type names, declaration order,
//!   numeric widths)
//! - `Mirror` / `Child` / `DisplayKind`: the structural view
//! - `FieldWrite`: assignment of named fields by label
//! - `Tracked`: field marker for tracked-field gathering
//! - `Layered`: composition-based ancestry
//!
//! # Example
//!
//! ```rust
//! use fieldkit_mirror::{introspect, DisplayKind};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Person { name: String, age: u32 }
//!
//! let mirror = introspect(&Person { name: "Alice".into(), age: 30 });
//! assert_eq!(mirror.kind(), DisplayKind::Record);
//! assert_eq!(mirror.labels(), vec!["name", "age"]);
//! ```

mod convert;
mod de;
mod error;
mod mirror;
mod path;
mod serializer;
mod tracked;
mod type_name;
mod value;
mod write;

pub use convert::{from_json, from_value, to_json};
pub use error::{Error, Result};
pub use mirror::{
    ancestry, display_kind, introspect, snapshot, try_snapshot, Child, DisplayKind, Layered,
    Mirror,
};
pub use path::FieldPath;
pub use serializer::SnapshotError;
pub use tracked::Tracked;
pub use type_name::{short_type_name, type_name_of, type_name_of_val};
pub use value::{Scalar, Value, SOME_LABEL};
pub use write::FieldWrite;

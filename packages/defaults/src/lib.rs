//! fieldkit defaults: persisting a value's named fields in a key/value store
//!
//! - `DefaultsStore`: the two-method store interface
//! - `InMemoryDefaults`, `JsonFileDefaults`: reference stores
//! - `save` / `load`: one store entry per named field, keyed
//!   `{type_name}.{label}`
//!
//! # Example
//!
//! ```rust
//! use fieldkit_defaults::{load, save, JsonFileDefaults};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
//! struct Window { width: u32, maximised: bool }
//!
//! let dir = tempfile::TempDir::new().unwrap();
//! let path = dir.path().join("defaults.json");
//!
//! let mut store = JsonFileDefaults::open(&path).unwrap();
//! save(&Window { width: 800, maximised: true }, &mut store).unwrap();
//!
//! let mut reopened = JsonFileDefaults::open(&path).unwrap();
//! let window: Window = load(&mut reopened).unwrap();
//! assert_eq!(window, Window { width: 800, maximised: true });
//! ```

mod error;
mod in_memory;
mod json_file;
mod persist;
mod store;

pub use error::{Error, Result};
pub use in_memory::InMemoryDefaults;
pub use json_file::JsonFileDefaults;
pub use persist::{load, load_with, save, save_with, DefaultsConfig};
pub use store::DefaultsStore;

//! Textual operators: descriptions, query strings and CSV.
//!
//! Cells are rendered with [`textual`]. Nothing is escaped or
//! percent-encoded; callers post-process when the target format needs it.

use std::fmt;

use fieldkit_mirror::{snapshot, Child};
use serde::Serialize;

/// The conventional display rendering of a value.
///
/// Top-level strings render without quotes; containers render their
/// contents the way `Debug` would (`[1, 2]`, `Person { name: "Alice" }`).
pub fn textual<T: Serialize + ?Sized>(v: &T) -> String {
    snapshot(v).to_string()
}

fn labelled(children: Vec<Child>) -> impl Iterator<Item = (String, String)> {
    children
        .into_iter()
        .filter_map(|c| c.label.map(|label| (label, c.value.to_string())))
}

/// `label: value` pairs joined by `", "`. Unlabelled children show as `_`.
///
/// ```rust
/// use fieldkit_ops::describe;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Person { name: String, age: u32 }
///
/// let p = Person { name: "Alice".into(), age: 30 };
/// assert_eq!(describe(&p), "name: Alice, age: 30");
/// ```
pub fn describe<T: Serialize + ?Sized>(v: &T) -> String {
    snapshot(v)
        .into_children()
        .into_iter()
        .map(|c| format!("{}: {}", c.label.as_deref().unwrap_or("_"), c.value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `label=value` lines sorted by label. Unlabelled children are omitted.
pub fn stable_describe<T: Serialize + ?Sized>(v: &T) -> String {
    let mut pairs: Vec<(String, String)> = labelled(snapshot(v).into_children()).collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
        .into_iter()
        .map(|(label, text)| format!("{}={}", label, text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `label=value` pairs in declaration order joined by `&`.
pub fn query_string<T: Serialize + ?Sized>(v: &T) -> String {
    labelled(snapshot(v).into_children())
        .map(|(label, text)| format!("{}={}", label, text))
        .collect::<Vec<_>>()
        .join("&")
}

/// A CSV header line plus one line per row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub header: String,
    pub rows: Vec<String>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Header and rows, newline separated.
impl fmt::Display for CsvTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        for row in &self.rows {
            write!(f, "\n{}", row)?;
        }
        Ok(())
    }
}

/// Render a homogeneous slice as CSV.
///
/// The header holds the labels of the first element. Each row holds every
/// child of its element by position, labelled or not.
pub fn to_csv<T: Serialize>(vs: &[T]) -> CsvTable {
    let Some(first) = vs.first() else {
        return CsvTable::default();
    };

    let header = snapshot(first)
        .into_children()
        .into_iter()
        .filter_map(|c| c.label)
        .collect::<Vec<_>>()
        .join(",");

    let rows = vs
        .iter()
        .map(|v| {
            snapshot(v)
                .into_children()
                .into_iter()
                .map(|c| c.value.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();

    CsvTable { header, rows }
}

//! Mirrors: the structural view of a value.

use serde::Serialize;

use crate::serializer::Snapshotter;
use crate::{Error, Result, Value};

/// The shape a value is reflected as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayKind {
    /// Struct with named fields (including unit structs).
    Record,
    /// Tuple, tuple struct or newtype struct; children carry no labels.
    Tuple,
    /// Enum variant.
    Sum,
    /// `Option<T>`.
    Optional,
    /// Ordered collection.
    Collection,
    /// Keyed collection.
    KeyedCollection,
    /// Leaf without children.
    Scalar,
}

/// One (optional label, value) pair of a mirror.
#[derive(Clone, Debug, PartialEq)]
pub struct Child {
    /// Field label; absent for positional children.
    pub label: Option<String>,
    /// The child value, with any trackable marker stripped.
    pub value: Value,
    /// Whether the field value carried the trackable marker.
    pub tracked: bool,
    /// Display kind of the parent this child was reflected from.
    pub parent: DisplayKind,
}

impl Child {
    pub(crate) fn new(label: Option<String>, value: Value, parent: DisplayKind) -> Self {
        let tracked = value.is_tracked();
        Self {
            label,
            value: value.into_peeled(),
            tracked,
            parent,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Display kind plus ordered children of a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Mirror {
    type_name: String,
    variant: Option<&'static str>,
    kind: DisplayKind,
    children: Vec<Child>,
}

impl Mirror {
    pub(crate) fn new(
        type_name: String,
        variant: Option<&'static str>,
        kind: DisplayKind,
        children: Vec<Child>,
    ) -> Self {
        Self {
            type_name,
            variant,
            kind,
            children,
        }
    }

    /// Name of the reflected type (the enum name for sum types).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Name of the active variant, for sum types.
    pub fn variant(&self) -> Option<&'static str> {
        self.variant
    }

    pub fn kind(&self) -> DisplayKind {
        self.kind
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Child> {
        self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Labels of the labelled children, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.children.iter().filter_map(Child::label).collect()
    }

    /// First child whose label equals `label`.
    pub fn child(&self, label: &str) -> Option<&Child> {
        self.children.iter().find(|c| c.label() == Some(label))
    }
}

/// Capture a structural snapshot of any serializable value.
///
/// Never fails: a value whose `Serialize` impl errors becomes `Value::Opaque`.
pub fn snapshot<T: Serialize + ?Sized>(value: &T) -> Value {
    try_snapshot(value).unwrap_or_else(|e| {
        log::trace!("value could not be introspected: {}", e);
        Value::Opaque(e.to_string())
    })
}

/// Capture a structural snapshot, surfacing serialization failures.
pub fn try_snapshot<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(Snapshotter).map_err(Error::encode)
}

/// Reflect a value: its display kind and ordered children.
pub fn introspect<T: Serialize + ?Sized>(value: &T) -> Mirror {
    snapshot(value).into_mirror()
}

/// The display kind of a value.
pub fn display_kind<T: Serialize + ?Sized>(value: &T) -> DisplayKind {
    snapshot(value).kind()
}

/// A value that may be composed on top of another layer.
///
/// Composition stands in for inheritance: a type embedding a base value
/// reports it here so ancestry-aware helpers can walk upward.
///
/// ```rust
/// use fieldkit_mirror::{ancestry, Layered};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Animal { name: String }
/// impl Layered for Animal {}
///
/// #[derive(Serialize)]
/// struct Dog { animal: Animal, breed: String }
/// impl Layered for Dog {
///     fn parent_layer(&self) -> Option<&dyn Layered> {
///         Some(&self.animal)
///     }
/// }
///
/// let dog = Dog { animal: Animal { name: "Rex".into() }, breed: "Pug".into() };
/// let layers = ancestry(&dog);
/// assert_eq!(layers.len(), 2);
/// assert_eq!(layers[1].type_name(), "Animal");
/// ```
pub trait Layered: erased_serde::Serialize {
    /// The layer this value is composed on, if any.
    fn parent_layer(&self) -> Option<&dyn Layered> {
        None
    }
}

erased_serde::serialize_trait_object!(Layered);

/// Mirrors of a value followed by each composed layer, upward.
pub fn ancestry(value: &dyn Layered) -> Vec<Mirror> {
    let mut layers = Vec::new();
    let mut current = Some(value);
    while let Some(layer) = current {
        layers.push(introspect(layer));
        current = layer.parent_layer();
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde::Serializer;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Person {
        name: String,
        age: u32,
        active: bool,
    }

    #[derive(Serialize)]
    struct Point(i32, i32);

    #[derive(Serialize)]
    enum FeedItem {
        Text(String),
        Image { url: String, caption: Option<String> },
        Empty,
    }

    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("refused"))
        }
    }

    #[test]
    fn record_children_follow_declaration_order() {
        let m = introspect(&Person {
            name: "Alice".into(),
            age: 30,
            active: true,
        });
        assert_eq!(m.kind(), DisplayKind::Record);
        assert_eq!(m.type_name(), "Person");
        assert_eq!(m.labels(), vec!["name", "age", "active"]);
    }

    #[test]
    fn tuple_struct_children_are_unlabelled() {
        let m = introspect(&Point(1, 2));
        assert_eq!(m.kind(), DisplayKind::Tuple);
        assert!(m.children().iter().all(|c| c.label.is_none()));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn newtype_variant_has_single_child_named_after_variant() {
        let m = introspect(&FeedItem::Text("lorem".into()));
        assert_eq!(m.kind(), DisplayKind::Sum);
        assert_eq!(m.type_name(), "FeedItem");
        assert_eq!(m.variant(), Some("Text"));
        assert_eq!(m.len(), 1);
        assert_eq!(m.children()[0].label(), Some("Text"));
        assert_eq!(m.children()[0].value, Value::from("lorem"));
    }

    #[test]
    fn struct_variant_payload_is_a_record() {
        let m = introspect(&FeedItem::Image {
            url: "https://img".into(),
            caption: Some("desc".into()),
        });
        let payload = &m.children()[0].value;
        assert_eq!(payload.kind(), DisplayKind::Record);
        assert_eq!(payload.mirror().labels(), vec!["url", "caption"]);
    }

    #[test]
    fn unit_variant_has_no_children() {
        let m = introspect(&FeedItem::Empty);
        assert_eq!(m.kind(), DisplayKind::Sum);
        assert!(m.is_empty());
    }

    #[test]
    fn optionals_have_zero_or_one_child() {
        assert_eq!(introspect(&None::<i32>).len(), 0);
        assert_eq!(introspect(&Some(5)).len(), 1);
        assert_eq!(display_kind(&Some(5)), DisplayKind::Optional);
    }

    #[test]
    fn scalars_have_no_children() {
        let m = introspect(&42u8);
        assert_eq!(m.kind(), DisplayKind::Scalar);
        assert!(m.is_empty());
        assert_eq!(m.type_name(), "u8");
    }

    #[test]
    fn collections() {
        assert_eq!(display_kind(&vec![1, 2]), DisplayKind::Collection);
        let mut map = BTreeMap::new();
        map.insert("a", 1);
        assert_eq!(display_kind(&map), DisplayKind::KeyedCollection);
        assert_eq!(display_kind(&(1, "x")), DisplayKind::Tuple);
    }

    #[test]
    fn failing_serialize_is_opaque() {
        let m = introspect(&Broken);
        assert_eq!(m.kind(), DisplayKind::Scalar);
        assert!(m.is_empty());
        assert!(try_snapshot(&Broken).is_err());
    }

    #[test]
    fn introspection_is_stable() {
        let p = Person {
            name: "Bob".into(),
            age: 4,
            active: false,
        };
        assert_eq!(introspect(&p), introspect(&p));
    }
}

//! The Value type - an order-preserving structural snapshot.
//!
//! A `Value` is what the introspecting serializer captures from any
//! `Serialize` type. Unlike a JSON tree it keeps type names, declaration
//! order, numeric widths and the difference between records, tuples,
//! enum variants and optionals.

use std::cmp::Ordering;
use std::fmt;

use crate::mirror::{Child, DisplayKind, Mirror};
use crate::path::FieldPath;

/// Label carried by the single child of a present optional.
pub const SOME_LABEL: &str = "some";

/// A leaf value. Numeric variants keep the width they were serialized with.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
}

impl Scalar {
    /// The Rust name of the scalar's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Unit => "()",
            Scalar::Bool(_) => "bool",
            Scalar::I8(_) => "i8",
            Scalar::I16(_) => "i16",
            Scalar::I32(_) => "i32",
            Scalar::I64(_) => "i64",
            Scalar::I128(_) => "i128",
            Scalar::U8(_) => "u8",
            Scalar::U16(_) => "u16",
            Scalar::U32(_) => "u32",
            Scalar::U64(_) => "u64",
            Scalar::U128(_) => "u128",
            Scalar::F32(_) => "f32",
            Scalar::F64(_) => "f64",
            Scalar::Char(_) => "char",
            Scalar::Str(_) => "String",
            Scalar::Bytes(_) => "Bytes",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Scalar::I8(_)
                | Scalar::I16(_)
                | Scalar::I32(_)
                | Scalar::I64(_)
                | Scalar::I128(_)
                | Scalar::U8(_)
                | Scalar::U16(_)
                | Scalar::U32(_)
                | Scalar::U64(_)
                | Scalar::U128(_)
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Scalar::F32(_) | Scalar::F64(_))
    }

    /// Compare two scalars of the same type.
    ///
    /// Returns `None` when the types differ or the values are unordered
    /// (NaN).
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Unit, Scalar::Unit) => Some(Ordering::Equal),
            (Scalar::Bool(a), Scalar::Bool(b)) => a.partial_cmp(b),
            (Scalar::I8(a), Scalar::I8(b)) => a.partial_cmp(b),
            (Scalar::I16(a), Scalar::I16(b)) => a.partial_cmp(b),
            (Scalar::I32(a), Scalar::I32(b)) => a.partial_cmp(b),
            (Scalar::I64(a), Scalar::I64(b)) => a.partial_cmp(b),
            (Scalar::I128(a), Scalar::I128(b)) => a.partial_cmp(b),
            (Scalar::U8(a), Scalar::U8(b)) => a.partial_cmp(b),
            (Scalar::U16(a), Scalar::U16(b)) => a.partial_cmp(b),
            (Scalar::U32(a), Scalar::U32(b)) => a.partial_cmp(b),
            (Scalar::U64(a), Scalar::U64(b)) => a.partial_cmp(b),
            (Scalar::U128(a), Scalar::U128(b)) => a.partial_cmp(b),
            (Scalar::F32(a), Scalar::F32(b)) => a.partial_cmp(b),
            (Scalar::F64(a), Scalar::F64(b)) => a.partial_cmp(b),
            (Scalar::Char(a), Scalar::Char(b)) => a.partial_cmp(b),
            (Scalar::Str(a), Scalar::Str(b)) => a.partial_cmp(b),
            (Scalar::Bytes(a), Scalar::Bytes(b)) => a.partial_cmp(b),
            _ => None,
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Scalar::Unit => write!(f, "()"),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::I8(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::I128(v) => write!(f, "{}", v),
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
            Scalar::U128(v) => write!(f, "{}", v),
            // Debug keeps the fractional part, so 1.0 never renders as 1.
            Scalar::F32(v) => write!(f, "{:?}", v),
            Scalar::F64(v) => write!(f, "{:?}", v),
            Scalar::Char(v) if nested => write!(f, "{:?}", v),
            Scalar::Char(v) => write!(f, "{}", v),
            Scalar::Str(v) if nested => write!(f, "{:?}", v),
            Scalar::Str(v) => write!(f, "{}", v),
            Scalar::Bytes(v) => write!(f, "{:?}", v),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

/// An owned structural snapshot of a value.
///
/// # Design Notes
///
/// - `Record` fields and `Map` entries are `Vec`s so declaration and
///   iteration order survive
/// - `Tracked` wraps a field value that carries the trackable marker; it is
///   transparent for rendering and for the children of its parent
/// - `Opaque` stands in for a value whose `Serialize` impl failed
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A leaf.
    Scalar(Scalar),
    /// `Option<T>`.
    Optional(Option<Box<Value>>),
    /// Ordered collection (`Vec`, slices, sets).
    Seq(Vec<Value>),
    /// Anonymous tuple.
    Tuple(Vec<Value>),
    /// Keyed collection, in iteration order.
    Map(Vec<(Value, Value)>),
    /// Struct with named fields, braced struct without fields, or
    /// struct-variant payload.
    Record {
        name: &'static str,
        fields: Vec<(String, Value)>,
    },
    /// Unit struct (`struct Marker;`).
    UnitRecord { name: &'static str },
    /// Tuple struct or newtype struct.
    TupleRecord {
        name: &'static str,
        elements: Vec<Value>,
    },
    /// Enum value. The payload is the newtype value, a `Tuple` or a `Record`.
    Variant {
        name: &'static str,
        variant: &'static str,
        payload: Option<Box<Value>>,
    },
    /// A value marked as trackable.
    Tracked(Box<Value>),
    /// A value that could not be introspected.
    Opaque(String),
}

impl Value {
    /// Create a string leaf.
    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    /// The display kind this value is reflected as.
    pub fn kind(&self) -> DisplayKind {
        match self {
            Value::Scalar(_) | Value::Opaque(_) => DisplayKind::Scalar,
            Value::Optional(_) => DisplayKind::Optional,
            Value::Seq(_) => DisplayKind::Collection,
            Value::Tuple(_) | Value::TupleRecord { .. } => DisplayKind::Tuple,
            Value::Map(_) => DisplayKind::KeyedCollection,
            Value::Record { .. } | Value::UnitRecord { .. } => DisplayKind::Record,
            Value::Variant { .. } => DisplayKind::Sum,
            Value::Tracked(inner) => inner.kind(),
        }
    }

    /// The runtime type name of this value.
    ///
    /// Records, tuple structs and enums report their declared name; other
    /// shapes report a structural name (`Vec`, `Map`, `Option`, `(i32, bool)`).
    pub fn type_name(&self) -> String {
        match self {
            Value::Scalar(s) => s.type_name().to_string(),
            Value::Optional(_) => "Option".to_string(),
            Value::Seq(_) => "Vec".to_string(),
            Value::Tuple(items) => {
                let names: Vec<String> = items.iter().map(Value::type_name).collect();
                format!("({})", names.join(", "))
            }
            Value::Map(_) => "Map".to_string(),
            Value::Record { name, .. }
            | Value::UnitRecord { name }
            | Value::TupleRecord { name, .. }
            | Value::Variant { name, .. } => name.to_string(),
            Value::Tracked(inner) => format!("Tracked<{}>", inner.type_name()),
            Value::Opaque(_) => "Opaque".to_string(),
        }
    }

    /// The enum variant name, for sum-type values.
    pub fn variant(&self) -> Option<&'static str> {
        match self {
            Value::Variant { variant, .. } => Some(*variant),
            Value::Tracked(inner) => inner.variant(),
            _ => None,
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self, Value::Tracked(_))
    }

    /// Strip the trackable marker, if any.
    pub fn peeled(&self) -> &Value {
        match self {
            Value::Tracked(inner) => inner.peeled(),
            other => other,
        }
    }

    /// Strip the trackable marker, if any, by value.
    pub fn into_peeled(self) -> Value {
        match self {
            Value::Tracked(inner) => inner.into_peeled(),
            other => other,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self.peeled() {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.peeled() {
            Value::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Number of children this value reflects, without building them.
    pub fn child_count(&self) -> usize {
        match self {
            Value::Scalar(_) | Value::UnitRecord { .. } | Value::Opaque(_) => 0,
            Value::Optional(inner) => usize::from(inner.is_some()),
            Value::Seq(items) | Value::Tuple(items) => items.len(),
            Value::TupleRecord { elements, .. } => elements.len(),
            Value::Map(entries) => entries.len(),
            Value::Record { fields, .. } => fields.len(),
            Value::Variant { payload, .. } => usize::from(payload.is_some()),
            Value::Tracked(inner) => inner.child_count(),
        }
    }

    pub fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    /// The children of this value, in declaration order.
    pub fn children(&self) -> Vec<Child> {
        self.clone().into_children()
    }

    /// Consume this value into its children, in declaration order.
    pub fn into_children(self) -> Vec<Child> {
        let parent = self.kind();
        match self {
            Value::Scalar(_) | Value::UnitRecord { .. } | Value::Opaque(_) => Vec::new(),
            Value::Optional(inner) => inner
                .map(|v| Child::new(Some(SOME_LABEL.to_string()), *v, parent))
                .into_iter()
                .collect(),
            Value::Seq(items)
            | Value::Tuple(items)
            | Value::TupleRecord {
                elements: items, ..
            } => items
                .into_iter()
                .map(|v| Child::new(None, v, parent))
                .collect(),
            Value::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Child::new(None, Value::Tuple(vec![k, v]), parent))
                .collect(),
            Value::Record { fields, .. } => fields
                .into_iter()
                .map(|(label, v)| Child::new(Some(label), v, parent))
                .collect(),
            Value::Variant {
                variant, payload, ..
            } => payload
                .map(|p| Child::new(Some(variant.to_string()), *p, parent))
                .into_iter()
                .collect(),
            Value::Tracked(inner) => inner.into_children(),
        }
    }

    /// Build the mirror of this value.
    pub fn mirror(&self) -> Mirror {
        self.clone().into_mirror()
    }

    /// Consume this value into its mirror.
    pub fn into_mirror(self) -> Mirror {
        let type_name = self.peeled().type_name();
        let variant = self.variant();
        let kind = self.kind();
        Mirror::new(type_name, variant, kind, self.into_children())
    }

    /// Borrow the immediate child addressed by one path component.
    ///
    /// Labelled children match by label; unlabelled children match by their
    /// zero-based position. Map entries match by the textual key.
    pub fn child(&self, component: &str) -> Option<&Value> {
        match self {
            Value::Scalar(_) | Value::UnitRecord { .. } | Value::Opaque(_) => None,
            Value::Optional(inner) => inner.as_deref().filter(|_| component == SOME_LABEL),
            Value::Seq(items)
            | Value::Tuple(items)
            | Value::TupleRecord {
                elements: items, ..
            } => {
                let index: usize = component.parse().ok()?;
                items.get(index)
            }
            Value::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.to_string() == component)
                .map(|(_, v)| v),
            Value::Record { fields, .. } => fields
                .iter()
                .find(|(label, _)| label == component)
                .map(|(_, v)| v),
            Value::Variant {
                variant, payload, ..
            } => payload.as_deref().filter(|_| *variant == component),
            Value::Tracked(inner) => inner.child(component),
        }
    }

    /// Get a reference to a nested value by field path.
    ///
    /// Returns `None` if the path doesn't exist or can't be navigated
    /// (e.g., descending into a scalar).
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = self;
        for component in path.iter() {
            current = current.child(component)?.peeled();
        }
        Some(current)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Value::Scalar(s) => s.render(f, nested),
            Value::Optional(None) => write!(f, "None"),
            Value::Optional(Some(inner)) => {
                write!(f, "Some(")?;
                inner.render(f, true)?;
                write!(f, ")")
            }
            Value::Seq(items) => {
                write!(f, "[")?;
                render_list(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                render_list(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    k.render(f, true)?;
                    write!(f, ": ")?;
                    v.render(f, true)?;
                }
                write!(f, "}}")
            }
            Value::Record { name, fields } => render_record(f, name, fields),
            Value::UnitRecord { name } => write!(f, "{}", name),
            Value::TupleRecord { name, elements } => {
                write!(f, "{}(", name)?;
                render_list(f, elements)?;
                write!(f, ")")
            }
            Value::Variant {
                variant, payload, ..
            } => match payload.as_deref() {
                None => write!(f, "{}", variant),
                Some(Value::Record { fields, .. }) => render_record(f, variant, fields),
                Some(Value::Tuple(items)) => {
                    write!(f, "{}(", variant)?;
                    render_list(f, items)?;
                    write!(f, ")")
                }
                Some(other) => {
                    write!(f, "{}(", variant)?;
                    other.render(f, true)?;
                    write!(f, ")")
                }
            },
            Value::Tracked(inner) => inner.render(f, nested),
            Value::Opaque(message) => write!(f, "<opaque: {}>", message),
        }
    }
}

fn render_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        item.render(f, true)?;
    }
    Ok(())
}

fn render_record(f: &mut fmt::Formatter<'_>, name: &str, fields: &[(String, Value)]) -> fmt::Result {
    if fields.is_empty() {
        return write!(f, "{}", name);
    }
    write!(f, "{} {{ ", name)?;
    for (i, (label, value)) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: ", label)?;
        value.render(f, true)?;
    }
    write!(f, " }}")
}

/// Textual rendering: the conventional display form of a value.
///
/// Top-level strings render raw; strings nested inside containers are quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

// Conversion from common types

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Value::Scalar(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Scalar(Scalar::I32(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Scalar(Scalar::I64(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Scalar(Scalar::U32(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Scalar(Scalar::U64(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(Scalar::F64(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Scalar(Scalar::Str(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(Scalar::Str(v.to_string()))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Value::Optional(v.map(|inner| Box::new(inner.into())))
    }
}

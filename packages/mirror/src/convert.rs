//! Conversions between `Value`, JSON and typed values.
//!
//! `Value` serializes the way the type it was captured from would have
//! serialized. Typed values are rebuilt by deserializing from the snapshot
//! itself (see `de.rs`); JSON is only a storage format.

use serde::de::DeserializeOwned;
use serde::ser::{SerializeMap, SerializeSeq, SerializeTuple, SerializeTupleStruct};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::tracked::TRACKED_MARKER;
use crate::value::{Scalar, Value};
use crate::{Error, Result};

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Unit => serializer.serialize_unit(),
            Scalar::Bool(v) => serializer.serialize_bool(*v),
            Scalar::I8(v) => serializer.serialize_i8(*v),
            Scalar::I16(v) => serializer.serialize_i16(*v),
            Scalar::I32(v) => serializer.serialize_i32(*v),
            Scalar::I64(v) => serializer.serialize_i64(*v),
            Scalar::I128(v) => serializer.serialize_i128(*v),
            Scalar::U8(v) => serializer.serialize_u8(*v),
            Scalar::U16(v) => serializer.serialize_u16(*v),
            Scalar::U32(v) => serializer.serialize_u32(*v),
            Scalar::U64(v) => serializer.serialize_u64(*v),
            Scalar::U128(v) => serializer.serialize_u128(*v),
            Scalar::F32(v) => serializer.serialize_f32(*v),
            Scalar::F64(v) => serializer.serialize_f64(*v),
            Scalar::Char(v) => serializer.serialize_char(*v),
            Scalar::Str(v) => serializer.serialize_str(v),
            Scalar::Bytes(v) => serializer.serialize_bytes(v),
        }
    }
}

/// Records serialize as maps and enum values are externally tagged, which
/// is what a derived `Deserialize` expects from a self-describing format.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(s) => s.serialize(serializer),
            Value::Optional(None) => serializer.serialize_none(),
            Value::Optional(Some(inner)) => serializer.serialize_some(inner.as_ref()),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Tuple(items) => {
                let mut tuple = serializer.serialize_tuple(items.len())?;
                for item in items {
                    tuple.serialize_element(item)?;
                }
                tuple.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::UnitRecord { name } => serializer.serialize_unit_struct(name),
            Value::Record { fields, .. } => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (label, v) in fields {
                    map.serialize_entry(label, v)?;
                }
                map.end()
            }
            Value::TupleRecord { name, elements } if elements.len() == 1 => {
                serializer.serialize_newtype_struct(name, &elements[0])
            }
            Value::TupleRecord { name, elements } => {
                let mut ts = serializer.serialize_tuple_struct(name, elements.len())?;
                for element in elements {
                    ts.serialize_field(element)?;
                }
                ts.end()
            }
            Value::Variant {
                name,
                variant,
                payload: None,
            } => serializer.serialize_unit_variant(name, 0, variant),
            Value::Variant {
                name,
                variant,
                payload: Some(payload),
            } => serializer.serialize_newtype_variant(name, 0, variant, payload.as_ref()),
            Value::Tracked(inner) => serializer.serialize_newtype_struct(TRACKED_MARKER, inner.as_ref()),
            Value::Opaque(_) => serializer.serialize_unit(),
        }
    }
}

/// Text used for a non-finite float in JSON, which has no literal for it.
pub(crate) fn non_finite_text(f: f64) -> Option<&'static str> {
    if f.is_nan() {
        Some("NaN")
    } else if f == f64::INFINITY {
        Some("inf")
    } else if f == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

pub(crate) fn parse_non_finite(text: &str) -> Option<f64> {
    match text {
        "NaN" => Some(f64::NAN),
        "inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn float_json(f: f64) -> Result<JsonValue> {
    match non_finite_text(f) {
        Some(text) => Ok(JsonValue::String(text.to_string())),
        None => serde_json::to_value(f).map_err(Error::encode),
    }
}

fn key_json(key: &Value) -> Result<String> {
    match to_json(key)? {
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(Error::encode(format!("map key must be a scalar, found {}", other))),
    }
}

/// Convert a snapshot to `serde_json::Value`.
///
/// Shapes follow what `serde_json` would produce for the captured type.
/// Non-finite floats become the strings `NaN`, `inf` and `-inf`, which
/// [`from_value`] reads back into float fields.
pub fn to_json(value: &Value) -> Result<JsonValue> {
    let json = match value {
        Value::Scalar(Scalar::F32(f)) => float_json(f64::from(*f))?,
        Value::Scalar(Scalar::F64(f)) => float_json(*f)?,
        Value::Scalar(s) => serde_json::to_value(s).map_err(Error::encode)?,
        Value::Optional(None) | Value::UnitRecord { .. } | Value::Opaque(_) => JsonValue::Null,
        Value::Optional(Some(inner)) | Value::Tracked(inner) => to_json(inner)?,
        Value::TupleRecord { elements, .. } if elements.len() == 1 => to_json(&elements[0])?,
        Value::Seq(items) | Value::Tuple(items) | Value::TupleRecord { elements: items, .. } => {
            JsonValue::Array(items.iter().map(to_json).collect::<Result<_>>()?)
        }
        Value::Map(entries) => {
            let mut map = Map::new();
            for (k, v) in entries {
                map.insert(key_json(k)?, to_json(v)?);
            }
            JsonValue::Object(map)
        }
        Value::Record { fields, .. } => {
            let mut map = Map::new();
            for (label, v) in fields {
                map.insert(label.clone(), to_json(v)?);
            }
            JsonValue::Object(map)
        }
        Value::Variant {
            variant,
            payload: None,
            ..
        } => JsonValue::String(variant.to_string()),
        Value::Variant {
            variant,
            payload: Some(payload),
            ..
        } => {
            let mut map = Map::new();
            map.insert(variant.to_string(), to_json(payload)?);
            JsonValue::Object(map)
        }
    };
    Ok(json)
}

/// Convert `serde_json::Value` to a snapshot.
///
/// JSON carries no type names, so objects become keyed collections.
pub fn from_json(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Scalar(Scalar::Unit),
        JsonValue::Bool(b) => Value::Scalar(Scalar::Bool(b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Scalar(Scalar::I64(i))
            } else if let Some(u) = n.as_u64() {
                Value::Scalar(Scalar::U64(u))
            } else {
                Value::Scalar(Scalar::F64(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        JsonValue::String(s) => Value::Scalar(Scalar::Str(s)),
        JsonValue::Array(arr) => Value::Seq(arr.into_iter().map(from_json).collect()),
        JsonValue::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (Value::Scalar(Scalar::Str(k)), from_json(v)))
                .collect(),
        ),
    }
}

/// Rebuild a typed value from a snapshot.
///
/// Deserializes straight from the snapshot; no intermediate format is
/// involved, so every float (NaN included) survives.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T> {
    T::deserialize(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{snapshot, Tracked};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Address {
        city: String,
        zip: u32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Customer {
        name: String,
        address: Address,
        nickname: Option<String>,
        email: Tracked<String>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    enum Shape {
        Dot,
        Circle(f64),
        Rect(u32, u32),
        Labelled { text: String },
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Meters(f64);

    #[test]
    fn snapshot_rebuilds_the_original_record() {
        let customer = Customer {
            name: "Jane".into(),
            address: Address {
                city: "Paris".into(),
                zip: 12345,
            },
            nickname: None,
            email: Tracked::new("jane@example.com".into()),
        };
        let back: Customer = from_value(&snapshot(&customer)).unwrap();
        assert_eq!(back, customer);
    }

    #[test]
    fn snapshot_rebuilds_every_variant_shape() {
        for shape in [
            Shape::Dot,
            Shape::Circle(1.5),
            Shape::Rect(2, 3),
            Shape::Labelled { text: "x".into() },
        ] {
            let back: Shape = from_value(&snapshot(&shape)).unwrap();
            assert_eq!(back, shape);
        }
        let back: Meters = from_value(&snapshot(&Meters(2.0))).unwrap();
        assert_eq!(back, Meters(2.0));
    }

    #[test]
    fn json_conversion() {
        let json = serde_json::json!({"name": "Alice", "age": 30, "tags": ["a"]});
        let value = from_json(json.clone());
        assert_eq!(value.child_count(), 3);
        assert_eq!(to_json(&value).unwrap(), json);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Gauge {
        low: f64,
        high: f32,
        last: Option<f64>,
    }

    #[test]
    fn non_finite_floats_survive_json() {
        let gauge = Gauge {
            low: f64::NEG_INFINITY,
            high: f32::INFINITY,
            last: Some(f64::NAN),
        };
        let json = to_json(&snapshot(&gauge)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"low": "-inf", "high": "inf", "last": "NaN"})
        );
        let back: Gauge = from_value(&from_json(json)).unwrap();
        assert_eq!(back.low, f64::NEG_INFINITY);
        assert_eq!(back.high, f32::INFINITY);
        assert!(back.last.is_some_and(f64::is_nan));
    }

    #[test]
    fn unit_structs_serialize_as_unit() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Marker;
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Braced {}

        assert_eq!(to_json(&snapshot(&Marker)).unwrap(), serde_json::Value::Null);
        assert_eq!(to_json(&snapshot(&Braced {})).unwrap(), serde_json::json!({}));
        assert_eq!(serde_json::to_value(snapshot(&Braced {})).unwrap(), serde_json::json!({}));
        let back: Braced = from_value(&snapshot(&Braced {})).unwrap();
        assert_eq!(back, Braced {});
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        let err = from_value::<Address>(&Value::from("Paris")).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}

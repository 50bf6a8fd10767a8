//! The introspecting serializer: turns any `Serialize` value into a `Value`.
//!
//! Derived `Serialize` impls call the serializer once per field, in
//! declaration order, with the static type and field names. That call
//! sequence is the compile-time stand-in for runtime reflection.

use std::fmt::Display;

use serde::ser::{self, Serialize};

use crate::tracked::TRACKED_MARKER;
use crate::value::{Scalar, Value};

/// Error raised by a `Serialize` impl while it is being introspected.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SnapshotError(String);

impl ser::Error for SnapshotError {
    fn custom<T: Display>(msg: T) -> Self {
        SnapshotError(msg.to_string())
    }
}

type Result<T> = std::result::Result<T, SnapshotError>;

/// Serializer producing a `Value` snapshot.
pub(crate) struct Snapshotter;

fn scalar(s: Scalar) -> Result<Value> {
    Ok(Value::Scalar(s))
}

fn capture<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(Snapshotter)
}

impl ser::Serializer for Snapshotter {
    type Ok = Value;
    type Error = SnapshotError;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = SeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = RecordBuilder;
    type SerializeStructVariant = RecordBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        scalar(Scalar::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        scalar(Scalar::I8(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        scalar(Scalar::I16(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        scalar(Scalar::I32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        scalar(Scalar::I64(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        scalar(Scalar::I128(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        scalar(Scalar::U8(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        scalar(Scalar::U16(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        scalar(Scalar::U32(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        scalar(Scalar::U64(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        scalar(Scalar::U128(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        scalar(Scalar::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        scalar(Scalar::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        scalar(Scalar::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        scalar(Scalar::Str(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        scalar(Scalar::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Optional(None))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value> {
        Ok(Value::Optional(Some(Box::new(capture(value)?))))
    }

    fn serialize_unit(self) -> Result<Value> {
        scalar(Scalar::Unit)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Ok(Value::UnitRecord { name })
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Variant {
            name,
            variant,
            payload: None,
        })
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Value> {
        let inner = capture(value)?;
        if name == TRACKED_MARKER {
            return Ok(Value::Tracked(Box::new(inner)));
        }
        Ok(Value::TupleRecord {
            name,
            elements: vec![inner],
        })
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value> {
        Ok(Value::Variant {
            name,
            variant,
            payload: Some(Box::new(capture(value)?)),
        })
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(SeqShape::Seq, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(SeqShape::Tuple, len))
    }

    fn serialize_tuple_struct(self, name: &'static str, len: usize) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(SeqShape::TupleStruct { name }, len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqBuilder> {
        Ok(SeqBuilder::new(SeqShape::TupleVariant { name, variant }, len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder> {
        Ok(MapBuilder {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<RecordBuilder> {
        Ok(RecordBuilder {
            name,
            variant: None,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordBuilder> {
        Ok(RecordBuilder {
            name,
            variant: Some(variant),
            fields: Vec::with_capacity(len),
        })
    }
}

enum SeqShape {
    Seq,
    Tuple,
    TupleStruct {
        name: &'static str,
    },
    TupleVariant {
        name: &'static str,
        variant: &'static str,
    },
}

pub(crate) struct SeqBuilder {
    shape: SeqShape,
    items: Vec<Value>,
}

impl SeqBuilder {
    fn new(shape: SeqShape, len: usize) -> Self {
        Self {
            shape,
            items: Vec::with_capacity(len),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.items.push(capture(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        match self.shape {
            SeqShape::Seq => Value::Seq(self.items),
            SeqShape::Tuple => Value::Tuple(self.items),
            SeqShape::TupleStruct { name } => Value::TupleRecord {
                name,
                elements: self.items,
            },
            SeqShape::TupleVariant { name, variant } => Value::Variant {
                name,
                variant,
                payload: Some(Box::new(Value::Tuple(self.items))),
            },
        }
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = SnapshotError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Value;
    type Error = SnapshotError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Value;
    type Error = SnapshotError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqBuilder {
    type Ok = Value;
    type Error = SnapshotError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

pub(crate) struct MapBuilder {
    entries: Vec<(Value, Value)>,
    pending_key: Option<Value>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = SnapshotError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        self.pending_key = Some(capture(key)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| SnapshotError("map value serialized before its key".to_string()))?;
        self.entries.push((key, capture(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(self.entries))
    }
}

pub(crate) struct RecordBuilder {
    name: &'static str,
    variant: Option<&'static str>,
    fields: Vec<(String, Value)>,
}

impl RecordBuilder {
    fn push<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.fields.push((key.to_string(), capture(value)?));
        Ok(())
    }

    fn finish(self) -> Value {
        match self.variant {
            None => Value::Record {
                name: self.name,
                fields: self.fields,
            },
            Some(variant) => Value::Variant {
                name: self.name,
                variant,
                payload: Some(Box::new(Value::Record {
                    name: variant,
                    fields: self.fields,
                })),
            },
        }
    }
}

impl ser::SerializeStruct for RecordBuilder {
    type Ok = Value;
    type Error = SnapshotError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.push(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for RecordBuilder {
    type Ok = Value;
    type Error = SnapshotError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.push(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    struct Marker;

    #[derive(Serialize)]
    struct Braced {}

    #[derive(Serialize)]
    enum Shape {
        Rect(u32, u32),
    }

    #[derive(Serialize)]
    struct Sparse {
        id: u8,
        #[serde(skip)]
        #[allow(dead_code)]
        cache: Vec<u8>,
    }

    #[test]
    fn newtype_struct_is_a_tuple_record() {
        assert_eq!(
            capture(&Meters(2.5)).unwrap(),
            Value::TupleRecord {
                name: "Meters",
                elements: vec![Value::from(2.5)],
            }
        );
    }

    #[test]
    fn unit_and_braced_empty_structs_stay_apart() {
        assert_eq!(capture(&Marker).unwrap(), Value::UnitRecord { name: "Marker" });
        assert_eq!(
            capture(&Braced {}).unwrap(),
            Value::Record {
                name: "Braced",
                fields: vec![],
            }
        );
    }

    #[test]
    fn tuple_variant_payload_is_a_tuple() {
        assert_eq!(
            capture(&Shape::Rect(2, 3)).unwrap(),
            Value::Variant {
                name: "Shape",
                variant: "Rect",
                payload: Some(Box::new(Value::Tuple(vec![
                    Value::from(2u32),
                    Value::from(3u32),
                ]))),
            }
        );
    }

    #[test]
    fn maps_keep_iteration_order() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        let Value::Map(entries) = capture(&map).unwrap() else {
            panic!("expected map");
        };
        assert_eq!(entries[0].0, Value::from("a"));
        assert_eq!(entries[1].0, Value::from("b"));
    }

    #[test]
    fn skipped_fields_are_invisible() {
        let value = capture(&Sparse {
            id: 1,
            cache: vec![1, 2, 3],
        })
        .unwrap();
        assert_eq!(value.child_count(), 1);
    }

    #[test]
    fn integer_widths_are_preserved() {
        assert_eq!(capture(&7u16).unwrap(), Value::Scalar(Scalar::U16(7)));
        assert_eq!(capture(&-7i8).unwrap(), Value::Scalar(Scalar::I8(-7)));
    }
}

//! `serde::Deserializer` over snapshots.
//!
//! A `Value` deserializes into the type it was captured from without any
//! intermediate format. It also accepts the shapes `from_json` produces, so
//! stored defaults decode through the same path.

use serde::de::value::{MapDeserializer, SeqDeserializer};
use serde::de::{
    self, DeserializeSeed, EnumAccess, IntoDeserializer, Unexpected, VariantAccess, Visitor,
};
use serde::{Deserialize, Deserializer};

use crate::convert::parse_non_finite;
use crate::value::{Scalar, Value};
use crate::{Error, Result};

fn visit_seq<'de, V: Visitor<'de>>(items: Vec<Value>, visitor: V) -> Result<V::Value> {
    let mut seq = SeqDeserializer::<_, Error>::new(items.into_iter());
    let out = visitor.visit_seq(&mut seq)?;
    seq.end()?;
    Ok(out)
}

fn visit_entries<'de, V, I>(entries: I, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
    I: Iterator<Item = (Value, Value)>,
{
    let mut map = MapDeserializer::<_, Error>::new(entries);
    let out = visitor.visit_map(&mut map)?;
    map.end()?;
    Ok(out)
}

fn visit_scalar<'de, V: Visitor<'de>>(scalar: Scalar, visitor: V) -> Result<V::Value> {
    match scalar {
        Scalar::Unit => visitor.visit_unit(),
        Scalar::Bool(v) => visitor.visit_bool(v),
        Scalar::I8(v) => visitor.visit_i8(v),
        Scalar::I16(v) => visitor.visit_i16(v),
        Scalar::I32(v) => visitor.visit_i32(v),
        Scalar::I64(v) => visitor.visit_i64(v),
        Scalar::I128(v) => visitor.visit_i128(v),
        Scalar::U8(v) => visitor.visit_u8(v),
        Scalar::U16(v) => visitor.visit_u16(v),
        Scalar::U32(v) => visitor.visit_u32(v),
        Scalar::U64(v) => visitor.visit_u64(v),
        Scalar::U128(v) => visitor.visit_u128(v),
        Scalar::F32(v) => visitor.visit_f32(v),
        Scalar::F64(v) => visitor.visit_f64(v),
        Scalar::Char(v) => visitor.visit_char(v),
        Scalar::Str(v) => visitor.visit_string(v),
        Scalar::Bytes(v) => visitor.visit_byte_buf(v),
    }
}

impl<'de> Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self {
            Value::Tracked(inner) => (*inner).deserialize_any(visitor),
            Value::Scalar(scalar) => visit_scalar(scalar, visitor),
            Value::Optional(None) => visitor.visit_none(),
            Value::Optional(Some(inner)) => visitor.visit_some(*inner),
            Value::TupleRecord { mut elements, .. } if elements.len() == 1 => {
                elements.remove(0).deserialize_any(visitor)
            }
            Value::Seq(items) | Value::Tuple(items) | Value::TupleRecord { elements: items, .. } => {
                visit_seq(items, visitor)
            }
            Value::Map(entries) => visit_entries(entries.into_iter(), visitor),
            Value::Record { fields, .. } => visit_entries(
                fields.into_iter().map(|(label, v)| (Value::string(label), v)),
                visitor,
            ),
            Value::UnitRecord { .. } | Value::Opaque(_) => visitor.visit_unit(),
            Value::Variant {
                variant,
                payload: None,
                ..
            } => visitor.visit_str(variant),
            Value::Variant {
                variant,
                payload: Some(payload),
                ..
            } => visit_entries(std::iter::once((Value::string(variant), *payload)), visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.into_peeled() {
            Value::Optional(None) | Value::Scalar(Scalar::Unit) | Value::Opaque(_) => {
                visitor.visit_none()
            }
            Value::Optional(Some(inner)) => visitor.visit_some(*inner),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.into_peeled() {
            Value::Scalar(Scalar::Str(text)) => match parse_non_finite(&text) {
                Some(f) => visitor.visit_f64(f),
                None => visitor.visit_string(text),
            },
            other => other.deserialize_any(visitor),
        }
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_f64(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        match self.into_peeled() {
            Value::TupleRecord { mut elements, .. } if elements.len() == 1 => {
                visitor.visit_newtype_struct(elements.remove(0))
            }
            other => visitor.visit_newtype_struct(other),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let access = match self.into_peeled() {
            Value::Variant {
                variant, payload, ..
            } => VariantPayload {
                variant: Value::string(variant),
                payload: payload.map(|p| *p),
            },
            Value::Scalar(Scalar::Str(variant)) => VariantPayload {
                variant: Value::string(variant),
                payload: None,
            },
            Value::Map(mut entries) if entries.len() == 1 => {
                let (variant, payload) = entries.remove(0);
                VariantPayload {
                    variant,
                    payload: Some(payload),
                }
            }
            other => {
                return Err(Error::decode(format!(
                    "expected enum {}, found {}",
                    name,
                    other.type_name()
                )))
            }
        };
        visitor.visit_enum(access)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Value;

    fn into_deserializer(self) -> Value {
        self
    }
}

/// An enum value split into its variant name and payload.
struct VariantPayload {
    variant: Value,
    payload: Option<Value>,
}

impl<'de> EnumAccess<'de> for VariantPayload {
    type Error = Error;
    type Variant = VariantBody;

    fn variant_seed<S: DeserializeSeed<'de>>(self, seed: S) -> Result<(S::Value, VariantBody)> {
        let variant = seed.deserialize(self.variant)?;
        Ok((variant, VariantBody(self.payload)))
    }
}

fn missing_payload(expected: &str) -> Error {
    de::Error::invalid_type(Unexpected::UnitVariant, &expected)
}

struct VariantBody(Option<Value>);

impl<'de> VariantAccess<'de> for VariantBody {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.0 {
            None => Ok(()),
            Some(payload) => <()>::deserialize(payload),
        }
    }

    fn newtype_variant_seed<S: DeserializeSeed<'de>>(self, seed: S) -> Result<S::Value> {
        match self.0 {
            Some(payload) => seed.deserialize(payload),
            None => Err(missing_payload("newtype variant")),
        }
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        match self.0 {
            Some(payload) => payload.deserialize_seq(visitor),
            None => Err(missing_payload("tuple variant")),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.0 {
            Some(payload) => payload.deserialize_map(visitor),
            None => Err(missing_payload("struct variant")),
        }
    }
}

//! Writing field values back into typed instances by label.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::mirror::try_snapshot;
use crate::type_name::type_name_of;
use crate::{Error, Result, Value};

/// Assignment of named fields by label.
///
/// Implemented for every type that round-trips through serde. A write
/// snapshots the target, replaces the named fields and deserializes the
/// snapshot back over the target, so a value must have the shape the
/// field's type accepts.
///
/// ```rust
/// use fieldkit_mirror::{FieldWrite, Value};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Default, Serialize, Deserialize)]
/// struct Person { name: String, age: u32 }
///
/// let mut p = Person::default();
/// p.field_write("age", &Value::from(30u32)).unwrap();
/// assert_eq!(p.age, 30);
/// assert!(p.field_write("height", &Value::from(1)).is_err());
/// ```
pub trait FieldWrite {
    /// Assign one field.
    fn field_write(&mut self, label: &str, value: &Value) -> Result<()> {
        self.write_fields([(label, value)])
    }

    /// Assign several fields at once. Either every field is written or,
    /// on error, the target is left unchanged.
    fn write_fields<'a, I>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>;
}

impl<T: Serialize + DeserializeOwned> FieldWrite for T {
    fn write_fields<'a, I>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut fields = fields.into_iter().peekable();
        if fields.peek().is_none() {
            return Ok(());
        }

        let (name, mut current) = match try_snapshot(&*self)?.into_peeled() {
            Value::Record { name, fields } => (name, fields),
            _ => {
                return Err(Error::NotARecord {
                    type_name: type_name_of::<T>(),
                })
            }
        };
        for (label, value) in fields {
            let slot = current
                .iter_mut()
                .find(|(existing, _)| existing == label)
                .map(|(_, slot)| slot)
                .ok_or_else(|| Error::UnknownField {
                    type_name: type_name_of::<T>(),
                    label: label.to_string(),
                })?;
            *slot = value.clone();
            log::trace!("Writing field {}.{}", type_name_of::<T>(), label);
        }

        *self = T::deserialize(Value::Record {
            name,
            fields: current,
        })?;
        Ok(())
    }
}

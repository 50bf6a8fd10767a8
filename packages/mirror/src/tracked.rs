//! The trackable field marker.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved newtype-struct name the introspecting serializer recognises.
pub(crate) const TRACKED_MARKER: &str = "$fieldkit::Tracked";

/// Marks a field for discovery by tracked-field gathering.
///
/// The wrapper is transparent everywhere except introspection: it derefs to
/// the inner value, renders like it, and (de)serializes like it in every
/// ordinary serde format.
///
/// ```rust
/// use fieldkit_mirror::{introspect, Tracked};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct SignUp {
///     email: Tracked<String>,
///     remember_me: bool,
/// }
///
/// let form = SignUp { email: Tracked::new("a@b.c".to_string()), remember_me: false };
/// let mirror = introspect(&form);
/// assert!(mirror.children()[0].tracked);
/// assert!(!mirror.children()[1].tracked);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tracked<T>(pub T);

impl<T> Tracked<T> {
    pub fn new(value: T) -> Self {
        Tracked(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Tracked<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for Tracked<T> {
    fn from(value: T) -> Self {
        Tracked(value)
    }
}

impl<T: fmt::Display> fmt::Display for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: Serialize> Serialize for Tracked<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(TRACKED_MARKER, &self.0)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tracked<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Tracked)
    }
}

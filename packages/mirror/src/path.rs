//! Dotted field paths over snapshots.

use std::fmt;

use crate::{Error, Result};

/// A path of field labels, written `address.city`.
///
/// Components are field labels, variant names, `some` for a present
/// optional, or zero-based positions for unlabelled children.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldPath {
    pub components: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path string.
    ///
    /// # Path Syntax
    ///
    /// - Components are separated by `.`
    /// - The empty string is the root path
    /// - Components may not be empty or contain whitespace
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldkit_mirror::FieldPath;
    ///
    /// let path = FieldPath::parse("address.city").unwrap();
    /// assert_eq!(path.len(), 2);
    /// assert!(FieldPath::parse("address..city").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(FieldPath::root());
        }

        let components: Vec<String> = s.split('.').map(str::to_string).collect();
        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }
        Ok(FieldPath { components })
    }

    /// The empty path.
    pub fn root() -> Self {
        FieldPath {
            components: Vec::new(),
        }
    }

    fn validate_component(component: &str, position: usize) -> Result<()> {
        if component.is_empty() {
            return Err(Error::InvalidPath {
                message: format!("empty component at position {}", position),
            });
        }
        if let Some(c) = component.chars().find(|c| c.is_whitespace()) {
            return Err(Error::InvalidPath {
                message: format!(
                    "invalid character {:?} in component '{}' at position {}",
                    c, component, position
                ),
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// Extend this path by one component.
    #[must_use]
    pub fn child(&self, component: impl Into<String>) -> FieldPath {
        let mut components = self.components.clone();
        components.push(component.into());
        FieldPath { components }
    }

    #[must_use]
    pub fn join(&self, other: &FieldPath) -> FieldPath {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        FieldPath { components }
    }

    pub fn has_prefix(&self, prefix: &FieldPath) -> bool {
        prefix.components.len() <= self.components.len()
            && prefix.components == self.components[..prefix.components.len()]
    }

    /// Strip a prefix from this path.
    ///
    /// Returns `None` if the prefix doesn't match.
    #[must_use]
    pub fn strip_prefix(&self, prefix: &FieldPath) -> Option<FieldPath> {
        if self.has_prefix(prefix) {
            Some(FieldPath {
                components: self.components[prefix.components.len()..].to_vec(),
            })
        } else {
            None
        }
    }

    /// The path without its last component; `None` for the root.
    pub fn parent(&self) -> Option<FieldPath> {
        let (_, rest) = self.components.split_last()?;
        Some(FieldPath {
            components: rest.to_vec(),
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

impl std::ops::Index<usize> for FieldPath {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

impl std::str::FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FieldPath::parse(s)
    }
}

/// Macro for field path literals.
///
/// # Example
///
/// ```rust
/// use fieldkit_mirror::field_path;
///
/// let p = field_path!("address.city");
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! field_path {
    ($s:expr) => {
        $crate::FieldPath::parse($s).expect("invalid field path literal")
    };
}

//! Error types for the mirror layer.

use std::fmt::Display;

/// Errors raised when a snapshot is written back into a typed value.
///
/// Introspection itself never fails; these only surface from field writes,
/// typed reconstruction and path parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target type does not declare a field with this label.
    #[error("unknown field '{label}' on {type_name}")]
    UnknownField { type_name: String, label: String },

    /// The target value has no named fields to write into.
    #[error("{type_name} is not a record with named fields")]
    NotARecord { type_name: String },

    /// A value could not be serialized.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// A value could not be rebuilt into the target type.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A field path string is malformed.
    #[error("invalid field path: {message}")]
    InvalidPath { message: String },

    /// Generic error with message.
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    pub fn encode(message: impl Display) -> Self {
        Error::Encode {
            message: message.to_string(),
        }
    }

    pub fn decode(message: impl Display) -> Self {
        Error::Decode {
            message: message.to_string(),
        }
    }
}

/// Lets snapshots deserialize straight into typed values.
impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::decode(msg)
    }
}

/// Result type alias for mirror operations.
pub type Result<T> = std::result::Result<T, Error>;

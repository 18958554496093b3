//! Contains [`Value`], a decoded value of a column.
use std::fmt;

/// A decoded value of a column, tagged by its physical type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    /// A legacy timestamp; see [`crate::types::int96_to_i64_ns`]
    Int96([u32; 3]),
    Float(f32),
    Double(f64),
    /// A `BYTE_ARRAY` that is valid utf8
    Utf8(String),
    /// A `BYTE_ARRAY` that is not valid utf8
    Binary(Vec<u8>),
    FixedLenByteArray(Vec<u8>),
    /// A slot whose definition level is below the maximum
    Null,
    /// A dictionary index out of the bounds of the dictionary
    InvalidIndex(u32),
}

impl Value {
    /// The value of a `BYTE_ARRAY`: [`Value::Utf8`] if `bytes` are utf8,
    /// [`Value::Binary`] otherwise.
    pub fn from_byte_array(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(string) => Value::Utf8(string.to_string()),
            Err(_) => Value::Binary(bytes.to_vec()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(string) => Some(string),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Int96(v) => write!(f, "{:?}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Utf8(v) => write!(f, "{}", v),
            Value::Binary(v) | Value::FixedLenByteArray(v) => write!(f, "{:?}", v),
            Value::Null => write!(f, "null"),
            Value::InvalidIndex(index) => write!(f, "<invalid index {}>", index),
        }
    }
}

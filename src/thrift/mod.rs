//! Deserialization of the thrift compact protocol, the encoding of parquet's footer and page headers.
//!
//! Structs are declared with [`thrift_struct`], a table of `field id => name: type` from which
//! the reader is generated. Fields not in the table are skipped, so that files written with
//! newer versions of the format can be read.
mod compact;

pub use compact::CompactReader;

use crate::error::{Error, Result};

/// The wire type of a thrift value, as encoded in the low nibble of a field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Stop,
    BooleanTrue,
    BooleanFalse,
    Byte,
    I16,
    I32,
    I64,
    Double,
    Binary,
    List,
    Set,
    Map,
    Struct,
}

impl FieldType {
    pub fn try_from_nibble(nibble: u8) -> Result<Self> {
        Ok(match nibble {
            0 => FieldType::Stop,
            1 => FieldType::BooleanTrue,
            2 => FieldType::BooleanFalse,
            3 => FieldType::Byte,
            4 => FieldType::I16,
            5 => FieldType::I32,
            6 => FieldType::I64,
            7 => FieldType::Double,
            8 => FieldType::Binary,
            9 => FieldType::List,
            10 => FieldType::Set,
            11 => FieldType::Map,
            12 => FieldType::Struct,
            other => {
                return Err(Error::protocol(format!(
                    "unknown compact protocol type {}",
                    other
                )))
            }
        })
    }

    /// Whether a value sent as `self` can be read as `expected`.
    pub fn is_compatible(self, expected: FieldType) -> bool {
        use FieldType::*;
        match (self, expected) {
            (BooleanTrue | BooleanFalse, BooleanTrue | BooleanFalse) => true,
            (List | Set, List | Set) => true,
            (a, b) => a == b,
        }
    }
}

/// The header of a struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    pub field_type: FieldType,
    pub id: i16,
    /// The value of a boolean field, which the compact protocol stores in the header.
    pub bool_value: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    pub element_type: FieldType,
    pub size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    pub key_type: FieldType,
    pub value_type: FieldType,
    pub size: usize,
}

/// A type that can be read from the thrift compact protocol.
pub trait ReadThrift: Sized {
    /// The wire type this value is sent as.
    const WIRE_TYPE: FieldType;

    /// Reads a value that is not a struct field, e.g. a list element or the root struct.
    fn read_from(prot: &mut CompactReader<'_>) -> Result<Self>;

    /// Reads the value of a struct field whose header is `field`.
    fn read_field(prot: &mut CompactReader<'_>, field: &FieldHeader) -> Result<Self> {
        let _ = field;
        Self::read_from(prot)
    }
}

/// Reads a `T` from the start of `buffer`, returning it and the number of bytes consumed.
pub fn deserialize<T: ReadThrift>(buffer: &[u8]) -> Result<(T, usize)> {
    let mut prot = CompactReader::new(buffer);
    let value = T::read_from(&mut prot)?;
    Ok((value, prot.position()))
}

impl ReadThrift for bool {
    const WIRE_TYPE: FieldType = FieldType::BooleanTrue;

    fn read_from(prot: &mut CompactReader<'_>) -> Result<Self> {
        prot.read_bool()
    }

    fn read_field(prot: &mut CompactReader<'_>, field: &FieldHeader) -> Result<Self> {
        match field.bool_value {
            Some(value) => Ok(value),
            None => prot.read_bool(),
        }
    }
}

macro_rules! primitive {
    ($ty:ty, $wire:ident, $method:ident) => {
        impl ReadThrift for $ty {
            const WIRE_TYPE: FieldType = FieldType::$wire;

            fn read_from(prot: &mut CompactReader<'_>) -> Result<Self> {
                prot.$method()
            }
        }
    };
}

primitive!(i8, Byte, read_i8);
primitive!(i16, I16, read_i16);
primitive!(i32, I32, read_i32);
primitive!(i64, I64, read_i64);
primitive!(f64, Double, read_double);
primitive!(String, Binary, read_string);

impl ReadThrift for Vec<u8> {
    const WIRE_TYPE: FieldType = FieldType::Binary;

    fn read_from(prot: &mut CompactReader<'_>) -> Result<Self> {
        prot.read_binary().map(|x| x.to_vec())
    }
}

impl<T: ReadThrift> ReadThrift for Option<T> {
    const WIRE_TYPE: FieldType = T::WIRE_TYPE;

    fn read_from(prot: &mut CompactReader<'_>) -> Result<Self> {
        T::read_from(prot).map(Some)
    }

    fn read_field(prot: &mut CompactReader<'_>, field: &FieldHeader) -> Result<Self> {
        T::read_field(prot, field).map(Some)
    }
}

/// Implements [`ReadThrift`] for lists of the given types.
macro_rules! thrift_list {
    ($($name:ty),* $(,)?) => {
        $(
            impl $crate::thrift::ReadThrift for Vec<$name> {
                const WIRE_TYPE: $crate::thrift::FieldType = $crate::thrift::FieldType::List;

                fn read_from(
                    prot: &mut $crate::thrift::CompactReader<'_>,
                ) -> $crate::error::Result<Self> {
                    prot.read_list()
                }
            }
        )*
    };
}
pub(crate) use thrift_list;

thrift_list!(bool, i16, i32, i64, String, Vec<u8>);

/// Declares a thrift struct from its field table and implements [`ReadThrift`] for it
/// and for lists of it.
///
/// Required fields missing from the wire keep their [`Default`] value.
macro_rules! thrift_struct {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $id:literal => $field:ident: $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        #[cfg_attr(feature = "serde_types", derive(Deserialize, Serialize))]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::thrift::ReadThrift for $name {
            const WIRE_TYPE: $crate::thrift::FieldType = $crate::thrift::FieldType::Struct;

            #[allow(unused_mut)]
            fn read_from(
                prot: &mut $crate::thrift::CompactReader<'_>,
            ) -> $crate::error::Result<Self> {
                let mut this = Self::default();
                prot.read_struct(|prot, field| {
                    match field.id {
                        $(
                            $id => this.$field = prot.read_field::<$ty>(&field)?,
                        )*
                        _ => prot.skip(field.field_type)?,
                    }
                    Ok(())
                })?;
                Ok(this)
            }
        }

        $crate::thrift::thrift_list!($name);
    };
}
pub(crate) use thrift_struct;

/// Declares a thrift enum (an `i32` on the wire) and implements [`ReadThrift`] for it.
/// Values outside of the declared ones are out of spec.
macro_rules! thrift_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
        #[cfg_attr(feature = "serde_types", derive(Deserialize, Serialize))]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::error::Error;

            fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
                Ok(match value {
                    $($value => $name::$variant,)*
                    _ => {
                        return Err($crate::error::Error::oos(format!(
                            "Thrift out of range: {} is not a valid {}",
                            value,
                            stringify!($name)
                        )))
                    }
                })
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $value,)*
                }
            }
        }

        impl $crate::thrift::ReadThrift for $name {
            const WIRE_TYPE: $crate::thrift::FieldType = $crate::thrift::FieldType::I32;

            fn read_from(
                prot: &mut $crate::thrift::CompactReader<'_>,
            ) -> $crate::error::Result<Self> {
                prot.read_i32()?.try_into()
            }
        }

        $crate::thrift::thrift_list!($name);
    };
}
pub(crate) use thrift_enum;

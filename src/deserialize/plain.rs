use crate::encoding::{bitpacked, plain_byte_array::BinaryIter};
use crate::error::{Error, Result};
use crate::schema::types::PhysicalType;
use crate::types::{decode, NativeType};
use crate::value::Value;

fn native<T: NativeType>(values: &[u8], length: usize, op: fn(T) -> Value) -> Vec<Value> {
    values
        .chunks_exact(std::mem::size_of::<T>())
        .take(length)
        .map(|chunk| op(decode::<T>(chunk)))
        .collect()
}

/// Decodes up to `length` PLAIN-encoded values of `physical_type`.
///
/// Decoding stops early, without error, when `values` has fewer than `length` values.
pub fn decode_plain(
    values: &[u8],
    physical_type: &PhysicalType,
    length: usize,
) -> Result<Vec<Value>> {
    Ok(match physical_type {
        PhysicalType::Boolean => {
            let length = length.min(values.len() * 8);
            bitpacked::Decoder::new(values, 1, length)
                .map(|bit| Value::Boolean(bit == 1))
                .collect()
        }
        PhysicalType::Int32 => native(values, length, Value::Int32),
        PhysicalType::Int64 => native(values, length, Value::Int64),
        PhysicalType::Int96 => native(values, length, Value::Int96),
        PhysicalType::Float => native(values, length, Value::Float),
        PhysicalType::Double => native(values, length, Value::Double),
        PhysicalType::ByteArray => {
            return BinaryIter::new(values, length)
                .map(|bytes| bytes.map(Value::from_byte_array))
                .collect()
        }
        PhysicalType::FixedLenByteArray(0) => {
            return Err(Error::oos("A FixedLenByteArray must be at least one byte long"))
        }
        PhysicalType::FixedLenByteArray(size) => values
            .chunks_exact(*size)
            .take(length)
            .map(|chunk| Value::FixedLenByteArray(chunk.to_vec()))
            .collect(),
    })
}

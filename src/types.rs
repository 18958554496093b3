use std::convert::TryFrom;

/// A physical native representation of a Parquet fixed-sized type.
pub trait NativeType: Sized + Copy + std::fmt::Debug {
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! native {
    ($type:ty) => {
        impl NativeType for $type {
            type Bytes = [u8; std::mem::size_of::<Self>()];

            #[inline]
            fn from_le_bytes(bytes: Self::Bytes) -> Self {
                Self::from_le_bytes(bytes)
            }
        }
    };
}

native!(i32);
native!(i64);
native!(f32);
native!(f64);

impl NativeType for [u32; 3] {
    type Bytes = [u8; 12];

    #[inline]
    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        let mut result = [0u32; 3];
        for (value, chunk) in result.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        result
    }
}

/// Decodes a value from its little-endian representation.
/// # Panics
/// iff `chunk.len()` is not the size of `T`
#[inline]
pub fn decode<T: NativeType>(chunk: &[u8]) -> T {
    let chunk: <T as NativeType>::Bytes = match chunk.try_into() {
        Ok(v) => v,
        Err(_) => panic!(
            "a chunk of {} bytes can't be decoded as {}",
            chunk.len(),
            std::any::type_name::<T>()
        ),
    };
    T::from_le_bytes(chunk)
}

/// Converts an `INT96` timestamp (nanoseconds of the day followed by the julian day)
/// into nanoseconds since the unix epoch.
pub fn int96_to_i64_ns(value: [u32; 3]) -> i64 {
    const JULIAN_DAY_OF_EPOCH: i64 = 2_440_588;
    const SECONDS_PER_DAY: i64 = 86_400;
    const NANOS_PER_SECOND: i64 = 1_000_000_000;

    let day = value[2] as i64;
    let nanoseconds = ((value[1] as i64) << 32) + value[0] as i64;
    let seconds = (day - JULIAN_DAY_OF_EPOCH) * SECONDS_PER_DAY;

    seconds * NANOS_PER_SECOND + nanoseconds
}

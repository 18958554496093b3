// See https://github.com/apache/parquet-format/blob/master/Encodings.md#run-length-encoding--bit-packing-hybrid-rle--3
mod decoder;

pub use decoder::{Decoder, HybridRleDecoder};

/// A run of the hybrid encoding.
#[derive(Debug, PartialEq, Eq)]
pub enum HybridEncoded<'a> {
    /// A bitpacked slice holding `length` values.
    /// The consumer must know its bit-width to unpack it.
    Bitpacked { packed: &'a [u8], length: usize },
    /// A value repeated `length` times.
    Rle { value: u32, length: usize },
}

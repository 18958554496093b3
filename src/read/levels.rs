use crate::encoding::{get_length, hybrid_rle::HybridRleDecoder};
use crate::error::{Error, Result};

/// Returns the number of bits needed to store the given maximum definition or repetition level.
#[inline]
pub fn get_bit_width(max_level: i16) -> u32 {
    16 - max_level.leading_zeros()
}

/// Splits the buffer of a data page v1 into its RLE-encoded levels, prefixed by their
/// length (`u32` LE), and the remaining bytes.
pub fn split_buffer_v1(buffer: &[u8]) -> Result<(&[u8], &[u8])> {
    let length = get_length(buffer).ok_or_else(|| {
        Error::oos("The page is too short to contain the length of its levels")
    })?;
    let levels = buffer.get(4..4 + length).ok_or_else(|| {
        Error::oos(format!(
            "The levels of the page ({} bytes) do not fit in its {} bytes",
            length,
            buffer.len()
        ))
    })?;
    Ok((levels, &buffer[4 + length..]))
}

/// Decodes up to `length` RLE-encoded definition levels into whether each slot holds a
/// value, i.e. whether its level is `max_level`.
pub fn decode_validity(levels: &[u8], max_level: i16, length: usize) -> Result<Vec<bool>> {
    let num_bits = get_bit_width(max_level) as usize;
    HybridRleDecoder::try_new(levels, num_bits, length)?
        .map(|level| level.map(|level| level == max_level as u32))
        .collect()
}

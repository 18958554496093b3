use crate::error::{Error, Result};

/// Decodes an unsigned LEB128 (base-128 varint) of at most 64 bits from the start of `values`,
/// returning the value and the number of bytes consumed.
pub fn decode(values: &[u8]) -> Result<(u64, usize)> {
    decode_bounded(values, 64)
}

/// Like [`decode`], but fails when the value does not fit in 32 bits.
pub fn decode_u32(values: &[u8]) -> Result<(u32, usize)> {
    let (value, consumed) = decode_bounded(values, 32)?;
    // `decode_bounded` already rejected any bit above 32
    Ok((value as u32, consumed))
}

fn decode_bounded(values: &[u8], width: u32) -> Result<(u64, usize)> {
    let mut result = 0;
    let mut shift = 0;

    for (consumed, byte) in values.iter().enumerate() {
        if shift >= width {
            return Err(Error::protocol(format!(
                "varint is longer than {} bits",
                width
            )));
        }
        let payload = u64::from(byte & 0x7f);
        // bits that would land above `width` make the varint malformed
        let free_bits = width - shift;
        if free_bits < 7 && payload >> free_bits != 0 {
            return Err(Error::protocol(format!(
                "varint overflows {} bits",
                width
            )));
        }

        result |= payload << shift;

        if byte & 0x80 == 0 {
            return Ok((result, consumed + 1));
        }

        shift += 7;
    }
    Err(Error::EndOfInput {
        position: values.len(),
        needed: 1,
    })
}

//! Decoding of values bit-packed LSB-first, as used by the bit-packed runs of the
//! [RLE/bit-packing hybrid](https://github.com/apache/parquet-format/blob/master/Encodings.md#run-length-encoding--bit-packing-hybrid-rle--3).

/// An [`Iterator`] of `u32` unpacked from `packed`, `num_bits` each.
///
/// Bytes missing at the end of `packed` are read as zeros, so that a truncated last
/// group can still be decoded up to `length`.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    packed: &'a [u8],
    num_bits: usize,
    mask: u64,
    bit_offset: usize,
    remaining: usize,
}

impl<'a> Decoder<'a> {
    /// # Panics
    /// iff `num_bits > 32`
    pub fn new(packed: &'a [u8], num_bits: usize, length: usize) -> Self {
        assert!(num_bits <= 32);
        Self {
            packed,
            num_bits,
            mask: (1u64 << num_bits) - 1,
            bit_offset: 0,
            remaining: length,
        }
    }

    #[inline]
    fn byte(&self, index: usize) -> u64 {
        self.packed.get(index).copied().unwrap_or(0) as u64
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.num_bits == 0 {
            return Some(0);
        }

        let start = self.bit_offset / 8;
        let shift = self.bit_offset % 8;
        // at most 32 bits shifted by at most 7 bits: 5 bytes are always enough
        let word = (0..5).fold(0u64, |acc, i| acc | self.byte(start + i) << (8 * i));
        self.bit_offset += self.num_bits;

        Some(((word >> shift) & self.mask) as u32)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for Decoder<'a> {}

use crate::encoding::get_length;
use crate::error::{Error, Result};

/// Decodes according to [Plain strings](https://github.com/apache/parquet-format/blob/master/Encodings.md#plain-plain--0),
/// prefixes, lengths and values
///
/// The iterator ends when `length` values were returned or when fewer than 4 bytes remain.
/// A length prefix pointing past the end of the buffer is an error.
/// # Implementation
/// This struct does not allocate on the heap.
#[derive(Debug)]
pub struct BinaryIter<'a> {
    values: &'a [u8],
    remaining: usize,
}

impl<'a> BinaryIter<'a> {
    #[inline]
    pub fn new(values: &'a [u8], length: usize) -> Self {
        Self {
            values,
            remaining: length,
        }
    }
}

impl<'a> Iterator for BinaryIter<'a> {
    type Item = Result<&'a [u8]>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let next_len = get_length(self.values)?;
        self.remaining -= 1;
        let values = &self.values[4..];
        if next_len > values.len() {
            self.remaining = 0;
            return Some(Err(Error::oos(format!(
                "A byte array of length {} does not fit in the {} remaining bytes",
                next_len,
                values.len()
            ))));
        }

        let result = Some(Ok(&values[..next_len]));
        self.values = &values[next_len..];
        result
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

use super::super::{bitpacked, ceil8, uleb128};
use super::HybridEncoded;
use crate::error::{Error, Result};

/// An [`Iterator`] of the runs ([`HybridEncoded`]) of a hybrid-encoded slice.
///
/// It stops after `length` values have been announced or when `values` is exhausted,
/// whichever happens first.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    values: &'a [u8],
    num_bits: usize,
    remaining: usize,
}

impl<'a> Decoder<'a> {
    pub fn try_new(values: &'a [u8], num_bits: usize, length: usize) -> Result<Self> {
        if num_bits > 32 {
            return Err(Error::oos(format!(
                "The bit width of the hybrid encoding must be at most 32 (got {})",
                num_bits
            )));
        }
        Ok(Self {
            values,
            num_bits,
            remaining: length,
        })
    }

    /// The number of values not yet announced by a run.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn next_run(&mut self) -> Result<HybridEncoded<'a>> {
        let (indicator, consumed) = uleb128::decode(self.values)?;
        self.values = &self.values[consumed..];
        let run = (indicator >> 1) as usize;
        if indicator & 1 == 1 {
            // is bitpacking: `run` groups of 8 values
            let num_bytes = run.saturating_mul(self.num_bits);
            let available = num_bytes.min(self.values.len());
            let mut length = run.saturating_mul(8).min(self.remaining);
            if available < num_bytes && self.num_bits > 0 {
                // a truncated last run only holds the values it has bits for
                length = length.min(available * 8 / self.num_bits);
            }
            let packed = &self.values[..available];
            self.values = &self.values[available..];
            self.remaining -= length;
            Ok(HybridEncoded::Bitpacked { packed, length })
        } else {
            // is rle
            // repeated-value := value that is repeated, using a fixed-width of
            // round-up-to-next-byte(bit-width)
            let rle_bytes = ceil8(self.num_bits);
            let pack = self.values.get(..rle_bytes).ok_or(Error::EndOfInput {
                position: 0,
                needed: rle_bytes,
            })?;
            let mut value_bytes = [0u8; std::mem::size_of::<u32>()];
            value_bytes[..rle_bytes].copy_from_slice(pack);
            let value = u32::from_le_bytes(value_bytes);
            self.values = &self.values[rle_bytes..];

            let length = run.min(self.remaining);
            self.remaining -= length;
            Ok(HybridEncoded::Rle { value, length })
        }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<HybridEncoded<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.values.is_empty() {
            return None;
        }
        let run = self.next_run();
        if run.is_err() {
            // a malformed run leaves the decoder in an unknown state
            self.remaining = 0;
        }
        Some(run)
    }
}

#[derive(Debug, Clone)]
enum State<'a> {
    None,
    Bitpacked(bitpacked::Decoder<'a>),
    Rle { value: u32, remaining: usize },
}

/// An [`Iterator`] of `u32` values decoded from the hybrid encoding.
#[derive(Debug, Clone)]
pub struct HybridRleDecoder<'a> {
    runs: Decoder<'a>,
    num_bits: usize,
    state: State<'a>,
}

impl<'a> HybridRleDecoder<'a> {
    /// Returns a new [`HybridRleDecoder`] of at most `length` values of `num_bits` each.
    pub fn try_new(values: &'a [u8], num_bits: usize, length: usize) -> Result<Self> {
        Ok(Self {
            runs: Decoder::try_new(values, num_bits, length)?,
            num_bits,
            state: State::None,
        })
    }

    fn load_run(&mut self) -> Option<Result<()>> {
        let run = match self.runs.next()? {
            Ok(run) => run,
            Err(e) => return Some(Err(e)),
        };
        self.state = match run {
            HybridEncoded::Bitpacked { packed, length } => {
                State::Bitpacked(bitpacked::Decoder::new(packed, self.num_bits, length))
            }
            HybridEncoded::Rle { value, length } => State::Rle {
                value,
                remaining: length,
            },
        };
        Some(Ok(()))
    }
}

impl<'a> Iterator for HybridRleDecoder<'a> {
    type Item = Result<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = match &mut self.state {
                State::None => None,
                State::Bitpacked(decoder) => decoder.next(),
                State::Rle { value, remaining } => {
                    if *remaining == 0 {
                        None
                    } else {
                        *remaining -= 1;
                        Some(*value)
                    }
                }
            };
            if let Some(next) = next {
                return Some(Ok(next));
            }
            if let Err(e) = self.load_run()? {
                self.state = State::None;
                return Some(Err(e));
            }
        }
    }
}

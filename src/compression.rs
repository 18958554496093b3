pub use super::parquet_bridge::Compression;

use crate::error::{Error, Result};

/// Decompresses data stored in slice `input_buf` and writes output to `output_buf`.
///
/// `output_buf` must have exactly the size declared by the page header: a codec producing
/// a different number of bytes is an error.
pub fn decompress(
    compression: Compression,
    input_buf: &[u8],
    output_buf: &mut [u8],
) -> Result<()> {
    match compression {
        Compression::Uncompressed => {
            if input_buf.len() != output_buf.len() {
                return Err(Error::oos(format!(
                    "An uncompressed page of {} bytes declares {} bytes",
                    input_buf.len(),
                    output_buf.len()
                )));
            }
            output_buf.copy_from_slice(input_buf);
            Ok(())
        }
        #[cfg(feature = "brotli")]
        Compression::Brotli => {
            const BROTLI_DEFAULT_BUFFER_SIZE: usize = 4096;
            let decoder = brotli::Decompressor::new(input_buf, BROTLI_DEFAULT_BUFFER_SIZE);
            read_stream(decoder, output_buf, "brotli")
        }
        #[cfg(not(feature = "brotli"))]
        Compression::Brotli => Err(Error::FeatureNotActive(
            crate::error::Feature::Brotli,
            "decompress with brotli".to_string(),
        )),
        #[cfg(feature = "gzip")]
        Compression::Gzip => {
            // some writers emit one gzip member per block
            let decoder = flate2::read::MultiGzDecoder::new(input_buf);
            read_stream(decoder, output_buf, "gzip")
        }
        #[cfg(not(feature = "gzip"))]
        Compression::Gzip => Err(Error::FeatureNotActive(
            crate::error::Feature::Gzip,
            "decompress with gzip".to_string(),
        )),
        #[cfg(feature = "snappy")]
        Compression::Snappy => {
            use snap::raw::{decompress_len, Decoder};

            let len = decompress_len(input_buf)?;
            if len != output_buf.len() {
                return Err(Error::oos(format!(
                    "A snappy page decompresses to {} bytes but declares {}",
                    len,
                    output_buf.len()
                )));
            }
            Decoder::new()
                .decompress(input_buf, output_buf)
                .map_err(|e| e.into())
                .map(|_| ())
        }
        #[cfg(not(feature = "snappy"))]
        Compression::Snappy => Err(Error::FeatureNotActive(
            crate::error::Feature::Snappy,
            "decompress with snappy".to_string(),
        )),
        #[cfg(feature = "lz4")]
        Compression::Lz4Raw => lz4_raw_decompress(input_buf, output_buf),
        #[cfg(feature = "lz4")]
        Compression::Lz4 => {
            if try_decompress_hadoop(input_buf, output_buf) {
                Ok(())
            } else {
                lz4_raw_decompress(input_buf, output_buf)
            }
        }
        #[cfg(not(feature = "lz4"))]
        Compression::Lz4Raw | Compression::Lz4 => Err(Error::FeatureNotActive(
            crate::error::Feature::Lz4,
            "decompress with lz4".to_string(),
        )),
        #[cfg(feature = "zstd")]
        Compression::Zstd => {
            let decoder = zstd::Decoder::new(input_buf)?;
            read_stream(decoder, output_buf, "zstd")
        }
        #[cfg(not(feature = "zstd"))]
        Compression::Zstd => Err(Error::FeatureNotActive(
            crate::error::Feature::Zstd,
            "decompress with zstd".to_string(),
        )),
        Compression::Lzo => Err(Error::UnsupportedCodec(compression)),
    }
}

/// Fills `output_buf` from a decompressing reader, which must then be exhausted.
#[cfg(any(feature = "brotli", feature = "gzip", feature = "zstd"))]
fn read_stream<R: std::io::Read>(mut decoder: R, output_buf: &mut [u8], codec: &str) -> Result<()> {
    decoder.read_exact(output_buf)?;
    if decoder.read(&mut [0u8; 1])? != 0 {
        return Err(Error::oos(format!(
            "A {} page decompresses to more than the {} bytes it declares",
            codec,
            output_buf.len()
        )));
    }
    Ok(())
}

/// Decompresses `input_buf` into a new buffer of `uncompressed_size` bytes.
pub fn decompress_to_vec(
    compression: Compression,
    input_buf: &[u8],
    uncompressed_size: usize,
) -> Result<Vec<u8>> {
    let mut output_buf = vec![];
    output_buf.try_reserve(uncompressed_size)?;
    output_buf.resize(uncompressed_size, 0);
    decompress(compression, input_buf, &mut output_buf)?;
    Ok(output_buf)
}

#[cfg(feature = "lz4")]
fn lz4_raw_decompress(input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
    let size = lz4_flex::block::decompress_into(input_buf, output_buf)?;
    if size != output_buf.len() {
        return Err(Error::oos(format!(
            "A lz4 page decompresses to {} bytes but declares {}",
            size,
            output_buf.len()
        )));
    }
    Ok(())
}

/// Decompresses the framing that Hadoop uses for lz4: a sequence of
/// `[decompressed size: u32 BE][compressed size: u32 BE][lz4 block]`.
///
/// Returns `false` when `input_buf` is not in this framing, in which case `output_buf`
/// is in an undefined state.
#[cfg(feature = "lz4")]
fn try_decompress_hadoop(input_buf: &[u8], output_buf: &mut [u8]) -> bool {
    const PREFIX_LEN: usize = 8;

    let mut input = input_buf;
    let mut output_len = 0;
    while input.len() >= PREFIX_LEN {
        let expected_decompressed =
            u32::from_be_bytes([input[0], input[1], input[2], input[3]]) as usize;
        let expected_compressed =
            u32::from_be_bytes([input[4], input[5], input[6], input[7]]) as usize;
        input = &input[PREFIX_LEN..];

        if expected_compressed > input.len()
            || expected_decompressed > output_buf.len() - output_len
        {
            return false;
        }
        let output = &mut output_buf[output_len..output_len + expected_decompressed];
        match lz4_flex::block::decompress_into(&input[..expected_compressed], output) {
            Ok(size) if size == expected_decompressed => {}
            _ => return false,
        }
        input = &input[expected_compressed..];
        output_len += expected_decompressed;
    }
    input.is_empty() && output_len == output_buf.len()
}

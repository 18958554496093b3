use std::convert::TryInto;
use std::ops::Range;
use std::{
    cmp::min,
    io::{Read, Seek, SeekFrom},
};

use super::super::{
    format, metadata::FileMetaData, thrift, DEFAULT_FOOTER_READ_SIZE, FOOTER_SIZE, PARQUET_MAGIC,
};
use super::options::{MagicPolicy, ReadOptions};

use crate::error::{Error, Result};

// see (unstable) Seek::stream_len
fn stream_len(seek: &mut impl Seek) -> std::result::Result<u64, std::io::Error> {
    let old_pos = seek.stream_position()?;
    let len = seek.seek(SeekFrom::End(0))?;

    // Avoid seeking a third time when we were already at the end of the
    // stream. The branch is usually way cheaper than a seek operation.
    if old_pos != len {
        seek.seek(SeekFrom::Start(old_pos))?;
    }

    Ok(len)
}

/// Decodes the last 8 bytes of a file, `[metadata length: i32 LE]["PAR1"]`, into the
/// length of the metadata.
pub fn decode_footer(footer: &[u8; 8], options: &ReadOptions) -> Result<u64> {
    let magic: [u8; 4] = [footer[4], footer[5], footer[6], footer[7]];
    if magic != PARQUET_MAGIC {
        match options.magic {
            MagicPolicy::Strict => return Err(Error::InvalidMagic { found: magic }),
            MagicPolicy::Lenient => {
                log::warn!(
                    "the footer magic is {:?} instead of \"PAR1\"; reading the footer anyway",
                    magic
                );
            }
        }
    }

    let metadata_len = i32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
    metadata_len.try_into().map_err(|_| {
        Error::oos(format!(
            "Invalid Parquet file. Metadata length is less than zero ({})",
            metadata_len
        ))
    })
}

/// The byte range of the metadata of a file of `file_size` bytes whose metadata is
/// `metadata_len` bytes: the bytes right before the footer.
pub fn metadata_range(file_size: u64, metadata_len: u64) -> Result<Range<u64>> {
    let footer_len = FOOTER_SIZE + metadata_len;
    if footer_len > file_size {
        return Err(Error::oos(format!(
            "Invalid Parquet file. Metadata start is less than zero ({})",
            file_size as i64 - footer_len as i64
        )));
    }
    Ok(file_size - footer_len..file_size - FOOTER_SIZE)
}

/// Reads a file's metadata with the default [`ReadOptions`].
pub fn read_metadata<R: Read + Seek>(reader: &mut R) -> Result<FileMetaData> {
    read_metadata_with_options(reader, &ReadOptions::default())
}

/// Reads a file's metadata.
// Layout of Parquet file
// +---------------------------+-----+---+
// |      Rest of file         |  B  | A |
// +---------------------------+-----+---+
// where A: parquet footer, B: parquet metadata.
//
// The reader first reads DEFAULT_FOOTER_SIZE bytes from the end of the file.
// If it is not enough according to the length indicated in the footer, it reads more bytes.
pub fn read_metadata_with_options<R: Read + Seek>(
    reader: &mut R,
    options: &ReadOptions,
) -> Result<FileMetaData> {
    // check file is large enough to hold footer
    let file_size = stream_len(reader)?;
    if file_size <= FOOTER_SIZE {
        return Err(Error::FileTooSmall { size: file_size });
    }

    // read and cache up to DEFAULT_FOOTER_READ_SIZE bytes from the end and process the footer
    let default_end_len = min(DEFAULT_FOOTER_READ_SIZE, file_size) as usize;
    reader.seek(SeekFrom::End(-(default_end_len as i64)))?;
    let mut buffer = vec![0; default_end_len];
    reader.read_exact(&mut buffer)?;

    let mut footer = [0u8; 8];
    footer.copy_from_slice(&buffer[default_end_len - FOOTER_SIZE as usize..]);
    let metadata_len = decode_footer(&footer, options)?;
    let range = metadata_range(file_size, metadata_len)?;

    let start_in_buffer = range.start as i64 - (file_size - default_end_len as u64) as i64;
    if start_in_buffer >= 0 {
        // the whole metadata is in the bytes we already read
        let start = start_in_buffer as usize;
        deserialize_metadata(&buffer[start..default_end_len - FOOTER_SIZE as usize])
    } else {
        // the end of file read by default is not long enough, read again including all metadata.
        reader.seek(SeekFrom::Start(range.start))?;
        let mut buffer = vec![];
        buffer.try_reserve(metadata_len as usize)?;
        reader.by_ref().take(metadata_len).read_to_end(&mut buffer)?;
        if buffer.len() as u64 != metadata_len {
            return Err(Error::ShortRead {
                offset: range.start,
                expected: metadata_len as usize,
                actual: buffer.len(),
            });
        }
        deserialize_metadata(&buffer)
    }
}

/// Parses the thrift-encoded metadata of a file (without its footer).
pub fn deserialize_metadata(buffer: &[u8]) -> Result<FileMetaData> {
    let (metadata, _) = thrift::deserialize::<format::FileMetaData>(buffer)?;
    FileMetaData::try_from_thrift(metadata)
}

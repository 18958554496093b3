use std::convert::TryFrom;
use std::io::{Read, Seek, SeekFrom};

use crate::compression::Compression;
use crate::error::{Error, Result};
use crate::metadata::{ColumnChunkMetaData, ColumnDescriptor};
use crate::page::{CompressedPage, Page, PageHeader};
use crate::read::compression::decompress;
use crate::thrift;

/// The number of bytes read ahead of a page to parse its header.
pub const DEFAULT_MAX_HEADER_SIZE: usize = 64 * 1024;

/// This meta is a small part of [`ColumnChunkMetaData`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetaData {
    /// The start offset of this column chunk in file.
    pub column_start: u64,
    /// The length in bytes of this column chunk, page headers included.
    pub column_len: u64,
    /// Compression type
    pub compression: Compression,
    /// The descriptor of this parquet column
    pub descriptor: ColumnDescriptor,
}

impl PageMetaData {
    /// Returns a new [`PageMetaData`].
    pub fn new(
        column_start: u64,
        column_len: u64,
        compression: Compression,
        descriptor: ColumnDescriptor,
    ) -> Self {
        Self {
            column_start,
            column_len,
            compression,
            descriptor,
        }
    }
}

impl TryFrom<&ColumnChunkMetaData> for PageMetaData {
    type Error = Error;

    fn try_from(column: &ColumnChunkMetaData) -> Result<Self> {
        if let Some(path) = column.file_path() {
            return Err(Error::FeatureNotSupported(format!(
                "Reading column chunks stored in another file ({})",
                path
            )));
        }
        let (column_start, column_len) = column.byte_range()?;
        Ok(Self {
            column_start,
            column_len,
            compression: column.compression()?,
            descriptor: column.descriptor().clone(),
        })
    }
}

/// A fallible [`Iterator`] of [`Page`]s of a column chunk. This iterator reads pages back
/// to back until the bytes of the chunk have been consumed.
///
/// The reader owns its cursor: it seeks to it before every read, so that the underlying
/// reader can be used by others between pages.
pub struct PageReader<R: Read + Seek> {
    // The source
    reader: R,

    compression: Compression,

    // The offset of the next page header
    offset: u64,

    // The offset of the end of the column chunk
    end: u64,

    max_header_size: usize,

    descriptor: ColumnDescriptor,

    // The buffer the page headers are read into.
    buffer: Vec<u8>,
}

impl<R: Read + Seek> PageReader<R> {
    /// Returns a new [`PageReader`] over the chunk described by `column`.
    pub fn try_new(reader: R, column: &ColumnChunkMetaData) -> Result<Self> {
        Ok(Self::new_with_page_meta(
            reader,
            column.try_into()?,
            DEFAULT_MAX_HEADER_SIZE,
        ))
    }

    /// Create a a new [`PageReader`] with [`PageMetaData`].
    pub fn new_with_page_meta(
        reader: R,
        reader_meta: PageMetaData,
        max_header_size: usize,
    ) -> Self {
        Self {
            reader,
            compression: reader_meta.compression,
            offset: reader_meta.column_start,
            end: reader_meta
                .column_start
                .saturating_add(reader_meta.column_len),
            max_header_size,
            descriptor: reader_meta.descriptor,
            buffer: vec![],
        }
    }

    /// The offset of the next page, or of the end of the chunk once exhausted.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The offset of the end of the chunk.
    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    /// Returns the reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads the next page, without decompressing it. Returns `None` once the chunk
    /// has been consumed.
    pub fn read_compressed_page(&mut self) -> Result<Option<CompressedPage>> {
        if self.offset >= self.end {
            return Ok(None);
        }
        let page_offset = self.offset;

        let (page_header, header_size) = self.read_page_header()?;
        self.offset += header_size as u64;

        let read_size: usize = page_header.compressed_page_size.try_into()?;
        if self.offset + read_size as u64 > self.end {
            return Err(Error::oos(format!(
                "The page at offset {} declares {} bytes, past the end of its column chunk ({})",
                page_offset, read_size, self.end
            )));
        }

        self.reader.seek(SeekFrom::Start(self.offset))?;
        let mut buffer = vec![];
        buffer.try_reserve(read_size)?;
        self.reader
            .by_ref()
            .take(read_size as u64)
            .read_to_end(&mut buffer)?;
        if buffer.len() != read_size {
            return Err(Error::ShortRead {
                offset: self.offset,
                expected: read_size,
                actual: buffer.len(),
            });
        }
        self.offset += read_size as u64;

        Ok(Some(CompressedPage::new(
            page_header,
            buffer,
            self.compression,
            page_offset,
        )))
    }

    /// Reads and decompresses the next page. Returns `None` once the chunk has been consumed.
    pub fn read_page(&mut self) -> Result<Option<Page>> {
        self.read_compressed_page()?.map(decompress).transpose()
    }

    /// Reads the header at the cursor from a lookahead buffer, returning it and its size.
    fn read_page_header(&mut self) -> Result<(PageHeader, usize)> {
        let lookahead = (self.max_header_size as u64).min(self.end - self.offset) as usize;

        self.reader.seek(SeekFrom::Start(self.offset))?;
        self.buffer.clear();
        self.buffer.try_reserve(lookahead)?;
        self.reader
            .by_ref()
            .take(lookahead as u64)
            .read_to_end(&mut self.buffer)?;

        let (header, header_size) = thrift::deserialize::<PageHeader>(&self.buffer)?;
        log::debug!(
            "read {:?} header of {} bytes at offset {} ({} bytes of lookahead)",
            header.type_,
            header_size,
            self.offset,
            self.buffer.len()
        );
        Ok((header, header_size))
    }
}

impl<R: Read + Seek> Iterator for PageReader<R> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_page().transpose()
    }
}

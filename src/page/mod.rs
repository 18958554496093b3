pub use crate::format::{
    DataPageHeader as DataPageHeaderV1, DataPageHeaderV2, DictionaryPageHeader, PageHeader,
};
pub use crate::parquet_bridge::PageType;

use crate::compression::Compression;
use crate::encoding::Encoding;
use crate::error::{Error, Result};

/// A [`CompressedPage`] is a page as stored in a column chunk: its header and its
/// (possibly compressed) payload. It holds actual data and thus cloning it is expensive.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedPage {
    pub(crate) header: PageHeader,
    pub(crate) buffer: Vec<u8>,
    compression: Compression,
    offset: u64,
}

impl CompressedPage {
    pub fn new(header: PageHeader, buffer: Vec<u8>, compression: Compression, offset: u64) -> Self {
        Self {
            header,
            buffer,
            compression,
            offset,
        }
    }

    pub fn header(&self) -> &PageHeader {
        &self.header
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn compressed_size(&self) -> usize {
        self.buffer.len()
    }

    /// The file offset of the header of this page.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The declared size of the decompressed payload.
    pub fn uncompressed_size(&self) -> Result<usize> {
        self.header.uncompressed_page_size.try_into().map_err(|_| {
            Error::oos(format!(
                "The page at offset {} declares a negative uncompressed size ({})",
                self.offset, self.header.uncompressed_page_size
            ))
        })
    }
}

/// A [`Page`] is an uncompressed, encoded page. For data pages v2, the buffer holds the
/// levels followed by the values, as for data pages v1.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    header: PageHeader,
    pub(crate) buffer: Vec<u8>,
    offset: u64,
}

impl Page {
    pub fn new(header: PageHeader, buffer: Vec<u8>, offset: u64) -> Self {
        Self {
            header,
            buffer,
            offset,
        }
    }

    pub fn header(&self) -> &PageHeader {
        &self.header
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// The file offset of the header of this page.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn page_type(&self) -> PageType {
        self.header.type_
    }

    /// The number of values of a data or dictionary page, including nulls.
    pub fn num_values(&self) -> Option<i32> {
        match self.header.type_ {
            PageType::DataPage => self.header.data_page_header.as_ref().map(|x| x.num_values),
            PageType::DataPageV2 => self
                .header
                .data_page_header_v2
                .as_ref()
                .map(|x| x.num_values),
            PageType::DictionaryPage => self
                .header
                .dictionary_page_header
                .as_ref()
                .map(|x| x.num_values),
            PageType::IndexPage => None,
        }
    }

    /// The encoding of the values of a data or dictionary page.
    pub fn encoding(&self) -> Option<Encoding> {
        match self.header.type_ {
            PageType::DataPage => self.header.data_page_header.as_ref().map(|x| x.encoding),
            PageType::DataPageV2 => self
                .header
                .data_page_header_v2
                .as_ref()
                .map(|x| x.encoding),
            PageType::DictionaryPage => self
                .header
                .dictionary_page_header
                .as_ref()
                .map(|x| x.encoding),
            PageType::IndexPage => None,
        }
    }
}

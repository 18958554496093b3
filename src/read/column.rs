use std::io::{Read, Seek};
use std::vec::IntoIter;

use crate::deserialize::{decode_page, read_dict_page};
use crate::error::{Error, Result};
use crate::metadata::{ColumnChunkMetaData, ColumnDescriptor};
use crate::page::{Page, PageType};
use crate::value::Value;

use super::options::{PageErrorPolicy, ReadOptions};
use super::page::{PageMetaData, PageReader};

/// A fallible [`Iterator`] of the [`Value`]s of one column, across all row groups.
///
/// Pages are read one at a time: a dictionary page is kept until the end of its column
/// chunk, and the values of a data page are returned before the next page is read.
pub struct ColumnReader<R: Read + Seek> {
    // The reader, when no chunk is being read
    reader: Option<R>,
    pages: Option<PageReader<R>>,
    // The chunks not yet read, in row group order
    chunks: IntoIter<ColumnChunkMetaData>,
    row_group: usize,
    descriptor: ColumnDescriptor,
    dictionary: Option<Vec<Value>>,
    values: IntoIter<Value>,
    options: ReadOptions,
}

impl<R: Read + Seek> ColumnReader<R> {
    /// Returns a new [`ColumnReader`] over `chunks`, the chunks of one column, one per row group.
    pub fn new(
        reader: R,
        chunks: Vec<ColumnChunkMetaData>,
        descriptor: ColumnDescriptor,
        options: ReadOptions,
    ) -> Self {
        Self {
            reader: Some(reader),
            pages: None,
            chunks: chunks.into_iter(),
            row_group: 0,
            descriptor,
            dictionary: None,
            values: vec![].into_iter(),
            options,
        }
    }

    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.descriptor
    }

    /// Returns the next value of the column, or `None` once all row groups were read.
    ///
    /// Errors of the file structure (page headers, short reads, io) end the column.
    pub fn next_value(&mut self) -> Result<Option<Value>> {
        loop {
            if let Some(value) = self.values.next() {
                return Ok(Some(value));
            }
            let page = match self.next_page() {
                Ok(Some(page)) => page,
                Ok(None) => return Ok(None),
                Err(e) => {
                    self.pages = None;
                    self.chunks = vec![].into_iter();
                    return Err(e);
                }
            };
            self.consume_page(page)?;
        }
    }

    /// Reads the next page of the column, moving to the next row group when the
    /// current chunk is exhausted.
    fn next_page(&mut self) -> Result<Option<Page>> {
        loop {
            if let Some(pages) = self.pages.as_mut() {
                if let Some(page) = pages.read_page()? {
                    return Ok(Some(page));
                }
                if let Some(pages) = self.pages.take() {
                    self.reader = Some(pages.into_inner());
                }
                self.dictionary = None;
                self.row_group += 1;
            }

            let chunk = match self.chunks.next() {
                Some(chunk) => chunk,
                None => return Ok(None),
            };
            let meta = PageMetaData::try_from(&chunk)?;
            let reader = self
                .reader
                .take()
                .ok_or_else(|| Error::InvalidParameter("The column reader was lost".to_string()))?;
            log::trace!(
                "column \"{}\" moves to row group {} (bytes {}..{})",
                self.descriptor.name(),
                self.row_group,
                meta.column_start,
                meta.column_start + meta.column_len
            );
            self.pages = Some(PageReader::new_with_page_meta(
                reader,
                meta,
                self.options.max_header_size,
            ));
        }
    }

    fn consume_page(&mut self, page: Page) -> Result<()> {
        let physical_type = self.descriptor.physical_type();
        match page.page_type() {
            PageType::DictionaryPage => match read_dict_page(&page, physical_type) {
                Ok(dictionary) => self.dictionary = Some(dictionary),
                Err(e) => self.skip_page(&page, e)?,
            },
            PageType::DataPage | PageType::DataPageV2 => {
                match decode_page(
                    &page,
                    &self.descriptor,
                    self.dictionary.as_deref(),
                    &self.options,
                ) {
                    Ok(values) => self.values = values.into_iter(),
                    Err(e) => self.skip_page(&page, e)?,
                }
            }
            PageType::IndexPage => {
                log::warn!("skipping index page at offset {}", page.offset());
            }
        }
        Ok(())
    }

    fn skip_page(&self, page: &Page, error: Error) -> Result<()> {
        let skip = match error {
            Error::FeatureNotSupported(_) => true,
            Error::InvalidIndex { .. } => false,
            _ => self.options.page_errors == PageErrorPolicy::Skip,
        };
        if !skip {
            return Err(error);
        }
        log::warn!(
            "skipping {:?} page at offset {} of column \"{}\": {}",
            page.page_type(),
            page.offset(),
            self.descriptor.name(),
            error
        );
        Ok(())
    }
}

impl<R: Read + Seek> Iterator for ColumnReader<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value().transpose()
    }
}

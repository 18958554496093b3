use super::column_descriptor::ColumnDescriptor;
use crate::error::{Error, Result};
use crate::format::{ColumnChunk, ColumnMetaData, Statistics};
use crate::parquet_bridge::{Compression, Encoding};
use crate::schema::types::PhysicalType;

/// Metadata for a column chunk.
// This contains the `ColumnDescriptor` associated with the chunk so that deserializers have
// access to the descriptor (e.g. physical, converted, logical).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChunkMetaData {
    column_chunk: ColumnChunk,
    column_descr: ColumnDescriptor,
}

/// Represents common operations for a column chunk.
impl ColumnChunkMetaData {
    pub fn new(column_chunk: ColumnChunk, column_descr: ColumnDescriptor) -> Self {
        Self {
            column_chunk,
            column_descr,
        }
    }

    /// File where the column chunk is stored.
    ///
    /// If not set, assumed to belong to the same file as the metadata.
    /// This path is relative to the current file.
    pub fn file_path(&self) -> &Option<String> {
        &self.column_chunk.file_path
    }

    /// Byte offset in `file_path()`.
    pub fn file_offset(&self) -> i64 {
        self.column_chunk.file_offset
    }

    /// The thrift [`ColumnMetaData`] embedded in the chunk.
    /// # Error
    /// Errors if the chunk does not carry it.
    pub fn metadata(&self) -> Result<&ColumnMetaData> {
        self.column_chunk.meta_data.as_ref().ok_or_else(|| {
            Error::MissingColumnMetadata(self.column_descr.path_in_schema().join("."))
        })
    }

    /// The [`ColumnDescriptor`] for this column. This descriptor contains the physical and
    /// logical type of the pages.
    pub fn descriptor(&self) -> &ColumnDescriptor {
        &self.column_descr
    }

    /// The [`PhysicalType`] of this column.
    pub fn physical_type(&self) -> PhysicalType {
        *self.column_descr.physical_type()
    }

    pub fn statistics(&self) -> Result<Option<&Statistics>> {
        Ok(self.metadata()?.statistics.as_ref())
    }

    /// Total number of values in this column chunk.
    pub fn num_values(&self) -> Result<i64> {
        Ok(self.metadata()?.num_values)
    }

    /// [`Compression`] for this column.
    pub fn compression(&self) -> Result<Compression> {
        Ok(self.metadata()?.codec)
    }

    /// Returns the total compressed data size of this column chunk.
    pub fn compressed_size(&self) -> Result<i64> {
        Ok(self.metadata()?.total_compressed_size)
    }

    /// Returns the total uncompressed data size of this column chunk.
    pub fn uncompressed_size(&self) -> Result<i64> {
        Ok(self.metadata()?.total_uncompressed_size)
    }

    /// Returns the offset for the column data.
    pub fn data_page_offset(&self) -> Result<i64> {
        Ok(self.metadata()?.data_page_offset)
    }

    /// Returns the offset for the dictionary page, if any.
    pub fn dictionary_page_offset(&self) -> Result<Option<i64>> {
        Ok(self.metadata()?.dictionary_page_offset)
    }

    /// Returns the encodings used in this column
    pub fn column_encoding(&self) -> Result<&[Encoding]> {
        Ok(&self.metadata()?.encodings)
    }

    /// Returns the offset and length in bytes of the column chunk within the file.
    ///
    /// The chunk starts at the dictionary page when there is one, and at the first data
    /// page otherwise. Writers that do not write a dictionary sometimes set its offset to 0.
    pub fn byte_range(&self) -> Result<(u64, u64)> {
        let metadata = self.metadata()?;
        let col_start = match metadata.dictionary_page_offset {
            Some(offset) if offset > 0 => offset,
            _ => metadata.data_page_offset,
        };
        let col_len = metadata.total_compressed_size;
        if col_start < 0 || col_len < 0 {
            return Err(Error::oos(format!(
                "The column chunk of \"{}\" has a negative offset ({}) or length ({})",
                self.column_descr.name(),
                col_start,
                col_len
            )));
        }
        Ok((col_start as u64, col_len as u64))
    }
}

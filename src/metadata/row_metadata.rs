use super::{column_chunk_metadata::ColumnChunkMetaData, schema_descriptor::SchemaDescriptor};
use crate::error::{Error, Result};
use crate::format::{RowGroup, SortingColumn};

/// Metadata for a row group.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroupMetaData {
    columns: Vec<ColumnChunkMetaData>,
    num_rows: i64,
    total_byte_size: i64,
    sorting_columns: Option<Vec<SortingColumn>>,
    ordinal: Option<i16>,
}

impl RowGroupMetaData {
    /// Number of columns in this row group.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns column chunk metadata for `i`th column.
    pub fn column(&self, i: usize) -> &ColumnChunkMetaData {
        &self.columns[i]
    }

    /// Returns slice of column chunk metadata.
    pub fn columns(&self) -> &[ColumnChunkMetaData] {
        &self.columns
    }

    /// Number of rows in this row group.
    pub fn num_rows(&self) -> i64 {
        self.num_rows
    }

    /// Total byte size of all uncompressed column data in this row group.
    pub fn total_byte_size(&self) -> i64 {
        self.total_byte_size
    }

    pub fn sorting_columns(&self) -> Option<&[SortingColumn]> {
        self.sorting_columns.as_deref()
    }

    /// The position of this row group in the file, when the writer recorded it.
    pub fn ordinal(&self) -> Option<i16> {
        self.ordinal
    }

    /// Method to convert from Thrift.
    pub fn try_from_thrift(
        schema_descr: &SchemaDescriptor,
        rg: RowGroup,
    ) -> Result<RowGroupMetaData> {
        if schema_descr.num_columns() != rg.columns.len() {
            return Err(Error::oos(format!(
                "The row group has {} column chunks but the schema has {} columns",
                rg.columns.len(),
                schema_descr.num_columns()
            )));
        }
        let columns = rg
            .columns
            .into_iter()
            .zip(schema_descr.columns())
            .map(|(column_chunk, descriptor)| {
                ColumnChunkMetaData::new(column_chunk, descriptor.clone())
            })
            .collect();
        Ok(RowGroupMetaData {
            columns,
            num_rows: rg.num_rows,
            total_byte_size: rg.total_byte_size,
            sorting_columns: rg.sorting_columns,
            ordinal: rg.ordinal,
        })
    }
}

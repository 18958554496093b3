use crate::error::Result;
use crate::format::{self, ColumnOrder, KeyValue};

use super::{row_metadata::RowGroupMetaData, schema_descriptor::SchemaDescriptor};

/// Metadata for a Parquet file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaData {
    version: i32,
    num_rows: i64,
    created_by: Option<String>,
    row_groups: Vec<RowGroupMetaData>,
    key_value_metadata: Option<Vec<KeyValue>>,
    schema_descr: SchemaDescriptor,
    column_orders: Option<Vec<ColumnOrder>>,
}

impl FileMetaData {
    /// Returns version of this file.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Returns number of rows in the file.
    pub fn num_rows(&self) -> i64 {
        self.num_rows
    }

    /// String message for application that wrote this file.
    ///
    /// This should have the following format:
    /// `<application> version <application version> (build <application build hash>)`.
    ///
    /// ```shell
    /// parquet-mr version 1.8.0 (build 0fda28af84b9746396014ad6a415b90592a98b3b)
    /// ```
    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Returns key_value_metadata of this file.
    pub fn key_value_metadata(&self) -> Option<&[KeyValue]> {
        self.key_value_metadata.as_deref()
    }

    /// Returns a reference to schema descriptor.
    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema_descr
    }

    pub fn row_groups(&self) -> &[RowGroupMetaData] {
        &self.row_groups
    }

    /// Returns the row group at position `i`.
    pub fn row_group(&self, i: usize) -> &RowGroupMetaData {
        &self.row_groups[i]
    }

    /// Column (sort) order used for `min` and `max` values of each column in this file.
    ///
    /// Each column order corresponds to one column, determined by its position in the
    /// list, matching the position of the column in the schema.
    ///
    /// When `None` is returned, there are no column orders available, and each column
    /// should be assumed to have undefined (legacy) column order.
    pub fn column_orders(&self) -> Option<&[ColumnOrder]> {
        self.column_orders.as_deref()
    }

    /// The index of the first leaf column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema_descr
            .columns()
            .iter()
            .position(|column| column.name() == name)
    }

    /// Resolves the thrift [`format::FileMetaData`] against its own schema.
    pub fn try_from_thrift(metadata: format::FileMetaData) -> Result<Self> {
        let schema_descr = SchemaDescriptor::try_new(&metadata.schema)?;

        let row_groups = metadata
            .row_groups
            .into_iter()
            .map(|rg| RowGroupMetaData::try_from_thrift(&schema_descr, rg))
            .collect::<Result<Vec<_>>>()?;

        Ok(FileMetaData {
            version: metadata.version,
            num_rows: metadata.num_rows,
            created_by: metadata.created_by,
            row_groups,
            key_value_metadata: metadata.key_value_metadata,
            schema_descr,
            column_orders: metadata.column_orders,
        })
    }
}

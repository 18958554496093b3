use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::error::{Error, Result};
use crate::metadata::FileMetaData;

use super::column::ColumnReader;
use super::metadata::read_metadata_with_options;
use super::options::ReadOptions;

/// A parquet file whose metadata is read on first use.
///
/// ```no_run
/// use parquet_read::ParquetFile;
///
/// let mut file = ParquetFile::open("data.parquet")?;
/// let num_rows = file.read()?.num_rows();
/// if let Some(column) = file.column_reader("col")? {
///     for value in column {
///         println!("{}", value?);
///     }
/// }
/// # Ok::<(), parquet_read::error::Error>(())
/// ```
pub struct ParquetFile<R: Read + Seek> {
    reader: R,
    options: ReadOptions,
    metadata: Option<FileMetaData>,
}

impl ParquetFile<File> {
    /// Opens the file at `path` with the default [`ReadOptions`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::open(path)?, ReadOptions::default()))
    }
}

impl<R: Read + Seek> ParquetFile<R> {
    pub fn new(reader: R, options: ReadOptions) -> Self {
        Self {
            reader,
            options,
            metadata: None,
        }
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Reads the metadata of the file, or returns it if it was already read.
    pub fn read(&mut self) -> Result<&FileMetaData> {
        if self.metadata.is_none() {
            let metadata = read_metadata_with_options(&mut self.reader, &self.options)?;
            self.metadata = Some(metadata);
        }
        self.metadata
            .as_ref()
            .ok_or_else(|| Error::oos("The metadata of the file could not be read"))
    }

    /// The metadata of the file, if [`ParquetFile::read`] was called.
    pub fn metadata(&self) -> Option<&FileMetaData> {
        self.metadata.as_ref()
    }

    /// Returns a [`ColumnReader`] of the first leaf column named `name`, or `None` when
    /// no leaf has this name.
    pub fn column_reader(&mut self, name: &str) -> Result<Option<ColumnReader<&mut R>>> {
        let index = match self.read()?.column_index(name) {
            Some(index) => index,
            None => return Ok(None),
        };
        self.column_reader_at(index).map(Some)
    }

    /// Returns a [`ColumnReader`] of the leaf column at `index` of the schema.
    pub fn column_reader_at(&mut self, index: usize) -> Result<ColumnReader<&mut R>> {
        let metadata = self.read()?;
        let schema = metadata.schema();
        if index >= schema.num_columns() {
            return Err(Error::InvalidParameter(format!(
                "The column index {} is out of bounds for a schema of {} columns",
                index,
                schema.num_columns()
            )));
        }
        let descriptor = schema.column(index).clone();
        if descriptor.max_rep_level() > 0 {
            return Err(Error::FeatureNotSupported(format!(
                "Reading the repeated column \"{}\"",
                descriptor.path_in_schema().join(".")
            )));
        }
        let chunks = metadata
            .row_groups()
            .iter()
            .map(|row_group| row_group.column(index).clone())
            .collect();

        Ok(ColumnReader::new(
            &mut self.reader,
            chunks,
            descriptor,
            self.options,
        ))
    }

    /// Returns the reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

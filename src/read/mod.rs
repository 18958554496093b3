mod column;
mod compression;
mod file;
pub mod levels;
mod metadata;
mod options;
mod page;

use std::io::{Read, Seek};

pub use column::ColumnReader;
pub use compression::decompress;
pub use file::ParquetFile;
pub use metadata::{
    decode_footer, deserialize_metadata, metadata_range, read_metadata, read_metadata_with_options,
};
pub use options::{InvalidIndexPolicy, MagicPolicy, PageErrorPolicy, ReadOptions};
pub use page::{PageMetaData, PageReader, DEFAULT_MAX_HEADER_SIZE};

use crate::error::Result;
use crate::metadata::FileMetaData;

/// Returns a new [`PageReader`] over the column chunk at `column` of `row_group`.
pub fn get_page_iterator<R: Read + Seek>(
    metadata: &FileMetaData,
    row_group: usize,
    column: usize,
    reader: R,
    max_header_size: usize,
) -> Result<PageReader<R>> {
    let column_chunk = metadata.row_group(row_group).column(column);
    Ok(PageReader::new_with_page_meta(
        reader,
        column_chunk.try_into()?,
        max_header_size,
    ))
}

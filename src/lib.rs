#![forbid(unsafe_code)]
//! A reader of [Apache Parquet](https://parquet.apache.org/) files, from the footer down
//! to the values of each column, with its own decoder of the thrift compact protocol.
pub mod compression;
pub mod deserialize;
pub mod encoding;
pub mod error;
pub mod format;
pub mod metadata;
pub mod page;
mod parquet_bridge;
pub mod read;
pub mod schema;
pub mod thrift;
pub mod types;
mod value;

pub use read::{ColumnReader, ParquetFile, ReadOptions};
pub use value::Value;

const FOOTER_SIZE: u64 = 8;
const PARQUET_MAGIC: [u8; 4] = [b'P', b'A', b'R', b'1'];

/// The number of bytes read at the end of the parquet file on first read
const DEFAULT_FOOTER_READ_SIZE: u64 = 64 * 1024;

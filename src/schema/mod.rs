//! The schema of a parquet file, as seen by the readers of its leaf columns.
pub mod types;

pub use crate::parquet_bridge::Repetition;

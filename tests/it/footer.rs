use std::io::Cursor;

use parquet_read::error::{Error, Result};
use parquet_read::read::{metadata_range, read_metadata, read_metadata_with_options, MagicPolicy};
use parquet_read::schema::types::{PhysicalType, Repetition, Type};
use parquet_read::{ParquetFile, ReadOptions};

use super::writer::*;

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("id", Type::Int64, Repetition::Required),
        ColumnSpec::new("name", Type::ByteArray, Repetition::Optional),
    ]
}

fn file() -> Vec<u8> {
    let chunks = vec![ChunkSpec::new(vec![]), ChunkSpec::new(vec![])];
    write_file(&columns(), &[chunks.clone(), chunks])
}

#[test]
fn footer_range() -> Result<()> {
    let data = file();
    let size = data.len() as u64;
    let length = u32::from_le_bytes([
        data[data.len() - 8],
        data[data.len() - 7],
        data[data.len() - 6],
        data[data.len() - 5],
    ]) as u64;
    assert_eq!(metadata_range(size, length)?, size - 8 - length..size - 8);
    Ok(())
}

#[test]
fn reads_metadata() -> Result<()> {
    let metadata = read_metadata(&mut Cursor::new(file()))?;

    assert_eq!(metadata.version(), 1);
    assert_eq!(metadata.created_by(), Some("parquet-read tests"));
    assert_eq!(metadata.row_groups().len(), 2);

    let schema = metadata.schema();
    assert_eq!(schema.name(), "schema");
    assert_eq!(schema.num_columns(), 2);
    assert_eq!(schema.column(0).physical_type(), &PhysicalType::Int64);
    assert_eq!(schema.column(0).max_def_level(), 0);
    assert_eq!(schema.column(1).physical_type(), &PhysicalType::ByteArray);
    assert_eq!(schema.column(1).max_def_level(), 1);

    assert_eq!(metadata.column_index("name"), Some(1));
    assert_eq!(metadata.column_index("unknown"), None);
    Ok(())
}

#[test]
fn metadata_larger_than_first_read() -> Result<()> {
    // enough columns for the metadata to exceed the bytes read on the first attempt
    let columns = (0..4000)
        .map(|i| ColumnSpec::new(&format!("column_{}", i), Type::Int32, Repetition::Required))
        .collect::<Vec<_>>();
    let chunks = columns.iter().map(|_| ChunkSpec::new(vec![])).collect();
    let data = write_file(&columns, &[chunks]);
    assert!(data.len() > 64 * 1024);

    let metadata = read_metadata(&mut Cursor::new(data))?;
    assert_eq!(metadata.schema().num_columns(), 4000);
    assert_eq!(metadata.column_index("column_3999"), Some(3999));
    Ok(())
}

#[test]
fn bad_magic() -> Result<()> {
    let mut data = file();
    let len = data.len();
    data[len - 1] = b'2';

    assert_eq!(
        read_metadata(&mut Cursor::new(data.clone())),
        Err(Error::InvalidMagic {
            found: *b"PAR2"
        })
    );

    let options = ReadOptions::default().with_magic(MagicPolicy::Lenient);
    let metadata = read_metadata_with_options(&mut Cursor::new(data), &options)?;
    assert_eq!(metadata.row_groups().len(), 2);
    Ok(())
}

#[test]
fn too_small() {
    assert_eq!(
        read_metadata(&mut Cursor::new(b"PAR1PAR1".to_vec())),
        Err(Error::FileTooSmall { size: 8 })
    );
}

#[test]
fn metadata_longer_than_file() {
    let mut data = b"PAR1".to_vec();
    data.extend_from_slice(&100i32.to_le_bytes());
    data.extend_from_slice(b"PAR1");
    assert!(matches!(
        read_metadata(&mut Cursor::new(data)),
        Err(Error::OutOfSpec(_))
    ));
}

#[test]
fn corrupt_metadata() {
    let mut data = b"PAR1".to_vec();
    data.extend_from_slice(&[0x1f, 0xff, 0xff]);
    data.extend_from_slice(&3i32.to_le_bytes());
    data.extend_from_slice(b"PAR1");
    assert!(read_metadata(&mut Cursor::new(data)).is_err());
}

#[test]
fn lazy_metadata() -> Result<()> {
    let mut file = ParquetFile::new(Cursor::new(file()), ReadOptions::default());
    assert!(file.metadata().is_none());
    assert_eq!(file.read()?.num_rows(), 0);
    assert!(file.metadata().is_some());
    assert!(file.column_reader("unknown")?.is_none());
    assert!(matches!(
        file.column_reader_at(2),
        Err(Error::InvalidParameter(_))
    ));
    Ok(())
}

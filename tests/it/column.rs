use std::io::Cursor;

use parquet_read::encoding::Encoding;
use parquet_read::error::{Error, Result};
use parquet_read::read::{read_metadata, InvalidIndexPolicy, PageErrorPolicy};
use parquet_read::schema::types::{Repetition, Type};
use parquet_read::{ColumnReader, ParquetFile, ReadOptions, Value};

use super::writer::*;

fn utf8(values: &[&str]) -> Vec<Value> {
    values.iter().map(|x| Value::Utf8(x.to_string())).collect()
}

fn open(data: Vec<u8>, options: ReadOptions) -> ParquetFile<Cursor<Vec<u8>>> {
    ParquetFile::new(Cursor::new(data), options)
}

fn read_column(file: &mut ParquetFile<Cursor<Vec<u8>>>, name: &str) -> Result<Vec<Value>> {
    file.column_reader(name)?
        .expect("the column exists")
        .collect()
}

/// One row group, one string column: a dictionary of 3 values and one page of 5 indices.
fn dictionary_file(indices: Vec<u8>, num_values: i32) -> Vec<u8> {
    let columns = [ColumnSpec::new("col", Type::ByteArray, Repetition::Required)];
    let chunk = ChunkSpec::new(vec![
        PageSpec::dictionary(3, plain_byte_arrays(&["a", "b", "c"])),
        PageSpec::v1(num_values, Encoding::RleDictionary, indices),
    ]);
    write_file(&columns, &[vec![chunk]])
}

#[test]
fn dictionary_end_to_end() -> Result<()> {
    // bit width 2, one bit-packed group: 2, 0, 1, 1, 2 (and 3 padding values)
    let data = dictionary_file(vec![2, 0b00000011, 0b01010010, 0b00000010], 5);
    let mut file = open(data, ReadOptions::default());
    assert_eq!(file.read()?.row_groups().len(), 1);

    let mut column = file.column_reader("col")?.expect("the column exists");
    let mut values = vec![];
    for _ in 0..5 {
        values.push(column.next_value()?.expect("a value"));
    }
    assert_eq!(values, utf8(&["c", "a", "b", "b", "c"]));

    // end of stream is idempotent
    assert_eq!(column.next_value()?, None);
    assert_eq!(column.next_value()?, None);
    assert!(column.next().is_none());
    Ok(())
}

#[test]
fn rle_run() -> Result<()> {
    // bit width 2, an RLE run of a single index 1
    let data = dictionary_file(vec![2, 0b00000010, 0x01], 1);
    let mut file = open(data, ReadOptions::default());
    assert_eq!(read_column(&mut file, "col")?, utf8(&["b"]));
    Ok(())
}

#[test]
fn truncated_bitpacked_run() -> Result<()> {
    // a bit-packed header (`0b11`) whose group is truncated to a single byte
    let data = dictionary_file(vec![2, 0b00000011, 0x01], 1);
    let mut file = open(data, ReadOptions::default());
    assert_eq!(read_column(&mut file, "col")?, utf8(&["b"]));
    Ok(())
}

#[test]
fn invalid_index() -> Result<()> {
    // bit width 2, one group of 8: 0, 1, 2, 1, 0, 3, 1, 2
    let indices = vec![2, 0b00000011, 0x64, 0x9C];
    let mut expected = utf8(&["a", "b", "c", "b", "a"]);
    expected.push(Value::InvalidIndex(3));
    expected.extend(utf8(&["b", "c"]));

    let mut file = open(dictionary_file(indices.clone(), 8), ReadOptions::default());
    assert_eq!(read_column(&mut file, "col")?, expected);

    let options = ReadOptions::default().with_invalid_index(InvalidIndexPolicy::Fail);
    let mut file = open(dictionary_file(indices, 8), options);
    assert_eq!(
        read_column(&mut file, "col"),
        Err(Error::InvalidIndex {
            index: 3,
            dictionary_len: 3
        })
    );
    Ok(())
}

#[test]
fn stops_at_end_of_buffer() -> Result<()> {
    // the page declares 5 values but holds 2
    let columns = [ColumnSpec::new("col", Type::ByteArray, Repetition::Required)];
    let chunk = ChunkSpec::new(vec![PageSpec::v1(
        5,
        Encoding::Plain,
        plain_byte_arrays(&["x", "y"]),
    )]);
    let mut file = open(write_file(&columns, &[vec![chunk]]), ReadOptions::default());
    assert_eq!(read_column(&mut file, "col")?, utf8(&["x", "y"]));
    Ok(())
}

fn int64_page(values: &[i64]) -> PageSpec {
    let payload = values.iter().flat_map(|x| x.to_le_bytes()).collect();
    PageSpec::v1(values.len() as i32, Encoding::Plain, payload)
}

#[test]
fn row_groups() -> Result<()> {
    let columns = [
        ColumnSpec::new("id", Type::Int64, Repetition::Required),
        ColumnSpec::new("name", Type::ByteArray, Repetition::Required),
    ];
    fn row_group(ids: &[i64], names: &[&str]) -> Vec<ChunkSpec> {
        vec![
            ChunkSpec::new(vec![int64_page(ids)]),
            ChunkSpec::new(vec![
                PageSpec::dictionary(names.len() as i32, plain_byte_arrays(names)),
                // bit width 1, an RLE run of 2 times the index 1
                PageSpec::v1(2, Encoding::RleDictionary, vec![1, 0b00000100, 0x01]),
            ]),
        ]
    }
    let data = write_file(
        &columns,
        &[
            row_group(&[1, 2], &["a", "b"]),
            row_group(&[], &["c", "d"]),
            row_group(&[3], &["e", "f"]),
        ],
    );
    let mut file = open(data, ReadOptions::default());

    let ids = read_column(&mut file, "id")?;
    assert_eq!(ids, vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]);

    // each row group has its own dictionary
    let names = file.column_reader_at(1)?.collect::<Result<Vec<_>>>()?;
    assert_eq!(names, utf8(&["b", "b", "d", "d", "f", "f"]));
    Ok(())
}

#[test]
fn optional_columns() -> Result<()> {
    let columns = [
        ColumnSpec::new("a", Type::Int32, Repetition::Optional),
        ColumnSpec::new("b", Type::ByteArray, Repetition::Optional),
    ];
    // v1: levels 1, 0, 1, 0 behind a 4-byte length
    let mut payload = vec![2, 0, 0, 0, 0b00000011, 0b00000101];
    payload.extend_from_slice(&10i32.to_le_bytes());
    payload.extend_from_slice(&30i32.to_le_bytes());
    let a = ChunkSpec::new(vec![PageSpec::v1(4, Encoding::Plain, payload)]);

    // v2: levels 0, 1, 1 without length, then dictionary indices
    let b = ChunkSpec::new(vec![
        PageSpec::dictionary(2, plain_byte_arrays(&["x", "y"])),
        PageSpec::V2 {
            num_values: 3,
            num_nulls: 1,
            encoding: Encoding::RleDictionary,
            def_levels: vec![0b00000011, 0b00000110],
            values: vec![1, 0b00000011, 0b00000001],
            is_compressed: Some(false),
        },
    ]);
    let mut file = open(write_file(&columns, &[vec![a, b]]), ReadOptions::default());

    assert_eq!(
        read_column(&mut file, "a")?,
        vec![Value::Int32(10), Value::Null, Value::Int32(30), Value::Null]
    );
    assert_eq!(
        read_column(&mut file, "b")?,
        vec![
            Value::Null,
            Value::Utf8("y".to_string()),
            Value::Utf8("x".to_string())
        ]
    );
    Ok(())
}

#[test]
fn physical_types() -> Result<()> {
    let mut flba = ColumnSpec::new("flba", Type::FixedLenByteArray, Repetition::Required);
    flba.type_length = Some(2);
    let columns = [
        ColumnSpec::new("bool", Type::Boolean, Repetition::Required),
        ColumnSpec::new("double", Type::Double, Repetition::Required),
        ColumnSpec::new("int96", Type::Int96, Repetition::Required),
        flba,
    ];

    let mut int96 = vec![];
    for value in [0u32, 0, 2454892] {
        int96.extend_from_slice(&value.to_le_bytes());
    }
    let chunks = vec![
        ChunkSpec::new(vec![PageSpec::v1(3, Encoding::Plain, vec![0b00000110])]),
        ChunkSpec::new(vec![PageSpec::v1(
            1,
            Encoding::Plain,
            0.5f64.to_le_bytes().to_vec(),
        )]),
        ChunkSpec::new(vec![PageSpec::v1(1, Encoding::Plain, int96)]),
        ChunkSpec::new(vec![PageSpec::v1(2, Encoding::Plain, vec![1, 2, 3, 4])]),
    ];
    let mut file = open(write_file(&columns, &[chunks]), ReadOptions::default());

    assert_eq!(
        read_column(&mut file, "bool")?,
        vec![Value::Boolean(false), Value::Boolean(true), Value::Boolean(true)]
    );
    assert_eq!(read_column(&mut file, "double")?, vec![Value::Double(0.5)]);
    let int96 = read_column(&mut file, "int96")?;
    assert_eq!(int96, vec![Value::Int96([0, 0, 2454892])]);
    if let Value::Int96(value) = int96[0] {
        assert_eq!(
            parquet_read::types::int96_to_i64_ns(value),
            1235865600000 * 1_000_000
        );
    }
    assert_eq!(
        read_column(&mut file, "flba")?,
        vec![
            Value::FixedLenByteArray(vec![1, 2]),
            Value::FixedLenByteArray(vec![3, 4])
        ]
    );
    Ok(())
}

#[test]
fn skipped_pages() -> Result<()> {
    let columns = [ColumnSpec::new("id", Type::Int64, Repetition::Required)];
    let chunk = ChunkSpec::new(vec![
        int64_page(&[1]),
        PageSpec::Index { payload: vec![0; 4] },
        // not supported
        PageSpec::v1(1, Encoding::DeltaBinaryPacked, vec![0; 8]),
        // corrupt: a dictionary-encoded page without dictionary
        PageSpec::v1(1, Encoding::RleDictionary, vec![1, 0b00000010, 0x00]),
        int64_page(&[2]),
    ]);
    let data = write_file(&columns, &[vec![chunk]]);

    let mut file = open(data.clone(), ReadOptions::default());
    assert_eq!(
        read_column(&mut file, "id")?,
        vec![Value::Int64(1), Value::Int64(2)]
    );

    let options = ReadOptions::default().with_page_errors(PageErrorPolicy::Fail);
    let mut file = open(data, options);
    let mut column = file.column_reader("id")?.expect("the column exists");
    assert_eq!(column.next_value()?, Some(Value::Int64(1)));
    assert!(matches!(column.next_value(), Err(Error::OutOfSpec(_))));
    // the failing page was consumed
    assert_eq!(column.next_value()?, Some(Value::Int64(2)));
    assert_eq!(column.next_value()?, None);
    Ok(())
}

#[test]
fn short_page() -> Result<()> {
    let columns = [ColumnSpec::new("id", Type::Int64, Repetition::Required)];
    let chunk = ChunkSpec::new(vec![int64_page(&[1, 2, 3])]);
    let mut data = write_file(&columns, &[vec![chunk]]);
    let metadata = read_metadata(&mut Cursor::new(&data))?;

    // the file ends 10 bytes before the end of the page
    let (start, length) = metadata.row_group(0).column(0).byte_range()?;
    data.truncate((start + length) as usize - 10);

    let chunks = vec![metadata.row_group(0).column(0).clone()];
    let descriptor = metadata.schema().column(0).clone();
    let mut column =
        ColumnReader::new(Cursor::new(data), chunks, descriptor, ReadOptions::default());
    assert!(matches!(
        column.next_value(),
        Err(Error::ShortRead {
            expected: 24,
            actual: 14,
            ..
        })
    ));
    // structural errors end the column
    assert_eq!(column.next_value()?, None);
    Ok(())
}

#[test]
fn repeated_columns_are_rejected() -> Result<()> {
    let columns = [ColumnSpec::new("id", Type::Int64, Repetition::Repeated)];
    let chunk = ChunkSpec::new(vec![int64_page(&[1])]);
    let mut file = open(write_file(&columns, &[vec![chunk]]), ReadOptions::default());
    assert!(matches!(
        file.column_reader("id"),
        Err(Error::FeatureNotSupported(_))
    ));
    Ok(())
}

#[test]
fn open_path() -> Result<()> {
    let columns = [ColumnSpec::new("id", Type::Int64, Repetition::Required)];
    let chunk = ChunkSpec::new(vec![int64_page(&[4, 5])]);
    let path = std::env::temp_dir().join(format!("parquet-read-{}.parquet", std::process::id()));
    std::fs::write(&path, write_file(&columns, &[vec![chunk]]))?;

    let mut file = ParquetFile::open(&path)?;
    let values = file
        .column_reader("id")?
        .expect("the column exists")
        .collect::<Result<Vec<_>>>();
    std::fs::remove_file(&path)?;
    assert_eq!(values?, vec![Value::Int64(4), Value::Int64(5)]);
    Ok(())
}

use rand::{rngs::StdRng, Rng, SeedableRng};

use parquet_read::error::{Error, Result};
use parquet_read::format::{FileMetaData, KeyValue, PageHeader};
use parquet_read::thrift::{deserialize, CompactReader, FieldType};

use parquet_format_safe::thrift::protocol::{
    TCompactOutputProtocol, TFieldIdentifier, TOutputProtocol, TStructIdentifier, TType,
};

use super::writer::*;

#[test]
fn varint_zigzag_roundtrip() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut values = vec![0, 1, -1, i64::MIN, i64::MAX, i32::MIN as i64, i32::MAX as i64];
    values.extend((0..1000).map(|_| rng.gen::<i64>()));
    values.extend((0..1000).map(|_| rng.gen_range(-1000i64..1000)));

    for value in values {
        let data = to_thrift(|protocol| protocol.write_i64(value).map(|_| 0));
        let mut reader = CompactReader::new(&data);
        assert_eq!(reader.read_i64()?, value);
        assert_eq!(reader.remaining(), 0);

        // the test writer agrees with the reference encoder
        let mut writer = CompactWriter::new();
        writer.write_i64(value);
        assert_eq!(writer.into_inner(), data);
    }

    for _ in 0..1000 {
        let value = rng.gen::<i32>();
        let data = to_thrift(|protocol| protocol.write_i32(value).map(|_| 0));
        assert_eq!(CompactReader::new(&data).read_i32()?, value);
    }
    Ok(())
}

#[test]
fn overlong_varint() {
    let data = [0xff; 11];
    assert!(matches!(
        CompactReader::new(&data).read_i64(),
        Err(Error::ProtocolViolation(_))
    ));
}

#[test]
fn truncated_varint() {
    let data = [0x80, 0x80];
    assert!(matches!(
        CompactReader::new(&data).read_i32(),
        Err(Error::EndOfInput { .. })
    ));
}

/// Reads every field of a struct, recursing into nested structs, returning the ids
/// seen in order.
fn read_ids(reader: &mut CompactReader, ids: &mut Vec<i16>) -> Result<()> {
    reader.read_struct(|reader, field| {
        ids.push(field.id);
        match field.field_type {
            FieldType::Struct => read_ids(reader, ids),
            other => reader.skip(other),
        }
    })
}

#[test]
fn field_id_deltas_across_nesting() -> Result<()> {
    let mut writer = CompactWriter::new();
    writer.struct_begin();
    writer.i32_field(1, 10);
    writer.i32_field(2, 20);
    writer.i32_field(3, 30);
    writer.struct_field_begin(5);
    writer.i32_field(1, 1);
    writer.struct_field_begin(30);
    writer.i64_field(2, 2);
    writer.struct_end();
    writer.struct_end();
    writer.i32_field(9, 90);
    writer.struct_end();
    let data = writer.into_inner();

    let mut ids = vec![];
    read_ids(&mut CompactReader::new(&data), &mut ids)?;
    assert_eq!(ids, vec![1, 2, 3, 5, 1, 30, 2, 9]);
    Ok(())
}

#[test]
fn field_ids_of_reference_encoder() -> Result<()> {
    fn field(
        protocol: &mut TCompactOutputProtocol<&mut Vec<u8>>,
        type_: TType,
        id: i16,
    ) -> parquet_format_safe::thrift::Result<usize> {
        protocol.write_field_begin(&TFieldIdentifier::new("field", type_, id))
    }

    let data = to_thrift(|protocol| {
        protocol.write_struct_begin(&TStructIdentifier::new("outer"))?;
        for id in [1, 2, 3] {
            field(protocol, TType::I32, id)?;
            protocol.write_i32(i32::from(id) * 10)?;
            protocol.write_field_end()?;
        }
        field(protocol, TType::Struct, 5)?;
        protocol.write_struct_begin(&TStructIdentifier::new("inner"))?;
        field(protocol, TType::I64, 40)?;
        protocol.write_i64(-1)?;
        protocol.write_field_end()?;
        protocol.write_field_stop()?;
        protocol.write_struct_end()?;
        protocol.write_field_end()?;
        field(protocol, TType::String, 9)?;
        protocol.write_string("nine")?;
        protocol.write_field_end()?;
        // a negative delta takes the long form
        field(protocol, TType::Bool, 4)?;
        protocol.write_bool(true)?;
        protocol.write_field_end()?;
        protocol.write_field_stop()?;
        protocol.write_struct_end()?;
        Ok(0)
    });

    let mut ids = vec![];
    read_ids(&mut CompactReader::new(&data), &mut ids)?;
    assert_eq!(ids, vec![1, 2, 3, 5, 40, 9, 4]);
    Ok(())
}

/// Writes an unknown field of each wire type at ids 20..
fn write_unknown_fields(writer: &mut CompactWriter) {
    writer.bool_field(20, true);
    writer.bool_field(21, false);
    writer.field_begin(BYTE, 22);
    writer.write_byte(7);
    writer.field_begin(I16, 23);
    writer.write_i32(-300);
    writer.i32_field(24, 1 << 20);
    writer.i64_field(25, -(1 << 40));
    writer.field_begin(DOUBLE, 26);
    writer.write_double(1.5);
    writer.binary_field(27, b"unknown");

    writer.list_field_begin(28, BOOL_TRUE, 3);
    writer.write_byte(1);
    writer.write_byte(0);
    writer.write_byte(1);

    writer.field_begin(SET, 29);
    writer.list_begin(BINARY, 20);
    for _ in 0..20 {
        writer.write_binary(b"x");
    }

    writer.field_begin(MAP, 30);
    writer.map_begin(I32, STRUCT, 2);
    for i in 0..2 {
        writer.write_i32(i);
        writer.struct_begin();
        writer.list_field_begin(1, STRUCT, 1);
        writer.struct_begin();
        writer.i64_field(1, 1);
        writer.struct_end();
        writer.struct_end();
    }

    writer.field_begin(MAP, 31);
    writer.map_begin(I32, I32, 0);

    writer.struct_field_begin(32);
    writer.binary_field(1, b"nested");
    writer.struct_end();
}

#[test]
fn skips_unknown_fields() -> Result<()> {
    let mut writer = CompactWriter::new();
    writer.struct_begin();
    write_unknown_fields(&mut writer);
    // known fields after the unknown ones
    writer.binary_field(1, b"key");
    writer.binary_field(2, b"value");
    writer.struct_end();
    let data = writer.into_inner();

    let (key_value, consumed) = deserialize::<KeyValue>(&data)?;
    assert_eq!(consumed, data.len());
    assert_eq!(
        key_value,
        KeyValue {
            key: "key".to_string(),
            value: Some("value".to_string())
        }
    );
    Ok(())
}

#[test]
fn wrong_wire_type() {
    let mut writer = CompactWriter::new();
    writer.struct_begin();
    writer.i32_field(1, 3);
    writer.struct_end();
    let data = writer.into_inner();

    assert!(matches!(
        deserialize::<KeyValue>(&data),
        Err(Error::ProtocolViolation(_))
    ));
}

#[test]
fn invalid_utf8() {
    let mut writer = CompactWriter::new();
    writer.struct_begin();
    writer.binary_field(1, &[0xff, 0xfe]);
    writer.struct_end();
    let data = writer.into_inner();

    assert_eq!(
        deserialize::<KeyValue>(&data),
        Err(Error::InvalidUtf8 { position: 1 })
    );
}

#[test]
fn too_deep() {
    let mut writer = CompactWriter::new();
    writer.struct_begin();
    for _ in 0..100 {
        writer.struct_field_begin(20);
    }
    for _ in 0..100 {
        writer.struct_end();
    }
    writer.struct_end();
    let data = writer.into_inner();

    assert!(matches!(
        deserialize::<KeyValue>(&data),
        Err(Error::ProtocolViolation(_))
    ));
}

#[test]
fn collections_without_element_type() {
    // a list of u32::MAX elements of the stop type
    let list = [0xf0, 0xff, 0xff, 0xff, 0xff, 0x0f];
    let mut reader = CompactReader::new(&list);
    assert!(matches!(
        reader.skip(FieldType::List),
        Err(Error::ProtocolViolation(_))
    ));
    assert!(matches!(
        CompactReader::new(&list).skip(FieldType::Set),
        Err(Error::ProtocolViolation(_))
    ));
    assert!(matches!(
        CompactReader::new(&list).read_list::<i32>(),
        Err(Error::ProtocolViolation(_))
    ));

    // a map of u32::MAX entries with a stop key and an i32 value
    let map = [0xff, 0xff, 0xff, 0xff, 0x0f, 0x05];
    assert!(matches!(
        CompactReader::new(&map).skip(FieldType::Map),
        Err(Error::ProtocolViolation(_))
    ));
    let map = [0xff, 0xff, 0xff, 0xff, 0x0f, 0x50];
    assert!(matches!(
        CompactReader::new(&map).skip(FieldType::Map),
        Err(Error::ProtocolViolation(_))
    ));

    // empty collections do not need an element type
    let mut reader = CompactReader::new(&[0x00, 0x00]);
    reader.skip(FieldType::List).unwrap();
    reader.skip(FieldType::Map).unwrap();
    assert_eq!(reader.position(), 2);
}

#[test]
fn truncated_header() {
    let page = write_page(&PageSpec::dictionary(1, plain_byte_arrays(&["a"])), Default::default());
    for end in 0..page.len() - 5 {
        assert!(deserialize::<PageHeader>(&page[..end]).is_err());
    }
}

#[test]
fn random_metadata_roundtrip() -> Result<()> {
    use parquet_read::schema::types::{Repetition, Type};

    let mut rng = StdRng::seed_from_u64(7);
    let types = [Type::Boolean, Type::Int32, Type::Int64, Type::Double, Type::ByteArray];
    let names = ["a", "b", "c", "d", "e", "f", "g", "h"];

    for _ in 0..50 {
        let num_columns = rng.gen_range(1..names.len());
        let columns = names[..num_columns]
            .iter()
            .map(|name| {
                let type_ = types[rng.gen_range(0..types.len())];
                let repetition = if rng.gen::<bool>() {
                    Repetition::Optional
                } else {
                    Repetition::Required
                };
                ColumnSpec::new(*name, type_, repetition)
            })
            .collect::<Vec<_>>();

        let num_row_groups = rng.gen_range(0..4);
        let chunks = (0..num_row_groups)
            .map(|_| columns.iter().map(|_| ChunkSpec::new(vec![])).collect())
            .collect::<Vec<Vec<_>>>();
        let locations = (0..num_row_groups)
            .map(|_| {
                columns
                    .iter()
                    .map(|_| ChunkLocation {
                        dictionary_page_offset: rng.gen::<bool>().then(|| rng.gen_range(4..1000)),
                        data_page_offset: rng.gen_range(4..i64::MAX / 2),
                        total_compressed_size: rng.gen_range(0..i32::MAX as i64),
                        num_values: rng.gen_range(0..1_000_000),
                    })
                    .collect()
            })
            .collect::<Vec<Vec<_>>>();
        let num_rows = rng.gen_range(0..i64::MAX);

        let data = write_metadata(&columns, &chunks, &locations, num_rows);
        let (metadata, consumed) = deserialize::<FileMetaData>(&data)?;
        assert_eq!(consumed, data.len());

        assert_eq!(metadata.num_rows, num_rows);
        assert_eq!(metadata.schema.len(), num_columns + 1);
        for (element, column) in metadata.schema[1..].iter().zip(&columns) {
            assert_eq!(element.name, column.name);
            assert_eq!(element.type_, Some(column.type_));
            assert_eq!(element.repetition_type, Some(column.repetition));
        }
        assert_eq!(metadata.row_groups.len(), num_row_groups);
        for (row_group, locations) in metadata.row_groups.iter().zip(&locations) {
            for (chunk, location) in row_group.columns.iter().zip(locations) {
                let meta = chunk.meta_data.as_ref().expect("column metadata");
                assert_eq!(meta.data_page_offset, location.data_page_offset);
                assert_eq!(meta.dictionary_page_offset, location.dictionary_page_offset);
                assert_eq!(meta.total_compressed_size, location.total_compressed_size);
                assert_eq!(meta.num_values, location.num_values);
            }
        }
        assert_eq!(metadata.created_by.as_deref(), Some("parquet-read tests"));
    }
    Ok(())
}

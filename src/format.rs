//! The structs of parquet's thrift definition (`parquet.thrift`), as they are on the wire.
//!
//! Each struct is declared by its field table: `field id => name: type`. Optional fields
//! of the definition are `Option`s; required fields missing from the wire are left at
//! their default.
#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parquet_bridge::{Compression, ConvertedType, Encoding, PageType, Repetition, Type};
use crate::thrift::{
    thrift_list, thrift_struct, CompactReader, FieldHeader, FieldType, ReadThrift,
};

thrift_struct!(
    /// A struct without fields, used by the members of unions that carry no data.
    pub struct Empty {}
);

thrift_struct!(
    /// Statistics of a page or column chunk. All values are advisory.
    pub struct Statistics {
        /// Deprecated, sort order of the writer is undefined
        1 => max: Option<Vec<u8>>,
        /// Deprecated, sort order of the writer is undefined
        2 => min: Option<Vec<u8>>,
        3 => null_count: Option<i64>,
        4 => distinct_count: Option<i64>,
        5 => max_value: Option<Vec<u8>>,
        6 => min_value: Option<Vec<u8>>,
    }
);

thrift_struct!(
    pub struct DecimalType {
        1 => scale: i32,
        2 => precision: i32,
    }
);

thrift_struct!(
    pub struct TimeType {
        1 => is_adjusted_to_utc: bool,
        2 => unit: TimeUnit,
    }
);

thrift_struct!(
    pub struct TimestampType {
        1 => is_adjusted_to_utc: bool,
        2 => unit: TimeUnit,
    }
);

thrift_struct!(
    pub struct IntType {
        1 => bit_width: i8,
        2 => is_signed: bool,
    }
);

/// The unit of [`TimeType`] and [`TimestampType`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Deserialize, Serialize))]
pub enum TimeUnit {
    #[default]
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl ReadThrift for TimeUnit {
    const WIRE_TYPE: FieldType = FieldType::Struct;

    fn read_from(prot: &mut CompactReader<'_>) -> Result<Self> {
        read_union(prot, "TimeUnit", |prot, field| {
            Ok(match field.id {
                1 => Some(read_empty(prot, field, TimeUnit::Milliseconds)?),
                2 => Some(read_empty(prot, field, TimeUnit::Microseconds)?),
                3 => Some(read_empty(prot, field, TimeUnit::Nanoseconds)?),
                _ => None,
            })
        })
    }
}

/// The logical type of a schema element, superseding [`ConvertedType`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_types", derive(Deserialize, Serialize))]
pub enum LogicalType {
    String,
    Map,
    List,
    Enum,
    Decimal(DecimalType),
    Date,
    Time(TimeType),
    Timestamp(TimestampType),
    Integer(IntType),
    /// All values are null
    Unknown,
    Json,
    Bson,
    Uuid,
    Float16,
    /// A member this crate does not know, identified by its field id
    Unrecognized(i16),
}

impl ReadThrift for LogicalType {
    const WIRE_TYPE: FieldType = FieldType::Struct;

    fn read_from(prot: &mut CompactReader<'_>) -> Result<Self> {
        read_union(prot, "LogicalType", |prot, field| {
            Ok(Some(match field.id {
                1 => read_empty(prot, field, LogicalType::String)?,
                2 => read_empty(prot, field, LogicalType::Map)?,
                3 => read_empty(prot, field, LogicalType::List)?,
                4 => read_empty(prot, field, LogicalType::Enum)?,
                5 => LogicalType::Decimal(prot.read_field(&field)?),
                6 => read_empty(prot, field, LogicalType::Date)?,
                7 => LogicalType::Time(prot.read_field(&field)?),
                8 => LogicalType::Timestamp(prot.read_field(&field)?),
                10 => LogicalType::Integer(prot.read_field(&field)?),
                11 => read_empty(prot, field, LogicalType::Unknown)?,
                12 => read_empty(prot, field, LogicalType::Json)?,
                13 => read_empty(prot, field, LogicalType::Bson)?,
                14 => read_empty(prot, field, LogicalType::Uuid)?,
                15 => read_empty(prot, field, LogicalType::Float16)?,
                id => {
                    prot.skip(field.field_type)?;
                    LogicalType::Unrecognized(id)
                }
            }))
        })
    }
}

/// The sort order used by the statistics of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_types", derive(Deserialize, Serialize))]
pub enum ColumnOrder {
    TypeDefinedOrder,
    Unrecognized(i16),
}

impl ReadThrift for ColumnOrder {
    const WIRE_TYPE: FieldType = FieldType::Struct;

    fn read_from(prot: &mut CompactReader<'_>) -> Result<Self> {
        read_union(prot, "ColumnOrder", |prot, field| {
            Ok(Some(match field.id {
                1 => read_empty(prot, field, ColumnOrder::TypeDefinedOrder)?,
                id => {
                    prot.skip(field.field_type)?;
                    ColumnOrder::Unrecognized(id)
                }
            }))
        })
    }
}

thrift_list!(ColumnOrder);

/// Reads a union: a struct of which one field is set. `member` returns `None` for
/// fields it does not consume, which are then skipped.
fn read_union<T, F>(prot: &mut CompactReader<'_>, name: &str, mut member: F) -> Result<T>
where
    F: FnMut(&mut CompactReader<'_>, FieldHeader) -> Result<Option<T>>,
{
    let mut value = None;
    prot.read_struct(|prot, field| {
        match member(prot, field)? {
            Some(v) => value = Some(v),
            None => prot.skip(field.field_type)?,
        }
        Ok(())
    })?;
    value.ok_or_else(|| Error::oos(format!("The union {} has no member set", name)))
}

fn read_empty<T>(
    prot: &mut CompactReader<'_>,
    field: FieldHeader,
    value: T,
) -> Result<T> {
    prot.read_field::<Empty>(&field)?;
    Ok(value)
}

thrift_struct!(
    /// An element of the schema, flattened in depth-first order.
    pub struct SchemaElement {
        /// The physical type. Only set on leaves.
        1 => type_: Option<Type>,
        /// The length of `FIXED_LEN_BYTE_ARRAY` values
        2 => type_length: Option<i32>,
        /// Not set on the root
        3 => repetition_type: Option<Repetition>,
        4 => name: String,
        /// The number of children. Not set (or zero) on leaves.
        5 => num_children: Option<i32>,
        6 => converted_type: Option<ConvertedType>,
        7 => scale: Option<i32>,
        8 => precision: Option<i32>,
        9 => field_id: Option<i32>,
        10 => logical_type: Option<LogicalType>,
    }
);

thrift_struct!(
    pub struct KeyValue {
        1 => key: String,
        2 => value: Option<String>,
    }
);

thrift_struct!(
    /// Sort order of a column within a row group.
    pub struct SortingColumn {
        /// The leaf index of the column
        1 => column_idx: i32,
        2 => descending: bool,
        3 => nulls_first: bool,
    }
);

thrift_struct!(
    /// The number of pages of a given type and encoding in a column chunk.
    pub struct PageEncodingStats {
        1 => page_type: PageType,
        2 => encoding: Encoding,
        3 => count: i32,
    }
);

thrift_struct!(
    pub struct ColumnMetaData {
        1 => type_: Type,
        /// Every encoding used in the chunk, including the encodings of levels
        2 => encodings: Vec<Encoding>,
        3 => path_in_schema: Vec<String>,
        4 => codec: Compression,
        5 => num_values: i64,
        6 => total_uncompressed_size: i64,
        /// The size of all pages, headers included
        7 => total_compressed_size: i64,
        8 => key_value_metadata: Option<Vec<KeyValue>>,
        /// The offset of the first data page
        9 => data_page_offset: i64,
        10 => index_page_offset: Option<i64>,
        /// The offset of the dictionary page, which precedes the data pages
        11 => dictionary_page_offset: Option<i64>,
        12 => statistics: Option<Statistics>,
        13 => encoding_stats: Option<Vec<PageEncodingStats>>,
    }
);

thrift_struct!(
    pub struct ColumnChunk {
        /// The file containing the chunk, when it is not this file
        1 => file_path: Option<String>,
        2 => file_offset: i64,
        3 => meta_data: Option<ColumnMetaData>,
        4 => offset_index_offset: Option<i64>,
        5 => offset_index_length: Option<i32>,
        6 => column_index_offset: Option<i64>,
        7 => column_index_length: Option<i32>,
    }
);

thrift_struct!(
    pub struct RowGroup {
        /// One chunk per leaf column, in the order of the leaves
        1 => columns: Vec<ColumnChunk>,
        2 => total_byte_size: i64,
        3 => num_rows: i64,
        4 => sorting_columns: Option<Vec<SortingColumn>>,
        5 => file_offset: Option<i64>,
        6 => total_compressed_size: Option<i64>,
        7 => ordinal: Option<i16>,
    }
);

thrift_struct!(
    /// The footer of a parquet file.
    pub struct FileMetaData {
        1 => version: i32,
        /// The schema, flattened in depth-first order. The first element is the root.
        2 => schema: Vec<SchemaElement>,
        3 => num_rows: i64,
        4 => row_groups: Vec<RowGroup>,
        5 => key_value_metadata: Option<Vec<KeyValue>>,
        6 => created_by: Option<String>,
        7 => column_orders: Option<Vec<ColumnOrder>>,
    }
);

thrift_struct!(
    pub struct DataPageHeader {
        1 => num_values: i32,
        2 => encoding: Encoding,
        3 => definition_level_encoding: Encoding,
        4 => repetition_level_encoding: Encoding,
        5 => statistics: Option<Statistics>,
    }
);

thrift_struct!(
    pub struct IndexPageHeader {}
);

thrift_struct!(
    pub struct DictionaryPageHeader {
        1 => num_values: i32,
        2 => encoding: Encoding,
        3 => is_sorted: Option<bool>,
    }
);

thrift_struct!(
    /// Header of a data page whose levels are stored uncompressed ahead of the values.
    pub struct DataPageHeaderV2 {
        1 => num_values: i32,
        2 => num_nulls: i32,
        3 => num_rows: i32,
        4 => encoding: Encoding,
        5 => definition_levels_byte_length: i32,
        6 => repetition_levels_byte_length: i32,
        7 => is_compressed: Option<bool>,
        8 => statistics: Option<Statistics>,
    }
);

impl DataPageHeaderV2 {
    /// Whether the values section is compressed. Defaults to `true`.
    pub fn is_compressed(&self) -> bool {
        self.is_compressed.unwrap_or(true)
    }
}

thrift_struct!(
    pub struct PageHeader {
        1 => type_: PageType,
        2 => uncompressed_page_size: i32,
        3 => compressed_page_size: i32,
        4 => crc: Option<i32>,
        5 => data_page_header: Option<DataPageHeader>,
        6 => index_page_header: Option<IndexPageHeader>,
        7 => dictionary_page_header: Option<DictionaryPageHeader>,
        8 => data_page_header_v2: Option<DataPageHeaderV2>,
    }
);

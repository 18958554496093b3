// Enums of parquet's thrift definitions, mapped to rust enums.
#[cfg(feature = "serde_types")]
use serde_derive::{Deserialize, Serialize};

use crate::thrift::thrift_enum;

thrift_enum!(
    /// The physical type of a leaf column.
    #[derive(Default)]
    pub enum Type {
        #[default]
        Boolean = 0,
        Int32 = 1,
        Int64 = 2,
        Int96 = 3,
        Float = 4,
        Double = 5,
        ByteArray = 6,
        FixedLenByteArray = 7,
    }
);

thrift_enum!(
    #[derive(Default)]
    pub enum Repetition {
        #[default]
        Required = 0,
        Optional = 1,
        Repeated = 2,
    }
);

thrift_enum!(
    /// Deprecated annotations of the schema, superseded by [`crate::format::LogicalType`].
    pub enum ConvertedType {
        Utf8 = 0,
        Map = 1,
        MapKeyValue = 2,
        List = 3,
        Enum = 4,
        Decimal = 5,
        Date = 6,
        TimeMillis = 7,
        TimeMicros = 8,
        TimestampMillis = 9,
        TimestampMicros = 10,
        Uint8 = 11,
        Uint16 = 12,
        Uint32 = 13,
        Uint64 = 14,
        Int8 = 15,
        Int16 = 16,
        Int32 = 17,
        Int64 = 18,
        Json = 19,
        Bson = 20,
        Interval = 21,
    }
);

thrift_enum!(
    #[derive(Default)]
    pub enum Compression {
        #[default]
        Uncompressed = 0,
        Snappy = 1,
        Gzip = 2,
        Lzo = 3,
        Brotli = 4,
        /// Lz4 with the framing used by Hadoop
        Lz4 = 5,
        Zstd = 6,
        /// Lz4 block format, without framing
        Lz4Raw = 7,
    }
);

thrift_enum!(
    #[derive(Default)]
    pub enum PageType {
        #[default]
        DataPage = 0,
        IndexPage = 1,
        DictionaryPage = 2,
        DataPageV2 = 3,
    }
);

thrift_enum!(
    #[derive(Default)]
    pub enum Encoding {
        /// Default encoding.
        /// BOOLEAN - 1 bit per value. 0 is false; 1 is true.
        /// INT32 - 4 bytes per value.  Stored as little-endian.
        /// INT64 - 8 bytes per value.  Stored as little-endian.
        /// FLOAT - 4 bytes per value.  IEEE. Stored as little-endian.
        /// DOUBLE - 8 bytes per value.  IEEE. Stored as little-endian.
        /// BYTE_ARRAY - 4 byte length stored as little endian, followed by bytes.
        /// FIXED_LEN_BYTE_ARRAY - Just the bytes.
        #[default]
        Plain = 0,
        /// Deprecated: Dictionary encoding. The values in the dictionary are encoded in the
        /// plain type.
        /// in a data page use RLE_DICTIONARY instead.
        /// in a Dictionary page use PLAIN instead
        PlainDictionary = 2,
        /// Group packed run length encoding. Usable for definition/repetition levels
        /// encoding and Booleans (on one bit: 0 is false; 1 is true.)
        Rle = 3,
        /// Bit packed encoding.  This can only be used if the data has a known max
        /// width.  Usable for definition/repetition levels encoding.
        BitPacked = 4,
        /// Delta encoding for integers. This can be used for int columns and works best
        /// on sorted data
        DeltaBinaryPacked = 5,
        /// Encoding for byte arrays to separate the length values and the data. The lengths
        /// are encoded using DELTA_BINARY_PACKED
        DeltaLengthByteArray = 6,
        /// Incremental-encoded byte array. Prefix lengths are encoded using DELTA_BINARY_PACKED.
        /// Suffixes are stored as delta length byte arrays.
        DeltaByteArray = 7,
        /// Dictionary encoding: the ids are encoded using the RLE encoding
        RleDictionary = 8,
        /// Encoding for floating-point data.
        /// K byte-streams are created where K is the size in bytes of the data type.
        /// The individual bytes of an FP value are scattered to the corresponding stream and
        /// the streams are concatenated.
        /// This itself does not reduce the size of the data but can lead to better compression
        /// afterwards.
        ByteStreamSplit = 9,
    }
);

impl Encoding {
    /// Whether values of this encoding are indices into a dictionary page.
    pub fn is_dictionary(&self) -> bool {
        matches!(self, Encoding::PlainDictionary | Encoding::RleDictionary)
    }
}

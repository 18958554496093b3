//! Contains [`Error`]
use crate::parquet_bridge::Compression;

/// List of features whose non-activation may cause a runtime error.
/// Used to indicate which feature a page needs to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Snappy compression and decompression
    Snappy,
    /// Brotli compression and decompression
    Brotli,
    /// Gzip compression and decompression
    Gzip,
    /// Lz4 raw compression and decompression
    Lz4,
    /// Zstd compression and decompression
    Zstd,
}

/// Errors generated by this crate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// When the parquet file is known to be out of spec.
    OutOfSpec(String),
    /// A thrift primitive needed `needed` bytes at `position` but the buffer ended first.
    EndOfInput { position: usize, needed: usize },
    /// The thrift stream is malformed: unknown wire type, over-long varint or too deep nesting.
    ProtocolViolation(String),
    /// A thrift string field starting at `position` is not valid utf8.
    InvalidUtf8 { position: usize },
    /// The column chunk is compressed with a codec this crate can't decompress.
    UnsupportedCodec(Compression),
    /// Error presented when trying to use a code branch that requires activating a feature.
    FeatureNotActive(Feature, String),
    /// Error presented when trying to use a feature from parquet that is not yet supported
    FeatureNotSupported(String),
    /// A column chunk without its embedded column metadata.
    MissingColumnMetadata(String),
    /// The file is too small to contain a footer.
    FileTooSmall { size: u64 },
    /// The last 4 bytes of the file are not `PAR1`.
    InvalidMagic { found: [u8; 4] },
    /// Fewer bytes than declared were available for a page at `offset`.
    ShortRead {
        offset: u64,
        expected: usize,
        actual: usize,
    },
    /// A dictionary index that does not point to an entry of the dictionary.
    InvalidIndex { index: u32, dictionary_len: usize },
    /// When the parameters passed are invalid.
    InvalidParameter(String),
    /// When decoding or decompressing, the page would allocate more memory than allowed
    WouldOverAllocate,
    /// Underlying IO error.
    Io(String),
}

impl Error {
    pub(crate) fn oos<I: Into<String>>(message: I) -> Self {
        Self::OutOfSpec(message.into())
    }

    pub(crate) fn protocol<I: Into<String>>(message: I) -> Self {
        Self::ProtocolViolation(message.into())
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::OutOfSpec(message) => {
                write!(fmt, "File out of specification: {}", message)
            }
            Error::EndOfInput { position, needed } => {
                write!(
                    fmt,
                    "Unexpected end of input: {} byte(s) needed at position {}",
                    needed, position
                )
            }
            Error::ProtocolViolation(message) => {
                write!(fmt, "Thrift protocol violation: {}", message)
            }
            Error::InvalidUtf8 { position } => {
                write!(fmt, "Thrift string at position {} is not valid utf8", position)
            }
            Error::UnsupportedCodec(codec) => {
                write!(fmt, "Compression {:?} is not supported", codec)
            }
            Error::FeatureNotActive(feature, reason) => {
                write!(
                    fmt,
                    "The feature \"{:?}\" needs to be active to {}",
                    feature, reason
                )
            }
            Error::FeatureNotSupported(reason) => {
                write!(fmt, "Not yet supported: {}", reason)
            }
            Error::MissingColumnMetadata(column) => {
                write!(fmt, "Column chunk of \"{}\" has no column metadata", column)
            }
            Error::FileTooSmall { size } => {
                write!(
                    fmt,
                    "Invalid Parquet file. Size ({} bytes) is smaller than the footer",
                    size
                )
            }
            Error::InvalidMagic { found } => {
                write!(
                    fmt,
                    "Invalid Parquet file. Footer magic is {:?} instead of \"PAR1\"",
                    found
                )
            }
            Error::ShortRead {
                offset,
                expected,
                actual,
            } => {
                write!(
                    fmt,
                    "Page at offset {} declares {} bytes but only {} could be read",
                    offset, expected, actual
                )
            }
            Error::InvalidIndex {
                index,
                dictionary_len,
            } => {
                write!(
                    fmt,
                    "Dictionary index {} is out of bounds for a dictionary of {} values",
                    index, dictionary_len
                )
            }
            Error::InvalidParameter(message) => {
                write!(fmt, "Invalid parameter: {}", message)
            }
            Error::WouldOverAllocate => {
                write!(fmt, "Operation would exceed memory use threshold")
            }
            Error::Io(message) => {
                write!(fmt, "underlying IO error: {}", message)
            }
        }
    }
}

#[cfg(feature = "snappy")]
impl From<snap::Error> for Error {
    fn from(e: snap::Error) -> Error {
        Error::OutOfSpec(format!("underlying snap error: {}", e))
    }
}

#[cfg(feature = "lz4")]
impl From<lz4_flex::block::DecompressError> for Error {
    fn from(e: lz4_flex::block::DecompressError) -> Error {
        Error::OutOfSpec(format!("underlying lz4_flex error: {}", e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e.to_string())
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(e: std::num::TryFromIntError) -> Error {
        Error::OutOfSpec(format!("Number must be zero or positive: {}", e))
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Error {
        Error::WouldOverAllocate
    }
}

/// A specialized `Result` for Parquet errors.
pub type Result<T> = std::result::Result<T, Error>;

//! Closed enums describing the on-disk format.

use std::fmt;

/// On-disk primitive type of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    ByteArray,
    /// Fixed-length byte array; the length lives on the column descriptor.
    FixedLenByteArray,
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Int32 => write!(f, "INT32"),
            Self::Int64 => write!(f, "INT64"),
            Self::ByteArray => write!(f, "BYTE_ARRAY"),
            Self::FixedLenByteArray => write!(f, "FIXED_LEN_BYTE_ARRAY"),
        }
    }
}

/// Value encoding declared by a data page header.
///
/// Only `Plain`, `Rle`, and `PlainDictionary` are decodable; the remaining
/// variants exist so a page declaring one can be rejected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Values laid out back to back with no auxiliary structure.
    Plain,
    /// RLE/bit-packing hybrid runs decoded as raw values.
    Rle,
    /// RLE/bit-packing hybrid runs decoded as dictionary indices.
    PlainDictionary,
    RleDictionary,
    DeltaBinaryPacked,
    DeltaLengthByteArray,
    DeltaByteArray,
    ByteStreamSplit,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "PLAIN"),
            Self::Rle => write!(f, "RLE"),
            Self::PlainDictionary => write!(f, "PLAIN_DICTIONARY"),
            Self::RleDictionary => write!(f, "RLE_DICTIONARY"),
            Self::DeltaBinaryPacked => write!(f, "DELTA_BINARY_PACKED"),
            Self::DeltaLengthByteArray => write!(f, "DELTA_LENGTH_BYTE_ARRAY"),
            Self::DeltaByteArray => write!(f, "DELTA_BYTE_ARRAY"),
            Self::ByteStreamSplit => write!(f, "BYTE_STREAM_SPLIT"),
        }
    }
}

/// Kind of page found in a column chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    DictionaryPage,
    DataPage,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DictionaryPage => write!(f, "DICTIONARY_PAGE"),
            Self::DataPage => write!(f, "DATA_PAGE"),
        }
    }
}

/// Compression codec identifier carried by chunk metadata.
///
/// Only `Uncompressed` is decodable out of the box; the rest exist so the
/// codec extension point can name what it was asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    #[default]
    Uncompressed,
    Snappy,
    Gzip,
    Brotli,
    Lz4,
    Zstd,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncompressed => write!(f, "UNCOMPRESSED"),
            Self::Snappy => write!(f, "SNAPPY"),
            Self::Gzip => write!(f, "GZIP"),
            Self::Brotli => write!(f, "BROTLI"),
            Self::Lz4 => write!(f, "LZ4"),
            Self::Zstd => write!(f, "ZSTD"),
        }
    }
}
